pub mod logger;

pub mod batch;
pub mod cli;
pub mod client;
pub mod codec;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod transport;
pub mod validation;

pub use batch::{
    batch_enhance, collect_image_files, generate_output_path, BatchItem, BatchReport, BatchSettings,
};
pub use client::EnhancerClient;
pub use codec::{decode_data_uri, decode_result, encode_bytes, encode_image};
pub use config::ClientConfig;
pub use error::{EnhancerError, Result};
pub use models::{AdminCommand, AdminCommandKind, EnhancementRequest, OperationResult};
pub use transport::{HttpTransport, Method, RawResponse, Transport};
