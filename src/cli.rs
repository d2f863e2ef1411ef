use crate::constants::{ADMIN_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SCALE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "image-enhancer",
    about = "Command-line client for the image enhancement service",
    long_about = "image-enhancer uploads local images to a remote enhancement service, \
                  saves the enhanced results, classifies image quality, and runs \
                  administrative commands against the service.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    image-enhancer enhance photo.jpg photo_4x.jpg --scale 4\n  \
    image-enhancer batch ./photos ./enhanced -r\n  \
    image-enhancer classify photo.jpg\n  \
    image-enhancer --admin-key $KEY logs --level error --limit 20"
)]
pub struct Args {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_BASE_URL,
        help = "Base URL of the enhancement API"
    )]
    pub base_url: String,

    #[arg(
        long,
        global = true,
        env = ADMIN_KEY_ENV,
        hide_env_values = true,
        help = "Admin key for privileged operations",
        long_help = "Admin key sent with every admin command. \
                     Falls back to the ADMIN_KEY environment variable; there is no built-in default."
    )]
    pub admin_key: Option<String>,

    #[arg(short, long, global = true, help = "Only print results and errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Print request details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Enhance a single image")]
    Enhance {
        #[arg(help = "Input image path")]
        input: PathBuf,

        #[arg(help = "Output image path")]
        output: PathBuf,

        #[arg(short, long, default_value = DEFAULT_MODEL, help = "AI model to use")]
        model: String,

        #[arg(short, long, default_value_t = DEFAULT_SCALE, help = "Upscaling factor")]
        scale: u32,
    },

    #[command(
        about = "Enhance multiple images",
        long_about = "Enhance every image found in a directory, file, or glob pattern, one at a time. \
                      Results are written to the output directory as enhanced_<name>."
    )]
    Batch {
        #[arg(
            help = "Input directory, file, or glob",
            long_help = "Input can be a directory path, a single file, or a glob expression. \
                         Only jpg, jpeg, png, webp and bmp files are picked up."
        )]
        input: String,

        #[arg(help = "Output directory for enhanced images")]
        output_dir: PathBuf,

        #[arg(short, long, default_value = DEFAULT_MODEL, help = "AI model to use")]
        model: String,

        #[arg(short, long, default_value_t = DEFAULT_SCALE, help = "Upscaling factor")]
        scale: u32,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(about = "Classify image quality")]
    Classify {
        #[arg(help = "Input image path")]
        input: PathBuf,
    },

    #[command(about = "Get system status")]
    Status,

    #[command(about = "Perform health check")]
    Health,

    #[command(about = "Get system logs")]
    Logs {
        #[arg(long, default_value = "info", help = "Log level")]
        level: String,

        #[arg(long, default_value_t = 100, help = "Number of logs to retrieve")]
        limit: u32,
    },

    #[command(about = "Get system metrics")]
    Metrics {
        #[arg(long, default_value = "24h", help = "Time range for metrics")]
        time_range: String,
    },

    #[command(about = "Test API connectivity")]
    TestApis,

    #[command(about = "Clear system caches")]
    ClearCache,

    #[command(about = "Get debug information for one processed image")]
    DebugImage {
        #[arg(help = "Image identifier")]
        image_id: String,

        #[arg(long, help = "Leave processing metadata out of the report")]
        no_metadata: bool,
    },

    #[command(about = "Export system data")]
    ExportData {
        #[arg(long = "type", default_value = "all", help = "Data set to export")]
        data_type: String,

        #[arg(long, default_value = "json", help = "Export format")]
        format: String,
    },

    #[command(about = "Get detailed system information")]
    SystemInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_enhance_defaults() {
        let args = Args::try_parse_from(["image-enhancer", "enhance", "in.jpg", "out.jpg"]).unwrap();
        assert_eq!(args.base_url, "http://localhost:8000");
        match args.command {
            Commands::Enhance { model, scale, .. } => {
                assert_eq!(model, "nightmareai/real-esrgan");
                assert_eq!(scale, 4);
            }
            _ => panic!("expected enhance"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "image-enhancer",
            "status",
            "--admin-key",
            "secret",
            "--base-url",
            "http://enhance.local:9000",
        ])
        .unwrap();
        assert_eq!(args.admin_key.as_deref(), Some("secret"));
        assert_eq!(args.base_url, "http://enhance.local:9000");
        assert!(matches!(args.command, Commands::Status));
    }

    #[test]
    fn test_export_data_type_flag() {
        let args = Args::try_parse_from([
            "image-enhancer",
            "export-data",
            "--type",
            "jobs",
            "--format",
            "csv",
        ])
        .unwrap();
        match args.command {
            Commands::ExportData { data_type, format } => {
                assert_eq!(data_type, "jobs");
                assert_eq!(format, "csv");
            }
            _ => panic!("expected export-data"),
        }
    }
}
