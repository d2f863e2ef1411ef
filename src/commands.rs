use crate::batch::{batch_enhance, collect_image_files, generate_output_path, BatchSettings};
use crate::client::EnhancerClient;
use crate::constants::{ERROR_PREFIX, PROGRESS_SPINNER_TEMPLATE, SUCCESS_PREFIX};
use crate::error::{EnhancerError, Result};
use crate::models::OperationResult;
use crate::transport::Transport;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

pub fn scale_options(scale: u32) -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("scale".to_string(), json!(scale));
    options
}

/// Enhances `input` and writes the result to `output`.
///
/// Returns `Ok(false)` when the service or the save step failed; the
/// failure has already been reported to the user.
pub fn run_enhance<T: Transport>(
    client: &EnhancerClient<T>,
    input: &Path,
    output: &Path,
    model: &str,
    scale: u32,
) -> Result<bool> {
    let spinner = create_progress_spinner(&format!("Enhancing {}", input.display()));
    let result = client.enhance_image(input, model, scale_options(scale));
    spinner.finish_and_clear();

    let payload = match result {
        OperationResult::Success { payload } => payload,
        OperationResult::Failure { message } => {
            println!("{} Error: {}", ERROR_PREFIX, message);
            return Ok(false);
        }
    };

    if client.save_enhanced_image(&payload, output).is_success() {
        println!("{} Image enhanced successfully: {}", SUCCESS_PREFIX, output.display());
        Ok(true)
    } else {
        println!("{} Failed to save enhanced image", ERROR_PREFIX);
        Ok(false)
    }
}

/// Enhances every image under `input` and saves each success into
/// `output_dir`, which is created if needed. Returns `(saved, total)`.
///
/// When `input` is a directory, subdirectories below it are mirrored under
/// `output_dir`. An output path already written in this run is never
/// overwritten; the later image is skipped and not counted as saved.
pub fn run_batch<T: Transport>(
    client: &EnhancerClient<T>,
    input: &str,
    output_dir: &Path,
    model: &str,
    scale: u32,
    recursive: bool,
) -> Result<(usize, usize)> {
    let image_files = collect_image_files(input, recursive)?;
    if image_files.is_empty() {
        println!("No image files found in {}", input);
        return Ok((0, 0));
    }

    fs::create_dir_all(output_dir)
        .map_err(|_| EnhancerError::DirectoryCreationFailed(output_dir.to_path_buf()))?;

    let report = batch_enhance(
        client,
        &image_files,
        model,
        &scale_options(scale),
        &BatchSettings::default(),
    );

    let input_root = Path::new(input);
    let input_root = input_root.is_dir().then_some(input_root);
    let mut written = HashSet::new();
    let mut saved = 0;
    for item in &report.items {
        let Some(payload) = item.result.payload() else {
            continue;
        };
        let output_path = generate_output_path(&item.source_path, input_root, output_dir)?;
        if !written.insert(output_path.clone()) {
            crate::warn!(
                "Skipping {}: {} was already written by this batch",
                item.source_path.display(),
                output_path.display()
            );
            continue;
        }
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|_| EnhancerError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
        if client.save_enhanced_image(payload, &output_path).is_success() {
            saved += 1;
        }
    }

    println!(
        "Batch processing completed: {}/{} images enhanced",
        saved,
        report.total()
    );
    Ok((saved, report.total()))
}

/// Prints a result as pretty JSON on stdout.
pub fn print_result(result: &OperationResult) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&result.to_json())
        .map_err(|e| EnhancerError::InvalidResponse(e.to_string()))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}

fn create_progress_spinner(message: &str) -> ProgressBar {
    if !crate::logger::progress_enabled() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
