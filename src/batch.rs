use crate::client::EnhancerClient;
use crate::constants::{BATCH_PAUSE, ENHANCED_FILE_PREFIX, PROGRESS_BAR_TEMPLATE};
use crate::error::{EnhancerError, Result};
use crate::models::OperationResult;
use crate::transport::Transport;
use crate::validation::is_image_file;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Pause between consecutive requests, not applied after the last one.
    pub pause: Duration,
    pub show_progress: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            pause: BATCH_PAUSE,
            show_progress: crate::logger::progress_enabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub source_path: PathBuf,
    pub result: OperationResult,
}

/// Per-input outcomes of one batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn tally(&self) -> String {
        format!("{}/{}", self.succeeded(), self.total())
    }
}

/// Enhances each image in turn, sleeping `settings.pause` between requests.
///
/// A failing item is recorded and the run continues.
pub fn batch_enhance<T: Transport>(
    client: &EnhancerClient<T>,
    image_paths: &[PathBuf],
    model: &str,
    options: &Map<String, Value>,
    settings: &BatchSettings,
) -> BatchReport {
    let total = image_paths.len();
    crate::info!("Starting batch enhancement of {} images", total);

    let start_time = Instant::now();
    let progress = batch_progress_bar(total as u64, settings.show_progress);
    let mut items = Vec::with_capacity(total);

    for (index, image_path) in image_paths.iter().enumerate() {
        crate::verbose!(
            "Processing image {}/{}: {}",
            index + 1,
            total,
            image_path.display()
        );
        progress.set_message(display_name(image_path));

        let result = client.enhance_image(image_path, model, options.clone());
        items.push(BatchItem {
            source_path: image_path.clone(),
            result,
        });
        progress.inc(1);

        if index + 1 < total && !settings.pause.is_zero() {
            thread::sleep(settings.pause);
        }
    }

    progress.finish_and_clear();
    let report = BatchReport { items };
    crate::info!(
        "Batch enhancement completed: {} succeeded in {:.1?}",
        report.tally(),
        start_time.elapsed()
    );
    report
}

fn batch_progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE) {
        progress.set_style(style.progress_chars("#>-"));
    }
    progress
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Collects batch inputs from a file, a directory or a glob pattern.
///
/// Hidden entries are skipped when walking directories and the result is
/// sorted so runs are reproducible.
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        if is_image_file(input_path) {
            image_files.push(input_path.to_path_buf());
        }
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path)
        } else {
            WalkDir::new(input_path).max_depth(1)
        };

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_image_file(path) {
                image_files.push(path.to_path_buf());
            }
        }
    } else {
        let pattern = glob(input).map_err(|_| EnhancerError::NoImageFilesFound(input.to_string()))?;
        for entry in pattern.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                image_files.push(entry);
            }
        }
    }

    image_files.sort();
    Ok(image_files)
}

/// `output_dir/enhanced_<file name>`, keeping the subdirectory of
/// `input_path` below `input_root` when one is given.
///
/// Files that do not sit under `input_root` land directly in `output_dir`.
pub fn generate_output_path(
    input_path: &Path,
    input_root: Option<&Path>,
    output_dir: &Path,
) -> Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| EnhancerError::InvalidRequest("Invalid file name".to_string()))?;

    let sub_dir = input_root
        .and_then(|root| input_path.strip_prefix(root).ok())
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));

    Ok(output_dir.join(sub_dir).join(format!(
        "{}{}",
        ENHANCED_FILE_PREFIX,
        file_name.to_string_lossy()
    )))
}
