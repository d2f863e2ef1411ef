use crate::constants::{MAX_FILE_SIZE, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{EnhancerError, Result};
use std::fs;
use std::path::Path;

/// Validate an input image before it is read and uploaded
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(EnhancerError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(EnhancerError::InvalidRequest(format!(
            "input path is not a file: {}",
            path.display()
        )));
    }

    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(EnhancerError::FileTooLarge(metadata.len(), MAX_FILE_SIZE));
    }

    Ok(())
}

/// Check if the file extension is one the batch command picks up
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_path_not_found() {
        let path = Path::new("nonexistent.jpg");
        let result = validate_input_path(path);
        assert!(matches!(result, Err(EnhancerError::FileNotFound(_))));
    }

    #[test]
    fn test_validate_input_path_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_path(temp_dir.path());
        assert!(matches!(result, Err(EnhancerError::InvalidRequest(_))));
    }

    #[test]
    fn test_validate_input_path_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test.jpg");
        let mut file = File::create(&test_file).unwrap();
        file.write_all(b"fake image data").unwrap();

        assert!(validate_input_path(&test_file).is_ok());
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.webp")));
        assert!(is_image_file(Path::new("test.bmp")));

        assert!(!is_image_file(Path::new("test.gif")));
        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
    }
}
