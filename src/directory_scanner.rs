// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for building a browsable item list.
//!
//! This module scans a directory for supported image formats and turns them
//! into [`MediaItem`]s, sorted alphabetically by file name. Given a file
//! rather than a directory, it scans the file's parent and starts on that
//! file.

use crate::domain::media::MediaItem;
use crate::error::{Error, Result};
use crate::infrastructure::is_supported_image;
use std::path::{Path, PathBuf};

/// Items found by a scan and the index to open first.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub items: Vec<MediaItem>,
    pub initial_index: usize,
}

/// Scans `path` (a directory, or a file inside one) for images.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan(path: &Path) -> Result<ScanResult> {
    let (directory, current_file) = if path.is_dir() {
        (path, None)
    } else {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Io("No parent directory".into()))?;
        (parent, Some(path))
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let file = entry.path();
        if file.is_file() && is_supported_image(&file) {
            files.push(file);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    // The current file may have been deleted since; start at 0 then.
    let initial_index = current_file
        .and_then(|current| files.iter().position(|p| p == current))
        .unwrap_or(0);

    tracing::debug!(
        directory = %directory.display(),
        count = files.len(),
        "scanned directory"
    );

    Ok(ScanResult {
        items: files.iter().map(|p| to_item(p)).collect(),
        initial_index,
    })
}

fn to_item(path: &PathBuf) -> MediaItem {
    let item = MediaItem::new(path.to_string_lossy().into_owned());
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => item.with_caption(name),
        None => item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake image data")
            .expect("failed to write test file");
        path
    }

    #[test]
    fn scan_finds_only_images() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_image(temp_dir.path(), "a.jpg");
        create_test_image(temp_dir.path(), "b.png");
        create_test_image(temp_dir.path(), "c.gif");
        create_test_image(temp_dir.path(), "not_image.txt");
        create_test_image(temp_dir.path(), "clip.mp4");

        let result = scan(temp_dir.path()).expect("failed to scan directory");
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.initial_index, 0);
    }

    #[test]
    fn scan_sorts_alphabetically_with_captions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_image(temp_dir.path(), "c.jpg");
        create_test_image(temp_dir.path(), "a.jpg");
        create_test_image(temp_dir.path(), "b.jpg");

        let result = scan(temp_dir.path()).expect("failed to scan directory");
        let captions: Vec<_> = result
            .items
            .iter()
            .map(|item| item.caption.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(captions, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn scan_from_file_starts_on_that_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_image(temp_dir.path(), "a.jpg");
        let b = create_test_image(temp_dir.path(), "b.jpg");
        create_test_image(temp_dir.path(), "c.jpg");

        let result = scan(&b).expect("failed to scan directory");
        assert_eq!(result.initial_index, 1);
        assert_eq!(result.items[1].uri, b.to_string_lossy());
    }

    #[test]
    fn scan_of_missing_directory_fails() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("nope").join("deeper");
        assert!(scan(&missing).is_err());
    }

    #[test]
    fn scan_of_empty_directory_is_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = scan(temp_dir.path()).expect("failed to scan directory");
        assert!(result.items.is_empty());
    }
}
