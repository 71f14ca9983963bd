// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding and sorting image files.
//!
//! This module scans a directory for supported image formats, filters them,
//! and sorts them lexicographically by file name.

use crate::error::{Error, Result};
use crate::media;
use std::path::{Path, PathBuf};

/// Browsing direction through an [`ImageList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Represents a list of image files in a directory with navigation capabilities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageList {
    image_files: Vec<PathBuf>,
    current_index: Option<usize>,
}

impl ImageList {
    /// Creates a new empty ImageList.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the directory containing `current_file` and selects that file.
    /// If the current file doesn't exist anymore, the scan still succeeds but
    /// current_index will be None.
    pub fn scan_directory(current_file: &Path) -> Result<Self> {
        let parent = current_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let image_files = list_image_files(parent)?;
        let current_index = image_files
            .iter()
            .position(|p| p.file_name() == current_file.file_name());

        Ok(Self {
            image_files,
            current_index,
        })
    }

    /// Scans a directory directly for supported image files.
    /// Sets current_index to 0 (first file) if any image files are found.
    ///
    /// Returns an error if the directory cannot be read.
    pub fn scan_directory_direct(directory: &Path) -> Result<Self> {
        let image_files = list_image_files(directory)?;
        let current_index = if image_files.is_empty() { None } else { Some(0) };

        Ok(Self {
            image_files,
            current_index,
        })
    }

    /// Returns the n-th path from the current position in `direction`, wrapping around.
    /// `skip_count = 0` returns the immediate neighbour, `skip_count = 1` skips one file, etc.
    pub fn peek_nth(&self, direction: Direction, skip_count: usize) -> Option<&Path> {
        self.index_of_nth(direction, skip_count)
            .and_then(|idx| self.image_files.get(idx))
            .map(|p| p.as_path())
    }

    fn index_of_nth(&self, direction: Direction, skip_count: usize) -> Option<usize> {
        if self.image_files.is_empty() {
            return None;
        }

        let len = self.image_files.len();
        let offset = (skip_count + 1) % len;
        let index = match (direction, self.current_index) {
            (Direction::Next, Some(idx)) => (idx + offset) % len,
            (Direction::Next, None) => skip_count % len,
            (Direction::Previous, Some(idx)) => (idx + len - offset) % len,
            (Direction::Previous, None) => (len - offset) % len,
        };
        Some(index)
    }

    /// Candidates to try, in order, when stepping in `direction`.
    ///
    /// Every other file is visited once before the current file comes up again,
    /// so a caller can skip unreadable files without looping forever.
    pub fn candidates(&self, direction: Direction) -> impl Iterator<Item = &Path> + '_ {
        (0..self.image_files.len()).filter_map(move |skip| self.peek_nth(direction, skip))
    }

    /// Returns the total number of image files in the list.
    pub fn len(&self) -> usize {
        self.image_files.len()
    }

    /// Checks if the image list is empty.
    pub fn is_empty(&self) -> bool {
        self.image_files.is_empty()
    }

    /// Updates the current index to the given path if it exists in the list.
    pub fn set_current(&mut self, path: &Path) {
        self.current_index = self.image_files.iter().position(|p| p == path);
    }

    /// Returns the path at the specified index.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.image_files.get(index).map(|p| p.as_path())
    }
}

/// Lists supported image files in `directory`, sorted by file name.
pub fn list_image_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::Io(format!(
            "{} is not a directory",
            directory.display()
        )));
    }

    let mut image_files = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {}", directory.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && media::is_supported_image(&path) {
            image_files.push(path);
        }
    }

    image_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!(
        "Found {} image(s) in {}",
        image_files.len(),
        directory.display()
    );
    Ok(image_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake image data")
            .expect("failed to write test file");
        path
    }

    #[test]
    fn scan_directory_finds_only_images() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img1 = create_test_file(temp_dir.path(), "a.jpg");
        create_test_file(temp_dir.path(), "b.png");
        create_test_file(temp_dir.path(), "c.gif");
        create_test_file(temp_dir.path(), "not_image.txt");
        create_test_file(temp_dir.path(), "clip.mp4");

        let list = ImageList::scan_directory(&img1).expect("failed to scan directory");

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some(img1.as_path()));
        assert_eq!(list.peek_nth(Direction::Next, 2), Some(img1.as_path()));
    }

    #[test]
    fn scan_directory_sorts_lexicographically() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img_c = create_test_file(temp_dir.path(), "c.jpg");
        let img_a = create_test_file(temp_dir.path(), "a.jpg");
        let img_b = create_test_file(temp_dir.path(), "B.jpg");

        let list = ImageList::scan_directory(&img_a).expect("failed to scan directory");

        // Uppercase sorts before lowercase in byte order.
        assert_eq!(list.get(0), Some(img_b.as_path()));
        assert_eq!(list.get(1), Some(img_a.as_path()));
        assert_eq!(list.get(2), Some(img_c.as_path()));
    }

    #[test]
    fn stepping_forward_wraps_around_to_first() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img1 = create_test_file(temp_dir.path(), "a.jpg");
        create_test_file(temp_dir.path(), "b.jpg");
        let img3 = create_test_file(temp_dir.path(), "c.jpg");

        let list = ImageList::scan_directory(&img3).expect("failed to scan directory");

        assert_eq!(list.peek_nth(Direction::Next, 0), Some(img1.as_path()));
        assert_eq!(list.peek_nth(Direction::Next, 2), Some(img3.as_path()));
    }

    #[test]
    fn stepping_back_wraps_around_to_last() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img1 = create_test_file(temp_dir.path(), "a.jpg");
        create_test_file(temp_dir.path(), "b.jpg");
        let img3 = create_test_file(temp_dir.path(), "c.jpg");

        let list = ImageList::scan_directory(&img1).expect("failed to scan directory");

        assert_eq!(list.peek_nth(Direction::Previous, 0), Some(img3.as_path()));
    }

    #[test]
    fn empty_list_navigation_returns_none() {
        let list = ImageList::new();
        assert!(list.peek_nth(Direction::Next, 0).is_none());
        assert!(list.peek_nth(Direction::Previous, 0).is_none());
        assert_eq!(list.candidates(Direction::Next).count(), 0);
    }

    #[test]
    fn single_image_navigation_returns_same_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img1 = create_test_file(temp_dir.path(), "only.jpg");

        let list = ImageList::scan_directory(&img1).expect("failed to scan directory");

        assert_eq!(list.peek_nth(Direction::Next, 0), Some(img1.as_path()));
        assert_eq!(list.peek_nth(Direction::Previous, 0), Some(img1.as_path()));
    }

    #[test]
    fn candidates_visit_every_other_file_then_current() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let a = create_test_file(temp_dir.path(), "a.jpg");
        let b = create_test_file(temp_dir.path(), "b.jpg");
        let c = create_test_file(temp_dir.path(), "c.jpg");

        let list = ImageList::scan_directory(&b).expect("failed to scan directory");

        let forward: Vec<_> = list.candidates(Direction::Next).collect();
        assert_eq!(forward, vec![c.as_path(), a.as_path(), b.as_path()]);
        let backward: Vec<_> = list.candidates(Direction::Previous).collect();
        assert_eq!(backward, vec![a.as_path(), c.as_path(), b.as_path()]);
    }

    #[test]
    fn candidates_without_current_start_at_the_edges() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let a = create_test_file(temp_dir.path(), "a.jpg");
        let b = create_test_file(temp_dir.path(), "b.jpg");

        let mut list = ImageList::scan_directory_direct(temp_dir.path()).unwrap();
        list.set_current(Path::new("gone.jpg"));

        let forward: Vec<_> = list.candidates(Direction::Next).collect();
        assert_eq!(forward, vec![a.as_path(), b.as_path()]);
        let backward: Vec<_> = list.candidates(Direction::Previous).collect();
        assert_eq!(backward, vec![b.as_path(), a.as_path()]);
    }

    #[test]
    fn scan_directory_direct_selects_first_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img_b = create_test_file(temp_dir.path(), "b.png");
        let img_a = create_test_file(temp_dir.path(), "a.jpg");
        create_test_file(temp_dir.path(), "readme.txt");

        let list = ImageList::scan_directory_direct(temp_dir.path()).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(img_a.as_path()));
        // Stepping forward from the first file reaches the second.
        assert_eq!(list.peek_nth(Direction::Next, 0), Some(img_b.as_path()));
    }

    #[test]
    fn scan_directory_direct_handles_empty_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let list = ImageList::scan_directory_direct(temp_dir.path()).unwrap();

        assert!(list.is_empty());
        assert_eq!(list.candidates(Direction::Next).count(), 0);
    }

    #[test]
    fn list_image_files_rejects_non_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = create_test_file(temp_dir.path(), "a.jpg");
        assert!(list_image_files(&file).is_err());
    }
}
