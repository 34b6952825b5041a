//! Selection state for the files of one archive.
//!
//! A [`SelectionModel`] is a plain value owned by the caller. It is built once
//! from the archive entries, edited by index, and then handed to the pipeline.
//! Edits never reorder or remove entries, so an index stays valid for the
//! lifetime of the model.

use std::ops::Index;

use crate::types::ArchiveEntry;

/// A file entry that can be selected for copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableFile {
    entry: ArchiveEntry,
    output_name: String,
    will_copy: bool,
    is_processed: bool,
}

impl SelectableFile {
    /// Wraps a file entry with default selection state.
    ///
    /// The output name defaults to the entry's base name.
    #[must_use]
    pub fn new(entry: ArchiveEntry) -> Self {
        let output_name = entry.base_name().to_string();
        Self {
            entry,
            output_name,
            will_copy: false,
            is_processed: false,
        }
    }

    /// The underlying archive entry.
    #[must_use]
    pub fn entry(&self) -> &ArchiveEntry {
        &self.entry
    }

    /// Path of the entry inside the archive.
    #[must_use]
    pub fn internal_path(&self) -> &str {
        self.entry.internal_path()
    }

    /// File name used at the destination.
    #[must_use]
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Whether the entry is selected for copying.
    #[must_use]
    pub const fn will_copy(&self) -> bool {
        self.will_copy
    }

    /// Whether the entry was copied successfully by the pipeline.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        self.is_processed
    }

    /// Returns `true` if the output name differs from the archive's base name.
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.output_name != self.entry.base_name()
    }

    pub(crate) fn mark_processed(&mut self) {
        self.is_processed = true;
    }
}

/// Ordered table of selectable files.
///
/// # Examples
///
/// ```
/// use unpick_core::{ArchiveEntry, list_files};
///
/// let entries = vec![
///     ArchiveEntry::directory("docs/"),
///     ArchiveEntry::file("docs/readme.txt", 5),
///     ArchiveEntry::file("img/logo.png", 9),
/// ];
/// let mut selection = list_files(&entries);
/// assert_eq!(selection.len(), 2);
///
/// selection.set_will_copy(0, true);
/// selection.set_output_name(0, "README.txt");
/// assert_eq!(selection[0].output_name(), "README.txt");
/// assert_eq!(selection.selected_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    files: Vec<SelectableFile>,
}

impl SelectionModel {
    /// Builds a model from archive entries, dropping directories.
    ///
    /// Enumeration order is preserved; it is both the display order and the
    /// processing order.
    #[must_use]
    pub fn from_entries(entries: &[ArchiveEntry]) -> Self {
        let files = entries
            .iter()
            .filter(|entry| !entry.is_directory())
            .cloned()
            .map(SelectableFile::new)
            .collect();
        Self { files }
    }

    /// Number of files in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the archive holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the file at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectableFile> {
        self.files.get(index)
    }

    /// Iterates over files in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectableFile> {
        self.files.iter()
    }

    /// Selects or deselects the file at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_will_copy(&mut self, index: usize, will_copy: bool) {
        self.files[index].will_copy = will_copy;
    }

    /// Flips the selection of the file at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn toggle_will_copy(&mut self, index: usize) {
        let file = &mut self.files[index];
        file.will_copy = !file.will_copy;
    }

    /// Sets the destination file name of the file at `index`.
    ///
    /// The name is accepted as-is; it is validated when the file is copied.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_output_name(&mut self, index: usize, output_name: impl Into<String>) {
        self.files[index].output_name = output_name.into();
    }

    /// Selects or deselects every file.
    pub fn select_all(&mut self, will_copy: bool) {
        for file in &mut self.files {
            file.will_copy = will_copy;
        }
    }

    /// Finds the index of the file with the given internal path.
    #[must_use]
    pub fn find_by_path(&self, internal_path: &str) -> Option<usize> {
        self.files
            .iter()
            .position(|file| file.internal_path() == internal_path)
    }

    /// Number of files selected for copying.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.files.iter().filter(|file| file.will_copy).count()
    }

    /// Number of files copied successfully.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.files.iter().filter(|file| file.is_processed).count()
    }

    pub(crate) fn mark_processed(&mut self, index: usize) {
        self.files[index].mark_processed();
    }
}

impl Index<usize> for SelectionModel {
    type Output = SelectableFile;

    fn index(&self, index: usize) -> &Self::Output {
        &self.files[index]
    }
}

impl<'a> IntoIterator for &'a SelectionModel {
    type Item = &'a SelectableFile;
    type IntoIter = std::slice::Iter<'a, SelectableFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
