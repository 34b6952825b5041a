//! Common traits for archive format handlers.

use crate::ArchiveEntry;
use crate::Result;

use super::common::Stager;

/// Trait for archive format handlers.
///
/// A handler lists its entries once when it is opened and can then stage its
/// whole content through a [`Stager`].
pub trait ArchiveFormat {
    /// Entries in archive enumeration order, directories included.
    fn entries(&self) -> &[ArchiveEntry];

    /// Writes every file and directory entry through `stager`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read, a quota is exceeded,
    /// or writing to the staging directory fails.
    fn stage(&mut self, stager: &mut Stager<'_>) -> Result<()>;

    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;
}
