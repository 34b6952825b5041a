//! Archive format implementations.

pub mod common;
pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use common::Stager;
pub use detect::ArchiveType;
pub use detect::detect_format;
pub use tar::TarArchive;
pub use tar::TarCompression;
pub use traits::ArchiveFormat;
pub use zip::ZipArchive;

use crate::Result;

/// Opens the archive at `path` with the handler matching its extension.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for unknown extensions, or the underlying
/// error if the file cannot be read as the detected format.
pub fn open_format(path: &Path) -> Result<Box<dyn ArchiveFormat>> {
    match detect_format(path)? {
        ArchiveType::Zip => {
            let reader = BufReader::new(File::open(path)?);
            Ok(Box::new(ZipArchive::new(reader)?))
        }
        ArchiveType::Tar => Ok(Box::new(TarArchive::open(path, TarCompression::None)?)),
        ArchiveType::TarGz => Ok(Box::new(TarArchive::open(path, TarCompression::Gzip)?)),
    }
}
