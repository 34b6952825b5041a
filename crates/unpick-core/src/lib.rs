//! Selective archive extraction.
//!
//! `unpick-core` opens an archive (zip, tar, tar.gz), lists its entries, and
//! lets the caller select a subset of files, optionally under new names. A
//! process run stages the whole archive into a temporary directory below the
//! destination root, copies each selected file to
//! `<destination>/<subdirs>/<output name>`, reports the outcome of every
//! entry, removes the staging directory, and signals completion once, last.
//!
//! # Examples
//!
//! ```no_run
//! use unpick_core::{ExtractConfig, NoopObserver, list_files, open_archive, process};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut selection = list_files(&open_archive("a.zip")?);
//! selection.set_will_copy(0, true);
//! selection.set_output_name(0, "README.txt");
//!
//! let report = process(
//!     &mut selection,
//!     "a.zip",
//!     "/out",
//!     &ExtractConfig::default(),
//!     &mut NoopObserver,
//! )?;
//! println!("Copied {} files", report.files_copied);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
pub mod resolve;
pub mod selection;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::choose_destination;
pub use api::list_files;
pub use api::open_archive;
pub use api::process;
pub use archive::Archive;
pub use config::ExtractConfig;
pub use error::ExtractionError;
pub use error::QuotaResource;
pub use error::Result;
pub use extraction::ChannelObserver;
pub use extraction::ExtractionSession;
pub use extraction::ProcessEvent;
pub use extraction::ProcessHandle;
pub use extraction::SessionBuilder;
pub use extraction::spawn_process;
pub use report::EntryFailure;
pub use report::NoopObserver;
pub use report::ProcessObserver;
pub use report::ProcessReport;
pub use report::StagingReport;
pub use resolve::ResolvedOutput;
pub use resolve::resolve_output;
pub use resolve::resolve_output_directory;
pub use resolve::validate_output_name;
pub use selection::SelectableFile;
pub use selection::SelectionModel;

// Re-export types module for easier access
pub use types::ArchiveEntry;
pub use types::DestDir;
pub use types::SafePath;
