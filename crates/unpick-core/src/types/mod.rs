//! Core value types for selective extraction.
//!
//! The path types enforce validation at the type level. They are validated
//! upon construction and cannot be created from raw types without going
//! through validation.
//!
//! # Design Principles
//!
//! - Type-driven safety: unvalidated paths cannot reach the filesystem
//! - No `From<RawType>` implementations for path types
//! - All constructors perform validation

pub mod dest_dir;
pub mod entry;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry::ArchiveEntry;
pub use safe_path::SafePath;
