//! Byte copying with a reusable buffer.
//!
//! Staging and the per-entry copy loop move every byte through the same
//! `CopyBuffer`, so a process run allocates one buffer no matter how many
//! entries it touches.

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;

use crate::ExtractionError;
use crate::QuotaResource;
use crate::Result;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Heap buffer reused across copy operations.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies data from reader to writer using the provided buffer.
///
/// Interrupted reads are retried. The running total uses checked arithmetic.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if the total overflows
/// `u64`.
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractionError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or(ExtractionError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow,
            })?;
    }

    Ok(total)
}

/// Copies `source` to `target` byte for byte, truncating any existing target.
///
/// # Errors
///
/// Returns an error if the source cannot be opened, the target cannot be
/// created, or the copy fails.
pub fn copy_file_with_buffer(source: &Path, target: &Path, buffer: &mut CopyBuffer) -> Result<u64> {
    let mut input = File::open(source)?;
    let output = File::create(target)?;
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, output);
    let written = copy_with_buffer(&mut input, &mut writer, buffer)?;
    writer.flush()?;
    Ok(written)
}
