//! Buffer Sizes for Sample Ingestion
//!
//! Fixed sizes for the line-oriented sample reader. Both buffers live inline
//! in the reader, so reading allocates only for the samples themselves.

/// Bytes pulled from the underlying reader per refill.
///
/// Matches the common 4 KiB page / pipe buffer size.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Longest accepted input line, in bytes.
///
/// Three signed 32-bit integers with separators need under 40 bytes; the
/// headroom covers trailing columns such as timestamps or other sensors,
/// which are ignored.
pub const LINE_BUFFER_SIZE: usize = 256;
