//! Error types for SER file access

use std::io;
use std::path::PathBuf;

/// Errors raised by the header and frame accessors and the file lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum SerError {
    /// Header ordinal outside `0..13`
    #[error("Invalid header index: {0}")]
    InvalidIndex(usize),

    /// Byte offset that does not start any header field
    #[error("Invalid header key: {0}")]
    InvalidKey(u64),

    /// Raw dimension selector other than layer (0), width (1) or height (2)
    #[error("Invalid frame dimension: {0}")]
    InvalidDimension(i32),

    /// Frame index at or past the declared frame count
    #[error("Frame index {index} out of range (frame count {frame_count})")]
    InvalidFrameIndex { index: usize, frame_count: i32 },

    /// Caller buffer cannot hold the requested record
    #[error("Buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// Stream ended before the full record was read
    #[error("Unexpected end of file")]
    EndOfFile,

    #[error("Read fault: {0}")]
    ReadFault(#[source] io::Error),

    #[error("Write fault: {0}")]
    WriteFault(#[source] io::Error),

    /// Mutating call on a handle opened read-only
    #[error("Cannot write to a file opened read-only")]
    WriteOnReadOnly,

    /// Header field holds a value the geometry cannot be derived from
    #[error("Header field {field} holds invalid value {value}")]
    InvalidFieldValue { field: &'static str, value: i64 },

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// File name without a `.ser` extension
    #[error("Invalid SER file name: {}", .0.display())]
    InvalidFilename(PathBuf),

    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SerError {
    /// Classifies a failed read: a short stream is `EndOfFile`, anything else a fault.
    pub(crate) fn from_read(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => SerError::EndOfFile,
            _ => SerError::ReadFault(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, SerError>;
