//! Read/write access to SER image sequence files.
//!
//! A SER file is a fixed 178-byte header followed by equally sized raw
//! frames. [`SerFile`] wraps an open stream; the header and frame
//! accessors on it translate field selectors into byte ranges and frame
//! indices into offsets, re-reading the header on every call.

pub mod accessor;
pub mod error;
pub mod parser;
pub mod processing;
#[cfg(feature = "python")]
pub mod python;
pub mod ser_file;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use accessor::{WriteStatus, field_count};
pub use error::{Result, SerError};
pub use processing::{FrameStats, frame_statistics};
pub use ser_file::{AccessMode, SerFile};
pub use types::{
    ColorId, Dimension, FieldDescriptor, FieldKind, FrameGeometry, HEADER_FIELDS, HEADER_SIZE,
    Header,
};
pub use types::field::{index, key};
pub use utils::file_utils::write_ser_file;

/// Library version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Library version as `major + minor / 100 + patch / 10000`, so 1.1.0 is 1.01.
pub fn version_number() -> f32 {
    let part = |s: &str| s.parse::<u32>().unwrap_or(0) as f32;
    part(env!("CARGO_PKG_VERSION_MAJOR"))
        + 0.01 * part(env!("CARGO_PKG_VERSION_MINOR"))
        + 0.0001 * part(env!("CARGO_PKG_VERSION_PATCH"))
}
