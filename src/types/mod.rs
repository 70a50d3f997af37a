//! Type definitions for the SER file format

pub mod color;
pub mod field;
pub mod geometry;
pub mod header;

// Re-export the main types for convenience
pub use color::ColorId;
pub use field::{FIELD_COUNT, FieldDescriptor, FieldKind, HEADER_FIELDS, HEADER_SIZE};
pub use geometry::{Dimension, FrameGeometry};
pub use header::Header;
