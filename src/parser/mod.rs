//! SER file parsing functionality

mod header_parser;
pub mod pixel_parser;

// Re-export the parsing functions
pub use header_parser::parse_header;
pub use pixel_parser::parse_frame;
