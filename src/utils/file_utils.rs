use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::header::Header;

pub const SER_EXTENSION: &str = "ser";

/// Read a binary file using memory mapping for improved performance
/// This is more efficient for large files as it doesn't load the entire file into RAM
pub fn read_binary_file_mmap(path: impl AsRef<Path>) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: The file is not modified while the mmap is active
    unsafe { Mmap::map(&file) }
}

pub fn has_ser_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SER_EXTENSION)
}

/// Write a complete SER file: the encoded header followed by `payload`.
///
/// Fails if `path` already exists. The payload is written as given; it is
/// up to the caller to make it match the header's geometry and frame count.
pub fn write_ser_file(path: impl AsRef<Path>, header: &Header, payload: &[u8]) -> io::Result<()> {
    let file = File::options().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&header.to_bytes())?;
    writer.write_all(payload)?;
    writer.flush()
}
