use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SerError};
use crate::utils::file_utils::has_ser_extension;

/// How a [`SerFile`] was opened. Fixed for the life of the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    pub fn is_writable(self) -> bool {
        self == AccessMode::ReadWrite
    }
}

/// An open SER file: a seekable stream, its size and its access mode.
///
/// All header and frame accessors live on this type (see `accessor`);
/// they re-read the header on every call and keep no state of their own.
pub struct SerFile<S = File> {
    pub(crate) stream: S,
    size_in_bytes: u64,
    mode: AccessMode,
    path: Option<PathBuf>,
}

impl SerFile<File> {
    /// Open a `.ser` file from disk.
    ///
    /// Only the extension is checked; the header is not validated.
    pub fn open(path: impl AsRef<Path>, mode: AccessMode) -> Result<Self> {
        let path = path.as_ref();
        if !has_ser_extension(path) {
            return Err(SerError::InvalidFilename(path.to_path_buf()));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(mode.is_writable())
            .open(path)
            .map_err(|source| SerError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let mut ser = Self::new(file, mode)?;
        ser.path = Some(path.to_path_buf());
        debug!(path = %path.display(), size = ser.size_in_bytes, ?mode, "opened SER file");
        Ok(ser)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush pending writes and release the file.
    pub fn close(mut self) -> Result<()> {
        if self.mode.is_writable() {
            self.stream.flush()?;
            self.stream.sync_data()?;
        }
        debug!(path = ?self.path, "closed SER file");
        Ok(())
    }
}

impl<S: Seek> SerFile<S> {
    /// Wrap an already open stream, measuring its size by seeking to the end.
    pub fn new(mut stream: S, mode: AccessMode) -> Result<Self> {
        let size_in_bytes = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self::from_stream(stream, size_in_bytes, mode))
    }
}

impl<S> SerFile<S> {
    /// Wrap an already open stream whose size is known to the caller.
    pub fn from_stream(stream: S, size_in_bytes: u64, mode: AccessMode) -> Self {
        Self {
            stream,
            size_in_bytes,
            mode,
            path: None,
        }
    }

    pub fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Seek> SerFile<S> {
    /// Seek to `offset` and fill `dest` completely.
    pub(crate) fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> Result<()> {
        self.stream
            .seek(SeekFrom::Start(offset))
            .map_err(SerError::ReadFault)?;
        self.stream.read_exact(dest).map_err(SerError::from_read)
    }
}

impl<S: Write + Seek> SerFile<S> {
    /// Seek to `offset` and issue a single write, returning the bytes the
    /// stream accepted.
    pub(crate) fn write_at(&mut self, offset: u64, src: &[u8]) -> Result<usize> {
        if !self.mode.is_writable() {
            return Err(SerError::WriteOnReadOnly);
        }
        self.stream
            .seek(SeekFrom::Start(offset))
            .map_err(SerError::WriteFault)?;
        let written = self.stream.write(src).map_err(SerError::WriteFault)?;
        self.stream.flush().map_err(SerError::WriteFault)?;
        self.size_in_bytes = self.size_in_bytes.max(offset + written as u64);
        Ok(written)
    }
}
