//! Raw and typed access to the 13 header records

use std::io::{Read, Seek, Write};

use tracing::{trace, warn};

use crate::error::{Result, SerError};
use crate::parser::parse_header;
use crate::ser_file::SerFile;
use crate::types::field::{
    FIELD_COUNT, FieldDescriptor, FieldKind, HEADER_SIZE, field_by_index, field_by_key,
};
use crate::types::header::{Header, decode_text};

/// Number of records in a V3 header.
pub const fn field_count() -> usize {
    FIELD_COUNT
}

/// Outcome of a header write that did not fail outright.
///
/// Anything but `Complete` is a warning: the bytes that were written stay
/// written.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Complete { written: usize },
    /// Input longer than the field; only the first `written` bytes were stored
    Truncated { requested: usize, written: usize },
    /// The stream accepted fewer bytes than it was handed
    Partial { expected: usize, written: usize },
}

impl WriteStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, WriteStatus::Complete { .. })
    }

    pub fn written(&self) -> usize {
        match *self {
            WriteStatus::Complete { written }
            | WriteStatus::Truncated { written, .. }
            | WriteStatus::Partial { written, .. } => written,
        }
    }
}

fn check_capacity(needed: usize, got: usize) -> Result<()> {
    if got < needed {
        return Err(SerError::BufferTooSmall { needed, got });
    }
    Ok(())
}

fn typed_field(index: usize, kind: FieldKind) -> Result<&'static FieldDescriptor> {
    field_by_index(index)
        .filter(|field| field.kind == kind)
        .ok_or(SerError::InvalidIndex(index))
}

impl<S: Read + Seek> SerFile<S> {
    /// Copy the raw bytes of header record `index` into the front of `dest`.
    ///
    /// `dest` must hold at least the field's length.
    pub fn read_by_index(&mut self, dest: &mut [u8], index: usize) -> Result<()> {
        let field = field_by_index(index).ok_or(SerError::InvalidIndex(index))?;
        self.read_field(field, dest)
    }

    /// Same as [`read_by_index`](Self::read_by_index), selecting the field by
    /// its byte offset.
    pub fn read_by_key(&mut self, dest: &mut [u8], key: u64) -> Result<()> {
        let (_, field) = field_by_key(key).ok_or(SerError::InvalidKey(key))?;
        self.read_field(field, dest)
    }

    fn read_field(&mut self, field: &FieldDescriptor, dest: &mut [u8]) -> Result<()> {
        check_capacity(field.len, dest.len())?;
        trace!(field = field.name, offset = field.offset, "reading header field");
        self.read_at(field.offset, &mut dest[..field.len])
    }

    pub fn read_i32_field(&mut self, index: usize) -> Result<i32> {
        let field = typed_field(index, FieldKind::Int32)?;
        let mut buf = [0u8; 4];
        self.read_field(field, &mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn read_i64_field(&mut self, index: usize) -> Result<i64> {
        let field = typed_field(index, FieldKind::Int64)?;
        let mut buf = [0u8; 8];
        self.read_field(field, &mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    pub fn read_text_field(&mut self, index: usize) -> Result<String> {
        let field = typed_field(index, FieldKind::Text)?;
        let mut buf = vec![0u8; field.len];
        self.read_field(field, &mut buf)?;
        Ok(decode_text(&buf))
    }

    /// Read and decode the whole header in one pass.
    pub fn read_header(&mut self) -> Result<Header> {
        let mut buf = [0u8; HEADER_SIZE as usize];
        self.read_at(0, &mut buf)?;
        parse_header(&mut &buf[..]).map_err(|e| SerError::MalformedHeader(e.to_string()))
    }
}

impl<S: Write + Seek> SerFile<S> {
    /// Overwrite header record `index` with `src`.
    ///
    /// At most the field's length is written; longer input is truncated and
    /// reported as [`WriteStatus::Truncated`], not rejected.
    pub fn write_by_index(&mut self, src: &[u8], index: usize) -> Result<WriteStatus> {
        let field = field_by_index(index).ok_or(SerError::InvalidIndex(index))?;
        self.write_field(field, src)
    }

    pub fn write_by_key(&mut self, src: &[u8], key: u64) -> Result<WriteStatus> {
        let (_, field) = field_by_key(key).ok_or(SerError::InvalidKey(key))?;
        self.write_field(field, src)
    }

    fn write_field(&mut self, field: &FieldDescriptor, src: &[u8]) -> Result<WriteStatus> {
        if !self.mode().is_writable() {
            return Err(SerError::WriteOnReadOnly);
        }

        let expected = src.len().min(field.len);
        trace!(field = field.name, offset = field.offset, len = expected, "writing header field");
        let written = self.write_at(field.offset, &src[..expected])?;

        let status = if written < expected {
            WriteStatus::Partial { expected, written }
        } else if src.len() > field.len {
            WriteStatus::Truncated {
                requested: src.len(),
                written,
            }
        } else {
            WriteStatus::Complete { written }
        };

        if !status.is_complete() {
            warn!(field = field.name, ?status, "header field not fully written");
        }
        Ok(status)
    }

    pub fn write_i32_field(&mut self, index: usize, value: i32) -> Result<WriteStatus> {
        let field = typed_field(index, FieldKind::Int32)?;
        self.write_field(field, &value.to_le_bytes())
    }

    pub fn write_i64_field(&mut self, index: usize, value: i64) -> Result<WriteStatus> {
        let field = typed_field(index, FieldKind::Int64)?;
        self.write_field(field, &value.to_le_bytes())
    }

    /// Store `text` zero padded to the field length.
    pub fn write_text_field(&mut self, index: usize, text: &str) -> Result<WriteStatus> {
        let field = typed_field(index, FieldKind::Text)?;
        let mut buf = text.as_bytes().to_vec();
        if buf.len() < field.len {
            buf.resize(field.len, 0);
        }
        self.write_field(field, &buf)
    }
}
