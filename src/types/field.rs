//! The fixed V3 header layout: 13 fields, 178 bytes

/// Size of the V3 header; frame data starts right after it.
pub const HEADER_SIZE: u64 = 178;

/// Number of records in a V3 header.
pub const FIELD_COUNT: usize = 13;

/// How a field's bytes are meant to be interpreted.
///
/// The raw accessors never look at this; it drives the typed helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// ASCII, zero padded
    Text,
    /// Little-endian `i32`
    Int32,
    /// Little-endian `i64`
    Int64,
}

/// One header record: where it lives and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: u64,
    pub len: usize,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn new(name: &'static str, offset: u64, len: usize, kind: FieldKind) -> Self {
        Self { name, offset, len, kind }
    }

    /// One past the last byte of the field
    pub const fn end(&self) -> u64 {
        self.offset + self.len as u64
    }
}

/// Ordinal indices into [`HEADER_FIELDS`].
pub mod index {
    pub const FILE_ID: usize = 0;
    pub const LU_ID: usize = 1;
    pub const COLOR_ID: usize = 2;
    pub const LITTLE_ENDIAN: usize = 3;
    pub const IMAGE_WIDTH: usize = 4;
    pub const IMAGE_HEIGHT: usize = 5;
    pub const PIXEL_DEPTH_PER_PLANE: usize = 6;
    pub const FRAME_COUNT: usize = 7;
    pub const OBSERVER: usize = 8;
    pub const INSTRUMENT: usize = 9;
    pub const TELESCOPE: usize = 10;
    pub const DATE_TIME: usize = 11;
    pub const DATE_TIME_UTC: usize = 12;
}

/// Byte-offset keys of each field.
pub mod key {
    pub const FILE_ID: u64 = 0;
    pub const LU_ID: u64 = 14;
    pub const COLOR_ID: u64 = 18;
    pub const LITTLE_ENDIAN: u64 = 22;
    pub const IMAGE_WIDTH: u64 = 26;
    pub const IMAGE_HEIGHT: u64 = 30;
    pub const PIXEL_DEPTH_PER_PLANE: u64 = 34;
    pub const FRAME_COUNT: u64 = 38;
    pub const OBSERVER: u64 = 42;
    pub const INSTRUMENT: u64 = 82;
    pub const TELESCOPE: u64 = 122;
    pub const DATE_TIME: u64 = 162;
    pub const DATE_TIME_UTC: u64 = 170;
}

pub const HEADER_FIELDS: [FieldDescriptor; FIELD_COUNT] = [
    FieldDescriptor::new("file_id", key::FILE_ID, 14, FieldKind::Text),
    FieldDescriptor::new("lu_id", key::LU_ID, 4, FieldKind::Int32),
    FieldDescriptor::new("color_id", key::COLOR_ID, 4, FieldKind::Int32),
    FieldDescriptor::new("little_endian", key::LITTLE_ENDIAN, 4, FieldKind::Int32),
    FieldDescriptor::new("image_width", key::IMAGE_WIDTH, 4, FieldKind::Int32),
    FieldDescriptor::new("image_height", key::IMAGE_HEIGHT, 4, FieldKind::Int32),
    FieldDescriptor::new("pixel_depth_per_plane", key::PIXEL_DEPTH_PER_PLANE, 4, FieldKind::Int32),
    FieldDescriptor::new("frame_count", key::FRAME_COUNT, 4, FieldKind::Int32),
    FieldDescriptor::new("observer", key::OBSERVER, 40, FieldKind::Text),
    FieldDescriptor::new("instrument", key::INSTRUMENT, 40, FieldKind::Text),
    FieldDescriptor::new("telescope", key::TELESCOPE, 40, FieldKind::Text),
    FieldDescriptor::new("date_time", key::DATE_TIME, 8, FieldKind::Int64),
    FieldDescriptor::new("date_time_utc", key::DATE_TIME_UTC, 8, FieldKind::Int64),
];

pub fn field_by_index(index: usize) -> Option<&'static FieldDescriptor> {
    HEADER_FIELDS.get(index)
}

/// Looks up a field by its byte offset, returning its ordinal as well.
pub fn field_by_key(key: u64) -> Option<(usize, &'static FieldDescriptor)> {
    HEADER_FIELDS
        .iter()
        .enumerate()
        .find(|(_, field)| field.offset == key)
}

pub fn field_by_name(name: &str) -> Option<(usize, &'static FieldDescriptor)> {
    HEADER_FIELDS
        .iter()
        .enumerate()
        .find(|(_, field)| field.name.eq_ignore_ascii_case(name))
}
