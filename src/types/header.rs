use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::SerError;
use crate::types::color::ColorId;
use crate::types::field::{HEADER_FIELDS, HEADER_SIZE, index};
use crate::types::geometry::FrameGeometry;

/// Decoded V3 header. Text fields hold the bytes up to the first NUL.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct Header {
    #[builder(into, default = String::from("LUCAM-RECORDER"))]
    pub file_id: String,
    #[builder(default)]
    pub lu_id: i32,
    pub color_id: i32,
    /// 1 for little-endian pixel data, 0 for big-endian
    #[builder(default = 1)]
    pub little_endian: i32,
    pub image_width: i32,
    pub image_height: i32,
    pub pixel_depth_per_plane: i32,
    pub frame_count: i32,
    #[builder(into, default)]
    pub observer: String,
    #[builder(into, default)]
    pub instrument: String,
    #[builder(into, default)]
    pub telescope: String,
    #[builder(default)]
    pub date_time: i64,
    #[builder(default)]
    pub date_time_utc: i64,
}

impl Header {
    pub fn color(&self) -> ColorId {
        ColorId::from(self.color_id)
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian == 1
    }

    pub fn geometry(&self) -> Result<FrameGeometry, SerError> {
        FrameGeometry::from_fields(
            self.color_id,
            self.image_width,
            self.image_height,
            self.pixel_depth_per_plane,
        )
    }

    /// Encodes the header into its on-disk layout. Text longer than its
    /// field is cut to the field length.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut out = [0u8; HEADER_SIZE as usize];

        let mut put = |idx: usize, bytes: &[u8]| {
            let field = &HEADER_FIELDS[idx];
            let start = field.offset as usize;
            let n = bytes.len().min(field.len);
            out[start..start + n].copy_from_slice(&bytes[..n]);
        };

        put(index::FILE_ID, self.file_id.as_bytes());
        put(index::LU_ID, &self.lu_id.to_le_bytes());
        put(index::COLOR_ID, &self.color_id.to_le_bytes());
        put(index::LITTLE_ENDIAN, &self.little_endian.to_le_bytes());
        put(index::IMAGE_WIDTH, &self.image_width.to_le_bytes());
        put(index::IMAGE_HEIGHT, &self.image_height.to_le_bytes());
        put(index::PIXEL_DEPTH_PER_PLANE, &self.pixel_depth_per_plane.to_le_bytes());
        put(index::FRAME_COUNT, &self.frame_count.to_le_bytes());
        put(index::OBSERVER, self.observer.as_bytes());
        put(index::INSTRUMENT, self.instrument.as_bytes());
        put(index::TELESCOPE, self.telescope.as_bytes());
        put(index::DATE_TIME, &self.date_time.to_le_bytes());
        put(index::DATE_TIME_UTC, &self.date_time_utc.to_le_bytes());

        out
    }
}

/// Text up to the first NUL, lossily decoded.
pub fn decode_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
