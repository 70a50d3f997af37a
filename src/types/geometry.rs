use bon::Builder;
use serde::Serialize;

use crate::error::SerError;
use crate::types::color::ColorId;

/// Frame axis selector for `dimension_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Color planes per pixel (derived from the color id)
    Layer,
    Width,
    Height,
}

impl TryFrom<i32> for Dimension {
    type Error = SerError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Dimension::Layer),
            1 => Ok(Dimension::Width),
            2 => Ok(Dimension::Height),
            other => Err(SerError::InvalidDimension(other)),
        }
    }
}

/// Per-frame layout derived from the header. Never cached by the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Builder)]
pub struct FrameGeometry {
    pub plane_count: u32,
    pub width: u32,
    pub height: u32,
    pub bytes_per_pixel: u32,
    pub frame_byte_size: u64,
}

impl FrameGeometry {
    /// Derives the layout from raw header values.
    pub fn from_fields(
        color_id: i32,
        width: i32,
        height: i32,
        pixel_depth: i32,
    ) -> Result<Self, SerError> {
        let width = non_negative("image_width", width)?;
        let height = non_negative("image_height", height)?;
        let plane_count = ColorId::plane_count_for(color_id);
        let bytes_per_pixel = plane_count * Self::bytes_per_sample(pixel_depth);
        let frame_byte_size = (bytes_per_pixel as u64)
            .checked_mul(width as u64)
            .and_then(|row| row.checked_mul(height as u64))
            .ok_or(SerError::InvalidFieldValue {
                field: "image_height",
                value: height as i64,
            })?;

        Ok(Self {
            plane_count,
            width,
            height,
            bytes_per_pixel,
            frame_byte_size,
        })
    }

    /// Bytes per single-plane sample: 1 up to 8 bits of depth, 2 beyond.
    pub fn bytes_per_sample(pixel_depth: i32) -> u32 {
        if pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Bytes per single-plane sample of this layout
    pub fn sample_size(&self) -> u32 {
        self.bytes_per_pixel / self.plane_count
    }

    /// Absolute offset of frame `index` given the header size.
    pub fn frame_offset(&self, header_size: u64, index: usize) -> Option<u64> {
        (index as u64)
            .checked_mul(self.frame_byte_size)
            .and_then(|off| off.checked_add(header_size))
    }
}

pub(crate) fn non_negative(field: &'static str, value: i32) -> Result<u32, SerError> {
    u32::try_from(value).map_err(|_| SerError::InvalidFieldValue {
        field,
        value: value as i64,
    })
}
