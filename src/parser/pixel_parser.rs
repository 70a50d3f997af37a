use ndarray::Array3;
use winnow::{
    Parser,
    binary::{Endianness, le_u8, u16 as sample_u16},
    combinator::repeat,
    error::ContextError,
};

use crate::error::SerError;
use crate::types::geometry::FrameGeometry;

/// Decodes one frame's raw bytes into a `(height, width, planes)` array.
///
/// Depths up to 8 bits are one byte per sample and are widened to `u16`;
/// deeper samples are two bytes in the byte order given by the header's
/// little-endian flag.
pub fn parse_frame(
    input: &[u8],
    geometry: &FrameGeometry,
    little_endian: bool,
) -> Result<Array3<u16>, SerError> {
    let height = geometry.height as usize;
    let width = geometry.width as usize;
    let planes = geometry.plane_count as usize;
    let sample_count = height * width * planes;

    let mut input = input;
    let samples: Vec<u16> = if geometry.sample_size() == 1 {
        repeat(sample_count, le_u8.map(u16::from))
            .parse_next(&mut input)
            .map_err(|_: ContextError| SerError::EndOfFile)?
    } else {
        let endian = if little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        };
        repeat(sample_count, sample_u16(endian))
            .parse_next(&mut input)
            .map_err(|_: ContextError| SerError::EndOfFile)?
    };

    Array3::from_shape_vec((height, width, planes), samples)
        .map_err(|e| SerError::MalformedHeader(format!("frame shape mismatch: {e}")))
}
