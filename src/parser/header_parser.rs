use winnow::{
    Parser,
    binary::{le_i32, le_i64},
    error::ContextError,
    token::take,
};

use crate::types::header::{Header, decode_text};

/// Parses the fixed 178-byte V3 header.
///
/// The layout is as follows:
/// - 14 bytes: file id (ASCII)
/// - 7 little‑endian i32 values: lu id, color id, little-endian flag,
///   width, height, pixel depth per plane, frame count
/// - 3 × 40 bytes: observer, instrument, telescope (ASCII, zero padded)
/// - 2 little‑endian i64 values: local and UTC timestamps
pub fn parse_header(input: &mut &[u8]) -> Result<Header, ContextError> {
    let file_id = take(14usize).parse_next(input)?;
    let lu_id = le_i32.parse_next(input)?;
    let color_id = le_i32.parse_next(input)?;
    let little_endian = le_i32.parse_next(input)?;
    let image_width = le_i32.parse_next(input)?;
    let image_height = le_i32.parse_next(input)?;
    let pixel_depth_per_plane = le_i32.parse_next(input)?;
    let frame_count = le_i32.parse_next(input)?;
    let observer = take(40usize).parse_next(input)?;
    let instrument = take(40usize).parse_next(input)?;
    let telescope = take(40usize).parse_next(input)?;
    let date_time = le_i64.parse_next(input)?;
    let date_time_utc = le_i64.parse_next(input)?;

    let header = Header::builder()
        .file_id(decode_text(file_id))
        .lu_id(lu_id)
        .color_id(color_id)
        .little_endian(little_endian)
        .image_width(image_width)
        .image_height(image_height)
        .pixel_depth_per_plane(pixel_depth_per_plane)
        .frame_count(frame_count)
        .observer(decode_text(observer))
        .instrument(decode_text(instrument))
        .telescope(decode_text(telescope))
        .date_time(date_time)
        .date_time_utc(date_time_utc)
        .build();
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HEADER_SIZE;

    #[test]
    fn test_parse_encoded_header() {
        let header = Header::builder()
            .file_id("TEMP_FILE_16C")
            .color_id(100)
            .image_width(3)
            .image_height(3)
            .pixel_depth_per_plane(16)
            .frame_count(3)
            .observer("OBSERVER")
            .instrument("INSTRUMENT")
            .telescope("TELESCOPE")
            .date_time(-1_700_000_000)
            .date_time_utc(1_700_000_000)
            .build();
        let bytes = header.to_bytes();

        let mut input = &bytes[..];
        let parsed = parse_header(&mut input).unwrap();
        assert_eq!(parsed, header);
        assert!(input.is_empty());
    }

    #[test]
    fn test_short_input_fails() {
        let bytes = [0u8; HEADER_SIZE as usize - 1];
        let mut input = &bytes[..];
        assert!(parse_header(&mut input).is_err());
    }
}
