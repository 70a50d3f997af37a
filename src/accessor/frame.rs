//! Frame geometry and indexed frame reads

use std::io::{self, Read, Seek};

use ndarray::Array3;
use tracing::debug;

use crate::error::{Result, SerError};
use crate::parser::parse_frame;
use crate::ser_file::SerFile;
use crate::types::color::ColorId;
use crate::types::field::{HEADER_SIZE, index};
use crate::types::geometry::{Dimension, FrameGeometry};

impl<S: Read + Seek> SerFile<S> {
    /// Number of frames declared in the header.
    pub fn frame_count(&mut self) -> Result<i32> {
        self.read_i32_field(index::FRAME_COUNT)
    }

    /// Size of one frame axis. `Layer` is the plane count derived from the
    /// color id (1 below 100, 3 otherwise), not the raw color id.
    pub fn dimension_size(&mut self, dim: Dimension) -> Result<i32> {
        match dim {
            Dimension::Layer => {
                let color_id = self.read_i32_field(index::COLOR_ID)?;
                Ok(ColorId::plane_count_for(color_id) as i32)
            }
            Dimension::Width => self.read_i32_field(index::IMAGE_WIDTH),
            Dimension::Height => self.read_i32_field(index::IMAGE_HEIGHT),
        }
    }

    pub fn bytes_per_pixel(&mut self) -> Result<u32> {
        let planes = self.dimension_size(Dimension::Layer)? as u32;
        let depth = self.read_i32_field(index::PIXEL_DEPTH_PER_PLANE)?;
        Ok(planes * FrameGeometry::bytes_per_sample(depth))
    }

    /// Bytes per frame: bytes per pixel × width × height.
    pub fn frame_byte_size(&mut self) -> Result<u64> {
        Ok(self.geometry()?.frame_byte_size)
    }

    /// Full frame layout, read fresh from the header.
    pub fn geometry(&mut self) -> Result<FrameGeometry> {
        let color_id = self.read_i32_field(index::COLOR_ID)?;
        let width = self.read_i32_field(index::IMAGE_WIDTH)?;
        let height = self.read_i32_field(index::IMAGE_HEIGHT)?;
        let depth = self.read_i32_field(index::PIXEL_DEPTH_PER_PLANE)?;
        FrameGeometry::from_fields(color_id, width, height, depth)
    }

    /// Validate `idx` against the frame count and return the frame's
    /// absolute offset and byte length.
    fn locate_frame(&mut self, idx: usize) -> Result<(u64, usize)> {
        let frame_count = self.frame_count()?;
        if frame_count < 0 || idx >= frame_count as usize {
            return Err(SerError::InvalidFrameIndex { index: idx, frame_count });
        }

        let geometry = self.geometry()?;
        let frame_size = usize::try_from(geometry.frame_byte_size).map_err(|_| {
            SerError::InvalidFieldValue {
                field: "image_height",
                value: geometry.height as i64,
            }
        })?;
        let offset = geometry
            .frame_offset(HEADER_SIZE, idx)
            .ok_or(SerError::InvalidFrameIndex { index: idx, frame_count })?;
        Ok((offset, frame_size))
    }

    /// Copy frame `idx` into the front of `dest`, which must hold a full frame.
    pub fn read_frame(&mut self, dest: &mut [u8], idx: usize) -> Result<()> {
        let (offset, frame_size) = self.locate_frame(idx)?;
        if dest.len() < frame_size {
            return Err(SerError::BufferTooSmall {
                needed: frame_size,
                got: dest.len(),
            });
        }

        debug!(frame = idx, offset, len = frame_size, "reading frame");
        self.read_at(offset, &mut dest[..frame_size])
    }

    /// Read frame `idx` into a freshly allocated buffer.
    ///
    /// The index is checked before anything is allocated, and a frame too
    /// large to allocate is an error rather than an abort.
    pub fn read_frame_vec(&mut self, idx: usize) -> Result<Vec<u8>> {
        let (offset, frame_size) = self.locate_frame(idx)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(frame_size).map_err(|e| {
            SerError::Io(io::Error::new(io::ErrorKind::OutOfMemory, e))
        })?;
        buf.resize(frame_size, 0);

        debug!(frame = idx, offset, len = frame_size, "reading frame");
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Read frame `idx` and decode it into `(height, width, planes)` samples.
    pub fn read_frame_array(&mut self, idx: usize) -> Result<Array3<u16>> {
        let raw = self.read_frame_vec(idx)?;
        let geometry = self.geometry()?;
        let little_endian = self.read_i32_field(index::LITTLE_ENDIAN)? == 1;
        parse_frame(&raw, &geometry, little_endian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser_file::AccessMode;
    use crate::test_utils::{
        FaultyReader, color8_fixture, color16_fixture, file_bytes, mono8_fixture,
        mono16_fixture, write_temp_ser,
    };
    use crate::types::header::Header;
    use std::io::Cursor;

    fn open(header: &Header, payload: &[u8]) -> SerFile<Cursor<Vec<u8>>> {
        SerFile::new(Cursor::new(file_bytes(header, payload)), AccessMode::ReadOnly).unwrap()
    }

    fn check_fixture(header: &Header, payload: &[u8], expected_frame_size: u64) {
        let mut ser = open(header, payload);

        assert_eq!(ser.frame_count().unwrap(), header.frame_count);
        assert_eq!(ser.dimension_size(Dimension::Width).unwrap(), header.image_width);
        assert_eq!(ser.dimension_size(Dimension::Height).unwrap(), header.image_height);

        let planes = ser.dimension_size(Dimension::Layer).unwrap();
        assert_eq!(planes, if header.color_id < 100 { 1 } else { 3 });

        let bpp = ser.bytes_per_pixel().unwrap();
        if header.pixel_depth_per_plane <= 8 {
            assert_eq!(bpp, planes as u32);
        } else {
            assert_eq!(bpp, 2 * planes as u32);
        }

        let frame_size = ser.frame_byte_size().unwrap();
        assert_eq!(frame_size, expected_frame_size);
        assert_eq!(frame_size as usize * header.frame_count as usize, payload.len());

        let mut buf = vec![0u8; frame_size as usize];
        for i in 0..header.frame_count as usize {
            ser.read_frame(&mut buf, i).unwrap();
            let start = i * frame_size as usize;
            assert_eq!(&buf[..], &payload[start..start + frame_size as usize]);
        }
    }

    #[test]
    fn test_8_bit_mono() {
        let (header, payload) = mono8_fixture();
        check_fixture(&header, &payload, 9);
    }

    #[test]
    fn test_8_bit_color() {
        let (header, payload) = color8_fixture();
        check_fixture(&header, &payload, 27);
    }

    #[test]
    fn test_16_bit_mono() {
        let (header, payload) = mono16_fixture(true);
        check_fixture(&header, &payload, 18);
    }

    #[test]
    fn test_16_bit_color() {
        let (header, payload) = color16_fixture();
        check_fixture(&header, &payload, 54);
    }

    #[test]
    fn test_layer_count_boundary() {
        let (mut header, payload) = mono8_fixture();
        for (color_id, planes) in [(0, 1), (8, 1), (19, 1), (99, 1), (100, 3), (101, 3)] {
            header.color_id = color_id;
            let mut ser = open(&header, &payload);
            assert_eq!(
                ser.dimension_size(Dimension::Layer).unwrap(),
                planes,
                "color id {color_id}"
            );
        }
    }

    #[test]
    fn test_raw_dimension_selector() {
        let (header, payload) = mono8_fixture();
        let mut ser = open(&header, &payload);
        assert_eq!(ser.dimension_size(Dimension::try_from(1).unwrap()).unwrap(), 3);
        assert!(matches!(
            Dimension::try_from(3).and_then(|dim| ser.dimension_size(dim)),
            Err(SerError::InvalidDimension(3))
        ));
    }

    #[test]
    fn test_invalid_frame_index() {
        let (header, payload) = mono8_fixture();
        let mut ser = open(&header, &payload);
        let mut buf = [0xAAu8; 9];

        assert!(matches!(
            ser.read_frame(&mut buf, 3),
            Err(SerError::InvalidFrameIndex { index: 3, frame_count: 3 })
        ));
        assert!(matches!(
            ser.read_frame(&mut buf, 100),
            Err(SerError::InvalidFrameIndex { .. })
        ));
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_frame_buffer_too_small() {
        let (header, payload) = color8_fixture();
        let mut ser = open(&header, &payload);
        let mut buf = [0u8; 26];
        assert!(matches!(
            ser.read_frame(&mut buf, 0),
            Err(SerError::BufferTooSmall { needed: 27, got: 26 })
        ));
    }

    #[test]
    fn test_truncated_payload_is_end_of_file() {
        let (header, payload) = mono8_fixture();
        let mut ser = open(&header, &payload[..20]);
        let mut buf = [0u8; 9];
        ser.read_frame(&mut buf, 1).unwrap();
        assert!(matches!(
            ser.read_frame(&mut buf, 2),
            Err(SerError::EndOfFile)
        ));
    }

    #[test]
    fn test_negative_geometry() {
        let (mut header, payload) = mono8_fixture();
        header.image_height = -1;
        let mut ser = open(&header, &payload);
        assert_eq!(ser.dimension_size(Dimension::Height).unwrap(), -1);
        assert!(matches!(
            ser.frame_byte_size(),
            Err(SerError::InvalidFieldValue { field: "image_height", value: -1 })
        ));
    }

    #[test]
    fn test_geometry_follows_header_writes() {
        let (header, payload) = mono8_fixture();
        let mut ser = SerFile::new(
            Cursor::new(file_bytes(&header, &payload)),
            AccessMode::ReadWrite,
        )
        .unwrap();
        assert_eq!(ser.frame_byte_size().unwrap(), 9);

        let _ = ser.write_i32_field(index::COLOR_ID, 101).unwrap();
        let _ = ser.write_i32_field(index::PIXEL_DEPTH_PER_PLANE, 12).unwrap();
        assert_eq!(ser.bytes_per_pixel().unwrap(), 6);
        assert_eq!(ser.frame_byte_size().unwrap(), 54);
    }

    #[test]
    fn test_out_of_range_index_checked_before_allocation() {
        // RGB 16-bit at this size needs far more memory than any host has
        let header = Header::builder()
            .color_id(100)
            .pixel_depth_per_plane(16)
            .image_width(i32::MAX)
            .image_height(1 << 20)
            .frame_count(0)
            .build();
        let mut ser = open(&header, &[]);
        assert!(matches!(
            ser.read_frame_vec(0),
            Err(SerError::InvalidFrameIndex { index: 0, frame_count: 0 })
        ));
        assert!(matches!(
            ser.read_frame_array(0),
            Err(SerError::InvalidFrameIndex { index: 0, frame_count: 0 })
        ));
    }

    #[test]
    fn test_short_header_is_end_of_file() {
        let (header, _) = mono8_fixture();
        let bytes = header.to_bytes()[..20].to_vec();
        let mut ser = SerFile::new(Cursor::new(bytes), AccessMode::ReadOnly).unwrap();
        let mut buf = [0u8; 9];

        assert!(matches!(ser.frame_count(), Err(SerError::EndOfFile)));
        assert!(matches!(
            ser.dimension_size(Dimension::Width),
            Err(SerError::EndOfFile)
        ));
        assert!(matches!(ser.frame_byte_size(), Err(SerError::EndOfFile)));
        assert!(matches!(ser.read_frame(&mut buf, 0), Err(SerError::EndOfFile)));
    }

    #[test]
    fn test_header_read_fault_propagates() {
        let mut ser = SerFile::from_stream(FaultyReader, 1024, AccessMode::ReadOnly);
        let mut buf = [0u8; 9];

        assert!(matches!(ser.frame_count(), Err(SerError::ReadFault(_))));
        assert!(matches!(
            ser.dimension_size(Dimension::Layer),
            Err(SerError::ReadFault(_))
        ));
        assert!(matches!(ser.frame_byte_size(), Err(SerError::ReadFault(_))));
        assert!(matches!(
            ser.read_frame(&mut buf, 0),
            Err(SerError::ReadFault(_))
        ));
    }

    #[test]
    fn test_read_frame_array() {
        let (header, payload) = mono16_fixture(false);
        let mut ser = open(&header, &payload);
        let frame = ser.read_frame_array(1).unwrap();
        assert_eq!(frame.shape(), &[3, 3, 1]);
        // Frame 1 holds samples 9..18, each i * 2000
        assert_eq!(frame[[0, 0, 0]], 18_000);
        assert_eq!(frame[[2, 2, 0]], 34_000);

        let (header, payload) = color8_fixture();
        let mut ser = open(&header, &payload);
        let frame = ser.read_frame_array(0).unwrap();
        assert_eq!(frame.shape(), &[3, 3, 3]);
        assert_eq!(frame[[0, 1, 2]], 15);
    }

    #[test]
    fn test_three_frame_scenario_on_disk() {
        let (header, payload) = mono8_fixture();
        let (_dir, path) = write_temp_ser(&header, &payload);

        let mut ser = SerFile::open(&path, AccessMode::ReadOnly).unwrap();
        for i in 0..3 {
            let frame = ser.read_frame_vec(i).unwrap();
            assert_eq!(frame, payload[9 * i..9 * (i + 1)]);
        }
        ser.close().unwrap();
    }
}
