//! Fixture builders shared by the unit tests

use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;

use tempfile::TempDir;

use crate::types::header::Header;
use crate::utils::file_utils::write_ser_file;

fn fixture_header(file_id: &str, color_id: i32, depth: i32) -> Header {
    Header::builder()
        .file_id(file_id)
        .color_id(color_id)
        .image_width(3)
        .image_height(3)
        .pixel_depth_per_plane(depth)
        .frame_count(3)
        .observer("OBSERVER")
        .instrument("INSTRUMENT")
        .telescope("TELESCOPE")
        .date_time(-1_700_000_000)
        .date_time_utc(1_700_000_000)
        .build()
}

/// 3×3, 8-bit, Bayer RGGB, 3 frames of 9 bytes each.
pub fn mono8_fixture() -> (Header, Vec<u8>) {
    let payload = vec![
        255, 0, 255, //
        0, 255, 0, //
        255, 0, 255, //
        //
        0, 255, 0, //
        0, 255, 0, //
        0, 255, 0, //
        //
        255, 255, 255, //
        0, 0, 0, //
        255, 255, 255,
    ];
    (fixture_header("TEMP_FILE_8M", 8, 8), payload)
}

/// 3×3, 8-bit, RGB, 3 frames of 27 bytes each.
pub fn color8_fixture() -> (Header, Vec<u8>) {
    let payload: Vec<u8> = (0..81u32).map(|i| (i * 3) as u8).collect();
    (fixture_header("TEMP_FILE_8C", 100, 8), payload)
}

/// 3×3, 16-bit, Bayer RGGB, 3 frames of 18 bytes each.
pub fn mono16_fixture(little_endian: bool) -> (Header, Vec<u8>) {
    let samples: Vec<u16> = (0..27u16).map(|i| i * 2_000).collect();
    let mut header = fixture_header("TEMP_FILE_16M", 8, 16);
    header.little_endian = little_endian as i32;
    (header, encode_u16(&samples, little_endian))
}

/// 3×3, 16-bit, RGB, 3 frames of 54 bytes each.
pub fn color16_fixture() -> (Header, Vec<u8>) {
    let samples: Vec<u16> = (0..81u16)
        .map(|i| if i % 2 == 0 { 65_535 } else { i })
        .collect();
    (fixture_header("TEMP_FILE_16C", 100, 16), encode_u16(&samples, true))
}

pub fn encode_u16(samples: &[u16], little_endian: bool) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|s| {
            if little_endian {
                s.to_le_bytes()
            } else {
                s.to_be_bytes()
            }
        })
        .collect()
}

/// The whole file image (header and payload) as bytes.
pub fn file_bytes(header: &Header, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

/// Write a fixture into a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the file is needed.
pub fn write_temp_ser(header: &Header, payload: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("fixture.ser");
    write_ser_file(&path, header, payload).expect("write fixture");
    (dir, path)
}

/// Every read fails with a non-EOF error.
pub struct FaultyReader;

impl Read for FaultyReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device error"))
    }
}

impl Seek for FaultyReader {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}
