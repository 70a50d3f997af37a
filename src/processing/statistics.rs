use itertools::{Itertools, MinMaxResult};
use ndarray::Array3;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SerError};
use crate::parser::{parse_frame, parse_header};
use crate::types::field::HEADER_SIZE;
use crate::types::header::Header;
use crate::utils::file_utils::read_binary_file_mmap;

/// Sample statistics for one frame, over all planes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub index: usize,
    pub min: u16,
    pub max: u16,
    pub mean: f64,
}

pub fn frame_stats(index: usize, frame: &Array3<u16>) -> FrameStats {
    let (min, max) = match frame.iter().minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(&v) => (v, v),
        MinMaxResult::MinMax(&lo, &hi) => (lo, hi),
    };
    let mean = if frame.is_empty() {
        0.0
    } else {
        frame.iter().map(|&v| v as f64).sum::<f64>() / frame.len() as f64
    };

    FrameStats { index, min, max, mean }
}

/// Memory-map a SER file and compute statistics for every frame in parallel.
pub fn frame_statistics(path: impl AsRef<Path>) -> Result<Vec<FrameStats>> {
    let mmap = read_binary_file_mmap(path)?;
    if (mmap.len() as u64) < HEADER_SIZE {
        return Err(SerError::EndOfFile);
    }

    let mut input = &mmap[..];
    let header =
        parse_header(&mut input).map_err(|e| SerError::MalformedHeader(e.to_string()))?;
    stats_from_bytes(&mmap, &header)
}

/// Statistics for every frame of a complete file image (header included).
pub fn stats_from_bytes(data: &[u8], header: &Header) -> Result<Vec<FrameStats>> {
    let geometry = header.geometry()?;
    let frame_size = usize::try_from(geometry.frame_byte_size).map_err(|_| {
        SerError::InvalidFieldValue {
            field: "image_height",
            value: header.image_height as i64,
        }
    })?;
    let frame_count = header.frame_count.max(0) as usize;

    let needed = frame_size
        .checked_mul(frame_count)
        .and_then(|payload| payload.checked_add(HEADER_SIZE as usize))
        .ok_or(SerError::EndOfFile)?;
    if data.len() < needed {
        return Err(SerError::EndOfFile);
    }

    debug!(frame_count, frame_size, "computing frame statistics");
    let little_endian = header.is_little_endian();
    (0..frame_count)
        .into_par_iter()
        .map(|i| -> Result<FrameStats> {
            let start = HEADER_SIZE as usize + i * frame_size;
            let frame = parse_frame(&data[start..start + frame_size], &geometry, little_endian)?;
            Ok(frame_stats(i, &frame))
        })
        .collect()
}
