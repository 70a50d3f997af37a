mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serio::types::field::{field_by_index, field_by_name};
use serio::{
    AccessMode, FieldDescriptor, FieldKind, HEADER_FIELDS, HEADER_SIZE, SerFile, WriteStatus,
};
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "serio=debug".to_string()
        } else {
            "serio=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { file } => show_info(&file),
        Commands::Header { file, json } => show_header(&file, json),
        Commands::Get { file, field } => get_field(&file, &field),
        Commands::Set { file, field, value } => set_field(&file, &field, &value),
        Commands::Frame {
            file,
            index,
            output,
        } => dump_frame(&file, index, output.as_deref()),
        Commands::Stats { file, json } => show_stats(&file, json),
    }
}

fn open(file: &Path, mode: AccessMode) -> Result<SerFile> {
    SerFile::open(file, mode).with_context(|| format!("Failed to open {}", file.display()))
}

fn resolve_field(selector: &str) -> Result<(usize, &'static FieldDescriptor)> {
    let found = match selector.parse::<usize>() {
        Ok(idx) => field_by_index(idx).map(|field| (idx, field)),
        Err(_) => field_by_name(selector),
    };
    found.with_context(|| format!("Unknown header field: {selector}"))
}

fn read_field_value(ser: &mut SerFile, idx: usize, field: &FieldDescriptor) -> Result<String> {
    let value = match field.kind {
        FieldKind::Text => ser.read_text_field(idx)?,
        FieldKind::Int32 => ser.read_i32_field(idx)?.to_string(),
        FieldKind::Int64 => ser.read_i64_field(idx)?.to_string(),
    };
    Ok(value)
}

fn show_info(file: &Path) -> Result<()> {
    let mut ser = open(file, AccessMode::ReadOnly)?;
    let header = ser.read_header()?;
    let geometry = ser.geometry()?;

    println!("File: {}", file.display());
    println!("Size: {} bytes", ser.size_in_bytes());
    println!("File ID: {}", header.file_id);
    println!("Color: {:?} ({})", header.color(), header.color_id);
    println!(
        "Frame: {}x{}, {} plane(s), {} bit, {} byte(s)/pixel",
        geometry.width,
        geometry.height,
        geometry.plane_count,
        header.pixel_depth_per_plane,
        geometry.bytes_per_pixel
    );
    println!("Frame size: {} bytes", geometry.frame_byte_size);
    println!("Frames: {}", header.frame_count);
    println!(
        "Byte order: {}",
        if header.is_little_endian() { "little-endian" } else { "big-endian" }
    );

    match declared_size(geometry.frame_byte_size, header.frame_count) {
        Some(declared) if ser.size_in_bytes() < declared => println!(
            "Warning: file holds {} bytes but the header declares {}",
            ser.size_in_bytes(),
            declared
        ),
        Some(_) => {}
        None => println!("Warning: header declares more bytes than can be addressed"),
    }
    Ok(())
}

/// Total file size the header implies, or `None` if it does not fit in a u64.
fn declared_size(frame_byte_size: u64, frame_count: i32) -> Option<u64> {
    frame_byte_size
        .checked_mul(frame_count.max(0) as u64)
        .and_then(|payload| payload.checked_add(HEADER_SIZE))
}

fn show_header(file: &Path, json: bool) -> Result<()> {
    let mut ser = open(file, AccessMode::ReadOnly)?;

    if json {
        let header = ser.read_header()?;
        println!("{}", serde_json::to_string_pretty(&header)?);
        return Ok(());
    }

    for (idx, field) in HEADER_FIELDS.iter().enumerate() {
        let value = read_field_value(&mut ser, idx, field)?;
        println!("[{idx:2}] {:<22} @{:<3} {value}", field.name, field.offset);
    }
    Ok(())
}

fn get_field(file: &Path, selector: &str) -> Result<()> {
    let (idx, field) = resolve_field(selector)?;
    let mut ser = open(file, AccessMode::ReadOnly)?;
    println!("{}", read_field_value(&mut ser, idx, field)?);
    Ok(())
}

fn set_field(file: &Path, selector: &str, value: &str) -> Result<()> {
    let (idx, field) = resolve_field(selector)?;
    let mut ser = open(file, AccessMode::ReadWrite)?;

    let status = match field.kind {
        FieldKind::Text => ser.write_text_field(idx, value)?,
        FieldKind::Int32 => {
            let parsed: i32 = value
                .parse()
                .with_context(|| format!("{} expects a 32-bit integer", field.name))?;
            ser.write_i32_field(idx, parsed)?
        }
        FieldKind::Int64 => {
            let parsed: i64 = value
                .parse()
                .with_context(|| format!("{} expects a 64-bit integer", field.name))?;
            ser.write_i64_field(idx, parsed)?
        }
    };

    match status {
        WriteStatus::Complete { .. } => {}
        WriteStatus::Truncated { requested, written } => {
            eprintln!("Warning: {} truncated from {requested} to {written} bytes", field.name);
        }
        WriteStatus::Partial { expected, written } => {
            eprintln!("Warning: only {written} of {expected} bytes of {} written", field.name);
        }
    }

    ser.close()?;
    Ok(())
}

fn dump_frame(file: &Path, index: usize, output: Option<&Path>) -> Result<()> {
    let mut ser = open(file, AccessMode::ReadOnly)?;
    let frame = ser.read_frame_vec(index)?;

    match output {
        Some(path) => std::fs::write(path, &frame)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&frame)?;
            stdout.flush()?;
        }
    }
    tracing::info!(frame = index, bytes = frame.len(), "frame written");
    Ok(())
}

fn show_stats(file: &Path, json: bool) -> Result<()> {
    let stats = serio::frame_statistics(file)
        .with_context(|| format!("Failed to read frames of {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{:>6} {:>6} {:>6} {:>10}", "frame", "min", "max", "mean");
    for s in &stats {
        println!("{:>6} {:>6} {:>6} {:>10.2}", s.index, s.min, s.max, s.mean);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_size() {
        assert_eq!(declared_size(9, 3), Some(HEADER_SIZE + 27));
        assert_eq!(declared_size(9, -1), Some(HEADER_SIZE));
        assert_eq!(declared_size(u64::MAX / 2, 3), None);
        assert_eq!(declared_size(u64::MAX, 1), None);
    }
}
