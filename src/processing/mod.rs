pub mod statistics;

// Re-export for easier access
pub use statistics::{FrameStats, frame_statistics, frame_stats, stats_from_bytes};
