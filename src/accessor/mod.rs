//! Header and frame accessors on [`SerFile`](crate::SerFile)
//!
//! Every call goes back to the stream: geometry is derived from the header
//! as it is on disk at call time.

mod frame;
mod header;

pub use header::{WriteStatus, field_count};
