//! Frame output for SmoothLife runs.
//!
//! # File Format
//!
//! Binary frame files use an XDR-compatible layout, so they are readable on
//! any architecture. `Rank` and `Size` identify the writer when several
//! processes each dump their own file:
//!
//! ```text
//! Header (20 bytes, big-endian i32):
//!   Width, Height, Rank, Size, Frame count
//!
//! Frame data (frame_count * width * height * 8 bytes):
//!   Big-endian f64 in index(x, y) order
//! ```
//!
//! A plain text dump is available through [`TextWriter`].

mod format;
mod reader;
mod text;
mod writer;

pub use format::{FrameHeader, decode_frame, encode_frame};
pub use reader::{FrameIterator, FrameReader};
pub use text::TextWriter;
pub use writer::{FrameWriter, WriterConfig, WriterStats};
