//! Binary format definitions for SmoothLife frame files.
//!
//! Layout is big-endian throughout (XDR-compatible):
//!
//! ```text
//! i32 width | i32 height | i32 rank | i32 size | i32 frame_count
//! frame_count x (width * height x f64)
//! ```
//!
//! Frame values are stored in `index(x, y)` order.

use std::io::{self, Read, Write};

/// File header for SmoothLife frame files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Grid width (outer index).
    pub width: u32,
    /// Grid height (inner index).
    pub height: u32,
    /// Index of the writing process.
    pub rank: u32,
    /// Number of writing processes.
    pub size: u32,
    /// Total number of frames.
    pub frame_count: u32,
}

impl FrameHeader {
    /// Size of header in bytes.
    pub const SIZE: usize = 20;

    /// Bytes per stored density value.
    pub const VALUE_SIZE: usize = 8;

    /// Number of values in one frame.
    pub fn cells(&self) -> io::Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| self.too_large())
    }

    /// Size of one frame in bytes.
    pub fn frame_size(&self) -> io::Result<usize> {
        self.cells()?
            .checked_mul(Self::VALUE_SIZE)
            .ok_or_else(|| self.too_large())
    }

    /// Total file size in bytes implied by the header.
    pub fn file_size(&self) -> io::Result<u64> {
        u64::try_from(self.frame_size()?)
            .ok()
            .and_then(|frame| frame.checked_mul(self.frame_count as u64))
            .and_then(|frames| frames.checked_add(Self::SIZE as u64))
            .ok_or_else(|| self.too_large())
    }

    fn too_large(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Frame header describes an unaddressable file: {}x{} grid, {} frames",
                self.width, self.height, self.frame_count
            ),
        )
    }

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for field in [
            self.width,
            self.height,
            self.rank,
            self.size,
            self.frame_count,
        ] {
            w.write_all(&encode_int(field)?)?;
        }
        Ok(())
    }

    /// Read header from input.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut read_int = |name: &str| -> io::Result<u32> {
            let mut buf4 = [0u8; 4];
            r.read_exact(&mut buf4)?;
            let value = i32::from_be_bytes(buf4);
            u32::try_from(value).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Negative {} in frame header: {}", name, value),
                )
            })
        };

        let width = read_int("width")?;
        let height = read_int("height")?;
        let rank = read_int("rank")?;
        let size = read_int("size")?;
        let frame_count = read_int("frame_count")?;

        if width == 0 || height == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Empty grid in frame header: {}x{}", width, height),
            ));
        }

        Ok(Self {
            width,
            height,
            rank,
            size,
            frame_count,
        })
    }
}

/// Header fields are signed 32-bit on disk.
fn encode_int(value: u32) -> io::Result<[u8; 4]> {
    i32::try_from(value)
        .map(i32::to_be_bytes)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Header value exceeds i32"))
}

/// Encode f64 slice to bytes.
pub fn encode_frame(data: &[f64], bytes: &mut Vec<u8>) {
    bytes.clear();
    bytes.reserve(data.len() * FrameHeader::VALUE_SIZE);
    for &v in data {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
}

/// Decode bytes to f64 slice.
pub fn decode_frame(bytes: &[u8], output: &mut [f64]) -> io::Result<()> {
    if bytes.len() != output.len() * FrameHeader::VALUE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Frame size mismatch: {} bytes vs {} values",
                bytes.len(),
                output.len()
            ),
        ));
    }
    for (v, chunk) in output
        .iter_mut()
        .zip(bytes.chunks_exact(FrameHeader::VALUE_SIZE))
    {
        let mut buf8 = [0u8; 8];
        buf8.copy_from_slice(chunk);
        *v = f64::from_be_bytes(buf8);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_layout() {
        let header = FrameHeader {
            width: 200,
            height: 500,
            rank: 0,
            size: 1,
            frame_count: 10,
        };

        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), FrameHeader::SIZE);
        assert_eq!(&buf[0..4], &[0, 0, 0, 200]);
        assert_eq!(&buf[4..8], &[0, 0, 1, 244]);
        assert_eq!(&buf[16..20], &[0, 0, 0, 10]);

        let decoded = FrameHeader::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.frame_size().unwrap(), 200 * 500 * 8);
        assert_eq!(decoded.file_size().unwrap(), 20 + 10 * 200 * 500 * 8);
    }

    #[test]
    fn test_header_rejects_negative() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-3i32).to_be_bytes());
        buf.extend_from_slice(&[0u8; 16]);
        let err = FrameHeader::read_from(&mut Cursor::new(&buf)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_oversized_header_sizes_are_errors() {
        let header = FrameHeader {
            width: i32::MAX as u32,
            height: i32::MAX as u32,
            rank: 0,
            size: 1,
            frame_count: 0,
        };
        assert_eq!(header.frame_size().unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert!(header.file_size().is_err());

        let many_frames = FrameHeader {
            width: 1 << 16,
            height: 1 << 16,
            frame_count: i32::MAX as u32,
            ..header
        };
        assert!(many_frames.frame_size().is_ok());
        assert!(many_frames.file_size().is_err());
    }

    #[test]
    fn test_header_rejects_truncated() {
        let buf = [0u8, 0, 0, 4, 0, 0];
        let err = FrameHeader::read_from(&mut Cursor::new(&buf)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_values_are_big_endian() {
        let mut bytes = Vec::new();
        encode_frame(&[1.0, -0.5], &mut bytes);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..8], &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[0xbf, 0xe0, 0, 0, 0, 0, 0, 0]);

        let mut decoded = [0.0; 2];
        decode_frame(&bytes, &mut decoded).unwrap();
        assert_eq!(decoded, [1.0, -0.5]);
    }

    #[test]
    fn test_decode_size_mismatch() {
        let mut out = [0.0; 3];
        assert!(decode_frame(&[0u8; 16], &mut out).is_err());
    }
}
