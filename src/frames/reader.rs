//! Frame reader for playing back recorded fields.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::format::{FrameHeader, decode_frame};

/// Reader for frame files produced by [`FrameWriter`](super::FrameWriter).
///
/// Usage:
/// ```ignore
/// let mut reader = FrameReader::open("frames0.dat")?;
/// println!("File has {} frames", reader.frame_count());
///
/// let values = reader.read_frame(3)?;
/// for frame in reader.frames() {
///     let values = frame?;
/// }
/// ```
pub struct FrameReader {
    reader: BufReader<File>,
    header: FrameHeader,
    /// Raw frame bytes, sized on the first read.
    read_buffer: Vec<u8>,
}

impl FrameReader {
    /// Open a frame file and validate its length against the header.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header = FrameHeader::read_from(&mut reader)?;

        // Reject the header before anything is sized from it.
        let expected = header.file_size()?;
        let file_len = reader.seek(SeekFrom::End(0))?;
        if file_len < expected {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Frame file truncated: {} bytes, header promises {}",
                    file_len, expected
                ),
            ));
        }

        Ok(Self {
            reader,
            header,
            read_buffer: Vec::new(),
        })
    }

    /// Get file header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Get total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.header.frame_count
    }

    /// Get grid dimensions (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.header.width as usize, self.header.height as usize)
    }

    /// Read a specific frame by index, in `index(x, y)` order.
    pub fn read_frame(&mut self, frame_index: u32) -> io::Result<Vec<f64>> {
        if frame_index >= self.header.frame_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Frame index {} out of range ({} frames)",
                    frame_index, self.header.frame_count
                ),
            ));
        }

        // open() checked that every frame lies inside the file, so these fit.
        let frame_size = self.header.frame_size()?;
        let offset = FrameHeader::SIZE as u64 + frame_index as u64 * frame_size as u64;
        self.read_buffer.resize(frame_size, 0);
        self.reader.seek(SeekFrom::Start(offset))?;
        self.reader.read_exact(&mut self.read_buffer)?;

        let mut values = vec![0.0; self.header.cells()?];
        decode_frame(&self.read_buffer, &mut values)?;
        Ok(values)
    }

    /// Iterate over all frames in order.
    pub fn frames(&mut self) -> FrameIterator<'_> {
        FrameIterator {
            reader: self,
            current: 0,
        }
    }
}

/// Iterator over frames in a file.
pub struct FrameIterator<'a> {
    reader: &'a mut FrameReader,
    current: u32,
}

impl Iterator for FrameIterator<'_> {
    type Item = io::Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.reader.frame_count() {
            return None;
        }
        let result = self.reader.read_frame(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.reader.frame_count().saturating_sub(self.current) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Field;
    use crate::frames::{FrameWriter, WriterConfig};
    use crate::schema::FieldConfig;
    use std::fs::{self, OpenOptions};
    use tempfile::tempdir;

    #[test]
    fn test_read_back_recorded_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frames0.dat");

        let mut field = Field::new(&FieldConfig::new(20, 14, 2.0)).unwrap();
        field.add_ring(5, 5);
        field.add_disk(15, 9);

        let mut snapshots = Vec::new();
        let mut writer = FrameWriter::create(&path, &field, WriterConfig::default()).unwrap();
        while field.frame() < 3 {
            writer.record_frame(&field).unwrap();
            snapshots.push(field.field().to_vec());
            field.update();
        }
        writer.finalize().unwrap();

        let mut reader = FrameReader::open(&path).unwrap();
        assert_eq!(reader.frame_count(), 3);
        assert_eq!(reader.dimensions(), (20, 14));
        assert_eq!(reader.header().rank, 0);
        assert_eq!(reader.header().size, 1);

        assert_eq!(reader.read_frame(2).unwrap(), snapshots[2]);

        let frames: Vec<_> = reader.frames().collect::<io::Result<_>>().unwrap();
        assert_eq!(frames, snapshots);
    }

    #[test]
    fn test_out_of_range_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.dat");

        let field = Field::new(&FieldConfig::new(4, 4, 1.0)).unwrap();
        let mut writer = FrameWriter::create(&path, &field, WriterConfig::default()).unwrap();
        writer.record_frame(&field).unwrap();
        writer.finalize().unwrap();

        let mut reader = FrameReader::open(&path).unwrap();
        let err = reader.read_frame(1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cut.dat");

        let field = Field::new(&FieldConfig::new(4, 4, 1.0)).unwrap();
        let mut writer = FrameWriter::create(&path, &field, WriterConfig::default()).unwrap();
        writer.record_frame(&field).unwrap();
        writer.record_frame(&field).unwrap();
        writer.finalize().unwrap();

        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len((FrameHeader::SIZE + 4 * 4 * 8) as u64).unwrap();

        let err = FrameReader::open(&path).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    fn write_header(path: &Path, ints: [i32; 5]) {
        let bytes: Vec<u8> = ints.iter().flat_map(|v| v.to_be_bytes()).collect();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.dat");

        // Frame size overflows usize.
        write_header(&path, [i32::MAX, i32::MAX, 0, 1, 0]);
        let err = FrameReader::open(&path).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // Representable, but the file cannot hold the promised frames.
        write_header(&path, [1 << 20, 1 << 20, 0, 1, 3]);
        let err = FrameReader::open(&path).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_large_empty_grid_opens_without_reading() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.dat");

        write_header(&path, [1 << 20, 1 << 20, 0, 1, 0]);
        let mut reader = FrameReader::open(&path).unwrap();
        assert_eq!(reader.frame_count(), 0);
        assert_eq!(reader.frames().count(), 0);
    }
}
