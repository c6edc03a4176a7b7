//! Frame writer for capturing field generations to a binary file.

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use super::format::{FrameHeader, encode_frame};
use crate::compute::Field;

/// Configuration for frame writing.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Index of this writer among cooperating processes.
    pub rank: u32,
    /// Number of cooperating processes.
    pub size: u32,
    /// Record every Nth frame (1 = every frame).
    pub frame_skip: u32,
    /// Maximum frames to record (0 = unlimited).
    pub max_frames: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            rank: 0,
            size: 1,
            frame_skip: 1,
            max_frames: 0,
        }
    }
}

/// Writer that appends field snapshots to a frame file.
///
/// Usage:
/// ```ignore
/// let mut writer = FrameWriter::create("frames0.dat", &field, Default::default())?;
/// while field.frame() < 10 {
///     writer.record_frame(&field)?;
///     field.update();
/// }
/// writer.finalize()?;
/// ```
pub struct FrameWriter<W: Write + Seek = File> {
    writer: BufWriter<W>,
    header: FrameHeader,
    config: WriterConfig,
    step_counter: u32,
    /// Values per frame, fixed by the field the writer was created for.
    cells: usize,
    /// Set once a frame write fails; the stream then ends mid-frame.
    poisoned: bool,
    /// Pre-allocated buffer for frame encoding.
    encode_buffer: Vec<u8>,
}

impl FrameWriter<File> {
    /// Create a new frame file sized for `field`.
    pub fn create<P: AsRef<Path>>(path: P, field: &Field, config: WriterConfig) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::from_writer(file, field, config)
    }
}

impl<W: Write + Seek> FrameWriter<W> {
    /// Start a frame stream sized for `field` on an arbitrary seekable sink.
    pub fn from_writer(inner: W, field: &Field, config: WriterConfig) -> io::Result<Self> {
        let mut writer = BufWriter::new(inner);

        let header = FrameHeader {
            width: to_header_int(field.width())?,
            height: to_header_int(field.height())?,
            rank: config.rank,
            size: config.size,
            frame_count: 0, // Will be updated on finalize
        };

        // Write placeholder header
        header.write_to(&mut writer)?;

        let frame_size = header.frame_size()?;

        Ok(Self {
            writer,
            header,
            config,
            step_counter: 0,
            cells: field.size(),
            poisoned: false,
            encode_buffer: Vec::with_capacity(frame_size),
        })
    }

    /// Record the live buffer of `field`.
    ///
    /// Returns true if the frame was actually written (may skip frames based on config).
    /// After a failed write every further call is refused, so the frames
    /// counted in the header always match complete frames on disk.
    pub fn record_frame(&mut self, field: &Field) -> io::Result<bool> {
        if self.poisoned {
            return Err(io::Error::other(
                "Frame writer stopped after an earlier write error",
            ));
        }
        if field.size() != self.cells {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Field has {} cells, file expects {}",
                    field.size(),
                    self.cells
                ),
            ));
        }

        self.step_counter += 1;

        // Check frame skip
        if self.step_counter < self.config.frame_skip {
            return Ok(false);
        }
        self.step_counter = 0;

        // Check max frames
        if self.config.max_frames > 0 && self.header.frame_count >= self.config.max_frames {
            return Ok(false);
        }

        encode_frame(field.field(), &mut self.encode_buffer);
        if let Err(e) = self.writer.write_all(&self.encode_buffer) {
            self.poisoned = true;
            return Err(e);
        }
        self.header.frame_count += 1;

        Ok(true)
    }

    /// Finalize the frame file.
    ///
    /// Updates the header with the final frame count. A partial frame left
    /// by a failed write lies past the counted frames and is ignored on read.
    pub fn finalize(mut self) -> io::Result<WriterStats> {
        if self.poisoned {
            log::warn!(
                "Finalizing frame file after a write error: keeping {} complete frames",
                self.header.frame_count
            );
        }
        let total_bytes = self.writer.stream_position()?;

        // Seek back and rewrite header
        self.writer.seek(SeekFrom::Start(0))?;
        self.header.write_to(&mut self.writer)?;

        self.writer.flush()?;

        let stats = WriterStats {
            frame_count: self.header.frame_count,
            total_bytes,
            frame_size: (self.cells * FrameHeader::VALUE_SIZE) as u64,
        };
        log::info!("Frame file finalized: {}", stats);
        Ok(stats)
    }

    /// Get number of frames recorded so far.
    pub fn frames_written(&self) -> u32 {
        self.header.frame_count
    }

    /// Whether a write error has stopped this writer.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}

fn to_header_int(value: usize) -> io::Result<u32> {
    i32::try_from(value)
        .map(|v| v as u32)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Grid dimension exceeds i32"))
}

/// Statistics from a writing session.
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Total frames recorded.
    pub frame_count: u32,
    /// Total file size in bytes.
    pub total_bytes: u64,
    /// Size of each frame in bytes.
    pub frame_size: u64,
}

impl std::fmt::Display for WriterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames, {} bytes total, {} bytes/frame",
            self.frame_count, self.total_bytes, self.frame_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldConfig;
    use crate::frames::FrameReader;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::io::Cursor;
    use std::rc::Rc;
    use tempfile::tempdir;

    /// In-memory sink that accepts only `budget` more bytes before failing.
    struct LimitedSink {
        data: Rc<RefCell<Cursor<Vec<u8>>>>,
        budget: Rc<Cell<usize>>,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let budget = self.budget.get();
            if budget == 0 {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
            let n = buf.len().min(budget);
            self.budget.set(budget - n);
            self.data.borrow_mut().write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for LimitedSink {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.data.borrow_mut().seek(pos)
        }
    }

    fn test_field() -> Field {
        let mut field = Field::new(&FieldConfig::new(16, 12, 2.0)).unwrap();
        field.add_ring(8, 6);
        field
    }

    #[test]
    fn test_writer_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frames0.dat");

        let mut field = test_field();
        let mut writer = FrameWriter::create(&path, &field, WriterConfig::default()).unwrap();

        while field.frame() < 3 {
            writer.record_frame(&field).unwrap();
            field.update();
        }

        let stats = writer.finalize().unwrap();
        assert_eq!(stats.frame_count, 3);
        assert_eq!(stats.frame_size, 16 * 12 * 8);

        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(
            metadata.len(),
            (FrameHeader::SIZE + 3 * 16 * 12 * 8) as u64
        );
        assert_eq!(stats.total_bytes, metadata.len());
    }

    #[test]
    fn test_writer_frame_skip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skip.dat");

        let field = test_field();
        let config = WriterConfig {
            frame_skip: 5,
            ..Default::default()
        };
        let mut writer = FrameWriter::create(&path, &field, config).unwrap();

        // Record 20 steps, should get 4 frames (at steps 5, 10, 15, 20)
        for _ in 0..20 {
            writer.record_frame(&field).unwrap();
        }

        let stats = writer.finalize().unwrap();
        assert_eq!(stats.frame_count, 4);
    }

    #[test]
    fn test_writer_max_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("max.dat");

        let field = test_field();
        let config = WriterConfig {
            max_frames: 5,
            ..Default::default()
        };
        let mut writer = FrameWriter::create(&path, &field, config).unwrap();

        for _ in 0..100 {
            writer.record_frame(&field).unwrap();
        }

        assert_eq!(writer.frames_written(), 5);
        let stats = writer.finalize().unwrap();
        assert_eq!(stats.frame_count, 5);
    }

    #[test]
    fn test_writer_rejects_other_geometry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mismatch.dat");

        let field = test_field();
        let other = Field::new(&FieldConfig::new(8, 8, 2.0)).unwrap();
        let mut writer = FrameWriter::create(&path, &field, WriterConfig::default()).unwrap();

        let err = writer.record_frame(&other).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_failed_write_stops_writer() {
        // Frames larger than the BufWriter capacity go straight to the sink.
        let mut field = Field::new(&FieldConfig::new(40, 40, 2.0)).unwrap();
        field.add_ring(20, 20);
        let frame_bytes = field.size() * FrameHeader::VALUE_SIZE;

        let data = Rc::new(RefCell::new(Cursor::new(Vec::new())));
        let budget = Rc::new(Cell::new(FrameHeader::SIZE + frame_bytes + frame_bytes / 2));
        let sink = LimitedSink {
            data: Rc::clone(&data),
            budget: Rc::clone(&budget),
        };

        let mut writer = FrameWriter::from_writer(sink, &field, WriterConfig::default()).unwrap();
        assert!(writer.record_frame(&field).unwrap());
        assert!(writer.record_frame(&field).is_err());
        assert!(writer.is_poisoned());

        // Space frees up, but the half-written frame must not be followed by more.
        budget.set(usize::MAX);
        assert!(writer.record_frame(&field).is_err());
        assert_eq!(writer.frames_written(), 1);

        let stats = writer.finalize().unwrap();
        assert_eq!(stats.frame_count, 1);

        let bytes = data.borrow().get_ref().clone();
        assert_eq!(&bytes[16..20], &1i32.to_be_bytes());
        assert_eq!(bytes.len(), FrameHeader::SIZE + frame_bytes + frame_bytes / 2);

        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.dat");
        fs::write(&path, &bytes).unwrap();
        let mut reader = FrameReader::open(&path).unwrap();
        assert_eq!(reader.read_frame(0).unwrap(), field.field());
    }
}
