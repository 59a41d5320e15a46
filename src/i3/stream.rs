//! Output stream for writing molecule lists.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::format::{END_MARKER, MOLECULES};
use super::record::Record;
use crate::util::{Error, Result};

/// Append-only output stream with header backpatching.
pub struct OStream<W: Write + Seek = File> {
    writer: BufWriter<W>,
    pos: u64,
}

impl OStream<File> {
    /// Create (or truncate) the output file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::open(path, e))?;

        Ok(Self::new(file))
    }
}

impl<W: Write + Seek> OStream<W> {
    /// Wrap a sink positioned at its start.
    pub fn new(sink: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(1024 * 1024, sink), // 1MB buffer
            pos: 0,
        }
    }

    /// Get the current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write bytes and advance position.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data).map_err(Error::Write)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value).map_err(Error::Write)?;
        self.pos += 4;
        Ok(())
    }

    /// Append one record.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_bytes(&record.to_bytes())
    }

    /// Append the end-of-list marker word.
    pub fn write_end_marker(&mut self) -> Result<()> {
        self.write_u32(END_MARKER)
    }

    /// Overwrite the header molecule count, then return to the end.
    pub fn patch_molecules(&mut self, count: u32) -> Result<()> {
        let end = self.pos;
        self.seek(MOLECULES as u64)?;
        self.write_u32(count)?;
        self.seek(end)?;
        Ok(())
    }

    /// Seek to a position and return it.
    pub fn seek(&mut self, pos: u64) -> Result<u64> {
        self.writer.flush().map_err(Error::Write)?;
        let new_pos = self.writer.seek(SeekFrom::Start(pos)).map_err(Error::Write)?;
        self.pos = new_pos;
        Ok(new_pos)
    }

    /// Flush and hand back the sink.
    pub fn finish(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| Error::Write(e.into_error()))
    }
}

/// Anything the aggregator can emit finished track records into.
pub trait RecordSink {
    fn emit(&mut self, record: &Record) -> Result<()>;
}

impl<W: Write + Seek> RecordSink for OStream<W> {
    fn emit(&mut self, record: &Record) -> Result<()> {
        self.write_record(record)
    }
}

impl RecordSink for Vec<Record> {
    fn emit(&mut self, record: &Record) -> Result<()> {
        self.push(*record);
        Ok(())
    }
}
