//! Random-access record storage.
//!
//! The traversal only ever talks to a [`RecordStore`], so the same code
//! runs against a molecule list on disk ([`FileStore`]) and against an
//! in-memory list ([`MemStore`]).

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::format::*;
use super::record::Record;
use crate::util::{Error, Result};

/// Indexed access to the records of a molecule list.
pub trait RecordStore {
    /// Number of records in the list.
    fn len(&self) -> u32;

    /// Whether the list holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the record at `index`.
    fn read(&mut self, index: u32) -> Result<Record>;

    /// Overwrite the record at `index` in place.
    fn write(&mut self, index: u32, record: &Record) -> Result<()>;

    /// Push pending writes to the backing storage.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Record store over a seekable molecule list, mutated in place.
pub struct FileStore<F = File> {
    inner: F,
    header: [u8; DATA],
    molecules: u32,
}

impl FileStore<File> {
    /// Open an existing list read-write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::open(path, e))?;
        Self::from_stream(file)
    }
}

impl<F: Read + Write + Seek> FileStore<F> {
    /// Wrap an already opened stream and read its header.
    pub fn from_stream(mut inner: F) -> Result<Self> {
        let mut header = [0u8; DATA];
        inner.seek(SeekFrom::Start(0))?;
        let got = read_full(&mut inner, &mut header)?;
        if got < DATA {
            return Err(Error::TruncatedHeader { expected: DATA, actual: got });
        }
        let molecules = LittleEndian::read_u32(&header[MOLECULES..MOLECULES + 4]);

        Ok(Self { inner, header, molecules })
    }

    /// The fixed header block exactly as stored.
    #[inline]
    pub fn header(&self) -> &[u8; DATA] {
        &self.header
    }

    /// Molecule count from the header.
    #[inline]
    pub fn molecule_count(&self) -> u32 {
        self.molecules
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Read + Write + Seek> RecordStore for FileStore<F> {
    fn len(&self) -> u32 {
        self.molecules
    }

    fn read(&mut self, index: u32) -> Result<Record> {
        let offset = record_offset(index);
        self.inner.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; RECORD_SIZE];
        if read_full(&mut self.inner, &mut buf)? < RECORD_SIZE {
            return Err(Error::TruncatedRecord { index, offset });
        }
        Ok(Record::from_bytes(&buf))
    }

    fn write(&mut self, index: u32, record: &Record) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(record_offset(index)))
            .map_err(Error::Write)?;
        self.inner.write_all(&record.to_bytes()).map_err(Error::Write)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::Write)
    }
}

/// In-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    records: Vec<Record>,
}

impl MemStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordStore for MemStore {
    fn len(&self) -> u32 {
        self.records.len() as u32
    }

    fn read(&mut self, index: u32) -> Result<Record> {
        self.records
            .get(index as usize)
            .copied()
            .ok_or(Error::TruncatedRecord { index, offset: record_offset(index) })
    }

    fn write(&mut self, index: u32, record: &Record) -> Result<()> {
        match self.records.get_mut(index as usize) {
            Some(slot) => {
                *slot = *record;
                Ok(())
            }
            None => Err(Error::Write(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("record {} past end of list", index),
            ))),
        }
    }
}

/// Fill `buf` as far as the stream allows, returning the bytes read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(filled)
}
