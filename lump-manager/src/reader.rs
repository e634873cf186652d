use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek, SeekFrom};

/// A read-only stream over a resolved lump.
///
/// Lumps from a search path are read from the open file. Lumps from a WAD
/// are read straight out of the archive's buffer without copying, which is
/// why the reader borrows the `LumpManager` it came from: the manager can't
/// be reset while any reader is alive.
#[derive(Debug)]
pub enum LumpReader<'a> {
    File(BufReader<File>),
    Wad(Cursor<&'a [u8]>),
}

impl LumpReader<'_> {
    pub fn is_on_disk(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Drain the rest of the stream in to a buffer
    pub fn read_all(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for LumpReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Wad(r) => r.read(buf),
        }
    }
}

impl BufRead for LumpReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Self::File(r) => r.fill_buf(),
            Self::Wad(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::File(r) => r.consume(amt),
            Self::Wad(r) => r.consume(amt),
        }
    }
}

impl Seek for LumpReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(r) => r.seek(pos),
            Self::Wad(r) => r.seek(pos),
        }
    }
}
