use crate::error::{Result, WadError};
use crate::lumps::{LumpName, WAD_DIR_ENTRY_SIZE, WadKind, WadLump};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::{fmt, str};

const WAD_HEADER_SIZE: usize = 12;

/// Header which tells us the WAD type and where the directory is
///
/// The header structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | *Must* be an ASCII string (either "IWAD" or "PWAD")  |
/// | 0x04-0x07  | signed int   | The number entries in the directory                  |
/// | 0x08-0x0b  | signed int   | Offset in bytes to the directory in the WAD file     |
///
struct WadHeader {
    kind: WadKind,
    /// The count of "lumps" of data
    dir_count: usize,
    /// Offset in bytes that the directory starts at
    dir_offset: usize,
}

impl fmt::Debug for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadHeader {{\n  wad_type: {},\n  dir_count: {},\n  dir_offset: {},\n}}",
            str::from_utf8(self.kind.magic()).unwrap_or("????"),
            self.dir_count,
            self.dir_offset
        )
    }
}

/// "Where's All (the) Data": contains the WAD in memory, plus an array of directories
/// telling us where each data lump starts.
///
/// The archive is immutable once parsed. Lump data is never copied out at
/// parse time: every lump borrows from the single backing buffer.
pub struct WadArchive {
    wad_file_path: PathBuf,
    kind: WadKind,
    /// The WAD as an array of bytes read in to memory
    wad_data: Vec<u8>,
    /// Tells us where each lump of data is, in file order
    wad_dirs: Vec<WadLump>,
}

impl fmt::Debug for WadArchive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadArchive {{\n  wad_file_path: {:?},\n  kind: {:?},\n  wad_dirs: {:?},\n}}",
            self.wad_file_path, self.kind, self.wad_dirs
        )
    }
}

impl WadArchive {
    /// Read the whole file in to memory and parse it
    pub fn open<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file_path = file_path.as_ref();
        let data = fs::read(file_path)?;
        let mut wad = Self::parse(data)?;
        wad.wad_file_path = file_path.to_path_buf();
        Ok(wad)
    }

    /// Parse an archive from raw bytes. The archive takes ownership of the
    /// buffer and keeps it for its lifetime.
    pub fn parse(wad_data: Vec<u8>) -> Result<Self> {
        let header = read_header(&wad_data)?;
        debug!("{header:?}");

        check_len(
            &wad_data,
            header.dir_offset + header.dir_count * WAD_DIR_ENTRY_SIZE,
        )?;

        let mut wad_dirs = Vec::with_capacity(header.dir_count);
        for i in 0..header.dir_count {
            let dir = read_dir_data(&wad_data, header.dir_offset + i * WAD_DIR_ENTRY_SIZE);
            if let Some(range) = dir.range() {
                check_len(&wad_data, range.end)?;
            }
            wad_dirs.push(dir);
        }

        Ok(Self {
            wad_file_path: PathBuf::new(),
            kind: header.kind,
            wad_data,
            wad_dirs,
        })
    }

    /// Where this archive was loaded from, empty if parsed from memory
    pub fn file_path(&self) -> &Path {
        &self.wad_file_path
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// The entire file as loaded
    pub fn data(&self) -> &[u8] {
        &self.wad_data
    }

    pub fn num_lumps(&self) -> usize {
        self.wad_dirs.len()
    }

    /// All directory entries in file order, markers included
    pub fn lumps(&self) -> impl Iterator<Item = &WadLump> {
        self.wad_dirs.iter()
    }

    pub fn lump(&self, index: usize) -> Option<&WadLump> {
        self.wad_dirs.get(index)
    }

    /// Directory index of the first entry called `name`. Markers are included
    /// since the index of something like `F_START` is meaningful.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.wad_dirs.iter().position(|dir| dir.name.matches(name))
    }

    /// First loadable entry called `name`, skipping null markers
    pub fn find_lump(&self, name: &str) -> Option<&WadLump> {
        self.wad_dirs
            .iter()
            .filter(|dir| !dir.is_null())
            .find(|dir| dir.name.matches(name))
    }

    /// The bytes of a lump from this archive's buffer
    pub fn lump_bytes(&self, lump: &WadLump) -> Option<&[u8]> {
        self.wad_data.get(lump.range()?)
    }

    pub fn lump_data(&self, name: &str) -> Option<&[u8]> {
        self.lump_bytes(self.find_lump(name)?)
    }

    pub fn lump_size(&self, name: &str) -> Option<usize> {
        self.find_lump(name).map(|dir| dir.size as usize)
    }

    /// A read-only cursor over a lump, no data is copied
    pub fn lump_cursor(&self, name: &str) -> Option<Cursor<&[u8]>> {
        self.lump_data(name).map(Cursor::new)
    }
}

fn check_len(data: &[u8], needed: usize) -> Result<()> {
    if needed > data.len() {
        return Err(WadError::TruncatedFile {
            needed,
            len: data.len(),
        });
    }
    Ok(())
}

fn read_header(data: &[u8]) -> Result<WadHeader> {
    check_len(data, WAD_HEADER_SIZE)?;

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&data[0..4]);
    let kind = WadKind::from_magic(&magic).ok_or(WadError::InvalidMagic(magic))?;

    let count = LittleEndian::read_i32(&data[4..8]);
    let offset = LittleEndian::read_i32(&data[8..12]);
    if count < 0 || offset < 0 {
        return Err(WadError::InvalidDirectory { count, offset });
    }

    Ok(WadHeader {
        kind,
        dir_count: count as usize,
        dir_offset: offset as usize,
    })
}

/// Caller must have checked that `offset + 16` is in bounds
fn read_dir_data(data: &[u8], offset: usize) -> WadLump {
    let mut n = [0u8; 8];
    n.copy_from_slice(&data[offset + 8..offset + 16]);

    WadLump {
        offset: LittleEndian::read_i32(&data[offset..offset + 4]),
        size: LittleEndian::read_i32(&data[offset + 4..offset + 8]),
        name: LumpName::new(n),
    }
}
