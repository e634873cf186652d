use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// Width of the name field in a directory record
pub const LUMP_NAME_LEN: usize = 8;

/// Size in bytes of one directory record
pub const WAD_DIR_ENTRY_SIZE: usize = 16;

/// The fixed-width name of a lump as stored in the directory.
///
/// The field is *not* guaranteed to be NUL terminated: an 8 character name
/// fills it completely, and shorter names may carry junk after the first NUL.
/// Everything from the first NUL onwards is ignored.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LumpName([u8; LUMP_NAME_LEN]);

impl LumpName {
    pub fn new(raw: [u8; LUMP_NAME_LEN]) -> Self {
        Self(raw)
    }

    /// The raw field, including any padding
    pub fn raw(&self) -> &[u8; LUMP_NAME_LEN] {
        &self.0
    }

    /// Significant bytes of the name, up to the first NUL
    pub fn as_bytes(&self) -> &[u8] {
        bounded(&self.0)
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Case-insensitive comparison bounded to `LUMP_NAME_LEN` characters.
    ///
    /// Only the first 8 characters of `name` take part, so `"PALETTE12"`
    /// matches a lump called `PALETTE1`.
    pub fn matches(&self, name: &str) -> bool {
        let query = bounded(name.as_bytes());
        let query = &query[..query.len().min(LUMP_NAME_LEN)];
        self.as_bytes().eq_ignore_ascii_case(query)
    }
}

/// Slice up to (not including) the first NUL
fn bounded(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

impl From<&str> for LumpName {
    /// Truncates to 8 bytes and NUL pads the remainder
    fn from(name: &str) -> Self {
        let mut raw = [0u8; LUMP_NAME_LEN];
        for (dst, src) in raw.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        Self(raw)
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LumpName({:?})", self.as_str())
    }
}

/// Contains the details for a lump of data: where it starts, the size of it, and the name
///
/// The directory structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | signed int   | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | signed int   | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
///
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WadLump {
    /// The offset in bytes where the lump data starts
    pub offset: i32,
    /// The size in bytes of the lump referenced
    pub size: i32,
    /// Name for the lump data
    pub name: LumpName,
}

impl WadLump {
    pub fn new(offset: i32, size: i32, name: LumpName) -> Self {
        Self { offset, size, name }
    }

    /// Markers such as `F_START` have no data and can't be loaded.
    /// Negative values are treated the same way.
    pub fn is_null(&self) -> bool {
        self.offset <= 0 || self.size <= 0
    }

    /// Byte range in the archive, `None` for a null lump
    pub fn range(&self) -> Option<Range<usize>> {
        if self.is_null() {
            return None;
        }
        let start = self.offset as usize;
        Some(start..start + self.size as usize)
    }
}

impl fmt::Debug for WadLump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadLump {{\n  name: {},\n  size: {},\n  offset: {},\n}}",
            self.name, self.size, self.offset
        )
    }
}

/// Will be either `IWAD` for game, or `PWAD` for patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    Iwad,
    Pwad,
}

impl WadKind {
    pub fn from_magic(magic: &[u8; 4]) -> Option<Self> {
        match magic {
            b"IWAD" => Some(Self::Iwad),
            b"PWAD" => Some(Self::Pwad),
            _ => None,
        }
    }

    pub fn magic(&self) -> &'static [u8; 4] {
        match self {
            Self::Iwad => b"IWAD",
            Self::Pwad => b"PWAD",
        }
    }
}
