use crate::error::{MapSetError, Result};
use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt};
use std::borrow::Cow;
use std::fmt;
use std::io::Read;

/// Every map set has exactly this many descriptor slots
pub const MAPSET_NUM_MAPS: usize = 100;
pub const MAP_WIDTH: usize = 128;
pub const MAP_HEIGHT: usize = 128;
/// Words in one decompressed plane
pub const PLANE_WORDS: usize = MAP_WIDTH * MAP_HEIGHT;
/// Bytes in one decompressed plane
pub const PLANE_SIZE: usize = PLANE_WORDS * 2;
pub const NUM_PLANES: usize = 3;

/// Magic plus version, the descriptors follow straight after
pub const MAPSET_HEADER_SIZE: u64 = 8;
pub const MAP_DESCRIPTOR_SIZE: usize = 64;
pub const MAP_NAME_LEN: usize = 24;

pub const RTL_VERSION: u32 = 0x0101;
pub const RXL_VERSION: u32 = 0x0200;

/// RLEW tag used by the registered game's maps
pub const RLEW_TAG_REGISTERED: u16 = 0x4344;
/// RLEW tag used by the shareware game's maps
pub const RLEW_TAG_SHAREWARE: u16 = 0x4D4B;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapSetFlags: u32 {
        const SINGLEPLAYER = 1 << 0;
        const COMMBAT      = 1 << 1;
        const LUDICROUS    = 1 << 2;
        const SHAREWARE    = 1 << 3;
        const RANDROTT     = 1 << 4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapFlags: u32 {
        const OPEN_PUSHWALLS = 1 << 0;
    }
}

impl MapSetFlags {
    pub fn from_magic(magic: &[u8; 4]) -> Option<Self> {
        match magic {
            b"RTL\0" => Some(Self::SINGLEPLAYER),
            b"RTC\0" => Some(Self::COMMBAT),
            b"RTR\0" => Some(Self::RANDROTT),
            b"RXL\0" => Some(Self::SINGLEPLAYER | Self::LUDICROUS),
            b"RXC\0" => Some(Self::COMMBAT | Self::LUDICROUS),
            _ => None,
        }
    }
}

/// Read the magic and version, giving the flags they imply
pub(crate) fn read_header<R: Read>(r: &mut R) -> Result<(MapSetFlags, u32)> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic).map_err(MapSetError::from_read)?;
    let mut flags = MapSetFlags::from_magic(&magic).ok_or(MapSetError::UnknownFormat(magic))?;

    let version = r
        .read_u32::<LittleEndian>()
        .map_err(MapSetError::from_read)?;
    match version {
        RTL_VERSION => {}
        RXL_VERSION => flags |= MapSetFlags::LUDICROUS,
        v => return Err(MapSetError::UnsupportedVersion(v)),
    }

    Ok((flags, version))
}

/// One slot of the map set directory
///
/// | Field Size | Data Type     | Content                                  |
/// |------------|---------------|------------------------------------------|
/// | 0x00-0x03  | u32           | Non-zero if the slot holds a map         |
/// | 0x04-0x07  | u32           | CRC of the map (not checked)             |
/// | 0x08-0x0b  | u32           | RLEW tag for this map's planes           |
/// | 0x0c-0x0f  | u32           | `MapFlags`                               |
/// | 0x10-0x1b  | 3 x u32       | Offset of each compressed plane          |
/// | 0x1c-0x27  | 3 x u32       | Compressed size of each plane in bytes   |
/// | 0x28-0x3f  | 24 ASCII char | Map name, NUL padded                     |
#[derive(Clone, PartialEq, Eq)]
pub struct MapDescriptor {
    pub used: u32,
    pub crc: u32,
    /// Only the low 16 bits are meaningful as an RLEW tag
    pub tag: u32,
    pub flags: MapFlags,
    pub plane_offsets: [u32; NUM_PLANES],
    pub plane_sizes: [u32; NUM_PLANES],
    name: [u8; MAP_NAME_LEN],
}

impl Default for MapDescriptor {
    fn default() -> Self {
        Self {
            used: 0,
            crc: 0,
            tag: 0,
            flags: MapFlags::empty(),
            plane_offsets: [0; NUM_PLANES],
            plane_sizes: [0; NUM_PLANES],
            name: [0; MAP_NAME_LEN],
        }
    }
}

impl MapDescriptor {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut read = || r.read_u32::<LittleEndian>().map_err(MapSetError::from_read);

        let used = read()?;
        let crc = read()?;
        let tag = read()?;
        let flags = MapFlags::from_bits_retain(read()?);
        let plane_offsets = [read()?, read()?, read()?];
        let plane_sizes = [read()?, read()?, read()?];

        let mut name = [0u8; MAP_NAME_LEN];
        r.read_exact(&mut name).map_err(MapSetError::from_read)?;

        Ok(Self {
            used,
            crc,
            tag,
            flags,
            plane_offsets,
            plane_sizes,
            name,
        })
    }

    pub fn is_used(&self) -> bool {
        self.used != 0
    }

    pub fn rlew_tag(&self) -> u16 {
        self.tag as u16
    }

    pub fn raw_name(&self) -> &[u8; MAP_NAME_LEN] {
        &self.name
    }

    /// Name up to the first NUL
    pub fn name(&self) -> Cow<'_, str> {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(MAP_NAME_LEN);
        String::from_utf8_lossy(&self.name[..end])
    }
}

impl fmt::Debug for MapDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nMapDescriptor {{\n  name: {},\n  used: {},\n  tag: {:#06x},\n  flags: {:?},\n  plane_offsets: {:?},\n  plane_sizes: {:?},\n}}",
            self.name(),
            self.used,
            self.tag,
            self.flags,
            self.plane_offsets,
            self.plane_sizes
        )
    }
}

/// The three planes of a map, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Walls = 0,
    Sprites = 1,
    Info = 2,
}

impl Plane {
    pub const ALL: [Plane; NUM_PLANES] = [Plane::Walls, Plane::Sprites, Plane::Info];

    pub fn index(self) -> usize {
        self as usize
    }
}
