use crate::error::{MapSetError, Result};
use crate::format::{
    MAP_HEIGHT, MAP_WIDTH, MAPSET_HEADER_SIZE, MAPSET_NUM_MAPS, MapDescriptor, MapSetFlags,
    NUM_PLANES, PLANE_WORDS, Plane, read_header,
};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSetState {
    Unloaded,
    MapSetLoaded,
    MapLoaded,
}

/// An open map set file and its directory
struct MapSet {
    path: PathBuf,
    flags: MapSetFlags,
    version: u32,
    maps: Vec<MapDescriptor>,
    file: BufReader<File>,
}

struct LoadedMap {
    index: usize,
    planes: [Vec<u16>; NUM_PLANES],
}

/// Loads RTL/RTC map sets and decompresses one map at a time for the
/// renderer.
///
/// The file stays open while the map set is loaded so maps can be read on
/// demand. Loading a map set replaces any previous one along with its
/// current map.
#[derive(Default)]
pub struct MapSetLoader {
    mapset: Option<MapSet>,
    map: Option<LoadedMap>,
}

impl MapSetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MapSetState {
        match (&self.mapset, &self.map) {
            (None, _) => MapSetState::Unloaded,
            (Some(_), None) => MapSetState::MapSetLoaded,
            (Some(_), Some(_)) => MapSetState::MapLoaded,
        }
    }

    /// Open a map set and read its directory. The header and all 100
    /// descriptors are read before anything already loaded is released, so
    /// on error the previous map set is still usable.
    pub fn load_mapset<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufReader::new(File::open(path)?);

        let (flags, version) = read_header(&mut file)?;

        file.seek(SeekFrom::Start(MAPSET_HEADER_SIZE))?;
        let mut maps = Vec::with_capacity(MAPSET_NUM_MAPS);
        for _ in 0..MAPSET_NUM_MAPS {
            maps.push(MapDescriptor::read_from(&mut file)?);
        }

        self.unload_mapset();

        info!(
            "Loaded map set {:?}: {:?}, version {:#06x}, {} maps",
            path,
            flags,
            version,
            maps.iter().filter(|m| m.is_used()).count()
        );
        self.mapset = Some(MapSet {
            path: path.to_path_buf(),
            flags,
            version,
            maps,
            file,
        });
        Ok(())
    }

    /// Drop the current map, close the file and clear the directory
    pub fn unload_mapset(&mut self) {
        self.unload_map();
        self.mapset = None;
    }

    /// Decompress all three planes of map `index`. A map that is already
    /// loaded is replaced only once the new one has been read in full.
    pub fn load_map(&mut self, index: i32) -> Result<()> {
        let slot = usize::try_from(index)
            .ok()
            .filter(|i| *i < MAPSET_NUM_MAPS)
            .ok_or(MapSetError::OutOfRange(index))?;
        let mapset = self.mapset.as_mut().ok_or(MapSetError::NoMapSet)?;

        let desc = &mapset.maps[slot];
        if !desc.is_used() {
            return Err(MapSetError::NotUsed(slot));
        }

        let tag = desc.rlew_tag();
        let mut planes: [Vec<u16>; NUM_PLANES] = Default::default();
        for (i, plane) in planes.iter_mut().enumerate() {
            let size = u64::from(desc.plane_sizes[i]);
            mapset
                .file
                .seek(SeekFrom::Start(u64::from(desc.plane_offsets[i])))?;
            // bounded by the file, not by the size the descriptor claims
            let mut compressed = Vec::new();
            (&mut mapset.file).take(size).read_to_end(&mut compressed)?;
            if (compressed.len() as u64) < size {
                return Err(MapSetError::Truncated);
            }

            *plane = vec![0u16; PLANE_WORDS];
            let words = rlew::words_from_le_bytes(&compressed);
            let written = rlew::decompress_into(&words, tag, plane);
            if written < PLANE_WORDS {
                warn!(
                    "Map {slot} plane {i} decompressed to {written} of {PLANE_WORDS} words"
                );
            }
        }

        info!("Loaded map {slot}: {}", desc.name());
        self.map = Some(LoadedMap {
            index: slot,
            planes,
        });
        Ok(())
    }

    /// Free the planes of the current map, if any
    pub fn unload_map(&mut self) {
        self.map = None;
    }

    /// A decompressed 128x128 plane of the current map, row major
    pub fn get_plane(&self, plane: usize) -> Option<&[u16]> {
        self.map
            .as_ref()
            .and_then(|m| m.planes.get(plane))
            .map(Vec::as_slice)
    }

    pub fn plane(&self, plane: Plane) -> Option<&[u16]> {
        self.get_plane(plane.index())
    }

    pub fn tile(&self, plane: Plane, x: usize, y: usize) -> Option<u16> {
        if x >= MAP_WIDTH || y >= MAP_HEIGHT {
            return None;
        }
        self.plane(plane).map(|p| p[y * MAP_WIDTH + x])
    }

    /// Index of the map currently loaded
    pub fn current_map(&self) -> Option<usize> {
        self.map.as_ref().map(|m| m.index)
    }

    pub fn path(&self) -> Option<&Path> {
        self.mapset.as_ref().map(|m| m.path.as_path())
    }

    pub fn flags(&self) -> Option<MapSetFlags> {
        self.mapset.as_ref().map(|m| m.flags)
    }

    pub fn version(&self) -> Option<u32> {
        self.mapset.as_ref().map(|m| m.version)
    }

    pub fn map_info(&self, index: usize) -> Option<&MapDescriptor> {
        self.mapset.as_ref()?.maps.get(index)
    }

    /// Slots that hold a map, with their index
    pub fn used_maps(&self) -> impl Iterator<Item = (usize, &MapDescriptor)> {
        self.mapset
            .iter()
            .flat_map(|m| m.maps.iter().enumerate())
            .filter(|(_, desc)| desc.is_used())
    }
}
