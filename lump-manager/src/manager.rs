use crate::error::{LumpError, Result};
use crate::reader::LumpReader;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Component, Path, PathBuf};
use wad::WadArchive;

/// Somewhere a lump can come from
#[derive(Debug, Clone, Copy)]
pub enum LumpSource<'a> {
    /// A directory of loose files named exactly as the lump, no extension
    Path(&'a Path),
    Wad(&'a WadArchive),
}

/// Result of `LumpManager::index_of`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LumpIndex {
    /// Directory slot `lump` in the archive at position `wad` (in the order
    /// archives were added)
    Wad { wad: usize, lump: usize },
    /// Exists as a loose file but has no archive slot
    OnDiskOnly,
}

/// Resolves lump names against a set of WADs and loose-file directories.
///
/// Search paths are always checked before WADs, which makes it easy to
/// override any lump by dropping a file in a directory. Within each group the
/// most recently added entry is checked first, so a later PWAD replaces the
/// lumps of an earlier IWAD.
///
/// The manager is not synchronised. Hosts sharing one between threads must
/// serialise every `add_*`/`reset` call, and lookups may only run while no
/// mutation is in flight.
#[derive(Debug, Default)]
pub struct LumpManager {
    /// In the order they were added
    wads: Vec<WadArchive>,
    /// In the order they were added
    paths: Vec<PathBuf>,
}

impl LumpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a WAD in full and add it with the highest archive priority.
    /// Nothing is registered if the file can't be read or parsed.
    pub fn add_archive<P: AsRef<Path>>(&mut self, file_path: P) -> Result<()> {
        let file_path = file_path.as_ref();
        let wad = WadArchive::open(file_path)
            .map_err(|e| LumpError::from_wad(file_path.to_path_buf(), e))?;

        info!(
            "Added {:?} {:?} with {} lumps",
            wad.kind(),
            file_path,
            wad.num_lumps()
        );
        self.wads.push(wad);
        Ok(())
    }

    /// Add a directory of loose lump files with the highest path priority.
    /// The directory is checked once, here. If it later disappears the
    /// lookups against it simply miss.
    pub fn add_search_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| {
            warn!("Could not add search path {path:?}: {source}");
            LumpError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if !meta.is_dir() {
            warn!("{path:?} is not a directory");
            return Err(LumpError::NotADirectory(path.to_path_buf()));
        }

        info!("Added search path {path:?}");
        self.paths.push(path.to_path_buf());
        Ok(())
    }

    /// The order lumps are resolved in: search paths newest first, then
    /// WADs newest first.
    pub fn lookup_order(&self) -> impl Iterator<Item = LumpSource<'_>> {
        self.paths
            .iter()
            .rev()
            .map(|p| LumpSource::Path(p.as_path()))
            .chain(self.wads.iter().rev().map(LumpSource::Wad))
    }

    /// Load the whole lump in to a new buffer. The buffer is the caller's and
    /// stays valid after a `reset`.
    pub fn resolve_to_bytes(&self, name: &str) -> Option<Vec<u8>> {
        for source in self.lookup_order() {
            match source {
                LumpSource::Path(dir) => {
                    let Some(file_path) = disk_lump(dir, name) else {
                        continue;
                    };
                    match fs::read(&file_path) {
                        Ok(data) => {
                            debug!("Loaded {name} from {file_path:?}");
                            return Some(data);
                        }
                        Err(e) => warn!("Could not read {file_path:?}: {e}"),
                    }
                }
                LumpSource::Wad(wad) => {
                    if let Some(data) = wad.lump_data(name) {
                        debug!("Loaded {name} from {:?}", wad.file_path());
                        return Some(data.to_vec());
                    }
                }
            }
        }
        None
    }

    /// Open a read-only stream over the lump. Nothing is copied for lumps
    /// that come from a WAD.
    pub fn resolve_to_stream(&self, name: &str) -> Option<LumpReader<'_>> {
        for source in self.lookup_order() {
            match source {
                LumpSource::Path(dir) => {
                    let Some(file_path) = disk_lump(dir, name) else {
                        continue;
                    };
                    match File::open(&file_path) {
                        Ok(file) => {
                            debug!("Opened {name} from {file_path:?}");
                            return Some(LumpReader::File(BufReader::new(file)));
                        }
                        Err(e) => warn!("Could not open {file_path:?}: {e}"),
                    }
                }
                LumpSource::Wad(wad) => {
                    if let Some(cursor) = wad.lump_cursor(name) {
                        debug!("Opened {name} from {:?}", wad.file_path());
                        return Some(LumpReader::Wad(cursor));
                    }
                }
            }
        }
        None
    }

    /// Find the directory slot of a lump. Unlike the resolve functions this
    /// checks WADs *before* paths and does not skip marker lumps, since the
    /// position of something like `S_START` is what callers want.
    pub fn index_of(&self, name: &str) -> Option<LumpIndex> {
        for (wad_index, wad) in self.wads.iter().enumerate().rev() {
            if let Some(lump) = wad.index_of(name) {
                return Some(LumpIndex::Wad {
                    wad: wad_index,
                    lump,
                });
            }
        }

        self.paths
            .iter()
            .rev()
            .any(|dir| disk_lump(dir, name).is_some())
            .then_some(LumpIndex::OnDiskOnly)
    }

    pub fn wad(&self, index: usize) -> Option<&WadArchive> {
        self.wads.get(index)
    }

    pub fn num_wads(&self) -> usize {
        self.wads.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Drop every WAD and search path. Safe to call repeatedly, and the
    /// manager can be used again straight after.
    pub fn reset(&mut self) {
        if !self.wads.is_empty() || !self.paths.is_empty() {
            info!(
                "Releasing {} WADs and {} search paths",
                self.wads.len(),
                self.paths.len()
            );
        }
        self.wads.clear();
        self.paths.clear();
    }
}

/// `dir/name` if it exists as a regular file. Lump names are flat, so
/// anything that isn't a single plain file name (empty, absolute, `..`, or
/// containing a separator) never leaves `dir`.
fn disk_lump(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut components = Path::new(name).components();
    let (Some(Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return None;
    };
    let file_path = dir.join(file_name);
    match fs::metadata(&file_path) {
        Ok(meta) if meta.is_file() => Some(file_path),
        Ok(_) => None,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                debug!("Skipping {file_path:?}: {e}");
            }
            None
        }
    }
}
