use std::io;
use std::path::PathBuf;
use thiserror::Error;
use wad::WadError;

/// Errors from registering archives and search paths. Lookups never fail,
/// a missing lump is `None`.
#[derive(Error, Debug)]
pub enum LumpError {
    /// The file or directory could not be read
    #[error("Could not read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// The file was read but is not a usable WAD
    #[error("{path:?} is not a valid WAD: {source}")]
    Format { path: PathBuf, source: WadError },

    /// Search paths must be directories
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
}

impl LumpError {
    pub(crate) fn from_wad(path: PathBuf, err: WadError) -> Self {
        match err {
            WadError::Io(source) => Self::Io { path, source },
            source => Self::Format { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, LumpError>;
