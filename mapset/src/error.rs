use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapSetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Magic is not one of `RTL`, `RTC`, `RTR`, `RXL` or `RXC`
    #[error("Unknown map set format: {0:?}")]
    UnknownFormat([u8; 4]),

    #[error("Unsupported map set version: {0:#06x}")]
    UnsupportedVersion(u32),

    /// The header, directory or a plane ends early
    #[error("Map set file is truncated")]
    Truncated,

    #[error("Map index {0} is out of range")]
    OutOfRange(i32),

    #[error("Map {0} is not used in this map set")]
    NotUsed(usize),

    #[error("No map set is loaded")]
    NoMapSet,
}

impl MapSetError {
    /// Running out of file part way through a record means truncation
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, MapSetError>;
