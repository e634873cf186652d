use thiserror::Error;

/// Errors that can occur while parsing a WAD archive
#[derive(Error, Debug)]
pub enum WadError {
    /// Header magic was neither `IWAD` nor `PWAD`
    #[error("Invalid WAD magic: {0:?}")]
    InvalidMagic([u8; 4]),

    /// The header or directory points past the end of the data
    #[error("Truncated WAD: needed {needed} bytes but only {len} available")]
    TruncatedFile { needed: usize, len: usize },

    /// Negative lump count or directory offset in the header
    #[error("Invalid WAD directory: {count} lumps at offset {offset}")]
    InvalidDirectory { count: i32, offset: i32 },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WadError>;
