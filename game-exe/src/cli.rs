use argh::FromArgs;

/// Inspect the lumps and maps of a ROTT data set
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to a WAD, may be repeated. Later WADs override earlier ones
    #[argh(option)]
    pub wad: Vec<String>,
    /// directory of loose lump files, may be repeated. Searched before any
    /// WAD
    #[argh(option)]
    pub path: Vec<String>,
    /// lump name to resolve, may be repeated
    #[argh(option)]
    pub lump: Vec<String>,
    /// path to an RTL/RTC map set
    #[argh(option)]
    pub mapset: Option<String>,
    /// map slot to load from the map set (0-99), may be repeated
    #[argh(option)]
    pub map: Vec<i32>,
}
