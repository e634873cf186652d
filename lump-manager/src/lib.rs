//! Layered lump lookup over WAD archives and loose-file directories.
//!
//! ```text,ignore
//!   resolve "PLAYPAL"
//!      │
//!      ├─> path 2/PLAYPAL     (added last, checked first)
//!      ├─> path 1/PLAYPAL
//!      ├─> pwad.wad  PLAYPAL
//!      └─> game.wad  PLAYPAL  (added first, checked last)
//! ```
//!
//! Loose files carry no extension, the file name *is* the lump name.

pub use crate::error::*;
pub use crate::manager::*;
pub use crate::reader::*;

mod error;
mod manager;
mod reader;
