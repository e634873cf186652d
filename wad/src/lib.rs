//! This crate contains the structures and tools for parsing WAD archives
//! in to an in-memory directory of named lumps.
//!
//! The structure of a WAD is this:
//!
//! ```text,ignore
//!                        <───── 32 bits ──────>
//!                        ┌────────────────────┐
//!             ┌──── 0x00 |  "IWAD" or "PWAD"  | 0x03
//!             |          | ────────────────── |
//!     Header ─┤     0x04 | i32 lump count     | 0x07
//!             |          | ────────────────── |
//!             └──── 0x08 | i32 dir offset   ─────0x0B ──┐
//!             ┌───────── | ────────────────── |         |
//!             |     0x0C | ┌────────────────┐ |         |
//!             |          | |   Lump Bytes   |<─────┐    |
//!     Lumps ──┤          | |       .        | |    |    |
//!             |          | └────────────────┘ |    |    |
//!             └───────── |         .          |    |    |
//!             ┌───────── | ┌────────────────┐<──────────┘
//!             |          | | i32 Lump Offset|──────┘
//!  Directory ─┤          | |----------------| |
//!  (16 bytes  |          | | i32 Lump Size  | |
//!   each)     |          | |----------------| |
//!             |          | | [u8; 8] Name   | |
//!             └───────── └────────────────────┘
//! ```
//!
//! A directory entry with an offset or size of zero is a marker (for example
//! `S_START`) and never resolves to data.

pub use crate::error::*;
pub use crate::lumps::*;
pub use crate::wad::*;

mod error;

/// Lump names and directory entries
pub mod lumps;

/// The WAD structure and parser
pub mod wad;
