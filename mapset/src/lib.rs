//! RTL/RTC map set loading.
//!
//! A map set is a fixed directory of 100 map slots, each pointing at three
//! RLEW compressed planes that decompress to 128x128 grids of 16-bit tiles.
//!
//! ```text,ignore
//!   0x000  magic    "RTL\0" "RTC\0" "RTR\0" "RXL\0" "RXC\0"
//!   0x004  version  0x0101 or 0x0200
//!   0x008  100 x 64 byte MapDescriptor
//!   ....   compressed planes, located by each descriptor
//! ```

pub use crate::error::*;
pub use crate::format::*;
pub use crate::loader::*;

mod error;
mod format;
mod loader;
