//! RLEW: run-length encoding over 16-bit words, as used for the map planes
//! of RTL/RTC map sets.
//!
//! A compressed stream is a sequence of words. Any word equal to the *tag*
//! starts a run and is followed by two more words, the run length and the
//! value to repeat:
//!
//! ```text,ignore
//!   ┌─────┬────────┬───────┐
//!   │ tag │ length │ value │   -> value repeated length times
//!   └─────┴────────┴───────┘
//!   ┌───────┐
//!   │ value │                  -> value, verbatim
//!   └───────┘
//! ```
//!
//! The tag is not stored in the stream. It belongs to whoever owns the stream
//! (each map in a map set carries its own) and the same tag must be given to
//! both [`compress`] and [`decompress`].

use byteorder::{ByteOrder, LittleEndian};
use log::warn;
use thiserror::Error;

/// Runs longer than this are always written as a tagged triple
pub const MAX_VERBATIM_RUN: usize = 3;

/// The largest run a single triple can describe
pub const MAX_RUN_LENGTH: usize = u16::MAX as usize;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RlewError {
    /// The run length word is 16 bits wide. Longer runs are not split.
    #[error("Run of {length} words at offset {offset} exceeds {MAX_RUN_LENGTH}")]
    RunTooLong { offset: usize, length: usize },
}

pub type Result<T> = std::result::Result<T, RlewError>;

/// Compress `src` with `tag`.
///
/// Each run of equal words is written as `[tag, length, value]` when it is
/// longer than three words or when the value *is* the tag, and verbatim
/// otherwise. The second condition is what keeps a lone tag value in the
/// source from being read back as the start of a run.
///
/// Every run must be shorter than 65536 words, `RunTooLong` otherwise.
/// A 128x128 plane can't produce such a run.
pub fn compress(src: &[u16], tag: u16) -> Result<Vec<u16>> {
    let mut dest = Vec::with_capacity(src.len() + 3);

    let mut read = 0;
    while read < src.len() {
        let value = src[read];
        let count = src[read..].iter().take_while(|w| **w == value).count();
        if count > MAX_RUN_LENGTH {
            return Err(RlewError::RunTooLong {
                offset: read,
                length: count,
            });
        }

        if count > MAX_VERBATIM_RUN || value == tag {
            dest.extend_from_slice(&[tag, count as u16, value]);
        } else {
            dest.extend(std::iter::repeat_n(value, count));
        }
        read += count;
    }

    Ok(dest)
}

/// Decompress `src` with `tag` in to `dest`, returning the number of words
/// written.
///
/// Stops once `dest` is full or `src` runs out, whichever comes first. A run
/// that would overflow `dest` is cut short. A tag with its length or value
/// missing from the end of `src` is dropped.
///
/// No validation is done beyond that: a damaged stream decodes to whatever
/// the tag protocol makes of it.
pub fn decompress_into(src: &[u16], tag: u16, dest: &mut [u16]) -> usize {
    let mut words = src.iter().copied();
    let mut written = 0;

    while written < dest.len() {
        let Some(test) = words.next() else {
            break;
        };

        if test == tag {
            let (Some(len), Some(value)) = (words.next(), words.next()) else {
                break;
            };
            let end = (written + len as usize).min(dest.len());
            dest[written..end].fill(value);
            written = end;
        } else {
            dest[written] = test;
            written += 1;
        }
    }

    written
}

/// Decompress `src` with `tag`, producing at most `expected_len` **bytes**
/// (`expected_len / 2` words).
///
/// The result is shorter than that only if `src` ran out first.
pub fn decompress(src: &[u16], tag: u16, expected_len: usize) -> Vec<u16> {
    let mut dest = vec![0u16; expected_len / 2];
    let written = decompress_into(src, tag, &mut dest);
    if written < dest.len() {
        warn!(
            "RLEW stream ended after {} of {} bytes",
            written * 2,
            expected_len
        );
        dest.truncate(written);
    }
    dest
}

/// Decode little-endian words from disk. A trailing odd byte is ignored.
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u16> {
    let mut words = vec![0u16; bytes.len() / 2];
    LittleEndian::read_u16_into(&bytes[..words.len() * 2], &mut words);
    words
}

/// Encode words as little-endian bytes, the on-disk layout
pub fn words_to_le_bytes(words: &[u16]) -> Vec<u8> {
    let mut bytes = vec![0u8; words.len() * 2];
    LittleEndian::write_u16_into(words, &mut bytes);
    bytes
}
