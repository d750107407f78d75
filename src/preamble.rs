// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::trace;

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Where the variable-length part of the tag header starts.
pub const PREAMBLE_OFFSET: u64 = 184;

/// How many (8-byte field, length-prefixed block) pairs follow the first length-prefixed block.
pub const PREAMBLE_BLOCK_COUNT: usize = 11;

/// Size of the fixed field in front of every metadata block. Its contents are unused.
const BLOCK_FIELD_SIZE: u64 = 8;

/// The fixed region between the last metadata block and the reference table.
const PREAMBLE_TRAILER_SIZE: u64 = 132;

/// One step of walking over the tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreambleStep {
    /// Jump to an offset from the start of the file.
    SeekAbsolute(u64),
    /// Skip a fixed amount of bytes.
    Fixed(u64),
    /// Read a u32 length, then skip that many bytes.
    LengthPrefixed,
}

use PreambleStep::{Fixed, LengthPrefixed, SeekAbsolute};

/// The header layout of the only supported tag version.
pub const REACH_PREAMBLE: &[PreambleStep] = &[
    SeekAbsolute(PREAMBLE_OFFSET),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(BLOCK_FIELD_SIZE),
    LengthPrefixed,
    Fixed(PREAMBLE_TRAILER_SIZE),
];

/// Counts the metadata blocks in `steps`, and rejects anything not shaped like the supported header.
fn count_blocks(steps: &[PreambleStep]) -> Result<usize> {
    let unsupported = |reason: &str| Error::UnsupportedFormat {
        reason: reason.to_string(),
    };

    let body = match steps {
        [SeekAbsolute(_), LengthPrefixed, body @ .., Fixed(_)] => body,
        _ => {
            return Err(unsupported(
                "header must seek, skip one length-prefixed block and end with a fixed trailer",
            ));
        }
    };

    let mut blocks = 0;
    for pair in body.chunks(2) {
        match pair {
            [Fixed(BLOCK_FIELD_SIZE), LengthPrefixed] => blocks += 1,
            _ => return Err(unsupported("malformed metadata block in header")),
        }
    }

    Ok(blocks)
}

/// Walks `steps`, leaving the cursor at the start of the reference table.
///
/// The step list has to describe exactly [`PREAMBLE_BLOCK_COUNT`] metadata blocks, anything else
/// belongs to a different tag version and fails with [`Error::UnsupportedFormat`].
pub fn skip_preamble_with(cursor: &mut ByteCursor, steps: &[PreambleStep]) -> Result<()> {
    let blocks = count_blocks(steps)?;
    if blocks != PREAMBLE_BLOCK_COUNT {
        return Err(Error::UnsupportedFormat {
            reason: format!(
                "expected {PREAMBLE_BLOCK_COUNT} metadata blocks in the header, found {blocks}"
            ),
        });
    }

    for step in steps {
        match *step {
            SeekAbsolute(offset) => cursor.seek_absolute(offset)?,
            Fixed(size) => cursor.skip(size)?,
            LengthPrefixed => {
                let length = cursor.read_u32()?;
                cursor.skip(length as u64)?;
            }
        }

        trace!(?step, position = cursor.position(), "Skipped header step");
    }

    Ok(())
}

/// Skips the header of a supported lighting info tag.
pub fn skip_preamble(cursor: &mut ByteCursor) -> Result<()> {
    skip_preamble_with(cursor, REACH_PREAMBLE)
}
