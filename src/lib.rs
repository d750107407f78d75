// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading light definitions and light instances out of Halo: Reach
//! `.scenario_structure_lighting_info` tags.

/// Represents a continuous block of memory which is not owned, and comes either from an in-memory location or from a file.
pub type ByteSpan<'a> = &'a [u8];

/// Errors produced while decoding lighting info tags.
pub mod error;
pub use error::{Error, Result};

/// Bounds-checked little-endian reading of tag buffers.
pub mod cursor;

/// Skipping the tag header to reach the light tables.
pub mod preamble;

/// Reading shared light definitions.
pub mod definition;

/// Reading placed light instances.
pub mod instance;

/// Building world transforms for light instances.
pub mod transform;

/// Reading whole lighting info tags (`.scenario_structure_lighting_info`).
pub mod lighting_info;
pub use lighting_info::{LightingInfo, decode_files};

#[cfg(test)]
mod test_data;

/// A tag file that can be decoded from a byte buffer.
pub trait ReadableFile: Sized {
    /// Decodes an existing file from `buffer`.
    fn from_existing(buffer: ByteSpan) -> Result<Self>;
}

/// Feeds pseudo-random garbage into `T`, which must not panic.
#[cfg(test)]
fn pass_random_invalid<T: ReadableFile>() {
    // xorshift, so the garbage is the same on every run
    let mut state = 0x2545F491u32;
    let random: Vec<u8> = (0..4096)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();

    for length in [0, 3, 183, 184, 512, random.len()] {
        // Feeding it invalid data should not panic
        let _ = T::from_existing(&random[..length]);
    }
}
