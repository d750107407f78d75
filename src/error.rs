// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while decoding a lighting info tag.
///
/// All of these are terminal for the file being decoded, but never for a batch of files.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer ended before a read or skip could complete.
    #[error("unexpected end of data at offset {offset:#x} (need {needed} bytes, have {available})")]
    TruncatedInput {
        /// Where the read or skip started.
        offset: u64,
        /// How many bytes it needed.
        needed: u64,
        /// How many bytes were left.
        available: u64,
    },
    /// The file doesn't have the layout of the supported tag version.
    #[error("unsupported format: {reason}")]
    UnsupportedFormat {
        /// What didn't match.
        reason: String,
    },
    /// A light instance points at a definition that doesn't exist.
    #[error(
        "light instance {instance} references definition {definition_index}, but there are only {definition_count}"
    )]
    DanglingReference {
        /// Index of the offending instance.
        instance: usize,
        /// The definition index it tried to use.
        definition_index: u32,
        /// How many definitions were decoded.
        definition_count: usize,
    },
    /// The forward and up vectors of a light instance can't form a basis.
    #[error("light instance {instance} has a degenerate forward/up basis")]
    DegenerateBasis {
        /// Index of the offending instance.
        instance: usize,
    },
    /// The file couldn't be read from disk.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] binrw::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
