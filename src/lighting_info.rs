// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cursor::ByteCursor;
use crate::definition::{LightDefinition, decode_definitions};
use crate::error::{Error, Result};
use crate::instance::decode_instances;
use crate::preamble::skip_preamble;
use crate::transform::{ResolvedInstance, resolve};
use crate::{ByteSpan, ReadableFile};

/// Extension of lighting info tags, without the leading dot.
pub const FILE_EXTENSION: &str = "scenario_structure_lighting_info";

/// Lighting info tag, usually with the `.scenario_structure_lighting_info` file extension.
///
/// Contains the light definitions of a structure, and every light placed with them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LightingInfo {
    /// Shared light definitions, in file order. Their index is what instances refer to.
    pub definitions: Vec<LightDefinition>,
    /// Every placed light, in file order.
    pub instances: Vec<ResolvedInstance>,
}

impl ReadableFile for LightingInfo {
    fn from_existing(buffer: ByteSpan) -> Result<Self> {
        let mut cursor = ByteCursor::new(buffer);

        skip_preamble(&mut cursor)?;

        let definitions = decode_definitions(&mut cursor)?;
        let instances = decode_instances(&mut cursor, &definitions)?
            .into_iter()
            .enumerate()
            .map(|(index, instance)| resolve(index, instance))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            definitions = definitions.len(),
            instances = instances.len(),
            unread = cursor.remaining(),
            "Decoded lighting info"
        );

        Ok(LightingInfo {
            definitions,
            instances,
        })
    }
}

impl LightingInfo {
    /// Reads and decodes the tag at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, "Reading lighting info");

        let buffer = read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_existing(&buffer)
    }

    /// Looks up a definition by the index instances use to refer to it.
    pub fn definition(&self, index: u32) -> Option<&LightDefinition> {
        self.definitions.get(index as usize)
    }

    /// The definition `instance` uses.
    ///
    /// Always succeeds for instances of this tag, since dangling references are rejected while decoding.
    pub fn definition_for(&self, instance: &ResolvedInstance) -> Option<&LightDefinition> {
        self.definition(instance.instance.definition_index)
    }

    /// Every instance placing the definition at `definition_index`.
    pub fn instances_of(&self, definition_index: u32) -> impl Iterator<Item = &ResolvedInstance> {
        self.instances
            .iter()
            .filter(move |x| x.instance.definition_index == definition_index)
    }
}

/// Whether `path` has the lighting info extension.
pub fn is_lighting_info_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == FILE_EXTENSION)
}

/// Name for the collection a tag's lights are grouped under, which is the file name without the extension.
pub fn collection_name(path: &Path) -> Option<String> {
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Decodes several tags. A file failing to decode doesn't stop the rest, check each result.
pub fn decode_files<I, P>(paths: I) -> Vec<(PathBuf, Result<LightingInfo>)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let result = LightingInfo::from_path(&path);

            if let Err(err) = &result {
                warn!(?path, %err, "Failed to decode lighting info");
            }

            (path, result)
        })
        .collect()
}
