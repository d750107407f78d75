// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binread;
use tracing::{debug, trace, warn};

use crate::cursor::ByteCursor;
use crate::definition::LightDefinition;
use crate::error::{Error, Result};

/// Size of one instance record, padding included.
pub const INSTANCE_SIZE: u64 = 132;

/// Padding between the instance count and the first instance record.
const INSTANCE_TABLE_PADDING: u64 = 4;

/// How the engine treats a placed light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BungieLightType {
    DefaultLightmapLight,
    UberLight,
    InlinedLight,
    ScreenSpaceLight,
    RerenderLights,
    Unknown(u16),
}

impl From<u16> for BungieLightType {
    fn from(code: u16) -> Self {
        match code {
            0 => BungieLightType::DefaultLightmapLight,
            1 => BungieLightType::UberLight,
            2 => BungieLightType::InlinedLight,
            3 => BungieLightType::ScreenSpaceLight,
            4 => BungieLightType::RerenderLights,
            _ => BungieLightType::Unknown(code),
        }
    }
}

/// A light placed in the level.
///
/// All vectors are still in file space, see [`crate::transform`] for getting a world transform.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[br(little)]
pub struct LightInstance {
    /// Index into the reference table, see [`LightInstance::definition`].
    pub definition_index: u32,
    pub shader_reference_index: u32,

    pub origin: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],

    #[br(map = |code: u16| BungieLightType::from(code))]
    #[br(pad_after = 2)]
    pub bungie_light_type: BungieLightType,

    pub screen_space_specular: u32,
    pub bounce_light_control: f32,
    pub light_volume_distance: f32,
    pub fade_out_distance: f32,
    #[br(pad_after = 64)]
    pub fade_start_distance: f32,
}

impl LightInstance {
    /// Looks up the definition this instance uses.
    pub fn definition<'a>(&self, definitions: &'a [LightDefinition]) -> Option<&'a LightDefinition> {
        definitions.get(self.definition_index as usize)
    }
}

/// Name for the object a renderer creates for the instance at `instance_index`.
pub fn light_object_name(instance_index: usize) -> String {
    format!("Light_{instance_index}")
}

/// Reads the instance table, which comes right after the reference table.
///
/// Every instance has to point at one of `definitions`, otherwise this fails with [`Error::DanglingReference`].
pub fn decode_instances(
    cursor: &mut ByteCursor,
    definitions: &[LightDefinition],
) -> Result<Vec<LightInstance>> {
    let count = cursor.read_u32()?;
    cursor.skip(INSTANCE_TABLE_PADDING)?;
    debug!(count, position = cursor.position(), "Reading light instances");

    let capacity = (count as u64).min(cursor.remaining() / INSTANCE_SIZE);
    let mut instances = Vec::with_capacity(capacity as usize);

    for index in 0..count as usize {
        let instance: LightInstance = cursor.read_record(INSTANCE_SIZE)?;

        if instance.definition(definitions).is_none() {
            return Err(Error::DanglingReference {
                instance: index,
                definition_index: instance.definition_index,
                definition_count: definitions.len(),
            });
        }

        if let BungieLightType::Unknown(code) = instance.bungie_light_type {
            warn!(index, code, "Unknown bungie light type");
        }

        trace!(index, definition = instance.definition_index, "Read light instance");

        instances.push(instance);
    }

    Ok(instances)
}
