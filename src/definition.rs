// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binread;
use tracing::{debug, warn};

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Size of one definition record in the reference table.
pub const DEFINITION_SIZE: u64 = 80;

/// Padding after the last definition record.
const DEFINITION_TABLE_PADDING: u64 = 16;

/// Intensity is stored in a different unit than most renderers expect, multiply it by this to get light energy.
pub const INTENSITY_SCALE: f32 = 10.0;

/// The kind of light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LightType {
    Omni,
    Spot,
    Directional,
    /// A type code this crate doesn't know about, kept as-is.
    Unknown(u32),
}

impl From<u32> for LightType {
    fn from(code: u32) -> Self {
        match code {
            0 => LightType::Omni,
            1 => LightType::Spot,
            2 => LightType::Directional,
            _ => LightType::Unknown(code),
        }
    }
}

/// The shape of the light's projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LightShape {
    Rectangle,
    Circle,
    Unknown(u32),
}

impl From<u32> for LightShape {
    fn from(code: u32) -> Self {
        match code {
            0 => LightShape::Rectangle,
            1 => LightShape::Circle,
            _ => LightShape::Unknown(code),
        }
    }
}

/// What kind of light a renderer should create for a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLightKind {
    Point,
    Spot,
    /// An infinitely far away light, like the sun.
    Sun,
}

/// A light definition, shared between any number of light instances.
///
/// Instances refer to definitions by their position in the reference table.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[br(little)]
pub struct LightDefinition {
    #[br(map = |code: u32| LightType::from(code))]
    pub light_type: LightType,
    /// Opaque bitmask, passed through untouched.
    pub flags: u32,
    #[br(map = |code: u32| LightShape::from(code))]
    pub shape: LightShape,
    /// Linear RGB, usually in the 0-1 range.
    pub color: [f32; 3],
    pub intensity: f32,

    // these three only matter for spot lights
    pub hotspot_size: f32,
    pub hotspot_cutoff_size: f32,
    pub hotspot_falloff_speed: f32,

    pub near_attenuation_bounds: [f32; 2],
    pub far_attenuation_bounds: [f32; 2],
    pub aspect: f32,
    pub clipping_planes: [u32; 5],
}

impl LightDefinition {
    /// The closest renderer light kind. Unknown types fall back to a point light.
    pub fn target_kind(&self) -> TargetLightKind {
        match self.light_type {
            LightType::Omni => TargetLightKind::Point,
            LightType::Spot => TargetLightKind::Spot,
            LightType::Directional => TargetLightKind::Sun,
            LightType::Unknown(_) => TargetLightKind::Point,
        }
    }

    /// Intensity converted to renderer light energy.
    pub fn energy(&self) -> f32 {
        self.intensity * INTENSITY_SCALE
    }
}

/// Name for the light data a renderer creates for the definition at `definition_index`.
pub fn light_data_name(definition_index: usize) -> String {
    format!("LightData_{definition_index}")
}

/// Reads the reference table, the cursor has to be positioned right after the header.
pub fn decode_definitions(cursor: &mut ByteCursor) -> Result<Vec<LightDefinition>> {
    let count = cursor.read_u32()?;
    debug!(count, position = cursor.position(), "Reading light definitions");

    // don't trust the count for the allocation, the table might be cut short
    let capacity = (count as u64).min(cursor.remaining() / DEFINITION_SIZE);
    let mut definitions = Vec::with_capacity(capacity as usize);

    for index in 0..count {
        let definition: LightDefinition = cursor.read_record(DEFINITION_SIZE)?;

        if let LightType::Unknown(code) = definition.light_type {
            warn!(index, code, "Unknown light type");
        }
        if let LightShape::Unknown(code) = definition.shape {
            warn!(index, code, "Unknown light shape");
        }

        definitions.push(definition);
    }

    cursor.skip(DEFINITION_TABLE_PADDING)?;

    Ok(definitions)
}
