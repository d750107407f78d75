// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::error::{Error, Result};
use crate::instance::LightInstance;

/// Tag positions are in world units, multiply by this to get meters.
pub const POSITION_SCALE: f32 = 3.048;

/// Rotation about Y applied after the light's own basis.
const AXIS_CORRECTION_Y: f32 = PI;

/// Rotation about X applied after [`AXIS_CORRECTION_Y`].
const AXIS_CORRECTION_X: f32 = -FRAC_PI_2;

/// Forward and up closer than this (as the sine of the angle between them) are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A light instance with its world transform worked out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedInstance {
    /// The instance as it was read from the tag.
    pub instance: LightInstance,
    /// The scaled origin.
    pub world_position: Vec3,
    /// Orthonormal rotation from the light's local frame into world space.
    pub world_rotation: Mat3,
}

impl ResolvedInstance {
    /// The world rotation as a quaternion.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&self.world_rotation)
    }

    /// The full world matrix, rotating in local space and then translating.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.world_position) * Mat4::from_mat3(self.world_rotation)
    }
}

/// An orthonormal frame built from a forward and up vector.
#[derive(Debug, Clone, Copy)]
struct Basis {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl Basis {
    /// Gram-Schmidt style: up is recomputed so it's perpendicular to forward, even if the tag's isn't.
    fn new(forward: Vec3, up: Vec3) -> Option<Self> {
        let forward = forward.try_normalize()?;
        let up = up.try_normalize()?;

        let right = forward.cross(up);
        if right.length() < PARALLEL_EPSILON {
            return None;
        }
        let right = right.try_normalize()?;
        let up = right.cross(forward).try_normalize()?;

        Some(Self { right, up, forward })
    }

    /// Columns are right, up and backward, which is how the target engine expects a light to be oriented.
    fn to_mat3(self) -> Mat3 {
        Mat3::from_cols(self.right, self.up, -self.forward)
    }
}

fn axis_correction() -> Mat3 {
    Mat3::from_rotation_y(AXIS_CORRECTION_Y) * Mat3::from_rotation_x(AXIS_CORRECTION_X)
}

/// Works out the world position and rotation of `instance`.
///
/// `index` is only used for error reporting. Fails with [`Error::DegenerateBasis`] if the forward
/// or up vectors are zero, not finite or parallel to each other.
pub fn build_transform(index: usize, instance: &LightInstance) -> Result<(Vec3, Mat3)> {
    let world_position = Vec3::from_array(instance.origin) * POSITION_SCALE;

    let basis = Basis::new(
        Vec3::from_array(instance.forward),
        Vec3::from_array(instance.up),
    )
    .ok_or(Error::DegenerateBasis { instance: index })?;

    Ok((world_position, basis.to_mat3() * axis_correction()))
}

/// Same as [`build_transform`], but keeps the instance around.
pub fn resolve(index: usize, instance: LightInstance) -> Result<ResolvedInstance> {
    let (world_position, world_rotation) = build_transform(index, &instance)?;

    Ok(ResolvedInstance {
        instance,
        world_position,
        world_rotation,
    })
}
