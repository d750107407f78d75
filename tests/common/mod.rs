// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

/// Writes a minimal tag with one red omni light, placed once at `origin` facing down -Z.
pub fn single_light_tag(origin: [f32; 3]) -> Vec<u8> {
    let mut data = vec![0u8; 184];

    // 12 empty length-prefixed header blocks, all but the first behind an 8-byte field
    data.extend_from_slice(&0u32.to_le_bytes());
    for _ in 0..11 {
        data.extend_from_slice(&[0u8; 8]);
        data.extend_from_slice(&0u32.to_le_bytes());
    }
    data.extend_from_slice(&[0u8; 132]);

    // reference table
    data.extend_from_slice(&1u32.to_le_bytes());
    push_u32s(&mut data, &[0, 0, 0]); // type, flags, shape
    push_f32s(&mut data, &[1.0, 0.0, 0.0, 2.0]); // color, intensity
    push_f32s(&mut data, &[0.0; 8]); // hotspot, attenuation, aspect
    push_u32s(&mut data, &[0; 5]); // clipping planes
    data.extend_from_slice(&[0u8; 16]);

    // instance table
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&[0u8; 4]);
    push_u32s(&mut data, &[0, 0]); // definition, shader
    push_f32s(&mut data, &origin);
    push_f32s(&mut data, &[0.0, 0.0, -1.0]);
    push_f32s(&mut data, &[0.0, 1.0, 0.0]);
    data.extend_from_slice(&[0u8; 4]); // bungie light type + padding
    data.extend_from_slice(&[0u8; 20]);
    data.extend_from_slice(&[0u8; 64]);

    data
}

fn push_u32s(data: &mut Vec<u8>, values: &[u32]) {
    for value in values {
        data.extend_from_slice(&value.to_le_bytes());
    }
}

fn push_f32s(data: &mut Vec<u8>, values: &[f32]) {
    for value in values {
        data.extend_from_slice(&value.to_le_bytes());
    }
}

/// A fresh, empty directory for a test to write tags into.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("sslinfo-{}-{name}", std::process::id()));

    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();

    dir
}
