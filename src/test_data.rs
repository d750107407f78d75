// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Builds synthetic lighting info tags for the unit tests.

use std::io::Cursor;

use binrw::{BinWrite, Endian, binwrite};

use crate::cursor::ByteCursor;
use crate::definition::{DEFINITION_SIZE, LightDefinition};
use crate::preamble::PREAMBLE_OFFSET;

#[binwrite]
#[derive(Debug, Clone, Default)]
pub(crate) struct DefinitionRecord {
    pub light_type: u32,
    pub flags: u32,
    pub shape: u32,
    pub color: [f32; 3],
    pub intensity: f32,
    pub hotspot_size: f32,
    pub hotspot_cutoff_size: f32,
    pub hotspot_falloff_speed: f32,
    pub near_attenuation_bounds: [f32; 2],
    pub far_attenuation_bounds: [f32; 2],
    pub aspect: f32,
    pub clipping_planes: [u32; 5],
}

impl DefinitionRecord {
    pub fn omni(color: [f32; 3], intensity: f32) -> Self {
        Self {
            color,
            intensity,
            ..Default::default()
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_options(&mut cursor, Endian::Little, ()).unwrap();
        cursor.into_inner()
    }

    pub fn decode(&self) -> LightDefinition {
        let data = self.to_bytes();
        ByteCursor::new(&data).read_record(DEFINITION_SIZE).unwrap()
    }
}

#[binwrite]
#[derive(Debug, Clone)]
pub(crate) struct InstanceRecord {
    pub definition_index: u32,
    pub shader_reference_index: u32,
    pub origin: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
    pub bungie_light_type: u16,
    pub padding1: [u8; 2],
    pub screen_space_specular: u32,
    pub bounce_light_control: f32,
    pub light_volume_distance: f32,
    pub fade_out_distance: f32,
    pub fade_start_distance: f32,
    pub padding2: [u8; 64],
}

impl Default for InstanceRecord {
    fn default() -> Self {
        Self {
            definition_index: 0,
            shader_reference_index: 0,
            origin: [0.0; 3],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            bungie_light_type: 0,
            padding1: [0; 2],
            screen_space_specular: 0,
            bounce_light_control: 0.0,
            light_volume_distance: 0.0,
            fade_out_distance: 0.0,
            fade_start_distance: 0.0,
            padding2: [0; 64],
        }
    }
}

impl InstanceRecord {
    /// An instance of the first definition, facing down -Z with +Y up.
    pub fn at(origin: [f32; 3]) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_options(&mut cursor, Endian::Little, ()).unwrap();
        cursor.into_inner()
    }
}

#[derive(Default)]
pub(crate) struct TagBuilder {
    preamble_lengths: [u32; 12],
    definitions: Vec<DefinitionRecord>,
    instances: Vec<InstanceRecord>,
}

impl TagBuilder {
    /// Sets the sizes of the 12 length-prefixed header blocks.
    pub fn preamble_lengths(mut self, lengths: [u32; 12]) -> Self {
        self.preamble_lengths = lengths;
        self
    }

    pub fn definition(mut self, record: DefinitionRecord) -> Self {
        self.definitions.push(record);
        self
    }

    pub fn instance(mut self, record: InstanceRecord) -> Self {
        self.instances.push(record);
        self
    }

    pub fn preamble(&self) -> Vec<u8> {
        let mut data = vec![0u8; PREAMBLE_OFFSET as usize];

        for (i, length) in self.preamble_lengths.iter().enumerate() {
            if i > 0 {
                data.extend_from_slice(&[0x11; 8]);
            }
            data.extend_from_slice(&length.to_le_bytes());
            data.extend(std::iter::repeat(0x22).take(*length as usize));
        }

        data.extend_from_slice(&[0x33; 132]);
        data
    }

    pub fn definition_table(&self) -> Vec<u8> {
        let mut data = (self.definitions.len() as u32).to_le_bytes().to_vec();
        for record in &self.definitions {
            data.extend(record.to_bytes());
        }
        data.extend_from_slice(&[0u8; 16]);
        data
    }

    pub fn instance_table(&self) -> Vec<u8> {
        let mut data = (self.instances.len() as u32).to_le_bytes().to_vec();
        data.extend_from_slice(&[0u8; 4]);
        for record in &self.instances {
            data.extend(record.to_bytes());
        }
        data
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = self.preamble();
        data.extend(self.definition_table());
        data.extend(self.instance_table());
        data
    }
}

#[test]
fn record_sizes() {
    use crate::instance::INSTANCE_SIZE;

    assert_eq!(
        DefinitionRecord::default().to_bytes().len() as u64,
        DEFINITION_SIZE
    );
    assert_eq!(
        InstanceRecord::default().to_bytes().len() as u64,
        INSTANCE_SIZE
    );
}
