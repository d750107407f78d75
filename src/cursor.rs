// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Cursor;

use binrw::{BinRead, Endian};

use crate::ByteSpan;
use crate::error::{Error, Result};

/// Sequential little-endian reader over a tag buffer.
///
/// Every read and skip is bounds checked up front, so running off the end of the buffer is always
/// reported as [`Error::TruncatedInput`] instead of a partial read.
pub struct ByteCursor<'a> {
    cursor: Cursor<ByteSpan<'a>>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: ByteSpan<'a>) -> Self {
        Self {
            cursor: Cursor::new(buffer),
        }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Total length of the buffer.
    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the current offset and the end of the buffer.
    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(Error::TruncatedInput {
                offset: self.position(),
                needed,
                available,
            });
        }

        Ok(())
    }

    fn read_sized<T>(&mut self) -> Result<T>
    where
        T: BinRead,
        for<'b> T::Args<'b>: Default,
    {
        self.read_record(std::mem::size_of::<T>() as u64)
    }

    /// Reads a fixed-width record that takes up exactly `size` bytes in the file, padding included.
    pub fn read_record<T>(&mut self, size: u64) -> Result<T>
    where
        T: BinRead,
        for<'b> T::Args<'b>: Default,
    {
        self.ensure(size)?;

        let start = self.position();
        let value = T::read_options(&mut self.cursor, Endian::Little, Default::default())?;

        // binrw seeks over trailing padding, keep the offset pinned to the declared width
        self.cursor.set_position(start + size);

        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_sized()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_sized()
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_sized()
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.read_sized()
    }

    pub fn read_u32_array<const N: usize>(&mut self) -> Result<[u32; N]> {
        self.read_sized()
    }

    /// Moves forward `count` bytes without reading them.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.ensure(count)?;
        self.cursor.set_position(self.position() + count);

        Ok(())
    }

    /// Jumps to `offset` bytes from the start of the buffer.
    pub fn seek_absolute(&mut self, offset: u64) -> Result<()> {
        if offset > self.len() {
            return Err(Error::TruncatedInput {
                offset: 0,
                needed: offset,
                available: self.len(),
            });
        }

        self.cursor.set_position(offset);

        Ok(())
    }
}
