use std::io::Write;

use crate::error::{BitmapError, BitmapResult, Section};

pub const PALETTE_ENTRIES: usize = 256;
pub const PALETTE_SIZE: u32 = (PALETTE_ENTRIES * 4) as u32;

/// A linear grayscale ramp: entry `i` is blue, green and red all set to `i`, followed by a zero byte.
pub fn grayscale() -> [u8; PALETTE_SIZE as usize] {
    let mut palette = [0; PALETTE_SIZE as usize];

    for (index, entry) in palette.chunks_exact_mut(4).enumerate() {
        let level = index as u8;
        entry.copy_from_slice(&[level, level, level, 0]);
    }

    palette
}

pub fn write_grayscale<W>(writer: &mut W) -> BitmapResult<()>
where
    W: Write + ?Sized,
{
    writer
        .write_all(&grayscale())
        .map_err(BitmapError::io(Section::Palette))
}
