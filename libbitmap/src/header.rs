//! The two fixed-size headers at the start of every bitmap file.
//!
//! Multi-byte fields are always written little-endian, whatever the host byte order is.

use std::io::Write;

use crate::{
    error::{BitmapError, BitmapResult, Section},
    palette::PALETTE_SIZE,
};

pub const SIGNATURE: [u8; 2] = *b"BM";

pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;

/// Offset of the first pixel byte, right after both headers and the palette.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

pub const COLOR_PLANES: u16 = 1;
pub const BITS_PER_PIXEL: u16 = 8;
pub const COMPRESSION_NONE: u32 = 0;

/// Rounds a row length up to the next multiple of 4 bytes.
pub fn padded_width(width: usize) -> usize {
    width + (4 - width % 4) % 4
}

/// Validated dimensions of an image, with every derived size the headers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub padded_width: usize,

    /// Size of the pixel data in bytes, padding included.
    pub image_size: u32,

    /// Size of the whole file in bytes.
    pub file_size: u32,
}

impl Layout {
    /// Checks that an image of `width` x `height` pixels fits the format.
    pub fn new(width: usize, height: usize) -> BitmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidArgument(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }

        let too_large = || {
            BitmapError::InvalidArgument(format!(
                "image dimensions {width}x{height} are too large for a bitmap"
            ))
        };

        let signed_width = i32::try_from(width).map_err(|_| too_large())?;
        let signed_height = i32::try_from(height).map_err(|_| too_large())?;

        let padded_width = padded_width(width);
        let image_size = (padded_width as u64)
            .checked_mul(height as u64)
            .and_then(|size| u32::try_from(size).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(PIXEL_DATA_OFFSET)
            .ok_or_else(too_large)?;

        Ok(Self {
            width: signed_width,
            height: signed_height,
            padded_width,
            image_size,
            file_size,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub file_size: u32,
    pub pixel_data_offset: u32,
}

impl FileHeader {
    pub fn new(layout: &Layout) -> Self {
        Self {
            file_size: layout.file_size,
            pixel_data_offset: PIXEL_DATA_OFFSET,
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE as usize] {
        let mut bytes = [0; FILE_HEADER_SIZE as usize];

        bytes[0..2].copy_from_slice(&SIGNATURE);
        bytes[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // Bytes 6..10 are the two reserved fields and stay zero.
        bytes[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());

        bytes
    }

    pub fn write_to<W>(&self, writer: &mut W) -> BitmapResult<()>
    where
        W: Write + ?Sized,
    {
        writer
            .write_all(&self.to_bytes())
            .map_err(BitmapError::io(Section::FileHeader))
    }
}

/// The 40 byte BITMAPINFOHEADER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub width: i32,

    /// Positive, meaning rows are stored bottom-up.
    pub height: i32,

    pub image_size: u32,
}

impl InfoHeader {
    pub fn new(layout: &Layout) -> Self {
        Self {
            width: layout.width,
            height: layout.height,
            image_size: layout.image_size,
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE as usize] {
        let mut bytes = [0; INFO_HEADER_SIZE as usize];

        bytes[0..4].copy_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.width.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_le_bytes());
        bytes[12..14].copy_from_slice(&COLOR_PLANES.to_le_bytes());
        bytes[14..16].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        bytes[16..20].copy_from_slice(&COMPRESSION_NONE.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        // Resolution, palette color count and important color count are all zero:
        // unspecified resolution, full 256 entry palette, every color important.

        bytes
    }

    pub fn write_to<W>(&self, writer: &mut W) -> BitmapResult<()>
    where
        W: Write + ?Sized,
    {
        writer
            .write_all(&self.to_bytes())
            .map_err(BitmapError::io(Section::InfoHeader))
    }
}
