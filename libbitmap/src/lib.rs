//! Uncompressed 8-bit grayscale bitmap (BMP) encoding.
//!
//! Files are laid out as a 14 byte file header, a 40 byte information header, a 256 entry
//! grayscale palette and finally the pixel rows, bottom row first, each padded to a multiple
//! of 4 bytes. Only writing is supported.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, trace};

pub use error::{BitmapError, BitmapResult, Section};
pub use header::{FileHeader, InfoHeader, Layout, padded_width};

pub mod error;
pub mod header;
pub mod palette;

/// Value of the bytes that pad each pixel row up to its 4 byte boundary (white).
pub const PADDING_BYTE: u8 = 255;

/// An image made of palette indices, one byte per pixel.
pub trait IndexedImage {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// The pixels of row `y`, counting from the top. Must hold exactly `width()` bytes.
    fn row(&self, y: usize) -> &[u8];
}

/// Size in bytes of the file `write_bitmap` produces for an image of the given dimensions.
pub fn file_size(width: usize, height: usize) -> BitmapResult<u32> {
    Layout::new(width, height).map(|layout| layout.file_size)
}

/// Encodes `image` into `writer`.
///
/// The image is validated before anything is written. Once writing has started, the first
/// failed write aborts encoding and whatever was already written is left as is.
pub fn write_bitmap<W, I>(writer: &mut W, image: &I) -> BitmapResult<()>
where
    W: Write + ?Sized,
    I: IndexedImage + ?Sized,
{
    let layout = Layout::new(image.width(), image.height())?;
    check_rows(image)?;

    debug!(
        "Encoding {}x{} bitmap ({} bytes)",
        layout.width, layout.height, layout.file_size
    );

    FileHeader::new(&layout).write_to(writer)?;
    debug!("Wrote bitmap file header");

    InfoHeader::new(&layout).write_to(writer)?;
    debug!("Wrote bitmap information header");

    palette::write_grayscale(writer)?;
    debug!("Wrote color palette");

    write_pixel_rows(writer, image, &layout)?;
    debug!("Wrote pixel data");

    Ok(())
}

/// Creates (or truncates) the file at `path` and encodes `image` into it.
pub fn save_bitmap<P, I>(path: P, image: &I) -> BitmapResult<()>
where
    P: AsRef<Path>,
    I: IndexedImage + ?Sized,
{
    // Validate first so a bad image doesn't leave an empty file behind.
    Layout::new(image.width(), image.height())?;
    check_rows(image)?;

    let file = File::create(path).map_err(BitmapError::io(Section::Create))?;
    let mut writer = BufWriter::new(file);

    write_bitmap(&mut writer, image)?;

    writer.flush().map_err(BitmapError::io(Section::Flush))
}

fn check_rows<I>(image: &I) -> BitmapResult<()>
where
    I: IndexedImage + ?Sized,
{
    let width = image.width();

    for y in 0..image.height() {
        let row_len = image.row(y).len();
        if row_len != width {
            return Err(BitmapError::InvalidArgument(format!(
                "row {y} has {row_len} pixels, expected {width}"
            )));
        }
    }

    Ok(())
}

fn write_pixel_rows<W, I>(writer: &mut W, image: &I, layout: &Layout) -> BitmapResult<()>
where
    W: Write + ?Sized,
    I: IndexedImage + ?Sized,
{
    let width = image.width();
    let height = image.height();

    // The padding tail of the buffer is never overwritten, only the first `width` bytes.
    let mut row_buffer = vec![PADDING_BYTE; layout.padded_width];
    let mut last_milestone = 0;

    for (rows_written, y) in (0..height).rev().enumerate() {
        row_buffer[..width].copy_from_slice(image.row(y));

        writer
            .write_all(&row_buffer)
            .map_err(BitmapError::io(Section::PixelData))?;
        trace!("Wrote pixel row {y}");

        let milestone = (rows_written + 1) * 4 / height;
        if milestone > last_milestone && milestone < 4 {
            debug!("{}% of pixel rows written", milestone * 25);
            last_milestone = milestone;
        }
    }

    Ok(())
}
