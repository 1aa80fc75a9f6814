//! Uncompressed 24-bit and 32-bit bitmap decoding.
//!
//! The pixel array is stored bottom row first, each pixel in blue, green, red
//! (, alpha) order, with every row padded to a multiple of 4 bytes. The decoder
//! flips rows so the returned [`Image`] always has row 0 at the top.

use std::path::Path;

use super::types::{BitmapHeader, DecodeError, MAGIC, MIN_HEADER_BYTES};
use crate::pixel::{Image, Pixel};

/// Read a little-endian unsigned integer of `N` bytes at `offset`.
///
/// Callers must ensure `offset + N <= bytes.len()`.
#[inline]
fn read_le<const N: usize>(bytes: &[u8], offset: usize) -> u32 {
    bytes[offset..offset + N]
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Parse the header fields of a bitmap without decoding pixels.
///
/// Only checks that enough bytes are present to read the fields; use
/// [`decode_bmp`] for full validation.
pub fn read_header(bytes: &[u8]) -> Result<BitmapHeader, DecodeError> {
    if bytes.len() < MIN_HEADER_BYTES {
        return Err(DecodeError::Truncated {
            needed: MIN_HEADER_BYTES as u64,
            actual: bytes.len() as u64,
        });
    }

    Ok(BitmapHeader {
        magic: [bytes[0], bytes[1]],
        file_size: read_le::<4>(bytes, 2),
        pixel_offset: read_le::<4>(bytes, 10),
        width: read_le::<4>(bytes, 18),
        height: read_le::<4>(bytes, 22),
        bits_per_pixel: read_le::<2>(bytes, 28) as u16,
    })
}

/// Decode a bitmap held in memory.
///
/// # Errors
///
/// * `DecodeError::Truncated` if the headers or the declared pixel array are cut short
/// * `DecodeError::InvalidMagic` if the data doesn't start with `BM`
/// * `DecodeError::UnsupportedBitDepth` for anything but 24 or 32 bits per pixel
/// * `DecodeError::SizeMismatch` if the declared file size disagrees with
///   `pixel_offset + (padded scanline) * height`
///
/// No partial image is ever returned.
pub fn decode_bmp(bytes: &[u8]) -> Result<Image, DecodeError> {
    let header = read_header(bytes)?;
    log::debug!(
        "bitmap header: {}x{} {} bpp, offset {}, declared size {}",
        header.width,
        header.height,
        header.bits_per_pixel,
        header.pixel_offset,
        header.file_size
    );

    if header.magic != MAGIC {
        return Err(DecodeError::InvalidMagic(header.magic));
    }

    if !matches!(header.bits_per_pixel, 24 | 32) {
        return Err(DecodeError::UnsupportedBitDepth(header.bits_per_pixel));
    }

    let declared = u64::from(header.file_size);
    let computed = header.computed_file_size();
    if declared != computed {
        return Err(DecodeError::SizeMismatch { declared, computed });
    }

    if (bytes.len() as u64) < declared {
        return Err(DecodeError::Truncated {
            needed: declared,
            actual: bytes.len() as u64,
        });
    }

    let width = header.width as usize;
    let height = header.height as usize;
    if width == 0 || height == 0 {
        return Ok(Image::default());
    }

    if header.bits_per_pixel == 32 {
        log::debug!("discarding alpha channel of 32-bit bitmap");
    }

    let bpp = header.bytes_per_pixel() as usize;
    let stride = header.row_stride() as usize;
    let start = header.pixel_offset as usize;
    let array = &bytes[start..start + stride * height];

    let mut pixels = vec![Pixel::default(); width * height];
    // Scanlines are stored bottom-up: the first one in the file is the last image row.
    for (stored, scanline) in array.chunks_exact(stride).enumerate() {
        let row = height - 1 - stored;
        let dst = &mut pixels[row * width..(row + 1) * width];
        for (pixel, bgr) in dst.iter_mut().zip(scanline.chunks_exact(bpp)) {
            *pixel = Pixel::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    Image::new(width, height, pixels).map_err(|_| DecodeError::Truncated {
        needed: declared,
        actual: bytes.len() as u64,
    })
}

/// Read and decode a bitmap file.
///
/// The file handle is scoped to this call.
///
/// # Errors
///
/// Returns `DecodeError::Open` if the file can't be read, otherwise the same
/// errors as [`decode_bmp`].
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Image, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_bmp(&bytes)
}
