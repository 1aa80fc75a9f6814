//! 24-bit uncompressed bitmap encoding.
//!
//! The encoder always writes a 14-byte file header, a 40-byte
//! BITMAPINFOHEADER and a bottom-up pixel array of blue, green, red triples,
//! whatever depth the image was decoded from.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{FILE_HEADER_SIZE, INFO_HEADER_SIZE};
use crate::pixel::Image;

/// Print resolution written to both axes (2835 pixels per metre, about 72 DPI).
const PIXELS_PER_METRE: u32 = 2835;

/// Errors that can occur during bitmap encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    DegenerateImage { width: usize, height: usize },

    /// Dimensions or file size don't fit the 32-bit header fields
    #[error("Dimensions too large for a bitmap: {width}x{height}")]
    DimensionsTooLarge { width: usize, height: usize },

    /// The output file could not be created
    #[error("Failed to open {} for writing: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sizes derived from the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    width: u32,
    height: u32,
    padding: usize,
    array_bytes: u32,
    file_size: u32,
}

impl Layout {
    fn for_image(image: &Image) -> Result<Self, EncodeError> {
        Self::for_dimensions(image.width(), image.height())
    }

    fn for_dimensions(w: usize, h: usize) -> Result<Self, EncodeError> {
        if w == 0 || h == 0 {
            return Err(EncodeError::DegenerateImage {
                width: w,
                height: h,
            });
        }

        let too_large = || EncodeError::DimensionsTooLarge {
            width: w,
            height: h,
        };

        // Width and height are stored as signed 32-bit values by other readers.
        let width = u32::try_from(w)
            .ok()
            .filter(|&v| v <= i32::MAX as u32)
            .ok_or_else(too_large)?;
        let height = u32::try_from(h)
            .ok()
            .filter(|&v| v <= i32::MAX as u32)
            .ok_or_else(too_large)?;

        let width_bytes = u64::from(width) * 3;
        let padding = (4 - width_bytes % 4) % 4;
        let array_bytes = (width_bytes + padding)
            .checked_mul(u64::from(height))
            .ok_or_else(too_large)?;
        let file_size = array_bytes + u64::from(FILE_HEADER_SIZE + INFO_HEADER_SIZE);

        Ok(Self {
            width,
            height,
            padding: padding as usize,
            array_bytes: u32::try_from(array_bytes).map_err(|_| too_large())?,
            file_size: u32::try_from(file_size).map_err(|_| too_large())?,
        })
    }
}

/// Check that a `width` x `height` image can be encoded, without allocating it.
///
/// # Errors
///
/// The same dimension errors as [`encode_bmp`].
pub fn check_dimensions(width: usize, height: usize) -> Result<(), EncodeError> {
    Layout::for_dimensions(width, height).map(drop)
}

fn write_headers(out: &mut Vec<u8>, layout: &Layout) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&layout.file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(FILE_HEADER_SIZE + INFO_HEADER_SIZE).to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&layout.width.to_le_bytes());
    out.extend_from_slice(&layout.height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // compression (BI_RGB)
    out.extend_from_slice(&layout.array_bytes.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors in palette
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

/// Encode an image to 24-bit bitmap bytes.
///
/// # Errors
///
/// * `EncodeError::DegenerateImage` if the image has no rows or zero-width rows
/// * `EncodeError::DimensionsTooLarge` if the sizes don't fit the header fields
pub fn encode_bmp(image: &Image) -> Result<Vec<u8>, EncodeError> {
    let layout = Layout::for_image(image)?;
    log::debug!(
        "encoding {}x{} bitmap: {} pixel bytes, {} total",
        layout.width,
        layout.height,
        layout.array_bytes,
        layout.file_size
    );

    let mut out = Vec::with_capacity(layout.file_size as usize);
    write_headers(&mut out, &layout);

    for row in image.rows().rev() {
        for pixel in row {
            out.extend_from_slice(&[pixel.blue, pixel.green, pixel.red]);
        }
        out.resize(out.len() + layout.padding, 0);
    }

    debug_assert_eq!(out.len(), layout.file_size as usize);
    Ok(out)
}

/// Encode an image and write it to `path`.
///
/// The image is validated before the file is created, so a degenerate image
/// never leaves an empty file behind.
///
/// # Errors
///
/// Returns the errors of [`encode_bmp`], plus `EncodeError::Open` if the file
/// can't be created and `EncodeError::Write` if writing fails.
pub fn write_bmp(path: impl AsRef<Path>, image: &Image) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_bmp(image)?;

    let file = File::create(path).map_err(|source| EncodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|source| EncodeError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
