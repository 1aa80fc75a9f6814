//! Core types for bitmap decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Size of the file header (magic, file size, reserved, pixel offset).
pub const FILE_HEADER_SIZE: u32 = 14;

/// Size of the BITMAPINFOHEADER written by the encoder.
pub const INFO_HEADER_SIZE: u32 = 40;

/// Number of leading bytes needed to read every header field the decoder uses.
pub const MIN_HEADER_BYTES: usize = 30;

/// Magic bytes at the start of every bitmap file.
pub const MAGIC: [u8; 2] = *b"BM";

/// Error types for bitmap decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input file could not be opened or read.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes are available than the headers or pixel array require.
    #[error("Truncated bitmap: need {needed} bytes, got {actual}")]
    Truncated { needed: u64, actual: u64 },

    /// The file does not start with `BM`.
    #[error("Invalid bitmap magic: {0:02x?}")]
    InvalidMagic([u8; 2]),

    /// Only 24-bit and 32-bit uncompressed pixels are supported.
    #[error("Unsupported bit depth: {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    /// The declared file size disagrees with the size computed from the header.
    #[error("File size mismatch: header declares {declared} bytes, layout requires {computed}")]
    SizeMismatch { declared: u64, computed: u64 },
}

impl DecodeError {
    /// True for every error caused by the file contents rather than the filesystem.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, DecodeError::Open { .. })
    }
}

/// Header fields read from fixed offsets of a bitmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Magic id (offset 0).
    pub magic: [u8; 2],
    /// Declared total file size (offset 2).
    pub file_size: u32,
    /// Start of the pixel array (offset 10).
    pub pixel_offset: u32,
    /// Width in pixels (offset 18).
    pub width: u32,
    /// Height in pixels (offset 22).
    pub height: u32,
    /// Bits per pixel (offset 28).
    pub bits_per_pixel: u16,
}

impl BitmapHeader {
    /// Bytes consumed per pixel in the pixel array.
    #[inline]
    pub fn bytes_per_pixel(&self) -> u64 {
        u64::from(self.bits_per_pixel / 8)
    }

    /// Unpadded length of one scanline.
    #[inline]
    pub fn scanline_size(&self) -> u64 {
        u64::from(self.width) * self.bytes_per_pixel()
    }

    /// Zero bytes appended to each scanline to reach a multiple of 4.
    #[inline]
    pub fn padding(&self) -> u64 {
        (4 - self.scanline_size() % 4) % 4
    }

    /// Stored length of one scanline including padding.
    #[inline]
    pub fn row_stride(&self) -> u64 {
        self.scanline_size() + self.padding()
    }

    /// Length of the pixel array.
    pub fn pixel_array_size(&self) -> u64 {
        self.row_stride().saturating_mul(u64::from(self.height))
    }

    /// File size implied by the pixel offset and the pixel array layout.
    pub fn computed_file_size(&self) -> u64 {
        u64::from(self.pixel_offset).saturating_add(self.pixel_array_size())
    }

    /// Whether the declared file size matches the computed layout.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.file_size) == self.computed_file_size()
    }
}
