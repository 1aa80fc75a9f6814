//! Bitmap decoding for bmpedit.
//!
//! This module provides functionality for:
//! - Probing the fixed-offset header fields of a bitmap
//! - Decoding uncompressed 24-bit and 32-bit bitmaps into an [`Image`]
//!
//! # Validation
//!
//! A bitmap is only accepted when the file size declared in its header equals
//! `pixel_offset + (scanline + padding) * height`. Anything else (truncated,
//! corrupt, compressed or palette files) is rejected as a whole; the decoder
//! never returns a partial image.
//!
//! # Examples
//!
//! ```ignore
//! use bmpedit_core::decode::read_bmp;
//!
//! let image = read_bmp("photo.bmp")?;
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```
//!
//! [`Image`]: crate::Image

mod bmp;
mod types;

pub use bmp::{decode_bmp, read_bmp, read_header};
pub use types::{
    BitmapHeader, DecodeError, FILE_HEADER_SIZE, INFO_HEADER_SIZE, MAGIC, MIN_HEADER_BYTES,
};
