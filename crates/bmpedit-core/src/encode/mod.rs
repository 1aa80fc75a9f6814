//! Bitmap encoding for bmpedit.
//!
//! This module provides functionality for:
//! - Encoding an [`Image`] to 24-bit uncompressed bitmap bytes
//! - Writing the encoded bytes to a file
//!
//! Output is always 24 bits per pixel with a 40-byte info header, so decoding
//! a 32-bit file and encoding it again drops the alpha channel.
//!
//! # Examples
//!
//! ```ignore
//! use bmpedit_core::encode::encode_bmp;
//! use bmpedit_core::{Image, Pixel};
//!
//! let image = Image::filled(100, 100, Pixel::gray(128));
//! let bmp = encode_bmp(&image).unwrap();
//! assert_eq!(&bmp[0..2], b"BM");
//! ```
//!
//! [`Image`]: crate::Image

mod bmp;

pub use bmp::{check_dimensions, encode_bmp, write_bmp, EncodeError};
