//! bmpedit Core - Bitmap codec and pixel filters
//!
//! This crate provides the core functionality for bmpedit: an in-memory
//! image model, a 24/32-bit BMP decoder, a 24-bit BMP encoder, and the ten
//! editor filters (colour adjustments and geometric transforms).
//!
//! Everything here is pure computation over [`Image`] values apart from the
//! file helpers [`read_bmp`] and [`write_bmp`].

pub mod adjustments;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod pixel;
pub mod transform;
pub mod validate;

pub use decode::{decode_bmp, read_bmp, read_header, BitmapHeader, DecodeError};
pub use encode::{encode_bmp, write_bmp, EncodeError};
pub use filter::{Filter, FilterError, FilterKind, ParameterSpec};
pub use pixel::{Image, ImageError, Pixel};
pub use transform::{enlarge, rotate, rotate_90};
pub use validate::InvalidInputError;

/// Decode a bitmap, apply one filter and encode the result.
///
/// This is the in-memory form of a single editor step: the input bytes are
/// never modified and the returned buffer is always a 24-bit BMP.
pub fn apply_to_bmp(bytes: &[u8], filter: &Filter) -> Result<Vec<u8>, ProcessError> {
    let image = decode_bmp(bytes)?;
    let filtered = filter.apply(&image)?;
    Ok(encode_bmp(&filtered)?)
}

/// Any failure along the decode, filter, encode path.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
