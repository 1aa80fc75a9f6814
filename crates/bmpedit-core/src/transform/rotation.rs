//! Lossless rotation by multiples of 90 degrees.
//!
//! A quarter turn clockwise maps source pixel `(row, col)` of an `R x C`
//! grid to `(col, R - 1 - row)` of a `C x R` grid. No pixel values change.
//!
//! # Algorithm
//!
//! Rather than composing quarter turns, each output pixel is read straight
//! from its source position using the inverse mapping for the reduced turn
//! count `n % 4`:
//! ```text
//! 1 turn:  dst(r, c) = src(R - 1 - c, r)
//! 2 turns: dst(r, c) = src(R - 1 - r, C - 1 - c)
//! 3 turns: dst(r, c) = src(c, C - 1 - r)
//! ```

use std::borrow::Cow;

use crate::pixel::Image;

/// Rotate an image clockwise by `turns` quarter turns.
///
/// Turns are taken modulo 4. When no rotation remains the input is returned
/// borrowed, without copying.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `turns` - Number of 90 degree clockwise rotations
///
/// # Returns
///
/// An `R x C` image for an even number of turns, `C x R` for an odd number.
///
/// # Example
///
/// ```ignore
/// use bmpedit_core::transform::rotate;
///
/// let rotated = rotate(&image, 3);
/// assert_eq!(rotated.size(), (image.width(), image.height()));
/// ```
pub fn rotate(image: &Image, turns: u32) -> Cow<'_, Image> {
    let (rows, cols) = image.size();
    match turns % 4 {
        0 => Cow::Borrowed(image),
        1 => Cow::Owned(Image::from_fn(rows, cols, |r, c| image.pixel(rows - 1 - c, r))),
        2 => Cow::Owned(Image::from_fn(cols, rows, |r, c| {
            image.pixel(rows - 1 - r, cols - 1 - c)
        })),
        _ => Cow::Owned(Image::from_fn(rows, cols, |r, c| image.pixel(c, cols - 1 - r))),
    }
}

/// Rotate an image a single quarter turn clockwise.
pub fn rotate_90(image: &Image) -> Image {
    rotate(image, 1).into_owned()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
