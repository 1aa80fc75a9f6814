//! Nearest-neighbour enlargement by integer factors.
//!
//! Each source pixel is replicated into an `x_scale` by `y_scale` block. The
//! output pixel at `(row, col)` is the source pixel at
//! `(row / y_scale, col / x_scale)` using integer division.

use crate::pixel::Image;

/// Enlarge an image by integer factors along each axis.
///
/// # Arguments
///
/// * `image` - Source image to enlarge
/// * `x_scale` - Horizontal factor (columns are multiplied by this)
/// * `y_scale` - Vertical factor (rows are multiplied by this)
///
/// # Returns
///
/// A new image of `rows * y_scale` rows and `cols * x_scale` columns. Both
/// factors are expected to be at least 1; a zero factor yields an empty image.
///
/// # Example
///
/// ```ignore
/// use bmpedit_core::transform::enlarge;
///
/// let big = enlarge(&image, 2, 3);
/// assert_eq!(big.size(), (image.height() * 3, image.width() * 2));
/// ```
/// Output `(width, height)` of [`enlarge`], or `None` if it overflows `usize`.
pub fn enlarged_dimensions(image: &Image, x_scale: u32, y_scale: u32) -> Option<(usize, usize)> {
    let width = image.width().checked_mul(x_scale as usize)?;
    let height = image.height().checked_mul(y_scale as usize)?;
    Some((width, height))
}

pub fn enlarge(image: &Image, x_scale: u32, y_scale: u32) -> Image {
    let x = x_scale as usize;
    let y = y_scale as usize;
    let (rows, cols) = image.size();

    Image::from_fn(cols * x, rows * y, |row, col| image.pixel(row / y, col / x))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::pixel::Pixel;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (usize, usize)> {
        (1usize..=12, 1usize..=12)
    }

    /// Strategy for generating enlargement factors.
    fn factors_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=5, 1u32..=5)
    }

    /// Create a test image with unique pixel values based on position.
    fn create_test_image(width: usize, height: usize) -> Image {
        Image::from_fn(width, height, |row, col| Pixel::new(row as u8, col as u8, 42))
    }

    proptest! {
        /// Property: Output dimensions are exactly (rows * y, cols * x).
        #[test]
        fn prop_output_dimensions(
            (width, height) in dimensions_strategy(),
            (x, y) in factors_strategy(),
        ) {
            let img = create_test_image(width, height);
            let big = enlarge(&img, x, y);
            prop_assert_eq!(big.size(), (height * y as usize, width * x as usize));
        }

        /// Property: Every output pixel comes from its integer-division source.
        #[test]
        fn prop_block_mapping(
            (width, height) in dimensions_strategy(),
            (x, y) in factors_strategy(),
        ) {
            let img = create_test_image(width, height);
            let big = enlarge(&img, x, y);
            for row in 0..big.height() {
                for col in 0..big.width() {
                    prop_assert_eq!(
                        big.pixel(row, col),
                        img.pixel(row / y as usize, col / x as usize)
                    );
                }
            }
        }
    }
}
