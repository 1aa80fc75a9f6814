//! In-memory pixel grid.
//!
//! An [`Image`] is a rectangular grid of [`Pixel`]s stored row-major with row 0
//! at the top. Rectangularity is guaranteed by construction: every constructor
//! either takes explicit dimensions or checks that all rows share one length.

use thiserror::Error;

/// Errors raised when building or validating an [`Image`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// A row passed to [`Image::from_rows`] has a different length than row 0.
    #[error("Ragged rows: row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat pixel buffer length doesn't match `width * height`.
    #[error("Invalid pixel buffer: expected {expected} pixels, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// The image has no rows or zero-width rows.
    #[error("Degenerate image: {width}x{height}")]
    Degenerate { width: usize, height: usize },
}

/// A single RGB pixel. Alpha is never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);
    pub const RED: Pixel = Pixel::new(255, 0, 0);
    pub const GREEN: Pixel = Pixel::new(0, 255, 0);
    pub const BLUE: Pixel = Pixel::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// A gray pixel with all three channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Sum of the three channels.
    #[inline]
    pub fn sum(self) -> u32 {
        u32::from(self.red) + u32::from(self.green) + u32::from(self.blue)
    }

    /// Largest of the three channels.
    #[inline]
    pub fn max_channel(self) -> u8 {
        self.red.max(self.green).max(self.blue)
    }

    /// Channels as an `[r, g, b]` array.
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// A rectangular, row-major grid of pixels.
///
/// `height` is the number of rows and `width` the number of pixels per row.
/// An image with zero rows or zero-width rows is degenerate; it can be
/// represented but is rejected by the encoder and by [`crate::Filter::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create an image from a flat row-major pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, ImageError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from rows of columns, checking that all rows have equal length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, ImageError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut pixels = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(ImageError::RaggedRows {
                    row,
                    expected: width,
                    actual: cols.len(),
                });
            }
            pixels.extend(cols);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image by evaluating `f(row, col)` for every position.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Create an image from an `image::RgbImage`.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Pixel::from(p.0)).collect();
        Self {
            width: width as usize,
            height: height as usize,
            pixels,
        }
    }

    /// Convert to an `image::RgbImage`.
    ///
    /// Returns `None` if the dimensions don't fit in `u32`.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        let raw = self.pixels.iter().flat_map(|p| p.to_array()).collect();
        image::RgbImage::from_raw(width, height, raw)
    }

    /// Number of pixels per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as `(rows, cols)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Check if this is a degenerate image (no rows or zero-width rows).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns an error for degenerate images.
    pub fn ensure_not_degenerate(&self) -> Result<(), ImageError> {
        if self.is_empty() {
            return Err(ImageError::Degenerate {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Pixel at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> Pixel {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        self.pixels[row * self.width + col]
    }

    /// Pixels of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Pixel] {
        assert!(row < self.height, "row {row} out of bounds");
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + '_ {
        (0..self.height).map(move |row| self.row(row))
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Copy into rows of columns.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Build a new image of the same size by applying `f` to every pixel.
    pub fn map_pixels(&self, f: impl FnMut(Pixel) -> Pixel) -> Image {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }
}
