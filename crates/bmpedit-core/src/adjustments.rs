//! Per-pixel filter algorithms
//!
//! Implements the colour filters of the editor. Geometry filters (rotation,
//! enlargement) live in [`crate::transform`].
//!
//! ## Filters
//! 1. Vignette
//! 2. Clarendon
//! 3. Grayscale
//! 7. High contrast
//! 8. Lighten
//! 9. Darken
//! 10. Posterize to black, white, red, green and blue
//!
//! ## Arithmetic
//! Scaling filters compute in `f64` and convert back with truncation toward
//! zero. Results outside `0..=255` saturate at the range ends; when that
//! happens a warning with the number of affected channels is logged.

use crate::pixel::{Image, Pixel};

/// Channel average at or above which Clarendon lightens a pixel.
pub const CLARENDON_LIGHT_THRESHOLD: u32 = 170;

/// Channel average below which Clarendon darkens a pixel.
pub const CLARENDON_DARK_THRESHOLD: u32 = 90;

/// Channel average at or above which high contrast produces white.
pub const HIGH_CONTRAST_THRESHOLD: f64 = 127.5;

/// Channel sum at or above which posterize produces white.
pub const POSTERIZE_WHITE_SUM: u32 = 550;

/// Channel sum at or below which posterize produces black.
pub const POSTERIZE_BLACK_SUM: u32 = 150;

/// Whether `value` survives truncation to a channel without saturating.
#[inline]
fn fits_channel(value: f64) -> bool {
    value > -1.0 && value < 256.0
}

/// Build a new image from per-channel `f64` results.
///
/// `f` receives `(row, col, pixel)` and returns the unconverted red, green and
/// blue values. Also returns how many channel values had to saturate.
fn scale_channels(
    image: &Image,
    f: impl Fn(usize, usize, Pixel) -> [f64; 3],
) -> (Image, usize) {
    let mut clamped = 0usize;
    let output = Image::from_fn(image.width(), image.height(), |row, col| {
        let values = f(row, col, image.pixel(row, col));
        clamped += values.iter().filter(|v| !fits_channel(**v)).count();
        let [r, g, b] = values;
        // `as` truncates toward zero and saturates at 0 and 255.
        Pixel::new(r as u8, g as u8, b as u8)
    });
    (output, clamped)
}

/// [`scale_channels`], warning when any value was clamped.
fn map_scaled(
    image: &Image,
    filter: &str,
    f: impl Fn(usize, usize, Pixel) -> [f64; 3],
) -> Image {
    let (output, clamped) = scale_channels(image, f);
    if clamped > 0 {
        log::warn!("{filter}: clamped {clamped} channel values into 0..=255");
    }
    output
}

/// Integer average of the three channels.
#[inline]
fn channel_average(p: Pixel) -> u32 {
    p.sum() / 3
}

/// Lighten formula: `255 - (255 - c) * scale`.
#[inline]
fn lighten_channel(c: u8, scale: f64) -> f64 {
    255.0 - (255.0 - f64::from(c)) * scale
}

/// Darken formula: `c * scale`.
#[inline]
fn darken_channel(c: u8, scale: f64) -> f64 {
    f64::from(c) * scale
}

#[inline]
fn lighten_pixel(p: Pixel, scale: f64) -> [f64; 3] {
    [
        lighten_channel(p.red, scale),
        lighten_channel(p.green, scale),
        lighten_channel(p.blue, scale),
    ]
}

#[inline]
fn darken_pixel(p: Pixel, scale: f64) -> [f64; 3] {
    [
        darken_channel(p.red, scale),
        darken_channel(p.green, scale),
        darken_channel(p.blue, scale),
    ]
}

/// Darken pixels by their distance from the image centre.
///
/// For each pixel:
/// ```text
/// dist   = sqrt((col - cols/2)^2 + (row - rows/2)^2)
/// factor = (rows - dist) / rows
/// c'     = c * factor
/// ```
/// The centre uses fractional coordinates. Far corners of images much wider
/// than tall get a negative factor and end up black.
pub fn vignette(image: &Image) -> Image {
    map_scaled(image, "vignette", vignette_channels(image))
}

fn vignette_channels(image: &Image) -> impl Fn(usize, usize, Pixel) -> [f64; 3] {
    let (rows, cols) = image.size();
    let (rows_f, cx, cy) = (rows as f64, cols as f64 / 2.0, rows as f64 / 2.0);

    move |row, col, p| {
        let dist = (col as f64 - cx).hypot(row as f64 - cy);
        let factor = (rows_f - dist) / rows_f;
        darken_pixel(p, factor)
    }
}

/// Push light pixels lighter and dark pixels darker.
///
/// With `avg` the integer channel average: pixels with `avg >= 170` are
/// lightened by `scale`, pixels with `avg < 90` are darkened by `scale`, and
/// everything in between is left unchanged.
///
/// # Arguments
/// * `scale` - Strength in `(0, 1]`; smaller is stronger
pub fn clarendon(image: &Image, scale: f64) -> Image {
    map_scaled(image, "clarendon", |_, _, p| {
        let avg = channel_average(p);
        if avg >= CLARENDON_LIGHT_THRESHOLD {
            lighten_pixel(p, scale)
        } else if avg < CLARENDON_DARK_THRESHOLD {
            darken_pixel(p, scale)
        } else {
            [f64::from(p.red), f64::from(p.green), f64::from(p.blue)]
        }
    })
}

/// Replace every pixel by the integer average of its channels.
pub fn grayscale(image: &Image) -> Image {
    image.map_pixels(|p| Pixel::gray(channel_average(p) as u8))
}

/// Map each pixel to pure white or pure black.
///
/// White when the (fractional) channel average is at least 127.5.
pub fn high_contrast(image: &Image) -> Image {
    image.map_pixels(|p| {
        if f64::from(p.sum()) / 3.0 >= HIGH_CONTRAST_THRESHOLD {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    })
}

/// Move every channel toward white: `255 - (255 - c) * scale`.
///
/// # Arguments
/// * `scale` - Factor in `(0, 1]`; `1.0` leaves the image unchanged
pub fn lighten(image: &Image, scale: f64) -> Image {
    map_scaled(image, "lighten", |_, _, p| lighten_pixel(p, scale))
}

/// Move every channel toward black: `c * scale`.
///
/// # Arguments
/// * `scale` - Factor in `(0, 1]`; `1.0` leaves the image unchanged
pub fn darken(image: &Image, scale: f64) -> Image {
    map_scaled(image, "darken", |_, _, p| darken_pixel(p, scale))
}

/// Classify a pixel into one of five colours.
///
/// Checked in order: channel sum `>= 550` is white, `<= 150` is black;
/// otherwise the dominant channel wins, with ties going to red, then green.
#[inline]
fn posterize_pixel(p: Pixel) -> Pixel {
    let sum = p.sum();
    let max = p.max_channel();
    if sum >= POSTERIZE_WHITE_SUM {
        Pixel::WHITE
    } else if sum <= POSTERIZE_BLACK_SUM {
        Pixel::BLACK
    } else if max == p.red {
        Pixel::RED
    } else if max == p.green {
        Pixel::GREEN
    } else {
        Pixel::BLUE
    }
}

/// Reduce the image to black, white, red, green and blue.
pub fn posterize(image: &Image) -> Image {
    image.map_pixels(posterize_pixel)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for an image with random pixels.
    fn image_strategy() -> impl Strategy<Value = Image> {
        (1usize..=12, 1usize..=12).prop_flat_map(|(width, height)| {
            prop::collection::vec(any::<[u8; 3]>(), width * height).prop_map(move |raw| {
                let pixels = raw.into_iter().map(Pixel::from).collect();
                Image::new(width, height, pixels).unwrap()
            })
        })
    }

    /// Strategy for validated scale factors.
    fn scale_strategy() -> impl Strategy<Value = f64> {
        (1u32..=1000).prop_map(|n| f64::from(n) / 1000.0)
    }

    proptest! {
        /// Property: Grayscale applied twice equals grayscale applied once.
        #[test]
        fn prop_grayscale_idempotent(img in image_strategy()) {
            let once = grayscale(&img);
            prop_assert_eq!(grayscale(&once), once);
        }

        /// Property: High contrast only produces pure black or pure white, and is idempotent.
        #[test]
        fn prop_high_contrast_binary(img in image_strategy()) {
            let once = high_contrast(&img);
            for p in once.pixels() {
                prop_assert!(*p == Pixel::BLACK || *p == Pixel::WHITE);
            }
            prop_assert_eq!(high_contrast(&once), once);
        }

        /// Property: Lighten never darkens and darken never lightens a channel.
        #[test]
        fn prop_lighten_darken_direction(img in image_strategy(), scale in scale_strategy()) {
            let light = lighten(&img, scale);
            let dark = darken(&img, scale);
            for ((src, l), d) in img.pixels().iter().zip(light.pixels()).zip(dark.pixels()) {
                for i in 0..3 {
                    prop_assert!(l.to_array()[i] >= src.to_array()[i]);
                    prop_assert!(d.to_array()[i] <= src.to_array()[i]);
                }
            }
        }

        /// Property: Posterize output uses only the five palette colours.
        #[test]
        fn prop_posterize_palette(img in image_strategy()) {
            let palette = [Pixel::BLACK, Pixel::WHITE, Pixel::RED, Pixel::GREEN, Pixel::BLUE];
            for p in posterize(&img).pixels() {
                prop_assert!(palette.contains(p));
            }
        }

        /// Property: Vignette never brightens a channel.
        #[test]
        fn prop_vignette_never_brightens(img in image_strategy()) {
            let out = vignette(&img);
            for (src, v) in img.pixels().iter().zip(out.pixels()) {
                prop_assert!(v.red <= src.red);
                prop_assert!(v.green <= src.green);
                prop_assert!(v.blue <= src.blue);
            }
        }
    }
}
