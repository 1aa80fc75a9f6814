//! The ten editor filters as a single sum type.
//!
//! [`FilterKind`] names a filter without parameters (what a menu offers);
//! [`Filter`] carries the validated parameters and applies itself to an
//! [`Image`] through one exhaustive match.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments;
use crate::encode;
use crate::pixel::Image;
use crate::transform;
use crate::validate;

/// Errors returned by [`Filter::apply`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The input has no rows or zero-width rows.
    #[error("Cannot filter a degenerate image ({width}x{height})")]
    DegenerateImage { width: usize, height: usize },

    /// A parameter is outside its accepted range.
    #[error("Invalid filter parameter: {0}")]
    InvalidParameter(String),
}

/// Parameters a filter needs collected before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSpec {
    /// No parameters.
    None,
    /// A scale factor in `(0, 1]`.
    Scale,
    /// A rotation count of at least 1.
    Rotations,
    /// Horizontal and vertical enlargement factors, each at least 1.
    EnlargeFactors,
}

/// A filter without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Vignette,
    Clarendon,
    Grayscale,
    Rotate90,
    RotateMultiple,
    Enlarge,
    HighContrast,
    Lighten,
    Darken,
    Posterize,
}

impl FilterKind {
    /// All filters in menu order.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Vignette,
        FilterKind::Clarendon,
        FilterKind::Grayscale,
        FilterKind::Rotate90,
        FilterKind::RotateMultiple,
        FilterKind::Enlarge,
        FilterKind::HighContrast,
        FilterKind::Lighten,
        FilterKind::Darken,
        FilterKind::Posterize,
    ];

    /// Menu number, 1 through 10.
    pub fn menu_number(self) -> u32 {
        match self {
            FilterKind::Vignette => 1,
            FilterKind::Clarendon => 2,
            FilterKind::Grayscale => 3,
            FilterKind::Rotate90 => 4,
            FilterKind::RotateMultiple => 5,
            FilterKind::Enlarge => 6,
            FilterKind::HighContrast => 7,
            FilterKind::Lighten => 8,
            FilterKind::Darken => 9,
            FilterKind::Posterize => 10,
        }
    }

    /// Look up a filter by menu number.
    pub fn from_menu_number(number: u32) -> Option<FilterKind> {
        Self::ALL.into_iter().find(|kind| kind.menu_number() == number)
    }

    /// Lower-case display name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Vignette => "vignette",
            FilterKind::Clarendon => "clarendon",
            FilterKind::Grayscale => "greyscale",
            FilterKind::Rotate90 => "rotate 90 degrees",
            FilterKind::RotateMultiple => "rotate multiple 90 degrees",
            FilterKind::Enlarge => "enlarge",
            FilterKind::HighContrast => "high contrast",
            FilterKind::Lighten => "lighten",
            FilterKind::Darken => "darken",
            FilterKind::Posterize => "black, white, red, green, blue",
        }
    }

    /// Which parameters must be collected for this filter.
    pub fn parameters(self) -> ParameterSpec {
        match self {
            FilterKind::Clarendon | FilterKind::Lighten | FilterKind::Darken => {
                ParameterSpec::Scale
            }
            FilterKind::RotateMultiple => ParameterSpec::Rotations,
            FilterKind::Enlarge => ParameterSpec::EnlargeFactors,
            FilterKind::Vignette
            | FilterKind::Grayscale
            | FilterKind::Rotate90
            | FilterKind::HighContrast
            | FilterKind::Posterize => ParameterSpec::None,
        }
    }

    /// The filter itself, if it takes no parameters.
    pub fn without_parameters(self) -> Option<Filter> {
        match self {
            FilterKind::Vignette => Some(Filter::Vignette),
            FilterKind::Grayscale => Some(Filter::Grayscale),
            FilterKind::Rotate90 => Some(Filter::Rotate90),
            FilterKind::HighContrast => Some(Filter::HighContrast),
            FilterKind::Posterize => Some(Filter::Posterize),
            FilterKind::Clarendon
            | FilterKind::RotateMultiple
            | FilterKind::Enlarge
            | FilterKind::Lighten
            | FilterKind::Darken => None,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A filter together with its parameters.
///
/// Serialized internally tagged, e.g. `{"kind": "enlarge", "x": 2, "y": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    Vignette,
    Clarendon { scale: f64 },
    Grayscale,
    Rotate90,
    RotateMultiple { rotations: u32 },
    Enlarge { x: u32, y: u32 },
    HighContrast,
    Lighten { scale: f64 },
    Darken { scale: f64 },
    Posterize,
}

impl Filter {
    /// The parameterless kind of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Vignette => FilterKind::Vignette,
            Filter::Clarendon { .. } => FilterKind::Clarendon,
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Rotate90 => FilterKind::Rotate90,
            Filter::RotateMultiple { .. } => FilterKind::RotateMultiple,
            Filter::Enlarge { .. } => FilterKind::Enlarge,
            Filter::HighContrast => FilterKind::HighContrast,
            Filter::Lighten { .. } => FilterKind::Lighten,
            Filter::Darken { .. } => FilterKind::Darken,
            Filter::Posterize => FilterKind::Posterize,
        }
    }

    /// Check the parameters with the same rules the input prompts use.
    pub fn validate(&self) -> Result<(), FilterError> {
        let result = match *self {
            Filter::Clarendon { scale } | Filter::Lighten { scale } | Filter::Darken { scale } => {
                validate::check_scale(scale).map(drop)
            }
            Filter::RotateMultiple { rotations } => validate::check_rotations(rotations).map(drop),
            Filter::Enlarge { x, y } => validate::check_enlarge_factor(x)
                .and_then(|_| validate::check_enlarge_factor(y))
                .map(drop),
            Filter::Vignette
            | Filter::Grayscale
            | Filter::Rotate90
            | Filter::HighContrast
            | Filter::Posterize => Ok(()),
        };
        result.map_err(|e| FilterError::InvalidParameter(format!("{}: {e}", self.kind())))
    }

    /// Apply the filter, producing a new image.
    ///
    /// Only a rotation by a multiple of four turns returns the input borrowed.
    ///
    /// # Errors
    ///
    /// * `FilterError::DegenerateImage` if the image has no rows or zero-width rows
    /// * `FilterError::InvalidParameter` if a parameter is out of range, or if
    ///   an enlargement would be too large to store as a bitmap
    pub fn apply<'a>(&self, image: &'a Image) -> Result<Cow<'a, Image>, FilterError> {
        if image.is_empty() {
            return Err(FilterError::DegenerateImage {
                width: image.width(),
                height: image.height(),
            });
        }
        self.validate()?;
        if let Filter::Enlarge { x, y } = *self {
            check_enlarged_size(image, x, y)?;
        }
        log::debug!(
            "applying {} to {}x{} image",
            self.kind(),
            image.width(),
            image.height()
        );

        let output = match *self {
            Filter::Vignette => adjustments::vignette(image),
            Filter::Clarendon { scale } => adjustments::clarendon(image, scale),
            Filter::Grayscale => adjustments::grayscale(image),
            Filter::Rotate90 => transform::rotate_90(image),
            Filter::RotateMultiple { rotations } => return Ok(transform::rotate(image, rotations)),
            Filter::Enlarge { x, y } => transform::enlarge(image, x, y),
            Filter::HighContrast => adjustments::high_contrast(image),
            Filter::Lighten { scale } => adjustments::lighten(image, scale),
            Filter::Darken { scale } => adjustments::darken(image, scale),
            Filter::Posterize => adjustments::posterize(image),
        };
        Ok(Cow::Owned(output))
    }
}

/// Reject enlargements whose output could not be encoded, before allocating it.
fn check_enlarged_size(image: &Image, x: u32, y: u32) -> Result<(), FilterError> {
    let too_large = || {
        FilterError::InvalidParameter(format!(
            "enlarge: {}x{} image scaled by {x}x{y} exceeds bitmap size limits",
            image.width(),
            image.height()
        ))
    };
    let (width, height) = transform::enlarged_dimensions(image, x, y).ok_or_else(too_large)?;
    encode::check_dimensions(width, height).map_err(|_| too_large())
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Clarendon { scale } | Filter::Lighten { scale } | Filter::Darken { scale } => {
                write!(f, "{} (scale {scale})", self.kind())
            }
            Filter::RotateMultiple { rotations } => {
                write!(f, "{} (x{rotations})", self.kind())
            }
            Filter::Enlarge { x, y } => write!(f, "{} ({x}x{y})", self.kind()),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    fn sample() -> Image {
        Image::from_rows(vec![
            vec![Pixel::RED, Pixel::GREEN, Pixel::gray(40)],
            vec![Pixel::BLUE, Pixel::WHITE, Pixel::gray(200)],
        ])
        .unwrap()
    }

    #[test]
    fn test_menu_numbers_roundtrip() {
        for (i, kind) in FilterKind::ALL.iter().enumerate() {
            assert_eq!(kind.menu_number(), i as u32 + 1);
            assert_eq!(FilterKind::from_menu_number(i as u32 + 1), Some(*kind));
        }
        assert_eq!(FilterKind::from_menu_number(0), None);
        assert_eq!(FilterKind::from_menu_number(11), None);
    }

    #[test]
    fn test_parameterless_kinds() {
        for kind in FilterKind::ALL {
            let filter = kind.without_parameters();
            assert_eq!(filter.is_some(), kind.parameters() == ParameterSpec::None);
            if let Some(filter) = filter {
                assert_eq!(filter.kind(), kind);
            }
        }
    }

    #[test]
    fn test_apply_dispatches_to_each_filter() {
        let img = sample();
        let cases = [
            (Filter::Vignette, adjustments::vignette(&img)),
            (Filter::Clarendon { scale: 0.5 }, adjustments::clarendon(&img, 0.5)),
            (Filter::Grayscale, adjustments::grayscale(&img)),
            (Filter::Rotate90, transform::rotate_90(&img)),
            (
                Filter::RotateMultiple { rotations: 3 },
                transform::rotate(&img, 3).into_owned(),
            ),
            (Filter::Enlarge { x: 2, y: 3 }, transform::enlarge(&img, 2, 3)),
            (Filter::HighContrast, adjustments::high_contrast(&img)),
            (Filter::Lighten { scale: 0.25 }, adjustments::lighten(&img, 0.25)),
            (Filter::Darken { scale: 0.75 }, adjustments::darken(&img, 0.75)),
            (Filter::Posterize, adjustments::posterize(&img)),
        ];
        for (filter, expected) in cases {
            assert_eq!(filter.apply(&img).unwrap().into_owned(), expected, "{filter}");
        }
    }

    #[test]
    fn test_full_rotation_borrows_input() {
        let img = sample();
        let out = Filter::RotateMultiple { rotations: 4 }.apply(&img).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_apply_rejects_degenerate() {
        let err = Filter::Grayscale.apply(&Image::default()).unwrap_err();
        assert_eq!(
            err,
            FilterError::DegenerateImage {
                width: 0,
                height: 0
            }
        );

        let zero_width = Image::from_rows(vec![vec![]]).unwrap();
        assert!(Filter::Rotate90.apply(&zero_width).is_err());
    }

    #[test]
    fn test_apply_rejects_invalid_parameters() {
        let img = sample();
        for filter in [
            Filter::Darken { scale: 0.0 },
            Filter::Lighten { scale: 1.5 },
            Filter::Clarendon { scale: f64::NAN },
            Filter::RotateMultiple { rotations: 0 },
            Filter::Enlarge { x: 0, y: 1 },
            Filter::Enlarge { x: 1, y: 0 },
        ] {
            let err = filter.apply(&img).unwrap_err();
            assert!(matches!(err, FilterError::InvalidParameter(_)), "{filter}");
        }
    }

    #[test]
    fn test_oversized_enlarge_rejected_before_allocating() {
        let img = Image::filled(2, 2, Pixel::RED);
        let filter = Filter::Enlarge {
            x: 100_000,
            y: 100_000,
        };
        assert!(filter.validate().is_ok());
        let err = filter.apply(&img).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter(_)));
        assert!(err.to_string().contains("exceeds bitmap size limits"));

        let err = Filter::Enlarge { x: u32::MAX, y: 1 }.apply(&img).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter(_)));
    }

    #[test]
    fn test_large_enlarge_within_limits() {
        let img = Image::filled(1, 1, Pixel::GREEN);
        let out = Filter::Enlarge { x: 3, y: 1000 }.apply(&img).unwrap();
        assert_eq!(out.size(), (1000, 3));
    }

    #[test]
    fn test_posterize_scenario() {
        let img = Image::from_rows(vec![
            vec![Pixel::RED, Pixel::GREEN],
            vec![Pixel::BLUE, Pixel::WHITE],
        ])
        .unwrap();
        let out = Filter::Posterize.apply(&img).unwrap();
        assert_eq!(
            out.to_rows(),
            vec![
                vec![Pixel::RED, Pixel::GREEN],
                vec![Pixel::BLUE, Pixel::WHITE],
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Filter::Grayscale.to_string(), "greyscale");
        assert_eq!(Filter::Darken { scale: 0.5 }.to_string(), "darken (scale 0.5)");
        assert_eq!(Filter::Enlarge { x: 2, y: 3 }.to_string(), "enlarge (2x3)");
        assert_eq!(
            FilterKind::Posterize.to_string(),
            "black, white, red, green, blue"
        );
    }

    #[test]
    fn test_serde_representation() {
        let filter = Filter::Enlarge { x: 2, y: 3 };
        let json = serde_json::to_value(filter).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "enlarge", "x": 2, "y": 3}));

        let parsed: Filter = serde_json::from_str(r#"{"kind": "darken", "scale": 0.5}"#).unwrap();
        assert_eq!(parsed, Filter::Darken { scale: 0.5 });

        let parsed: Filter = serde_json::from_str(r#"{"kind": "high_contrast"}"#).unwrap();
        assert_eq!(parsed, Filter::HighContrast);

        let kind: FilterKind = serde_json::from_str(r#""rotate_multiple""#).unwrap();
        assert_eq!(kind, FilterKind::RotateMultiple);
    }
}
