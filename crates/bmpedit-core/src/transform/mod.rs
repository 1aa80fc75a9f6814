//! Geometric image transformations: quarter-turn rotation and enlargement.
//!
//! These operations move pixels around without changing their values.
//!
//! # Coordinate System
//!
//! - Positions are `(row, col)` with the origin at the top-left corner
//! - Rotation is clockwise in steps of 90 degrees
//! - Enlargement factors are positive integers per axis

mod enlarge;
mod rotation;

pub use enlarge::{enlarge, enlarged_dimensions};
pub use rotation::{rotate, rotate_90};
