//! Command-line arguments.

use std::path::PathBuf;

use bmpedit_core::FilterKind;
use clap::{Parser, ValueEnum};

/// A console editor for 24-bit and 32-bit BMP images.
///
/// Without --filter or --config, starts the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "bmpedit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    bmpedit photo.bmp                                   Interactive menu
    bmpedit photo.bmp -f grayscale -o gray.bmp          Convert to greyscale
    bmpedit photo.bmp -f darken --scale 0.5 -o dark.bmp Darken by half
    bmpedit photo.bmp -f enlarge --x 2 --y 3 -o big.bmp Enlarge 2x wide, 3x tall
    bmpedit --config job.json                           Run a JSON batch job")]
pub struct Args {
    /// Input BMP file
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output BMP file (batch mode)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Filter to apply, then exit
    #[arg(short, long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Scale factor in (0, 1] for clarendon, lighten and darken
    #[arg(long, value_name = "S")]
    pub scale: Option<f64>,

    /// Number of 90 degree clockwise turns for rotate-multiple
    #[arg(long, value_name = "N")]
    pub rotations: Option<u32>,

    /// Horizontal enlargement factor
    #[arg(long = "x", value_name = "X")]
    pub x_scale: Option<u32>,

    /// Vertical enlargement factor
    #[arg(long = "y", value_name = "Y")]
    pub y_scale: Option<u32>,

    /// JSON batch job file: {"input": ..., "output": ..., "filter": {"kind": ...}}
    #[arg(long, value_name = "FILE", conflicts_with = "filter")]
    pub config: Option<PathBuf>,

    /// Verbose (debug) logging on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Whether to run a single job instead of the interactive menu.
    pub fn is_batch(&self) -> bool {
        self.filter.is_some() || self.config.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Darken towards the corners
    Vignette,
    /// Push lights lighter and darks darker
    Clarendon,
    /// Average the channels
    Grayscale,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate by --rotations quarter turns
    RotateMultiple,
    /// Enlarge by --x and --y
    Enlarge,
    /// Threshold to black and white
    HighContrast,
    /// Move channels towards white
    Lighten,
    /// Move channels towards black
    Darken,
    /// Reduce to black, white, red, green and blue
    Posterize,
}

impl FilterArg {
    pub fn kind(self) -> FilterKind {
        match self {
            FilterArg::Vignette => FilterKind::Vignette,
            FilterArg::Clarendon => FilterKind::Clarendon,
            FilterArg::Grayscale => FilterKind::Grayscale,
            FilterArg::Rotate90 => FilterKind::Rotate90,
            FilterArg::RotateMultiple => FilterKind::RotateMultiple,
            FilterArg::Enlarge => FilterKind::Enlarge,
            FilterArg::HighContrast => FilterKind::HighContrast,
            FilterArg::Lighten => FilterKind::Lighten,
            FilterArg::Darken => FilterKind::Darken,
            FilterArg::Posterize => FilterKind::Posterize,
        }
    }
}
