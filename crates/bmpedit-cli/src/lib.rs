//! bmpedit CLI - Console front end for the bmpedit bitmap editor
//!
//! Two modes share the core crate:
//!
//! - an interactive menu ([`session::Session`]) that reproduces the classic
//!   numbered-menu workflow over any reader/writer pair, and
//! - a one-shot batch job ([`batch`]) driven by command-line flags or a JSON
//!   job file ([`config`]).

pub mod args;
pub mod batch;
pub mod config;
pub mod menu;
pub mod prompt;
pub mod session;

pub use args::{Args, FilterArg};
pub use config::{load_config, BatchConfig};
pub use prompt::Console;
pub use session::Session;
