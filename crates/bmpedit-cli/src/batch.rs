//! One-shot jobs: decode, apply one filter, encode, exit.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bmpedit_core::{read_bmp, write_bmp, Filter, FilterKind};

use crate::args::Args;
use crate::config::{load_config, BatchConfig};

/// Build the job described by `--config` or by `--filter` and its parameter flags.
///
/// With `--config`, a positional input or `-o` on the command line overrides the
/// paths in the file.
pub fn job_from_args(args: &Args) -> Result<BatchConfig> {
    if let Some(path) = &args.config {
        let mut job = load_config(path)?;
        if let Some(input) = &args.input {
            job.input = input.clone();
        }
        if let Some(output) = &args.output {
            job.output = output.clone();
        }
        return Ok(job);
    }

    let Some(filter) = args.filter else {
        bail!("Either --filter or --config is required for batch mode");
    };
    let input = required(&args.input, "INPUT")?;
    let output = required(&args.output, "--output")?;
    let filter = filter_from_args(filter.kind(), args)?;
    Ok(BatchConfig {
        input,
        output,
        filter,
    })
}

fn required(value: &Option<PathBuf>, name: &str) -> Result<PathBuf> {
    value
        .clone()
        .ok_or_else(|| anyhow!("{name} is required when --filter is given"))
}

/// Combine a filter kind with the parameter flags it needs.
pub fn filter_from_args(kind: FilterKind, args: &Args) -> Result<Filter> {
    let scale = || {
        args.scale
            .ok_or_else(|| anyhow!("{kind} requires --scale"))
    };
    let factor = |value: Option<u32>, flag: &str| {
        value.ok_or_else(|| anyhow!("{kind} requires {flag}"))
    };

    let filter = match kind {
        FilterKind::Vignette => Filter::Vignette,
        FilterKind::Clarendon => Filter::Clarendon { scale: scale()? },
        FilterKind::Grayscale => Filter::Grayscale,
        FilterKind::Rotate90 => Filter::Rotate90,
        FilterKind::RotateMultiple => Filter::RotateMultiple {
            rotations: factor(args.rotations, "--rotations")?,
        },
        FilterKind::Enlarge => Filter::Enlarge {
            x: factor(args.x_scale, "--x")?,
            y: factor(args.y_scale, "--y")?,
        },
        FilterKind::HighContrast => Filter::HighContrast,
        FilterKind::Lighten => Filter::Lighten { scale: scale()? },
        FilterKind::Darken => Filter::Darken { scale: scale()? },
        FilterKind::Posterize => Filter::Posterize,
    };
    filter.validate()?;
    Ok(filter)
}

/// Run a job. Nothing is written unless decoding and filtering succeed.
pub fn run_job(job: &BatchConfig) -> Result<()> {
    let image = read_bmp(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;
    let output = job
        .filter
        .apply(&image)
        .with_context(|| format!("Failed to apply {}", job.filter))?;
    write_bmp(&job.output, &output)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    log::info!(
        "applied {} to {}, wrote {}x{} image to {}",
        job.filter,
        job.input.display(),
        output.width(),
        output.height(),
        job.output.display()
    );
    Ok(())
}
