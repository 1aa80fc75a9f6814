//! JSON batch job files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bmpedit_core::Filter;
use serde::Deserialize;

/// One decode, filter, encode job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub filter: Filter,
}

pub fn load_config(path: &Path) -> Result<BatchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        fs::write(
            &path,
            r#"{
                "input": "in.bmp",
                "output": "out.bmp",
                "filter": { "kind": "lighten", "scale": 0.25 }
            }"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config,
            BatchConfig {
                input: PathBuf::from("in.bmp"),
                output: PathBuf::from("out.bmp"),
                filter: Filter::Lighten { scale: 0.25 },
            }
        );
    }

    #[test]
    fn test_load_config_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_config(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"input": "a.bmp", "output": "b.bmp", "filter": {"kind": "sepia"}}"#)
            .unwrap();
        let err = load_config(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
