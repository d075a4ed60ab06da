//! Metric definition loader (strict parsing).

pub mod schema;

use std::fs;

use promtext_core::error::{PromTextError, Result};

pub use schema::{ExpositionConfig, KindConfig, MetricConfig, Observation};

pub fn load_from_file(path: &str) -> Result<ExpositionConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PromTextError::Io(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExpositionConfig> {
    let cfg: ExpositionConfig = serde_yaml::from_str(s)
        .map_err(|e| PromTextError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
