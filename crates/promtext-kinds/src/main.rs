//! promtext-render
//!
//! Loads metric definitions and observations from a YAML file (first
//! argument, default `promtext.yaml`) and prints their Prometheus text
//! exposition to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use promtext_core::error::Result;
use promtext_core::exposition;
use promtext_kinds::{config, AnyMetric};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "promtext.yaml".into());

    match render(&path) {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(%path, code = e.kind().as_str(), error = %e, "render failed");
            ExitCode::FAILURE
        }
    }
}

fn render(path: &str) -> Result<String> {
    let cfg = config::load_from_file(path)?;
    let metrics = cfg.build()?;
    tracing::info!(%path, metrics = metrics.len(), "rendering exposition");
    Ok(exposition::render_all(metrics.iter().map(AnyMetric::serialize)))
}
