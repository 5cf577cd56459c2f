//! Thin driver: `knowledge-integrate <output-dir> <input>...`
//!
//! Inputs are record files or harvest directories. Pipeline settings come
//! from `knowledge.toml` and `KNOWLEDGE_*` environment variables.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knowledge_core::{Pipeline, PipelineConfig};

fn load_config() -> Result<PipelineConfig> {
    Figment::from(Serialized::defaults(PipelineConfig::v0()))
        .merge(Toml::file("knowledge.toml"))
        .merge(Env::prefixed("KNOWLEDGE_"))
        .extract()
        .context("Failed to load pipeline configuration")
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,knowledge_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(output_dir) = args.next() else {
        bail!("usage: knowledge-integrate <output-dir> <input>...");
    };
    let inputs: Vec<PathBuf> = args.collect();
    if inputs.is_empty() {
        bail!("no input files or directories given");
    }

    let pipeline = Pipeline::new(load_config()?);
    tracing::info!(config = ?pipeline.config(), "Loaded configuration");

    let outcome = pipeline
        .run(&inputs, &output_dir)
        .context("Knowledge integration failed")?;

    for failure in &outcome.summary.io_failures {
        tracing::warn!(path = %failure.path.display(), error = %failure.error, "Input was not integrated");
    }
    println!(
        "accepted={} rejected_malformed={} rejected_duplicate={} io_failures={}",
        outcome.summary.accepted,
        outcome.summary.rejected_malformed,
        outcome.summary.rejected_duplicate,
        outcome.summary.io_failures.len(),
    );

    Ok(())
}
