//! Query-log validation entrypoint.

use mimalloc::MiMalloc;

use cryptosights::config::Config;
use cryptosights::embedding::{BertEmbedder, BertEmbedderConfig};
use cryptosights::validation::{Validator, run_validation};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let embedder_config = BertEmbedderConfig::from_env()?;
    tracing::info!(
        model = %embedder_config.model_source(),
        stub = embedder_config.testing_stub,
        "Loading sentence embedder"
    );
    let embedder = BertEmbedder::load(embedder_config)?;

    let validator = Validator::new(embedder, config.similarity_threshold);
    let summary = run_validation(&config, &validator)?;

    println!(
        "Validated {} entries: {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    );
    println!(
        "Results saved to {}",
        config.validation_output_path.display()
    );
    Ok(())
}
