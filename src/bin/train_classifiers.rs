//! Classifier training and evaluation entrypoint.

use mimalloc::MiMalloc;

use cryptosights::config::Config;
use cryptosights::training::run_training;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let summary = run_training(&config)?;
    tracing::info!(
        rows = summary.total_rows,
        train = summary.train_rows,
        test = summary.test_rows,
        "Training run complete"
    );

    for evaluation in &summary.evaluations {
        println!("\n=== {} ===", evaluation.kind);
        println!("{}", evaluation.report);
        println!("Accuracy: {}", evaluation.accuracy);
    }

    println!(
        "\nConfusion matrix for {} saved to {}",
        summary.selected_model,
        config.confusion_matrix_path.display()
    );
    println!(
        "Predictions saved to {}",
        config.predictions_path.display()
    );
    Ok(())
}
