use anyhow::{Context, Result};
use clap::Parser;

mod cli;

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config()?;

    let summary = snpclust::run(&config)
        .with_context(|| format!("Clustering {} failed", config.input.display()))?;

    if let Some(matrix) = &summary.matrix_output {
        log::info!("Distance matrix saved to {}", matrix.display());
    }
    log::info!(
        "{} of {} samples in {} cluster(s)",
        summary.n_clustered,
        summary.n_samples,
        summary.n_clusters
    );
    log::info!(
        "Clustering is complete! Results saved to {}",
        config.output.display()
    );

    Ok(())
}
