mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = Path::new(config::DATASET_PATH);
    let dataset = match data::loader::load_file(path)
        .with_context(|| format!("loading dataset {}", path.display()))
    {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };
    if dataset.is_empty() {
        log::warn!("Dataset {} has no records; charts will be empty", path.display());
    }
    log::info!(
        "Loaded {} records ({} enslavers, {} data sources)",
        dataset.len(),
        dataset.enslavers().len(),
        dataset.data_sources().len()
    );

    app::serve(AppState::new(dataset), config::bind_addr()).await
}
