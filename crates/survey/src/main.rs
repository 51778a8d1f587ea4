//! hardpoint-survey: measure ship meshes and print weapon/engine hardpoints in scene units.
//!
//! Usage: `hardpoint-survey [config.ron]` (defaults to `survey.ron` in the current directory).

mod config;
mod report;
mod survey;

use anyhow::{Context, Result};
use config::SurveyConfig;
use estimator::HardpointEstimator;
use loader::GltfLoader;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let config = SurveyConfig::load(&config_path);
    if let Ok(text) = config.to_ron() {
        log::debug!("Effective config:\n{text}");
    }

    let estimator =
        HardpointEstimator::new(config.estimator).context("invalid estimator settings")?;
    let loader = GltfLoader::default();

    let mut surveyed = 0;
    for model in &config.models {
        match survey::survey_model(&loader, &estimator, &config, model) {
            Ok(result) => {
                println!("{result}");
                surveyed += 1;
            }
            Err(e) => log::error!("{}: {:#}", model.name, e),
        }
    }
    log::info!("Surveyed {}/{} models", surveyed, config.models.len());
    Ok(())
}
