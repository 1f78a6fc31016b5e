mod cli;
mod config;
mod platform;

use clap::Parser;
use review_logging::review_info;

use cli::Cli;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    platform::logging::initialize(config.log, config.log_level());
    if let Some(path) = &config.loaded_from {
        review_info!("Loaded config from {:?}", path);
    }
    platform::run_app(config)
}
