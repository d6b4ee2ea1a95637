//! `advisor config` — print the effective configuration.

use advisor_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Config file: {}", AppConfig::config_dir().join("config.toml").display());
    println!("API key set: {}", config.has_api_key());
    println!();
    println!("{config:#?}");

    Ok(())
}
