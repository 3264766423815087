//! Validate configuration command.

use anyhow::Result;
use coinwatch_config::{AppConfig, ConfigError};
use std::path::Path;

pub async fn run(config_path: &Path, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Price file: {}", config.data.path.display());
    println!("Assets: {}", config.data.assets.join(", "));
    println!(
        "Publish hour: {}",
        config
            .report
            .publish_hour
            .map(|h| format!("{:02}:00", h))
            .unwrap_or_else(|| "any".to_string())
    );
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
