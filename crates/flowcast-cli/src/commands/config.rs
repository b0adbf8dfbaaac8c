//! Config command implementation

use std::path::Path;

use anyhow::Result;
use flowcast_core::config::default_config_path;
use flowcast_core::AnalyticsConfig;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let loaded = AnalyticsConfig::load(config_path)?;

    println!("# Source: {}", loaded.source);
    if let Some(path) = default_config_path() {
        println!("# Override path: {}", path.display());
    }
    println!();
    print!("{}", loaded.config.to_toml()?);

    Ok(())
}
