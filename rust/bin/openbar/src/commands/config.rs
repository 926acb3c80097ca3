//! Client configuration commands.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

pub fn show(json_output: bool, client_config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(client_config_path)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    println!("Config file: {}", client_config_path.display());
    println!("Data dir:    {}", config.resolved_data_dir().display());
    println!(
        "Database:    {}",
        config.service_config().resolve_db_path().display()
    );
    Ok(())
}

pub fn set_data_dir(dir: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    config.data_dir = dir.to_string();
    config.save(client_config_path)?;
    println!("Data dir set to {}.", dir);
    Ok(())
}
