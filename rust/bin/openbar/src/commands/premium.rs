//! Paywall commands. The purchase is simulated, nothing leaves the machine.

use std::path::Path;

use anyhow::Result;
use bar::service::TOOLS;

use super::open_service;

pub fn status(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let status = svc.paywall_status();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    if status.premium {
        println!("Premium. Every tool is open.");
    } else {
        println!(
            "Free tier: {} recipes on the shelf, {} random pick(s) left.",
            status.free_recipe_limit, status.random_uses_remaining
        );
        println!("Run: openbar premium unlock");
    }
    Ok(())
}

pub fn unlock(client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.unlock_premium()?;
    println!("Premium unlocked. Every tool is open.");
    Ok(())
}

pub fn restore(client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    svc.restore_premium()?;
    println!("Purchase restored.");
    Ok(())
}

pub fn reset(client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.reset_premium()?;
    println!("Back on the free tier.");
    Ok(())
}

pub fn tools(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let premium = svc.paywall_status().premium;

    if json_output {
        println!("{}", serde_json::to_string_pretty(TOOLS)?);
        return Ok(());
    }
    println!("{:16} {:22} {:8}", "TOOL", "WHAT", "ACCESS");
    for tool in TOOLS {
        let access = if tool.free || premium { "open" } else { "locked" };
        println!("{:16} {:22} {:8}", tool.label, tool.description, access);
    }
    Ok(())
}
