//! Speed rail commands. Premium.

use std::path::Path;

use anyhow::Result;
use bar::service::RailMove;

use super::open_service;

pub fn show(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let rail = svc.rail()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rail)?);
        return Ok(());
    }

    if rail.is_empty() {
        println!("The rail is empty. Run: openbar rail add <name>");
        return Ok(());
    }
    for (slot, name) in rail.iter().enumerate() {
        println!("{:>2}. {}", slot + 1, name);
    }
    Ok(())
}

pub fn candidates(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let candidates = svc.rail_candidates()?;
    let rail = svc.rail()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No spirits in stock.");
        return Ok(());
    }
    for ingredient in &candidates {
        if rail.iter().any(|n| *n == ingredient.name) {
            println!("{:<26} (on the rail)", ingredient.name);
        } else {
            println!("{}", ingredient.name);
        }
    }
    Ok(())
}

pub fn add(name: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let rail = svc.rail_add(name)?;
    println!("\"{}\" on the rail ({} bottles).", name, rail.len());
    Ok(())
}

pub fn remove(name: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let rail = svc.rail_remove(name)?;
    println!("\"{}\" off the rail ({} bottles).", name, rail.len());
    Ok(())
}

pub fn shift(name: &str, direction: &str, client_config_path: &Path) -> Result<()> {
    let direction = match direction.to_lowercase().as_str() {
        "left" => RailMove::Left,
        "right" => RailMove::Right,
        other => anyhow::bail!("Unknown direction \"{}\". Use left or right.", other),
    };
    let mut svc = open_service(client_config_path)?;
    let rail = svc.rail_move(name, direction)?;
    let slot = rail.iter().position(|n| n == name).map(|i| i + 1);
    match slot {
        Some(slot) => println!("\"{}\" now in slot {}.", name, slot),
        None => println!("Rail updated."),
    }
    Ok(())
}
