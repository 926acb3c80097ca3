//! Menu builder commands. Premium.

use std::path::Path;

use anyhow::Result;

use super::open_service;

/// Render the HTML menu. No names means every makeable drink; `-` as the
/// output path writes to stdout.
pub fn export(
    title: Option<&str>,
    names: &[String],
    out: &str,
    client_config_path: &Path,
) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let names: Vec<String> = if names.is_empty() {
        svc.menu_candidates()?.into_iter().map(|c| c.name).collect()
    } else {
        names.to_vec()
    };
    let html = svc.render_menu(title.unwrap_or(""), &names)?;

    if out == "-" {
        print!("{html}");
        return Ok(());
    }
    std::fs::write(out, &html)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", out, e))?;
    println!("Menu with {} drink(s) written to {}.", names.len(), out);
    Ok(())
}

pub fn candidates(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let candidates = svc.menu_candidates()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }
    if candidates.is_empty() {
        println!("Nothing is makeable right now.");
        return Ok(());
    }
    println!("{:28} {:16} {:>7}", "NAME", "TYPE", "PRICE");
    for c in &candidates {
        println!(
            "{:28} {:16} {:>7}",
            c.name,
            c.recipe_type,
            c.sell_price.map_or("-".to_string(), |p| format!("{p:.2}"))
        );
    }
    Ok(())
}
