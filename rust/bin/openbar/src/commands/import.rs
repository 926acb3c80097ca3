//! Spreadsheet import. Premium.

use std::path::Path;

use anyhow::Result;

use super::open_service;

/// Replace the catalog from a CSV export. `-` reads from stdin.
pub fn run(file: &str, client_config_path: &Path) -> Result<()> {
    let csv_text = if file == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file, e))?
    };

    let mut svc = open_service(client_config_path)?;
    let report = svc.import_catalog(&csv_text)?;
    println!(
        "Imported {} recipe(s) and {} ingredient(s). The new inventory starts out of stock.",
        report.recipes, report.ingredients
    );
    Ok(())
}
