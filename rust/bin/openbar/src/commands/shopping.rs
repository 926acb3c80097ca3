//! Shopping list commands.

use std::path::Path;

use anyhow::Result;

use super::open_service;

pub fn list(order: bool, json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;

    if order {
        let text = svc.order_text();
        if text.is_empty() {
            println!("Nothing to order.");
        } else {
            println!("{text}");
        }
        return Ok(());
    }

    let report = svc.shopping_list();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.out_of_stock.is_empty() && report.low_stock.is_empty() {
        println!("Fully stocked.");
        return Ok(());
    }

    if !report.out_of_stock.is_empty() {
        println!("Out of stock:");
        for ingredient in &report.out_of_stock {
            println!("  {} ({})", ingredient.name, ingredient.category);
        }
    }
    if !report.low_stock.is_empty() {
        println!("Running low:");
        for ingredient in &report.low_stock {
            let have = ingredient.current_stock.unwrap_or(0.0);
            let par = ingredient.par_level.unwrap_or(0.0);
            println!("  {} ({:.0} of {:.0})", ingredient.name, have, par);
        }
    }
    Ok(())
}
