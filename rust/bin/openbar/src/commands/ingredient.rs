//! Inventory commands.

use std::path::Path;

use anyhow::Result;
use bar::service::InventoryFilters;

use super::open_service;

pub fn list(
    category: Option<&str>,
    stock_filter: Option<bool>,
    search: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
    json_output: bool,
    client_config_path: &Path,
) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let filters = InventoryFilters {
        category: category.map(str::to_string),
        in_stock: stock_filter,
    };
    let result = svc.list_ingredients(&super::list_params(search, None, limit, offset), &filters);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.items.is_empty() {
        println!("No ingredients match.");
        return Ok(());
    }

    println!(
        "{:26} {:22} {:>6} {:>6} {:>6}  {:5}",
        "NAME", "CATEGORY", "COST", "PAR", "COUNT", "STOCK"
    );
    for ingredient in &result.items {
        let par = ingredient
            .par_level
            .map(|p| format!("{p:.0}"))
            .unwrap_or_else(|| "-".to_string());
        let count = ingredient
            .current_stock
            .map(|c| format!("{c:.0}"))
            .unwrap_or_else(|| "-".to_string());
        let stock = if !ingredient.in_stock {
            "OUT"
        } else if ingredient.is_low() {
            "low"
        } else {
            "in"
        };
        println!(
            "{:26} {:22} {:>6.2} {:>6} {:>6}  {:5}",
            ingredient.name, ingredient.category, ingredient.unit_cost, par, count, stock
        );
    }
    if result.items.len() < result.total {
        println!("{} of {} shown.", result.items.len(), result.total);
    }
    Ok(())
}

pub fn add(name: &str, category: &str, cost: f64, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let ingredient = svc.add_ingredient(name, category, cost)?;
    println!(
        "Ingredient \"{}\" added to {}.",
        ingredient.name, ingredient.category
    );
    Ok(())
}

pub fn remove(name: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.remove_ingredient(name)?;
    println!("Ingredient \"{}\" removed.", name);
    Ok(())
}

/// Toggle stock, force it to a side with `target`, or set the counted
/// level with `count`.
pub fn stock(
    name: &str,
    target: Option<bool>,
    count: Option<f64>,
    client_config_path: &Path,
) -> Result<()> {
    let mut svc = open_service(client_config_path)?;

    if let Some(count) = count {
        let ingredient = svc.set_current_stock(name, count)?;
        println!(
            "\"{}\" counted at {:.0}.",
            ingredient.name,
            ingredient.current_stock.unwrap_or(0.0)
        );
        return Ok(());
    }

    let current = svc
        .state()
        .ingredient(name)
        .ok_or_else(|| anyhow::anyhow!("Ingredient \"{}\" not found.", name))?
        .in_stock;
    if let Some(target) = target {
        if current == target {
            println!(
                "\"{}\" is already {} stock.",
                name,
                if target { "in" } else { "out of" }
            );
            return Ok(());
        }
    }
    let ingredient = svc.toggle_stock(name)?;
    println!(
        "\"{}\" is now {} stock.",
        ingredient.name,
        if ingredient.in_stock { "in" } else { "out of" }
    );
    Ok(())
}

pub fn cost(name: &str, cost: f64, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let ingredient = svc.set_cost(name, cost)?;
    println!("\"{}\" costs {:.2}.", ingredient.name, ingredient.unit_cost);
    Ok(())
}

pub fn par(name: &str, par: f64, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let ingredient = svc.set_par(name, par)?;
    match ingredient.par_level {
        Some(level) => println!("Par for \"{}\" set to {:.0}.", ingredient.name, level),
        None => println!("Par for \"{}\" cleared.", ingredient.name),
    }
    Ok(())
}

pub fn categories(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let categories = svc.ingredient_categories();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        for category in &categories {
            println!("{category}");
        }
    }
    Ok(())
}
