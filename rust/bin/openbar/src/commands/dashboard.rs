//! Home screen numbers, sales analytics and shift mode.

use std::path::Path;

use anyhow::Result;
use bar::service::Period;

use super::open_service;

pub fn show(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let stats = svc.dashboard();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "Recipes:    {} ({} pourable now)",
        stats.total_recipes, stats.available_recipes
    );
    println!(
        "Inventory:  {} of {} in stock, worth {:.2}",
        stats.in_stock_count, stats.total_ingredients, stats.inventory_value
    );
    println!("Favorites:  {}", stats.favorites);
    println!(
        "Today:      {} drinks, {:.2} taken",
        stats.today_drinks, stats.today_revenue
    );
    if stats.expiring_prep > 0 {
        println!("Prep:       {} batch(es) expiring or expired", stats.expiring_prep);
    }
    if !stats.out_of_stock.is_empty() {
        println!("Out:        {}", stats.out_of_stock.join(", "));
    }
    println!("By type:");
    for t in &stats.recipes_by_type {
        println!("  {:24} {:>3}", t.recipe_type, t.count);
    }
    Ok(())
}

pub fn stats(period: &str, json_output: bool, client_config_path: &Path) -> Result<()> {
    let period = Period::from_str(period)
        .ok_or_else(|| anyhow::anyhow!("Unknown period \"{}\". Use day, week or month.", period))?;
    let svc = open_service(client_config_path)?;
    let report = svc.sales_report(period)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Sales this {}:", report.period);
    println!("  Revenue:  {:.2}", report.total_revenue);
    println!("  Cost:     {:.2}", report.total_cost);
    println!(
        "  Profit:   {:.2} ({:.0}% margin)",
        report.total_profit, report.avg_margin
    );
    println!("  Drinks:   {}", report.total_drinks);
    if !report.top_sellers.is_empty() {
        println!("Top sellers:");
        for (i, d) in report.top_sellers.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, d.name, d.count);
        }
    }
    if !report.sales_by_type.is_empty() {
        println!("By type:");
        for t in &report.sales_by_type {
            println!("  {:24} {:>3}", t.recipe_type, t.count);
        }
    }
    Ok(())
}

pub fn shift(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let view = svc.shift_view()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Tonight so far: {} drinks, {:.2} taken.",
        view.today_drinks, view.today_revenue
    );
    if !view.favorites.is_empty() {
        println!("Favorites on deck:");
        for c in &view.favorites {
            println!("  * {} ({})", c.name, c.glass);
        }
    }
    println!("Pourable now ({}):", view.available.len());
    for c in &view.available {
        println!(
            "  {:28} {:16} {:>6}",
            c.name,
            c.recipe_type,
            c.sell_price.map_or("-".to_string(), |p| format!("{p:.2}"))
        );
    }
    Ok(())
}
