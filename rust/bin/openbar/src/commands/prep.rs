//! Prep lab commands: house-made batches and their shelf life. Premium.

use std::path::Path;

use anyhow::Result;
use bar::model::{PREP_TEMPLATES, PrepKind};
use bar::service::BatchView;

use super::open_service;

fn parse_kind(raw: &str) -> Result<PrepKind> {
    match raw.to_lowercase().as_str() {
        "syrup" => Ok(PrepKind::Syrup),
        "juice" => Ok(PrepKind::Juice),
        _ => anyhow::bail!("Unknown kind \"{}\". Use syrup or juice.", raw),
    }
}

fn kind_str(kind: PrepKind) -> &'static str {
    match kind {
        PrepKind::Syrup => "syrup",
        PrepKind::Juice => "juice",
    }
}

/// Batches are addressed by any unique prefix of their id.
fn resolve_batch_id(batches: &[BatchView], prefix: &str) -> Result<String> {
    let matches: Vec<&BatchView> = batches
        .iter()
        .filter(|b| b.batch.id.starts_with(prefix))
        .collect();
    match matches.len() {
        0 => anyhow::bail!("No batch matches \"{}\".", prefix),
        1 => Ok(matches[0].batch.id.clone()),
        _ => anyhow::bail!("More than one batch matches \"{}\".", prefix),
    }
}

fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn list(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let batches = svc.list_batches()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&batches)?);
        return Ok(());
    }
    if batches.is_empty() {
        println!("Nothing on the prep shelf. Run: openbar prep add <name>");
        return Ok(());
    }
    println!(
        "{:10} {:24} {:>6} {:>9} {:>5}  {:8}",
        "ID", "NAME", "BATCH", "STOCK", "DAYS", "STATE"
    );
    for view in &batches {
        let b = &view.batch;
        println!(
            "{:10} {:24} {:>6} {:>7.0}ml {:>5}  {:8}",
            short(&b.id),
            b.name,
            format!("#{}", b.batch_number),
            b.current_stock_ml,
            view.days_remaining,
            view.freshness.as_str()
        );
    }
    Ok(())
}

/// Start a batch. A name matching a house template fills in kind, size and
/// shelf life; anything else needs the flags spelled out.
pub fn add(
    name: &str,
    kind: Option<&str>,
    size: Option<f64>,
    shelf_life: Option<i64>,
    notes: Option<&str>,
    client_config_path: &Path,
) -> Result<()> {
    let template = PREP_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()));
    let name = template.map(|t| t.name).unwrap_or(name);
    let kind = match (kind, template) {
        (Some(raw), _) => parse_kind(raw)?,
        (None, Some(t)) => t.kind,
        (None, None) => anyhow::bail!("\"{}\" is not a house template. Provide --kind.", name),
    };
    let size = match (size, template) {
        (Some(ml), _) => ml,
        (None, Some(t)) => t.batch_size_ml,
        (None, None) => anyhow::bail!("\"{}\" is not a house template. Provide --size.", name),
    };
    let shelf_life = match (shelf_life, template) {
        (Some(days), _) => days,
        (None, Some(t)) => t.shelf_life_days,
        (None, None) => {
            anyhow::bail!("\"{}\" is not a house template. Provide --shelf-life.", name)
        }
    };

    let mut svc = open_service(client_config_path)?;
    let view = svc.add_batch(name, kind, size, shelf_life, notes.unwrap_or(""))?;
    println!(
        "{} batch #{} made: {:.0}ml, keeps {} day(s).",
        view.batch.name, view.batch.batch_number, view.batch.batch_size_ml, view.batch.shelf_life_days
    );
    Ok(())
}

pub fn use_batch(id: &str, amount_ml: f64, client_config_path: &Path) -> Result<()> {
    if amount_ml <= 0.0 {
        anyhow::bail!("Amount must be positive.");
    }
    let mut svc = open_service(client_config_path)?;
    let full_id = resolve_batch_id(&svc.list_batches()?, id)?;
    let batch = svc.adjust_batch_stock(&full_id, -amount_ml)?;
    println!(
        "{:.0}ml poured. {} has {:.0}ml left.",
        amount_ml, batch.name, batch.current_stock_ml
    );
    Ok(())
}

pub fn delete(id: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let full_id = resolve_batch_id(&svc.list_batches()?, id)?;
    svc.remove_batch(&full_id)?;
    println!("Batch deleted.");
    Ok(())
}

pub fn templates(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let templates = svc.prep_templates()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(templates)?);
        return Ok(());
    }
    println!("{:24} {:6} {:>8} {:>6}", "NAME", "KIND", "SIZE", "KEEPS");
    for t in templates {
        println!(
            "{:24} {:6} {:>6.0}ml {:>4}d",
            t.name,
            kind_str(t.kind),
            t.batch_size_ml,
            t.shelf_life_days
        );
    }
    Ok(())
}

pub fn alerts(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let alerts = svc.expiry_alerts()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }
    if alerts.expired.is_empty() && alerts.expiring.is_empty() {
        println!("The prep shelf is fine.");
        return Ok(());
    }
    if !alerts.expired.is_empty() {
        println!("Toss these:");
        for name in &alerts.expired {
            println!("  {name}");
        }
    }
    if !alerts.expiring.is_empty() {
        println!("Use these soon:");
        for b in &alerts.expiring {
            println!("  {} ({} day(s) left)", b.name, b.days_remaining);
        }
    }
    Ok(())
}
