//! Recipe catalog commands.
//!
//! `openbar recipe list`, `openbar recipe show "Negroni"`, etc.

use std::path::Path;

use anyhow::Result;
use bar::model::Recipe;
use bar::service::CatalogFilters;

use super::open_service;

pub fn list(
    search: Option<&str>,
    recipe_type: Option<&str>,
    flavor: Option<&str>,
    available: bool,
    custom: bool,
    sort: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
    json_output: bool,
    client_config_path: &Path,
) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let filters = CatalogFilters {
        recipe_type: recipe_type.map(str::to_string),
        flavor: flavor.map(str::to_string),
        available_only: available,
        custom_only: custom,
    };
    let result = svc.list_recipes(&super::list_params(search, sort, limit, offset), &filters);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.items.is_empty() {
        println!("No recipes match.");
        return Ok(());
    }

    println!(
        "{:1} {:28} {:16} {:>5} {:>7}  {:12}",
        "", "NAME", "TYPE", "ABV", "PRICE", "STATUS"
    );
    for recipe in &result.items {
        let marker = if svc.state().favorites.contains(&recipe.name) {
            "*"
        } else {
            " "
        };
        let price = recipe
            .sell_price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let status = if recipe.can_make {
            "ready".to_string()
        } else {
            format!("missing {}", recipe.missing_count)
        };
        println!(
            "{:1} {:28} {:16} {:>5.1} {:>7}  {:12}",
            marker, recipe.name, recipe.recipe_type, recipe.abv, price, status
        );
    }
    if result.items.len() < result.total {
        println!("{} of {} shown.", result.items.len(), result.total);
    }
    Ok(())
}

pub fn show(name: &str, json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let detail = svc.recipe_detail(name)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let recipe = &detail.recipe;
    println!("{}{}", recipe.name, if detail.favorite { " *" } else { "" });
    println!("  Type:       {}", recipe.recipe_type);
    println!("  Technique:  {}", recipe.technique);
    println!("  Glass:      {}", recipe.glass);
    println!("  Prep time:  {}", recipe.prep_time);
    println!("  ABV:        {:.1}%", recipe.abv);
    if let Some(price) = recipe.sell_price {
        println!("  Price:      {price:.2}");
    }
    if let Some(cost) = recipe.cost_per_drink {
        println!("  Cost:       {cost:.2}");
    }
    if let Some(estimate) = &detail.estimate {
        println!(
            "  Estimate:   {} ml at {:.1}%",
            estimate.total_volume_ml, estimate.abv
        );
    }
    if !recipe.flavors.is_empty() {
        println!("  Flavors:    {}", recipe.flavors.join(", "));
    }
    println!("  Ingredients:");
    for ingredient in &recipe.ingredients {
        let mark = if detail.missing.contains(ingredient) {
            "!"
        } else {
            " "
        };
        println!("   {mark} {ingredient}");
    }
    if !recipe.instructions.is_empty() {
        println!("  Instructions: {}", recipe.instructions);
    }
    for note in &recipe.notes {
        let day = note.date.get(..10).unwrap_or(&note.date);
        println!("  Note ({day}): {}", note.text);
    }
    Ok(())
}

pub fn create(json_body: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let recipe: Recipe =
        serde_json::from_str(json_body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;
    let created = svc.create_recipe(recipe)?;
    println!("Recipe \"{}\" created.", created.name);
    Ok(())
}

pub fn update(name: &str, json_body: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let patch: serde_json::Value =
        serde_json::from_str(json_body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;
    svc.update_recipe(name, patch)?;
    println!("Recipe \"{}\" updated.", name);
    Ok(())
}

pub fn delete(name: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.delete_recipe(name)?;
    println!("Recipe \"{}\" deleted.", name);
    Ok(())
}

/// Put a recipe on the favorites list, or take it off.
pub fn favorite(name: &str, on: bool, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    if svc.state().recipe(name).is_none() {
        anyhow::bail!("Recipe \"{}\" not found.", name);
    }
    let is_favorite = svc.state().favorites.iter().any(|n| n == name);
    if is_favorite == on {
        println!(
            "\"{}\" is {} a favorite.",
            name,
            if on { "already" } else { "not" }
        );
        return Ok(());
    }
    svc.toggle_favorite(name)?;
    println!(
        "\"{}\" {} favorites.",
        name,
        if on { "added to" } else { "removed from" }
    );
    Ok(())
}

pub fn note(name: &str, text: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.add_note(name, text)?;
    println!("Note added to \"{}\".", name);
    Ok(())
}

pub fn random(json_output: bool, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    match svc.random_pick(&mut rng)? {
        Some(recipe) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                println!(
                    "Tonight: {} ({}, {:.1}%)",
                    recipe.name, recipe.recipe_type, recipe.abv
                );
            }
        }
        None => println!("Nothing can be made right now."),
    }
    let status = svc.paywall_status();
    if !status.premium && !json_output {
        println!("{} free picks left.", status.random_uses_remaining);
    }
    Ok(())
}

pub fn types(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let types = svc.recipe_types();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&types)?);
    } else {
        for t in &types {
            println!("{t}");
        }
    }
    Ok(())
}

pub fn image(name: &str, url: Option<&str>, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    svc.set_recipe_image(name, url.map(str::to_string))?;
    match url {
        Some(url) => println!("Image for \"{}\" set to {}.", name, url),
        None => println!("Image for \"{}\" cleared.", name),
    }
    Ok(())
}
