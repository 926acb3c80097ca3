//! Recipe creator commands. Premium.
//!
//! Pours are given as `NAME` or `NAME:ML`, e.g. `--modifier "Campari:30"`.
//! A bare name takes the default measure for its slot.

use std::path::Path;

use anyhow::Result;
use bar::model::{
    ComposedRecipe, DEFAULT_ACID_ML, DEFAULT_BASE_ML, DEFAULT_MIXER_ML, DEFAULT_MODIFIER_ML,
    DEFAULT_SWEETENER_ML, Pour, Technique,
};

use super::open_service;

/// Draft flags shared by preview and save.
#[derive(clap::Args, Debug)]
pub struct ComposeArgs {
    /// Base spirit, e.g. "Gin" or "Gin:45".
    #[arg(long)]
    pub base: Option<String>,

    /// Modifier pour (repeatable).
    #[arg(long = "modifier")]
    pub modifiers: Vec<String>,

    /// Acid pour (repeatable).
    #[arg(long = "acid")]
    pub acids: Vec<String>,

    /// Sweetener pour (repeatable).
    #[arg(long = "sweetener")]
    pub sweeteners: Vec<String>,

    /// Mixer pour (repeatable).
    #[arg(long = "mixer")]
    pub mixers: Vec<String>,

    /// Garnish (repeatable).
    #[arg(long = "garnish")]
    pub garnishes: Vec<String>,

    /// Extra, e.g. "Saline Drops" (repeatable).
    #[arg(long = "extra")]
    pub extras: Vec<String>,

    /// Shake, Stir, Build, Muddle, Blend or Layer.
    #[arg(long)]
    pub technique: Option<String>,

    /// Serving glass.
    #[arg(long)]
    pub glass: Option<String>,
}

/// Split `NAME[:ML]` into a pour, falling back to the slot default.
fn parse_pour(raw: &str, default_ml: f64) -> Pour {
    if let Some((name, amount)) = raw.rsplit_once(':') {
        if let Ok(ml) = amount.trim().parse::<f64>() {
            return Pour::new(name.trim(), ml);
        }
    }
    Pour::new(raw.trim(), default_ml)
}

fn pours(raw: &[String], default_ml: f64) -> Vec<Pour> {
    raw.iter().map(|r| parse_pour(r, default_ml)).collect()
}

fn composed_from(args: &ComposeArgs, name: Option<&str>) -> Result<ComposedRecipe> {
    let technique = match &args.technique {
        Some(raw) => Technique::from_str(raw)
            .ok_or_else(|| anyhow::anyhow!("Unknown technique: {}", raw))?,
        None => Technique::default(),
    };
    let (base_spirit, base_amount_ml) = match &args.base {
        Some(raw) => {
            let pour = parse_pour(raw, DEFAULT_BASE_ML);
            (Some(pour.name), pour.amount_ml)
        }
        None => (None, DEFAULT_BASE_ML),
    };

    Ok(ComposedRecipe {
        name: name.unwrap_or("").to_string(),
        base_spirit,
        base_amount_ml,
        modifiers: pours(&args.modifiers, DEFAULT_MODIFIER_ML),
        acids: pours(&args.acids, DEFAULT_ACID_ML),
        sweeteners: pours(&args.sweeteners, DEFAULT_SWEETENER_ML),
        mixers: pours(&args.mixers, DEFAULT_MIXER_ML),
        garnishes: args.garnishes.clone(),
        extras: args.extras.clone(),
        technique,
        glass: args
            .glass
            .clone()
            .unwrap_or_else(|| "Coupe Glass".to_string()),
    })
}

pub fn preview(args: &ComposeArgs, json_output: bool, client_config_path: &Path) -> Result<()> {
    let composed = composed_from(args, None)?;
    let svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let preview = svc.preview_creation(&mut rng, &composed)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    let m = &preview.metrics;
    println!(
        "Volume:   {} ml poured + {} ml water = {} ml served",
        m.total_volume_ml, m.dilution_ml, m.final_volume_ml
    );
    println!("ABV:      {:.1}%", m.abv);
    println!("Cost:     {:.2} a pour, {:.2} suggested", m.cost, m.suggested_price);
    let r = &preview.radar;
    println!(
        "Flavor:   sweet {:.1}, sour {:.1}, bitter {:.1}, strength {:.1}, botanical {:.1}",
        r.sweet, r.sour, r.bitter, r.strength, r.botanical
    );
    println!("Barkeep:  \"{}\"", preview.comment);
    if !preview.suggestions.is_empty() {
        println!("Suggestions:");
        for suggestion in &preview.suggestions {
            println!("  - {suggestion}");
        }
    }
    println!(
        "Names:    {} / {} / {}",
        preview.names.speakeasy, preview.names.geographic, preview.names.ingredient_focus
    );
    Ok(())
}

pub fn save(args: &ComposeArgs, name: Option<&str>, client_config_path: &Path) -> Result<()> {
    let composed = composed_from(args, name)?;
    let mut svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let recipe = svc.save_creation(&mut rng, &composed)?;
    println!(
        "Recipe \"{}\" saved: {:.1}% ABV, {:.2} suggested.",
        recipe.name,
        recipe.abv,
        recipe.sell_price.unwrap_or(0.0)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pour_parses_measure_suffix() {
        let pour = parse_pour("Campari:30", DEFAULT_MODIFIER_ML);
        assert_eq!(pour.name, "Campari");
        assert_eq!(pour.amount_ml, 30.0);
    }

    #[test]
    fn bare_name_takes_slot_default() {
        let pour = parse_pour("Sweet Vermouth", DEFAULT_MODIFIER_ML);
        assert_eq!(pour.name, "Sweet Vermouth");
        assert_eq!(pour.amount_ml, DEFAULT_MODIFIER_ML);
    }

    #[test]
    fn unparseable_measure_keeps_whole_name() {
        let pour = parse_pour("St. George Terroir:dry", 60.0);
        assert_eq!(pour.name, "St. George Terroir:dry");
        assert_eq!(pour.amount_ml, 60.0);
    }

    #[test]
    fn draft_defaults_and_technique_parse() {
        let args = ComposeArgs {
            base: Some("Gin:45".into()),
            modifiers: vec!["Campari".into()],
            acids: vec![],
            sweeteners: vec![],
            mixers: vec![],
            garnishes: vec!["Orange Peel".into()],
            extras: vec![],
            technique: Some("stir".into()),
            glass: None,
        };
        let composed = composed_from(&args, Some("House Negroni")).unwrap();
        assert_eq!(composed.name, "House Negroni");
        assert_eq!(composed.base_spirit.as_deref(), Some("Gin"));
        assert_eq!(composed.base_amount_ml, 45.0);
        assert_eq!(composed.modifiers[0].amount_ml, DEFAULT_MODIFIER_ML);
        assert_eq!(composed.technique, Technique::Stir);
        assert_eq!(composed.glass, "Coupe Glass");

        let bad = ComposeArgs {
            technique: Some("throw".into()),
            ..args
        };
        assert!(composed_from(&bad, None).is_err());
    }
}
