use openbar_core::{ServiceError, fmt_num};
use rand::Rng;
use serde::Serialize;

use super::BarService;
use crate::mix::{
    MixMetrics, NameIdeas, bartender_comment, compute, contributions, flavor_radar,
    generate_names, suggestions,
};
use crate::model::{ComposedRecipe, FlavorRadar, IngredientDetail, Recipe};

/// Everything the creator shows while a drink is being composed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPreview {
    pub metrics: MixMetrics,
    pub radar: FlavorRadar,
    pub comment: String,
    pub suggestions: Vec<String>,
    pub names: NameIdeas,
}

fn pour_names(composed: &ComposedRecipe) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(base) = &composed.base_spirit {
        names.push(base.clone());
    }
    for p in composed
        .modifiers
        .iter()
        .chain(&composed.acids)
        .chain(&composed.sweeteners)
        .chain(&composed.mixers)
    {
        names.push(p.name.clone());
    }
    names
}

fn pour_details(composed: &ComposedRecipe) -> Vec<IngredientDetail> {
    let mut details = Vec::new();
    if let Some(base) = &composed.base_spirit {
        details.push(IngredientDetail {
            name: base.clone(),
            amount: composed.base_amount_ml,
            unit: "ml".into(),
        });
    }
    for p in composed
        .modifiers
        .iter()
        .chain(&composed.acids)
        .chain(&composed.sweeteners)
        .chain(&composed.mixers)
    {
        details.push(IngredientDetail {
            name: p.name.clone(),
            amount: p.amount_ml,
            unit: "ml".into(),
        });
    }
    details
}

fn build_instructions(composed: &ComposedRecipe, details: &[IngredientDetail]) -> String {
    let specs: Vec<String> = details
        .iter()
        .map(|d| format!("{}ml {}", fmt_num(d.amount), d.name))
        .collect();
    let mut text = format!(
        "{}. {} with ice, strain into {}.",
        specs.join(", "),
        composed.technique,
        composed.glass
    );
    if !composed.garnishes.is_empty() {
        text.push_str(&format!(" Garnish: {}.", composed.garnishes.join(", ")));
    }
    if !composed.extras.is_empty() {
        text.push_str(&format!(" Extras: {}.", composed.extras.join(", ")));
    }
    text
}

impl BarService {
    // ── Recipe creator ──

    /// Live metrics, flavor profile, advice and name ideas for a drink
    /// still on the bench.
    pub fn preview_creation<R: Rng>(
        &self,
        rng: &mut R,
        composed: &ComposedRecipe,
    ) -> Result<CreatorPreview, ServiceError> {
        self.require_premium("Recipe Creator")?;

        let metrics = compute(
            &contributions(composed),
            composed.technique,
            &self.state.ingredients,
        );
        let radar = flavor_radar(composed, metrics.abv);
        Ok(CreatorPreview {
            comment: bartender_comment(&radar).to_string(),
            suggestions: suggestions(composed),
            names: generate_names(rng, composed),
            metrics,
            radar,
        })
    }

    /// Turn a composed drink into a catalog recipe at the top of the
    /// list. An unnamed drink gets one of the generated speakeasy names.
    pub fn save_creation<R: Rng>(
        &mut self,
        rng: &mut R,
        composed: &ComposedRecipe,
    ) -> Result<Recipe, ServiceError> {
        self.require_premium("Recipe Creator")?;

        let ingredients = pour_names(composed);
        if ingredients.is_empty() {
            return Err(ServiceError::Validation(
                "a creation needs at least one pour".into(),
            ));
        }

        let name = if composed.name.trim().is_empty() {
            generate_names(rng, composed).speakeasy
        } else {
            composed.name.trim().to_string()
        };
        let lower = name.to_lowercase();
        if self
            .state
            .recipes
            .iter()
            .any(|c| c.name.to_lowercase() == lower)
        {
            return Err(ServiceError::Conflict(format!(
                "recipe {name} already exists"
            )));
        }

        let metrics = compute(
            &contributions(composed),
            composed.technique,
            &self.state.ingredients,
        );
        let radar = flavor_radar(composed, metrics.abv);

        let mut flavors = Vec::new();
        if metrics.abv > 25.0 {
            flavors.push("boozy".to_string());
        }
        if !composed.acids.is_empty() {
            flavors.push("sour".to_string());
        }
        if !composed.sweeteners.is_empty() {
            flavors.push("sweet".to_string());
        }
        if radar.bitter > 3.0 {
            flavors.push("bitter".to_string());
        }
        if radar.botanical > 3.0 {
            flavors.push("herbal".to_string());
        }

        let details = pour_details(composed);
        let recipe = Recipe {
            instructions: build_instructions(composed, &details),
            name,
            ingredients,
            ingredient_details: details,
            recipe_type: "Custom Creation".into(),
            technique: composed.technique,
            prep_time: "3 min".into(),
            glass: composed.glass.clone(),
            abv: metrics.abv,
            sell_price: Some(metrics.suggested_price),
            cost_per_drink: Some(metrics.cost),
            can_make: false,
            missing_count: 0,
            flavors,
            dietary: vec!["vegan".into(), "gluten_free".into()],
            tags: vec!["signature".into()],
            is_custom: true,
            notes: vec![],
            image: None,
            radar_scores: Some(radar),
        };

        self.state.recipes.insert(0, recipe);
        self.state.refresh_availability();
        self.persist()?;
        Ok(self.state.recipes[0].clone())
    }
}
