use openbar_core::{round1, round2};
use serde::Serialize;

use crate::model::{ComposedRecipe, Ingredient, Technique};

use super::ingredient_abv;

/// Markup applied to raw cost when suggesting a menu price.
pub const PRICE_MARKUP: f64 = 3.5;

/// Slot a pour occupies in the build. Drives the alcohol contribution and
/// the bottle-cost fallback used for unknown ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Base,
    Modifier,
    Acid,
    Sweetener,
    Mixer,
}

impl Role {
    /// Fallback cost per 750ml bottle when the ingredient is not in the
    /// inventory or carries a zero cost.
    pub fn default_bottle_cost(&self) -> f64 {
        match self {
            Self::Base => 22.0,
            Self::Modifier => 18.0,
            Self::Acid => 4.0,
            Self::Sweetener => 6.0,
            Self::Mixer => 4.0,
        }
    }

    /// Only base and modifier pours count toward alcohol content.
    pub fn contributes_alcohol(&self) -> bool {
        matches!(self, Self::Base | Self::Modifier)
    }
}

/// One pour flattened out of a draft, tagged with its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub name: String,
    pub amount_ml: f64,
    pub role: Role,
}

/// Flatten a draft into contributions, in build order.
pub fn contributions(composed: &ComposedRecipe) -> Vec<Contribution> {
    let mut out = Vec::new();
    if let Some(base) = &composed.base_spirit {
        out.push(Contribution {
            name: base.clone(),
            amount_ml: composed.base_amount_ml,
            role: Role::Base,
        });
    }
    let slots = [
        (&composed.modifiers, Role::Modifier),
        (&composed.acids, Role::Acid),
        (&composed.sweeteners, Role::Sweetener),
        (&composed.mixers, Role::Mixer),
    ];
    for (pours, role) in slots {
        for p in pours {
            out.push(Contribution { name: p.name.clone(), amount_ml: p.amount_ml, role });
        }
    }
    out
}

/// Derived metrics for a draft recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixMetrics {
    /// Poured volume before dilution, ml (rounded).
    pub total_volume_ml: i64,
    /// Water added by the technique, ml (rounded).
    pub dilution_ml: i64,
    /// Served volume, ml (rounded).
    pub final_volume_ml: i64,
    /// Pure alcohol in the pour, ml (unrounded).
    pub alcohol_ml: f64,
    /// Percent after dilution, one decimal.
    pub abv: f64,
    /// Ingredient cost per drink, two decimals.
    pub cost: f64,
    /// `cost × 3.5`, two decimals.
    pub suggested_price: f64,
}

/// Compute volume, ABV and cost for a set of contributions.
///
/// Cost lookups match inventory entries by exact name; base spirits only
/// match within the "Base Spirits" category. A missing or zero `unit_cost`
/// falls back to the role default.
pub fn compute(
    contributions: &[Contribution],
    technique: Technique,
    inventory: &[Ingredient],
) -> MixMetrics {
    let mut total_alcohol = 0.0;
    let mut total_volume = 0.0;
    let mut total_cost = 0.0;

    for c in contributions {
        total_volume += c.amount_ml;
        if c.role.contributes_alcohol() {
            total_alcohol += c.amount_ml * ingredient_abv(&c.name) / 100.0;
        }
        let known = match c.role {
            Role::Base => inventory
                .iter()
                .find(|i| i.category == "Base Spirits" && i.name == c.name),
            _ => inventory.iter().find(|i| i.name == c.name),
        };
        let bottle_cost = known
            .map(|i| i.unit_cost)
            .filter(|cost| *cost != 0.0)
            .unwrap_or_else(|| c.role.default_bottle_cost());
        total_cost += bottle_cost * (c.amount_ml / 750.0);
    }

    let dilution = total_volume * technique.dilution_ratio();
    let final_volume = total_volume + dilution;
    let abv = if total_volume > 0.0 { total_alcohol / final_volume * 100.0 } else { 0.0 };

    MixMetrics {
        total_volume_ml: total_volume.round() as i64,
        dilution_ml: dilution.round() as i64,
        final_volume_ml: final_volume.round() as i64,
        alcohol_ml: total_alcohol,
        abv: round1(abv),
        cost: round2(total_cost),
        suggested_price: round2(total_cost * PRICE_MARKUP),
    }
}
