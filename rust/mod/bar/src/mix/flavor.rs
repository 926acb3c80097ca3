use openbar_core::round1;

use crate::model::{ComposedRecipe, FlavorRadar};

/// Ingredients that score on the Bitter axis (lowercase substring match).
const BITTER_KEYWORDS: &[&str] = &[
    "angostura",
    "peychaud",
    "orange bitters",
    "chocolate bitters",
    "campari",
    "aperol",
    "fernet",
    "averna",
    "absinthe",
];

/// Ingredients that score on the Botanical axis (lowercase substring match).
const BOTANICAL_KEYWORDS: &[&str] = &[
    "gin",
    "chartreuse",
    "green chartreuse",
    "yellow chartreuse",
    "elderflower",
    "st. germain",
    "benedictine",
    "vermouth",
    "dry vermouth",
    "sweet vermouth",
    "absinthe",
    "basil",
    "mint",
    "rosemary",
    "thyme",
];

/// Score a draft on the five radar axes. `abv` is the diluted ABV from
/// [`super::compute`].
///
/// Sweet and Sour scale with total sweetener and acid volume. Bitter and
/// Botanical look only at the base spirit and modifiers: a matching
/// modifier scales with its pour, a matching base scores a flat amount.
pub fn flavor_radar(composed: &ComposedRecipe, abv: f64) -> FlavorRadar {
    let sweet = (composed.sweetener_ml() / 20.0 * 10.0).min(10.0);
    let sour = (composed.acid_ml() / 30.0 * 10.0).min(10.0);

    let mut names: Vec<String> = Vec::new();
    if let Some(base) = &composed.base_spirit {
        names.push(base.to_lowercase());
    }
    names.extend(composed.modifiers.iter().map(|m| m.name.to_lowercase()));

    let modifier_amount = |name: &str| {
        composed
            .modifiers
            .iter()
            .find(|m| m.name.to_lowercase() == name)
            .map(|m| m.amount_ml)
    };

    let mut bitter = 0.0;
    for name in &names {
        if BITTER_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            bitter += match modifier_amount(name) {
                Some(amount) => (amount / 22.5 * 5.0).min(5.0),
                None => 3.0,
            };
        }
    }
    let bitter = bitter.min(10.0);

    let strength = (abv / 30.0 * 10.0).min(10.0);

    let mut botanical = 0.0;
    for name in &names {
        if BOTANICAL_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            botanical += match modifier_amount(name) {
                Some(amount) => (amount / 22.5 * 4.0).min(4.0),
                None if name.contains("gin") => 4.0,
                None => 2.5,
            };
        }
    }
    let botanical = botanical.min(10.0);

    FlavorRadar {
        sweet: round1(sweet),
        sour: round1(sour),
        bitter: round1(bitter),
        strength: round1(strength),
        botanical: round1(botanical),
    }
}

/// Bartender comment rules, first match wins.
pub fn bartender_comment(r: &FlavorRadar) -> &'static str {
    if r.strength > 7.0 && r.bitter > 5.0 {
        "Spirit-forward & bitter -- a bartender's handshake"
    } else if r.sweet > 6.0 && r.sour > 6.0 && r.strength < 5.0 {
        "Well-balanced sour with a refreshing finish"
    } else if r.sweet > 7.0 && r.botanical > 5.0 {
        "Sweet & floral with herbal complexity"
    } else if r.sour > 7.0 && r.strength > 5.0 {
        "Tart and punchy -- serve ice-cold"
    } else if r.bitter > 7.0 {
        "Boldly bitter -- an acquired taste"
    } else if r.botanical > 7.0 {
        "Aromatic & garden-fresh"
    } else if r.strength > 8.0 {
        "Dangerously smooth for its strength"
    } else if r.sweet > 7.0 && r.sour < 3.0 {
        "Sweet sipper -- add citrus for balance"
    } else if r.sour > 5.0 && r.sweet > 5.0 {
        "Classic sour balance -- well done"
    } else if r.strength > 5.0 && r.botanical > 3.0 {
        "Complex & contemplative"
    } else if r.strength > 3.0 {
        "A unique creation -- keep experimenting"
    } else {
        "Add ingredients to see the flavor profile"
    }
}
