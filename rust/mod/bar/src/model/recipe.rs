use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Technique
// ---------------------------------------------------------------------------

/// Preparation technique. Each technique carries a fixed dilution ratio
/// applied to the total poured volume during metric calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technique {
    Shake,
    Stir,
    Build,
    Muddle,
    Blend,
    Layer,
}

impl Default for Technique {
    fn default() -> Self {
        Self::Shake
    }
}

impl Technique {
    pub const ALL: [Technique; 6] = [
        Self::Shake,
        Self::Stir,
        Self::Build,
        Self::Muddle,
        Self::Blend,
        Self::Layer,
    ];

    /// Fraction of the poured volume added as water by this technique.
    pub fn dilution_ratio(&self) -> f64 {
        match self {
            Self::Shake => 0.25,
            Self::Stir => 0.20,
            Self::Build => 0.10,
            Self::Muddle => 0.15,
            Self::Blend => 0.30,
            Self::Layer => 0.05,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shake => "Shake",
            Self::Stir => "Stir",
            Self::Build => "Build",
            Self::Muddle => "Muddle",
            Self::Blend => "Blend",
            Self::Layer => "Layer",
        }
    }

    /// Case-insensitive parse. Returns `None` for unknown techniques.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shake" => Some(Self::Shake),
            "stir" => Some(Self::Stir),
            "build" => Some(Self::Build),
            "muddle" => Some(Self::Muddle),
            "blend" => Some(Self::Blend),
            "layer" => Some(Self::Layer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// Serving glass options offered by the recipe creator.
pub const GLASSES: &[&str] = &[
    "Coupe Glass",
    "Old Fashioned Glass",
    "Highball Glass",
    "Martini Glass",
    "Nick & Nora Glass",
    "Collins Glass",
];

/// Dated free-text note attached to a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNote {
    pub text: String,
    /// RFC 3339 timestamp.
    pub date: String,
}

/// Flavor radar scores, each axis 0 to 10. Stored on recipes saved from the
/// creator; classics and imports carry none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlavorRadar {
    pub sweet: f64,
    pub sour: f64,
    pub bitter: f64,
    pub strength: f64,
    pub botanical: f64,
}

/// Measured pour for one ingredient of a custom creation. Classics carry
/// their measures in the instruction text instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientDetail {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Recipe: one cocktail on the menu. PK = name.
///
/// `can_make` / `missing_count` are derived from the current inventory and
/// recomputed after every inventory mutation; the stored values are only a
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe name, unique within the catalog.
    pub name: String,

    /// Ingredient names, matched against the inventory by exact name.
    pub ingredients: Vec<String>,

    /// Measured pours, present on creator-saved recipes only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredient_details: Vec<IngredientDetail>,

    /// Free-text preparation instructions.
    #[serde(default)]
    pub instructions: String,

    /// Menu category ("Classic", "Modern", "Custom Creation", ...).
    #[serde(rename = "type")]
    pub recipe_type: String,

    #[serde(default)]
    pub technique: Technique,

    /// Display string, e.g. "3 min".
    #[serde(default)]
    pub prep_time: String,

    #[serde(default)]
    pub glass: String,

    /// Alcohol by volume, percent.
    #[serde(default)]
    pub abv: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_drink: Option<f64>,

    // --- derived availability snapshot ---
    #[serde(default)]
    pub can_make: bool,
    #[serde(default)]
    pub missing_count: u32,

    // --- classification ---
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flavors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// True for recipes saved from the creator.
    #[serde(default)]
    pub is_custom: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<RecipeNote>,

    /// Custom image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radar_scores: Option<FlavorRadar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daiquiri() -> Recipe {
        Recipe {
            name: "Daiquiri".into(),
            ingredients: vec!["White Rum".into(), "Lime Juice".into(), "Simple Syrup".into()],
            ingredient_details: vec![],
            instructions: "Shake with ice, strain into Coupe Glass.".into(),
            recipe_type: "Classic".into(),
            technique: Technique::Shake,
            prep_time: "3 min".into(),
            glass: "Coupe Glass".into(),
            abv: 20.0,
            sell_price: Some(12.0),
            cost_per_drink: Some(2.1),
            can_make: false,
            missing_count: 0,
            flavors: vec!["sour".into()],
            dietary: vec![],
            tags: vec![],
            is_custom: false,
            notes: vec![],
            image: None,
            radar_scores: None,
        }
    }

    #[test]
    fn dilution_ratios() {
        assert_eq!(Technique::Shake.dilution_ratio(), 0.25);
        assert_eq!(Technique::Stir.dilution_ratio(), 0.20);
        assert_eq!(Technique::Build.dilution_ratio(), 0.10);
        assert_eq!(Technique::Muddle.dilution_ratio(), 0.15);
        assert_eq!(Technique::Blend.dilution_ratio(), 0.30);
        assert_eq!(Technique::Layer.dilution_ratio(), 0.05);
    }

    #[test]
    fn technique_parse_is_case_insensitive() {
        assert_eq!(Technique::from_str("shake"), Some(Technique::Shake));
        assert_eq!(Technique::from_str("STIR"), Some(Technique::Stir));
        assert_eq!(Technique::from_str("throw"), None);
    }

    #[test]
    fn recipe_json_uses_type_key() {
        let json = serde_json::to_string(&daiquiri()).unwrap();
        assert!(json.contains("\"type\":\"Classic\""));
        assert!(json.contains("\"technique\":\"Shake\""));
        assert!(!json.contains("\"notes\""));
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, daiquiri());
    }

    #[test]
    fn radar_scores_use_axis_names() {
        let mut r = daiquiri();
        r.radar_scores = Some(FlavorRadar {
            sweet: 5.0,
            sour: 7.5,
            bitter: 0.0,
            strength: 6.0,
            botanical: 0.0,
        });
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"radarScores\":{\"Sweet\":5.0,\"Sour\":7.5"));
    }

    #[test]
    fn recipe_defaults_fill_missing_fields() {
        let r: Recipe =
            serde_json::from_str(r#"{"name":"Shot","ingredients":["Vodka"],"type":"Classic"}"#)
                .unwrap();
        assert_eq!(r.technique, Technique::Shake);
        assert_eq!(r.abv, 0.0);
        assert!(!r.can_make);
        assert!(r.sell_price.is_none());
    }
}
