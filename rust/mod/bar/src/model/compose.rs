use serde::{Deserialize, Serialize};

use super::Technique;

/// Default pour sizes (ml) used when a slot is added without an amount.
pub const DEFAULT_BASE_ML: f64 = 60.0;
pub const DEFAULT_MODIFIER_ML: f64 = 22.5;
pub const DEFAULT_ACID_ML: f64 = 22.5;
pub const DEFAULT_SWEETENER_ML: f64 = 15.0;
pub const DEFAULT_MIXER_ML: f64 = 60.0;

/// One measured pour in a draft recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pour {
    pub name: String,
    pub amount_ml: f64,
}

impl Pour {
    pub fn new(name: impl Into<String>, amount_ml: f64) -> Self {
        Self { name: name.into(), amount_ml }
    }
}

/// Draft built up in the recipe creator. Slots mirror the build order of a
/// drink: one base spirit, then modifiers, acids, sweeteners and mixers,
/// with unmeasured garnishes and extras on top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComposedRecipe {
    /// Draft name. Empty means "generate one on save".
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_spirit: Option<String>,

    #[serde(default = "default_base_amount")]
    pub base_amount_ml: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Pour>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acids: Vec<Pour>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sweeteners: Vec<Pour>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixers: Vec<Pour>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub garnishes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    #[serde(default)]
    pub technique: Technique,

    #[serde(default = "default_glass")]
    pub glass: String,
}

fn default_base_amount() -> f64 {
    DEFAULT_BASE_ML
}

fn default_glass() -> String {
    "Coupe Glass".into()
}

impl Default for ComposedRecipe {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_spirit: None,
            base_amount_ml: DEFAULT_BASE_ML,
            modifiers: Vec::new(),
            acids: Vec::new(),
            sweeteners: Vec::new(),
            mixers: Vec::new(),
            garnishes: Vec::new(),
            extras: Vec::new(),
            technique: Technique::default(),
            glass: default_glass(),
        }
    }
}

impl ComposedRecipe {
    /// Every chosen name, lowercased, in build order. Garnishes and extras
    /// count here even though they carry no volume.
    pub fn chosen_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(base) = &self.base_spirit {
            names.push(base.to_lowercase());
        }
        for p in self.modifiers.iter().chain(&self.acids).chain(&self.sweeteners).chain(&self.mixers) {
            names.push(p.name.to_lowercase());
        }
        for n in self.garnishes.iter().chain(&self.extras) {
            names.push(n.to_lowercase());
        }
        names
    }

    pub fn acid_ml(&self) -> f64 {
        self.acids.iter().map(|p| p.amount_ml).sum()
    }

    pub fn sweetener_ml(&self) -> f64 {
        self.sweeteners.iter().map(|p| p.amount_ml).sum()
    }
}
