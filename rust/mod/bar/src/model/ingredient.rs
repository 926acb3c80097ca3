use serde::{Deserialize, Serialize};

/// Canonical inventory categories, in display order.
pub const CATEGORIES: &[&str] = &[
    "Base Spirits",
    "Liqueurs",
    "Bitters",
    "Syrups & Sweeteners",
    "Fresh Citrus",
    "Fresh Herbs",
    "Mixers & Sodas",
    "Garnishes",
    "Wine & Champagne",
    "Other",
];

/// Ingredient: one stocked (or stock-out) item behind the bar.
/// PK = name. Recipes reference ingredients by exact name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Ingredient name, unique within the inventory.
    pub name: String,

    /// Inventory category (see [`CATEGORIES`]).
    pub category: String,

    /// Whether the item is currently on hand.
    #[serde(default)]
    pub in_stock: bool,

    /// Cost per bottle / unit, in the house currency.
    #[serde(default)]
    pub unit_cost: f64,

    /// Restock threshold. Stock below this level flags the item for the
    /// shopping list even while it is nominally in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par_level: Option<f64>,

    /// Current stock level, in the same unit as `par_level`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<f64>,
}

impl Ingredient {
    /// Below-par check. False when no par level is set.
    pub fn is_low(&self) -> bool {
        match self.par_level {
            Some(par) => self.current_stock.unwrap_or(0.0) < par,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_json_roundtrip() {
        let i = Ingredient {
            name: "Campari".into(),
            category: "Liqueurs".into(),
            in_stock: true,
            unit_cost: 24.0,
            par_level: Some(2.0),
            current_stock: Some(0.5),
        };
        let json = serde_json::to_string(&i).unwrap();
        assert!(json.contains("\"inStock\":true"));
        assert!(json.contains("\"parLevel\":2.0"));
        let back: Ingredient = serde_json::from_str(&json).unwrap();
        assert_eq!(i, back);
    }

    #[test]
    fn optional_stock_fields_are_omitted() {
        let i = Ingredient {
            name: "Mint".into(),
            category: "Fresh Herbs".into(),
            in_stock: false,
            unit_cost: 3.0,
            par_level: None,
            current_stock: None,
        };
        let json = serde_json::to_string(&i).unwrap();
        assert!(!json.contains("parLevel"));
        assert!(!json.contains("currentStock"));
    }

    #[test]
    fn low_stock_requires_a_par_level() {
        let mut i = Ingredient {
            name: "Lime Juice".into(),
            category: "Fresh Citrus".into(),
            in_stock: true,
            unit_cost: 4.0,
            par_level: None,
            current_stock: None,
        };
        assert!(!i.is_low());
        i.par_level = Some(3.0);
        assert!(i.is_low()); // missing stock counts as zero
        i.current_stock = Some(5.0);
        assert!(!i.is_low());
    }
}
