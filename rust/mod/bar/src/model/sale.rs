use serde::{Deserialize, Serialize};

/// House fallbacks applied when a recipe has no price or cost on record.
pub const DEFAULT_SELL_PRICE: f64 = 12.0;
pub const DEFAULT_COST_PER_DRINK: f64 = 2.5;

fn default_sell_price() -> f64 {
    DEFAULT_SELL_PRICE
}

fn default_cost_per_drink() -> f64 {
    DEFAULT_COST_PER_DRINK
}

/// Sale: one logged pour, most recent first in the ledger.
///
/// Price and cost are captured at sale time, already defaulted, so the
/// ledger stays meaningful even if the recipe is edited or removed later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Recipe name at the time of sale.
    pub name: String,

    pub quantity: u32,

    /// RFC 3339 timestamp.
    pub timestamp: String,

    #[serde(default = "default_sell_price")]
    pub sell_price: f64,

    #[serde(default = "default_cost_per_drink")]
    pub cost_per_drink: f64,
}

/// Entry in the "recently made" shortlist kept next to the sales ledger.
/// `time` is a display string (24h clock), not a sortable timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentMake {
    pub name: String,
    pub time: String,
    pub quantity: u32,
}
