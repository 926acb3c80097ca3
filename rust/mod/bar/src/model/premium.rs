use serde::{Deserialize, Serialize};

/// Recipes visible to free-tier users in catalog listings.
pub const FREE_RECIPE_LIMIT: usize = 15;

/// Random-pick uses granted to free-tier users.
pub const FREE_RANDOM_USES: u32 = 5;

/// Simulated premium entitlement. `premium` unlocks the gated tools and
/// removes the catalog and random-pick limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PremiumState {
    #[serde(default)]
    pub premium: bool,

    #[serde(default = "default_random_uses")]
    pub random_uses_remaining: u32,
}

fn default_random_uses() -> u32 {
    FREE_RANDOM_USES
}

impl Default for PremiumState {
    fn default() -> Self {
        Self { premium: false, random_uses_remaining: FREE_RANDOM_USES }
    }
}
