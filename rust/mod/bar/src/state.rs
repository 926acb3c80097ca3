use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use kv::{KVError, KVStore};
use openbar_core::ServiceError;

use crate::defaults;
use crate::model::{
    BarTimer, HouseMade, Ingredient, PartySession, PremiumState, RecentMake, Recipe, Sale,
};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

const KEY_RECIPES: &str = "state:recipes";
const KEY_INGREDIENTS: &str = "state:ingredients";
const KEY_SALES: &str = "state:sales";
const KEY_FAVORITES: &str = "state:favorites";
const KEY_RECENTLY_MADE: &str = "state:recentlyMade";
const KEY_SPEED_RAIL: &str = "state:speedRail";
const KEY_HOUSE_MADE: &str = "state:houseMade";
const KEY_TIMERS: &str = "state:timers";
const KEY_PARTY: &str = "state:party";
const KEY_PREMIUM: &str = "state:premium";

/// Read-only dataset overlays consulted when no saved state exists.
const DATASET_RECIPES: &str = "dataset:recipes";
const DATASET_INGREDIENTS: &str = "dataset:ingredients";

// ---------------------------------------------------------------------------
// BarState
// ---------------------------------------------------------------------------

/// The whole bar, held in memory. Services mutate this aggregate and write
/// it back through [`StateStore::save`] once per operation.
#[derive(Debug, Default)]
pub struct BarState {
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<Ingredient>,
    pub sales: Vec<Sale>,
    pub favorites: Vec<String>,
    pub recently_made: Vec<RecentMake>,
    pub speed_rail: Vec<String>,
    pub house_made: Vec<HouseMade>,
    pub timers: Vec<BarTimer>,
    pub party: PartySession,
    pub premium: PremiumState,
}

impl BarState {
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn recipe_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.name == name)
    }

    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    pub fn ingredient_mut(&mut self, name: &str) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.name == name)
    }

    /// Ingredients of `recipe` that are not currently in stock.
    /// Names match exactly.
    pub fn missing_for(&self, recipe: &Recipe) -> Vec<String> {
        let stocked: HashSet<&str> = self
            .ingredients
            .iter()
            .filter(|i| i.in_stock)
            .map(|i| i.name.as_str())
            .collect();
        recipe
            .ingredients
            .iter()
            .filter(|name| !stocked.contains(name.as_str()))
            .cloned()
            .collect()
    }

    /// Recompute the `can_make` / `missing_count` snapshot on every recipe.
    /// Called after any mutation that can change availability.
    pub fn refresh_availability(&mut self) {
        let stocked: HashSet<&str> = self
            .ingredients
            .iter()
            .filter(|i| i.in_stock)
            .map(|i| i.name.as_str())
            .collect();
        for recipe in &mut self.recipes {
            let missing = recipe
                .ingredients
                .iter()
                .filter(|name| !stocked.contains(name.as_str()))
                .count();
            recipe.missing_count = missing as u32;
            recipe.can_make = missing == 0;
        }
    }
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

fn store_err(e: KVError) -> ServiceError {
    match e {
        KVError::ReadOnly(key) => ServiceError::ReadOnly(format!("key {key} is read-only")),
        other => ServiceError::Storage(other.to_string()),
    }
}

/// Loads and saves the [`BarState`] aggregate through a KV store.
///
/// Each collection lives under its own `state:*` key but every save writes
/// all of them in a single atomic batch, so a crash can never leave the
/// stored collections disagreeing with each other.
pub struct StateStore {
    kv: Box<dyn KVStore>,
}

impl StateStore {
    pub fn new(kv: Box<dyn KVStore>) -> Self {
        Self { kv }
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.kv.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "state read failed, falling back");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "state entry unreadable, falling back");
                None
            }
        }
    }

    /// Load the aggregate. Recipes and ingredients fall back first to the
    /// `dataset:*` overlay, then to the compiled-in defaults; every other
    /// collection starts empty. Unreadable entries are logged and skipped,
    /// never fatal.
    pub fn load(&self) -> BarState {
        let recipes = self
            .get_json(KEY_RECIPES)
            .or_else(|| self.get_json(DATASET_RECIPES))
            .unwrap_or_else(defaults::default_recipes);
        let ingredients = self
            .get_json(KEY_INGREDIENTS)
            .or_else(|| self.get_json(DATASET_INGREDIENTS))
            .unwrap_or_else(defaults::default_ingredients);

        let mut state = BarState {
            recipes,
            ingredients,
            sales: self.get_json(KEY_SALES).unwrap_or_default(),
            favorites: self.get_json(KEY_FAVORITES).unwrap_or_default(),
            recently_made: self.get_json(KEY_RECENTLY_MADE).unwrap_or_default(),
            speed_rail: self.get_json(KEY_SPEED_RAIL).unwrap_or_default(),
            house_made: self.get_json(KEY_HOUSE_MADE).unwrap_or_default(),
            timers: self.get_json(KEY_TIMERS).unwrap_or_default(),
            party: self.get_json(KEY_PARTY).unwrap_or_default(),
            premium: self.get_json(KEY_PREMIUM).unwrap_or_default(),
        };
        state.refresh_availability();
        debug!(
            recipes = state.recipes.len(),
            ingredients = state.ingredients.len(),
            sales = state.sales.len(),
            "state loaded"
        );
        state
    }

    fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ServiceError> {
        serde_json::to_vec(value).map_err(|e| ServiceError::Internal(e.to_string()))
    }

    /// Persist the aggregate in one atomic batch write.
    pub fn save(&self, state: &BarState) -> Result<(), ServiceError> {
        let recipes = Self::to_json(&state.recipes)?;
        let ingredients = Self::to_json(&state.ingredients)?;
        let sales = Self::to_json(&state.sales)?;
        let favorites = Self::to_json(&state.favorites)?;
        let recently_made = Self::to_json(&state.recently_made)?;
        let speed_rail = Self::to_json(&state.speed_rail)?;
        let house_made = Self::to_json(&state.house_made)?;
        let timers = Self::to_json(&state.timers)?;
        let party = Self::to_json(&state.party)?;
        let premium = Self::to_json(&state.premium)?;

        let entries: [(&str, &[u8]); 10] = [
            (KEY_RECIPES, &recipes),
            (KEY_INGREDIENTS, &ingredients),
            (KEY_SALES, &sales),
            (KEY_FAVORITES, &favorites),
            (KEY_RECENTLY_MADE, &recently_made),
            (KEY_SPEED_RAIL, &speed_rail),
            (KEY_HOUSE_MADE, &house_made),
            (KEY_TIMERS, &timers),
            (KEY_PARTY, &party),
            (KEY_PREMIUM, &premium),
        ];
        self.kv.batch_set(&entries).map_err(store_err)
    }
}
