use openbar_core::{ListParams, ListResult, ServiceError, fmt_num};
use serde::Serialize;

use super::BarService;
use crate::model::{CATEGORIES, Ingredient};

/// Most bottles a speed rail holds.
pub const SPEED_RAIL_CAP: usize = 8;

#[derive(Debug, Default)]
pub struct InventoryFilters {
    pub category: Option<String>,
    /// `Some(true)` for in stock only, `Some(false)` for out of stock only.
    pub in_stock: Option<bool>,
}

/// What needs buying: hard outages plus bottles sitting under par.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingReport {
    pub out_of_stock: Vec<Ingredient>,
    pub low_stock: Vec<Ingredient>,
}

#[derive(Debug, Clone, Copy)]
pub enum RailMove {
    Left,
    Right,
}

impl RailMove {
    fn delta(self) -> i64 {
        match self {
            RailMove::Left => -1,
            RailMove::Right => 1,
        }
    }
}

impl BarService {
    // ── Stock ──

    pub fn list_ingredients(
        &self,
        params: &ListParams,
        filters: &InventoryFilters,
    ) -> ListResult<Ingredient> {
        let q = params.q.as_deref().unwrap_or("").to_lowercase();
        let filtered: Vec<&Ingredient> = self
            .state
            .ingredients
            .iter()
            .filter(|i| {
                let matches_search = q.is_empty() || i.name.to_lowercase().contains(&q);
                let matches_category = match filters.category.as_deref() {
                    None | Some("all") => true,
                    Some(c) => i.category == c,
                };
                let matches_stock = match filters.in_stock {
                    None => true,
                    Some(want) => i.in_stock == want,
                };
                matches_search && matches_category && matches_stock
            })
            .collect();

        let total = filtered.len();
        let limit = params.limit.min(500);
        let items = filtered
            .into_iter()
            .skip(params.offset)
            .take(limit)
            .cloned()
            .collect();
        ListResult { items, total }
    }

    /// Categories present in the inventory, first-seen order.
    pub fn ingredient_categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = Vec::new();
        for i in &self.state.ingredients {
            if !cats.contains(&i.category) {
                cats.push(i.category.clone());
            }
        }
        cats
    }

    /// Stock a new bottle, in stock from the start. The category must be
    /// one of the canonical shelves.
    pub fn add_ingredient(
        &mut self,
        name: &str,
        category: &str,
        unit_cost: f64,
    ) -> Result<Ingredient, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("ingredient name is empty".into()));
        }
        if !CATEGORIES.contains(&category) {
            return Err(ServiceError::Validation(format!(
                "unknown category {category}"
            )));
        }
        if unit_cost < 0.0 {
            return Err(ServiceError::Validation("cost cannot be negative".into()));
        }
        let lower = name.to_lowercase();
        if self
            .state
            .ingredients
            .iter()
            .any(|i| i.name.to_lowercase() == lower)
        {
            return Err(ServiceError::Conflict(format!(
                "ingredient {name} already exists"
            )));
        }

        let ing = Ingredient {
            name: name.to_string(),
            category: category.to_string(),
            in_stock: true,
            unit_cost,
            par_level: None,
            current_stock: None,
        };
        self.state.ingredients.push(ing.clone());
        self.state.refresh_availability();
        self.persist()?;
        Ok(ing)
    }

    /// Drop a bottle from the inventory. Recipes calling for it go
    /// unavailable; the speed rail loses it too.
    pub fn remove_ingredient(&mut self, name: &str) -> Result<(), ServiceError> {
        if self.state.ingredient(name).is_none() {
            return Err(ServiceError::NotFound(format!(
                "ingredient {name} not found"
            )));
        }
        self.state.ingredients.retain(|i| i.name != name);
        self.state.speed_rail.retain(|n| n != name);
        self.state.refresh_availability();
        self.persist()?;
        Ok(())
    }

    /// Flip a bottle in or out of stock and recompute which recipes the
    /// bar can still make.
    pub fn toggle_stock(&mut self, name: &str) -> Result<Ingredient, ServiceError> {
        let ing = self
            .state
            .ingredient_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient {name} not found")))?;
        ing.in_stock = !ing.in_stock;
        let updated = ing.clone();
        self.state.refresh_availability();
        self.persist()?;
        Ok(updated)
    }

    pub fn set_cost(&mut self, name: &str, cost: f64) -> Result<Ingredient, ServiceError> {
        if cost < 0.0 {
            return Err(ServiceError::Validation("cost cannot be negative".into()));
        }
        let ing = self
            .state
            .ingredient_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient {name} not found")))?;
        ing.unit_cost = cost;
        let updated = ing.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Set the reorder par level. Zero clears it.
    pub fn set_par(&mut self, name: &str, par: f64) -> Result<Ingredient, ServiceError> {
        if par < 0.0 {
            return Err(ServiceError::Validation("par level cannot be negative".into()));
        }
        let ing = self
            .state
            .ingredient_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient {name} not found")))?;
        ing.par_level = (par != 0.0).then_some(par);
        let updated = ing.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn set_current_stock(&mut self, name: &str, qty: f64) -> Result<Ingredient, ServiceError> {
        if qty < 0.0 {
            return Err(ServiceError::Validation("stock cannot be negative".into()));
        }
        let ing = self
            .state
            .ingredient_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient {name} not found")))?;
        ing.current_stock = Some(qty);
        let updated = ing.clone();
        self.persist()?;
        Ok(updated)
    }

    // ── Shopping ──

    /// Out-of-stock bottles plus bottles tracked under their par level.
    /// A bottle with a par but no stock count yet is not flagged low; it
    /// still lands on the order where missing counts as zero.
    pub fn shopping_list(&self) -> ShoppingReport {
        let out_of_stock = self
            .state
            .ingredients
            .iter()
            .filter(|i| !i.in_stock)
            .cloned()
            .collect();
        let low_stock = self
            .state
            .ingredients
            .iter()
            .filter(|i| {
                i.par_level
                    .is_some_and(|p| i.current_stock.is_some_and(|c| c < p))
            })
            .cloned()
            .collect();
        ShoppingReport { out_of_stock, low_stock }
    }

    /// Plain-text order, one `- name (need n)` line per bottle to buy.
    pub fn order_text(&self) -> String {
        self.state
            .ingredients
            .iter()
            .filter(|i| !i.in_stock || i.is_low())
            .map(|i| match i.par_level {
                Some(par) => {
                    let need = par - i.current_stock.unwrap_or(0.0);
                    format!("- {} (need {})", i.name, fmt_num(need))
                }
                None => format!("- {}", i.name),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Speed rail ──

    /// Spirits that could go on the rail right now.
    pub fn rail_candidates(&self) -> Result<Vec<Ingredient>, ServiceError> {
        self.require_premium("Speed Rail")?;
        Ok(self
            .state
            .ingredients
            .iter()
            .filter(|i| i.category == "Base Spirits" && i.in_stock)
            .cloned()
            .collect())
    }

    pub fn rail(&self) -> Result<Vec<String>, ServiceError> {
        self.require_premium("Speed Rail")?;
        Ok(self.state.speed_rail.clone())
    }

    pub fn rail_add(&mut self, name: &str) -> Result<Vec<String>, ServiceError> {
        self.require_premium("Speed Rail")?;
        let ing = self
            .state
            .ingredient(name)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient {name} not found")))?;
        if ing.category != "Base Spirits" {
            return Err(ServiceError::Validation(
                "only base spirits go on the rail".into(),
            ));
        }
        if self.state.speed_rail.iter().any(|n| n == name) {
            return Err(ServiceError::Conflict(format!(
                "{name} is already on the rail"
            )));
        }
        if self.state.speed_rail.len() >= SPEED_RAIL_CAP {
            return Err(ServiceError::Validation(format!(
                "the rail holds at most {SPEED_RAIL_CAP} bottles"
            )));
        }
        self.state.speed_rail.push(name.to_string());
        self.persist()?;
        Ok(self.state.speed_rail.clone())
    }

    pub fn rail_remove(&mut self, name: &str) -> Result<Vec<String>, ServiceError> {
        self.require_premium("Speed Rail")?;
        if !self.state.speed_rail.iter().any(|n| n == name) {
            return Err(ServiceError::NotFound(format!("{name} is not on the rail")));
        }
        self.state.speed_rail.retain(|n| n != name);
        self.persist()?;
        Ok(self.state.speed_rail.clone())
    }

    /// Swap a bottle with its neighbour. Already at the end means no move.
    pub fn rail_move(&mut self, name: &str, dir: RailMove) -> Result<Vec<String>, ServiceError> {
        self.require_premium("Speed Rail")?;
        let idx = self
            .state
            .speed_rail
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ServiceError::NotFound(format!("{name} is not on the rail")))?;
        let target = idx as i64 + dir.delta();
        if target >= 0 && (target as usize) < self.state.speed_rail.len() {
            self.state.speed_rail.swap(idx, target as usize);
            self.persist()?;
        }
        Ok(self.state.speed_rail.clone())
    }
}

#[cfg(test)]
mod tests {
    use kv::RedbStore;
    use tempfile::TempDir;

    use super::*;
    use crate::service::testutil::{premium_service, service};

    #[test]
    fn toggle_stock_updates_recipe_availability() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bar.redb");

        let mut svc = BarService::open(Box::new(RedbStore::open(&path).unwrap()));
        assert!(svc.state.recipe("Negroni").unwrap().can_make);
        let ing = svc.toggle_stock("Campari").unwrap();
        assert!(!ing.in_stock);
        assert!(!svc.state.recipe("Negroni").unwrap().can_make);

        // survives a reopen
        drop(svc);
        let svc = BarService::open(Box::new(RedbStore::open(&path).unwrap()));
        assert!(!svc.state.ingredient("Campari").unwrap().in_stock);
        assert!(!svc.state.recipe("Negroni").unwrap().can_make);
    }

    #[test]
    fn add_ingredient_unlocks_waiting_recipes() {
        let (_dir, mut svc) = service();
        // a recipe calling for a bottle the bar does not carry yet
        svc.state.recipes[0].ingredients.push("Yuzu Juice".into());
        svc.state.refresh_availability();
        assert!(!svc.state.recipes[0].can_make);

        let ing = svc.add_ingredient("Yuzu Juice", "Fresh Citrus", 9.0).unwrap();
        assert!(ing.in_stock);
        assert!(svc.state.recipes[0].can_make);
    }

    #[test]
    fn add_ingredient_rejects_bad_input() {
        let (_dir, mut svc) = service();
        assert!(matches!(
            svc.add_ingredient("  ", "Other", 5.0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_ingredient("Yuzu Juice", "Citrus", 5.0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_ingredient("Yuzu Juice", "Fresh Citrus", -1.0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_ingredient("campari", "Liqueurs", 24.0),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn remove_ingredient_breaks_availability_and_rail() {
        let (_dir, mut svc) = premium_service();
        svc.rail_add("Gin").unwrap();
        assert!(svc.state.recipe("Negroni").unwrap().can_make);

        svc.remove_ingredient("Gin").unwrap();
        assert!(svc.state.ingredient("Gin").is_none());
        assert!(svc.state.speed_rail.is_empty());
        assert!(!svc.state.recipe("Negroni").unwrap().can_make);

        assert!(matches!(
            svc.remove_ingredient("Gin"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn par_level_zero_clears() {
        let (_dir, mut svc) = service();
        let ing = svc.set_par("Campari", 2.0).unwrap();
        assert_eq!(ing.par_level, Some(2.0));
        let ing = svc.set_par("Campari", 0.0).unwrap();
        assert_eq!(ing.par_level, None);
        assert!(matches!(
            svc.set_par("Campari", -1.0),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn untracked_stock_orders_but_is_not_flagged_low() {
        let (_dir, mut svc) = service();
        // par set, stock count never recorded
        svc.set_par("Campari", 2.0).unwrap();

        let report = svc.shopping_list();
        assert!(!report.low_stock.iter().any(|i| i.name == "Campari"));
        assert!(svc.order_text().contains("- Campari (need 2)"));

        // once counted below par it shows up in both
        svc.set_current_stock("Campari", 0.5).unwrap();
        let report = svc.shopping_list();
        assert!(report.low_stock.iter().any(|i| i.name == "Campari"));
        assert!(svc.order_text().contains("- Campari (need 1.5)"));
    }

    #[test]
    fn order_text_lists_outages() {
        let (_dir, svc) = service();
        let text = svc.order_text();
        assert!(text.contains("- Espresso"));
        assert!(text.lines().all(|l| l.starts_with("- ")));
    }

    #[test]
    fn rail_is_premium_only() {
        let (_dir, mut svc) = service();
        assert!(matches!(
            svc.rail_add("Vodka"),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn rail_add_move_remove() {
        let (_dir, mut svc) = premium_service();
        svc.rail_add("Vodka").unwrap();
        svc.rail_add("Gin").unwrap();
        assert_eq!(svc.rail().unwrap(), vec!["Vodka".to_string(), "Gin".to_string()]);

        // duplicates and non-spirits are rejected
        assert!(matches!(svc.rail_add("Gin"), Err(ServiceError::Conflict(_))));
        assert!(matches!(
            svc.rail_add("Campari"),
            Err(ServiceError::Validation(_))
        ));

        let rail = svc.rail_move("Gin", RailMove::Left).unwrap();
        assert_eq!(rail, vec!["Gin".to_string(), "Vodka".to_string()]);
        // already leftmost, no-op
        let rail = svc.rail_move("Gin", RailMove::Left).unwrap();
        assert_eq!(rail[0], "Gin");

        let rail = svc.rail_remove("Vodka").unwrap();
        assert_eq!(rail, vec!["Gin".to_string()]);
        assert!(matches!(
            svc.rail_remove("Vodka"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn rail_caps_at_eight() {
        let (_dir, mut svc) = premium_service();
        for name in ["Mezcal", "Dark Rum", "Irish Whiskey", "Pisco"] {
            svc.state.ingredients.push(Ingredient {
                name: name.into(),
                category: "Base Spirits".into(),
                in_stock: true,
                unit_cost: 20.0,
                par_level: None,
                current_stock: None,
            });
        }
        let spirits: Vec<String> = svc
            .rail_candidates()
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert!(spirits.len() > SPEED_RAIL_CAP);
        for name in spirits.iter().take(SPEED_RAIL_CAP) {
            svc.rail_add(name).unwrap();
        }
        assert!(matches!(
            svc.rail_add(&spirits[SPEED_RAIL_CAP]),
            Err(ServiceError::Validation(_))
        ));
    }
}
