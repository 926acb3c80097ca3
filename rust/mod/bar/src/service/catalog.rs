use openbar_core::{ListParams, ListResult, ServiceError, now_rfc3339};
use rand::Rng;
use serde::Serialize;

use super::BarService;
use crate::mix::{VolumeEstimate, estimate_volume_abv};
use crate::model::{DEFAULT_SELL_PRICE, FREE_RECIPE_LIMIT, Recipe, RecipeNote};

/// Catalog filters on top of [`ListParams`]. The `q` on the params matches
/// recipe name or any ingredient, case-insensitive.
#[derive(Debug, Default)]
pub struct CatalogFilters {
    /// Exact recipe type; `None` or `"all"` matches everything.
    pub recipe_type: Option<String>,
    /// Flavor tag that must appear in the recipe's flavor list.
    pub flavor: Option<String>,
    pub available_only: bool,
    pub custom_only: bool,
}

/// One recipe with its stock gaps and the volume estimate parsed out of
/// its instruction text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub recipe: Recipe,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<VolumeEstimate>,
    pub favorite: bool,
}

impl BarService {
    // ── Browsing ──

    /// List recipes. Free tier sees at most [`FREE_RECIPE_LIMIT`] of the
    /// filtered catalog; `total` always counts the full filtered set so
    /// callers can tell how many stay locked.
    pub fn list_recipes(&self, params: &ListParams, filters: &CatalogFilters) -> ListResult<Recipe> {
        let q = params.q.as_deref().unwrap_or("").to_lowercase();
        let mut filtered: Vec<&Recipe> = self
            .state
            .recipes
            .iter()
            .filter(|c| {
                let matches_search = q.is_empty()
                    || c.name.to_lowercase().contains(&q)
                    || c.ingredients.iter().any(|i| i.to_lowercase().contains(&q));
                let matches_type = match filters.recipe_type.as_deref() {
                    None | Some("all") => true,
                    Some(t) => c.recipe_type == t,
                };
                let matches_flavor = match filters.flavor.as_deref() {
                    None => true,
                    Some(f) => c.flavors.iter().any(|x| x == f),
                };
                let matches_available = !filters.available_only || c.can_make;
                let matches_custom = !filters.custom_only || c.is_custom;
                matches_search && matches_type && matches_flavor && matches_available && matches_custom
            })
            .collect();

        let total = filtered.len();
        if !self.state.premium.premium {
            filtered.truncate(FREE_RECIPE_LIMIT);
        }

        match params.sort.as_deref() {
            Some("name") => {
                filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            Some("abv") => filtered.sort_by(|a, b| b.abv.total_cmp(&a.abv)),
            Some("price") => filtered.sort_by(|a, b| {
                let pa = a.sell_price.unwrap_or(DEFAULT_SELL_PRICE);
                let pb = b.sell_price.unwrap_or(DEFAULT_SELL_PRICE);
                pa.total_cmp(&pb)
            }),
            _ => {}
        }

        let limit = params.limit.min(500);
        let items = filtered
            .into_iter()
            .skip(params.offset)
            .take(limit)
            .cloned()
            .collect();
        ListResult { items, total }
    }

    /// Types present in the catalog, first-seen order.
    pub fn recipe_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for c in &self.state.recipes {
            if !types.contains(&c.recipe_type) {
                types.push(c.recipe_type.clone());
            }
        }
        types
    }

    pub fn recipe_detail(&self, name: &str) -> Result<RecipeDetail, ServiceError> {
        let recipe = self
            .state
            .recipe(name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;
        let missing = self.state.missing_for(&recipe);
        // creator-saved recipes carry measured pours; everything else is
        // estimated from the instruction text
        let estimate = if recipe.ingredient_details.is_empty() {
            let est = estimate_volume_abv(&recipe.instructions);
            (est.total_volume_ml > 0).then_some(est)
        } else {
            let total: f64 = recipe.ingredient_details.iter().map(|d| d.amount).sum();
            Some(VolumeEstimate { total_volume_ml: total.round() as i64, abv: recipe.abv })
        };
        let favorite = self.state.favorites.iter().any(|n| n == name);
        Ok(RecipeDetail { recipe, missing, estimate, favorite })
    }

    /// Pick a random makeable recipe. Free tier burns one of its limited
    /// uses per pick; premium is unlimited.
    pub fn random_pick<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Recipe>, ServiceError> {
        if !self.state.premium.premium {
            if self.state.premium.random_uses_remaining == 0 {
                return Err(ServiceError::PermissionDenied(
                    "random pick limit reached".into(),
                ));
            }
            self.state.premium.random_uses_remaining =
                self.state.premium.random_uses_remaining.saturating_sub(1);
            self.persist()?;
        }

        let available: Vec<&Recipe> =
            self.state.recipes.iter().filter(|c| c.can_make).collect();
        if available.is_empty() {
            return Ok(None);
        }
        let idx = rng.gen_range(0..available.len());
        Ok(Some(available[idx].clone()))
    }

    // ── Editing ──

    /// Add a recipe at the top of the catalog. Free tier holds at most
    /// [`FREE_RECIPE_LIMIT`] recipes in total.
    pub fn create_recipe(&mut self, recipe: Recipe) -> Result<Recipe, ServiceError> {
        let name = recipe.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::Validation("recipe name is empty".into()));
        }
        if recipe.ingredients.is_empty() {
            return Err(ServiceError::Validation(
                "a recipe needs at least one ingredient".into(),
            ));
        }
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
        if !self.state.premium.premium && self.state.recipes.len() >= FREE_RECIPE_LIMIT {
            return Err(ServiceError::PermissionDenied(format!(
                "the free tier holds at most {FREE_RECIPE_LIMIT} recipes"
            )));
        }

        self.state.recipes.insert(0, Recipe { name, ..recipe });
        self.state.refresh_availability();
        self.persist()?;
        Ok(self.state.recipes[0].clone())
    }

    /// Remove a recipe. Logged sales keep their snapshot; the favorites
    /// and recently-made lists drop the name.
    pub fn delete_recipe(&mut self, name: &str) -> Result<(), ServiceError> {
        if self.state.recipe(name).is_none() {
            return Err(ServiceError::NotFound(format!("recipe {name} not found")));
        }
        self.state.recipes.retain(|c| c.name != name);
        self.state.favorites.retain(|n| n != name);
        self.state.recently_made.retain(|r| r.name != name);
        self.persist()?;
        Ok(())
    }

    /// Merge a JSON patch into a recipe. The name keys the record and is
    /// never patched; availability is recomputed in case the ingredient
    /// list changed.
    pub fn update_recipe(
        &mut self,
        name: &str,
        patch: serde_json::Value,
    ) -> Result<Recipe, ServiceError> {
        let idx = self
            .state
            .recipes
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;

        let updated: Recipe = Self::apply_patch(&self.state.recipes[idx], patch)?;
        self.state.recipes[idx] = updated;
        self.state.refresh_availability();
        self.persist()?;
        Ok(self.state.recipes[idx].clone())
    }

    /// Toggle a recipe in the favorites list. Returns whether it is a
    /// favorite afterwards.
    pub fn toggle_favorite(&mut self, name: &str) -> Result<bool, ServiceError> {
        if self.state.recipe(name).is_none() {
            return Err(ServiceError::NotFound(format!("recipe {name} not found")));
        }
        let now_favorite = if self.state.favorites.iter().any(|n| n == name) {
            self.state.favorites.retain(|n| n != name);
            false
        } else {
            self.state.favorites.push(name.to_string());
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    /// Append a staff note, stamped now.
    pub fn add_note(&mut self, name: &str, text: &str) -> Result<Recipe, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::Validation("note text is empty".into()));
        }
        let recipe = self
            .state
            .recipe_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;
        recipe.notes.push(RecipeNote { text: text.to_string(), date: now_rfc3339() });
        let updated = recipe.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Set or clear the custom image reference on a recipe.
    pub fn set_recipe_image(
        &mut self,
        name: &str,
        image: Option<String>,
    ) -> Result<Recipe, ServiceError> {
        let recipe = self
            .state
            .recipe_mut(name)
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;
        recipe.image = image;
        let updated = recipe.clone();
        self.persist()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::model::{FREE_RANDOM_USES, Technique};
    use crate::service::testutil::{premium_service, service};

    fn plain(name: &str) -> Recipe {
        Recipe {
            name: name.into(),
            ingredients: vec!["Gin".into()],
            ingredient_details: vec![],
            instructions: String::new(),
            recipe_type: "Classic".into(),
            technique: Technique::Shake,
            prep_time: "2 min".into(),
            glass: "Coupe Glass".into(),
            abv: 20.0,
            sell_price: None,
            cost_per_drink: None,
            can_make: false,
            missing_count: 0,
            flavors: vec![],
            dietary: vec![],
            tags: vec![],
            is_custom: false,
            notes: vec![],
            image: None,
            radar_scores: None,
        }
    }

    #[test]
    fn search_matches_name_and_ingredients() {
        let (_dir, svc) = service();
        let params = ListParams { q: Some("campari".into()), ..Default::default() };
        let res = svc.list_recipes(&params, &CatalogFilters::default());
        assert!(res.items.iter().any(|c| c.name == "Negroni"));
        assert!(res.items.iter().all(|c| {
            c.name.to_lowercase().contains("campari")
                || c.ingredients.iter().any(|i| i.to_lowercase().contains("campari"))
        }));
    }

    #[test]
    fn free_tier_truncates_but_reports_full_total() {
        let (_dir, mut svc) = service();
        for i in 0..10 {
            svc.state.recipes.push(plain(&format!("House Special {i}")));
        }
        svc.state.refresh_availability();

        let res = svc.list_recipes(&ListParams::default(), &CatalogFilters::default());
        assert_eq!(res.items.len(), FREE_RECIPE_LIMIT);
        assert_eq!(res.total, svc.state.recipes.len());

        svc.state.premium.premium = true;
        let res = svc.list_recipes(&ListParams::default(), &CatalogFilters::default());
        assert_eq!(res.items.len(), svc.state.recipes.len());
    }

    #[test]
    fn type_and_availability_filters() {
        let (_dir, svc) = service();
        let all = svc.list_recipes(
            &ListParams::default(),
            &CatalogFilters { recipe_type: Some("all".into()), ..Default::default() },
        );
        assert_eq!(all.total, svc.state.recipes.len());

        let modern = svc.list_recipes(
            &ListParams::default(),
            &CatalogFilters { recipe_type: Some("Modern".into()), ..Default::default() },
        );
        assert!(modern.total > 0);
        assert!(modern.items.iter().all(|c| c.recipe_type == "Modern"));

        let avail = svc.list_recipes(
            &ListParams::default(),
            &CatalogFilters { available_only: true, ..Default::default() },
        );
        assert!(avail.items.iter().all(|c| c.can_make));
    }

    #[test]
    fn detail_reports_missing_and_estimate() {
        let (_dir, svc) = service();
        // Espresso is out of stock in the default inventory.
        let detail = svc.recipe_detail("Espresso Martini").unwrap();
        assert!(detail.missing.contains(&"Espresso".to_string()));
        assert!(!detail.recipe.can_make);
        let est = detail.estimate.unwrap();
        assert!(est.total_volume_ml > 0);

        assert!(matches!(
            svc.recipe_detail("Nope"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn create_rejects_duplicates_case_insensitively() {
        let (_dir, mut svc) = service();
        let created = svc.create_recipe(plain("Bamboo")).unwrap();
        assert_eq!(svc.state.recipes[0].name, "Bamboo");
        // gin is in stock, so the new recipe is immediately makeable
        assert!(created.can_make);

        assert!(matches!(
            svc.create_recipe(plain("bamboo")),
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            svc.create_recipe(plain("   ")),
            Err(ServiceError::Validation(_))
        ));
        let no_ingredients = Recipe { ingredients: vec![], ..plain("Empty Glass") };
        assert!(matches!(
            svc.create_recipe(no_ingredients),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn free_tier_caps_created_recipes() {
        let (_dir, mut svc) = service();
        for i in svc.state.recipes.len()..FREE_RECIPE_LIMIT {
            svc.create_recipe(plain(&format!("Filler {i}"))).unwrap();
        }
        assert!(matches!(
            svc.create_recipe(plain("One Too Many")),
            Err(ServiceError::PermissionDenied(_))
        ));

        svc.state.premium.premium = true;
        assert!(svc.create_recipe(plain("One Too Many")).is_ok());
    }

    #[test]
    fn delete_drops_favorites_and_recent_entries() {
        let (_dir, mut svc) = service();
        svc.toggle_favorite("Gimlet").unwrap();
        svc.make_drink("Gimlet", 1).unwrap();

        svc.delete_recipe("Gimlet").unwrap();
        assert!(svc.state.recipe("Gimlet").is_none());
        assert!(svc.state.favorites.is_empty());
        assert!(svc.state.recently_made.iter().all(|r| r.name != "Gimlet"));
        // the sales ledger keeps its snapshot
        assert!(svc.state.sales.iter().any(|s| s.name == "Gimlet"));

        assert!(matches!(
            svc.delete_recipe("Gimlet"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn update_patches_fields_but_never_name() {
        let (_dir, mut svc) = service();
        let updated = svc
            .update_recipe(
                "Negroni",
                serde_json::json!({"sellPrice": 15.5, "name": "Renamed"}),
            )
            .unwrap();
        assert_eq!(updated.name, "Negroni");
        assert_eq!(updated.sell_price, Some(15.5));
        assert!(svc.state.recipe("Renamed").is_none());
    }

    #[test]
    fn favorite_toggles_on_and_off() {
        let (_dir, mut svc) = service();
        assert!(svc.toggle_favorite("Gimlet").unwrap());
        assert_eq!(svc.state.favorites, vec!["Gimlet".to_string()]);
        assert!(!svc.toggle_favorite("Gimlet").unwrap());
        assert!(svc.state.favorites.is_empty());
    }

    #[test]
    fn note_appends_with_date() {
        let (_dir, mut svc) = service();
        let updated = svc.add_note("Negroni", "Guests love it with mezcal").unwrap();
        assert_eq!(updated.notes.len(), 1);
        assert_eq!(updated.notes[0].text, "Guests love it with mezcal");
        assert!(!updated.notes[0].date.is_empty());

        assert!(matches!(
            svc.add_note("Negroni", "   "),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn image_sets_and_clears() {
        let (_dir, mut svc) = service();
        let updated = svc
            .set_recipe_image("Negroni", Some("negroni.jpg".into()))
            .unwrap();
        assert_eq!(updated.image.as_deref(), Some("negroni.jpg"));
        let updated = svc.set_recipe_image("Negroni", None).unwrap();
        assert!(updated.image.is_none());
    }

    #[test]
    fn random_pick_burns_free_uses() {
        let (_dir, mut svc) = service();
        let mut rng = StdRng::seed_from_u64(7);
        for used in 1..=FREE_RANDOM_USES {
            let pick = svc.random_pick(&mut rng).unwrap();
            assert!(pick.unwrap().can_make);
            assert_eq!(
                svc.state.premium.random_uses_remaining,
                FREE_RANDOM_USES - used
            );
        }
        assert!(matches!(
            svc.random_pick(&mut rng),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn random_pick_unlimited_for_premium() {
        let (_dir, mut svc) = premium_service();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert!(svc.random_pick(&mut rng).unwrap().is_some());
        }
        assert_eq!(svc.state.premium.random_uses_remaining, FREE_RANDOM_USES);
    }
}
