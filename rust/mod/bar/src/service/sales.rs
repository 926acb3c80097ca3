use chrono::Local;
use openbar_core::{ListParams, ListResult, ServiceError, now_rfc3339};

use super::BarService;
use crate::model::{DEFAULT_COST_PER_DRINK, DEFAULT_SELL_PRICE, RecentMake, Sale};

/// How many drinks the recently-made shortlist remembers.
const RECENT_CAP: usize = 10;

impl BarService {
    // ── Sales ──

    /// Log that `quantity` of a recipe went out. The sale captures price
    /// and cost as they stand now, with house defaults filling any gap,
    /// and the recipe moves to the top of the recently-made shortlist.
    pub fn make_drink(&mut self, name: &str, quantity: u32) -> Result<Sale, ServiceError> {
        if quantity == 0 {
            return Err(ServiceError::Validation(
                "quantity must be at least 1".into(),
            ));
        }
        let recipe = self
            .state
            .recipe(name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;
        if !recipe.can_make {
            let missing = self.state.missing_for(&recipe);
            return Err(ServiceError::Validation(format!(
                "missing {} ingredient(s): {}",
                missing.len(),
                missing.join(", ")
            )));
        }

        let sale = Sale {
            name: recipe.name.clone(),
            quantity,
            timestamp: now_rfc3339(),
            sell_price: recipe
                .sell_price
                .filter(|p| *p != 0.0)
                .unwrap_or(DEFAULT_SELL_PRICE),
            cost_per_drink: recipe
                .cost_per_drink
                .filter(|c| *c != 0.0)
                .unwrap_or(DEFAULT_COST_PER_DRINK),
        };
        self.state.sales.insert(0, sale.clone());

        self.state.recently_made.retain(|r| r.name != recipe.name);
        self.state.recently_made.truncate(RECENT_CAP - 1);
        self.state.recently_made.insert(
            0,
            RecentMake {
                name: recipe.name,
                time: Local::now().format("%H:%M").to_string(),
                quantity,
            },
        );

        self.persist()?;
        Ok(sale)
    }

    /// The sales ledger, most recent first. `q` filters by recipe name.
    pub fn list_sales(&self, params: &ListParams) -> ListResult<Sale> {
        let q = params.q.as_deref().unwrap_or("").to_lowercase();
        let filtered: Vec<&Sale> = self
            .state
            .sales
            .iter()
            .filter(|s| q.is_empty() || s.name.to_lowercase().contains(&q))
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

    pub fn recently_made(&self) -> &[RecentMake] {
        &self.state.recently_made
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::service;

    #[test]
    fn make_drink_logs_sale_with_defaulted_prices() {
        let (_dir, mut svc) = service();
        let sale = svc.make_drink("Negroni", 2).unwrap();
        assert_eq!(sale.quantity, 2);
        let negroni = svc.state.recipe("Negroni").unwrap();
        assert_eq!(sale.sell_price, negroni.sell_price.unwrap());
        assert_eq!(svc.state.sales.len(), 1);

        // a recipe without a price falls back to the house default
        svc.state.recipe_mut("Negroni").unwrap().sell_price = None;
        let sale = svc.make_drink("Negroni", 1).unwrap();
        assert_eq!(sale.sell_price, DEFAULT_SELL_PRICE);
        assert_eq!(sale.cost_per_drink, svc.state.recipe("Negroni").unwrap().cost_per_drink.unwrap());
    }

    #[test]
    fn make_drink_rejects_unavailable_recipes() {
        let (_dir, mut svc) = service();
        // Espresso Martini needs Espresso, which is out of stock
        let err = svc.make_drink("Espresso Martini", 1).unwrap_err();
        match err {
            ServiceError::Validation(msg) => assert!(msg.contains("Espresso")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(matches!(
            svc.make_drink("Negroni", 0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.make_drink("Nope", 1),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn recently_made_dedupes_and_caps() {
        let (_dir, mut svc) = service();
        let names: Vec<String> = svc
            .state
            .recipes
            .iter()
            .filter(|c| c.can_make)
            .map(|c| c.name.clone())
            .collect();
        assert!(names.len() >= 3);

        for name in &names {
            svc.make_drink(name, 1).unwrap();
        }
        // most recent first
        assert_eq!(svc.recently_made()[0].name, *names.last().unwrap());

        // remaking an old drink moves it to the front without duplicating
        svc.make_drink(&names[0], 1).unwrap();
        assert_eq!(svc.recently_made()[0].name, names[0]);
        let count = svc
            .recently_made()
            .iter()
            .filter(|r| r.name == names[0])
            .count();
        assert_eq!(count, 1);
        assert!(svc.recently_made().len() <= RECENT_CAP);
        assert_eq!(svc.state.sales.len(), names.len() + 1);
    }

    #[test]
    fn sales_list_pages_and_filters() {
        let (_dir, mut svc) = service();
        for _ in 0..3 {
            svc.make_drink("Negroni", 1).unwrap();
        }
        svc.make_drink("Gimlet", 1).unwrap();

        let all = svc.list_sales(&ListParams::default());
        assert_eq!(all.total, 4);
        assert_eq!(all.items[0].name, "Gimlet");

        let negronis = svc.list_sales(&ListParams {
            q: Some("negroni".into()),
            ..Default::default()
        });
        assert_eq!(negronis.total, 3);

        let page = svc.list_sales(&ListParams { limit: 2, offset: 2, ..Default::default() });
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 4);
    }
}
