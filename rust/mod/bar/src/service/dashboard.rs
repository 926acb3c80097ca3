use chrono::{DateTime, Duration, Local, Months, NaiveDate, NaiveTime, Utc};
use openbar_core::ServiceError;
use serde::Serialize;

use super::BarService;
use super::prep::EXPIRY_WARN_DAYS;
use crate::model::Recipe;

/// Value assumed for an in-stock bottle with no cost on record.
const FALLBACK_BOTTLE_VALUE: f64 = 15.0;

/// Reporting window for sales analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    #[default]
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn from_str(s: &str) -> Option<Period> {
        match s {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }

    /// Start of the window: midnight today, seven days back, or one
    /// calendar month back.
    fn start(self, now: DateTime<Local>) -> DateTime<Local> {
        match self {
            Period::Day => now
                .with_time(NaiveTime::MIN)
                .earliest()
                .unwrap_or(now),
            Period::Week => now - Duration::days(7),
            Period::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline numbers for the home screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_recipes: usize,
    pub available_recipes: usize,
    pub in_stock_count: usize,
    pub total_ingredients: usize,
    pub favorites: usize,
    pub today_drinks: u32,
    pub today_revenue: f64,
    pub inventory_value: f64,
    /// House-made batches already expired or inside the warning window.
    pub expiring_prep: usize,
    /// Bottles flat out of stock, in inventory order.
    pub out_of_stock: Vec<String>,
    pub recipes_by_type: Vec<TypeCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    pub recipe_type: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct DrinkCount {
    pub name: String,
    pub count: u32,
}

/// Sales analytics over a [`Period`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: Period,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub total_drinks: u32,
    /// Percent of revenue kept, rounded to a whole number.
    pub avg_margin: f64,
    pub top_sellers: Vec<DrinkCount>,
    pub sales_by_type: Vec<TypeCount>,
}

/// Quick-service snapshot: today so far plus what the bar can pour now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftView {
    pub today_drinks: u32,
    pub today_revenue: f64,
    pub available: Vec<Recipe>,
    pub favorites: Vec<Recipe>,
}

fn local_day(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

fn count_into(counts: &mut Vec<(String, u32)>, key: String, quantity: u32) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += quantity,
        None => counts.push((key, quantity)),
    }
}

impl BarService {
    // ── Dashboard ──

    pub fn dashboard(&self) -> DashboardStats {
        let today = Local::now().date_naive();
        let today_sales: Vec<_> = self
            .state
            .sales
            .iter()
            .filter(|s| local_day(&s.timestamp) == Some(today))
            .collect();
        let today_drinks = today_sales.iter().map(|s| s.quantity).sum();
        let today_revenue = today_sales
            .iter()
            .map(|s| s.sell_price * s.quantity as f64)
            .sum();

        let inventory_value = self
            .state
            .ingredients
            .iter()
            .filter(|i| i.in_stock)
            .map(|i| {
                if i.unit_cost != 0.0 {
                    i.unit_cost
                } else {
                    FALLBACK_BOTTLE_VALUE
                }
            })
            .sum();

        let mut by_type: Vec<(String, u32)> = Vec::new();
        for c in &self.state.recipes {
            count_into(&mut by_type, c.recipe_type.clone(), 1);
        }

        let now = Utc::now();
        let expiring_prep = self
            .state
            .house_made
            .iter()
            .filter(|b| b.days_remaining(now) <= EXPIRY_WARN_DAYS)
            .count();

        DashboardStats {
            total_recipes: self.state.recipes.len(),
            available_recipes: self.state.recipes.iter().filter(|c| c.can_make).count(),
            in_stock_count: self.state.ingredients.iter().filter(|i| i.in_stock).count(),
            total_ingredients: self.state.ingredients.len(),
            favorites: self.state.favorites.len(),
            today_drinks,
            today_revenue,
            inventory_value,
            expiring_prep,
            out_of_stock: self
                .state
                .ingredients
                .iter()
                .filter(|i| !i.in_stock)
                .map(|i| i.name.clone())
                .collect(),
            recipes_by_type: by_type
                .into_iter()
                .map(|(recipe_type, count)| TypeCount { recipe_type, count })
                .collect(),
        }
    }

    // ── Analytics ──

    pub fn sales_report(&self, period: Period) -> Result<SalesReport, ServiceError> {
        self.require_premium("Analytics")?;

        let start = period.start(Local::now());
        let in_period: Vec<_> = self
            .state
            .sales
            .iter()
            .filter(|s| {
                DateTime::parse_from_rfc3339(&s.timestamp)
                    .ok()
                    .map(|dt| dt.with_timezone(&Local) >= start)
                    .unwrap_or(false)
            })
            .collect();

        let total_revenue: f64 = in_period
            .iter()
            .map(|s| s.sell_price * s.quantity as f64)
            .sum();
        let total_cost: f64 = in_period
            .iter()
            .map(|s| s.cost_per_drink * s.quantity as f64)
            .sum();
        let total_profit = total_revenue - total_cost;
        let total_drinks: u32 = in_period.iter().map(|s| s.quantity).sum();
        let avg_margin = if total_revenue > 0.0 {
            (total_profit / total_revenue * 100.0).round()
        } else {
            0.0
        };

        let mut by_drink: Vec<(String, u32)> = Vec::new();
        for s in &in_period {
            count_into(&mut by_drink, s.name.clone(), s.quantity);
        }
        by_drink.sort_by(|a, b| b.1.cmp(&a.1));
        by_drink.truncate(5);

        let mut by_type: Vec<(String, u32)> = Vec::new();
        for s in &in_period {
            let recipe_type = self
                .state
                .recipe(&s.name)
                .map(|c| c.recipe_type.clone())
                .unwrap_or_else(|| "Other".to_string());
            count_into(&mut by_type, recipe_type, s.quantity);
        }

        Ok(SalesReport {
            period,
            total_revenue,
            total_cost,
            total_profit,
            total_drinks,
            avg_margin,
            top_sellers: by_drink
                .into_iter()
                .map(|(name, count)| DrinkCount { name, count })
                .collect(),
            sales_by_type: by_type
                .into_iter()
                .map(|(recipe_type, count)| TypeCount { recipe_type, count })
                .collect(),
        })
    }

    // ── Shift mode ──

    pub fn shift_view(&self) -> Result<ShiftView, ServiceError> {
        self.require_premium("Shift Mode")?;

        let today = Local::now().date_naive();
        let today_sales: Vec<_> = self
            .state
            .sales
            .iter()
            .filter(|s| local_day(&s.timestamp) == Some(today))
            .collect();

        let available: Vec<Recipe> = self
            .state
            .recipes
            .iter()
            .filter(|c| c.can_make)
            .cloned()
            .collect();
        let favorites = available
            .iter()
            .filter(|c| self.state.favorites.iter().any(|n| *n == c.name))
            .cloned()
            .collect();

        Ok(ShiftView {
            today_drinks: today_sales.iter().map(|s| s.quantity).sum(),
            today_revenue: today_sales
                .iter()
                .map(|s| s.sell_price * s.quantity as f64)
                .sum(),
            available,
            favorites,
        })
    }
}
