use csv::StringRecord;
use openbar_core::ServiceError;
use serde::Serialize;
use tracing::info;

use super::BarService;
use crate::model::{Ingredient, Recipe, Technique};

/// Unit cost assigned to ingredients created by an import.
const IMPORTED_UNIT_COST: f64 = 10.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub recipes: usize,
    pub ingredients: usize,
}

fn bad_file(e: csv::Error) -> ServiceError {
    ServiceError::Validation(format!("import failed: {e}"))
}

/// First non-empty value among the named columns.
fn first_of(headers: &StringRecord, row: &StringRecord, names: &[&str]) -> String {
    for name in names {
        let value = headers
            .iter()
            .position(|h| h == *name)
            .and_then(|i| row.get(i))
            .unwrap_or("");
        if !value.is_empty() {
            return value.to_string();
        }
    }
    String::new()
}

/// Parse a price-like cell; blank, zero, and garbage all take the default.
fn num_or(raw: &str, default: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(default)
}

/// Same, but truncated to whole percent for the ABV column.
fn int_or(raw: &str, default: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .map(f64::trunc)
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(default)
}

fn row_recipe(headers: &StringRecord, row: &StringRecord) -> Recipe {
    let ingredients: Vec<String> = first_of(headers, row, &["Ingredients"])
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let flavors: Vec<String> = first_of(headers, row, &["Flavors"])
        .split(',')
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect();

    let recipe_type = {
        let t = first_of(headers, row, &["Type", "Cocktail_Type"]);
        if t.is_empty() { "Classic".to_string() } else { t }
    };
    let technique = Technique::from_str(&first_of(headers, row, &["Technique"]))
        .unwrap_or_default();
    let prep_time = {
        let t = first_of(headers, row, &["PrepTime"]);
        if t.is_empty() { "3 min".to_string() } else { t }
    };
    let glass = {
        let g = first_of(headers, row, &["Glass"]);
        if g.is_empty() { "Coupe Glass".to_string() } else { g }
    };

    Recipe {
        name: first_of(headers, row, &["Cocktail", "Name"]),
        ingredients,
        ingredient_details: vec![],
        instructions: first_of(headers, row, &["Instructions"]),
        recipe_type,
        technique,
        prep_time,
        glass,
        abv: int_or(&first_of(headers, row, &["ABV"]), 15.0),
        sell_price: Some(num_or(&first_of(headers, row, &["Price"]), 12.0)),
        cost_per_drink: Some(num_or(&first_of(headers, row, &["Cost"]), 2.5)),
        can_make: false,
        missing_count: 0,
        flavors,
        dietary: vec![],
        tags: vec![],
        is_custom: false,
        notes: vec![],
        image: None,
        radar_scores: None,
    }
}

impl BarService {
    // ── Spreadsheet import ──

    /// Replace the whole catalog from a CSV export.
    ///
    /// Column names follow the house spreadsheet: `Cocktail` (or `Name`),
    /// `Ingredients` comma-space separated, `Type` (or `Cocktail_Type`),
    /// `Technique`, `PrepTime`, `Glass`, `ABV`, `Price`, `Cost`, `Flavors`.
    /// Missing cells take sensible defaults. The inventory is rebuilt from
    /// the imported ingredient names, everything out of stock until toggled.
    /// Any bad row rejects the whole file and leaves the bar untouched.
    pub fn import_catalog(&mut self, csv_text: &str) -> Result<ImportReport, ServiceError> {
        self.require_premium("Spreadsheet import")?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());
        let headers = reader.headers().map_err(bad_file)?.clone();

        let mut recipes: Vec<Recipe> = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(bad_file)?;
            let recipe = row_recipe(&headers, &row);
            if recipe.name.is_empty() {
                // header is line 1
                return Err(ServiceError::Validation(format!(
                    "row {} has no cocktail name",
                    i + 2
                )));
            }
            recipes.push(recipe);
        }
        if recipes.is_empty() {
            return Err(ServiceError::Validation(
                "the file has no cocktail rows".into(),
            ));
        }

        let mut ingredients: Vec<Ingredient> = Vec::new();
        for recipe in &recipes {
            for name in &recipe.ingredients {
                if !ingredients.iter().any(|i| i.name == *name) {
                    ingredients.push(Ingredient {
                        name: name.clone(),
                        category: "Other".into(),
                        in_stock: false,
                        unit_cost: IMPORTED_UNIT_COST,
                        par_level: None,
                        current_stock: None,
                    });
                }
            }
        }

        let report = ImportReport { recipes: recipes.len(), ingredients: ingredients.len() };
        self.state.recipes = recipes;
        self.state.ingredients = ingredients;
        self.state.refresh_availability();
        self.persist()?;
        info!(recipes = report.recipes, ingredients = report.ingredients, "catalog imported");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{premium_service, service};

    const SHEET: &str = "\
Cocktail,Ingredients,Type,Technique,Glass,ABV,Price,Cost,Flavors
Paper Plane,\"Bourbon, Aperol, Amaro Nonino, Lemon Juice\",Modern,Shake,Coupe Glass,24,14,3.2,\"Bitter, Sour\"
Penicillin,\"Scotch, Honey Syrup, Lemon Juice, Ginger\",Modern,Shake,Old Fashioned Glass,21,14,2.9,
";

    #[test]
    fn import_is_premium_only() {
        let (_dir, mut svc) = service();
        assert!(matches!(
            svc.import_catalog(SHEET),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn import_replaces_catalog_and_inventory() {
        let (_dir, mut svc) = premium_service();
        svc.toggle_favorite("Negroni").unwrap();

        let report = svc.import_catalog(SHEET).unwrap();
        assert_eq!(report.recipes, 2);
        // Lemon Juice is shared by both rows
        assert_eq!(report.ingredients, 7);

        let plane = svc.state.recipe("Paper Plane").unwrap();
        assert_eq!(plane.abv, 24.0);
        assert_eq!(plane.sell_price, Some(14.0));
        assert_eq!(plane.flavors, vec!["bitter".to_string(), "sour".to_string()]);
        assert!(!plane.can_make);

        assert!(svc.state.ingredients.iter().all(|i| !i.in_stock));
        assert!(svc.state.ingredients.iter().all(|i| i.category == "Other"));
        assert_eq!(svc.state.ingredient("Scotch").unwrap().unit_cost, IMPORTED_UNIT_COST);

        // unrelated collections survive the swap
        assert_eq!(svc.state.favorites, vec!["Negroni".to_string()]);
    }

    #[test]
    fn alias_columns_and_defaults_fill_in() {
        let (_dir, mut svc) = premium_service();
        let sheet = "\
Name,Cocktail_Type,Ingredients,ABV,Price
Bamboo,Classic,\"Fino Sherry, Dry Vermouth\",,
";
        svc.import_catalog(sheet).unwrap();
        let bamboo = svc.state.recipe("Bamboo").unwrap();
        assert_eq!(bamboo.recipe_type, "Classic");
        assert_eq!(bamboo.technique, Technique::Shake);
        assert_eq!(bamboo.glass, "Coupe Glass");
        assert_eq!(bamboo.prep_time, "3 min");
        assert_eq!(bamboo.abv, 15.0);
        assert_eq!(bamboo.sell_price, Some(12.0));
        assert_eq!(bamboo.cost_per_drink, Some(2.5));
    }

    #[test]
    fn zero_and_garbage_numbers_take_defaults() {
        let (_dir, mut svc) = premium_service();
        let sheet = "\
Cocktail,Ingredients,ABV,Price,Cost
Test Sour,Gin,0,n/a,0
";
        svc.import_catalog(sheet).unwrap();
        let r = svc.state.recipe("Test Sour").unwrap();
        assert_eq!(r.abv, 15.0);
        assert_eq!(r.sell_price, Some(12.0));
        assert_eq!(r.cost_per_drink, Some(2.5));
    }

    #[test]
    fn nameless_row_rejects_the_file() {
        let (_dir, mut svc) = premium_service();
        let before = svc.state.recipes.len();
        let sheet = "\
Cocktail,Ingredients
Paper Plane,Bourbon
,Gin
";
        let err = svc.import_catalog(sheet).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(err.to_string().contains("row 3"));
        assert_eq!(svc.state.recipes.len(), before);
    }

    #[test]
    fn empty_sheet_rejects() {
        let (_dir, mut svc) = premium_service();
        assert!(matches!(
            svc.import_catalog("Cocktail,Ingredients\n"),
            Err(ServiceError::Validation(_))
        ));
    }
}
