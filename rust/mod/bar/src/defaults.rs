//! Compiled-in starter catalog and inventory, used when neither saved state
//! nor a dataset overlay provides one.

use crate::model::{Ingredient, Recipe, Technique};

fn recipe(
    name: &str,
    ingredients: &[&str],
    instructions: &str,
    recipe_type: &str,
    technique: Technique,
    glass: &str,
    abv: f64,
    sell_price: f64,
    cost_per_drink: f64,
    flavors: &[&str],
) -> Recipe {
    Recipe {
        name: name.into(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        ingredient_details: vec![],
        instructions: instructions.into(),
        recipe_type: recipe_type.into(),
        technique,
        prep_time: "3 min".into(),
        glass: glass.into(),
        abv,
        sell_price: Some(sell_price),
        cost_per_drink: Some(cost_per_drink),
        can_make: false,
        missing_count: 0,
        flavors: flavors.iter().map(|s| s.to_string()).collect(),
        dietary: vec!["vegan".into(), "gluten_free".into()],
        tags: vec![],
        is_custom: false,
        notes: vec![],
        image: None,
        radar_scores: None,
    }
}

fn item(
    category: &str,
    name: &str,
    in_stock: bool,
    unit_cost: f64,
    par: Option<(f64, f64)>,
) -> Ingredient {
    Ingredient {
        name: name.into(),
        category: category.into(),
        in_stock,
        unit_cost,
        par_level: par.map(|(level, _)| level),
        current_stock: par.map(|(_, current)| current),
    }
}

pub fn default_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "Negroni",
            &["Gin", "Campari", "Sweet Vermouth"],
            "30ml Gin, 30ml Campari, 30ml Sweet Vermouth. Stir with ice, strain over a large cube.",
            "Classic",
            Technique::Stir,
            "Old Fashioned Glass",
            24.0,
            13.0,
            2.8,
            &["bitter", "boozy"],
        ),
        recipe(
            "Gimlet",
            &["Gin", "Lime Juice", "Simple Syrup"],
            "60ml Gin, 22.5ml Lime Juice, 15ml Simple Syrup. Shake with ice, strain into Coupe Glass.",
            "Classic",
            Technique::Shake,
            "Coupe Glass",
            20.0,
            11.0,
            1.9,
            &["sour"],
        ),
        recipe(
            "Daiquiri",
            &["White Rum", "Lime Juice", "Simple Syrup"],
            "60ml White Rum, 25ml Lime Juice, 15ml Simple Syrup. Shake with ice, strain into Coupe Glass.",
            "Classic",
            Technique::Shake,
            "Coupe Glass",
            20.0,
            11.0,
            1.8,
            &["sour", "refreshing"],
        ),
        recipe(
            "Margarita",
            &["Tequila", "Cointreau", "Lime Juice"],
            "50ml Tequila, 20ml Cointreau, 20ml Lime Juice. Shake with ice, strain over fresh ice.",
            "Classic",
            Technique::Shake,
            "Coupe Glass",
            22.0,
            12.0,
            2.6,
            &["sour"],
        ),
        recipe(
            "Whiskey Sour",
            &["Bourbon", "Lemon Juice", "Simple Syrup"],
            "60ml Bourbon, 25ml Lemon Juice, 20ml Simple Syrup. Shake with ice, strain over a large cube.",
            "Classic",
            Technique::Shake,
            "Old Fashioned Glass",
            20.0,
            12.0,
            2.2,
            &["sour"],
        ),
        recipe(
            "Old Fashioned",
            &["Bourbon", "Simple Syrup", "Angostura Bitters"],
            "60ml Bourbon, 10ml Simple Syrup, 2 dashes Angostura Bitters. Stir with ice, strain over a large cube.",
            "Classic",
            Technique::Stir,
            "Old Fashioned Glass",
            32.0,
            13.0,
            2.4,
            &["boozy", "bitter"],
        ),
        recipe(
            "Mojito",
            &["White Rum", "Lime Juice", "Simple Syrup", "Mint", "Club Soda"],
            "50ml White Rum, 25ml Lime Juice, 15ml Simple Syrup, 8 mint leaves. Muddle the mint, build over crushed ice, top with soda.",
            "Classic",
            Technique::Muddle,
            "Highball Glass",
            14.0,
            11.0,
            2.0,
            &["refreshing", "herbal"],
        ),
        recipe(
            "Espresso Martini",
            &["Vodka", "Kahlua", "Espresso"],
            "50ml Vodka, 20ml Kahlua, 30ml Espresso. Shake hard with ice, double strain into Martini Glass.",
            "Modern",
            Technique::Shake,
            "Martini Glass",
            18.0,
            13.0,
            2.5,
            &["sweet", "boozy"],
        ),
        recipe(
            "Tom Collins",
            &["Gin", "Lemon Juice", "Simple Syrup", "Club Soda"],
            "45ml Gin, 25ml Lemon Juice, 15ml Simple Syrup. Build over ice, top with soda.",
            "Classic",
            Technique::Build,
            "Collins Glass",
            12.0,
            10.0,
            1.7,
            &["refreshing", "sour"],
        ),
        recipe(
            "Manhattan",
            &["Bourbon", "Sweet Vermouth", "Angostura Bitters"],
            "50ml Bourbon, 25ml Sweet Vermouth, 2 dashes Angostura Bitters. Stir with ice, strain into Nick & Nora Glass.",
            "Classic",
            Technique::Stir,
            "Nick & Nora Glass",
            28.0,
            13.0,
            2.5,
            &["boozy"],
        ),
        recipe(
            "Moscow Mule",
            &["Vodka", "Ginger Beer", "Lime Juice"],
            "50ml Vodka, 15ml Lime Juice, 120ml Ginger Beer. Build over ice in a cold mug.",
            "Classic",
            Technique::Build,
            "Highball Glass",
            12.0,
            11.0,
            2.1,
            &["refreshing"],
        ),
        recipe(
            "Aperol Spritz",
            &["Aperol", "Prosecco", "Club Soda"],
            "60ml Aperol, 90ml Prosecco, 30ml Club Soda. Build over ice, stir once.",
            "Modern",
            Technique::Build,
            "Highball Glass",
            11.0,
            10.0,
            2.3,
            &["refreshing", "bitter"],
        ),
    ]
}

pub fn default_ingredients() -> Vec<Ingredient> {
    vec![
        item("Base Spirits", "Vodka", true, 18.0, None),
        item("Base Spirits", "Gin", true, 22.0, None),
        item("Base Spirits", "White Rum", true, 19.0, None),
        item("Base Spirits", "Tequila", true, 26.0, None),
        item("Base Spirits", "Bourbon", true, 28.0, None),
        item("Base Spirits", "Scotch", false, 34.0, None),
        item("Base Spirits", "Cognac", false, 42.0, None),
        item("Liqueurs", "Campari", true, 24.0, None),
        item("Liqueurs", "Aperol", true, 19.0, None),
        item("Liqueurs", "Cointreau", true, 30.0, None),
        item("Liqueurs", "Kahlua", true, 21.0, None),
        item("Liqueurs", "Sweet Vermouth", true, 14.0, None),
        item("Liqueurs", "Dry Vermouth", false, 14.0, None),
        item("Bitters", "Angostura Bitters", true, 12.0, None),
        item("Syrups & Sweeteners", "Simple Syrup", true, 4.0, Some((2.0, 0.5))),
        item("Syrups & Sweeteners", "Honey Syrup", true, 6.0, None),
        item("Syrups & Sweeteners", "Grenadine", false, 7.0, None),
        item("Fresh Citrus", "Lime Juice", true, 4.0, Some((3.0, 1.0))),
        item("Fresh Citrus", "Lemon Juice", true, 4.0, Some((3.0, 2.0))),
        item("Fresh Herbs", "Mint", true, 3.0, None),
        item("Mixers & Sodas", "Club Soda", true, 2.0, None),
        item("Mixers & Sodas", "Ginger Beer", true, 3.0, None),
        item("Mixers & Sodas", "Espresso", false, 5.0, None),
        item("Mixers & Sodas", "Cranberry Juice", false, 4.0, None),
        item("Wine & Champagne", "Prosecco", true, 12.0, None),
        item("Garnishes", "Orange Peel", true, 2.0, None),
        item("Garnishes", "Lime Wedge", true, 1.0, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_recipe_ingredient_is_in_the_inventory() {
        let names: HashSet<String> =
            default_ingredients().into_iter().map(|i| i.name).collect();
        for r in default_recipes() {
            for ing in &r.ingredients {
                assert!(names.contains(ing), "{} references unknown {}", r.name, ing);
            }
        }
    }

    #[test]
    fn recipe_names_are_unique() {
        let recipes = default_recipes();
        let names: HashSet<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), recipes.len());
    }

    #[test]
    fn some_items_start_out_of_stock() {
        let out: Vec<String> = default_ingredients()
            .into_iter()
            .filter(|i| !i.in_stock)
            .map(|i| i.name)
            .collect();
        assert!(out.contains(&"Espresso".to_string()));
        assert!(out.len() >= 3);
    }
}
