use rand::Rng;
use serde::Serialize;

use crate::model::ComposedRecipe;

const CITIES: &[&str] = &[
    "Manhattan", "Brooklyn", "Havana", "Singapore", "Paris", "Tokyo", "Barcelona", "Venice",
    "Monaco", "Milan", "Lisbon", "Dublin", "Edinburgh", "Stockholm", "Vienna",
];

const SUFFIXES: &[&str] = &[
    "Sour", "Fizz", "Flip", "Cocktail", "Mule", "Spritz", "Cooler", "Smash", "Collins", "Fix",
    "Julep", "Punch",
];

const ADJECTIVES: &[&str] = &[
    "Midnight", "Velvet", "Golden", "Silver", "Smoky", "Dark", "Bitter", "Lost", "Silent",
    "Hidden", "Crimson", "Amber", "Copper", "Paper", "Brass",
];

const NOUNS: &[&str] = &[
    "Rose", "Throne", "Hour", "Garden", "Moon", "Revolver", "Echo", "Flame", "Shadow", "Compass",
    "Lantern", "Veil", "Remedy", "Whisper", "Secret",
];

/// Three name candidates for a draft, one per naming style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameIdeas {
    pub geographic: String,
    pub speakeasy: String,
    pub ingredient_focus: String,
}

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or("")
}

/// Generate name candidates. Geographic and speakeasy styles draw from the
/// word lists; the ingredient style is deterministic in the draft.
pub fn generate_names<R: Rng>(rng: &mut R, composed: &ComposedRecipe) -> NameIdeas {
    let city = pick(rng, CITIES);
    let suffix = pick(rng, SUFFIXES);
    let geographic = match rng.gen_range(0..3) {
        0 => format!("The {city}"),
        1 => format!("{city} {suffix}"),
        _ => format!("Downtown {city}"),
    };

    let adjective = pick(rng, ADJECTIVES);
    let noun = pick(rng, NOUNS);
    let speakeasy = match rng.gen_range(0..2) {
        0 => format!("The {adjective} {noun}"),
        _ => format!("{adjective} & {noun}"),
    };

    let ingredient_focus = match &composed.base_spirit {
        Some(base) => match composed.modifiers.first() {
            Some(modifier) => format!("{} & {}", first_word(base), first_word(&modifier.name)),
            None => format!("The {} Perfect", first_word(base)),
        },
        None => "The House Special".to_string(),
    };

    NameIdeas { geographic, speakeasy, ingredient_focus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pour;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_names_follow_the_patterns() {
        let mut rng = StdRng::seed_from_u64(7);
        let ideas = generate_names(&mut rng, &ComposedRecipe::default());
        assert!(CITIES.iter().any(|c| ideas.geographic.contains(c)));
        assert!(ADJECTIVES.iter().any(|a| ideas.speakeasy.contains(a)));
        assert!(NOUNS.iter().any(|n| ideas.speakeasy.contains(n)));
    }

    #[test]
    fn same_seed_same_names() {
        let draft = ComposedRecipe::default();
        let a = generate_names(&mut StdRng::seed_from_u64(42), &draft);
        let b = generate_names(&mut StdRng::seed_from_u64(42), &draft);
        assert_eq!(a, b);
    }

    #[test]
    fn ingredient_focus_uses_first_words() {
        let mut rng = StdRng::seed_from_u64(1);
        let draft = ComposedRecipe {
            base_spirit: Some("London Dry Gin".into()),
            modifiers: vec![Pour::new("Sweet Vermouth", 22.5)],
            ..Default::default()
        };
        let ideas = generate_names(&mut rng, &draft);
        assert_eq!(ideas.ingredient_focus, "London & Sweet");

        let solo = ComposedRecipe { base_spirit: Some("Mezcal".into()), ..Default::default() };
        let ideas = generate_names(&mut StdRng::seed_from_u64(1), &solo);
        assert_eq!(ideas.ingredient_focus, "The Mezcal Perfect");

        let bare = ComposedRecipe::default();
        let ideas = generate_names(&mut StdRng::seed_from_u64(1), &bare);
        assert_eq!(ideas.ingredient_focus, "The House Special");
    }
}
