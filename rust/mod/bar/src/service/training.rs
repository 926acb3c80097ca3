use std::collections::HashSet;

use openbar_core::ServiceError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::BarService;
use crate::model::Technique;

/// Cards dealt per quiz run.
pub const QUIZ_DECK_SIZE: usize = 10;

/// Rounds in a full mixology challenge.
pub const MIX_ROUNDS: u32 = 5;

/// Seconds on the clock for each speed round.
pub const SPEED_ROUND_SECS: u32 = 30;

/// One quiz flashcard: name the ingredients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCard {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Self-scored quiz tally.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

impl QuizScore {
    pub fn verdict(&self) -> &'static str {
        if self.correct == self.total {
            "Perfect score!"
        } else if f64::from(self.correct) >= f64::from(self.total) * 0.7 {
            "Great job!"
        } else {
            "Keep practicing!"
        }
    }
}

/// Ingredients offered by the challenge picker, grouped by shelf.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    pub category: &'static str,
    pub items: Vec<String>,
}

/// One submitted build for [`BarService::grade_mix`]. `seconds_left`
/// marks a speed round.
#[derive(Debug, Default)]
pub struct MixAttempt {
    pub ingredients: Vec<String>,
    pub glass: Option<String>,
    pub technique: Option<Technique>,
    pub seconds_left: Option<u32>,
}

/// Graded mixology round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixScore {
    pub cocktail: String,
    pub ingredients_correct: usize,
    pub ingredients_total: usize,
    pub wrong_ingredients: usize,
    pub glass_correct: bool,
    pub technique_correct: bool,
    pub speed_bonus: i64,
    pub earned_points: i64,
    pub max_points: i64,
    pub percentage: i64,
}

/// Achievement title for a challenge average.
pub fn mix_rank(avg_percentage: i64) -> &'static str {
    if avg_percentage >= 90 {
        "Master Mixologist"
    } else if avg_percentage >= 80 {
        "Expert Bartender"
    } else if avg_percentage >= 60 {
        "Skilled Mixer"
    } else if avg_percentage >= 40 {
        "Apprentice"
    } else {
        "Keep Learning"
    }
}

fn category_for(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let any = |keys: &[&str]| keys.iter().any(|k| lower.contains(k));
    if any(&[
        "vodka", "gin", "rum", "tequila", "whiskey", "bourbon", "cognac", "mezcal", "scotch",
    ]) {
        "Spirits"
    } else if any(&[
        "liqueur",
        "triple sec",
        "cointreau",
        "campari",
        "aperol",
        "vermouth",
        "kahlua",
        "amaretto",
        "chartreuse",
    ]) {
        "Liqueurs"
    } else if any(&["lime", "lemon", "orange", "grapefruit", "citrus"]) {
        "Citrus"
    } else if any(&["juice", "soda", "tonic", "water", "cola", "ginger"]) {
        "Mixers"
    } else if any(&["syrup", "sugar", "honey", "agave", "grenadine"]) {
        "Syrups"
    } else {
        "Other"
    }
}

impl BarService {
    // ── Training ──

    /// Deal a shuffled quiz deck of up to [`QUIZ_DECK_SIZE`] cards. The
    /// whole catalog is fair game, free tier included.
    pub fn quiz_deck<R: Rng>(&self, rng: &mut R) -> Vec<QuizCard> {
        let mut cards: Vec<QuizCard> = self
            .state
            .recipes
            .iter()
            .map(|r| QuizCard { name: r.name.clone(), ingredients: r.ingredients.clone() })
            .collect();
        cards.shuffle(rng);
        cards.truncate(QUIZ_DECK_SIZE);
        cards
    }

    /// Pick a random target for a mixology round.
    pub fn mix_target<R: Rng>(&self, rng: &mut R) -> Result<String, ServiceError> {
        if self.state.recipes.is_empty() {
            return Err(ServiceError::Validation("no recipes to train on".into()));
        }
        let idx = rng.gen_range(0..self.state.recipes.len());
        Ok(self.state.recipes[idx].name.clone())
    }

    /// Every ingredient any recipe calls for, sorted and grouped by shelf.
    /// Empty shelves are dropped.
    pub fn training_ingredient_pool(&self) -> Vec<IngredientGroup> {
        let mut names: Vec<String> = Vec::new();
        for recipe in &self.state.recipes {
            for ing in &recipe.ingredients {
                if !names.contains(ing) {
                    names.push(ing.clone());
                }
            }
        }
        names.sort();

        let mut groups: Vec<IngredientGroup> =
            ["Spirits", "Liqueurs", "Citrus", "Mixers", "Syrups", "Other"]
                .into_iter()
                .map(|category| IngredientGroup { category, items: Vec::new() })
                .collect();
        for name in names {
            let cat = category_for(&name);
            if let Some(group) = groups.iter_mut().find(|g| g.category == cat) {
                group.items.push(name);
            }
        }
        groups.retain(|g| !g.items.is_empty());
        groups
    }

    /// Glasses any recipe serves in, sorted.
    pub fn training_glass_pool(&self) -> Vec<String> {
        let mut glasses: Vec<String> = Vec::new();
        for recipe in &self.state.recipes {
            if !recipe.glass.is_empty() && !glasses.contains(&recipe.glass) {
                glasses.push(recipe.glass.clone());
            }
        }
        glasses.sort();
        glasses
    }

    /// Score a build against its target.
    ///
    /// Each correct ingredient is worth 10, each wrong pick costs 3, and a
    /// clean sweep adds 15 on top. Glass and technique are 15 each; the
    /// glass counts when the target glass contains the first word of the
    /// pick. Speed rounds add half the seconds left on the clock.
    pub fn grade_mix(&self, target: &str, attempt: &MixAttempt) -> Result<MixScore, ServiceError> {
        let recipe = self
            .state
            .recipe(target)
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {target} not found")))?;

        let wanted: HashSet<&str> = recipe.ingredients.iter().map(String::as_str).collect();
        let correct = attempt
            .ingredients
            .iter()
            .filter(|i| wanted.contains(i.as_str()))
            .count();
        let wrong = attempt.ingredients.len() - correct;

        let mut ingredient_points = correct as i64 * 10 - wrong as i64 * 3;
        if correct == recipe.ingredients.len() && wrong == 0 {
            ingredient_points += 15;
        }

        let glass_correct = attempt.glass.as_deref().is_some_and(|pick| {
            match pick.to_lowercase().split_whitespace().next() {
                Some(first) => recipe.glass.to_lowercase().contains(first),
                None => false,
            }
        });
        let technique_correct = attempt.technique == Some(recipe.technique);

        let speed_bonus = match attempt.seconds_left {
            Some(secs) if secs > 0 => i64::from(secs / 2),
            _ => 0,
        };

        let earned_points = ingredient_points.max(0)
            + if glass_correct { 15 } else { 0 }
            + if technique_correct { 15 } else { 0 }
            + speed_bonus;
        let max_points = recipe.ingredients.len() as i64 * 10
            + 15
            + 30
            + if attempt.seconds_left.is_some() { 15 } else { 0 };
        let percentage = (earned_points as f64 / max_points as f64 * 100.0).round() as i64;

        Ok(MixScore {
            cocktail: recipe.name.clone(),
            ingredients_correct: correct,
            ingredients_total: recipe.ingredients.len(),
            wrong_ingredients: wrong,
            glass_correct,
            technique_correct,
            speed_bonus,
            earned_points,
            max_points,
            percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::service::testutil::service;

    #[test]
    fn quiz_deck_caps_at_ten_unique_cards() {
        let (_dir, svc) = service();
        assert!(svc.state.recipes.len() > QUIZ_DECK_SIZE);
        let mut rng = StdRng::seed_from_u64(3);
        let deck = svc.quiz_deck(&mut rng);
        assert_eq!(deck.len(), QUIZ_DECK_SIZE);
        let names: HashSet<&str> = deck.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), deck.len());
    }

    #[test]
    fn quiz_verdicts() {
        assert_eq!(QuizScore { correct: 10, total: 10 }.verdict(), "Perfect score!");
        assert_eq!(QuizScore { correct: 7, total: 10 }.verdict(), "Great job!");
        assert_eq!(QuizScore { correct: 6, total: 10 }.verdict(), "Keep practicing!");
    }

    #[test]
    fn pool_groups_by_shelf() {
        let (_dir, svc) = service();
        let pool = svc.training_ingredient_pool();
        let group = |cat: &str| {
            pool.iter()
                .find(|g| g.category == cat)
                .map(|g| g.items.clone())
                .unwrap_or_default()
        };
        assert!(group("Spirits").contains(&"Vodka".to_string()));
        assert!(group("Liqueurs").contains(&"Campari".to_string()));
        // juices named for their fruit land on the citrus shelf
        assert!(group("Citrus").contains(&"Lime Juice".to_string()));
        assert!(group("Mixers").contains(&"Club Soda".to_string()));
        assert!(group("Syrups").contains(&"Simple Syrup".to_string()));
        assert!(group("Other").contains(&"Angostura Bitters".to_string()));
    }

    #[test]
    fn perfect_build_scores_full_marks() {
        let (_dir, svc) = service();
        let attempt = MixAttempt {
            ingredients: vec!["Gin".into(), "Campari".into(), "Sweet Vermouth".into()],
            glass: Some("Old Fashioned Glass".into()),
            technique: Some(Technique::Stir),
            seconds_left: None,
        };
        let score = svc.grade_mix("Negroni", &attempt).unwrap();
        assert_eq!(score.ingredients_correct, 3);
        assert_eq!(score.wrong_ingredients, 0);
        assert!(score.glass_correct);
        assert!(score.technique_correct);
        // 3*10 + 15 sweep + 15 glass + 15 technique over a 75 point ceiling
        assert_eq!(score.earned_points, 75);
        assert_eq!(score.max_points, 75);
        assert_eq!(score.percentage, 100);
    }

    #[test]
    fn wrong_picks_cost_points() {
        let (_dir, svc) = service();
        let attempt = MixAttempt {
            ingredients: vec!["Gin".into(), "Campari".into(), "Espresso".into()],
            glass: Some("Coupe Glass".into()),
            technique: Some(Technique::Shake),
            seconds_left: None,
        };
        let score = svc.grade_mix("Negroni", &attempt).unwrap();
        assert_eq!(score.ingredients_correct, 2);
        assert_eq!(score.wrong_ingredients, 1);
        assert!(!score.glass_correct);
        assert!(!score.technique_correct);
        assert_eq!(score.earned_points, 17);
        assert_eq!(score.percentage, 23);
    }

    #[test]
    fn glass_matches_on_first_word() {
        let (_dir, svc) = service();
        let attempt = MixAttempt {
            ingredients: vec![],
            glass: Some("Old Fashioned".into()),
            ..Default::default()
        };
        let score = svc.grade_mix("Negroni", &attempt).unwrap();
        assert!(score.glass_correct);
    }

    #[test]
    fn speed_round_pays_half_the_clock() {
        let (_dir, svc) = service();
        let attempt = MixAttempt {
            ingredients: vec!["Gin".into(), "Campari".into(), "Sweet Vermouth".into()],
            glass: Some("Old Fashioned Glass".into()),
            technique: Some(Technique::Stir),
            seconds_left: Some(21),
        };
        let score = svc.grade_mix("Negroni", &attempt).unwrap();
        assert_eq!(score.speed_bonus, 10);
        assert_eq!(score.earned_points, 85);
        assert_eq!(score.max_points, 90);
        assert_eq!(score.percentage, 94);

        // out of time means no bonus but the ceiling stays
        let timed_out = MixAttempt { seconds_left: Some(0), ..Default::default() };
        let score = svc.grade_mix("Negroni", &timed_out).unwrap();
        assert_eq!(score.speed_bonus, 0);
        assert_eq!(score.max_points, 90);
    }

    #[test]
    fn ranks_ladder_with_average() {
        assert_eq!(mix_rank(95), "Master Mixologist");
        assert_eq!(mix_rank(84), "Expert Bartender");
        assert_eq!(mix_rank(60), "Skilled Mixer");
        assert_eq!(mix_rank(41), "Apprentice");
        assert_eq!(mix_rank(12), "Keep Learning");
    }

    #[test]
    fn unknown_target_is_not_found() {
        let (_dir, svc) = service();
        assert!(matches!(
            svc.grade_mix("Unicorn Tears", &MixAttempt::default()),
            Err(ServiceError::NotFound(_))
        ));
    }
}
