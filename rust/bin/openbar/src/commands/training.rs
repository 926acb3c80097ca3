//! Training commands: flashcard quiz, mixology challenge, speed round.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use bar::model::Technique;
use bar::service::training::{MIX_ROUNDS, SPEED_ROUND_SECS, mix_rank};
use bar::service::{MixAttempt, MixScore, QuizScore};
use rand::seq::SliceRandom;

use super::open_service;

const OPTION_LETTERS: [&str; 4] = ["a", "b", "c", "d"];

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_technique(raw: &str) -> Result<Technique> {
    Technique::from_str(raw).ok_or_else(|| anyhow::anyhow!("Unknown technique: {}", raw))
}

/// Prompt for one build: ingredients, glass, technique.
fn read_build() -> Result<(Vec<String>, Option<String>, Option<Technique>)> {
    let ingredients: Vec<String> = prompt("Ingredients (comma separated): ")?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let glass = prompt("Glass: ")?;
    let technique_raw = prompt("Technique: ")?;
    let technique = if technique_raw.is_empty() {
        None
    } else {
        Some(parse_technique(&technique_raw)?)
    };
    Ok((ingredients, (!glass.is_empty()).then_some(glass), technique))
}

fn print_score(score: &MixScore) {
    let mark = |ok: bool| if ok { "right" } else { "wrong" };
    println!(
        "{}: {}/{} ingredients ({} wrong), glass {}, technique {}.",
        score.cocktail,
        score.ingredients_correct,
        score.ingredients_total,
        score.wrong_ingredients,
        mark(score.glass_correct),
        mark(score.technique_correct)
    );
    if score.speed_bonus > 0 {
        println!("Speed bonus: +{}", score.speed_bonus);
    }
    println!(
        "Score: {} of {} ({}%)",
        score.earned_points, score.max_points, score.percentage
    );
}

/// Multiple-choice flashcards: pick the right build for each drink.
pub fn quiz(questions: Option<usize>, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let mut deck = svc.quiz_deck(&mut rng);
    if let Some(n) = questions {
        deck.truncate(n);
    }
    if deck.is_empty() {
        println!("No recipes to quiz on.");
        return Ok(());
    }

    let builds: Vec<String> = svc
        .state()
        .recipes
        .iter()
        .map(|r| r.ingredients.join(", "))
        .collect();

    let mut correct = 0u32;
    for (i, card) in deck.iter().enumerate() {
        let answer = card.ingredients.join(", ");
        let mut options: Vec<&str> = builds
            .iter()
            .map(String::as_str)
            .filter(|b| **b != *answer && !b.is_empty())
            .collect();
        options.shuffle(&mut rng);
        options.truncate(3);
        options.push(&answer);
        options.shuffle(&mut rng);

        println!("\n{}/{}: What goes in a {}?", i + 1, deck.len(), card.name);
        for (letter, option) in OPTION_LETTERS.iter().zip(&options) {
            println!("  {letter}) {option}");
        }
        let pick = prompt("> ")?.to_lowercase();
        let right = OPTION_LETTERS
            .iter()
            .position(|l| *l == pick)
            .and_then(|idx| options.get(idx))
            .is_some_and(|opt| *opt == answer.as_str());
        if right {
            correct += 1;
            println!("Right.");
        } else {
            println!("No: {answer}");
        }
    }

    let score = QuizScore { correct, total: deck.len() as u32 };
    println!("\nYou got {}/{}. {}", score.correct, score.total, score.verdict());
    Ok(())
}

/// Multi-round mixology challenge, averaged into a rank.
pub fn challenge(rounds: Option<u32>, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let rounds = rounds.unwrap_or(MIX_ROUNDS).max(1);

    println!("The shelves:");
    for group in svc.training_ingredient_pool() {
        println!("  {}: {}", group.category, group.items.join(", "));
    }
    println!("Glasses: {}", svc.training_glass_pool().join(", "));

    let mut total_pct = 0i64;
    for _ in 0..rounds {
        let target = svc.mix_target(&mut rng)?;
        println!("\nBuild a {target}.");
        let (ingredients, glass, technique) = read_build()?;
        let score = svc.grade_mix(
            &target,
            &MixAttempt { ingredients, glass, technique, seconds_left: None },
        )?;
        print_score(&score);
        total_pct += score.percentage;
    }

    let avg = total_pct / i64::from(rounds);
    println!("\nAverage {}%: {}", avg, mix_rank(avg));
    Ok(())
}

/// One timed round. The clock runs while you type.
pub fn speed(client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let target = svc.mix_target(&mut rng)?;

    println!("{SPEED_ROUND_SECS} seconds on the clock. Build a {target}.");
    let started = std::time::Instant::now();
    let (ingredients, glass, technique) = read_build()?;
    let seconds_left = SPEED_ROUND_SECS.saturating_sub(started.elapsed().as_secs() as u32);

    let score = svc.grade_mix(
        &target,
        &MixAttempt { ingredients, glass, technique, seconds_left: Some(seconds_left) },
    )?;
    if seconds_left == 0 {
        println!("Out of time.");
    }
    print_score(&score);
    println!("Rank: {}", mix_rank(score.percentage));
    Ok(())
}

/// Script-friendly scoring: grade one build given entirely by flags.
pub fn grade(
    recipe: &str,
    ingredients: &[String],
    glass: Option<&str>,
    technique: Option<&str>,
    time_left: Option<u32>,
    json_output: bool,
    client_config_path: &Path,
) -> Result<()> {
    let technique = technique.map(parse_technique).transpose()?;
    let attempt = MixAttempt {
        ingredients: ingredients.to_vec(),
        glass: glass.map(str::to_string),
        technique,
        seconds_left: time_left,
    };

    let svc = open_service(client_config_path)?;
    let score = svc.grade_mix(recipe, &attempt)?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        print_score(&score);
    }
    Ok(())
}

/// The study pool: every ingredient and glass the catalog uses.
pub fn learn(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let pool = svc.training_ingredient_pool();
    let glasses = svc.training_glass_pool();

    if json_output {
        let value = serde_json::json!({ "ingredients": pool, "glasses": glasses });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    for group in &pool {
        println!("{}:", group.category);
        for item in &group.items {
            println!("  {item}");
        }
    }
    println!("Glasses:");
    for glass in &glasses {
        println!("  {glass}");
    }
    Ok(())
}
