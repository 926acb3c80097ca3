use std::sync::LazyLock;

use openbar_core::round1;
use regex::Regex;
use serde::Serialize;

/// Keyword ABV table, percent by volume. Lookup is a lowercase substring
/// match; entries are checked in order and the first hit wins, so broad
/// keywords ("rum", "creme de") sit after the specific ones they would
/// otherwise shadow.
const ABV_BY_KEYWORD: &[(&str, f64)] = &[
    ("vodka", 40.0),
    ("gin", 40.0),
    ("rum", 40.0),
    ("tequila", 40.0),
    ("whiskey", 40.0),
    ("whisky", 40.0),
    ("bourbon", 40.0),
    ("cognac", 40.0),
    ("brandy", 40.0),
    ("mezcal", 40.0),
    ("pisco", 40.0),
    ("cachaça", 40.0),
    ("vermouth", 18.0),
    ("campari", 25.0),
    ("aperol", 11.0),
    ("cointreau", 40.0),
    ("triple sec", 30.0),
    ("kahlua", 20.0),
    ("amaretto", 28.0),
    ("chartreuse", 55.0),
    ("benedictine", 40.0),
    ("drambuie", 40.0),
    ("absinthe", 68.0),
    ("fernet", 39.0),
    ("averna", 29.0),
    ("maraschino", 32.0),
    ("elderflower", 20.0),
    ("st. germain", 20.0),
    ("malibu", 21.0),
    ("apricot", 24.0),
    ("banana liqueur", 20.0),
    ("blue curacao", 25.0),
    ("creme de", 20.0),
    ("melon liqueur", 20.0),
    ("peach schnapps", 20.0),
    ("grand marnier", 40.0),
    ("champagne", 12.0),
    ("prosecco", 11.0),
    ("sherry", 17.0),
    ("bitters", 45.0),
];

/// ABV for an ingredient name. Unknown ingredients count as non-alcoholic.
pub fn ingredient_abv(name: &str) -> f64 {
    let lower = name.to_lowercase();
    for (key, abv) in ABV_BY_KEYWORD {
        if lower.contains(key) {
            return *abv;
        }
    }
    0.0
}

// ---------------------------------------------------------------------------
// Instruction-text estimation
// ---------------------------------------------------------------------------

/// One measured pour parsed out of free-text instructions,
/// e.g. `60ml Tequila` from "Shake 60ml Tequila, 25ml lime juice...".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionSpec {
    pub amount_ml: f64,
    pub name: String,
}

/// Estimated totals for a recipe that carries only instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEstimate {
    pub total_volume_ml: i64,
    /// Percent, one decimal.
    pub abv: f64,
}

static SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*ml\s+(.+?)(?:,|\.\s|$)").unwrap());

/// Parse `<amount>ml <name>` measures from instruction text. Amounts that
/// fail to parse are skipped.
pub fn parse_instruction_specs(instructions: &str) -> Vec<InstructionSpec> {
    SPEC_RE
        .captures_iter(instructions)
        .filter_map(|cap| {
            let amount_ml: f64 = cap[1].parse().ok()?;
            Some(InstructionSpec { amount_ml, name: cap[2].trim().to_string() })
        })
        .collect()
}

/// Estimate total volume and ABV from instruction text alone.
pub fn estimate_volume_abv(instructions: &str) -> VolumeEstimate {
    let mut total_volume = 0.0;
    let mut total_alcohol = 0.0;
    for spec in parse_instruction_specs(instructions) {
        total_volume += spec.amount_ml;
        total_alcohol += spec.amount_ml * ingredient_abv(&spec.name) / 100.0;
    }
    let abv = if total_volume > 0.0 { total_alcohol / total_volume * 100.0 } else { 0.0 };
    VolumeEstimate { total_volume_ml: total_volume.round() as i64, abv: round1(abv) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_substring_based() {
        assert_eq!(ingredient_abv("Vodka"), 40.0);
        assert_eq!(ingredient_abv("Sweet Vermouth"), 18.0);
        assert_eq!(ingredient_abv("Angostura Bitters"), 45.0);
        assert_eq!(ingredient_abv("Lime Juice"), 0.0);
    }

    #[test]
    fn first_matching_keyword_wins() {
        // "creme de banana" must not hit the "banana liqueur" entry
        assert_eq!(ingredient_abv("Creme de Banana"), 20.0);
        assert_eq!(ingredient_abv("Peach Schnapps"), 20.0);
        assert_eq!(ingredient_abv("Islay Whisky"), 40.0);
    }

    #[test]
    fn parses_measures_out_of_instructions() {
        let specs = parse_instruction_specs(
            "Shake 50ml Tequila, 20ml Triple Sec, 25ml lime juice. Strain into glass.",
        );
        assert_eq!(
            specs,
            vec![
                InstructionSpec { amount_ml: 50.0, name: "Tequila".into() },
                InstructionSpec { amount_ml: 20.0, name: "Triple Sec".into() },
                InstructionSpec { amount_ml: 25.0, name: "lime juice".into() },
            ]
        );
    }

    #[test]
    fn estimates_volume_and_abv() {
        let est =
            estimate_volume_abv("Shake 50ml Tequila, 20ml Triple Sec, 25ml lime juice. Serve.");
        assert_eq!(est.total_volume_ml, 95);
        // 50*0.40 + 20*0.30 = 26ml alcohol over 95ml
        assert_eq!(est.abv, 27.4);
    }

    #[test]
    fn handles_decimals_and_empty_text() {
        let specs = parse_instruction_specs("Stir 22.5ml Campari, 60ml Gin.");
        assert_eq!(specs[0].amount_ml, 22.5);
        assert_eq!(estimate_volume_abv(""), VolumeEstimate { total_volume_ml: 0, abv: 0.0 });
    }
}
