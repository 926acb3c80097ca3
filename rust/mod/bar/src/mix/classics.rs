/// Classic cocktail definition used for matching drafts. Each core slot
/// lists interchangeable alternatives; a slot matches when any chosen
/// ingredient name contains one of them.
#[derive(Debug, Clone, Copy)]
pub struct Classic {
    pub name: &'static str,
    pub core: &'static [&'static [&'static str]],
}

pub const CLASSICS: &[Classic] = &[
    Classic { name: "Gimlet", core: &[&["gin"], &["lime"], &["simple syrup"]] },
    Classic {
        name: "Manhattan",
        core: &[&["bourbon", "rye", "whiskey"], &["sweet vermouth"], &["angostura"]],
    },
    Classic { name: "Negroni", core: &[&["gin"], &["campari"], &["sweet vermouth"]] },
    Classic { name: "Daiquiri", core: &[&["white rum"], &["lime"], &["simple syrup"]] },
    Classic { name: "Margarita", core: &[&["tequila"], &["cointreau", "triple sec"], &["lime"]] },
    Classic {
        name: "Whiskey Sour",
        core: &[&["bourbon", "rye", "whiskey"], &["lemon"], &["simple syrup"]],
    },
    Classic { name: "White Russian", core: &[&["vodka"], &["kahlua"], &["cream"]] },
    Classic { name: "Sidecar", core: &[&["cognac"], &["cointreau", "triple sec"], &["lemon"]] },
    Classic {
        name: "Tom Collins",
        core: &[&["gin"], &["lemon"], &["simple syrup"], &["club soda"]],
    },
    Classic {
        name: "Old Fashioned",
        core: &[
            &["bourbon", "rye", "whiskey"],
            &["simple syrup", "sugar cube", "demerara"],
            &["angostura"],
        ],
    },
    Classic {
        name: "Mojito",
        core: &[&["white rum"], &["lime"], &["simple syrup"], &["mint"]],
    },
    Classic { name: "Boulevardier", core: &[&["bourbon"], &["campari"], &["sweet vermouth"]] },
    Classic { name: "Bee's Knees", core: &[&["gin"], &["lemon"], &["honey syrup"]] },
    Classic { name: "Gold Rush", core: &[&["bourbon"], &["lemon"], &["honey syrup"]] },
    Classic { name: "Paloma", core: &[&["tequila"], &["grapefruit"], &["lime"]] },
    Classic { name: "Espresso Martini", core: &[&["vodka"], &["kahlua"]] },
    Classic {
        name: "Cosmopolitan",
        core: &[&["vodka"], &["cointreau", "triple sec"], &["cranberry"], &["lime"]],
    },
    Classic { name: "Mint Julep", core: &[&["bourbon"], &["mint"], &["simple syrup"]] },
    Classic {
        name: "French 75",
        core: &[&["gin"], &["lemon"], &["simple syrup"], &["champagne", "prosecco"]],
    },
    Classic {
        name: "Dark 'n' Stormy",
        core: &[&["dark rum", "aged rum"], &["ginger beer"], &["lime"]],
    },
    Classic { name: "Moscow Mule", core: &[&["vodka"], &["ginger beer"], &["lime"]] },
    Classic { name: "Rob Roy", core: &[&["scotch"], &["sweet vermouth"], &["angostura"]] },
    Classic { name: "Hanky Panky", core: &[&["gin"], &["sweet vermouth"], &["fernet"]] },
    Classic {
        name: "Penicillin",
        core: &[&["scotch"], &["lemon"], &["honey syrup"], &["ginger"]],
    },
    Classic { name: "Jungle Bird", core: &[&["dark rum", "aged rum"], &["campari"], &["pineapple"]] },
    Classic { name: "Amaretto Sour", core: &[&["amaretto"], &["lemon"], &["simple syrup"]] },
    Classic {
        name: "Mai Tai",
        core: &[&["dark rum", "aged rum"], &["cointreau", "triple sec"], &["lime"], &["simple syrup"]],
    },
    Classic { name: "Aperol Spritz", core: &[&["aperol"], &["prosecco"], &["club soda"]] },
];

/// A classic that a draft resembles.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicMatch {
    pub name: &'static str,
    /// Fraction of core slots matched, in `[0.66, 1]`.
    pub ratio: f64,
    /// First alternative of each unmatched slot.
    pub missing: Vec<&'static str>,
}

/// Match lowercased chosen names against the classics. Requires at least
/// two chosen names; returns matches at two thirds or better, best first.
/// Ties keep table order.
pub fn find_matches(chosen: &[String]) -> Vec<ClassicMatch> {
    if chosen.len() < 2 {
        return Vec::new();
    }
    let slot_matched = |slot: &[&str]| {
        slot.iter().any(|alt| chosen.iter().any(|name| name.contains(alt)))
    };

    let mut matches: Vec<ClassicMatch> = CLASSICS
        .iter()
        .filter_map(|classic| {
            let matched = classic.core.iter().filter(|slot| slot_matched(slot)).count();
            let ratio = matched as f64 / classic.core.len() as f64;
            if ratio < 0.66 {
                return None;
            }
            let missing = classic
                .core
                .iter()
                .filter(|slot| !slot_matched(slot))
                .map(|slot| slot[0])
                .collect();
            Some(ClassicMatch { name: classic.name, ratio, missing })
        })
        .collect();
    matches.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// One-line verdict for the best match, if any.
pub fn describe_best(chosen: &[String]) -> Option<String> {
    let best = find_matches(chosen).into_iter().next()?;
    if best.missing.is_empty() {
        Some(format!("This looks like a {}!", best.name))
    } else {
        Some(format!("Add {} to make a {}", best.missing.join(" + "), best.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_match_names_the_classic() {
        let verdict = describe_best(&names(&["gin", "campari", "sweet vermouth"]));
        assert_eq!(verdict.as_deref(), Some("This looks like a Negroni!"));
    }

    #[test]
    fn partial_match_lists_whats_missing() {
        let verdict = describe_best(&names(&["bourbon", "lemon"]));
        assert_eq!(verdict.as_deref(), Some("Add simple syrup to make a Whiskey Sour"));
    }

    #[test]
    fn substring_match_accepts_branded_names() {
        let verdict = describe_best(&names(&["london dry gin", "campari", "sweet vermouth"]));
        assert_eq!(verdict.as_deref(), Some("This looks like a Negroni!"));
    }

    #[test]
    fn needs_two_names() {
        assert!(find_matches(&names(&["gin"])).is_empty());
        assert_eq!(describe_best(&names(&["gin"])), None);
    }

    #[test]
    fn full_matches_sort_ahead_of_partials() {
        let matches = find_matches(&names(&["gin", "campari", "sweet vermouth"]));
        assert_eq!(matches[0].name, "Negroni");
        assert_eq!(matches[0].ratio, 1.0);
        // Hanky Panky shares gin + sweet vermouth
        assert!(matches.iter().any(|m| m.name == "Hanky Panky"));
    }

    #[test]
    fn table_is_complete() {
        assert_eq!(CLASSICS.len(), 28);
        assert!(CLASSICS.iter().all(|c| c.core.len() >= 2));
    }
}
