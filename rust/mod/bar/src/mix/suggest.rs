use crate::model::ComposedRecipe;

use super::classics;

/// Build tips for a draft: balance advice first, then the closest classic.
pub fn suggestions(composed: &ComposedRecipe) -> Vec<String> {
    let mut out = Vec::new();

    let has_base = composed.base_spirit.is_some();
    let has_acid = !composed.acids.is_empty();
    let has_sweetener = !composed.sweeteners.is_empty();

    if has_base && has_acid && !has_sweetener {
        out.push("Try adding 15ml Simple Syrup or Agave to balance the acid".to_string());
    }
    if has_base && has_sweetener && !has_acid {
        out.push("Consider adding citrus juice for brightness and balance".to_string());
    }

    if let Some(classic) = classics::describe_best(&composed.chosen_names()) {
        out.push(classic);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pour;

    #[test]
    fn acid_without_sweetener_gets_syrup_tip() {
        let draft = ComposedRecipe {
            base_spirit: Some("Gin".into()),
            acids: vec![Pour::new("Lime Juice", 22.5)],
            ..Default::default()
        };
        let tips = suggestions(&draft);
        assert_eq!(tips[0], "Try adding 15ml Simple Syrup or Agave to balance the acid");
    }

    #[test]
    fn sweetener_without_acid_gets_citrus_tip() {
        let draft = ComposedRecipe {
            base_spirit: Some("Bourbon".into()),
            sweeteners: vec![Pour::new("Honey Syrup", 15.0)],
            ..Default::default()
        };
        let tips = suggestions(&draft);
        assert_eq!(tips[0], "Consider adding citrus juice for brightness and balance");
    }

    #[test]
    fn classic_verdict_rides_along() {
        let draft = ComposedRecipe {
            base_spirit: Some("Gin".into()),
            modifiers: vec![
                Pour::new("Campari", 22.5),
                Pour::new("Sweet Vermouth", 22.5),
            ],
            ..Default::default()
        };
        let tips = suggestions(&draft);
        assert_eq!(tips, vec!["This looks like a Negroni!"]);
    }

    #[test]
    fn empty_draft_has_no_tips() {
        assert!(suggestions(&ComposedRecipe::default()).is_empty());
    }
}
