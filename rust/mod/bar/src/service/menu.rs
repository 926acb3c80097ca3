use openbar_core::ServiceError;

use super::BarService;
use crate::model::{DEFAULT_SELL_PRICE, Recipe};

const DEFAULT_TITLE: &str = "Cocktail Menu";

const MENU_STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: Georgia, serif; background: #0a0a0a; color: #fff; padding: 20px; }
    h1 { color: #D4AF37; text-align: center; font-weight: 300; letter-spacing: 4px; margin-bottom: 30px; }
    .cocktail { border-bottom: 1px solid rgba(255,255,255,0.1); padding: 20px 0; }
    .cocktail h2 { color: #fff; font-weight: 300; margin-bottom: 5px; }
    .cocktail .type { color: rgba(255,255,255,0.5); font-size: 14px; }
    .cocktail .price { color: #D4AF37; font-size: 18px; float: right; }
    .cocktail .desc { color: rgba(255,255,255,0.6); font-size: 14px; margin-top: 10px; }"#;

fn esc(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn menu_html(title: &str, items: &[&Recipe]) -> String {
    let mut entries = String::new();
    for c in items {
        let price = c.sell_price.filter(|p| *p != 0.0).unwrap_or(DEFAULT_SELL_PRICE);
        entries.push_str(&format!(
            "  <div class=\"cocktail\">\n    <span class=\"price\">€{price:.2}</span>\n    <h2>{}</h2>\n    <p class=\"type\">{} • {}</p>\n    <p class=\"desc\">{}</p>\n  </div>\n",
            esc(&c.name),
            esc(&c.recipe_type),
            esc(&c.glass),
            esc(&c.ingredients.join(", ")),
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>{title}</title>\n  <style>\n{MENU_STYLE}\n  </style>\n</head>\n<body>\n  <h1>{upper}</h1>\n{entries}</body>\n</html>\n",
        title = esc(title),
        upper = esc(&title.to_uppercase()),
    )
}

impl BarService {
    // ── Menu builder ──

    /// Cocktails eligible for a menu: everything currently makeable.
    pub fn menu_candidates(&self) -> Result<Vec<Recipe>, ServiceError> {
        self.require_premium("Menu Builder")?;
        Ok(self.state.recipes.iter().filter(|c| c.can_make).cloned().collect())
    }

    /// Render a printable HTML menu for the named cocktails, in order and
    /// deduplicated by name. Every entry must be makeable right now.
    pub fn render_menu(&self, title: &str, names: &[String]) -> Result<String, ServiceError> {
        self.require_premium("Menu Builder")?;
        if names.is_empty() {
            return Err(ServiceError::Validation("the menu is empty".into()));
        }
        let title = title.trim();
        let title = if title.is_empty() { DEFAULT_TITLE } else { title };

        let mut picked: Vec<&Recipe> = Vec::new();
        for name in names {
            let recipe = self
                .state
                .recipe(name)
                .ok_or_else(|| ServiceError::NotFound(format!("recipe {name} not found")))?;
            if !recipe.can_make {
                return Err(ServiceError::Validation(format!(
                    "{name} is missing ingredients"
                )));
            }
            if !picked.iter().any(|c| c.name == recipe.name) {
                picked.push(recipe);
            }
        }
        Ok(menu_html(title, &picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{premium_service, service};

    #[test]
    fn menu_builder_is_premium_only() {
        let (_dir, svc) = service();
        assert!(matches!(
            svc.menu_candidates(),
            Err(ServiceError::PermissionDenied(_))
        ));
        assert!(matches!(
            svc.render_menu("", &["Negroni".into()]),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn candidates_are_the_makeable_recipes() {
        let (_dir, svc) = premium_service();
        let candidates = svc.menu_candidates().unwrap();
        assert!(candidates.iter().all(|c| c.can_make));
        assert!(candidates.iter().any(|c| c.name == "Negroni"));
        // Espresso is out of stock by default
        assert!(!candidates.iter().any(|c| c.name == "Espresso Martini"));
    }

    #[test]
    fn renders_titled_page_with_prices() {
        let (_dir, svc) = premium_service();
        let html = svc
            .render_menu("Friday List", &["Negroni".into(), "Gimlet".into()])
            .unwrap();
        assert!(html.contains("<title>Friday List</title>"));
        assert!(html.contains("<h1>FRIDAY LIST</h1>"));
        assert!(html.contains("<h2>Negroni</h2>"));
        assert!(html.contains("€13.00"));
        assert!(html.contains("Classic • Old Fashioned Glass"));
        assert!(html.contains("Gin, Campari, Sweet Vermouth"));
    }

    #[test]
    fn blank_title_falls_back() {
        let (_dir, svc) = premium_service();
        let html = svc.render_menu("   ", &["Negroni".into()]).unwrap();
        assert!(html.contains("<title>Cocktail Menu</title>"));
        assert!(html.contains("<h1>COCKTAIL MENU</h1>"));
    }

    #[test]
    fn duplicates_collapse_and_order_holds() {
        let (_dir, svc) = premium_service();
        let html = svc
            .render_menu("", &["Gimlet".into(), "Negroni".into(), "Gimlet".into()])
            .unwrap();
        assert_eq!(html.matches("<h2>Gimlet</h2>").count(), 1);
        let gimlet = html.find("<h2>Gimlet</h2>").unwrap();
        let negroni = html.find("<h2>Negroni</h2>").unwrap();
        assert!(gimlet < negroni);
    }

    #[test]
    fn rejects_unknown_and_unmakeable_entries() {
        let (_dir, svc) = premium_service();
        assert!(matches!(
            svc.render_menu("", &[]),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.render_menu("", &["Nope".into()]),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.render_menu("", &["Espresso Martini".into()]),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let (_dir, mut svc) = premium_service();
        svc.state.recipes[0].name = "Gin & <Tonic>".into();
        svc.state.refresh_availability();
        let names = vec!["Gin & <Tonic>".to_string()];
        let html = svc.render_menu("", &names).unwrap();
        assert!(html.contains("<h2>Gin &amp; &lt;Tonic&gt;</h2>"));
    }
}
