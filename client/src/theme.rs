use web_sys::Document;

use crate::state::Preferences;

pub fn apply_theme(document: &Document, theme: &str) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", theme);
    }
}

/// Flips the stored theme and returns the new value.
pub fn toggle_theme(prefs: &mut Preferences) -> String {
    prefs.theme = if prefs.theme == "dark" {
        "light".to_string()
    } else {
        "dark".to_string()
    };
    prefs.theme.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_light_and_dark() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.theme, "light");
        assert_eq!(toggle_theme(&mut prefs), "dark");
        assert_eq!(toggle_theme(&mut prefs), "light");
    }
}
