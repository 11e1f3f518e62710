use serde::{Deserialize, Serialize};
use web_sys::Element;

use vectorpad_model::Editor;

pub const DEFAULT_DRAWING_COLOR: &str = "#f1a3df";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#999999";

pub const DRAWING_COLOR_KEY: &str = "vectorpad.drawingColor";
pub const BACKGROUND_COLOR_KEY: &str = "vectorpad.backgroundColor";
pub const PREFERENCES_KEY: &str = "vectorpad.preferences";

/// Canvas geometry and theme, persisted as one JSON blob in localStorage.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Preferences {
    pub theme: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub view_box: [f64; 4],
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            canvas_width: 800.0,
            canvas_height: 600.0,
            view_box: [0.0, 0.0, 800.0, 600.0],
        }
    }
}

pub struct State {
    pub canvas: Element,
    pub editor: Editor,
    pub drawing_color: String,
    pub background_color: String,
    pub prefs: Preferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_round_trip_through_json() {
        let prefs = Preferences {
            theme: "dark".to_string(),
            canvas_width: 1024.0,
            canvas_height: 768.0,
            view_box: [0.0, 0.0, 512.0, 384.0],
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn stale_preferences_blob_is_rejected_not_mangled() {
        assert!(serde_json::from_str::<Preferences>("{\"theme\":\"dark\"}").is_err());
        assert!(serde_json::from_str::<Preferences>("not json").is_err());
    }
}
