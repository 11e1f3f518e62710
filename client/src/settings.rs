use web_sys::{Element, HtmlInputElement, Storage};

use vectorpad_model::svg::parse_view_box;

use crate::state::{Preferences, PREFERENCES_KEY};

pub fn load_preferences(storage: Option<&Storage>) -> Preferences {
    storage
        .and_then(|storage| storage.get_item(PREFERENCES_KEY).ok().flatten())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

pub fn store_preferences(storage: Option<&Storage>, prefs: &Preferences) {
    let Some(storage) = storage else {
        return;
    };
    if let Ok(json) = serde_json::to_string(prefs) {
        let _ = storage.set_item(PREFERENCES_KEY, &json);
    }
}

/// Pushes the preferred size and viewBox onto the canvas element.
pub fn apply_canvas_settings(canvas: &Element, prefs: &Preferences) {
    let _ = canvas.set_attribute("width", &prefs.canvas_width.to_string());
    let _ = canvas.set_attribute("height", &prefs.canvas_height.to_string());
    let [min_x, min_y, width, height] = prefs.view_box;
    let _ = canvas.set_attribute("viewBox", &format!("{min_x} {min_y} {width} {height}"));
}

pub fn fill_settings_inputs(
    width_input: &HtmlInputElement,
    height_input: &HtmlInputElement,
    view_box_input: &HtmlInputElement,
    prefs: &Preferences,
) {
    width_input.set_value(&prefs.canvas_width.to_string());
    height_input.set_value(&prefs.canvas_height.to_string());
    let [min_x, min_y, width, height] = prefs.view_box;
    view_box_input.set_value(&format!("{min_x} {min_y} {width} {height}"));
}

fn parse_dimension(value: &str, name: &str) -> Result<f64, String> {
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {name}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("Invalid {name}"));
    }
    Ok(value)
}

/// Validates the settings panel inputs. Nothing is applied on error, so the
/// previous canvas state survives a bad apply.
pub fn parse_settings_inputs(
    width: &str,
    height: &str,
    view_box: &str,
) -> Result<(f64, f64, [f64; 4]), String> {
    let width = parse_dimension(width, "width")?;
    let height = parse_dimension(height, "height")?;
    let view_box =
        parse_view_box(view_box).ok_or_else(|| "Invalid viewBox".to_string())?;
    if view_box[2] <= 0.0 || view_box[3] <= 0.0 {
        return Err("Invalid viewBox".to_string());
    }
    Ok((width, height, view_box))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_settings_accepts_valid_values() {
        assert_eq!(
            parse_settings_inputs("800", " 600 ", "0 0 400 300"),
            Ok((800.0, 600.0, [0.0, 0.0, 400.0, 300.0]))
        );
    }

    #[test]
    fn parse_settings_rejects_bad_dimensions_and_view_box() {
        assert!(parse_settings_inputs("0", "600", "0 0 400 300").is_err());
        assert!(parse_settings_inputs("800", "-1", "0 0 400 300").is_err());
        assert!(parse_settings_inputs("800", "600", "0 0 400").is_err());
        assert!(parse_settings_inputs("800", "600", "0 0 0 300").is_err());
        assert!(parse_settings_inputs("eight", "600", "0 0 400 300").is_err());
    }
}
