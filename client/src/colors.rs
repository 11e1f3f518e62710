use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Storage};

use crate::state::{
    State, BACKGROUND_COLOR_KEY, DEFAULT_BACKGROUND_COLOR, DEFAULT_DRAWING_COLOR,
    DRAWING_COLOR_KEY,
};

fn stored(storage: Option<&Storage>, key: &str) -> Option<String> {
    storage?.get_item(key).ok().flatten()
}

/// Both color slots, from localStorage with defaults.
pub fn load_colors(storage: Option<&Storage>) -> (String, String) {
    let drawing = stored(storage, DRAWING_COLOR_KEY)
        .unwrap_or_else(|| DEFAULT_DRAWING_COLOR.to_string());
    let background = stored(storage, BACKGROUND_COLOR_KEY)
        .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string());
    (drawing, background)
}

pub fn store_color(storage: Option<&Storage>, key: &str, value: &str) {
    if let Some(storage) = storage {
        let _ = storage.set_item(key, value);
    }
}

/// New shapes pick up the color; existing shapes keep theirs.
pub fn set_drawing_color(state: &mut State, color: String) {
    state.editor.set_stroke_color(color.clone());
    state.drawing_color = color;
}

pub fn set_background_color(state: &mut State, color: String) {
    state.background_color = color;
    apply_background(&state.canvas, &state.background_color);
}

pub fn apply_background(canvas: &Element, color: &str) {
    if let Some(element) = canvas.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("background-color", color);
    } else {
        // An inline <svg> is not an HtmlElement; fall back to the attribute.
        let _ = canvas.set_attribute("style", &format!("background-color: {color}"));
    }
}
