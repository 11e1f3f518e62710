use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Document, Element, MouseEvent, Window};

use vectorpad_model::svg::parse_view_box;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Pointer position in canvas user units. The canvas is sized in CSS pixels
/// but draws in viewBox units, so the offset is rescaled through the live
/// viewBox attribute.
pub fn event_to_point(canvas: &Element, event: &MouseEvent) -> Option<(f64, f64)> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let px = event.client_x() as f64 - rect.left();
    let py = event.client_y() as f64 - rect.top();
    let view_box = canvas
        .get_attribute("viewBox")
        .and_then(|value| parse_view_box(&value));
    match view_box {
        Some([min_x, min_y, vw, vh]) if vw > 0.0 && vh > 0.0 => Some((
            min_x + px * vw / rect.width(),
            min_y + py * vh / rect.height(),
        )),
        _ => Some((px, py)),
    }
}

/// Dispatches a bubbling custom event with a plain-object detail built from
/// key/value pairs.
pub fn dispatch_custom_event(target: &Element, name: &str, detail: &[(&str, JsValue)]) {
    let object = js_sys::Object::new();
    for (key, value) in detail {
        let _ = Reflect::set(object.as_ref(), &JsValue::from_str(key), value);
    }
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(object.as_ref());
    if let Ok(event) = CustomEvent::new_with_event_init_dict(name, &init) {
        let _ = target.dispatch_event(&event);
    }
}

pub fn set_status(status_el: &Element, status_text: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_text.set_text_content(Some(text));
}

/// Shows a transient message, then reverts to the idle status after 1.5s.
pub fn flash_status(
    window: &Window,
    status_el: &Element,
    status_text: &Element,
    state: &str,
    text: &str,
    idle_text: &str,
) {
    set_status(status_el, status_text, state, text);
    let status_el = status_el.clone();
    let status_text = status_text.clone();
    let idle_text = idle_text.to_string();
    let cb = Closure::once_into_js(move || {
        set_status(&status_el, &status_text, "idle", &idle_text);
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 1500);
}
