use std::cell::Cell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit, PointerEvent, Window,
};

// Past this radius the knob direction starts selecting tools.
const DEAD_ZONE: f64 = 12.0;
const KNOB_TRAVEL: f64 = 30.0;

fn navigator_max_touch_points(window: &Window) -> Option<u32> {
    let navigator = Reflect::get(window.as_ref(), &JsValue::from_str("navigator")).ok()?;
    Reflect::get(&navigator, &JsValue::from_str("maxTouchPoints"))
        .ok()?
        .as_f64()
        .map(|value| value as u32)
}

pub fn is_touch_device(window: &Window) -> bool {
    navigator_max_touch_points(window).unwrap_or(0) > 0
}

/// Quantizes a knob offset to one of the four tool shortcuts: up picks the
/// line tool, down the rectangle, left the circle, right the ellipse.
pub fn direction_key(dx: f64, dy: f64) -> Option<&'static str> {
    if dx * dx + dy * dy < DEAD_ZONE * DEAD_ZONE {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { "e" } else { "c" })
    } else {
        Some(if dy > 0.0 { "r" } else { "l" })
    }
}

fn dispatch_shortcut(document: &Document, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    if let Ok(event) = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init) {
        let _ = document.dispatch_event(&event);
    }
}

fn move_knob(knob: &Element, dx: f64, dy: f64) {
    let len = (dx * dx + dy * dy).sqrt();
    let (dx, dy) = if len > KNOB_TRAVEL {
        (dx / len * KNOB_TRAVEL, dy / len * KNOB_TRAVEL)
    } else {
        (dx, dy)
    };
    if let Some(element) = knob.dyn_ref::<HtmlElement>() {
        let _ = element
            .style()
            .set_property("transform", &format!("translate({dx}px, {dy}px)"));
    }
}

fn reset_knob(knob: &Element) {
    if let Some(element) = knob.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("transform", "translate(0px, 0px)");
    }
}

/// Wires the virtual joystick pad. The knob drag is quantized to a direction
/// and replayed through the ordinary keyboard-shortcut path, so the joystick
/// needs no tool logic of its own. No-op on non-touch devices.
pub fn install_joystick(
    window: &Window,
    document: &Document,
    pad: &Element,
) -> Result<(), JsValue> {
    if !is_touch_device(window) {
        let _ = pad.set_attribute("hidden", "");
        return Ok(());
    }
    let _ = pad.remove_attribute("hidden");

    let knob = document.create_element("div")?;
    knob.set_class_name("joystick-knob");
    pad.append_child(&knob)?;

    let active = Rc::new(Cell::new(false));
    let last_key: Rc<Cell<Option<&'static str>>> = Rc::new(Cell::new(None));

    {
        let active = active.clone();
        let pad_cb = pad.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            event.prevent_default();
            active.set(true);
            let _ = pad_cb.set_pointer_capture(event.pointer_id());
        });
        pad.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let active = active.clone();
        let last_key = last_key.clone();
        let pad_cb = pad.clone();
        let knob_cb = knob.clone();
        let document = document.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if !active.get() {
                return;
            }
            event.prevent_default();
            let rect = pad_cb.get_bounding_client_rect();
            let dx = event.client_x() as f64 - (rect.left() + rect.width() / 2.0);
            let dy = event.client_y() as f64 - (rect.top() + rect.height() / 2.0);
            move_knob(&knob_cb, dx, dy);
            let key = direction_key(dx, dy);
            if key != last_key.get() {
                last_key.set(key);
                if let Some(key) = key {
                    dispatch_shortcut(&document, key);
                }
            }
        });
        pad.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for kind in ["pointerup", "pointercancel"] {
        let active = active.clone();
        let last_key = last_key.clone();
        let knob_cb = knob.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
            active.set(false);
            last_key.set(None);
            reset_knob(&knob_cb);
        });
        pad.add_event_listener_with_callback(kind, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_key_has_a_dead_zone() {
        assert_eq!(direction_key(0.0, 0.0), None);
        assert_eq!(direction_key(5.0, 5.0), None);
    }

    #[test]
    fn direction_key_quantizes_to_four_tools() {
        assert_eq!(direction_key(0.0, -20.0), Some("l"));
        assert_eq!(direction_key(0.0, 20.0), Some("r"));
        assert_eq!(direction_key(-20.0, 0.0), Some("c"));
        assert_eq!(direction_key(20.0, 0.0), Some("e"));
        assert_eq!(direction_key(25.0, -10.0), Some("e"));
        assert_eq!(direction_key(-10.0, 25.0), Some("r"));
    }
}
