use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, Element, Event, FileReader, HtmlButtonElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, ProgressEvent, Storage,
};

use vectorpad_model::{Editor, EditorEvent, Mode, Tool};

use crate::code_view::{sync_code_view, toggle_panel};
use crate::colors::{
    apply_background, load_colors, set_background_color, set_drawing_color, store_color,
};
use crate::dom::{dispatch_custom_event, event_to_point, flash_status, get_element, set_status};
use crate::io::{export_svg, import_svg_text};
use crate::joystick::install_joystick;
use crate::render::sync_canvas;
use crate::settings::{
    apply_canvas_settings, fill_settings_inputs, load_preferences, parse_settings_inputs,
    store_preferences,
};
use crate::state::{State, BACKGROUND_COLOR_KEY, DRAWING_COLOR_KEY};
use crate::theme::{apply_theme, toggle_theme};
use crate::toolbar::{highlight_tool, render_toolbar, set_canvas_cursor, tool_from_event};

const IDLE_STATUS: &str = "Ready";

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn make_editor_salt() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

fn local_storage(window: &web_sys::Window) -> Option<Storage> {
    window.local_storage().ok().flatten()
}

/// Shortcuts must not fire while the user is typing markup or settings.
fn is_text_input_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return false;
    };
    matches!(target.tag_name().to_uppercase().as_str(), "INPUT" | "TEXTAREA")
}

enum Detail {
    Text(&'static str),
    Number(f64),
}

/// The outward custom-event contract: `drawingstart{mode,startX,startY}`,
/// `drawing{mode,startX,startY,endX,endY}`, `drawingend{mode}`,
/// `modechange{mode}`.
fn event_payload(event: &EditorEvent) -> (&'static str, Vec<(&'static str, Detail)>) {
    match event {
        EditorEvent::DrawingStart {
            tool,
            start_x,
            start_y,
        } => (
            "drawingstart",
            vec![
                ("mode", Detail::Text(tool.name())),
                ("startX", Detail::Number(*start_x)),
                ("startY", Detail::Number(*start_y)),
            ],
        ),
        EditorEvent::Drawing {
            tool,
            start_x,
            start_y,
            end_x,
            end_y,
        } => (
            "drawing",
            vec![
                ("mode", Detail::Text(tool.name())),
                ("startX", Detail::Number(*start_x)),
                ("startY", Detail::Number(*start_y)),
                ("endX", Detail::Number(*end_x)),
                ("endY", Detail::Number(*end_y)),
            ],
        ),
        EditorEvent::DrawingEnd { tool } => {
            ("drawingend", vec![("mode", Detail::Text(tool.name()))])
        }
        EditorEvent::ModeChange { tool } => {
            ("modechange", vec![("mode", Detail::Text(tool.name()))])
        }
    }
}

fn emit_editor_events(canvas: &Element, events: &[EditorEvent]) {
    for event in events {
        let (name, detail) = event_payload(event);
        let pairs: Vec<(&str, JsValue)> = detail
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Detail::Text(text) => JsValue::from_str(text),
                    Detail::Number(number) => JsValue::from_f64(number),
                };
                (key, value)
            })
            .collect();
        dispatch_custom_event(canvas, name, &pairs);
    }
}

fn refresh(state: &State, code_view: &HtmlTextAreaElement) {
    sync_canvas(&state.canvas, &state.editor);
    sync_code_view(code_view, &state.editor);
}

fn select_drag_active(editor: &Editor) -> bool {
    matches!(&editor.mode, Mode::Select(select) if select.drag.is_some())
}

fn event_detail_mode(event: &Event) -> Option<String> {
    let custom: &CustomEvent = event.dyn_ref()?;
    Reflect::get(&custom.detail(), &JsValue::from_str("mode"))
        .ok()?
        .as_string()
}

fn switch_tool(
    state: &mut State,
    tool: Tool,
    toolbar: &Element,
    code_view: &HtmlTextAreaElement,
) -> Vec<EditorEvent> {
    let events = state.editor.set_tool(tool);
    highlight_tool(toolbar, tool);
    set_canvas_cursor(&state.canvas, tool);
    refresh(state, code_view);
    events
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let storage = local_storage(&window);

    let canvas: Element = get_element(&document, "canvas")?;
    let toolbar: Element = get_element(&document, "toolbar")?;
    let drawing_color_input: HtmlInputElement = get_element(&document, "drawingColor")?;
    let background_color_input: HtmlInputElement = get_element(&document, "backgroundColor")?;
    let code_panel: Element = get_element(&document, "codePanel")?;
    let code_view: HtmlTextAreaElement = get_element(&document, "codeView")?;
    let code_toggle: HtmlButtonElement = get_element(&document, "codeToggle")?;
    let code_load: HtmlButtonElement = get_element(&document, "codeLoad")?;
    let export_button: HtmlButtonElement = get_element(&document, "exportSvg")?;
    let import_button: HtmlButtonElement = get_element(&document, "importSvg")?;
    let import_file: HtmlInputElement = get_element(&document, "importFile")?;
    let width_input: HtmlInputElement = get_element(&document, "canvasWidth")?;
    let height_input: HtmlInputElement = get_element(&document, "canvasHeight")?;
    let view_box_input: HtmlInputElement = get_element(&document, "canvasViewBox")?;
    let apply_settings_button: HtmlButtonElement = get_element(&document, "applySettings")?;
    let theme_toggle: HtmlButtonElement = get_element(&document, "themeToggle")?;
    let joystick_pad: Element = get_element(&document, "joystick")?;
    let status_el = document
        .get_element_by_id("status")
        .ok_or_else(|| JsValue::from_str("Missing status element"))?;
    let status_text = document
        .get_element_by_id("statusText")
        .ok_or_else(|| JsValue::from_str("Missing status text"))?;

    let (drawing_color, background_color) = load_colors(storage.as_ref());
    let prefs = load_preferences(storage.as_ref());

    let mut editor = Editor::new(make_editor_salt());
    editor.set_stroke_color(drawing_color.clone());

    apply_theme(&document, &prefs.theme);
    apply_canvas_settings(&canvas, &prefs);
    apply_background(&canvas, &background_color);
    fill_settings_inputs(&width_input, &height_input, &view_box_input, &prefs);
    drawing_color_input.set_value(&drawing_color);
    background_color_input.set_value(&background_color);

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        editor,
        drawing_color,
        background_color,
        prefs,
    }));

    render_toolbar(&document, &toolbar)?;
    highlight_tool(&toolbar, Tool::Select);
    set_canvas_cursor(&canvas, Tool::Select);
    set_status(&status_el, &status_text, "idle", IDLE_STATUS);
    {
        let state = state.borrow();
        refresh(&state, &code_view);
    }
    install_joystick(&window, &document, &joystick_pad)?;

    {
        let click_state = state.clone();
        let canvas_cb = canvas.clone();
        let code_view = code_view.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some((x, y)) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            let events = {
                let mut state = click_state.borrow_mut();
                let events = state.editor.handle_click(x, y);
                refresh(&state, &code_view);
                events
            };
            emit_editor_events(&canvas_cb, &events);
        });
        canvas.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let move_state = state.clone();
        let canvas_cb = canvas.clone();
        let code_view = code_view.clone();
        let onmove = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some((x, y)) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            let events = {
                let mut state = move_state.borrow_mut();
                let busy =
                    state.editor.is_drawing() || select_drag_active(&state.editor);
                if !busy {
                    return;
                }
                let events = state.editor.handle_move(x, y);
                refresh(&state, &code_view);
                events
            };
            emit_editor_events(&canvas_cb, &events);
        });
        canvas.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let down_state = state.clone();
        let canvas_cb = canvas.clone();
        let ondown = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            let Some((x, y)) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            down_state.borrow_mut().editor.handle_mouse_down(x, y);
        });
        canvas.add_event_listener_with_callback("mousedown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let up_state = state.clone();
        let onup = Closure::<dyn FnMut(MouseEvent)>::new(move |_| {
            up_state.borrow_mut().editor.handle_mouse_up();
        });
        canvas.add_event_listener_with_callback("mouseup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let leave_state = state.clone();
        let canvas_cb = canvas.clone();
        let code_view = code_view.clone();
        let onleave = Closure::<dyn FnMut(MouseEvent)>::new(move |_| {
            let events = {
                let mut state = leave_state.borrow_mut();
                let events = state.editor.handle_leave();
                refresh(&state, &code_view);
                events
            };
            emit_editor_events(&canvas_cb, &events);
        });
        canvas.add_event_listener_with_callback("mouseleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    {
        let dbl_state = state.clone();
        let canvas_cb = canvas.clone();
        let code_view = code_view.clone();
        let ondblclick = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            let events = {
                let mut state = dbl_state.borrow_mut();
                let events = state.editor.handle_double_click();
                refresh(&state, &code_view);
                events
            };
            emit_editor_events(&canvas_cb, &events);
        });
        canvas.add_event_listener_with_callback("dblclick", ondblclick.as_ref().unchecked_ref())?;
        ondblclick.forget();
    }

    {
        let key_state = state.clone();
        let canvas_cb = canvas.clone();
        let toolbar_cb = toolbar.clone();
        let code_view = code_view.clone();
        let document_cb = document.clone();
        let import_file_cb = import_file.clone();
        let window_cb = window.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if is_text_input_target(&event) {
                return;
            }
            let key = event.key();
            if key == "Escape" {
                let events = {
                    let mut state = key_state.borrow_mut();
                    let events = state.editor.handle_escape();
                    refresh(&state, &code_view);
                    events
                };
                emit_editor_events(&canvas_cb, &events);
                return;
            }
            if (event.ctrl_key() || event.meta_key()) && key.eq_ignore_ascii_case("c") {
                let events = {
                    let mut state = key_state.borrow_mut();
                    // Without an open shape this is the system copy shortcut.
                    if !state.editor.has_open_shape() {
                        return;
                    }
                    event.prevent_default();
                    let events = state.editor.finish_open_shape();
                    refresh(&state, &code_view);
                    events
                };
                emit_editor_events(&canvas_cb, &events);
                return;
            }
            if event.alt_key() && key.eq_ignore_ascii_case("e") {
                event.prevent_default();
                let state = key_state.borrow();
                if export_svg(&document_cb, &state).is_err() {
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "error",
                        "Export failed",
                        IDLE_STATUS,
                    );
                }
                return;
            }
            if event.alt_key() && key.eq_ignore_ascii_case("i") {
                event.prevent_default();
                import_file_cb.set_value("");
                import_file_cb.click();
                return;
            }
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if let Some(tool) = Tool::from_shortcut(&key.to_lowercase()) {
                let events = {
                    let mut state = key_state.borrow_mut();
                    switch_tool(&mut state, tool, &toolbar_cb, &code_view)
                };
                emit_editor_events(&canvas_cb, &events);
            }
        });
        document.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let tool_state = state.clone();
        let canvas_cb = canvas.clone();
        let toolbar_cb = toolbar.clone();
        let code_view = code_view.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(tool) = tool_from_event(&event) else {
                return;
            };
            let events = {
                let mut state = tool_state.borrow_mut();
                switch_tool(&mut state, tool, &toolbar_cb, &code_view)
            };
            emit_editor_events(&canvas_cb, &events);
        });
        toolbar.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let color_state = state.clone();
        let input_cb = drawing_color_input.clone();
        let storage_cb = storage.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let color = input_cb.value();
            set_drawing_color(&mut color_state.borrow_mut(), color.clone());
            store_color(storage_cb.as_ref(), DRAWING_COLOR_KEY, &color);
        });
        drawing_color_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let color_state = state.clone();
        let input_cb = background_color_input.clone();
        let storage_cb = storage.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let color = input_cb.value();
            set_background_color(&mut color_state.borrow_mut(), color.clone());
            store_color(storage_cb.as_ref(), BACKGROUND_COLOR_KEY, &color);
        });
        background_color_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let toggle_state = state.clone();
        let code_panel_cb = code_panel.clone();
        let code_view = code_view.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            if toggle_panel(&code_panel_cb) {
                sync_code_view(&code_view, &toggle_state.borrow().editor);
            }
        });
        code_toggle.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let load_state = state.clone();
        let code_view = code_view.clone();
        let document_cb = document.clone();
        let window_cb = window.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let text = code_view.value();
            // The markup panel holds bare child elements; wrap them so the
            // import path sees a complete document.
            let wrapped = format!("<svg>{text}</svg>");
            let mut state = load_state.borrow_mut();
            let fallback = state.drawing_color.clone();
            match import_svg_text(&document_cb, &mut state.editor, &wrapped, &fallback) {
                Ok(()) => {
                    refresh(&state, &code_view);
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "ok",
                        "Markup loaded",
                        IDLE_STATUS,
                    );
                }
                Err(message) => {
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "error",
                        &message,
                        IDLE_STATUS,
                    );
                }
            }
        });
        code_load.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let export_state = state.clone();
        let document_cb = document.clone();
        let window_cb = window.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = export_state.borrow();
            let (kind, message) = match export_svg(&document_cb, &state) {
                Ok(()) => ("ok", "Exported drawing.svg"),
                Err(_) => ("error", "Export failed"),
            };
            flash_status(
                &window_cb,
                &status_el_cb,
                &status_text_cb,
                kind,
                message,
                IDLE_STATUS,
            );
        });
        export_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let import_file_cb = import_file.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            import_file_cb.set_value("");
            import_file_cb.click();
        });
        import_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let import_state = state.clone();
        let import_file_cb = import_file.clone();
        let code_view = code_view.clone();
        let document_cb = document.clone();
        let window_cb = window.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let file = import_file_cb.files().and_then(|list| list.get(0));
            let Some(file) = file else {
                return;
            };
            let Ok(reader) = FileReader::new() else {
                return;
            };
            let import_state = import_state.clone();
            let code_view = code_view.clone();
            let document_cb = document_cb.clone();
            let window_cb = window_cb.clone();
            let status_el_cb = status_el_cb.clone();
            let status_text_cb = status_text_cb.clone();
            let onload = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
                let text = event
                    .target()
                    .and_then(|target| target.dyn_into::<FileReader>().ok())
                    .and_then(|reader| reader.result().ok())
                    .and_then(|value| value.as_string());
                let Some(text) = text else {
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "error",
                        "Could not read file",
                        IDLE_STATUS,
                    );
                    return;
                };
                let mut state = import_state.borrow_mut();
                let fallback = state.drawing_color.clone();
                match import_svg_text(&document_cb, &mut state.editor, &text, &fallback) {
                    Ok(()) => {
                        refresh(&state, &code_view);
                        flash_status(
                            &window_cb,
                            &status_el_cb,
                            &status_text_cb,
                            "ok",
                            "Imported",
                            IDLE_STATUS,
                        );
                    }
                    Err(message) => {
                        flash_status(
                            &window_cb,
                            &status_el_cb,
                            &status_text_cb,
                            "error",
                            &message,
                            IDLE_STATUS,
                        );
                    }
                }
            });
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            let _ = reader.read_as_text(&file);
        });
        import_file.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let settings_state = state.clone();
        let canvas_cb = canvas.clone();
        let width_input_cb = width_input.clone();
        let height_input_cb = height_input.clone();
        let view_box_input_cb = view_box_input.clone();
        let storage_cb = storage.clone();
        let window_cb = window.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let parsed = parse_settings_inputs(
                &width_input_cb.value(),
                &height_input_cb.value(),
                &view_box_input_cb.value(),
            );
            let mut state = settings_state.borrow_mut();
            match parsed {
                Ok((width, height, view_box)) => {
                    state.prefs.canvas_width = width;
                    state.prefs.canvas_height = height;
                    state.prefs.view_box = view_box;
                    apply_canvas_settings(&canvas_cb, &state.prefs);
                    store_preferences(storage_cb.as_ref(), &state.prefs);
                    dispatch_custom_event(
                        &canvas_cb,
                        "canvassettingschanged",
                        &[
                            ("width", JsValue::from_f64(width)),
                            ("height", JsValue::from_f64(height)),
                        ],
                    );
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "ok",
                        "Canvas updated",
                        IDLE_STATUS,
                    );
                }
                Err(message) => {
                    // Leave the canvas as it was and put the last good values
                    // back into the inputs.
                    fill_settings_inputs(
                        &width_input_cb,
                        &height_input_cb,
                        &view_box_input_cb,
                        &state.prefs,
                    );
                    flash_status(
                        &window_cb,
                        &status_el_cb,
                        &status_text_cb,
                        "error",
                        &message,
                        IDLE_STATUS,
                    );
                }
            }
        });
        apply_settings_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let theme_state = state.clone();
        let document_cb = document.clone();
        let storage_cb = storage.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = theme_state.borrow_mut();
            let theme = toggle_theme(&mut state.prefs);
            apply_theme(&document_cb, &theme);
            store_preferences(storage_cb.as_ref(), &state.prefs);
        });
        theme_toggle.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onstart = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let tool = event_detail_mode(&event).unwrap_or_default();
            set_status(
                &status_el_cb,
                &status_text_cb,
                "drawing",
                &format!("Drawing {tool}"),
            );
        });
        canvas.add_event_listener_with_callback("drawingstart", onstart.as_ref().unchecked_ref())?;
        onstart.forget();
    }

    {
        let status_text_cb = status_text.clone();
        let ondrawing = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(custom) = event.dyn_ref::<CustomEvent>() else {
                return;
            };
            let detail = custom.detail();
            let end_x = Reflect::get(&detail, &JsValue::from_str("endX"))
                .ok()
                .and_then(|v| v.as_f64());
            let end_y = Reflect::get(&detail, &JsValue::from_str("endY"))
                .ok()
                .and_then(|v| v.as_f64());
            if let (Some(x), Some(y)) = (end_x, end_y) {
                status_text_cb.set_text_content(Some(&format!("{:.0}, {:.0}", x, y)));
            }
        });
        canvas.add_event_listener_with_callback("drawing", ondrawing.as_ref().unchecked_ref())?;
        ondrawing.forget();
    }

    {
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onend = Closure::<dyn FnMut(Event)>::new(move |_| {
            set_status(&status_el_cb, &status_text_cb, "idle", IDLE_STATUS);
        });
        canvas.add_event_listener_with_callback("drawingend", onend.as_ref().unchecked_ref())?;
        onend.forget();
    }

    {
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onmode = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let tool = event_detail_mode(&event).unwrap_or_default();
            set_status(
                &status_el_cb,
                &status_text_cb,
                "idle",
                &format!("Tool: {tool}"),
            );
        });
        canvas.add_event_listener_with_callback("modechange", onmode.as_ref().unchecked_ref())?;
        onmode.forget();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorpad_model::Tool;

    fn keys(detail: &[(&'static str, Detail)]) -> Vec<&'static str> {
        detail.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn custom_event_details_use_the_documented_keys() {
        let (name, detail) = event_payload(&EditorEvent::DrawingStart {
            tool: Tool::Polyline,
            start_x: 1.0,
            start_y: 2.0,
        });
        assert_eq!(name, "drawingstart");
        assert_eq!(keys(&detail), ["mode", "startX", "startY"]);

        let (name, detail) = event_payload(&EditorEvent::Drawing {
            tool: Tool::Rect,
            start_x: 0.0,
            start_y: 0.0,
            end_x: 3.0,
            end_y: 4.0,
        });
        assert_eq!(name, "drawing");
        assert_eq!(keys(&detail), ["mode", "startX", "startY", "endX", "endY"]);

        let (name, detail) = event_payload(&EditorEvent::ModeChange { tool: Tool::Rect });
        assert_eq!(name, "modechange");
        assert!(matches!(detail.as_slice(), [("mode", Detail::Text("rect"))]));

        let (name, detail) = event_payload(&EditorEvent::DrawingEnd { tool: Tool::Path });
        assert_eq!(name, "drawingend");
        assert_eq!(keys(&detail), ["mode"]);
    }
}
