use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use vectorpad_model::Tool;

pub struct ToolSpec {
    pub tool: Tool,
    pub label: &'static str,
    pub shortcut: &'static str,
}

pub const TOOLS: [ToolSpec; 8] = [
    ToolSpec {
        tool: Tool::Select,
        label: "Select",
        shortcut: "s",
    },
    ToolSpec {
        tool: Tool::Line,
        label: "Line",
        shortcut: "l",
    },
    ToolSpec {
        tool: Tool::Rect,
        label: "Rectangle",
        shortcut: "r",
    },
    ToolSpec {
        tool: Tool::Circle,
        label: "Circle",
        shortcut: "c",
    },
    ToolSpec {
        tool: Tool::Ellipse,
        label: "Ellipse",
        shortcut: "e",
    },
    ToolSpec {
        tool: Tool::Polyline,
        label: "Polyline",
        shortcut: "p",
    },
    ToolSpec {
        tool: Tool::Polygon,
        label: "Polygon",
        shortcut: "g",
    },
    ToolSpec {
        tool: Tool::Path,
        label: "Curve",
        shortcut: "t",
    },
];

/// Builds one button per tool inside the toolbar container.
pub fn render_toolbar(document: &Document, toolbar: &Element) -> Result<(), JsValue> {
    for spec in &TOOLS {
        let button = document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("data-tool", spec.tool.name())?;
        button.set_attribute("title", &format!("{} ({})", spec.label, spec.shortcut))?;
        button.set_text_content(Some(spec.label));
        toolbar.append_child(&button)?;
    }
    Ok(())
}

/// Event-delegated tool lookup: walks up from the click target to the nearest
/// button carrying a data-tool attribute.
pub fn tool_from_event(event: &Event) -> Option<Tool> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("[data-tool]").ok()??;
    let name = button.get_attribute("data-tool")?;
    TOOLS
        .iter()
        .find(|spec| spec.tool.name() == name)
        .map(|spec| spec.tool)
}

pub fn highlight_tool(toolbar: &Element, tool: Tool) {
    let buttons = toolbar.query_selector_all("[data-tool]").ok();
    let Some(buttons) = buttons else {
        return;
    };
    for index in 0..buttons.length() {
        let Some(node) = buttons.get(index) else {
            continue;
        };
        let Ok(button) = node.dyn_into::<Element>() else {
            continue;
        };
        let active = button.get_attribute("data-tool").as_deref() == Some(tool.name());
        let pressed = if active { "true" } else { "false" };
        let _ = button.set_attribute("aria-pressed", pressed);
    }
}

pub fn set_canvas_cursor(canvas: &Element, tool: Tool) {
    let cursor = match tool {
        Tool::Select => "default",
        _ => "crosshair",
    };
    if let Some(element) = canvas.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("cursor", cursor);
    }
}
