use web_sys::{Element, HtmlTextAreaElement};

use vectorpad_model::Editor;

use crate::render::canvas_markup;

/// Mirrors the canvas markup into the textarea. Called after every model
/// mutation so the panel never goes stale.
pub fn sync_code_view(code_view: &HtmlTextAreaElement, editor: &Editor) {
    code_view.set_value(&canvas_markup(editor));
}

pub fn toggle_panel(panel: &Element) -> bool {
    let open = panel.has_attribute("hidden");
    if open {
        let _ = panel.remove_attribute("hidden");
    } else {
        let _ = panel.set_attribute("hidden", "");
    }
    open
}
