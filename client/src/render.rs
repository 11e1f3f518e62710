use web_sys::Element;

use vectorpad_model::svg::document_markup;
use vectorpad_model::{Editor, PathHelpers, Point};

// Construction helper colors: start, control and end markers plus the dashed
// guide from control to end.
const HELPER_START: &str = "#4CAF50";
const HELPER_CONTROL: &str = "#FF9800";
const HELPER_END: &str = "#2196F3";
const HELPER_GUIDE: &str = "#f1a3df";
const HELPER_RADIUS: f64 = 4.0;

fn marker(point: Point, fill: &str) -> String {
    format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"none\" />",
        point.x, point.y, HELPER_RADIUS, fill
    )
}

/// Overlay markup for an in-flight bezier construction. Derived from the
/// editor state on every sync, so it disappears on finish or cancel without
/// any cleanup code.
fn helper_markup(helpers: &PathHelpers) -> String {
    let mut out = String::new();
    // In stage 1 `control` is only the live preview; the marker and the guide
    // wait until the control point is committed.
    let committed = helpers.stage >= 2;
    if committed {
        if let (Some(control), Some(end)) = (helpers.control, helpers.end) {
            out.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" \
                 stroke-width=\"2.7\" stroke-dasharray=\"5,5\" opacity=\"0.5\" fill=\"none\" />\n",
                control.x, control.y, end.x, end.y, HELPER_GUIDE
            ));
        }
    }
    out.push_str(&marker(helpers.start, HELPER_START));
    if committed {
        if let Some(control) = helpers.control {
            out.push('\n');
            out.push_str(&marker(control, HELPER_CONTROL));
        }
        if let Some(end) = helpers.end {
            out.push('\n');
            out.push_str(&marker(end, HELPER_END));
        }
    }
    out
}

/// Inner markup for the canvas: the document with the selection stroke
/// override, plus the derived helper overlay.
pub fn canvas_markup(editor: &Editor) -> String {
    let mut markup = document_markup(&editor.document, editor.selection());
    if let Some(helpers) = editor.path_helpers() {
        if !markup.is_empty() {
            markup.push('\n');
        }
        markup.push_str(&helper_markup(&helpers));
    }
    markup
}

/// Re-syncs the canvas children from the model. The DOM is never the source
/// of truth; it is rewritten wholesale after every mutation.
pub fn sync_canvas(canvas: &Element, editor: &Editor) {
    canvas.set_inner_html(&canvas_markup(editor));
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorpad_model::Tool;

    #[test]
    fn helper_overlay_appears_only_mid_construction() {
        let mut editor = Editor::new(1);
        editor.set_tool(Tool::Path);
        assert!(!canvas_markup(&editor).contains(HELPER_START));
        editor.handle_click(0.0, 0.0);
        editor.handle_move(3.0, 3.0);
        let markup = canvas_markup(&editor);
        assert!(markup.contains(HELPER_START));
        assert!(!markup.contains(HELPER_CONTROL));
        assert!(!markup.contains("stroke-dasharray"));
        editor.handle_click(5.0, 5.0);
        editor.handle_move(10.0, 0.0);
        let markup = canvas_markup(&editor);
        assert!(markup.contains(HELPER_CONTROL));
        assert!(markup.contains(HELPER_END));
        assert!(markup.contains("stroke-dasharray=\"5,5\""));
        editor.handle_click(10.0, 0.0);
        assert!(!canvas_markup(&editor).contains(HELPER_START));
    }

    #[test]
    fn selected_shape_renders_with_the_override_stroke() {
        let mut editor = Editor::new(1);
        editor.set_tool(Tool::Rect);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(20.0, 20.0);
        editor.set_tool(Tool::Select);
        editor.handle_click(10.0, 10.0);
        assert!(canvas_markup(&editor).contains("stroke=\"red\""));
        editor.handle_click(500.0, 500.0);
        assert!(!canvas_markup(&editor).contains("stroke=\"red\""));
    }
}
