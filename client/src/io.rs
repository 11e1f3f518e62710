use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, Url};

use vectorpad_model::svg::{export_document, parse_points, parse_quad_path};
use vectorpad_model::{Editor, Geometry, Shape, ShapeId, Style};

use crate::state::State;

pub const EXPORT_FILENAME: &str = "drawing.svg";
const NO_ROOT_ERROR: &str = "No <svg> root element found";

fn make_shape_id() -> ShapeId {
    let hi = js_sys::Date::now() as u64;
    let lo = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    ShapeId::new([hi, lo])
}

fn attr_f64(element: &Element, name: &str) -> Option<f64> {
    let value: f64 = element.get_attribute(name)?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_geometry(element: &Element) -> Option<Geometry> {
    match element.tag_name().to_lowercase().as_str() {
        "line" => Some(Geometry::Line {
            x1: attr_f64(element, "x1")?,
            y1: attr_f64(element, "y1")?,
            x2: attr_f64(element, "x2")?,
            y2: attr_f64(element, "y2")?,
        }),
        "rect" => Some(Geometry::Rect {
            x: attr_f64(element, "x")?,
            y: attr_f64(element, "y")?,
            width: attr_f64(element, "width")?,
            height: attr_f64(element, "height")?,
        }),
        "circle" => Some(Geometry::Circle {
            cx: attr_f64(element, "cx")?,
            cy: attr_f64(element, "cy")?,
            r: attr_f64(element, "r")?,
        }),
        "ellipse" => Some(Geometry::Ellipse {
            cx: attr_f64(element, "cx")?,
            cy: attr_f64(element, "cy")?,
            rx: attr_f64(element, "rx")?,
            ry: attr_f64(element, "ry")?,
        }),
        "polyline" => {
            let points = parse_points(&element.get_attribute("points")?);
            (!points.is_empty()).then_some(Geometry::Polyline { points })
        }
        "polygon" => {
            let points = parse_points(&element.get_attribute("points")?);
            (!points.is_empty()).then_some(Geometry::Polygon { points })
        }
        "path" => parse_quad_path(&element.get_attribute("d")?),
        _ => None,
    }
}

fn parse_style(element: &Element, fallback_stroke: &str) -> Style {
    let mut style = Style::new(
        element
            .get_attribute("stroke")
            .unwrap_or_else(|| fallback_stroke.to_string()),
    );
    if let Some(width) = attr_f64(element, "stroke-width") {
        style.stroke_width = width;
    }
    if let Some(fill) = element.get_attribute("fill") {
        style.fill = fill;
    }
    style
}

/// Parses SVG text into model shapes via a detached scratch element.
/// `Ok(None)` means the text had no `<svg>` root; unrecognized child elements
/// are skipped.
fn parse_svg_root(
    document: &Document,
    text: &str,
    fallback_stroke: &str,
) -> Result<Option<Vec<Shape>>, String> {
    let scratch = document
        .create_element("div")
        .map_err(|_| "Could not parse file".to_string())?;
    scratch.set_inner_html(text);
    let Some(svg) = scratch.query_selector("svg").ok().flatten() else {
        return Ok(None);
    };

    let mut shapes = Vec::new();
    let mut child = svg.first_element_child();
    while let Some(element) = child {
        if let Some(geometry) = parse_geometry(&element) {
            shapes.push(Shape {
                id: make_shape_id(),
                style: parse_style(&element, fallback_stroke),
                geometry,
            });
        }
        child = element.next_element_sibling();
    }
    Ok(Some(shapes))
}

/// Applies a parse result to the editor. A missing root is an error and the
/// document is left exactly as it was.
fn rebuild_document(editor: &mut Editor, parsed: Option<Vec<Shape>>) -> Result<(), String> {
    let shapes = parsed.ok_or_else(|| NO_ROOT_ERROR.to_string())?;
    editor.replace_document(shapes);
    Ok(())
}

pub fn import_svg_text(
    document: &Document,
    editor: &mut Editor,
    text: &str,
    fallback_stroke: &str,
) -> Result<(), String> {
    let parsed = parse_svg_root(document, text, fallback_stroke)?;
    rebuild_document(editor, parsed)
}

/// Downloads the document as a standalone SVG file through a synthetic
/// anchor click on an object URL.
pub fn export_svg(document: &Document, state: &State) -> Result<(), JsValue> {
    let content = export_document(
        &state.editor.document,
        state.prefs.canvas_width,
        state.prefs.canvas_height,
        state.prefs.view_box,
    );

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&content));
    let options = BlobPropertyBag::new();
    options.set_type("image/svg+xml;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILENAME);
    anchor.click();
    let _ = Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorpad_model::Tool;

    fn seeded_editor() -> Editor {
        let mut editor = Editor::new(1);
        editor.set_tool(Tool::Rect);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(5.0, 5.0);
        editor
    }

    #[test]
    fn missing_root_is_an_error_and_leaves_the_document_alone() {
        let mut editor = seeded_editor();
        let before: Vec<Shape> = editor.document.iter().cloned().collect();
        let err = rebuild_document(&mut editor, None).unwrap_err();
        assert_eq!(err, NO_ROOT_ERROR);
        let after: Vec<Shape> = editor.document.iter().cloned().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn parsed_shapes_replace_the_document() {
        let mut editor = seeded_editor();
        let id = ShapeId::new([0, 7]);
        let shapes = vec![Shape {
            id,
            style: Style::new("black".to_string()),
            geometry: Geometry::Circle {
                cx: 1.0,
                cy: 1.0,
                r: 3.0,
            },
        }];
        rebuild_document(&mut editor, Some(shapes)).unwrap();
        assert_eq!(editor.document.len(), 1);
        assert!(editor.document.contains(id));
    }
}
