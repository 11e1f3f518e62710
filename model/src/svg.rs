//! SVG markup generation and parsing. The same serializer feeds the live
//! canvas, the markup panel, and file export, so the three can never drift.

use crate::document::Document;
use crate::shape::{Geometry, Point, Shape, ShapeId, Style};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stroke override applied to the selected shape when rendering.
pub const SELECTED_STROKE: &str = "red";
pub const SELECTED_STROKE_WIDTH: f64 = 3.0;

fn fmt_num(value: f64) -> String {
    // Avoids "10.000000" noise while keeping fractional coordinates exact
    // enough for display.
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn fmt_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Path data for a quadratic bezier in any construction stage. A lone start
/// yields a bare moveto, start plus control renders the guide line, the full
/// triple renders the curve.
pub fn quad_path_data(start: Point, control: Option<Point>, end: Option<Point>) -> String {
    match (control, end) {
        (Some(c), Some(e)) => format!(
            "M {} {} Q {} {} {} {}",
            fmt_num(start.x),
            fmt_num(start.y),
            fmt_num(c.x),
            fmt_num(c.y),
            fmt_num(e.x),
            fmt_num(e.y)
        ),
        (Some(c), None) => format!(
            "M {} {} L {} {}",
            fmt_num(start.x),
            fmt_num(start.y),
            fmt_num(c.x),
            fmt_num(c.y)
        ),
        _ => format!("M {} {}", fmt_num(start.x), fmt_num(start.y)),
    }
}

fn style_attrs(style: &Style, selected: bool) -> String {
    let (stroke, width) = if selected {
        (SELECTED_STROKE, SELECTED_STROKE_WIDTH)
    } else {
        (style.stroke.as_str(), style.stroke_width)
    };
    format!(
        "stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\"",
        stroke,
        fmt_num(width),
        style.fill
    )
}

pub fn shape_markup(shape: &Shape, selected: bool) -> String {
    let style = style_attrs(&shape.style, selected);
    match &shape.geometry {
        Geometry::Line { x1, y1, x2, y2 } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} />",
            fmt_num(*x1),
            fmt_num(*y1),
            fmt_num(*x2),
            fmt_num(*y2),
            style
        ),
        Geometry::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {} />",
            fmt_num(*x),
            fmt_num(*y),
            fmt_num(*width),
            fmt_num(*height),
            style
        ),
        Geometry::Circle { cx, cy, r } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {} />",
            fmt_num(*cx),
            fmt_num(*cy),
            fmt_num(*r),
            style
        ),
        Geometry::Ellipse { cx, cy, rx, ry } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {} />",
            fmt_num(*cx),
            fmt_num(*cy),
            fmt_num(*rx),
            fmt_num(*ry),
            style
        ),
        Geometry::Polyline { points } => format!(
            "<polyline points=\"{}\" {} />",
            fmt_points(points),
            style
        ),
        Geometry::Polygon { points } => {
            format!("<polygon points=\"{}\" {} />", fmt_points(points), style)
        }
        Geometry::QuadPath {
            start,
            control,
            end,
        } => format!(
            "<path d=\"{}\" {} />",
            quad_path_data(*start, *control, *end),
            style
        ),
    }
}

/// Inner markup for the whole document, one element per line, in paint order.
pub fn document_markup(document: &Document, selection: Option<ShapeId>) -> String {
    document
        .iter()
        .map(|shape| shape_markup(shape, selection == Some(shape.id)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Standalone SVG file content for export, carrying the live canvas size and
/// viewBox so the file renders exactly as the canvas did.
pub fn export_document(
    document: &Document,
    width: f64,
    height: f64,
    view_box: [f64; 4],
) -> String {
    let body = document_markup(document, None);
    let mut out = format!(
        "<svg xmlns=\"{}\" version=\"1.1\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
        SVG_NS,
        fmt_num(width),
        fmt_num(height),
        fmt_num(view_box[0]),
        fmt_num(view_box[1]),
        fmt_num(view_box[2]),
        fmt_num(view_box[3])
    );
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out.push_str("\n</svg>\n");
    out
}

/// Parses a viewBox attribute into [min-x, min-y, width, height].
pub fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let mut parts = [0.0; 4];
    let mut count = 0;
    for token in value.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        if count == 4 {
            return None;
        }
        let num: f64 = token.parse().ok()?;
        if !num.is_finite() {
            return None;
        }
        parts[count] = num;
        count += 1;
    }
    (count == 4).then_some(parts)
}

/// Parses a polyline/polygon points attribute. Malformed pairs are skipped
/// rather than failing the whole list.
pub fn parse_points(value: &str) -> Vec<Point> {
    let mut numbers = Vec::new();
    for token in value.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        if let Ok(num) = token.parse::<f64>() {
            if num.is_finite() {
                numbers.push(num);
            }
        }
    }
    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Parses the path data shapes this tool writes: a moveto optionally followed
/// by a single lineto or quadratic segment. Anything else is rejected.
pub fn parse_quad_path(data: &str) -> Option<Geometry> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in data.chars() {
        if c.is_ascii_alphabetic() {
            if !current.is_empty() {
                tokens.push(current.clone());
                current.clear();
            }
            tokens.push(c.to_string());
        } else if c.is_whitespace() || c == ',' {
            if !current.is_empty() {
                tokens.push(current.clone());
                current.clear();
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    let mut iter = tokens.iter();
    if iter.next().map(String::as_str) != Some("M") {
        return None;
    }
    let mut next_num = |iter: &mut std::slice::Iter<String>| -> Option<f64> {
        let num: f64 = iter.next()?.parse().ok()?;
        num.is_finite().then_some(num)
    };
    let start = Point::new(next_num(&mut iter)?, next_num(&mut iter)?);
    match iter.next().map(String::as_str) {
        None => Some(Geometry::QuadPath {
            start,
            control: None,
            end: None,
        }),
        Some("L") => {
            let control = Point::new(next_num(&mut iter)?, next_num(&mut iter)?);
            if iter.next().is_some() {
                return None;
            }
            Some(Geometry::QuadPath {
                start,
                control: Some(control),
                end: None,
            })
        }
        Some("Q") => {
            let control = Point::new(next_num(&mut iter)?, next_num(&mut iter)?);
            let end = Point::new(next_num(&mut iter)?, next_num(&mut iter)?);
            if iter.next().is_some() {
                return None;
            }
            Some(Geometry::QuadPath {
                start,
                control: Some(control),
                end: Some(end),
            })
        }
        Some(_) => None,
    }
}
