use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId([u64; 2]);

impl ShapeId {
    pub fn new(parts: [u64; 2]) -> Self {
        Self(parts)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.0[0], self.0[1])
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Style {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
}

impl Style {
    /// The common style every tool applies to a freshly created shape.
    pub fn new(stroke: String) -> Self {
        Self {
            stroke,
            stroke_width: 2.0,
            fill: "none".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Geometry {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Polyline {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
    /// Quadratic bezier under construction or committed. Control and end are
    /// filled in as the construction advances; path data degrades gracefully
    /// when they are absent.
    QuadPath {
        start: Point,
        control: Option<Point>,
        end: Option<Point>,
    },
}

impl Geometry {
    pub fn tag(&self) -> &'static str {
        match self {
            Geometry::Line { .. } => "line",
            Geometry::Rect { .. } => "rect",
            Geometry::Circle { .. } => "circle",
            Geometry::Ellipse { .. } => "ellipse",
            Geometry::Polyline { .. } => "polyline",
            Geometry::Polygon { .. } => "polygon",
            Geometry::QuadPath { .. } => "path",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub style: Style,
    pub geometry: Geometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_non_finite() {
        assert!(normalize_point(Point::new(f64::NAN, 0.0)).is_none());
        assert!(normalize_point(Point::new(0.0, f64::INFINITY)).is_none());
        assert_eq!(
            normalize_point(Point::new(3.0, -4.5)),
            Some(Point::new(3.0, -4.5))
        );
    }

    #[test]
    fn shape_id_renders_as_hex() {
        let id = ShapeId::new([1, 255]);
        assert_eq!(id.to_string().len(), 32);
        assert!(id.to_string().ends_with("ff"));
    }
}
