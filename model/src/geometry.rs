use crate::shape::{Geometry, Point};

pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Normalizes two opposite corners into an origin-plus-size rectangle.
pub fn rect_from_corners(a: Point, b: Point) -> (f64, f64, f64, f64) {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let width = (b.x - a.x).abs();
    let height = (b.y - a.y).abs();
    (x, y, width, height)
}

fn point_list_bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    for point in &points[1..] {
        bounds.min_x = bounds.min_x.min(point.x);
        bounds.min_y = bounds.min_y.min(point.y);
        bounds.max_x = bounds.max_x.max(point.x);
        bounds.max_y = bounds.max_y.max(point.y);
    }
    Some(bounds)
}

/// Axis-aligned bounding box. The quad path box spans all recorded points,
/// control point included.
pub fn bounds(geometry: &Geometry) -> Option<Bounds> {
    match geometry {
        Geometry::Line { x1, y1, x2, y2 } => Some(Bounds {
            min_x: x1.min(*x2),
            min_y: y1.min(*y2),
            max_x: x1.max(*x2),
            max_y: y1.max(*y2),
        }),
        Geometry::Rect {
            x,
            y,
            width,
            height,
        } => Some(Bounds {
            min_x: *x,
            min_y: *y,
            max_x: x + width,
            max_y: y + height,
        }),
        Geometry::Circle { cx, cy, r } => Some(Bounds {
            min_x: cx - r,
            min_y: cy - r,
            max_x: cx + r,
            max_y: cy + r,
        }),
        Geometry::Ellipse { cx, cy, rx, ry } => Some(Bounds {
            min_x: cx - rx,
            min_y: cy - ry,
            max_x: cx + rx,
            max_y: cy + ry,
        }),
        Geometry::Polyline { points } | Geometry::Polygon { points } => point_list_bounds(points),
        Geometry::QuadPath {
            start,
            control,
            end,
        } => {
            let mut points = vec![*start];
            points.extend(control.iter().copied());
            points.extend(end.iter().copied());
            point_list_bounds(&points)
        }
    }
}

/// Kind-specific translation: both endpoints for a line, the center for
/// circle and ellipse, every point for the list-backed kinds.
pub fn translate(geometry: &Geometry, dx: f64, dy: f64) -> Geometry {
    match geometry {
        Geometry::Line { x1, y1, x2, y2 } => Geometry::Line {
            x1: x1 + dx,
            y1: y1 + dy,
            x2: x2 + dx,
            y2: y2 + dy,
        },
        Geometry::Rect {
            x,
            y,
            width,
            height,
        } => Geometry::Rect {
            x: x + dx,
            y: y + dy,
            width: *width,
            height: *height,
        },
        Geometry::Circle { cx, cy, r } => Geometry::Circle {
            cx: cx + dx,
            cy: cy + dy,
            r: *r,
        },
        Geometry::Ellipse { cx, cy, rx, ry } => Geometry::Ellipse {
            cx: cx + dx,
            cy: cy + dy,
            rx: *rx,
            ry: *ry,
        },
        Geometry::Polyline { points } => Geometry::Polyline {
            points: shift_points(points, dx, dy),
        },
        Geometry::Polygon { points } => Geometry::Polygon {
            points: shift_points(points, dx, dy),
        },
        Geometry::QuadPath {
            start,
            control,
            end,
        } => Geometry::QuadPath {
            start: Point::new(start.x + dx, start.y + dy),
            control: control.map(|p| Point::new(p.x + dx, p.y + dy)),
            end: end.map(|p| Point::new(p.x + dx, p.y + dy)),
        },
    }
}

fn shift_points(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    points
        .iter()
        .map(|point| Point::new(point.x + dx, point.y + dy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_corners_normalizes_any_corner_pair() {
        let (x, y, width, height) =
            rect_from_corners(Point::new(50.0, 60.0), Point::new(10.0, 10.0));
        assert_eq!((x, y, width, height), (10.0, 10.0, 40.0, 50.0));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn line_bounds_contain_both_endpoints() {
        let line = Geometry::Line {
            x1: 10.0,
            y1: 30.0,
            x2: 5.0,
            y2: 2.0,
        };
        let bounds = bounds(&line).unwrap();
        assert!(bounds.contains(5.0, 2.0));
        assert!(bounds.contains(10.0, 30.0));
        assert!(!bounds.contains(11.0, 2.0));
    }

    #[test]
    fn empty_polyline_has_no_bounds() {
        assert!(bounds(&Geometry::Polyline { points: Vec::new() }).is_none());
    }

    #[test]
    fn translate_moves_line_endpoints_together() {
        let line = Geometry::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 5.0,
        };
        let moved = translate(&line, 3.0, -2.0);
        assert_eq!(
            moved,
            Geometry::Line {
                x1: 3.0,
                y1: -2.0,
                x2: 13.0,
                y2: 3.0,
            }
        );
    }

    #[test]
    fn translate_moves_every_quad_path_point() {
        let path = Geometry::QuadPath {
            start: Point::new(0.0, 0.0),
            control: Some(Point::new(5.0, 5.0)),
            end: Some(Point::new(10.0, 0.0)),
        };
        let moved = translate(&path, 1.0, 1.0);
        assert_eq!(
            moved,
            Geometry::QuadPath {
                start: Point::new(1.0, 1.0),
                control: Some(Point::new(6.0, 6.0)),
                end: Some(Point::new(11.0, 1.0)),
            }
        );
    }
}
