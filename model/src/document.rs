use crate::geometry;
use crate::shape::{Shape, ShapeId};

/// Ordered shape list backing the canvas. Document order is paint order, so
/// hit testing walks it back to front.
#[derive(Clone, Debug, Default)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Topmost shape whose bounding box contains the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| {
                geometry::bounds(&shape.geometry)
                    .map(|bounds| bounds.contains(x, y))
                    .unwrap_or(false)
            })
            .map(|shape| shape.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Geometry, Style};

    fn rect(id: u64, x: f64, y: f64, size: f64) -> Shape {
        Shape {
            id: ShapeId::new([0, id]),
            style: Style::new("#000000".to_string()),
            geometry: Geometry::Rect {
                x,
                y,
                width: size,
                height: size,
            },
        }
    }

    #[test]
    fn hit_test_prefers_topmost_shape() {
        let mut document = Document::new();
        document.push(rect(1, 0.0, 0.0, 100.0));
        document.push(rect(2, 40.0, 40.0, 100.0));
        assert_eq!(document.hit_test(50.0, 50.0), Some(ShapeId::new([0, 2])));
        assert_eq!(document.hit_test(10.0, 10.0), Some(ShapeId::new([0, 1])));
        assert_eq!(document.hit_test(500.0, 500.0), None);
    }

    #[test]
    fn remove_returns_the_shape_and_shrinks_the_list() {
        let mut document = Document::new();
        document.push(rect(1, 0.0, 0.0, 10.0));
        let removed = document.remove(ShapeId::new([0, 1]));
        assert!(removed.is_some());
        assert!(document.is_empty());
        assert!(document.remove(ShapeId::new([0, 1])).is_none());
    }
}
