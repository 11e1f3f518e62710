mod document;
mod editor;
mod geometry;
mod shape;
pub mod svg;

pub use document::Document;
pub use editor::{
    DragState, Editor, EditorEvent, Mode, MultiPoint, PathHelpers, PathMode, SelectState, Tool,
    TwoClick, DEFAULT_STROKE,
};
pub use geometry::{distance, rect_from_corners, translate, Bounds};
pub use shape::{normalize_point, Geometry, Point, Shape, ShapeId, Style};
