use crate::document::Document;
use crate::geometry::{self, distance, rect_from_corners};
use crate::shape::{normalize_point, Geometry, Point, Shape, ShapeId, Style};

pub const DEFAULT_STROKE: &str = "#000000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Select,
    Line,
    Rect,
    Circle,
    Ellipse,
    Polyline,
    Polygon,
    Path,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Line => "line",
            Tool::Rect => "rect",
            Tool::Circle => "circle",
            Tool::Ellipse => "ellipse",
            Tool::Polyline => "polyline",
            Tool::Polygon => "polygon",
            Tool::Path => "path",
        }
    }

    pub fn from_shortcut(key: &str) -> Option<Tool> {
        match key {
            "s" => Some(Tool::Select),
            "l" => Some(Tool::Line),
            "r" => Some(Tool::Rect),
            "c" => Some(Tool::Circle),
            "e" => Some(Tool::Ellipse),
            "p" => Some(Tool::Polyline),
            "g" => Some(Tool::Polygon),
            "t" => Some(Tool::Path),
            _ => None,
        }
    }
}

/// Lifecycle of the two-click tools: first click records the anchor and
/// attaches a zero-size shape, second click commits the final geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TwoClick {
    Idle,
    Started { id: ShapeId, anchor: Point },
}

/// Polyline and polygon share this: the accumulated points live in the
/// in-progress shape's geometry, only the identity is tracked here. The list
/// always ends in a preview copy of the pointer position; clicks commit the
/// preview and append a fresh one, pointer moves rewrite only the preview and
/// never change the count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MultiPoint {
    Idle,
    Active { id: ShapeId },
}

/// Explicit three-stage bezier construction: start, then control, then end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathMode {
    Idle,
    Started { id: ShapeId },
    ControlSet { id: ShapeId },
}

impl PathMode {
    pub fn stage(self) -> u8 {
        match self {
            PathMode::Idle => 0,
            PathMode::Started { .. } => 1,
            PathMode::ControlSet { .. } => 2,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SelectState {
    pub selected: Option<ShapeId>,
    pub drag: Option<DragState>,
}

/// Snapshot of the dragged shape's geometry at drag start. Deltas are always
/// applied against this snapshot, never accumulated.
#[derive(Clone, Debug)]
pub struct DragState {
    pub start: Point,
    pub snapshot: Geometry,
}

#[derive(Clone, Debug)]
pub enum Mode {
    Select(SelectState),
    Line(TwoClick),
    Rect(TwoClick),
    Circle(TwoClick),
    Ellipse(TwoClick),
    Polyline(MultiPoint),
    Polygon(MultiPoint),
    Path(PathMode),
}

impl Mode {
    pub fn tool(&self) -> Tool {
        match self {
            Mode::Select(_) => Tool::Select,
            Mode::Line(_) => Tool::Line,
            Mode::Rect(_) => Tool::Rect,
            Mode::Circle(_) => Tool::Circle,
            Mode::Ellipse(_) => Tool::Ellipse,
            Mode::Polyline(_) => Tool::Polyline,
            Mode::Polygon(_) => Tool::Polygon,
            Mode::Path(_) => Tool::Path,
        }
    }

    fn fresh(tool: Tool) -> Mode {
        match tool {
            Tool::Select => Mode::Select(SelectState::default()),
            Tool::Line => Mode::Line(TwoClick::Idle),
            Tool::Rect => Mode::Rect(TwoClick::Idle),
            Tool::Circle => Mode::Circle(TwoClick::Idle),
            Tool::Ellipse => Mode::Ellipse(TwoClick::Idle),
            Tool::Polyline => Mode::Polyline(MultiPoint::Idle),
            Tool::Polygon => Mode::Polygon(MultiPoint::Idle),
            Tool::Path => Mode::Path(PathMode::Idle),
        }
    }
}

/// Notifications for the status line, re-dispatched by the client as DOM
/// custom events.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    DrawingStart {
        tool: Tool,
        start_x: f64,
        start_y: f64,
    },
    Drawing {
        tool: Tool,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    },
    DrawingEnd {
        tool: Tool,
    },
    ModeChange {
        tool: Tool,
    },
}

/// Derived overlay data for the bezier construction: marker dots for the
/// committed points and the dashed control-to-end guide. `stage` tells the
/// renderer which points are committed and which are live previews.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathHelpers {
    pub start: Point,
    pub control: Option<Point>,
    pub end: Option<Point>,
    pub stage: u8,
}

pub struct Editor {
    pub document: Document,
    pub mode: Mode,
    pub stroke_color: String,
    id_salt: u64,
    next_id: u64,
}

impl Editor {
    pub fn new(id_salt: u64) -> Self {
        Self {
            document: Document::new(),
            mode: Mode::Select(SelectState::default()),
            stroke_color: DEFAULT_STROKE.to_string(),
            id_salt,
            next_id: 0,
        }
    }

    fn alloc_id(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId::new([self.id_salt, self.next_id])
    }

    pub fn tool(&self) -> Tool {
        self.mode.tool()
    }

    pub fn set_stroke_color(&mut self, color: String) {
        self.stroke_color = color;
    }

    pub fn selection(&self) -> Option<ShapeId> {
        match &self.mode {
            Mode::Select(select) => select.selected,
            _ => None,
        }
    }

    /// Swaps in a new shape list, dropping any in-progress construction or
    /// selection that referenced the old one.
    pub fn replace_document(&mut self, shapes: Vec<Shape>) {
        let tool = self.tool();
        self.mode = Mode::fresh(tool);
        self.document.replace_all(shapes);
    }

    /// True while a multi-step construction holds an uncommitted shape.
    pub fn is_drawing(&self) -> bool {
        match &self.mode {
            Mode::Select(_) => false,
            Mode::Line(tc) | Mode::Rect(tc) | Mode::Circle(tc) | Mode::Ellipse(tc) => {
                matches!(tc, TwoClick::Started { .. })
            }
            Mode::Polyline(mp) | Mode::Polygon(mp) => matches!(mp, MultiPoint::Active { .. }),
            Mode::Path(path) => path.stage() != 0,
        }
    }

    pub fn path_stage(&self) -> u8 {
        match &self.mode {
            Mode::Path(path) => path.stage(),
            _ => 0,
        }
    }

    pub fn path_helpers(&self) -> Option<PathHelpers> {
        let (id, stage) = match &self.mode {
            Mode::Path(path @ PathMode::Started { id })
            | Mode::Path(path @ PathMode::ControlSet { id }) => (*id, path.stage()),
            _ => return None,
        };
        match self.document.get(id).map(|shape| &shape.geometry) {
            Some(Geometry::QuadPath {
                start,
                control,
                end,
            }) => Some(PathHelpers {
                start: *start,
                control: *control,
                end: *end,
                stage,
            }),
            _ => None,
        }
    }

    /// Switches the active tool. An open construction is completed the same
    /// way leaving the canvas would complete it: multi-point shapes are kept,
    /// partial single shapes and bezier constructions are discarded.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<EditorEvent> {
        if tool == self.tool() {
            return Vec::new();
        }
        let mut events = self.handle_leave();
        self.mode = Mode::fresh(tool);
        events.push(EditorEvent::ModeChange { tool });
        events
    }

    pub fn handle_click(&mut self, x: f64, y: f64) -> Vec<EditorEvent> {
        let Some(point) = normalize_point(Point::new(x, y)) else {
            return Vec::new();
        };
        let tool = self.tool();
        match tool {
            Tool::Select => self.select_click(point),
            Tool::Line | Tool::Rect | Tool::Circle | Tool::Ellipse => {
                self.two_click(tool, point)
            }
            Tool::Polyline | Tool::Polygon => self.multi_point_click(tool, point),
            Tool::Path => self.path_click(point),
        }
    }

    pub fn handle_move(&mut self, x: f64, y: f64) -> Vec<EditorEvent> {
        let Some(point) = normalize_point(Point::new(x, y)) else {
            return Vec::new();
        };
        let tool = self.tool();
        match tool {
            Tool::Select => {
                self.select_drag(point);
                Vec::new()
            }
            Tool::Line | Tool::Rect | Tool::Circle | Tool::Ellipse => {
                self.two_click_move(tool, point)
            }
            Tool::Polyline | Tool::Polygon => self.multi_point_move(tool, point),
            Tool::Path => self.path_move(point),
        }
    }

    /// Pressing on a shape with the select tool selects it and anchors a
    /// drag. Pressing empty space changes nothing; the click handler decides
    /// whether to deselect.
    pub fn handle_mouse_down(&mut self, x: f64, y: f64) {
        let Some(point) = normalize_point(Point::new(x, y)) else {
            return;
        };
        if !matches!(self.mode, Mode::Select(_)) {
            return;
        }
        let hit = self.document.hit_test(point.x, point.y);
        let snapshot = hit
            .and_then(|id| self.document.get(id))
            .map(|shape| shape.geometry.clone());
        if let Mode::Select(select) = &mut self.mode {
            if let (Some(id), Some(snapshot)) = (hit, snapshot) {
                select.selected = Some(id);
                select.drag = Some(DragState {
                    start: point,
                    snapshot,
                });
            }
        }
    }

    pub fn handle_mouse_up(&mut self) {
        if let Mode::Select(select) = &mut self.mode {
            select.drag = None;
        }
    }

    /// Double-click completes the multi-point tools and aborts a bezier
    /// mid-construction. Two-click tools are unaffected.
    pub fn handle_double_click(&mut self) -> Vec<EditorEvent> {
        if !self.is_drawing() {
            return Vec::new();
        }
        match self.tool() {
            Tool::Polyline | Tool::Polygon => self.finish_multi_point(),
            Tool::Path => {
                self.cancel_path();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Escape: the tool's natural completion. Multi-point shapes are kept,
    /// everything else in progress is discarded.
    pub fn handle_escape(&mut self) -> Vec<EditorEvent> {
        if !self.is_drawing() {
            return Vec::new();
        }
        match self.tool() {
            Tool::Polyline | Tool::Polygon => self.finish_multi_point(),
            Tool::Path => {
                self.cancel_path();
                Vec::new()
            }
            _ => {
                self.cancel_two_click();
                Vec::new()
            }
        }
    }

    /// Leaving the canvas mid-draw: partial polylines and polygons are
    /// committed, partial single shapes and bezier constructions are
    /// removed. A select drag simply ends.
    pub fn handle_leave(&mut self) -> Vec<EditorEvent> {
        if let Mode::Select(select) = &mut self.mode {
            select.drag = None;
            return Vec::new();
        }
        if !self.is_drawing() {
            return Vec::new();
        }
        match self.tool() {
            Tool::Polyline | Tool::Polygon => self.finish_multi_point(),
            Tool::Path => {
                self.cancel_path();
                Vec::new()
            }
            _ => {
                self.cancel_two_click();
                Vec::new()
            }
        }
    }

    /// True when an open polyline/polygon or bezier construction exists,
    /// the only cases `finish_open_shape` acts on.
    pub fn has_open_shape(&self) -> bool {
        match &self.mode {
            Mode::Polyline(mp) | Mode::Polygon(mp) => matches!(mp, MultiPoint::Active { .. }),
            Mode::Path(path) => path.stage() != 0,
            _ => false,
        }
    }

    /// Ctrl+C ends an open polyline/polygon or bezier construction.
    pub fn finish_open_shape(&mut self) -> Vec<EditorEvent> {
        match self.tool() {
            Tool::Polyline | Tool::Polygon => self.finish_multi_point(),
            Tool::Path => {
                self.cancel_path();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn select_click(&mut self, point: Point) -> Vec<EditorEvent> {
        let hit = self.document.hit_test(point.x, point.y);
        if let Mode::Select(select) = &mut self.mode {
            select.selected = hit;
            if hit.is_none() {
                select.drag = None;
            }
        }
        Vec::new()
    }

    fn select_drag(&mut self, point: Point) {
        let update = match &self.mode {
            Mode::Select(SelectState {
                selected: Some(id),
                drag: Some(drag),
            }) => {
                let dx = point.x - drag.start.x;
                let dy = point.y - drag.start.y;
                Some((*id, geometry::translate(&drag.snapshot, dx, dy)))
            }
            _ => None,
        };
        if let Some((id, geometry)) = update {
            if let Some(shape) = self.document.get_mut(id) {
                shape.geometry = geometry;
            }
        }
    }

    fn two_click_state(&self) -> Option<TwoClick> {
        match &self.mode {
            Mode::Line(tc) | Mode::Rect(tc) | Mode::Circle(tc) | Mode::Ellipse(tc) => Some(*tc),
            _ => None,
        }
    }

    fn set_two_click_state(&mut self, state: TwoClick) {
        match &mut self.mode {
            Mode::Line(tc) | Mode::Rect(tc) | Mode::Circle(tc) | Mode::Ellipse(tc) => *tc = state,
            _ => {}
        }
    }

    fn two_click(&mut self, tool: Tool, point: Point) -> Vec<EditorEvent> {
        match self.two_click_state() {
            Some(TwoClick::Idle) => {
                let id = self.alloc_id();
                let shape = Shape {
                    id,
                    style: Style::new(self.stroke_color.clone()),
                    geometry: two_click_geometry(tool, point, point),
                };
                self.document.push(shape);
                self.set_two_click_state(TwoClick::Started { id, anchor: point });
                vec![EditorEvent::DrawingStart {
                    tool,
                    start_x: point.x,
                    start_y: point.y,
                }]
            }
            Some(TwoClick::Started { id, anchor }) => {
                if let Some(shape) = self.document.get_mut(id) {
                    shape.geometry = two_click_geometry(tool, anchor, point);
                }
                self.set_two_click_state(TwoClick::Idle);
                vec![EditorEvent::DrawingEnd { tool }]
            }
            None => Vec::new(),
        }
    }

    fn two_click_move(&mut self, tool: Tool, point: Point) -> Vec<EditorEvent> {
        match self.two_click_state() {
            Some(TwoClick::Started { id, anchor }) => {
                if let Some(shape) = self.document.get_mut(id) {
                    shape.geometry = two_click_geometry(tool, anchor, point);
                }
                vec![EditorEvent::Drawing {
                    tool,
                    start_x: anchor.x,
                    start_y: anchor.y,
                    end_x: point.x,
                    end_y: point.y,
                }]
            }
            _ => Vec::new(),
        }
    }

    fn cancel_two_click(&mut self) {
        if let Some(TwoClick::Started { id, .. }) = self.two_click_state() {
            self.document.remove(id);
            self.set_two_click_state(TwoClick::Idle);
        }
    }

    fn multi_point_state(&self) -> Option<MultiPoint> {
        match &self.mode {
            Mode::Polyline(mp) | Mode::Polygon(mp) => Some(*mp),
            _ => None,
        }
    }

    fn set_multi_point_state(&mut self, state: MultiPoint) {
        match &mut self.mode {
            Mode::Polyline(mp) | Mode::Polygon(mp) => *mp = state,
            _ => {}
        }
    }

    fn multi_point_click(&mut self, tool: Tool, point: Point) -> Vec<EditorEvent> {
        match self.multi_point_state() {
            Some(MultiPoint::Idle) => {
                let id = self.alloc_id();
                // The second copy is the rubber-band preview.
                let points = vec![point, point];
                let geometry = if tool == Tool::Polygon {
                    Geometry::Polygon { points }
                } else {
                    Geometry::Polyline { points }
                };
                self.document.push(Shape {
                    id,
                    style: Style::new(self.stroke_color.clone()),
                    geometry,
                });
                self.set_multi_point_state(MultiPoint::Active { id });
                vec![EditorEvent::DrawingStart {
                    tool,
                    start_x: point.x,
                    start_y: point.y,
                }]
            }
            Some(MultiPoint::Active { id }) => {
                if let Some(points) = self.multi_point_points_mut(id) {
                    if let Some(last) = points.last_mut() {
                        *last = point;
                    }
                    points.push(point);
                }
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn multi_point_move(&mut self, tool: Tool, point: Point) -> Vec<EditorEvent> {
        let Some(MultiPoint::Active { id }) = self.multi_point_state() else {
            return Vec::new();
        };
        let mut start = None;
        if let Some(points) = self.multi_point_points_mut(id) {
            if let Some(last) = points.last_mut() {
                *last = point;
            }
            start = points.first().copied();
        }
        match start {
            Some(start) => vec![EditorEvent::Drawing {
                tool,
                start_x: start.x,
                start_y: start.y,
                end_x: point.x,
                end_y: point.y,
            }],
            None => Vec::new(),
        }
    }

    fn multi_point_points_mut(&mut self, id: ShapeId) -> Option<&mut Vec<Point>> {
        match self.document.get_mut(id).map(|shape| &mut shape.geometry) {
            Some(Geometry::Polyline { points }) | Some(Geometry::Polygon { points }) => {
                Some(points)
            }
            _ => None,
        }
    }

    fn finish_multi_point(&mut self) -> Vec<EditorEvent> {
        let tool = self.tool();
        match self.multi_point_state() {
            Some(MultiPoint::Active { id }) => {
                if let Some(points) = self.multi_point_points_mut(id) {
                    if points.len() > 1 {
                        points.pop();
                    }
                }
                self.set_multi_point_state(MultiPoint::Idle);
                vec![EditorEvent::DrawingEnd { tool }]
            }
            _ => Vec::new(),
        }
    }

    fn path_state(&self) -> Option<PathMode> {
        match &self.mode {
            Mode::Path(path) => Some(*path),
            _ => None,
        }
    }

    fn path_geometry_mut(&mut self, id: ShapeId) -> Option<&mut Geometry> {
        match self.document.get_mut(id).map(|shape| &mut shape.geometry) {
            Some(geometry @ Geometry::QuadPath { .. }) => Some(geometry),
            _ => None,
        }
    }

    fn path_click(&mut self, point: Point) -> Vec<EditorEvent> {
        match self.path_state() {
            Some(PathMode::Idle) => {
                let id = self.alloc_id();
                self.document.push(Shape {
                    id,
                    style: Style::new(self.stroke_color.clone()),
                    geometry: Geometry::QuadPath {
                        start: point,
                        control: None,
                        end: None,
                    },
                });
                self.mode = Mode::Path(PathMode::Started { id });
                vec![EditorEvent::DrawingStart {
                    tool: Tool::Path,
                    start_x: point.x,
                    start_y: point.y,
                }]
            }
            Some(PathMode::Started { id }) => {
                if let Some(Geometry::QuadPath { control, .. }) = self.path_geometry_mut(id) {
                    *control = Some(point);
                }
                self.mode = Mode::Path(PathMode::ControlSet { id });
                Vec::new()
            }
            Some(PathMode::ControlSet { id }) => {
                if let Some(Geometry::QuadPath { end, .. }) = self.path_geometry_mut(id) {
                    *end = Some(point);
                }
                self.mode = Mode::Path(PathMode::Idle);
                vec![EditorEvent::DrawingEnd { tool: Tool::Path }]
            }
            None => Vec::new(),
        }
    }

    fn path_move(&mut self, point: Point) -> Vec<EditorEvent> {
        let state = self.path_state();
        let (id, start) = match state {
            Some(PathMode::Started { id }) | Some(PathMode::ControlSet { id }) => {
                match self.path_geometry_mut(id) {
                    Some(Geometry::QuadPath { start, .. }) => (id, *start),
                    _ => return Vec::new(),
                }
            }
            _ => return Vec::new(),
        };
        match state {
            Some(PathMode::Started { .. }) => {
                if let Some(Geometry::QuadPath { control, .. }) = self.path_geometry_mut(id) {
                    *control = Some(point);
                }
            }
            Some(PathMode::ControlSet { .. }) => {
                if let Some(Geometry::QuadPath { end, .. }) = self.path_geometry_mut(id) {
                    *end = Some(point);
                }
            }
            _ => {}
        }
        vec![EditorEvent::Drawing {
            tool: Tool::Path,
            start_x: start.x,
            start_y: start.y,
            end_x: point.x,
            end_y: point.y,
        }]
    }

    fn cancel_path(&mut self) {
        match self.path_state() {
            Some(PathMode::Started { id }) | Some(PathMode::ControlSet { id }) => {
                self.document.remove(id);
                self.mode = Mode::Path(PathMode::Idle);
            }
            _ => {}
        }
    }
}

fn two_click_geometry(tool: Tool, anchor: Point, live: Point) -> Geometry {
    match tool {
        Tool::Line => Geometry::Line {
            x1: anchor.x,
            y1: anchor.y,
            x2: live.x,
            y2: live.y,
        },
        Tool::Rect => {
            let (x, y, width, height) = rect_from_corners(anchor, live);
            Geometry::Rect {
                x,
                y,
                width,
                height,
            }
        }
        Tool::Circle => Geometry::Circle {
            cx: anchor.x,
            cy: anchor.y,
            r: distance(anchor, live),
        },
        // Center pinned at the anchor, radii are the raw axis deltas.
        Tool::Ellipse => Geometry::Ellipse {
            cx: anchor.x,
            cy: anchor.y,
            rx: (live.x - anchor.x).abs(),
            ry: (live.y - anchor.y).abs(),
        },
        _ => unreachable!("not a two-click tool"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(tool: Tool) -> Editor {
        let mut editor = Editor::new(0);
        editor.set_tool(tool);
        editor
    }

    fn only_geometry(editor: &Editor) -> &Geometry {
        assert_eq!(editor.document.len(), 1);
        &editor.document.iter().next().unwrap().geometry
    }

    #[test]
    fn rect_two_clicks_normalize_corners() {
        let mut editor = editor_with(Tool::Rect);
        editor.handle_click(10.0, 10.0);
        assert!(editor.is_drawing());
        editor.handle_click(50.0, 60.0);
        assert!(!editor.is_drawing());
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Rect {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: 50.0,
            }
        );
    }

    #[test]
    fn two_click_tools_accept_coincident_clicks() {
        for tool in [Tool::Line, Tool::Rect, Tool::Circle, Tool::Ellipse] {
            let mut editor = editor_with(tool);
            editor.handle_click(5.0, 5.0);
            editor.handle_click(5.0, 5.0);
            assert_eq!(editor.document.len(), 1, "{:?}", tool);
            assert!(!editor.is_drawing());
            match only_geometry(&editor) {
                Geometry::Line { x1, y1, x2, y2 } => {
                    assert_eq!((*x1, *y1), (*x2, *y2));
                }
                Geometry::Rect { width, height, .. } => {
                    assert_eq!((*width, *height), (0.0, 0.0));
                }
                Geometry::Circle { r, .. } => assert_eq!(*r, 0.0),
                Geometry::Ellipse { rx, ry, .. } => assert_eq!((*rx, *ry), (0.0, 0.0)),
                other => panic!("unexpected geometry {other:?}"),
            }
        }
    }

    #[test]
    fn circle_radius_is_euclidean_distance() {
        let mut editor = editor_with(Tool::Circle);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(3.0, 4.0);
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Circle {
                cx: 0.0,
                cy: 0.0,
                r: 5.0,
            }
        );
    }

    // Deliberate policy for the ellipse tool: center stays at the anchor and
    // the radii are the raw axis deltas, not half of them.
    #[test]
    fn ellipse_center_is_anchor_with_raw_delta_radii() {
        let mut editor = editor_with(Tool::Ellipse);
        editor.handle_click(10.0, 20.0);
        editor.handle_click(16.0, 12.0);
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Ellipse {
                cx: 10.0,
                cy: 20.0,
                rx: 6.0,
                ry: 8.0,
            }
        );
    }

    #[test]
    fn rubber_band_updates_live_geometry() {
        let mut editor = editor_with(Tool::Line);
        editor.handle_click(0.0, 0.0);
        let events = editor.handle_move(7.0, 9.0);
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 7.0,
                y2: 9.0,
            }
        );
        assert!(matches!(events.as_slice(), [EditorEvent::Drawing { .. }]));
    }

    #[test]
    fn move_with_nothing_in_progress_is_a_no_op() {
        let mut editor = editor_with(Tool::Rect);
        assert!(editor.handle_move(10.0, 10.0).is_empty());
        assert!(editor.document.is_empty());
    }

    #[test]
    fn non_finite_click_is_ignored() {
        let mut editor = editor_with(Tool::Rect);
        assert!(editor.handle_click(f64::NAN, 1.0).is_empty());
        assert!(editor.document.is_empty());
    }

    #[test]
    fn escape_discards_partial_two_click_shape() {
        let mut editor = editor_with(Tool::Ellipse);
        editor.handle_click(1.0, 1.0);
        editor.handle_escape();
        assert!(editor.document.is_empty());
        assert!(!editor.is_drawing());
    }

    #[test]
    fn polyline_accumulates_points_in_order() {
        let mut editor = editor_with(Tool::Polyline);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(10.0, 0.0);
        editor.handle_click(10.0, 10.0);
        editor.handle_double_click();
        assert!(!editor.is_drawing());
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Polyline {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 0.0),
                    Point::new(10.0, 10.0),
                ],
            }
        );
    }

    #[test]
    fn polyline_move_rubber_bands_only_the_preview_point() {
        let mut editor = editor_with(Tool::Polyline);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(10.0, 0.0);
        editor.handle_move(20.0, 5.0);
        editor.handle_move(30.0, 7.0);
        match only_geometry(&editor) {
            Geometry::Polyline { points } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[0], Point::new(0.0, 0.0));
                assert_eq!(points[1], Point::new(10.0, 0.0));
                assert_eq!(points[2], Point::new(30.0, 7.0));
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn polyline_keeps_the_first_click_after_rubber_banding() {
        let mut editor = editor_with(Tool::Polyline);
        editor.handle_click(0.0, 0.0);
        editor.handle_move(9.9, 0.2);
        editor.handle_click(10.0, 0.0);
        editor.handle_double_click();
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Polyline {
                points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            }
        );
    }

    #[test]
    fn polygon_uses_the_same_accumulation_logic() {
        let mut editor = editor_with(Tool::Polygon);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(4.0, 0.0);
        editor.handle_click(4.0, 4.0);
        editor.handle_escape();
        match only_geometry(&editor) {
            Geometry::Polygon { points } => assert_eq!(points.len(), 3),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn leaving_canvas_keeps_partial_polyline_but_discards_partial_rect() {
        let mut polyline = editor_with(Tool::Polyline);
        polyline.handle_click(0.0, 0.0);
        polyline.handle_click(5.0, 5.0);
        polyline.handle_leave();
        assert_eq!(polyline.document.len(), 1);

        let mut rect = editor_with(Tool::Rect);
        rect.handle_click(0.0, 0.0);
        rect.handle_leave();
        assert!(rect.document.is_empty());
    }

    #[test]
    fn path_walks_the_three_stages() {
        let mut editor = editor_with(Tool::Path);
        assert_eq!(editor.path_stage(), 0);
        editor.handle_click(0.0, 0.0);
        assert_eq!(editor.path_stage(), 1);
        editor.handle_click(50.0, -40.0);
        assert_eq!(editor.path_stage(), 2);
        editor.handle_click(100.0, 0.0);
        assert_eq!(editor.path_stage(), 0);
        assert!(!editor.is_drawing());
        assert_eq!(
            only_geometry(&editor),
            &Geometry::QuadPath {
                start: Point::new(0.0, 0.0),
                control: Some(Point::new(50.0, -40.0)),
                end: Some(Point::new(100.0, 0.0)),
            }
        );
    }

    #[test]
    fn path_cancel_removes_the_shape_at_stage_one_and_two() {
        for clicks in [1, 2] {
            let mut editor = editor_with(Tool::Path);
            for i in 0..clicks {
                editor.handle_click(i as f64, 0.0);
            }
            editor.handle_escape();
            assert_eq!(editor.path_stage(), 0);
            assert!(editor.document.is_empty(), "after {clicks} clicks");
        }
    }

    #[test]
    fn path_cancel_at_stage_zero_is_a_no_op() {
        let mut editor = editor_with(Tool::Path);
        assert!(editor.handle_escape().is_empty());
        assert!(editor.handle_double_click().is_empty());
        assert!(editor.document.is_empty());
    }

    #[test]
    fn path_helpers_track_construction_and_vanish_on_completion() {
        let mut editor = editor_with(Tool::Path);
        assert!(editor.path_helpers().is_none());
        editor.handle_click(0.0, 0.0);
        let helpers = editor.path_helpers().unwrap();
        assert_eq!(helpers.start, Point::new(0.0, 0.0));
        assert!(helpers.control.is_none());
        assert_eq!(helpers.stage, 1);
        editor.handle_click(5.0, 5.0);
        assert_eq!(editor.path_helpers().unwrap().stage, 2);
        editor.handle_click(10.0, 0.0);
        assert!(editor.path_helpers().is_none());
    }

    #[test]
    fn select_click_picks_topmost_and_empty_space_deselects() {
        let mut editor = editor_with(Tool::Rect);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(100.0, 100.0);
        editor.set_tool(Tool::Select);
        editor.handle_click(50.0, 50.0);
        assert!(editor.selection().is_some());
        editor.handle_click(500.0, 500.0);
        assert!(editor.selection().is_none());
    }

    #[test]
    fn dragging_a_rect_translates_it_by_the_pointer_delta() {
        let mut editor = editor_with(Tool::Rect);
        editor.handle_click(10.0, 10.0);
        editor.handle_click(30.0, 40.0);
        editor.set_tool(Tool::Select);
        editor.handle_click(20.0, 20.0);
        editor.handle_mouse_down(20.0, 20.0);
        editor.handle_move(27.0, 31.0);
        editor.handle_mouse_up();
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Rect {
                x: 17.0,
                y: 21.0,
                width: 20.0,
                height: 30.0,
            }
        );
    }

    #[test]
    fn drag_recomputes_from_snapshot_not_cumulatively() {
        let mut editor = editor_with(Tool::Circle);
        editor.handle_click(50.0, 50.0);
        editor.handle_click(60.0, 50.0);
        editor.set_tool(Tool::Select);
        editor.handle_click(50.0, 50.0);
        editor.handle_mouse_down(50.0, 50.0);
        editor.handle_move(55.0, 50.0);
        editor.handle_move(52.0, 50.0);
        assert_eq!(
            only_geometry(&editor),
            &Geometry::Circle {
                cx: 52.0,
                cy: 50.0,
                r: 10.0,
            }
        );
    }

    #[test]
    fn tool_switch_clears_selection_and_emits_mode_change() {
        let mut editor = editor_with(Tool::Rect);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(10.0, 10.0);
        editor.set_tool(Tool::Select);
        editor.handle_click(5.0, 5.0);
        assert!(editor.selection().is_some());
        let events = editor.set_tool(Tool::Line);
        assert!(editor.selection().is_none());
        assert!(events.contains(&EditorEvent::ModeChange { tool: Tool::Line }));
    }

    #[test]
    fn tool_switch_mid_rect_discards_the_partial_shape() {
        let mut editor = editor_with(Tool::Rect);
        editor.handle_click(0.0, 0.0);
        editor.set_tool(Tool::Circle);
        assert!(editor.document.is_empty());
    }

    #[test]
    fn replace_document_drops_in_progress_state() {
        let mut editor = editor_with(Tool::Path);
        editor.handle_click(0.0, 0.0);
        editor.replace_document(Vec::new());
        assert_eq!(editor.path_stage(), 0);
        assert!(editor.document.is_empty());
        assert_eq!(editor.tool(), Tool::Path);
    }

    #[test]
    fn finish_open_shape_commits_a_polyline() {
        let mut editor = editor_with(Tool::Polyline);
        editor.handle_click(0.0, 0.0);
        editor.handle_click(5.0, 0.0);
        let events = editor.finish_open_shape();
        assert_eq!(
            events,
            vec![EditorEvent::DrawingEnd {
                tool: Tool::Polyline,
            }]
        );
        assert_eq!(editor.document.len(), 1);
    }

    #[test]
    fn open_shape_tracking_covers_multi_point_and_path_only() {
        let mut rect = editor_with(Tool::Rect);
        rect.handle_click(0.0, 0.0);
        assert!(!rect.has_open_shape());

        let mut polyline = editor_with(Tool::Polyline);
        assert!(!polyline.has_open_shape());
        polyline.handle_click(0.0, 0.0);
        assert!(polyline.has_open_shape());
        polyline.finish_open_shape();
        assert!(!polyline.has_open_shape());

        let mut path = editor_with(Tool::Path);
        path.handle_click(0.0, 0.0);
        assert!(path.has_open_shape());
    }
}
