//! Drawing modes and the pointer-to-shape state machine.

use crate::model::{Coordinate, Geometry, MIN_POLYGON_VERTICES};

/// Interaction modes selectable from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingMode {
    /// Each click places a point feature
    Point,
    /// Clicks add vertices, double-click finishes
    Polygon,
    /// Two clicks place opposite corners
    Rectangle,
    /// Clicking features selects them for vertex editing
    Edit,
    /// Clicking features deletes them after confirmation
    Delete,
}

impl DrawingMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingMode::Point => "Point",
            DrawingMode::Polygon => "Polygon",
            DrawingMode::Rectangle => "Rectangle",
            DrawingMode::Edit => "Edit",
            DrawingMode::Delete => "Delete",
        }
    }

    /// Short usage hint shown while the mode is active.
    pub fn hint(&self) -> &'static str {
        match self {
            DrawingMode::Point => "Click to place a point",
            DrawingMode::Polygon => "Click to add points, double-click to finish",
            DrawingMode::Rectangle => "Click two corners to draw rectangle",
            DrawingMode::Edit => "Click a shape to edit it",
            DrawingMode::Delete => "Click a shape to delete it",
        }
    }

    /// Get all modes in toolbar order.
    pub fn all() -> &'static [DrawingMode] {
        &[
            DrawingMode::Point,
            DrawingMode::Polygon,
            DrawingMode::Rectangle,
            DrawingMode::Edit,
            DrawingMode::Delete,
        ]
    }

    /// Check if this mode creates shapes from map clicks.
    pub fn is_drawing_tool(&self) -> bool {
        matches!(
            self,
            DrawingMode::Point | DrawingMode::Polygon | DrawingMode::Rectangle
        )
    }

    /// Toolbar semantics: pressing the active tool again turns it off.
    pub fn toggle(current: Option<DrawingMode>, pressed: DrawingMode) -> Option<DrawingMode> {
        if current == Some(pressed) {
            None
        } else {
            Some(pressed)
        }
    }
}

/// Progress of the gesture being drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawingState {
    /// Not currently drawing anything.
    #[default]
    Idle,
    /// Drawing a polygon - stores vertices added so far.
    AwaitingPolygonVertices { points: Vec<Coordinate> },
    /// Drawing a rectangle - stores the first corner and the latest pointer.
    AwaitingSecondRectangleCorner {
        first: Coordinate,
        cursor: Option<Coordinate>,
    },
}

/// Partial geometry of an in-progress gesture, for live rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Polygon vertices placed so far.
    Path(Vec<Coordinate>),
    /// First rectangle corner before the pointer has moved.
    Corner(Coordinate),
    /// First rectangle corner and the current pointer position.
    Rectangle([Coordinate; 2]),
}

/// Turns pointer events into completed geometries under the active mode.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    mode: Option<DrawingMode>,
    state: DrawingState,
}

impl DrawingSession {
    /// Create an idle session with no mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active mode.
    pub fn mode(&self) -> Option<DrawingMode> {
        self.mode
    }

    /// The current gesture state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Check if a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        !matches!(self.state, DrawingState::Idle)
    }

    /// Change the mode. Any change discards an in-progress gesture.
    pub fn set_mode(&mut self, mode: Option<DrawingMode>) {
        if self.mode == mode {
            return;
        }
        log::debug!(
            "Drawing mode: {} -> {}",
            self.mode.map_or("none", |m| m.name()),
            mode.map_or("none", |m| m.name())
        );
        self.mode = mode;
        self.cancel();
    }

    /// Discard the in-progress gesture without creating anything.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("Discarding in-progress drawing");
        }
        self.state = DrawingState::Idle;
    }

    /// Handle a map click.
    ///
    /// Returns the completed geometry when the click finishes a gesture.
    /// Coordinates are taken verbatim; validation happens in the store.
    pub fn click(&mut self, coord: Coordinate) -> Option<Geometry> {
        match self.mode {
            Some(DrawingMode::Point) => Some(Geometry::Point(coord)),
            Some(DrawingMode::Polygon) => {
                match &mut self.state {
                    DrawingState::AwaitingPolygonVertices { points } => points.push(coord),
                    state => {
                        *state = DrawingState::AwaitingPolygonVertices {
                            points: vec![coord],
                        }
                    }
                }
                None
            }
            Some(DrawingMode::Rectangle) => match std::mem::take(&mut self.state) {
                DrawingState::AwaitingSecondRectangleCorner { first, .. } => {
                    Some(Geometry::Rectangle([first, coord]))
                }
                _ => {
                    self.state = DrawingState::AwaitingSecondRectangleCorner {
                        first: coord,
                        cursor: None,
                    };
                    None
                }
            },
            Some(DrawingMode::Edit | DrawingMode::Delete) | None => None,
        }
    }

    /// Handle a map double-click.
    ///
    /// Finishes a polygon with at least three vertices. With fewer vertices
    /// the gesture simply continues.
    pub fn double_click(&mut self) -> Option<Geometry> {
        let DrawingState::AwaitingPolygonVertices { points } = &self.state else {
            return None;
        };
        if points.len() < MIN_POLYGON_VERTICES {
            log::debug!(
                "Double-click with {} vertices, need {}",
                points.len(),
                MIN_POLYGON_VERTICES
            );
            return None;
        }
        match std::mem::take(&mut self.state) {
            DrawingState::AwaitingPolygonVertices { points } => Some(Geometry::Polygon(points)),
            _ => None,
        }
    }

    /// Track the pointer for rectangle previews.
    pub fn pointer_moved(&mut self, coord: Coordinate) {
        if let DrawingState::AwaitingSecondRectangleCorner { cursor, .. } = &mut self.state {
            *cursor = Some(coord);
        }
    }

    /// Read-only projection of the gesture so far.
    pub fn preview(&self) -> Option<Preview> {
        match &self.state {
            DrawingState::Idle => None,
            DrawingState::AwaitingPolygonVertices { points } => Some(Preview::Path(points.clone())),
            DrawingState::AwaitingSecondRectangleCorner {
                first,
                cursor: None,
            } => Some(Preview::Corner(*first)),
            DrawingState::AwaitingSecondRectangleCorner {
                first,
                cursor: Some(cursor),
            } => Some(Preview::Rectangle([*first, *cursor])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    fn session(mode: DrawingMode) -> DrawingSession {
        let mut session = DrawingSession::new();
        session.set_mode(Some(mode));
        session
    }

    #[test]
    fn test_point_click_completes_immediately() {
        let mut s = session(DrawingMode::Point);
        assert_eq!(s.click(c(1.0, 2.0)), Some(Geometry::Point(c(1.0, 2.0))));
        assert!(!s.is_drawing());
        assert_eq!(s.click(c(3.0, 4.0)), Some(Geometry::Point(c(3.0, 4.0))));
    }

    #[test]
    fn test_polygon_flow() {
        let mut s = session(DrawingMode::Polygon);
        let (p1, p2, p3) = (c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0));

        assert_eq!(s.click(p1), None);
        assert_eq!(s.click(p2), None);

        // Not enough vertices yet
        assert_eq!(s.double_click(), None);
        assert_eq!(s.preview(), Some(Preview::Path(vec![p1, p2])));

        assert_eq!(s.click(p3), None);
        assert_eq!(s.double_click(), Some(Geometry::Polygon(vec![p1, p2, p3])));
        assert_eq!(s.state(), &DrawingState::Idle);
        assert_eq!(s.double_click(), None);
    }

    #[test]
    fn test_polygon_keeps_duplicate_vertices() {
        let mut s = session(DrawingMode::Polygon);
        let p = c(5.0, 5.0);
        s.click(p);
        s.click(p);
        s.click(p);
        assert_eq!(s.double_click(), Some(Geometry::Polygon(vec![p, p, p])));
    }

    #[test]
    fn test_rectangle_flow_with_preview() {
        let mut s = session(DrawingMode::Rectangle);
        let (a, b) = (c(0.0, 0.0), c(1.0, 1.0));

        assert_eq!(s.click(a), None);
        assert_eq!(s.preview(), Some(Preview::Corner(a)));

        s.pointer_moved(c(0.5, 0.5));
        assert_eq!(s.preview(), Some(Preview::Rectangle([a, c(0.5, 0.5)])));

        assert_eq!(s.click(b), Some(Geometry::Rectangle([a, b])));
        assert_eq!(s.preview(), None);
    }

    #[test]
    fn test_mode_change_discards_gesture() {
        let mut s = session(DrawingMode::Polygon);
        s.click(c(0.0, 0.0));
        s.click(c(0.0, 1.0));
        s.click(c(1.0, 1.0));

        s.set_mode(Some(DrawingMode::Edit));
        assert!(!s.is_drawing());
        assert_eq!(s.double_click(), None);

        s.set_mode(Some(DrawingMode::Rectangle));
        s.click(c(0.0, 0.0));
        s.set_mode(None);
        assert_eq!(s.state(), &DrawingState::Idle);
    }

    #[test]
    fn test_same_mode_keeps_gesture() {
        let mut s = session(DrawingMode::Polygon);
        s.click(c(0.0, 0.0));
        s.set_mode(Some(DrawingMode::Polygon));
        assert!(s.is_drawing());
    }

    #[test]
    fn test_clicks_ignored_without_drawing_tool() {
        for mode in [None, Some(DrawingMode::Edit), Some(DrawingMode::Delete)] {
            let mut s = DrawingSession::new();
            s.set_mode(mode);
            assert_eq!(s.click(c(1.0, 1.0)), None);
            assert!(!s.is_drawing());
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(DrawingMode::toggle(None, DrawingMode::Point), Some(DrawingMode::Point));
        assert_eq!(DrawingMode::toggle(Some(DrawingMode::Point), DrawingMode::Point), None);
        assert_eq!(
            DrawingMode::toggle(Some(DrawingMode::Point), DrawingMode::Edit),
            Some(DrawingMode::Edit)
        );
        assert_eq!(
            DrawingMode::all().iter().filter(|m| m.is_drawing_tool()).count(),
            3
        );
    }
}
