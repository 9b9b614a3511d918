//! Interactive view session: the persistent globe orientation and the
//! pointer gestures that change it.

use foundation::math::{GeoCoord, Mat3, Projection, Vec2, build_roll_mat, transform_coord};

/// A drag gesture frozen at pointer-down.
#[derive(Debug, Copy, Clone)]
struct DragAnchor {
    /// Coordinate grabbed when the gesture began.
    coord: GeoCoord,
    /// World orientation at that moment. Move events resolve against this
    /// snapshot, not the live matrix.
    world: Mat3,
}

/// Owns the accumulated globe orientation and interprets pointer input.
///
/// Each drag update composes as `frozen_world * roll`, a rotation in the
/// already-rotated frame, which keeps the grabbed coordinate under the
/// cursor for the whole gesture.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    world: Mat3,
    drag: Option<DragAnchor>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orientation snapshot for a render pass.
    pub fn world(&self) -> Mat3 {
        self.world
    }

    pub fn set_world(&mut self, world: Mat3) {
        self.world = world;
    }

    /// Coordinate displayed at a normalized surface position, or
    /// [`GeoCoord::INVALID`] off the globe. Doubles as the double-click
    /// readout.
    pub fn coord_at(&self, projection: &dyn Projection, normal: Vec2) -> GeoCoord {
        transform_coord(projection.to_lat_lon(normal), self.world)
    }

    /// Begins a drag. Grabbing an off-globe position is a no-op.
    pub fn pointer_down(&mut self, projection: &dyn Projection, normal: Vec2) {
        let coord = self.coord_at(projection, normal);
        if !coord.is_valid() {
            return;
        }
        self.drag = Some(DragAnchor {
            coord,
            world: self.world,
        });
    }

    /// Continues a drag. Returns true when the orientation changed and the
    /// caller should re-render. Positions off the globe leave the
    /// orientation alone but keep the gesture alive, so dragging across
    /// the rim and back resumes cleanly.
    pub fn pointer_move(&mut self, projection: &dyn Projection, normal: Vec2) -> bool {
        let drag = match self.drag {
            Some(drag) => drag,
            None => return false,
        };
        let current = transform_coord(projection.to_lat_lon(normal), drag.world);
        if !current.is_valid() {
            return false;
        }
        self.world = drag.world.mul(build_roll_mat(current, drag.coord));
        true
    }

    /// Ends the active drag, if any.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Re-orients the globe so `coord` faces the viewer (the coordinate
    /// shown at the projection's face point).
    pub fn look_at(&mut self, coord: GeoCoord) {
        self.world = build_roll_mat(GeoCoord::new(0.0, 0.0), coord);
    }
}

#[cfg(test)]
mod tests {
    use super::ViewController;
    use foundation::math::{GeoCoord, Mat3, Orthographic, Vec2, haversine};

    fn assert_coord_close(a: GeoCoord, b: GeoCoord, eps: f64) {
        let dist = haversine(a, b);
        assert!(dist <= eps, "expected {a:?} ~= {b:?} (distance {dist})");
    }

    #[test]
    fn drag_keeps_grabbed_coord_under_cursor() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        let start = Vec2::new(0.3, 0.4);
        let grabbed = view.coord_at(&proj, start);
        assert!(grabbed.is_valid());

        view.pointer_down(&proj, start);
        assert!(view.is_dragging());
        assert!(view.pointer_move(&proj, Vec2::new(0.55, 0.6)));
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.55, 0.6)), grabbed, 1e-9);

        // Still anchored to the same grab on later moves.
        assert!(view.pointer_move(&proj, Vec2::new(0.45, 0.35)));
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.45, 0.35)), grabbed, 1e-9);

        view.pointer_up();
        assert!(!view.is_dragging());
    }

    #[test]
    fn drag_composes_in_the_rotated_frame() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        view.look_at(GeoCoord::from_degrees(35.7, 139.7));

        let start = Vec2::new(0.6, 0.45);
        let grabbed = view.coord_at(&proj, start);
        view.pointer_down(&proj, start);
        assert!(view.pointer_move(&proj, Vec2::new(0.35, 0.62)));
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.35, 0.62)), grabbed, 1e-9);
    }

    #[test]
    fn move_without_down_changes_nothing() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        assert!(!view.pointer_move(&proj, Vec2::new(0.5, 0.5)));
        assert_eq!(view.world(), Mat3::IDENTITY);
    }

    #[test]
    fn grabbing_off_the_globe_is_ignored() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        view.pointer_down(&proj, Vec2::new(0.01, 0.01));
        assert!(!view.is_dragging());
    }

    #[test]
    fn drag_survives_leaving_the_globe() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        let start = Vec2::new(0.4, 0.5);
        let grabbed = view.coord_at(&proj, start);
        view.pointer_down(&proj, start);

        let world_before = view.world();
        assert!(!view.pointer_move(&proj, Vec2::new(0.02, 0.98)));
        assert_eq!(view.world(), world_before);
        assert!(view.is_dragging());

        // Back over the disk the gesture resumes against the same anchor.
        assert!(view.pointer_move(&proj, Vec2::new(0.6, 0.55)));
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.6, 0.55)), grabbed, 1e-9);
    }

    #[test]
    fn look_at_centers_the_coordinate() {
        let proj = Orthographic;
        let mut view = ViewController::new();
        let tokyo = GeoCoord::from_degrees(35.68, 139.69);
        view.look_at(tokyo);
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.5, 0.5)), tokyo, 1e-9);
    }

    #[test]
    fn gestures_accumulate_across_drags() {
        let proj = Orthographic;
        let mut view = ViewController::new();

        view.pointer_down(&proj, Vec2::new(0.4, 0.4));
        assert!(view.pointer_move(&proj, Vec2::new(0.5, 0.55)));
        view.pointer_up();

        let start = Vec2::new(0.35, 0.6);
        let grabbed = view.coord_at(&proj, start);
        view.pointer_down(&proj, start);
        assert!(view.pointer_move(&proj, Vec2::new(0.52, 0.41)));
        assert_coord_close(view.coord_at(&proj, Vec2::new(0.52, 0.41)), grabbed, 1e-9);
    }
}
