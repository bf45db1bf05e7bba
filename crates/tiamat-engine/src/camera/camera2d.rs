use thiserror::Error;

use crate::coords::{Affine, Rect, Vec2, Viewport};

/// Error produced by [`Camera2D`] construction and configuration.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum CameraError {
    /// Zoom must be a positive, finite scale factor.
    #[error("camera zoom must be positive and finite, got {0}")]
    InvalidZoom(f32),
}

/// 2D camera over a viewport supplied by the caller.
///
/// `position` is the world-space focus point and `rotation` is in degrees;
/// both are plain public fields. `zoom` is kept behind a validated setter
/// so the derived values below can never divide by zero: the invariant
/// `zoom > 0` (finite) holds for the camera's whole life.
///
/// All derived values are pure functions of the three fields and the
/// viewport — reading them twice with unchanged inputs yields identical
/// results.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera2D {
    /// World-space focus point.
    pub position: Vec2,

    /// Rotation in degrees.
    pub rotation: f32,

    zoom: f32,
}

impl Camera2D {
    /// Creates a camera; fails if `zoom` is not a positive finite number.
    pub fn new(position: Vec2, rotation: f32, zoom: f32) -> Result<Self, CameraError> {
        validate_zoom(zoom)?;
        Ok(Self {
            position,
            rotation,
            zoom,
        })
    }

    /// Camera centered on `position` with no rotation and 1:1 zoom.
    pub fn centered_on(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            zoom: 1.0,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) -> Result<(), CameraError> {
        validate_zoom(zoom)?;
        self.zoom = zoom;
        Ok(())
    }

    /// The screen-space pivot the camera rotates and zooms about: half the
    /// viewport size. Recomputed per call so it always reflects the latest
    /// viewport dimensions.
    #[inline]
    pub fn origin(&self, viewport: Viewport) -> Vec2 {
        viewport.half()
    }

    /// World-space rectangle visible through the camera.
    ///
    /// This is an unrotated AABB meant for coarse culling; rotation is
    /// ignored, so under rotation it approximates rather than matches the
    /// true (rotated) view polygon. Width and height are always positive
    /// because `zoom > 0` is enforced.
    pub fn bounding_rect(&self, viewport: Viewport) -> Rect {
        let origin = self.origin(viewport);
        Rect::new(
            self.position.x - origin.x / self.zoom,
            self.position.y - origin.y / self.zoom,
            viewport.width / self.zoom,
            viewport.height / self.zoom,
        )
    }

    /// Affine transform mapping world space to screen space.
    ///
    /// Composition, each step applied after the previous one:
    /// 1. translate by `-(position - origin)`
    /// 2. translate by `-origin`
    /// 3. rotate by `rotation` degrees
    /// 4. scale by `(zoom, zoom)`
    /// 5. translate by `+origin`
    ///
    /// The order is load-bearing: rotation and zoom pivot about `origin`,
    /// and the world point equal to `position` always lands on `origin`
    /// (the focus point projects to the screen center).
    pub fn view_matrix(&self, viewport: Viewport) -> Affine {
        let origin = self.origin(viewport);

        Affine::translation(-(self.position - origin))
            .then(Affine::translation(-origin))
            .then(Affine::rotation_degrees(self.rotation))
            .then(Affine::scale(self.zoom, self.zoom))
            .then(Affine::translation(origin))
    }
}

fn validate_zoom(zoom: f32) -> Result<(), CameraError> {
    if zoom > 0.0 && zoom.is_finite() {
        Ok(())
    } else {
        Err(CameraError::InvalidZoom(zoom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn assert_vec_near(got: Vec2, want: Vec2) {
        assert!(
            (got.x - want.x).abs() < 1e-3 && (got.y - want.y).abs() < 1e-3,
            "got {got:?}, want {want:?}"
        );
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_degenerate_zoom() {
        let p = Vec2::zero();
        assert_eq!(Camera2D::new(p, 0.0, 0.0).unwrap_err(), CameraError::InvalidZoom(0.0));
        assert_eq!(Camera2D::new(p, 0.0, -2.0).unwrap_err(), CameraError::InvalidZoom(-2.0));
        assert!(Camera2D::new(p, 0.0, f32::NAN).is_err());
        assert!(Camera2D::new(p, 0.0, f32::INFINITY).is_err());

        let mut camera = Camera2D::centered_on(p);
        assert!(camera.set_zoom(0.0).is_err());
        assert_eq!(camera.zoom(), 1.0);
    }

    // ── origin ────────────────────────────────────────────────────────────

    #[test]
    fn origin_is_half_the_viewport() {
        let camera = Camera2D::centered_on(Vec2::zero());
        assert_eq!(camera.origin(VP), Vec2::new(400.0, 300.0));
        // Tracks viewport changes, not camera state.
        assert_eq!(camera.origin(Viewport::new(100.0, 50.0)), Vec2::new(50.0, 25.0));
    }

    // ── bounding rect ─────────────────────────────────────────────────────

    #[test]
    fn bounding_rect_centered_unit_zoom_covers_viewport() {
        let camera = Camera2D::centered_on(Vec2::new(400.0, 300.0));
        assert_eq!(camera.bounding_rect(VP), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn bounding_rect_shrinks_with_zoom() {
        let camera = Camera2D::new(Vec2::new(400.0, 300.0), 0.0, 2.0).unwrap();
        assert_eq!(camera.bounding_rect(VP), Rect::new(200.0, 150.0, 400.0, 300.0));
    }

    #[test]
    fn bounding_rect_follows_position() {
        let camera = Camera2D::new(Vec2::new(-100.0, 50.0), 0.0, 1.0).unwrap();
        assert_eq!(camera.bounding_rect(VP), Rect::new(-500.0, -250.0, 800.0, 600.0));
    }

    #[test]
    fn bounding_rect_ignores_rotation() {
        let straight = Camera2D::new(Vec2::new(10.0, 20.0), 0.0, 1.0).unwrap();
        let rotated = Camera2D::new(Vec2::new(10.0, 20.0), 137.0, 1.0).unwrap();
        assert_eq!(straight.bounding_rect(VP), rotated.bounding_rect(VP));
    }

    // ── view matrix ───────────────────────────────────────────────────────

    #[test]
    fn focus_point_maps_to_screen_center() {
        for (rotation, zoom) in [(0.0, 1.0), (45.0, 2.0), (180.0, 0.5), (-30.0, 3.0)] {
            let camera = Camera2D::new(Vec2::new(123.0, -456.0), rotation, zoom).unwrap();
            let mapped = camera.view_matrix(VP).transform_point(camera.position);
            assert_vec_near(mapped, camera.origin(VP));
        }
    }

    #[test]
    fn identity_camera_centered_on_screen_center_is_identity() {
        let camera = Camera2D::centered_on(Vec2::new(400.0, 300.0));
        let m = camera.view_matrix(VP);
        assert_vec_near(m.transform_point(Vec2::zero()), Vec2::zero());
        assert_vec_near(m.transform_point(Vec2::new(800.0, 600.0)), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn zoom_scales_about_screen_center() {
        let camera = Camera2D::new(Vec2::new(400.0, 300.0), 0.0, 2.0).unwrap();
        let m = camera.view_matrix(VP);
        // A point 100px right of the focus lands 200px right of center.
        assert_vec_near(m.transform_point(Vec2::new(500.0, 300.0)), Vec2::new(600.0, 300.0));
    }

    #[test]
    fn rotation_turns_about_screen_center() {
        let camera = Camera2D::new(Vec2::new(400.0, 300.0), 90.0, 1.0).unwrap();
        let m = camera.view_matrix(VP);
        // +Y down, 90° clockwise: a point right of the focus ends up below it.
        assert_vec_near(m.transform_point(Vec2::new(500.0, 300.0)), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn pan_translates_the_world_opposite_to_the_camera() {
        let camera = Camera2D::new(Vec2::new(500.0, 300.0), 0.0, 1.0).unwrap();
        let m = camera.view_matrix(VP);
        // Camera moved 100px right: world content shifts 100px left.
        assert_vec_near(m.transform_point(Vec2::new(500.0, 300.0)), Vec2::new(400.0, 300.0));
        assert_vec_near(m.transform_point(Vec2::zero()), Vec2::new(-100.0, 0.0));
    }

    // ── idempotence ───────────────────────────────────────────────────────

    #[test]
    fn derived_accessors_are_pure() {
        let camera = Camera2D::new(Vec2::new(7.0, -3.0), 33.0, 1.5).unwrap();
        assert_eq!(camera.origin(VP), camera.origin(VP));
        assert_eq!(camera.bounding_rect(VP), camera.bounding_rect(VP));
        assert_eq!(camera.view_matrix(VP), camera.view_matrix(VP));
    }
}
