use crate::camera::Camera2D;
use crate::coords::{Affine, Rect, Vec2, Viewport};
use crate::paint::Color;

use super::{CircleCmd, DrawCmd, RectCmd, SortKey, ZIndex};

#[derive(Debug, Copy, Clone, PartialEq)]
struct DrawItem {
    key: SortKey,
    cmd: DrawCmd,
}

/// Per-frame draw recording.
///
/// The runtime clears the canvas at the start of a frame, hands it to the
/// scene's `draw`, then feeds it to the renderer. `push` is O(1); paint
/// order is resolved lazily into a reusable index buffer, so a warmed
/// canvas allocates nothing per frame.
#[derive(Debug)]
pub struct Canvas {
    clear_color: Color,
    camera: Affine,

    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK,
            camera: Affine::IDENTITY,
            items: Vec::new(),
            next_order: 0,
            sorted_indices: Vec::new(),
            sorted_dirty: false,
        }
    }

    /// Resets recorded commands and the camera transform for a new frame.
    /// Keeps allocated capacity; the clear color persists across frames
    /// until changed.
    pub fn begin_frame(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.camera = Affine::IDENTITY;
        self.sorted_indices.clear();
        self.sorted_dirty = false;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// The world-to-screen transform applied to every recorded command.
    pub fn camera_transform(&self) -> Affine {
        self.camera
    }

    /// Applies `camera`'s view matrix for the rest of the frame.
    pub fn set_camera(&mut self, camera: &Camera2D, viewport: Viewport) {
        self.camera = camera.view_matrix(viewport);
    }

    /// Drops back to untransformed screen-space drawing.
    pub fn reset_camera(&mut self) {
        self.camera = Affine::IDENTITY;
    }

    /// Records a draw command on the given z-layer.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });
        self.sorted_dirty = true;
    }

    /// Records a solid rectangle.
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, color }));
    }

    /// Records a solid circle.
    pub fn push_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, color }));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates commands in paint order (back to front).
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawCmd> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i].cmd)
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);
        self.sorted_dirty = false;
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn recorded_xs(canvas: &mut Canvas) -> Vec<f32> {
        canvas
            .iter_in_paint_order()
            .map(|cmd| match cmd {
                DrawCmd::Rect(r) => r.rect.x,
                DrawCmd::Circle(c) => c.center.x,
            })
            .collect()
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut canvas = Canvas::new();
        canvas.push_rect(ZIndex(1), rect_at(10.0), Color::WHITE);
        canvas.push_rect(ZIndex(0), rect_at(20.0), Color::WHITE);
        canvas.push_rect(ZIndex(1), rect_at(30.0), Color::WHITE);
        canvas.push_rect(ZIndex(-1), rect_at(40.0), Color::WHITE);

        assert_eq!(recorded_xs(&mut canvas), vec![40.0, 20.0, 10.0, 30.0]);
    }

    #[test]
    fn begin_frame_clears_commands_and_camera() {
        let mut canvas = Canvas::new();
        let camera = Camera2D::new(Vec2::new(5.0, 5.0), 0.0, 2.0).unwrap();
        canvas.set_camera(&camera, Viewport::new(100.0, 100.0));
        canvas.push_circle(ZIndex(0), Vec2::zero(), 4.0, Color::WHITE);

        canvas.begin_frame();
        assert!(canvas.is_empty());
        assert_eq!(canvas.camera_transform(), Affine::IDENTITY);
    }

    #[test]
    fn clear_color_persists_across_frames() {
        let mut canvas = Canvas::new();
        let teal = Color::rgb(0.0, 0.5, 0.5);
        canvas.set_clear_color(teal);
        canvas.begin_frame();
        assert_eq!(canvas.clear_color(), teal);
    }

    #[test]
    fn set_camera_records_the_view_matrix() {
        let mut canvas = Canvas::new();
        let vp = Viewport::new(200.0, 100.0);
        let camera = Camera2D::centered_on(Vec2::new(100.0, 50.0));
        canvas.set_camera(&camera, vp);
        assert_eq!(canvas.camera_transform(), camera.view_matrix(vp));

        canvas.reset_camera();
        assert_eq!(canvas.camera_transform(), Affine::IDENTITY);
    }
}
