//! Tiamat sandbox: a small world of tiles with a pulsing beacon.
//!
//! Controls:
//! - WASD / arrows: pan the camera
//! - Q / E: rotate
//! - mouse wheel: zoom
//! - Space: pause/resume the beacon timer
//! - Enter: switch to the title scene and back
//! - Escape: quit

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use tiamat_engine::camera::Camera2D;
use tiamat_engine::canvas::{Canvas, ZIndex};
use tiamat_engine::coords::{Rect, Vec2};
use tiamat_engine::input::Key;
use tiamat_engine::logging::{init_logging, LoggingConfig};
use tiamat_engine::paint::Color;
use tiamat_engine::scene::{Scene, SceneCtx};
use tiamat_engine::time::Timer;
use tiamat_engine::window::{Runtime, RuntimeConfig};

const PAN_SPEED: f32 = 400.0; // world units / s
const TURN_SPEED: f32 = 90.0; // degrees / s
const TILE: f32 = 80.0;
const WORLD_TILES: i32 = 24;

struct WorldScene {
    camera: Camera2D,
    beacon: Timer,
    beacon_lit: Rc<Cell<bool>>,
    beats: u64,
}

impl WorldScene {
    fn new() -> Result<Self> {
        let beacon_lit = Rc::new(Cell::new(true));

        let mut beacon = Timer::new(0.75, false)?;
        let lit = Rc::clone(&beacon_lit);
        beacon.on_timeout(move || lit.set(!lit.get()));

        Ok(Self {
            camera: Camera2D::centered_on(Vec2::zero()),
            beacon,
            beacon_lit,
            beats: 0,
        })
    }
}

impl Scene for WorldScene {
    fn name(&self) -> &str {
        "world"
    }

    fn load(&mut self, _ctx: &mut SceneCtx<'_>) {
        self.beacon.start();
    }

    fn update(&mut self, ctx: &mut SceneCtx<'_>, dt: f32) {
        if ctx.input.key_pressed(Key::Escape) {
            ctx.exit();
            return;
        }
        if ctx.input.key_pressed(Key::Enter) {
            ctx.switch_to(TitleScene::new());
            return;
        }

        let mut pan = Vec2::zero();
        if ctx.input.key_down(Key::A) || ctx.input.key_down(Key::ArrowLeft) {
            pan.x -= 1.0;
        }
        if ctx.input.key_down(Key::D) || ctx.input.key_down(Key::ArrowRight) {
            pan.x += 1.0;
        }
        if ctx.input.key_down(Key::W) || ctx.input.key_down(Key::ArrowUp) {
            pan.y -= 1.0;
        }
        if ctx.input.key_down(Key::S) || ctx.input.key_down(Key::ArrowDown) {
            pan.y += 1.0;
        }
        // Pan in world units so movement speed is zoom-independent.
        self.camera.position = self.camera.position + pan * (PAN_SPEED * dt / self.camera.zoom());

        if ctx.input.key_down(Key::Q) {
            self.camera.rotation -= TURN_SPEED * dt;
        }
        if ctx.input.key_down(Key::E) {
            self.camera.rotation += TURN_SPEED * dt;
        }

        let wheel = ctx.input.wheel();
        if wheel != 0.0 {
            let zoom = (self.camera.zoom() * (1.0 + wheel * 0.1)).clamp(0.1, 10.0);
            if self.camera.set_zoom(zoom).is_err() {
                log::warn!("ignoring degenerate zoom {zoom}");
            }
        }

        if ctx.input.key_pressed(Key::Space) {
            if self.beacon.is_paused() {
                self.beacon.start();
            } else {
                self.beacon.stop();
            }
        }

        let was_lit = self.beacon_lit.get();
        self.beacon.update(dt);
        if self.beacon_lit.get() != was_lit {
            self.beats += 1;
            log::debug!("beacon toggled ({} beats)", self.beats);
        }
    }

    fn draw(&mut self, ctx: &mut SceneCtx<'_>, canvas: &mut Canvas) {
        canvas.set_clear_color(Color::from_u8(16, 18, 24, 255));
        canvas.set_camera(&self.camera, ctx.viewport);

        // Tile field, coarse-culled against the camera's view rectangle.
        let visible = self.camera.bounding_rect(ctx.viewport);
        for ix in -WORLD_TILES..WORLD_TILES {
            for iy in -WORLD_TILES..WORLD_TILES {
                let tile = Rect::new(ix as f32 * TILE, iy as f32 * TILE, TILE - 6.0, TILE - 6.0);
                if !visible.overlaps(tile) {
                    continue;
                }

                let shade = if (ix + iy).rem_euclid(2) == 0 { 0.16 } else { 0.22 };
                canvas.push_rect(ZIndex(0), tile, Color::rgb(shade, shade, shade + 0.04));
            }
        }

        // The beacon sits at the world origin.
        let beacon_color = if self.beacon_lit.get() {
            Color::from_u8(255, 170, 60, 255)
        } else {
            Color::from_u8(90, 60, 30, 255)
        };
        canvas.push_circle(ZIndex(2), Vec2::zero(), 28.0, beacon_color);
        canvas.push_circle(ZIndex(1), Vec2::zero(), 40.0, beacon_color.with_alpha(0.25));
    }

    fn unload(&mut self, _ctx: &mut SceneCtx<'_>) {
        self.beacon.stop();
    }
}

/// Minimal second scene, mostly here to exercise scene switching.
struct TitleScene {
    blink: Timer,
    visible: Rc<Cell<bool>>,
}

impl TitleScene {
    fn new() -> Self {
        let visible = Rc::new(Cell::new(true));

        let mut blink = Timer::new(0.5, false).expect("0.5s is a valid wait time");
        let shown = Rc::clone(&visible);
        blink.on_timeout(move || shown.set(!shown.get()));

        Self { blink, visible }
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &str {
        "title"
    }

    fn load(&mut self, _ctx: &mut SceneCtx<'_>) {
        self.blink.start();
    }

    fn update(&mut self, ctx: &mut SceneCtx<'_>, dt: f32) {
        if ctx.input.key_pressed(Key::Escape) {
            ctx.exit();
            return;
        }
        if ctx.input.key_pressed(Key::Enter) {
            match WorldScene::new() {
                Ok(world) => ctx.switch_to(world),
                Err(err) => log::error!("failed to build world scene: {err:#}"),
            }
            return;
        }

        self.blink.update(dt);
    }

    fn draw(&mut self, ctx: &mut SceneCtx<'_>, canvas: &mut Canvas) {
        canvas.set_clear_color(Color::from_u8(8, 8, 12, 255));

        // Screen-space drawing: no camera set this frame.
        let center = ctx.viewport.half();
        canvas.push_rect(
            ZIndex(0),
            Rect::from_center_size(center, Vec2::new(360.0, 120.0)),
            Color::rgb(0.12, 0.14, 0.2),
        );
        if self.visible.get() {
            canvas.push_rect(
                ZIndex(1),
                Rect::from_center_size(center, Vec2::new(24.0, 24.0)),
                Color::from_u8(255, 170, 60, 255),
            );
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "tiamat sandbox".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Box::new(WorldScene::new()?))
}
