use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::canvas::Canvas;
use crate::coords::{Vec2, Viewport};
use crate::device::{Gpu, GpuOptions, SurfaceErrorAction};
use crate::input::{InputState, Key, MouseButton};
use crate::render::{FlatRenderer, RenderCtx, RenderTarget};
use crate::scene::{Director, Scene, SceneCommand, SceneCtx};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tiamat".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            gpu: GpuOptions::default(),
        }
    }
}

/// Entry point for the runtime.
///
/// Blocks on the platform event loop until the scene requests exit or the
/// window is closed; the active scene is unloaded before this returns.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig, initial_scene: Box<dyn Scene>) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut shell = Shell::new(config, initial_scene);

        event_loop
            .run_app(&mut shell)
            .context("winit event loop terminated with error")?;

        match shell.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Application state driven by the winit event loop.
struct Shell {
    config: RuntimeConfig,

    director: Director,
    input: InputState,
    clock: FrameClock,
    canvas: Canvas,
    renderer: FlatRenderer,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,

    last_viewport: Viewport,
    exiting: bool,
    fatal: Option<anyhow::Error>,
}

impl Shell {
    fn new(config: RuntimeConfig, initial_scene: Box<dyn Scene>) -> Self {
        Self {
            config,
            director: Director::new(initial_scene),
            input: InputState::default(),
            clock: FrameClock::new(),
            canvas: Canvas::new(),
            renderer: FlatRenderer::new(),
            window: None,
            gpu: None,
            last_viewport: Viewport::default(),
            exiting: false,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), self.config.gpu.clone()))
            .context("GPU initialization failed")?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.clock.reset();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.exiting = true;
        event_loop.exit();
    }

    /// Unloads the scene and leaves the event loop. Safe to call twice.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exiting {
            self.exiting = true;
            let mut ctx = SceneCtx::new(
                self.last_viewport,
                &self.input,
                self.clock.tick(),
            );
            self.director.shutdown(&mut ctx);
        }
        event_loop.exit();
    }

    fn logical_viewport(&self) -> Viewport {
        match &self.window {
            Some(window) => {
                let scale = window.scale_factor();
                let logical: LogicalSize<f64> = window.inner_size().to_logical(scale);
                Viewport::new(logical.width as f32, logical.height as f32)
            }
            None => Viewport::default(),
        }
    }

    /// Runs one frame: tick, update, draw, render, then apply scene
    /// commands at the frame boundary.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting || self.gpu.is_none() {
            return;
        }

        let viewport = self.logical_viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to draw and no surface to configure.
            return;
        }
        self.last_viewport = viewport;

        let tick = self.clock.tick();

        let commands = {
            let mut ctx = SceneCtx::new(viewport, &self.input, tick);
            self.director.update(&mut ctx, tick.dt);

            self.canvas.begin_frame();
            self.director.draw(&mut ctx, &mut self.canvas);
            ctx.drain_commands()
        };

        self.input.end_frame();
        self.render(event_loop, viewport);

        for command in commands {
            match command {
                SceneCommand::Switch(next) => {
                    let mut ctx = SceneCtx::new(viewport, &self.input, tick);
                    self.director.replace(&mut ctx, next);
                }
                SceneCommand::Exit => {
                    self.shutdown(event_loop);
                    return;
                }
            }
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop, viewport: Viewport) {
        let Some(gpu) = self.gpu.as_mut() else { return };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                if gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    self.fail(event_loop, anyhow::anyhow!("unrecoverable surface loss"));
                }
                return;
            }
        };

        let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);

        // RenderTarget borrows the encoder; dropped before submit takes the frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.renderer.render(&rctx, &mut target, &mut self.canvas);
        }

        if let Some(window) = &self.window {
            window.pre_present_notify();
        }
        gpu.submit(frame);
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        // Continuous redraw: scenes are simulations, not invalidation-driven UI.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(gpu), Some(new_size)) = (self.gpu.as_mut(), new_size) {
                    gpu.resize(new_size);
                }
            }

            WindowEvent::Focused(focused) => {
                self.input.on_focus_changed(focused);
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let logical = position.to_logical::<f64>(window.scale_factor());
                    self.input
                        .on_pointer_moved(Vec2::new(logical.x as f32, logical.y as f32));
                }
            }

            WindowEvent::CursorLeft { .. } => {
                self.input.on_pointer_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(button);
                match state {
                    ElementState::Pressed => self.input.on_button_down(button),
                    ElementState::Released => self.input.on_button_up(button),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    // Pixel deltas (touchpads) are normalized to line units.
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 16.0,
                };
                self.input.on_wheel(lines);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                match event.state {
                    ElementState::Pressed => self.input.on_key_down(key),
                    ElementState::Released => self.input.on_key_up(key),
                }
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        other => Key::Unknown(other as u32),
    }
}
