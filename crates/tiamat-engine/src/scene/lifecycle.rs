use crate::canvas::Canvas;
use crate::coords::Viewport;
use crate::input::InputState;
use crate::time::Tick;

/// Scene contract implemented by game code.
///
/// Lifecycle order, per scene instance:
/// `load` once → (`update` then `draw`) every frame → `unload` once.
pub trait Scene {
    /// Name used in lifecycle logs.
    fn name(&self) -> &str {
        "scene"
    }

    /// Called once before the scene's first update.
    fn load(&mut self, ctx: &mut SceneCtx<'_>) {
        let _ = ctx;
    }

    /// Called once per frame with the frame delta in seconds.
    fn update(&mut self, ctx: &mut SceneCtx<'_>, dt: f32);

    /// Called once per frame after `update`; records draw commands.
    fn draw(&mut self, ctx: &mut SceneCtx<'_>, canvas: &mut Canvas);

    /// Called when the scene is replaced or the application shuts down.
    fn unload(&mut self, ctx: &mut SceneCtx<'_>) {
        let _ = ctx;
    }
}

/// Request a scene can make of the runtime.
///
/// Commands are buffered and applied after the current callback returns,
/// so a scene never observes itself being torn down mid-frame.
pub enum SceneCommand {
    Switch(Box<dyn Scene>),
    Exit,
}

/// Per-frame context passed to every [`Scene`] callback.
pub struct SceneCtx<'a> {
    /// Current viewport size in logical pixels.
    pub viewport: Viewport,

    /// Input facade for this window.
    pub input: &'a InputState,

    /// Timing snapshot for this frame.
    pub time: Tick,

    commands: Vec<SceneCommand>,
}

impl<'a> SceneCtx<'a> {
    pub fn new(viewport: Viewport, input: &'a InputState, time: Tick) -> Self {
        Self {
            viewport,
            input,
            time,
            commands: Vec::new(),
        }
    }

    /// Requests a transition to `scene` at the end of the frame.
    pub fn switch_to<S>(&mut self, scene: S)
    where
        S: Scene + 'static,
    {
        self.commands.push(SceneCommand::Switch(Box::new(scene)));
    }

    /// Requests application shutdown at the end of the frame.
    pub fn exit(&mut self) {
        self.commands.push(SceneCommand::Exit);
    }

    pub(crate) fn drain_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }
}
