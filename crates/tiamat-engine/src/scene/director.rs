use crate::canvas::Canvas;

use super::{Scene, SceneCtx};

/// Owns the active scene and runs its lifecycle.
///
/// The initial scene is loaded lazily on the first update, once a real
/// viewport exists; transitions and shutdown unload eagerly.
pub struct Director {
    current: Box<dyn Scene>,
    loaded: bool,
}

impl Director {
    pub fn new(initial: Box<dyn Scene>) -> Self {
        Self {
            current: initial,
            loaded: false,
        }
    }

    pub fn scene_name(&self) -> &str {
        self.current.name()
    }

    /// Runs the per-frame update, loading the scene first if needed.
    pub fn update(&mut self, ctx: &mut SceneCtx<'_>, dt: f32) {
        self.ensure_loaded(ctx);
        self.current.update(ctx, dt);
    }

    /// Runs the per-frame draw.
    pub fn draw(&mut self, ctx: &mut SceneCtx<'_>, canvas: &mut Canvas) {
        self.ensure_loaded(ctx);
        self.current.draw(ctx, canvas);
    }

    /// Replaces the active scene: unloads the old one, loads the new one.
    pub fn replace(&mut self, ctx: &mut SceneCtx<'_>, next: Box<dyn Scene>) {
        if self.loaded {
            self.current.unload(ctx);
            log::info!("{} scene unloaded", self.current.name());
        }

        self.current = next;
        self.loaded = true;
        self.current.load(ctx);
        log::info!("{} scene loaded", self.current.name());
    }

    /// Unloads the active scene; called once on shutdown.
    pub fn shutdown(&mut self, ctx: &mut SceneCtx<'_>) {
        if self.loaded {
            self.loaded = false;
            self.current.unload(ctx);
            log::info!("{} scene unloaded", self.current.name());
        }
    }

    fn ensure_loaded(&mut self, ctx: &mut SceneCtx<'_>) {
        if !self.loaded {
            self.loaded = true;
            self.current.load(ctx);
            log::info!("{} scene loaded", self.current.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::input::InputState;
    use crate::time::Tick;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        tag: &'static str,
        log: Log,
    }

    impl Recording {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self {
                tag,
                log: Rc::clone(log),
            }
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.tag, what));
        }
    }

    impl Scene for Recording {
        fn name(&self) -> &str {
            self.tag
        }

        fn load(&mut self, _ctx: &mut SceneCtx<'_>) {
            self.record("load");
        }

        fn update(&mut self, _ctx: &mut SceneCtx<'_>, _dt: f32) {
            self.record("update");
        }

        fn draw(&mut self, _ctx: &mut SceneCtx<'_>, _canvas: &mut Canvas) {
            self.record("draw");
        }

        fn unload(&mut self, _ctx: &mut SceneCtx<'_>) {
            self.record("unload");
        }
    }

    fn ctx(input: &InputState) -> SceneCtx<'_> {
        SceneCtx::new(Viewport::new(640.0, 480.0), input, Tick { dt: 0.016, frame: 0 })
    }

    #[test]
    fn load_runs_once_before_first_update() {
        let log: Log = Default::default();
        let input = InputState::default();
        let mut director = Director::new(Box::new(Recording::new("a", &log)));

        let mut c = ctx(&input);
        director.update(&mut c, 0.016);
        director.update(&mut c, 0.016);

        assert_eq!(*log.borrow(), vec!["a:load", "a:update", "a:update"]);
    }

    #[test]
    fn replace_unloads_old_then_loads_new() {
        let log: Log = Default::default();
        let input = InputState::default();
        let mut director = Director::new(Box::new(Recording::new("a", &log)));

        let mut c = ctx(&input);
        director.update(&mut c, 0.016);
        director.replace(&mut c, Box::new(Recording::new("b", &log)));
        director.update(&mut c, 0.016);

        assert_eq!(
            *log.borrow(),
            vec!["a:load", "a:update", "a:unload", "b:load", "b:update"]
        );
    }

    #[test]
    fn shutdown_unloads_exactly_once() {
        let log: Log = Default::default();
        let input = InputState::default();
        let mut director = Director::new(Box::new(Recording::new("a", &log)));

        let mut c = ctx(&input);
        director.update(&mut c, 0.016);
        director.shutdown(&mut c);
        director.shutdown(&mut c);

        assert_eq!(*log.borrow(), vec!["a:load", "a:update", "a:unload"]);
    }

    #[test]
    fn draw_follows_update_within_a_frame() {
        let log: Log = Default::default();
        let input = InputState::default();
        let mut director = Director::new(Box::new(Recording::new("a", &log)));

        let mut c = ctx(&input);
        let mut canvas = Canvas::new();
        director.update(&mut c, 0.016);
        director.draw(&mut c, &mut canvas);

        assert_eq!(*log.borrow(), vec!["a:load", "a:update", "a:draw"]);
    }
}
