use crate::app::CanvasConfig;
use crate::backend::{CanvasHandle, Host, ListenerOptions, MouseHandler};
use crate::error::Error;
use crate::input::{MouseEventKind, MouseInput};
use crate::resize::{ResizeHandler, ResizeWatch};
use crate::size::CanvasSize;
use smallvec::SmallVec;

// move, down, up and the context menu
const MAX_LISTENERS_HINT: usize = 4;

/// Attaches the default handlers, which log every event, to the canvas `canvas_id`
/// and starts polling its size every 500ms.
pub fn attach_listener<H: Host>(host: &H, canvas_id: &str) -> Result<CanvasWatch<H>, Error> {
    listen(host, canvas_id).attach()
}

/// Returns a builder to customize the handlers before attaching them
pub fn listen<'a, H: Host>(host: &'a H, canvas_id: &str) -> ListenerBuilder<'a, H> {
    ListenerBuilder {
        host,
        config: CanvasConfig::default().canvas_id(canvas_id),
        mouse_move_cb: Box::new(|e: MouseInput| log::info!("mousemove {e:?}")),
        mouse_down_cb: Box::new(|e: MouseInput| log::info!("mouse down {e:?}")),
        mouse_up_cb: Box::new(|e: MouseInput| log::info!("mouse up {e:?}")),
        resize_cb: Box::new(|size: CanvasSize| log::info!("resize {size}")),
    }
}

pub struct ListenerBuilder<'a, H: Host> {
    host: &'a H,
    config: CanvasConfig,
    mouse_move_cb: MouseHandler,
    mouse_down_cb: MouseHandler,
    mouse_up_cb: MouseHandler,
    resize_cb: ResizeHandler,
}

impl<H: Host> ListenerBuilder<'_, H> {
    /// Replaces the whole configuration, including the canvas id
    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_mouse_move<F>(mut self, cb: F) -> Self
    where
        F: FnMut(MouseInput) + 'static,
    {
        self.mouse_move_cb = Box::new(cb);
        self
    }

    pub fn on_mouse_down<F>(mut self, cb: F) -> Self
    where
        F: FnMut(MouseInput) + 'static,
    {
        self.mouse_down_cb = Box::new(cb);
        self
    }

    pub fn on_mouse_up<F>(mut self, cb: F) -> Self
    where
        F: FnMut(MouseInput) + 'static,
    {
        self.mouse_up_cb = Box::new(cb);
        self
    }

    pub fn on_resize<F>(mut self, cb: F) -> Self
    where
        F: FnMut(CanvasSize) + 'static,
    {
        self.resize_cb = Box::new(cb);
        self
    }

    pub fn attach(self) -> Result<CanvasWatch<H>, Error> {
        let Self {
            host,
            config,
            mouse_move_cb,
            mouse_down_cb,
            mouse_up_cb,
            resize_cb,
        } = self;

        config.validate()?;
        let canvas = host.canvas(&config.canvas_id)?;

        let options = ListenerOptions {
            prevent_default: config.prevent_default,
            stop_propagation: config.stop_propagation,
        };

        // if something fails the listeners already added are dropped and removed
        let mut listeners = SmallVec::new();
        let handlers = [
            (MouseEventKind::Move, mouse_move_cb),
            (MouseEventKind::Down, mouse_down_cb),
            (MouseEventKind::Up, mouse_up_cb),
        ];
        for (kind, cb) in handlers {
            listeners.push(host.add_mouse_listener(&canvas, kind, options, cb)?);
        }

        if config.disable_context_menu {
            listeners.push(host.suppress_context_menu(&canvas)?);
        }

        let resize = if config.poll_resize {
            Some(ResizeWatch::start(
                host,
                &canvas,
                config.resize_interval,
                resize_cb,
            )?)
        } else {
            None
        };

        log::debug!(
            "Listening canvas '{}' ({})",
            config.canvas_id,
            canvas.size()
        );

        Ok(CanvasWatch {
            canvas,
            listeners,
            resize,
        })
    }
}

/// Keeps the canvas listeners and the resize polling alive.
/// Dropping it removes the listeners and stops the polling.
pub struct CanvasWatch<H: Host> {
    canvas: H::Canvas,
    listeners: SmallVec<H::Listener, MAX_LISTENERS_HINT>,
    resize: Option<ResizeWatch<H>>,
}

impl<H: Host> CanvasWatch<H> {
    pub fn canvas(&self) -> &H::Canvas {
        &self.canvas
    }

    /// Number of listeners registered on the canvas
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_polling(&self) -> bool {
        self.resize.as_ref().is_some_and(|r| r.is_active())
    }

    /// Last size seen by the resize polling, or the current size if it's disabled
    pub fn last_size(&self) -> CanvasSize {
        match &self.resize {
            Some(resize) => resize.last_size(),
            None => self.canvas.size(),
        }
    }

    /// Stops the resize polling, mouse listeners stay active
    pub fn stop_polling(&mut self) {
        if let Some(resize) = &mut self.resize {
            resize.stop();
        }
    }

    /// Removes every listener and stops the polling
    pub fn detach(self) {
        log::debug!("Detaching canvas '{}'", self.canvas.id());
    }

    /// Keeps everything registered until the page is closed
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessHost;
    use crate::input::MouseButton;
    use crate::math::vec2;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    fn counter() -> (Rc<Cell<usize>>, impl FnMut(MouseInput) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move |_| inner.set(inner.get() + 1))
    }

    #[test]
    fn test_one_handler_per_kind() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);

        let watch = attach_listener(&host, "main").unwrap();
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 1);
        assert_eq!(host.listener_count("main", MouseEventKind::Down), 1);
        assert_eq!(host.listener_count("main", MouseEventKind::Up), 1);
        assert_eq!(watch.listener_count(), 3);
        assert!(watch.is_polling());
        assert_eq!(host.interval_count(), 1);
    }

    #[test]
    fn test_each_dispatch_calls_its_handler_once() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);

        let (moves, on_move) = counter();
        let (downs, on_down) = counter();
        let (ups, on_up) = counter();
        let _watch = listen(&host, "main")
            .on_mouse_move(on_move)
            .on_mouse_down(on_down)
            .on_mouse_up(on_up)
            .attach()
            .unwrap();

        let input = MouseInput::new(vec2(10.0, 20.0));
        host.dispatch("main", MouseEventKind::Move, input);
        host.dispatch("main", MouseEventKind::Move, input);
        host.dispatch("main", MouseEventKind::Down, input);
        host.dispatch("main", MouseEventKind::Up, input);

        assert_eq!(moves.get(), 2);
        assert_eq!(downs.get(), 1);
        assert_eq!(ups.get(), 1);
    }

    #[test]
    fn test_handler_receives_input() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);

        let received = Rc::new(RefCell::new(None));
        let inner = received.clone();
        let _watch = listen(&host, "main")
            .on_mouse_down(move |e| *inner.borrow_mut() = Some(e))
            .attach()
            .unwrap();

        let input = MouseInput::new(vec2(3.0, 4.0)).with_button(MouseButton::Right);
        host.dispatch("main", MouseEventKind::Down, input);
        assert_eq!(*received.borrow(), Some(input));
    }

    #[test]
    fn test_resize_callback() {
        let host = HeadlessHost::new();
        let canvas = host.add_canvas("main", 300, 150);

        let sizes = Rc::new(RefCell::new(vec![]));
        let inner = sizes.clone();
        let watch = listen(&host, "main")
            .on_resize(move |size| inner.borrow_mut().push(size))
            .attach()
            .unwrap();

        host.advance(Duration::from_millis(500));
        assert!(sizes.borrow().is_empty());

        canvas.set_size(1280, 720);
        host.advance(Duration::from_millis(500));
        assert_eq!(*sizes.borrow(), [CanvasSize::new(1280, 720)]);
        assert_eq!(watch.last_size(), CanvasSize::new(1280, 720));
    }

    #[test]
    fn test_missing_element() {
        let host = HeadlessHost::new();
        let res = attach_listener(&host, "nope");
        assert!(matches!(res, Err(Error::NotFound(id)) if id == "nope"));
        assert_eq!(host.interval_count(), 0);
    }

    #[test]
    fn test_wrong_element_kind() {
        let host = HeadlessHost::new();
        host.add_element("main", "div");
        let res = attach_listener(&host, "main");
        assert!(matches!(res, Err(Error::NotACanvas { tag, .. }) if tag == "div"));
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 0);
    }

    #[test]
    fn test_failed_listener_removes_previous_ones() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);
        host.refuse_listener(MouseEventKind::Up);

        let res = attach_listener(&host, "main");
        assert!(matches!(res, Err(Error::Listener { event: "mouseup", .. })));
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 0);
        assert_eq!(host.listener_count("main", MouseEventKind::Down), 0);
        assert_eq!(host.listener_count("main", MouseEventKind::Up), 0);
        assert_eq!(host.interval_count(), 0);
    }

    #[test]
    fn test_failed_timer_removes_listeners() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);
        host.refuse_intervals(true);

        let res = listen(&host, "main")
            .with_config(
                CanvasConfig::default()
                    .canvas_id("main")
                    .disable_context_menu(true),
            )
            .attach();
        assert!(matches!(res, Err(Error::Timer(_))));
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 0);
        assert_eq!(host.listener_count("main", MouseEventKind::Down), 0);
        assert!(!host.is_context_menu_suppressed("main"));
    }

    #[test]
    fn test_invalid_config_registers_nothing() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);
        let res = listen(&host, "main")
            .with_config(
                CanvasConfig::default()
                    .canvas_id("main")
                    .resize_interval(Duration::ZERO),
            )
            .attach();

        assert!(matches!(res, Err(Error::InvalidInterval)));
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 0);
    }

    #[test]
    fn test_config_options() {
        let host = HeadlessHost::new();
        host.add_canvas("game", 300, 150);
        let config = CanvasConfig::default()
            .canvas_id("game")
            .prevent_default(true)
            .disable_context_menu(true)
            .poll_resize(false);

        let watch = listen(&host, "ignored")
            .with_config(config)
            .attach()
            .unwrap();
        assert_eq!(watch.listener_count(), 4);
        assert!(host.is_context_menu_suppressed("game"));
        assert!(!watch.is_polling());
        assert_eq!(host.interval_count(), 0);
        assert_eq!(
            host.listener_options("game", MouseEventKind::Up),
            [ListenerOptions {
                prevent_default: true,
                stop_propagation: false
            }]
        );
    }

    #[test]
    fn test_stop_polling_keeps_mouse_listeners() {
        let host = HeadlessHost::new();
        host.add_canvas("main", 300, 150);
        let (moves, on_move) = counter();
        let mut watch = listen(&host, "main")
            .on_mouse_move(on_move)
            .attach()
            .unwrap();

        watch.stop_polling();
        assert!(!watch.is_polling());
        assert_eq!(host.interval_count(), 0);

        host.dispatch("main", MouseEventKind::Move, MouseInput::default());
        assert_eq!(moves.get(), 1);
    }

    #[test]
    fn test_detach_removes_everything() {
        let host = HeadlessHost::new();
        let canvas = host.add_canvas("main", 300, 150);
        let (moves, on_move) = counter();
        let resized = Rc::new(Cell::new(false));
        let inner = resized.clone();
        let watch = listen(&host, "main")
            .on_mouse_move(on_move)
            .on_resize(move |_| inner.set(true))
            .attach()
            .unwrap();

        watch.detach();
        assert_eq!(host.listener_count("main", MouseEventKind::Move), 0);
        assert_eq!(host.interval_count(), 0);

        host.dispatch("main", MouseEventKind::Move, MouseInput::default());
        canvas.set_size(1, 1);
        host.advance(Duration::from_secs(1));
        assert_eq!(moves.get(), 0);
        assert!(!resized.get());
    }

    #[test]
    fn test_forget_keeps_everything() {
        let host = HeadlessHost::new();
        let canvas = host.add_canvas("main", 300, 150);
        let resized = Rc::new(Cell::new(0));
        let inner = resized.clone();
        listen(&host, "main")
            .on_resize(move |_| inner.set(inner.get() + 1))
            .attach()
            .unwrap()
            .forget();

        assert_eq!(host.listener_count("main", MouseEventKind::Down), 1);
        canvas.set_size(1, 1);
        host.advance(Duration::from_millis(500));
        assert_eq!(resized.get(), 1);
    }
}
