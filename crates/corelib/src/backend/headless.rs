use super::{CanvasHandle, Host, ListenerOptions, MouseHandler, TickHandler};
use crate::error::Error;
use crate::input::{MouseEventKind, MouseInput};
use crate::size::CanvasSize;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

const DISPATCH_HINT: usize = 4;

type SharedMouseHandler = Rc<RefCell<MouseHandler>>;
type SharedTickHandler = Rc<RefCell<TickHandler>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ListenerKind {
    Mouse(MouseEventKind),
    ContextMenu,
}

struct ListenerEntry {
    element: String,
    kind: ListenerKind,
    options: ListenerOptions,
    handler: Option<SharedMouseHandler>,
}

struct IntervalEntry {
    period: Duration,
    due: Duration,
    tick: SharedTickHandler,
}

enum Element {
    Canvas(HeadlessCanvas),
    Other { tag: String },
}

#[derive(Default)]
struct HeadlessState {
    elements: FxHashMap<String, Element>,
    listeners: FxHashMap<u64, ListenerEntry>,
    intervals: FxHashMap<u64, IntervalEntry>,
    refused: FxHashSet<MouseEventKind>,
    refuse_intervals: bool,
    next_id: u64,
    now: Duration,
}

impl HeadlessState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory host with a virtual clock.
/// Events are simulated with [`HeadlessHost::dispatch`] and timers
/// only run when [`HeadlessHost::advance`] is called.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a canvas element, replacing any element with the same id
    pub fn add_canvas(&self, id: &str, width: u32, height: u32) -> HeadlessCanvas {
        let canvas = HeadlessCanvas {
            id: id.to_string(),
            size: Rc::new(Cell::new(CanvasSize::new(width, height))),
        };
        self.state
            .borrow_mut()
            .elements
            .insert(id.to_string(), Element::Canvas(canvas.clone()));
        canvas
    }

    /// Adds a non canvas element like `div` or `img`
    pub fn add_element(&self, id: &str, tag: &str) {
        self.state.borrow_mut().elements.insert(
            id.to_string(),
            Element::Other {
                tag: tag.to_string(),
            },
        );
    }

    /// Invokes every listener of `kind` registered on the element, returns how many ran
    pub fn dispatch(&self, id: &str, kind: MouseEventKind, input: MouseInput) -> usize {
        let handlers = {
            let state = self.state.borrow();
            let mut list = state
                .listeners
                .iter()
                .filter(|(_, l)| l.element == id && l.kind == ListenerKind::Mouse(kind))
                .filter_map(|(lid, l)| l.handler.clone().map(|h| (*lid, h)))
                .collect::<SmallVec<(u64, SharedMouseHandler), DISPATCH_HINT>>();

            // registration order
            list.sort_by_key(|(lid, _)| *lid);
            list
        };

        handlers
            .iter()
            .filter(|(lid, handler)| match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (*handler)(input);
                    true
                }
                Err(_) => {
                    log::warn!("Skipping re-entrant '{}' dispatch for listener {lid}", kind.name());
                    false
                }
            })
            .count()
    }

    /// Makes the next registrations of `kind` fail, like a browser throwing on `addEventListener`
    pub fn refuse_listener(&self, kind: MouseEventKind) {
        self.state.borrow_mut().refused.insert(kind);
    }

    /// Makes `set_interval` fail while `refuse` is true
    pub fn refuse_intervals(&self, refuse: bool) {
        self.state.borrow_mut().refuse_intervals = refuse;
    }

    /// Number of listeners of `kind` registered on the element
    pub fn listener_count(&self, id: &str, kind: MouseEventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|l| l.element == id && l.kind == ListenerKind::Mouse(kind))
            .count()
    }

    /// Options used by the listeners of `kind` on the element
    pub fn listener_options(&self, id: &str, kind: MouseEventKind) -> Vec<ListenerOptions> {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|l| l.element == id && l.kind == ListenerKind::Mouse(kind))
            .map(|l| l.options)
            .collect()
    }

    pub fn is_context_menu_suppressed(&self, id: &str) -> bool {
        self.state
            .borrow()
            .listeners
            .values()
            .any(|l| l.element == id && l.kind == ListenerKind::ContextMenu)
    }

    /// Number of active intervals
    pub fn interval_count(&self) -> usize {
        self.state.borrow().intervals.len()
    }

    /// Virtual time elapsed since the host was created
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Moves the clock forward running every interval due on the way,
    /// in deadline order. An interval runs once per elapsed period.
    pub fn advance(&self, delta: Duration) {
        let target = self.state.borrow().now + delta;

        loop {
            let next = {
                let state = self.state.borrow();
                state
                    .intervals
                    .iter()
                    .filter(|(_, i)| i.due <= target)
                    .min_by_key(|(id, i)| (i.due, **id))
                    .map(|(id, i)| (*id, i.due, i.tick.clone()))
            };

            let Some((id, due, tick)) = next else {
                break;
            };

            {
                let mut state = self.state.borrow_mut();
                state.now = due;
                if let Some(interval) = state.intervals.get_mut(&id) {
                    interval.due += interval.period;
                }
            }

            match tick.try_borrow_mut() {
                Ok(mut tick) => (*tick)(),
                Err(_) => log::warn!("Skipping re-entrant tick for interval {id}"),
            }
        }

        self.state.borrow_mut().now = target;
    }

    fn insert_listener(&self, entry: ListenerEntry) -> HeadlessListener {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.listeners.insert(id, entry);
        HeadlessListener {
            state: Rc::downgrade(&self.state),
            id,
        }
    }
}

impl Host for HeadlessHost {
    type Canvas = HeadlessCanvas;
    type Listener = HeadlessListener;
    type Interval = HeadlessInterval;

    fn canvas(&self, id: &str) -> Result<Self::Canvas, Error> {
        match self.state.borrow().elements.get(id) {
            Some(Element::Canvas(canvas)) => Ok(canvas.clone()),
            Some(Element::Other { tag }) => Err(Error::NotACanvas {
                id: id.to_string(),
                tag: tag.clone(),
            }),
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    fn add_mouse_listener(
        &self,
        canvas: &Self::Canvas,
        kind: MouseEventKind,
        options: ListenerOptions,
        handler: MouseHandler,
    ) -> Result<Self::Listener, Error> {
        if self.state.borrow().refused.contains(&kind) {
            return Err(Error::Listener {
                event: kind.name(),
                reason: "refused by the host".to_string(),
            });
        }

        Ok(self.insert_listener(ListenerEntry {
            element: canvas.id.clone(),
            kind: ListenerKind::Mouse(kind),
            options,
            handler: Some(Rc::new(RefCell::new(handler))),
        }))
    }

    fn suppress_context_menu(&self, canvas: &Self::Canvas) -> Result<Self::Listener, Error> {
        Ok(self.insert_listener(ListenerEntry {
            element: canvas.id.clone(),
            kind: ListenerKind::ContextMenu,
            options: ListenerOptions {
                prevent_default: true,
                stop_propagation: false,
            },
            handler: None,
        }))
    }

    fn set_interval(&self, period: Duration, tick: TickHandler) -> Result<Self::Interval, Error> {
        if period.is_zero() {
            return Err(Error::Timer("the period must be greater than zero".to_string()));
        }

        let mut state = self.state.borrow_mut();
        if state.refuse_intervals {
            return Err(Error::Timer("refused by the host".to_string()));
        }

        let id = state.next_id();
        let due = state.now + period;
        state.intervals.insert(
            id,
            IntervalEntry {
                period,
                due,
                tick: Rc::new(RefCell::new(tick)),
            },
        );

        Ok(HeadlessInterval {
            state: Rc::downgrade(&self.state),
            id,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HeadlessCanvas {
    id: String,
    size: Rc<Cell<CanvasSize>>,
}

impl HeadlessCanvas {
    /// Changes the size, like setting `canvas.width` and `canvas.height`
    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set(CanvasSize::new(width, height));
    }
}

impl CanvasHandle for HeadlessCanvas {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn size(&self) -> CanvasSize {
        self.size.get()
    }
}

pub struct HeadlessListener {
    state: Weak<RefCell<HeadlessState>>,
    id: u64,
}

impl Drop for HeadlessListener {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        // the handler is dropped once the state is released
        let entry = state.borrow_mut().listeners.remove(&self.id);
        drop(entry);
    }
}

pub struct HeadlessInterval {
    state: Weak<RefCell<HeadlessState>>,
    id: u64,
}

impl Drop for HeadlessInterval {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        let entry = state.borrow_mut().intervals.remove(&self.id);
        drop(entry);
    }
}
