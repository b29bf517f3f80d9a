mod utils;

use super::{CanvasHandle, Host, ListenerOptions, MouseHandler, TickHandler};
use crate::error::Error;
use crate::input::{MouseButton, MouseEventKind, MouseInput, client_to_canvas, scale_movement};
use crate::math::vec2;
use crate::size::CanvasSize;
use std::time::Duration;
use utils::{add_event_listener, canvas_rect, remove_event_listener, set_interval};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event as WebEvent, EventTarget, HtmlCanvasElement, MouseEvent, Window};

const CONTEXT_MENU: &str = "contextmenu";

/// Browser host backed by the global `window` and `document`
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window()
            .ok_or_else(|| Error::HostUnavailable("Can't access window dom object.".to_string()))?;
        let document = window.document().ok_or_else(|| {
            Error::HostUnavailable("Can't access document dom object.".to_string())
        })?;

        Ok(Self { window, document })
    }
}

impl Host for WebHost {
    type Canvas = WebCanvas;
    type Listener = WebListener;
    type Interval = WebInterval;

    fn canvas(&self, id: &str) -> Result<Self::Canvas, Error> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let tag = element.tag_name().to_lowercase();
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::NotACanvas {
                id: id.to_string(),
                tag,
            })?;

        Ok(WebCanvas(canvas))
    }

    fn add_mouse_listener(
        &self,
        canvas: &Self::Canvas,
        kind: MouseEventKind,
        options: ListenerOptions,
        mut handler: MouseHandler,
    ) -> Result<Self::Listener, Error> {
        let name = kind.name();
        let el = canvas.0.clone();
        let closure = add_event_listener(&canvas.0, name, move |e: MouseEvent| {
            if options.stop_propagation {
                e.stop_propagation();
            }
            if options.prevent_default {
                e.prevent_default();
            }

            handler(mouse_input(&el, &e));
        })
        .map_err(|reason| Error::Listener {
            event: name,
            reason,
        })?;

        Ok(WebListener {
            target: canvas.0.clone().into(),
            name,
            closure: ListenerClosure::Mouse(closure),
        })
    }

    fn suppress_context_menu(&self, canvas: &Self::Canvas) -> Result<Self::Listener, Error> {
        let closure = add_event_listener(&canvas.0, CONTEXT_MENU, |e: WebEvent| {
            e.prevent_default();
        })
        .map_err(|reason| Error::Listener {
            event: CONTEXT_MENU,
            reason,
        })?;

        Ok(WebListener {
            target: canvas.0.clone().into(),
            name: CONTEXT_MENU,
            closure: ListenerClosure::Plain(closure),
        })
    }

    fn set_interval(&self, period: Duration, tick: TickHandler) -> Result<Self::Interval, Error> {
        let ms = i32::try_from(period.as_millis()).unwrap_or(i32::MAX).max(1);
        let closure = Closure::wrap(tick);
        let id = set_interval(&self.window, ms, &closure).map_err(Error::Timer)?;

        Ok(WebInterval {
            window: self.window.clone(),
            id,
            _closure: closure,
        })
    }
}

fn mouse_input(canvas: &HtmlCanvasElement, e: &MouseEvent) -> MouseInput {
    let rect = canvas_rect(canvas);
    let size = CanvasSize::new(canvas.width(), canvas.height());
    let client = vec2(e.client_x() as _, e.client_y() as _);
    let movement = vec2(e.movement_x() as _, e.movement_y() as _);

    MouseInput {
        position: client_to_canvas(client, rect, size),
        movement: scale_movement(movement, rect, size),
        button: MouseButton::from_dom(e.button()),
    }
}

#[derive(Clone, Debug)]
pub struct WebCanvas(HtmlCanvasElement);

impl WebCanvas {
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.0
    }
}

impl CanvasHandle for WebCanvas {
    fn id(&self) -> String {
        self.0.id()
    }

    fn size(&self) -> CanvasSize {
        CanvasSize::new(self.0.width(), self.0.height())
    }
}

enum ListenerClosure {
    Mouse(Closure<dyn FnMut(MouseEvent)>),
    Plain(Closure<dyn FnMut(WebEvent)>),
}

/// Registered listener, removed from the element on drop
pub struct WebListener {
    target: EventTarget,
    name: &'static str,
    closure: ListenerClosure,
}

impl Drop for WebListener {
    fn drop(&mut self) {
        match &self.closure {
            ListenerClosure::Mouse(closure) => remove_event_listener(&self.target, self.name, closure),
            ListenerClosure::Plain(closure) => remove_event_listener(&self.target, self.name, closure),
        }
    }
}

/// Running `setInterval`, cleared on drop
pub struct WebInterval {
    window: Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for WebInterval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}
