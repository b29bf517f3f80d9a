//! Hosts are the boundary with the environment running the canvas:
//! element lookup, event registration and timers.

mod headless;
#[cfg(target_arch = "wasm32")]
mod web;

pub use headless::*;

#[cfg(target_arch = "wasm32")]
pub use web::*;

use crate::error::Error;
use crate::input::{MouseEventKind, MouseInput};
use crate::size::CanvasSize;
use std::time::Duration;

pub type MouseHandler = Box<dyn FnMut(MouseInput)>;
pub type TickHandler = Box<dyn FnMut()>;

/// How a listener treats the native event after reading it
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

/// Element handle returned by a host
pub trait CanvasHandle: Clone + 'static {
    fn id(&self) -> String;

    /// Current backing store size
    fn size(&self) -> CanvasSize;
}

pub trait Host {
    type Canvas: CanvasHandle;
    /// Dropping it must unregister the listener
    type Listener;
    /// Dropping it must cancel the interval
    type Interval;

    /// Looks for the canvas element with the given id
    fn canvas(&self, id: &str) -> Result<Self::Canvas, Error>;

    fn add_mouse_listener(
        &self,
        canvas: &Self::Canvas,
        kind: MouseEventKind,
        options: ListenerOptions,
        handler: MouseHandler,
    ) -> Result<Self::Listener, Error>;

    /// Avoids the context menu on the canvas while the listener is alive
    fn suppress_context_menu(&self, canvas: &Self::Canvas) -> Result<Self::Listener, Error>;

    /// Calls `tick` every `period` until the returned interval is dropped
    fn set_interval(&self, period: Duration, tick: TickHandler) -> Result<Self::Interval, Error>;
}
