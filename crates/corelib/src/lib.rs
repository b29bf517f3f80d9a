pub mod app;
pub mod backend;
mod error;
pub mod input;
mod listener;
pub mod math;
pub mod resize;
pub mod size;

pub use app::CanvasConfig;
pub use error::Error;
pub use listener::{CanvasWatch, ListenerBuilder, attach_listener, listen};
pub use resize::ResizeWatch;
pub use size::{CanvasSize, SizeTracker};
