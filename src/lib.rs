#[cfg(target_arch = "wasm32")]
mod web;

#[doc(inline)]
pub use corelib::*;

#[cfg(target_arch = "wasm32")]
pub use web::*;
