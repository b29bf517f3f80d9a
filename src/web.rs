//! Entry points exported to javascript

use corelib::backend::WebHost;
use corelib::{CanvasWatch, attach_listener};
use wasm_bindgen::prelude::*;

/// Canvas listeners attached from javascript.
/// Calling `free()` or `detach()` removes them.
#[wasm_bindgen]
pub struct CanvasListener {
    watch: Option<CanvasWatch<WebHost>>,
}

#[wasm_bindgen]
impl CanvasListener {
    #[wasm_bindgen(js_name = stopPolling)]
    pub fn stop_polling(&mut self) {
        if let Some(watch) = &mut self.watch {
            watch.stop_polling();
        }
    }

    #[wasm_bindgen(js_name = isPolling)]
    pub fn is_polling(&self) -> bool {
        self.watch.as_ref().is_some_and(|w| w.is_polling())
    }

    pub fn detach(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.detach();
        }
    }
}

/// Logs mouse events and size changes of the canvas `canvas_id`
#[wasm_bindgen(js_name = attachListener)]
pub fn attach_canvas_listener(canvas_id: &str) -> Result<CanvasListener, JsError> {
    let watch = WebHost::new().and_then(|host| attach_listener(&host, canvas_id));
    match watch {
        Ok(watch) => Ok(CanvasListener { watch: Some(watch) }),
        Err(e) => {
            log::error!("Can't listen canvas '{canvas_id}': {e}");
            Err(e.into())
        }
    }
}

/// Sends the logs to the browser console, `level` is a name like `"info"`
#[cfg(feature = "logs")]
#[wasm_bindgen(js_name = initLogs)]
pub fn init_logs(level: &str) {
    corelib::app::init_logs(corelib::app::LogConfig::from_level_name(level));
}
