use crate::math::{Rect, vec2};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{EventTarget, HtmlCanvasElement, Window};

pub(crate) fn add_event_listener<F, E>(
    target: &EventTarget,
    name: &'static str,
    handler: F,
) -> Result<Closure<dyn FnMut(E)>, String>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |e: E| {
        handler(e);
    }) as Box<dyn FnMut(_)>);

    target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .map_err(|e| format!("{e:?}"))?;
    Ok(closure)
}

#[inline]
pub(crate) fn remove_event_listener<E>(
    target: &EventTarget,
    name: &'static str,
    closure: &Closure<dyn FnMut(E)>,
) where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    if let Err(e) =
        target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
    {
        log::warn!("Cannot remove '{name}' listener: {e:?}");
    }
}

#[inline]
pub(crate) fn set_interval(win: &Window, ms: i32, f: &Closure<dyn FnMut()>) -> Result<i32, String> {
    win.set_interval_with_callback_and_timeout_and_arguments_0(f.as_ref().unchecked_ref(), ms)
        .map_err(|e| format!("{e:?}"))
}

#[inline]
pub(crate) fn canvas_rect(canvas: &HtmlCanvasElement) -> Rect {
    let rect = canvas.get_bounding_client_rect();
    Rect::new(
        vec2(rect.left() as _, rect.top() as _),
        vec2(rect.width() as _, rect.height() as _),
    )
}
