//! Click listeners

use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use super::BindError;
use crate::{
    api::{CartApi, HttpCartApi},
    handler::CartHandler,
    page::web::WebPage,
};

/// Module entry point, run once when the page loads the module.
///
/// # Errors
///
/// Returns the [`BindError`] message if the page could not be wired up.
#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    start()
        .map(|bound| info!(bound, "cart controls ready"))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Wire the current document to its own origin's cart endpoints.
///
/// Returns the number of controls bound.
///
/// # Errors
///
/// Returns an error if there is no document or a listener cannot be attached.
pub fn start() -> Result<usize, BindError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or(BindError::NoDocument)?;
    let origin = window
        .location()
        .origin()
        .map_err(|error| BindError::Origin(describe(&error)))?;
    let page = WebPage::current().ok_or(BindError::NoDocument)?;

    bind(Rc::new(CartHandler::new(HttpCartApi::new(origin), page)))
}

/// Attach click listeners for every control `handler` responds to.
///
/// Listeners live as long as the page.
///
/// # Errors
///
/// Returns [`BindError::Listener`] if the browser refuses a listener.
pub fn bind<A>(handler: Rc<CartHandler<A, WebPage>>) -> Result<usize, BindError>
where
    A: CartApi + 'static,
{
    let controls = handler.controls();

    for (kind, element) in &controls {
        let click_handler = Rc::clone(&handler);
        let target = element.clone();

        let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let handler = Rc::clone(&click_handler);
            let target = target.clone();

            spawn_local(async move {
                if let Err(error) = handler.click(&target).await {
                    warn!(%error, "cart click failed");
                }
            });
        });

        element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|error| BindError::Listener(describe(&error)))?;

        on_click.forget();

        info!(%kind, "bound cart control");
    }

    Ok(controls.len())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
