// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! wasm entry point and the handle returned to the host page.

use std::sync::Once;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use tessera_app_core::config::ConfigService;
use tessera_app_core::prefs::{ClientPrefs, CLIENT_PREFS_KEY};
use tessera_runtime::AppController;
use tracing::{error, info, warn, Level};
use wasm_bindgen::prelude::*;
use web_sys::ErrorEvent;

use crate::{js_reason, BrowserSpawner, HttpTransport, LocalStorageConfigStore, WebClock, WebDom};

type WebController = AppController<WebDom, HttpTransport, WebClock>;

/// Slack added to the notification TTL so the refresh lands after expiry.
const EXPIRY_SLACK: Duration = Duration::from_millis(50);

static TRACING: Once = Once::new();

/// Start the runtime on the current page.
///
/// Installs the panic hook and the console subscriber, loads client prefs
/// from `localStorage`, then boots as soon as the document has finished
/// parsing. Throws only when there is no document to run in.
#[wasm_bindgen]
pub fn launch() -> Result<TesseraHandle, JsValue> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    let (prefs, prefs_error) = match LocalStorageConfigStore::new() {
        Ok(store) => (ConfigService::new(store).load_or_init::<ClientPrefs>(CLIENT_PREFS_KEY), None),
        Err(err) => (ClientPrefs::default(), Some(err)),
    };
    install_tracing(&prefs.log_level);
    if let Some(err) = prefs_error {
        warn!(%err, "client prefs unavailable; using defaults");
    }

    let dom = WebDom::new().map_err(|err| JsValue::from_str(&err.to_string()))?;
    let document = dom.document().clone();
    let transport = HttpTransport::from_prefs(&prefs);
    info!(
        render_url = transport.render_url(),
        event_url = transport.event_url(),
        "launching tessera"
    );
    let controller = AppController::new(dom, transport, WebClock, BrowserSpawner, prefs);
    schedule_notification_expiry(&controller);
    report_page_errors(&controller)?;

    let booting = controller.clone();
    let boot = move || {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = booting.boot().await {
                error!(%err, "boot failed");
            }
        });
    };
    if document.ready_state() == "loading" {
        let once = Closure::once_into_js(boot);
        document
            .add_event_listener_with_callback("DOMContentLoaded", once.unchecked_ref())
            .map_err(|err| JsValue::from_str(&js_reason(&err)))?;
    } else {
        boot();
    }

    Ok(TesseraHandle { controller })
}

fn install_tracing(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    TRACING.call_once(|| {
        let config = tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}

/// Re-render the notification container once a toast's TTL has passed.
fn schedule_notification_expiry(controller: &WebController) {
    let owner = controller.clone();
    controller.on_notification(move |ttl: Duration| {
        let owner = owner.clone();
        let millis = u32::try_from((ttl + EXPIRY_SLACK).as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || owner.refresh_notifications()).forget();
    });
}

/// Route uncaught page errors into the banner for the page's lifetime.
fn report_page_errors(controller: &WebController) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window in this context"))?;
    let owner = controller.clone();
    let on_error = Closure::<dyn FnMut(ErrorEvent)>::new(move |event: ErrorEvent| {
        let message = js_sys::Reflect::get(&event.error(), &JsValue::from_str("message"))
            .ok()
            .and_then(|message| message.as_string())
            .or_else(|| Some(event.message()).filter(|message| !message.is_empty()));
        owner.report_error(message.as_deref());
    });
    window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    // Ownership passes to the JS heap; the listener lives as long as the page.
    on_error.into_js_value();
    Ok(())
}

/// Handle to the running runtime, held by the host page.
#[wasm_bindgen]
pub struct TesseraHandle {
    controller: WebController,
}

#[wasm_bindgen]
impl TesseraHandle {
    /// Phase, tree, handlers, epochs and visible diagnostics as JSON.
    #[wasm_bindgen(js_name = debugState)]
    pub fn debug_state(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.controller.debug_snapshot())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Hide the error banner.
    #[wasm_bindgen(js_name = dismissError)]
    pub fn dismiss_error(&self) {
        self.controller.dismiss_error();
    }

    /// Current lifecycle phase, e.g. `rendering:event`.
    pub fn phase(&self) -> String {
        self.controller.phase().to_string()
    }
}
