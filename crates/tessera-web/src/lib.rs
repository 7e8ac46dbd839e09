// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Browser side of tessera.
//!
//! Adapters binding the runtime ports to the browser ([`WebDom`],
//! [`HttpTransport`], [`WebClock`], [`BrowserSpawner`],
//! [`LocalStorageConfigStore`]) and the wasm entry point [`launch`], which the
//! host page calls once the module is initialized:
//!
//! ```js
//! import init, { launch } from "/pkg/tessera_web.js";
//! await init();
//! window.tessera = launch();
//! ```

mod clock;
mod dom;
mod entry;
mod spawner;
mod storage;
mod transport;

pub use clock::WebClock;
pub use dom::WebDom;
pub use entry::{launch, TesseraHandle};
pub use spawner::BrowserSpawner;
pub use storage::LocalStorageConfigStore;
pub use transport::HttpTransport;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text of a thrown JS value.
pub(crate) fn js_reason(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
