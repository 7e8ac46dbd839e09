// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, dead_code, clippy::unwrap_used)]

use futures::executor::LocalPool;
use tessera_app_core::prefs::ClientPrefs;
use tessera_dry_tests::{FixedClock, MemDom, MemElement, ScriptedTransport};
use tessera_runtime::{AppController, BootError};

pub type TestController = AppController<MemDom, ScriptedTransport, FixedClock>;

/// Controller wired to in-memory fakes, driven by a local pool.
pub struct Rig {
    pub pool: LocalPool,
    pub dom: MemDom,
    pub transport: ScriptedTransport,
    pub app: TestController,
}

impl Rig {
    pub fn new() -> Self {
        Self::with(MemDom::with_host_page(), ClientPrefs::default())
    }

    pub fn with(dom: MemDom, prefs: ClientPrefs) -> Self {
        let pool = LocalPool::new();
        let transport = ScriptedTransport::new();
        let app = AppController::new(
            dom.clone(),
            transport.clone(),
            FixedClock::default(),
            pool.spawner(),
            prefs,
        );
        Self {
            pool,
            dom,
            transport,
            app,
        }
    }

    pub fn boot(&mut self) -> Result<(), BootError> {
        let app = self.app.clone();
        self.pool.run_until(async move { app.boot().await })
    }

    /// Run spawned dispatches until none can make progress.
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn el(&self, id: &str) -> MemElement {
        self.dom.find(id).unwrap()
    }

    pub fn content(&self) -> MemElement {
        self.el("app-content")
    }

    pub fn content_outline(&self) -> String {
        self.dom.outline(self.content())
    }

    pub fn banner_shown(&self) -> bool {
        !self.dom.has_class(self.el("error-display"), "hidden")
    }

    pub fn banner_text(&self) -> String {
        self.dom.text(self.el("error-message"))
    }
}
