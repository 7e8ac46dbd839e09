// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lifecycle state machine and event dispatch.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::task::{LocalSpawn, LocalSpawnExt};
use tessera_app_core::notify::{NotificationService, Severity};
use tessera_app_core::prefs::{ClientPrefs, StalePolicy};
use tessera_port::{Captured, Clock, DomPort, Listen, Transport};
use tessera_proto::wire::EventRequest;
use tessera_proto::ComponentTree;
use tessera_render::{
    EventSink, FullRebuild, HandlerRegistry, Interaction, NodeFailure, RenderError, Renderer,
};
use tracing::{debug, error, info, warn};
use web_time::Instant;

use crate::snapshot::{DebugSnapshot, EpochSnapshot};
use crate::{diagnostics, host, BootError, Phase, RenderTrigger};

type NotificationHook = Rc<dyn Fn(Duration)>;

/// Banner text for an uncaught page error that carries no message.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

struct State<E> {
    phase: Phase,
    content_host: Option<E>,
    tree: ComponentTree,
    handlers: HandlerRegistry,
    failures: Vec<NodeFailure>,
    issued: u64,
    applied: u64,
    in_flight: usize,
    shown_error: Option<String>,
    booted_once: bool,
    notifications: NotificationService,
    notification_hook: Option<NotificationHook>,
}

/// Owner of the displayed tree and handler registry; drives boot, render
/// cycles and event dispatch.
///
/// Cloning is cheap and every clone drives the same state. Listeners hold
/// clones through [`AppController::interaction_sink`].
pub struct AppController<D: DomPort, T, C> {
    dom: Rc<D>,
    transport: Rc<T>,
    clock: Rc<C>,
    spawner: Rc<dyn LocalSpawn>,
    renderer: Rc<dyn Renderer<D>>,
    prefs: Rc<ClientPrefs>,
    state: Rc<RefCell<State<D::Element>>>,
}

impl<D: DomPort, T, C> Clone for AppController<D, T, C> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            transport: Rc::clone(&self.transport),
            clock: Rc::clone(&self.clock),
            spawner: Rc::clone(&self.spawner),
            renderer: Rc::clone(&self.renderer),
            prefs: Rc::clone(&self.prefs),
            state: Rc::clone(&self.state),
        }
    }
}

impl<D, T, C> AppController<D, T, C>
where
    D: DomPort + 'static,
    D::Element: 'static,
    T: Transport + 'static,
    C: Clock + 'static,
{
    /// Controller rendering with [`FullRebuild`]. `spawner` runs the
    /// dispatches started by listeners.
    pub fn new(
        dom: D,
        transport: T,
        clock: C,
        spawner: impl LocalSpawn + 'static,
        prefs: ClientPrefs,
    ) -> Self {
        let notifications = NotificationService::new(prefs.max_notifications);
        Self {
            dom: Rc::new(dom),
            transport: Rc::new(transport),
            clock: Rc::new(clock),
            spawner: Rc::new(spawner),
            renderer: Rc::new(FullRebuild),
            prefs: Rc::new(prefs),
            state: Rc::new(RefCell::new(State {
                phase: Phase::Booting,
                content_host: None,
                tree: ComponentTree::new(),
                handlers: HandlerRegistry::new(),
                failures: Vec::new(),
                issued: 0,
                applied: 0,
                in_flight: 0,
                shown_error: None,
                booted_once: false,
                notifications,
                notification_hook: None,
            })),
        }
    }

    /// Swap the render strategy.
    pub fn with_renderer(mut self, renderer: impl Renderer<D> + 'static) -> Self {
        self.renderer = Rc::new(renderer);
        self
    }

    /// Called with the notification TTL whenever a notification is shown,
    /// so the host can schedule [`AppController::refresh_notifications`].
    pub fn on_notification(&self, hook: impl Fn(Duration) + 'static) {
        self.state.borrow_mut().notification_hook = Some(Rc::new(hook));
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Start the runtime: locate the content host, wire the banner's close
    /// button, fetch the initial tree and render it.
    ///
    /// A missing content host halts the controller for good. A failed fetch
    /// is not fatal: the banner shows, the loading indicator stays, and the
    /// controller idles with an empty tree.
    pub async fn boot(&self) -> Result<(), BootError> {
        {
            let mut state = self.state.borrow_mut();
            if state.booted_once {
                warn!(phase = %state.phase, "boot called more than once; ignored");
                return Ok(());
            }
            state.booted_once = true;
        }

        let Some(content_host) = self.dom.element_by_id(host::CONTENT_HOST) else {
            self.state.borrow_mut().phase = Phase::Halted;
            error!(id = host::CONTENT_HOST, "content host missing; startup aborted");
            return Err(BootError::MissingContentHost(host::CONTENT_HOST));
        };
        {
            let mut state = self.state.borrow_mut();
            state.content_host = Some(content_host);
            state.phase = Phase::Rendering(RenderTrigger::Initial);
        }
        self.wire_close_button();

        info!(url = %self.prefs.render_url(), "fetching initial component tree");
        let fetched = self.transport.fetch_tree().await;
        match fetched {
            Ok(tree) => match self.apply(tree, RenderTrigger::Initial) {
                Ok(()) => self.reveal_content(),
                Err(err) => self.show_error(&format!("Render failed: {err}")),
            },
            Err(err) => {
                self.show_error(&format!("Render failed: {err}"));
                self.state.borrow_mut().phase = Phase::Rendered;
            }
        }
        Ok(())
    }

    /// Send one interaction to the server and apply the reply.
    ///
    /// Exactly one request is issued and exactly one response awaited. A
    /// failed round trip shows the banner and leaves the UI untouched. A
    /// reply carrying a tree triggers a full rebuild unless a newer tree is
    /// already displayed and stale replies are discarded.
    pub async fn dispatch(&self, interaction: Interaction) {
        let is_click = interaction.is_click();
        let request = EventRequest::from(interaction.into_outbound(self.clock.timestamp()));
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.issued += 1;
            state.in_flight += 1;
            state.issued
        };
        debug!(
            epoch,
            element_id = %request.element_id,
            event_type = ?request.event_type,
            handler_id = ?request.handler_id,
            "sending event"
        );

        let result = self.transport.send_event(&request).await;
        self.state.borrow_mut().in_flight -= 1;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let action = if is_click { "Button click" } else { "Input change" };
                self.show_error(&format!("{action} failed: {err}"));
                return;
            }
        };

        if response.is_handler_error() {
            let message = response
                .error
                .clone()
                .unwrap_or_else(|| "the server reported an error".to_owned());
            warn!(epoch, element_id = %request.element_id, reason = %message, "server handler failed");
            self.notify(Severity::Warn, "Handler failed", Some(message));
        }

        let Some(tree) = response.component_tree else {
            debug!(epoch, "event response carries no tree; UI unchanged");
            return;
        };
        if self.is_stale(epoch) {
            info!(
                epoch,
                applied = self.state.borrow().applied,
                "discarding stale event response"
            );
            return;
        }
        match self.apply(tree, RenderTrigger::Event) {
            Ok(()) => self.state.borrow_mut().applied = epoch,
            Err(err) => self.show_error(&format!("Render failed: {err}")),
        }
    }

    /// Sink handed to listeners: each interaction spawns one
    /// [`AppController::dispatch`] on the local executor.
    pub fn interaction_sink(&self) -> EventSink {
        let controller = self.clone();
        Rc::new(move |interaction: Interaction| {
            let task = controller.clone();
            if let Err(err) = controller
                .spawner
                .spawn_local(async move { task.dispatch(interaction).await })
            {
                error!(%err, "cannot schedule event dispatch");
            }
        })
    }

    // ── Diagnostics ────────────────────────────────────────────────────

    /// Show an uncaught page error in the banner. A missing or blank
    /// message shows a generic one.
    pub fn report_error(&self, message: Option<&str>) {
        let message = message
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(UNEXPECTED_ERROR);
        self.show_error(message);
    }

    /// Hide the error banner.
    pub fn dismiss_error(&self) {
        self.state.borrow_mut().shown_error = None;
        diagnostics::hide_banner(&*self.dom);
    }

    /// Show a notification and announce it in the live region.
    pub fn notify(&self, severity: Severity, title: &str, body: Option<String>) {
        let ttl = self.prefs.notification_ttl();
        self.state
            .borrow_mut()
            .notifications
            .push(severity, title, body, ttl, Instant::now());
        self.refresh_notifications();
        let hook = self.state.borrow().notification_hook.clone();
        if let Some(hook) = hook {
            hook(ttl);
        }
    }

    /// Drop expired notifications and re-render the rest.
    pub fn refresh_notifications(&self) {
        let now = Instant::now();
        let (visible, latest) = {
            let mut state = self.state.borrow_mut();
            state.notifications.retain_visible(now);
            (
                state.notifications.visible(now),
                state.notifications.latest_title(now).map(str::to_owned),
            )
        };
        diagnostics::render_notifications(&*self.dom, &visible, latest.as_deref());
    }

    // ── Introspection ──────────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// Copy of the displayed tree.
    pub fn tree(&self) -> ComponentTree {
        self.state.borrow().tree.clone()
    }

    /// Copy of the handler registry of the displayed tree.
    pub fn handlers(&self) -> HandlerRegistry {
        self.state.borrow().handlers.clone()
    }

    /// Everything the controller owns, for debugging.
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        let state = self.state.borrow();
        DebugSnapshot {
            phase: state.phase,
            tree: state.tree.clone(),
            handlers: state.handlers.clone(),
            failures: state.failures.clone(),
            epochs: EpochSnapshot {
                issued: state.issued,
                applied: state.applied,
                in_flight: state.in_flight,
            },
            error: state.shown_error.clone(),
            notifications: state.notifications.visible(Instant::now()),
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn is_stale(&self, epoch: u64) -> bool {
        match self.prefs.stale_responses {
            StalePolicy::Discard => epoch <= self.state.borrow().applied,
            StalePolicy::LastArrivalWins => false,
        }
    }

    /// Rebuild the content host from `tree` and adopt it as the displayed
    /// tree. No state borrow is held while the renderer runs.
    fn apply(&self, tree: ComponentTree, trigger: RenderTrigger) -> Result<(), RenderError> {
        let content_host = {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Rendering(trigger);
            state.content_host.clone()
        };
        let Some(content_host) = content_host else {
            // Unreachable after a successful boot; nothing to render into.
            self.state.borrow_mut().phase = Phase::Halted;
            return Ok(());
        };

        let sink = self.interaction_sink();
        let result = self.renderer.replace(&*self.dom, &content_host, &tree, &sink);

        let mut state = self.state.borrow_mut();
        state.phase = Phase::Rendered;
        match result {
            Ok(report) => {
                info!(
                    trigger = ?trigger,
                    roots = tree.len(),
                    rendered = report.rendered,
                    failed = report.failures.len(),
                    handlers = report.handlers.len(),
                    "component tree applied"
                );
                state.handlers = report.handlers;
                state.failures = report.failures;
                state.tree = tree;
                Ok(())
            }
            Err(err) => {
                // Listeners are already released; old handlers are dead.
                state.handlers.clear();
                state.failures.clear();
                Err(err)
            }
        }
    }

    fn reveal_content(&self) {
        if let Some(loading) = self.dom.element_by_id(host::LOADING) {
            if let Err(err) = self.dom.set_visible(&loading, false) {
                warn!(%err, "cannot hide loading indicator");
            }
        }
        let content_host = self.state.borrow().content_host.clone();
        if let Some(content_host) = content_host {
            if let Err(err) = self.dom.set_visible(&content_host, true) {
                warn!(%err, "cannot reveal content host");
            }
        }
    }

    fn wire_close_button(&self) {
        let Some(close) = self.dom.element_by_id(host::CLOSE_ERROR) else {
            return;
        };
        let controller = self.clone();
        let wired = self.dom.listen_page(
            &close,
            Listen::Click,
            Rc::new(move |_: Captured| controller.dismiss_error()),
        );
        if let Err(err) = wired {
            warn!(%err, "cannot wire error banner close button");
        }
    }

    fn show_error(&self, message: &str) {
        error!(banner = %message, "showing error banner");
        self.state.borrow_mut().shown_error = Some(message.to_owned());
        diagnostics::show_banner(&*self.dom, message);
    }
}
