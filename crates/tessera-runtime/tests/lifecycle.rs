// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boot and initial render.
#![allow(clippy::unwrap_used)]

mod common;

use common::Rig;
use tessera_app_core::prefs::ClientPrefs;
use tessera_dry_tests::{fixtures, MemDom};
use tessera_port::TransportError;
use tessera_runtime::{BootError, Phase, UNEXPECTED_ERROR};

#[test]
fn boot_renders_the_initial_tree() {
    let mut rig = Rig::new();
    rig.transport.push_tree(fixtures::greeting());
    assert_eq!(rig.app.phase(), Phase::Booting);

    rig.boot().unwrap();

    assert_eq!(rig.app.phase(), Phase::Rendered);
    assert_eq!(rig.transport.fetch_count(), 1);
    let roots = rig.dom.children(rig.content());
    assert_eq!(roots.len(), 1);
    assert_eq!(rig.dom.tag(roots[0]), "h1");
    assert_eq!(rig.dom.text(roots[0]), "Hi");
    assert!(!rig.dom.is_visible(rig.el("loading")));
    assert!(rig.dom.is_visible(rig.content()));
    assert!(!rig.banner_shown());
}

#[test]
fn boot_registers_handlers_of_the_initial_tree() {
    let mut rig = Rig::new();
    rig.transport.push_tree(fixtures::kitchen_sink());
    rig.boot().unwrap();
    let handlers = rig.app.handlers();
    assert_eq!(handlers.len(), 2);
    assert_eq!(handlers.handler_for("inc"), Some("h_inc"));
    assert_eq!(handlers.handler_for("reset"), Some("h_reset"));
    assert_eq!(rig.app.tree(), fixtures::kitchen_sink());
}

#[test]
fn missing_content_host_halts_without_fetching() {
    let mut rig = Rig::with(
        MemDom::with_host_page_except(&["app-content"]),
        ClientPrefs::default(),
    );
    rig.transport.push_tree(fixtures::greeting());

    assert_eq!(
        rig.boot(),
        Err(BootError::MissingContentHost("app-content"))
    );
    assert_eq!(rig.app.phase(), Phase::Halted);
    assert_eq!(rig.transport.fetch_count(), 0);
    assert!(rig.dom.is_visible(rig.el("loading")));
}

#[test]
fn failed_initial_fetch_keeps_loading_and_shows_banner() {
    let mut rig = Rig::new();
    rig.transport.push_tree_error(TransportError::Status {
        code: 500,
        text: "Internal Server Error".into(),
    });

    rig.boot().unwrap();

    assert_eq!(rig.app.phase(), Phase::Rendered);
    assert!(rig.dom.is_visible(rig.el("loading")));
    assert!(rig.banner_shown());
    assert_eq!(
        rig.banner_text(),
        "Render failed: HTTP error! status: 500 Internal Server Error"
    );
    assert!(rig.app.tree().is_empty());
    assert_eq!(
        rig.app.debug_snapshot().error.as_deref(),
        Some("Render failed: HTTP error! status: 500 Internal Server Error")
    );
}

#[test]
fn close_button_dismisses_the_banner() {
    let mut rig = Rig::new();
    rig.transport
        .push_tree_error(TransportError::Network("offline".into()));
    rig.boot().unwrap();
    assert!(rig.banner_shown());

    assert_eq!(rig.dom.click("close-error"), 1);
    assert!(!rig.banner_shown());
    assert_eq!(rig.app.debug_snapshot().error, None);
}

#[test]
fn uncaught_page_errors_show_in_the_banner() {
    let mut rig = Rig::new();
    rig.transport.push_tree(fixtures::greeting());
    rig.boot().unwrap();
    assert!(!rig.banner_shown());

    rig.app.report_error(Some("x is not a function"));
    assert!(rig.banner_shown());
    assert_eq!(rig.banner_text(), "x is not a function");
    assert_eq!(rig.app.debug_snapshot().error.as_deref(), Some("x is not a function"));
    assert_eq!(rig.app.phase(), Phase::Rendered);

    rig.app.report_error(Some("  "));
    assert_eq!(rig.banner_text(), UNEXPECTED_ERROR);
    rig.app.report_error(None);
    assert_eq!(rig.banner_text(), "An unexpected error occurred");
}

#[test]
fn banner_slots_are_optional() {
    let mut rig = Rig::with(
        MemDom::with_host_page_except(&["error-display", "close-error", "error-message"]),
        ClientPrefs::default(),
    );
    rig.transport
        .push_tree_error(TransportError::Network("offline".into()));
    rig.boot().unwrap();
    assert_eq!(rig.app.phase(), Phase::Rendered);
}

#[test]
fn second_boot_is_ignored() {
    let mut rig = Rig::new();
    rig.transport.push_tree(fixtures::greeting());
    rig.boot().unwrap();
    rig.boot().unwrap();
    assert_eq!(rig.transport.fetch_count(), 1);
    assert_eq!(rig.dom.listener_count(), 1, "close button wired once");
}

#[test]
fn failing_root_is_isolated_and_recorded() {
    let mut rig = Rig::new();
    rig.dom.fail_on("select");
    rig.transport.push_tree(fixtures::kitchen_sink());
    rig.boot().unwrap();

    let snapshot = rig.app.debug_snapshot();
    assert_eq!(snapshot.failures.len(), 1);
    assert_eq!(snapshot.failures[0].id, "color");
    assert_eq!(rig.dom.children(rig.content()).len(), 4);
    assert!(!rig.banner_shown(), "per-node failures are only logged");
}

#[test]
fn debug_snapshot_serializes() {
    let mut rig = Rig::new();
    rig.transport.push_tree(fixtures::single_button());
    rig.boot().unwrap();
    let json = serde_json::to_value(rig.app.debug_snapshot()).unwrap();
    assert_eq!(json["phase"], "rendered");
    assert_eq!(json["handlers"]["b1"], "h1");
    assert_eq!(json["tree"][0]["id"], "b1");
    assert_eq!(json["epochs"]["issued"], 0);
}
