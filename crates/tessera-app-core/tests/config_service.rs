// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service behavior against the in-memory store.
#![allow(clippy::unwrap_used)]

use tessera_app_core::config::{ConfigService, ConfigStore};
use tessera_app_core::prefs::{ClientPrefs, StalePolicy, CLIENT_PREFS_KEY};
use tessera_dry_tests::InMemoryConfigStore;

#[test]
fn missing_prefs_are_defaulted_and_persisted_once() {
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());

    let prefs: ClientPrefs = service.load_or_init(CLIENT_PREFS_KEY);
    assert_eq!(prefs, ClientPrefs::default());
    assert_eq!(store.save_count(), 1);

    let again: ClientPrefs = service.load_or_init(CLIENT_PREFS_KEY);
    assert_eq!(again, prefs);
    assert_eq!(store.save_count(), 1);
}

#[test]
fn stored_prefs_win_over_defaults() {
    let store = InMemoryConfigStore::new();
    store
        .save_raw(CLIENT_PREFS_KEY, br#"{"stale_responses":"last_arrival_wins","max_notifications":2}"#)
        .unwrap();
    let prefs: ClientPrefs = ConfigService::new(store).load_or_init(CLIENT_PREFS_KEY);
    assert_eq!(prefs.stale_responses, StalePolicy::LastArrivalWins);
    assert_eq!(prefs.max_notifications, 2);
    assert_eq!(prefs.render_path, "/api/render");
}

#[test]
fn corrupt_prefs_fall_back_without_overwriting() {
    let store = InMemoryConfigStore::new();
    store.save_raw(CLIENT_PREFS_KEY, b"{not json").unwrap();
    let prefs: ClientPrefs = ConfigService::new(store.clone()).load_or_init(CLIENT_PREFS_KEY);
    assert_eq!(prefs, ClientPrefs::default());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn failing_store_still_yields_defaults() {
    let store = InMemoryConfigStore::new();
    store.set_fail_on_load(true);
    store.set_fail_on_save(true);
    let prefs: ClientPrefs = ConfigService::new(store).load_or_init(CLIENT_PREFS_KEY);
    assert_eq!(prefs.event_url(), "/hcc");
}
