// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Client services shared by the tessera runtime and its adapters
//! (config, prefs, notifications). Nothing here touches the DOM.

pub mod config;
pub mod notify;
pub mod prefs;
