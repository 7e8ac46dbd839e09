// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error banner, notifications and the live region.
//!
//! Every write is best effort: a host page missing one of these slots loses
//! that surface, never the runtime.

use tessera_app_core::notify::Notification;
use tessera_port::{DomError, DomPort};
use tracing::warn;

use crate::host;

/// Put `message` in the banner and reveal it.
pub(crate) fn show_banner<D: DomPort>(dom: &D, message: &str) {
    let (Some(display), Some(slot)) = (
        dom.element_by_id(host::ERROR_DISPLAY),
        dom.element_by_id(host::ERROR_MESSAGE),
    ) else {
        warn!("host page has no error banner; message only logged");
        return;
    };
    let shown = dom
        .set_text(&slot, message)
        .and_then(|()| dom.remove_class(&display, host::HIDDEN_CLASS));
    if let Err(err) = shown {
        warn!(%err, "cannot show error banner");
    }
}

/// Hide the banner again.
pub(crate) fn hide_banner<D: DomPort>(dom: &D) {
    if let Some(display) = dom.element_by_id(host::ERROR_DISPLAY) {
        if let Err(err) = dom.add_class(&display, host::HIDDEN_CLASS) {
            warn!(%err, "cannot hide error banner");
        }
    }
}

/// Rewrite the notification container and the live region.
pub(crate) fn render_notifications<D: DomPort>(
    dom: &D,
    visible: &[Notification],
    announcement: Option<&str>,
) {
    if let Some(container) = dom.element_by_id(host::NOTIFICATION_CONTAINER) {
        if let Err(err) = fill_container(dom, &container, visible) {
            warn!(%err, "cannot render notifications");
        }
    }
    if let Some(live) = dom.element_by_id(host::LIVE_REGION) {
        if let Err(err) = dom.set_text(&live, announcement.unwrap_or_default()) {
            warn!(%err, "cannot update live region");
        }
    }
}

fn fill_container<D: DomPort>(
    dom: &D,
    container: &D::Element,
    visible: &[Notification],
) -> Result<(), DomError> {
    dom.clear_children(container)?;
    for notification in visible {
        let toast = dom.create("div")?;
        dom.set_class(&toast, notification.severity.css_class())?;
        dom.set_attribute(&toast, "role", "status")?;
        let title = dom.create("p")?;
        dom.set_class(&title, "toast-title")?;
        dom.set_text(&title, &notification.title)?;
        dom.append(&toast, &title)?;
        if let Some(body) = &notification.body {
            let text = dom.create("p")?;
            dom.set_class(&text, "toast-body")?;
            dom.set_text(&text, body)?;
            dom.append(&toast, &text)?;
        }
        dom.append(container, &toast)?;
    }
    Ok(())
}
