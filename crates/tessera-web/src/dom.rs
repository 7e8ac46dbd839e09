// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `DomPort` over the live document.

use std::cell::RefCell;
use std::mem;

use tessera_port::{Captured, DomError, DomPort, Listen, Listener, Property};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement};

use crate::js_reason;

type Callback = Closure<dyn FnMut(Event)>;

/// A listener attached to the document, kept alive until released.
struct Bound {
    target: Element,
    event: &'static str,
    callback: Callback,
}

impl Bound {
    fn detach(self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        if let Err(err) = removed {
            debug!(event = self.event, reason = %js_reason(&err), "listener already gone");
        }
    }
}

/// [`DomPort`] backed by `web_sys`.
///
/// Listener closures are owned here rather than leaked with
/// `Closure::forget`; render-scoped ones are detached and dropped by
/// [`DomPort::release_listeners`].
pub struct WebDom {
    document: Document,
    render_scoped: RefCell<Vec<Bound>>,
    page: RefCell<Vec<Bound>>,
}

impl WebDom {
    /// Adapter over the current window's document.
    pub fn new() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::op("document", "no document in this context"))?;
        Ok(Self::from_document(document))
    }

    /// Adapter over `document`.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            render_scoped: RefCell::new(Vec::new()),
            page: RefCell::new(Vec::new()),
        }
    }

    /// The wrapped document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn bind(
        &self,
        element: &Element,
        signal: Listen,
        listener: Listener,
    ) -> Result<Bound, DomError> {
        let source = element.clone();
        let callback: Callback = Closure::wrap(Box::new(move |event: Event| {
            if signal == Listen::Click {
                event.prevent_default();
            }
            listener(capture(&source, signal));
        }) as Box<dyn FnMut(Event)>);
        element
            .add_event_listener_with_callback(signal.event_name(), callback.as_ref().unchecked_ref())
            .map_err(|err| DomError::Listener(js_reason(&err)))?;
        Ok(Bound {
            target: element.clone(),
            event: signal.event_name(),
            callback,
        })
    }
}

/// Read what the listener needs off the element at event time.
fn capture(element: &Element, signal: Listen) -> Captured {
    match signal {
        Listen::Click => Captured::Activated,
        Listen::Input | Listen::Change => Captured::Text(
            read(element, "value")
                .and_then(|value| value.as_string())
                .unwrap_or_default(),
        ),
        Listen::Toggle => Captured::Checked(
            read(element, "checked")
                .and_then(|value| value.as_bool())
                .unwrap_or(false),
        ),
    }
}

fn read(element: &Element, property: &str) -> Option<JsValue> {
    js_sys::Reflect::get(element, &JsValue::from_str(property)).ok()
}

fn write(element: &Element, property: &str, value: &JsValue) -> Result<(), DomError> {
    js_sys::Reflect::set(element, &JsValue::from_str(property), value)
        .map_err(|err| DomError::op("set property", js_reason(&err)))
        .and_then(|done| {
            if done {
                Ok(())
            } else {
                Err(DomError::op("set property", format!("`{property}` is read-only")))
            }
        })
}

impl DomPort for WebDom {
    type Element = Element;

    fn create(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|err| DomError::Create {
                tag: tag.to_owned(),
                reason: js_reason(&err),
            })
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), DomError> {
        element
            .set_attribute(name, value)
            .map_err(|err| DomError::op("set attribute", js_reason(&err)))
    }

    fn set_text(&self, element: &Element, text: &str) -> Result<(), DomError> {
        element.set_text_content(Some(text));
        Ok(())
    }

    fn set_property(&self, element: &Element, property: &Property) -> Result<(), DomError> {
        match property {
            Property::Value(value) => write(element, "value", &JsValue::from_str(value)),
            Property::Checked(checked) => write(element, "checked", &JsValue::from_bool(*checked)),
            Property::Selected(selected) => {
                write(element, "selected", &JsValue::from_bool(*selected))
            }
        }
    }

    fn append(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|err| DomError::op("append", js_reason(&err)))
    }

    fn clear_children(&self, element: &Element) -> Result<(), DomError> {
        element.replace_children_with_node_0();
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_visible(&self, element: &Element, visible: bool) -> Result<(), DomError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::op("set visibility", "not an HTML element"))?;
        let style = html.style();
        let result = if visible {
            style.remove_property("display").map(drop)
        } else {
            style.set_property("display", "none")
        };
        result.map_err(|err| DomError::op("set visibility", js_reason(&err)))
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), DomError> {
        element
            .class_list()
            .add_1(class)
            .map_err(|err| DomError::op("add class", js_reason(&err)))
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), DomError> {
        element
            .class_list()
            .remove_1(class)
            .map_err(|err| DomError::op("remove class", js_reason(&err)))
    }

    fn listen(&self, element: &Element, signal: Listen, listener: Listener) -> Result<(), DomError> {
        let bound = self.bind(element, signal, listener)?;
        self.render_scoped.borrow_mut().push(bound);
        Ok(())
    }

    fn listen_page(
        &self,
        element: &Element,
        signal: Listen,
        listener: Listener,
    ) -> Result<(), DomError> {
        let bound = self.bind(element, signal, listener)?;
        self.page.borrow_mut().push(bound);
        Ok(())
    }

    fn release_listeners(&self) {
        let released = mem::take(&mut *self.render_scoped.borrow_mut());
        let count = released.len();
        for bound in released {
            bound.detach();
        }
        debug!(count, "released render-scoped listeners");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    fn click(element: &Element) {
        element.dyn_ref::<HtmlElement>().unwrap().click();
    }

    #[wasm_bindgen_test]
    fn builds_and_clears_subtrees() {
        let dom = WebDom::new().unwrap();
        let host = dom.create("div").unwrap();
        let title = dom.create("h2").unwrap();
        dom.set_class(&title, "text-xl font-bold").unwrap();
        dom.set_text(&title, "<b>Hi</b>").unwrap();
        dom.append(&host, &title).unwrap();
        assert_eq!(host.inner_html(), r#"<h2 class="text-xl font-bold">&lt;b&gt;Hi&lt;/b&gt;</h2>"#);

        dom.clear_children(&host).unwrap();
        assert_eq!(host.child_element_count(), 0);
    }

    #[wasm_bindgen_test]
    fn properties_and_visibility() {
        let dom = WebDom::new().unwrap();
        let input = dom.create("input").unwrap();
        dom.set_attribute(&input, "type", "checkbox").unwrap();
        dom.set_property(&input, &Property::Checked(true)).unwrap();
        assert_eq!(capture(&input, Listen::Toggle), Captured::Checked(true));

        dom.set_visible(&input, false).unwrap();
        let style = input.dyn_ref::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("display").unwrap(), "none");
        dom.set_visible(&input, true).unwrap();
        assert_eq!(style.get_property_value("display").unwrap(), "");
    }

    #[wasm_bindgen_test]
    fn release_detaches_render_listeners_only() {
        let dom = WebDom::new().unwrap();
        let button = dom.create("button").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let page_clicks = Rc::new(Cell::new(0));
        let seen = Rc::clone(&clicks);
        dom.listen(&button, Listen::Click, Rc::new(move |_: Captured| seen.set(seen.get() + 1)))
            .unwrap();
        let seen = Rc::clone(&page_clicks);
        dom.listen_page(&button, Listen::Click, Rc::new(move |_: Captured| seen.set(seen.get() + 1)))
            .unwrap();

        click(&button);
        dom.release_listeners();
        click(&button);

        assert_eq!(clicks.get(), 1);
        assert_eq!(page_clicks.get(), 2);
    }
}
