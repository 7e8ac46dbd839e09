// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory element host with event simulation.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::rc::Rc;

use tessera_port::{Captured, DomError, DomPort, Listen, Listener, Property};

/// Handle to an element owned by a [`MemDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemElement(usize);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lifetime {
    Render,
    Page,
}

struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    value: String,
    checked: bool,
    selected: bool,
    visible: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    listeners: Vec<(Listen, Listener, Lifetime)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            selected: false,
            visible: true,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

#[derive(Default)]
struct Arena {
    nodes: Vec<Node>,
    fail_on: BTreeSet<String>,
    fail_listen: bool,
    released: usize,
}

impl Arena {
    fn node(&self, el: MemElement) -> &Node {
        &self.nodes[el.0]
    }

    fn node_mut(&mut self, el: MemElement) -> &mut Node {
        &mut self.nodes[el.0]
    }

    fn detach(&mut self, child: usize) {
        if let Some(parent) = self.nodes[child].parent.take() {
            self.nodes[parent].children.retain(|c| *c != child);
        }
    }

    fn walk(&self, from: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[from].children {
            out.push(child);
            self.walk(child, out);
        }
    }
}

/// Root element every attached element descends from.
const BODY: MemElement = MemElement(0);

/// [`DomPort`] backed by an in-memory arena.
///
/// Element 0 is the page body; [`DomPort::element_by_id`] only finds elements
/// attached below it, like `document.getElementById`. Clones share the arena.
/// Simulated user input ([`MemDom::click`] and friends) invokes listeners
/// after the arena borrow is released, so listeners may call back into the
/// host.
#[derive(Clone)]
pub struct MemDom {
    inner: Rc<RefCell<Arena>>,
}

impl Default for MemDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemDom {
    /// Host with an empty body.
    pub fn new() -> Self {
        let mut arena = Arena::default();
        arena.nodes.push(Node::new("body"));
        Self {
            inner: Rc::new(RefCell::new(arena)),
        }
    }

    /// Host with the full host page: `loading`, `app-content`,
    /// `error-display` (hidden) holding `error-message` and `close-error`,
    /// `notification-container` and `live-region`.
    pub fn with_host_page() -> Self {
        Self::with_host_page_except(&[])
    }

    /// Host page with the listed ids left out.
    pub fn with_host_page_except(missing: &[&str]) -> Self {
        let dom = Self::new();
        let add = |parent: MemElement, tag: &str, id: &str| -> Option<MemElement> {
            if missing.contains(&id) {
                return None;
            }
            let el = dom.insert(tag);
            dom.set_attr(el, "id", id);
            dom.attach(parent, el);
            Some(el)
        };
        add(BODY, "div", "loading");
        if let Some(content) = add(BODY, "div", "app-content") {
            dom.inner.borrow_mut().node_mut(content).visible = false;
        }
        if let Some(banner) = add(BODY, "div", "error-display") {
            dom.set_attr(banner, "class", "hidden");
            add(banner, "p", "error-message");
            add(banner, "button", "close-error");
        }
        add(BODY, "div", "notification-container");
        if let Some(live) = add(BODY, "div", "live-region") {
            dom.set_attr(live, "aria-live", "polite");
        }
        dom
    }

    /// Make `create(tag)` fail from now on.
    pub fn fail_on(&self, tag: &str) {
        self.inner.borrow_mut().fail_on.insert(tag.to_owned());
    }

    /// Make every listener attachment fail.
    pub fn fail_listen(&self, fail: bool) {
        self.inner.borrow_mut().fail_listen = fail;
    }

    fn insert(&self, tag: &str) -> MemElement {
        let mut arena = self.inner.borrow_mut();
        arena.nodes.push(Node::new(tag));
        MemElement(arena.nodes.len() - 1)
    }

    fn attach(&self, parent: MemElement, child: MemElement) {
        let mut arena = self.inner.borrow_mut();
        arena.detach(child.0);
        arena.node_mut(child).parent = Some(parent.0);
        arena.node_mut(parent).children.push(child.0);
    }

    fn set_attr(&self, el: MemElement, name: &str, value: &str) {
        let mut arena = self.inner.borrow_mut();
        let node = arena.node_mut(el);
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    // ── Simulated input ────────────────────────────────────────────────

    fn fire(&self, el: MemElement, signal: Listen, captured: &Captured) -> usize {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .node(el)
            .listeners
            .iter()
            .filter(|(s, _, _)| *s == signal)
            .map(|(_, l, _)| Rc::clone(l))
            .collect();
        for listener in &listeners {
            listener(captured.clone());
        }
        listeners.len()
    }

    /// Activate the attached element `id`. Returns how many listeners ran.
    pub fn click(&self, id: &str) -> usize {
        self.find(id)
            .map_or(0, |el| self.fire(el, Listen::Click, &Captured::Activated))
    }

    /// Replace the value of text input `id` and fire its input listeners.
    pub fn type_text(&self, id: &str, text: &str) -> usize {
        let Some(el) = self.find(id) else { return 0 };
        self.inner.borrow_mut().node_mut(el).value = text.to_owned();
        self.fire(el, Listen::Input, &Captured::Text(text.to_owned()))
    }

    /// Select the option with `value` in select `id` and fire its change
    /// listeners.
    pub fn choose(&self, id: &str, value: &str) -> usize {
        let Some(el) = self.find(id) else { return 0 };
        {
            let mut arena = self.inner.borrow_mut();
            arena.node_mut(el).value = value.to_owned();
            let options = arena.node(el).children.clone();
            for option in options {
                let node = &mut arena.nodes[option];
                node.selected = node.attributes.get("value").map(String::as_str) == Some(value);
            }
        }
        self.fire(el, Listen::Change, &Captured::Text(value.to_owned()))
    }

    /// Flip checkbox `id` and fire its toggle listeners.
    pub fn toggle(&self, id: &str) -> usize {
        let Some(el) = self.find(id) else { return 0 };
        let checked = {
            let mut arena = self.inner.borrow_mut();
            let node = arena.node_mut(el);
            node.checked = !node.checked;
            node.checked
        };
        self.fire(el, Listen::Toggle, &Captured::Checked(checked))
    }

    // ── Inspection ─────────────────────────────────────────────────────

    /// The page body.
    pub fn body(&self) -> MemElement {
        BODY
    }

    /// Attached element with `id`.
    pub fn find(&self, id: &str) -> Option<MemElement> {
        let arena = self.inner.borrow();
        let mut attached = Vec::new();
        arena.walk(BODY.0, &mut attached);
        attached
            .into_iter()
            .find(|i| arena.nodes[*i].attributes.get("id").map(String::as_str) == Some(id))
            .map(MemElement)
    }

    /// Tag name.
    pub fn tag(&self, el: MemElement) -> String {
        self.inner.borrow().node(el).tag.clone()
    }

    /// Direct children in order.
    pub fn children(&self, el: MemElement) -> Vec<MemElement> {
        self.inner
            .borrow()
            .node(el)
            .children
            .iter()
            .copied()
            .map(MemElement)
            .collect()
    }

    /// Number of elements below `el`, at any depth.
    pub fn descendant_count(&self, el: MemElement) -> usize {
        let mut all = Vec::new();
        self.inner.borrow().walk(el.0, &mut all);
        all.len()
    }

    /// The element's own text.
    pub fn text(&self, el: MemElement) -> String {
        self.inner.borrow().node(el).text.clone()
    }

    /// Own text followed by the text of every descendant, in document order.
    pub fn text_content(&self, el: MemElement) -> String {
        let arena = self.inner.borrow();
        let mut all = vec![el.0];
        arena.walk(el.0, &mut all);
        all.into_iter().map(|i| arena.nodes[i].text.as_str()).collect()
    }

    /// Attribute value; `class` is reported as the joined class list.
    pub fn attribute(&self, el: MemElement, name: &str) -> Option<String> {
        let arena = self.inner.borrow();
        let node = arena.node(el);
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    /// True when the class list contains `class`.
    pub fn has_class(&self, el: MemElement, class: &str) -> bool {
        self.inner.borrow().node(el).classes.iter().any(|c| c == class)
    }

    /// Inline visibility as last set through [`DomPort::set_visible`].
    pub fn is_visible(&self, el: MemElement) -> bool {
        self.inner.borrow().node(el).visible
    }

    /// Live `value` property.
    pub fn value(&self, el: MemElement) -> String {
        self.inner.borrow().node(el).value.clone()
    }

    /// Live `checked` property.
    pub fn checked(&self, el: MemElement) -> bool {
        self.inner.borrow().node(el).checked
    }

    /// Live `selected` property.
    pub fn selected(&self, el: MemElement) -> bool {
        self.inner.borrow().node(el).selected
    }

    /// Listeners currently attached anywhere, both lifetimes.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .nodes
            .iter()
            .map(|n| n.listeners.len())
            .sum()
    }

    /// Render-scoped listeners dropped so far by `release_listeners`.
    pub fn released_count(&self) -> usize {
        self.inner.borrow().released
    }

    /// Structural rendering of `el` and its subtree (tag, id, classes, text,
    /// live properties) for whole-tree comparisons.
    pub fn outline(&self, el: MemElement) -> String {
        fn go(arena: &Arena, i: usize, out: &mut String) {
            let node = &arena.nodes[i];
            out.push('<');
            out.push_str(&node.tag);
            for (name, value) in &node.attributes {
                let _ = write!(out, " {name}={value:?}");
            }
            if !node.classes.is_empty() {
                let _ = write!(out, " class={:?}", node.classes.join(" "));
            }
            if !node.value.is_empty() {
                let _ = write!(out, " .value={:?}", node.value);
            }
            if node.checked {
                out.push_str(" .checked");
            }
            if node.selected {
                out.push_str(" .selected");
            }
            out.push('>');
            out.push_str(&node.text);
            for &child in &node.children {
                go(arena, child, out);
            }
            let _ = write!(out, "</{}>", node.tag);
        }
        let mut out = String::new();
        go(&self.inner.borrow(), el.0, &mut out);
        out
    }
}

impl DomPort for MemDom {
    type Element = MemElement;

    fn create(&self, tag: &str) -> Result<MemElement, DomError> {
        if self.inner.borrow().fail_on.contains(tag) {
            return Err(DomError::Create {
                tag: tag.to_owned(),
                reason: "simulated failure".to_owned(),
            });
        }
        Ok(self.insert(tag))
    }

    fn set_attribute(&self, element: &MemElement, name: &str, value: &str) -> Result<(), DomError> {
        self.set_attr(*element, name, value);
        Ok(())
    }

    fn set_text(&self, element: &MemElement, text: &str) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        for child in std::mem::take(&mut arena.node_mut(*element).children) {
            arena.nodes[child].parent = None;
        }
        arena.node_mut(*element).text = text.to_owned();
        Ok(())
    }

    fn set_property(&self, element: &MemElement, property: &Property) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        let node = arena.node_mut(*element);
        match property {
            Property::Value(value) => node.value.clone_from(value),
            Property::Checked(checked) => node.checked = *checked,
            Property::Selected(selected) => node.selected = *selected,
        }
        Ok(())
    }

    fn append(&self, parent: &MemElement, child: &MemElement) -> Result<(), DomError> {
        if parent == child {
            return Err(DomError::op("append", "element cannot contain itself"));
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn clear_children(&self, element: &MemElement) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        for child in std::mem::take(&mut arena.node_mut(*element).children) {
            arena.nodes[child].parent = None;
        }
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Option<MemElement> {
        self.find(id)
    }

    fn set_visible(&self, element: &MemElement, visible: bool) -> Result<(), DomError> {
        self.inner.borrow_mut().node_mut(*element).visible = visible;
        Ok(())
    }

    fn add_class(&self, element: &MemElement, class: &str) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        let classes = &mut arena.node_mut(*element).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
        Ok(())
    }

    fn remove_class(&self, element: &MemElement, class: &str) -> Result<(), DomError> {
        self.inner
            .borrow_mut()
            .node_mut(*element)
            .classes
            .retain(|c| c != class);
        Ok(())
    }

    fn listen(&self, element: &MemElement, signal: Listen, listener: Listener) -> Result<(), DomError> {
        let mut arena = self.inner.borrow_mut();
        if arena.fail_listen {
            return Err(DomError::Listener("simulated failure".to_owned()));
        }
        arena
            .node_mut(*element)
            .listeners
            .push((signal, listener, Lifetime::Render));
        Ok(())
    }

    fn listen_page(
        &self,
        element: &MemElement,
        signal: Listen,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.inner
            .borrow_mut()
            .node_mut(*element)
            .listeners
            .push((signal, listener, Lifetime::Page));
        Ok(())
    }

    fn release_listeners(&self) {
        let mut arena = self.inner.borrow_mut();
        let mut released = 0;
        for node in &mut arena.nodes {
            let before = node.listeners.len();
            node.listeners.retain(|(_, _, lifetime)| *lifetime == Lifetime::Page);
            released += before - node.listeners.len();
        }
        arena.released += released;
    }
}
