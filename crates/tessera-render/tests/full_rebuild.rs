// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Full-rebuild rendering against the in-memory host.
#![allow(clippy::unwrap_used, clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::json;
use tessera_dry_tests::{fixtures, tree_from_json, MemDom, MemElement};
use tessera_proto::{ComponentKind, ComponentNode, ComponentTree};
use tessera_render::{
    EventSink, FieldValue, FullRebuild, Interaction, RenderReport, Renderer,
};

struct Harness {
    dom: MemDom,
    host: MemElement,
    seen: Rc<RefCell<Vec<Interaction>>>,
    sink: EventSink,
}

impl Harness {
    fn new() -> Self {
        let dom = MemDom::with_host_page();
        let host = dom.find("app-content").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        let sink: EventSink = Rc::new(move |i: Interaction| record.borrow_mut().push(i));
        Self {
            dom,
            host,
            seen,
            sink,
        }
    }

    fn render(&self, tree: &ComponentTree) -> RenderReport {
        FullRebuild
            .replace(&self.dom, &self.host, tree, &self.sink)
            .unwrap()
    }

    fn roots(&self) -> Vec<MemElement> {
        self.dom.children(self.host)
    }
}

#[test]
fn title_renders_a_heading() {
    let h = Harness::new();
    let report = h.render(&fixtures::greeting());
    assert_eq!(report.rendered, 1);
    let roots = h.roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(h.dom.tag(roots[0]), "h1");
    assert_eq!(h.dom.text(roots[0]), "Hi");
    assert_eq!(h.dom.attribute(roots[0], "id").as_deref(), Some("t1"));
    assert_eq!(
        h.dom.attribute(roots[0], "class").as_deref(),
        Some("text-2xl font-bold text-gray-900 mb-4")
    );
}

#[test]
fn heading_level_and_class_override() {
    let h = Harness::new();
    h.render(&tree_from_json(json!([
        {"type": "title", "id": "a", "props": {"text": "x", "level": 3, "class_name": "big"}},
        {"type": "title", "id": "b", "props": {"level": 42}}
    ])));
    let roots = h.roots();
    assert_eq!(h.dom.tag(roots[0]), "h3");
    assert_eq!(h.dom.attribute(roots[0], "class").as_deref(), Some("big"));
    assert_eq!(h.dom.tag(roots[1]), "h6");
    assert_eq!(h.dom.text(roots[1]), "");
}

#[test]
fn text_content_is_never_markup() {
    let h = Harness::new();
    h.render(&tree_from_json(json!([
        {"type": "text", "id": "p", "props": {"content": "<b>bold</b>"}}
    ])));
    let p = h.roots()[0];
    assert_eq!(h.dom.tag(p), "p");
    assert_eq!(h.dom.text(p), "<b>bold</b>");
    assert!(h.dom.children(p).is_empty());
}

#[test]
fn button_with_handler_registers_and_emits_click() {
    let h = Harness::new();
    let report = h.render(&fixtures::single_button());
    assert_eq!(report.handlers.handler_for("b1"), Some("h1"));
    assert_eq!(h.dom.click("b1"), 1);
    assert_eq!(*h.seen.borrow(), vec![Interaction::click("b1", "h1")]);
}

#[test]
fn button_without_handler_is_inert() {
    let h = Harness::new();
    let report = h.render(&tree_from_json(json!([{"type": "button", "id": "b"}])));
    assert!(report.handlers.is_empty());
    let b = h.roots()[0];
    assert_eq!(h.dom.text(b), "Button");
    assert_eq!(h.dom.click("b"), 0);
    assert!(h.seen.borrow().is_empty());
}

#[test]
fn select_preselects_matching_option() {
    let h = Harness::new();
    h.render(&fixtures::color_select());
    let select = h.roots()[0];
    let options = h.dom.children(select);
    assert_eq!(options.len(), 2);
    assert_eq!(h.dom.text(options[0]), "A");
    assert_eq!(h.dom.text(options[1]), "B");
    assert!(!h.dom.selected(options[0]));
    assert!(h.dom.selected(options[1]));

    h.dom.choose("s1", "a");
    assert_eq!(
        *h.seen.borrow(),
        vec![Interaction::value("s1", FieldValue::Text("a".into()))]
    );
}

#[test]
fn table_with_missing_cell_renders_empty_cell() {
    let h = Harness::new();
    let report = h.render(&fixtures::people_table());
    assert!(report.failures.is_empty());
    let wrapper = h.roots()[0];
    assert_eq!(h.dom.attribute(wrapper, "class").as_deref(), Some("overflow-x-auto"));
    let table = h.dom.children(wrapper)[0];
    assert_eq!(h.dom.attribute(table, "id").as_deref(), Some("people"));
    let [thead, tbody] = h.dom.children(table)[..] else {
        panic!("expected thead and tbody");
    };
    let headers: Vec<String> = h
        .dom
        .children(h.dom.children(thead)[0])
        .into_iter()
        .map(|th| h.dom.text(th))
        .collect();
    assert_eq!(headers, vec!["Name", "Age"]);
    let rows = h.dom.children(tbody);
    assert_eq!(rows.len(), 1);
    let cells: Vec<String> = h
        .dom
        .children(rows[0])
        .into_iter()
        .map(|td| h.dom.text(td))
        .collect();
    assert_eq!(cells, vec!["Ann", ""]);
}

#[test]
fn empty_declared_columns_render_rows_without_cells() {
    let h = Harness::new();
    h.render(&tree_from_json(json!([{"type": "table", "id": "t", "props": {
        "columns": [],
        "data": [{"name": "Ann", "age": 3}]
    }}])));
    let table = h.dom.children(h.roots()[0])[0];
    let sections = h.dom.children(table);
    assert_eq!(sections.len(), 1, "no header for an empty column list");
    let rows = h.dom.children(sections[0]);
    assert_eq!(rows.len(), 1);
    assert!(h.dom.children(rows[0]).is_empty());
}

#[test]
fn table_rows_band_by_parity_and_fall_back_to_own_keys() {
    let h = Harness::new();
    h.render(&tree_from_json(json!([{"type": "table", "id": "t", "props": {"data": [
        {"a": 1, "b": 0},
        {"c": "x"},
        {"a": true}
    ]}}])));
    let table = h.dom.children(h.roots()[0])[0];
    let sections = h.dom.children(table);
    assert_eq!(sections.len(), 1, "no header without declared columns");
    let rows = h.dom.children(sections[0]);
    let classes: Vec<_> = rows
        .iter()
        .map(|r| h.dom.attribute(*r, "class").unwrap())
        .collect();
    assert_eq!(classes, vec!["bg-white", "bg-gray-50", "bg-white"]);
    let widths: Vec<_> = rows.iter().map(|r| h.dom.children(*r).len()).collect();
    assert_eq!(widths, vec![2, 1, 1]);
    let first: Vec<_> = h
        .dom
        .children(rows[0])
        .into_iter()
        .map(|td| h.dom.text(td))
        .collect();
    assert_eq!(first, vec!["1", "0"]);
}

#[test]
fn checkbox_is_wrapped_with_label_and_reports_state() {
    let h = Harness::new();
    h.render(&tree_from_json(json!([
        {"type": "checkbox", "id": "agree", "props": {"label": "I agree"}}
    ])));
    let wrapper = h.roots()[0];
    assert_eq!(h.dom.attribute(wrapper, "id"), None);
    let [control, label] = h.dom.children(wrapper)[..] else {
        panic!("expected control and label");
    };
    assert_eq!(h.dom.attribute(control, "type").as_deref(), Some("checkbox"));
    assert_eq!(h.dom.attribute(label, "for").as_deref(), Some("agree"));
    assert_eq!(h.dom.text(label), "I agree");
    assert!(!h.dom.checked(control));

    h.dom.toggle("agree");
    assert_eq!(
        *h.seen.borrow(),
        vec![Interaction::value("agree", FieldValue::Checked(true))]
    );
}

#[test]
fn value_controls_emit_without_declared_handlers() {
    let h = Harness::new();
    let report = h.render(&tree_from_json(json!([
        {"type": "input_text", "id": "name", "props": {"placeholder": "Name", "value": "Ann"}}
    ])));
    assert!(report.handlers.is_empty());
    let input = h.roots()[0];
    assert_eq!(h.dom.value(input), "Ann");
    assert_eq!(h.dom.attribute(input, "placeholder").as_deref(), Some("Name"));
    h.dom.type_text("name", "Bob");
    assert_eq!(
        *h.seen.borrow(),
        vec![Interaction::value("name", FieldValue::Text("Bob".into()))]
    );
}

#[test]
fn unknown_kind_renders_placeholder() {
    let h = Harness::new();
    let report = h.render(&tree_from_json(json!([{"type": "sparkline", "id": "s"}])));
    assert_eq!(report.rendered, 1);
    let el = h.roots()[0];
    assert_eq!(h.dom.tag(el), "div");
    assert_eq!(h.dom.text(el), "Unknown component: sparkline");
}

#[test]
fn malformed_root_renders_placeholder_beside_siblings() {
    let h = Harness::new();
    let report = h.render(&tree_from_json(json!([
        {"type": "title", "id": "t1", "props": {"text": "Hi"}},
        null,
        {"type": "text", "id": "p", "props": "oops"}
    ])));
    assert!(report.failures.is_empty());
    assert_eq!(report.rendered, 3);
    let texts: Vec<String> = h.roots().into_iter().map(|el| h.dom.text(el)).collect();
    assert_eq!(texts, vec!["Hi", "Unknown component: null", ""]);
}

#[test]
fn failing_node_does_not_stop_siblings() {
    let h = Harness::new();
    h.dom.fail_on("table");
    let report = h.render(&tree_from_json(json!([
        {"type": "text", "id": "before", "props": {"content": "1"}},
        {"type": "table", "id": "broken"},
        {"type": "button", "id": "after", "handlers": {"click": "h"}}
    ])));
    assert_eq!(report.rendered, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].id, "broken");
    let ids: Vec<_> = h
        .roots()
        .into_iter()
        .map(|el| h.dom.attribute(el, "id").unwrap())
        .collect();
    assert_eq!(ids, vec!["before", "after"]);
    assert_eq!(report.handlers.handler_for("after"), Some("h"));
}

#[test]
fn failed_subtree_contributes_no_handlers() {
    let h = Harness::new();
    h.dom.fail_on("p");
    let report = h.render(&tree_from_json(json!([
        {"type": "container", "id": "c", "children": [
            {"type": "button", "id": "b", "handlers": {"click": "h"}},
            {"type": "text", "id": "t"}
        ]}
    ])));
    assert_eq!(report.failures.len(), 1);
    assert!(report.handlers.is_empty());
}

#[test]
fn rerender_replaces_elements_and_listeners() {
    let h = Harness::new();
    h.render(&fixtures::kitchen_sink());
    let before = h.dom.listener_count();
    assert!(before > 0);
    let report = h.render(&fixtures::greeting());
    assert_eq!(h.roots().len(), 1);
    assert_eq!(h.dom.listener_count(), 0);
    assert_eq!(h.dom.released_count(), before);
    assert!(report.handlers.is_empty());
    assert!(h.dom.find("inc").is_none());
}

#[test]
fn rendering_the_same_tree_twice_is_structurally_identical() {
    let h = Harness::new();
    let tree = fixtures::kitchen_sink();
    h.render(&tree);
    let first = h.dom.outline(h.host);
    h.render(&tree);
    assert_eq!(h.dom.outline(h.host), first);
}

#[test]
fn empty_tree_empties_the_host() {
    let h = Harness::new();
    h.render(&fixtures::kitchen_sink());
    let report = h.render(&ComponentTree::new());
    assert_eq!(report.rendered, 0);
    assert!(h.roots().is_empty());
}

fn node_strategy() -> impl Strategy<Value = ComponentNode> {
    let leaf = (0u8..6, any::<bool>()).prop_map(|(kind, click)| {
        let kind = match kind {
            0 => ComponentKind::Title,
            1 => ComponentKind::Text,
            2 | 3 => ComponentKind::Button,
            4 => ComponentKind::InputText,
            _ => ComponentKind::Unknown("widget".into()),
        };
        let node = ComponentNode::new("", kind);
        if click {
            node.with_handler("click", "h")
        } else {
            node
        }
    });
    leaf.prop_recursive(4, 40, 5, |inner| {
        prop::collection::vec(inner, 0..5)
            .prop_map(|children| ComponentNode::new("", ComponentKind::Container).with_children(children))
    })
}

/// Give every node a unique id in pre-order.
fn number(nodes: &mut [ComponentNode], next: &mut usize) {
    for node in nodes {
        node.id = format!("n{next}");
        *next += 1;
        number(&mut node.children, next);
    }
}

fn element_count(node: &ComponentNode) -> usize {
    1 + node.rendered_children().iter().map(element_count).sum::<usize>()
}

proptest! {
    #[test]
    fn one_element_per_root_and_registry_matches_buttons(
        roots in prop::collection::vec(node_strategy(), 0..6)
    ) {
        let mut roots = roots;
        number(&mut roots, &mut 0);
        let tree = ComponentTree::from(roots);
        let h = Harness::new();
        let report = h.render(&tree);

        let rendered = h.roots();
        prop_assert_eq!(rendered.len(), tree.len());
        for (el, node) in rendered.iter().zip(tree.iter()) {
            prop_assert_eq!(h.dom.descendant_count(*el) + 1, element_count(node));
        }

        let mut expected = tree.interactive_ids();
        expected.sort_unstable();
        let registered: Vec<&str> = report.handlers.iter().map(|(e, _)| e).collect();
        prop_assert_eq!(registered, expected);
    }
}
