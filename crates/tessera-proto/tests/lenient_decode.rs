// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Server trees decode without failing and count the way the renderer walks.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::{json, Value};
use tessera_proto::wire::{RenderResponse, ResponseStatus};
use tessera_proto::{ComponentKind, ComponentNode, ComponentTree};

const TAGS: &[&str] = &[
    "title", "text", "button", "container", "input_text", "select", "checkbox", "table", "",
    "chart", "TITLE",
];

fn arb_node() -> impl Strategy<Value = Value> {
    let leaf = (0usize..TAGS.len(), any::<u16>(), any::<bool>()).prop_map(|(tag, id, click)| {
        let mut node = json!({"id": format!("n{id}"), "type": TAGS[tag], "props": {}});
        if click {
            node["handlers"] = json!({"click": format!("h{id}")});
        }
        node
    });
    leaf.prop_recursive(4, 48, 6, |inner| {
        (prop::collection::vec(inner, 0..6), any::<u16>(), 0usize..TAGS.len(), any::<bool>())
            .prop_map(|(children, id, tag, as_container)| {
                let ty = if as_container { "container" } else { TAGS[tag] };
                json!({"id": format!("c{id}"), "type": ty, "children": children})
            })
    })
}

fn expected_count(node: &Value) -> usize {
    let children = if node["type"] == "container" {
        node["children"].as_array().map_or(0, |c| c.iter().map(expected_count).sum())
    } else {
        0
    };
    1 + children
}

proptest! {
    #[test]
    fn arbitrary_trees_decode(roots in prop::collection::vec(arb_node(), 0..8)) {
        let tree: ComponentTree = serde_json::from_value(Value::Array(roots.clone())).unwrap();
        prop_assert_eq!(tree.len(), roots.len());
        prop_assert_eq!(tree.node_count(), roots.iter().map(expected_count).sum::<usize>());
    }

    #[test]
    fn unknown_tags_keep_their_text(tag in "[a-z_]{1,12}") {
        let node: ComponentNode = serde_json::from_value(json!({"id": "x", "type": tag.clone()})).unwrap();
        if let ComponentKind::Unknown(raw) = &node.kind {
            prop_assert_eq!(raw, &tag);
        } else {
            prop_assert_eq!(node.kind.tag(), tag.as_str());
        }
    }
}

#[test]
fn interactive_ids_ignore_non_buttons_and_missing_handlers() {
    let tree: ComponentTree = serde_json::from_value(json!([
        {"id": "b1", "type": "button", "handlers": {"click": "h1"}},
        {"id": "b2", "type": "button"},
        {"id": "i1", "type": "input_text", "handlers": {"click": "h2"}},
        {"id": "g", "type": "container", "children": [
            {"id": "b3", "type": "button", "handlers": {"click": "h3"}}
        ]}
    ]))
    .unwrap();
    assert_eq!(tree.interactive_ids(), vec!["b1", "b3"]);
}

#[test]
fn one_malformed_root_keeps_its_siblings() {
    let broken = [
        json!({"id": "x", "type": "text", "props": "oops"}),
        json!({"id": "x", "type": "button", "handlers": ["click"]}),
        json!({"id": "x", "type": "container", "children": {"a": 1}}),
        json!(null),
        json!("x"),
        json!(42),
    ];
    for bad in broken {
        let resp: RenderResponse = serde_json::from_value(json!({
            "status": "success",
            "component_tree": [{"id": "t1", "type": "title", "props": {"text": "Hi"}}, bad.clone()]
        }))
        .unwrap();
        let roots = resp.component_tree.roots();
        assert_eq!(roots.len(), 2, "{bad}");
        assert_eq!(roots[0].kind, ComponentKind::Title);
        assert_eq!(roots[0].props.text("text").as_deref(), Some("Hi"));
        assert!(roots[1].handlers.is_empty());
        assert!(roots[1].children.is_empty());
    }
}

#[test]
fn non_object_roots_become_placeholders() {
    let tree: ComponentTree = serde_json::from_value(json!([
        null,
        {"id": "t1", "type": "text"},
        "stray"
    ]))
    .unwrap();
    let kinds: Vec<_> = tree.iter().map(|n| n.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Unknown("null".into()),
            ComponentKind::Text,
            ComponentKind::Unknown("string".into()),
        ]
    );
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn non_string_status_does_not_fail_the_reply() {
    let resp: RenderResponse = serde_json::from_value(json!({
        "status": {"code": 200},
        "component_tree": [{"id": "t1", "type": "title"}]
    }))
    .unwrap();
    assert_eq!(resp.status, Some(ResponseStatus::Success));
    assert_eq!(resp.component_tree.len(), 1);
}
