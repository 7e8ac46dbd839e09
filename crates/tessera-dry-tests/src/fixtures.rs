// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Component trees shared across test suites.

use serde_json::{json, Value};
use tessera_proto::ComponentTree;

/// Decode a tree from a `json!` literal.
///
/// # Panics
/// Panics if `value` is not a JSON array; fixtures are trusted.
#[allow(clippy::expect_used)]
pub fn tree_from_json(value: Value) -> ComponentTree {
    serde_json::from_value(value).expect("fixture must be a JSON array of nodes")
}

/// A single heading `t1` reading "Hi".
pub fn greeting() -> ComponentTree {
    tree_from_json(json!([{"type": "title", "id": "t1", "props": {"text": "Hi"}}]))
}

/// A single button `b1` bound to handler `h1`.
pub fn single_button() -> ComponentTree {
    tree_from_json(json!([
        {"type": "button", "id": "b1", "props": {"label": "Go"}, "handlers": {"click": "h1"}}
    ]))
}

/// A select `s1` with options A/B and "b" pre-selected.
pub fn color_select() -> ComponentTree {
    tree_from_json(json!([{
        "type": "select", "id": "s1",
        "props": {"options": [{"value": "a", "label": "A"}, {"value": "b", "label": "B"}], "value": "b"}
    }]))
}

/// A table with declared columns and one row missing `age`.
pub fn people_table() -> ComponentTree {
    tree_from_json(json!([{
        "type": "table", "id": "people",
        "props": {"columns": ["name", "age"], "data": [{"name": "Ann"}]}
    }]))
}

/// Every component kind, nested, with two interactive buttons.
pub fn kitchen_sink() -> ComponentTree {
    tree_from_json(json!([
        {"type": "title", "id": "title", "props": {"text": "Counter", "level": 2}},
        {"type": "container", "id": "card", "props": {"class_name": "card"}, "children": [
            {"type": "text", "id": "count", "props": {"content": "Count: 0"}},
            {"type": "button", "id": "inc", "props": {"label": "+1"}, "handlers": {"click": "h_inc"}},
            {"type": "button", "id": "noop", "props": {"label": "Inert"}},
            {"type": "container", "id": "form", "children": [
                {"type": "input_text", "id": "name", "props": {"placeholder": "Your name", "value": "Ann"}},
                {"type": "checkbox", "id": "agree", "props": {"label": "I agree", "checked": true}},
                {"type": "button", "id": "reset", "props": {"label": "Reset"}, "handlers": {"click": "h_reset"}}
            ]}
        ]},
        {"type": "select", "id": "color", "props": {"options": ["red", "green"], "value": "green"}},
        {"type": "table", "id": "todos", "props": {"data": [{"task": "write", "done": false}, {"task": "ship", "done": true}]}},
        {"type": "sparkline", "id": "chart"}
    ]))
}
