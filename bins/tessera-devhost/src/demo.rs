// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo server app: a counter, a small profile form and a todo list.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tessera_proto::wire::{EventRequest, EventResponse};
use tessera_proto::{ComponentKind, ComponentNode, ComponentTree, EventType};
use tracing::{debug, info, warn};

/// Server-side handler: mutates the state, returns a diagnostic result.
type Action = fn(&mut DemoState) -> Value;

/// Handler ids bound to actions.
pub(crate) struct HandlerTable(BTreeMap<&'static str, Action>);

impl HandlerTable {
    fn demo() -> Self {
        let mut table: BTreeMap<&'static str, Action> = BTreeMap::new();
        table.insert("h_inc", |s| {
            s.count += 1;
            json!(s.count)
        });
        table.insert("h_dec", |s| {
            s.count -= 1;
            json!(s.count)
        });
        table.insert("h_reset", |s| {
            s.count = 0;
            json!(s.count)
        });
        table.insert("h_add_todo", |s| {
            let task = s.draft.trim().to_owned();
            if task.is_empty() {
                return Value::Null;
            }
            s.todos.push(Todo { task, done: false });
            s.draft.clear();
            json!(s.todos.len())
        });
        table.insert("h_finish_first", |s| {
            if let Some(todo) = s.todos.iter_mut().find(|t| !t.done) {
                todo.done = true;
            }
            json!(s.todos.iter().filter(|t| t.done).count())
        });
        table.insert("h_clear_done", |s| {
            s.todos.retain(|t| !t.done);
            json!(s.todos.len())
        });
        Self(table)
    }

    fn get(&self, handler_id: &str) -> Option<Action> {
        self.0.get(handler_id).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Todo {
    task: String,
    done: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct DemoState {
    count: i64,
    name: String,
    agree: bool,
    color: String,
    draft: String,
    todos: Vec<Todo>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            count: 0,
            name: String::new(),
            agree: false,
            color: "green".to_owned(),
            draft: String::new(),
            todos: vec![Todo {
                task: "Try the counter".to_owned(),
                done: false,
            }],
        }
    }
}

/// The server collaborator: owns state and answers both operations.
pub(crate) struct DemoApp {
    title: String,
    state: DemoState,
    handlers: HandlerTable,
}

impl DemoApp {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: DemoState::default(),
            handlers: HandlerTable::demo(),
        }
    }

    /// Answer the event operation.
    ///
    /// Clicks run their handler and answer with a fresh tree. Value changes
    /// are recorded and answered without a tree.
    pub(crate) fn handle(&mut self, request: &EventRequest) -> EventResponse {
        match request.event_type {
            EventType::Click => self.click(request),
            EventType::Input => {
                self.record(&request.element_id, request.value.as_ref());
                EventResponse::success(None)
            }
            EventType::Other => {
                warn!(element_id = %request.element_id, "unsupported event type");
                EventResponse::handler_error("Unsupported event type", None)
            }
        }
    }

    fn click(&mut self, request: &EventRequest) -> EventResponse {
        let Some(handler_id) = request.handler_id.as_deref() else {
            warn!(element_id = %request.element_id, "click without handler_id");
            return EventResponse::handler_error("Click event without handler_id", Some(self.tree()));
        };
        let Some(action) = self.handlers.get(handler_id) else {
            warn!(handler_id, "handler not found");
            return EventResponse::handler_error(
                format!("Handler {handler_id} not found"),
                Some(self.tree()),
            );
        };
        let result = action(&mut self.state);
        info!(handler_id, element_id = %request.element_id, %result, "handler executed");
        let mut response = EventResponse::success(Some(self.tree()));
        response.handler_result = Some(result);
        response
    }

    fn record(&mut self, element_id: &str, value: Option<&Value>) {
        let text = || value.and_then(Value::as_str).unwrap_or_default().to_owned();
        match element_id {
            "name" => self.state.name = text(),
            "draft" => self.state.draft = text(),
            "color" => self.state.color = text(),
            "agree" => self.state.agree = value.and_then(Value::as_bool).unwrap_or(false),
            other => {
                debug!(element_id = other, "value change for unknown field ignored");
                return;
            }
        }
        debug!(element_id, value = ?value, "field updated");
    }

    /// The current page.
    pub(crate) fn tree(&self) -> ComponentTree {
        use ComponentKind::{Button, Checkbox, Container, InputText, Select, Table, Text, Title};

        let s = &self.state;
        let greeting = if s.name.is_empty() {
            "Tell us your name.".to_owned()
        } else {
            format!("Hello, {}! You like {}.", s.name, s.color)
        };
        let rows: Vec<Value> = s
            .todos
            .iter()
            .map(|t| json!({"task": t.task, "done": if t.done { "yes" } else { "no" }}))
            .collect();

        ComponentTree::from(vec![
            ComponentNode::new("title", Title)
                .with_prop("text", self.title.clone())
                .with_prop("level", 1),
            ComponentNode::new("counter", Container)
                .with_prop("class_name", "card flex gap-2 items-center")
                .with_children([
                    ComponentNode::new("count", Text).with_prop("content", format!("Count: {}", s.count)),
                    ComponentNode::new("dec", Button).with_prop("label", "-1").with_handler("click", "h_dec"),
                    ComponentNode::new("inc", Button).with_prop("label", "+1").with_handler("click", "h_inc"),
                    ComponentNode::new("reset", Button)
                        .with_prop("label", "Reset")
                        .with_handler("click", "h_reset"),
                    ComponentNode::new("broken", Button)
                        .with_prop("label", "Broken handler")
                        .with_handler("click", "h_missing"),
                ]),
            ComponentNode::new("profile", Container)
                .with_prop("class_name", "card space-y-2")
                .with_children([
                    ComponentNode::new("greeting", Text).with_prop("content", greeting),
                    ComponentNode::new("name", InputText)
                        .with_prop("placeholder", "Your name")
                        .with_prop("value", s.name.clone()),
                    ComponentNode::new("agree", Checkbox)
                        .with_prop("label", "Send me updates")
                        .with_prop("checked", s.agree),
                    ComponentNode::new("color", Select)
                        .with_prop("options", json!(["red", "green", "blue"]))
                        .with_prop("value", s.color.clone()),
                ]),
            ComponentNode::new("todo-panel", Container)
                .with_prop("class_name", "card space-y-2")
                .with_children([
                    ComponentNode::new("draft", InputText)
                        .with_prop("placeholder", "New task")
                        .with_prop("value", s.draft.clone()),
                    ComponentNode::new("add", Button)
                        .with_prop("label", "Add")
                        .with_handler("click", "h_add_todo"),
                    ComponentNode::new("finish", Button)
                        .with_prop("label", "Finish next")
                        .with_handler("click", "h_finish_first"),
                    ComponentNode::new("clear", Button)
                        .with_prop("label", "Clear finished")
                        .with_handler("click", "h_clear_done"),
                    ComponentNode::new("todos", Table)
                        .with_prop("columns", json!(["task", "done"]))
                        .with_prop("data", Value::Array(rows)),
                ]),
        ])
    }
}
