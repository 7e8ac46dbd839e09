// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-kind element construction.

use std::rc::Rc;

use serde_json::Value;
use tessera_port::{Captured, DomError, DomPort, Listen, Property};
use tessera_proto::{ComponentKind, ComponentNode, Props};
use tracing::{debug, warn};

use crate::{EventSink, FieldValue, HandlerRegistry, Interaction};

const TITLE_CLASS: &str = "text-2xl font-bold text-gray-900 mb-4";
const TEXT_CLASS: &str = "text-gray-600 mb-2";
const BUTTON_CLASS: &str =
    "bg-blue-500 text-white px-4 py-2 rounded hover:bg-blue-600 transition-colors";
const CONTAINER_CLASS: &str = "p-6";
const FIELD_CLASS: &str = "border border-gray-300 rounded px-3 py-2";
const CHECKBOX_WRAPPER_CLASS: &str = "flex items-center space-x-2";
const CHECKBOX_CLASS: &str = "rounded";
const CHECKBOX_LABEL_CLASS: &str = "text-sm font-medium text-gray-700";
const TABLE_WRAPPER_CLASS: &str = "overflow-x-auto";
const TABLE_CLASS: &str = "w-full divide-y divide-gray-200";
const THEAD_CLASS: &str = "bg-gray-50";
const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TBODY_CLASS: &str = "bg-white divide-y divide-gray-200";
const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-900";
const EVEN_ROW_CLASS: &str = "bg-white";
const ODD_ROW_CLASS: &str = "bg-gray-50";

/// Where rendering records click handlers and where listeners deliver
/// interactions.
pub struct RenderContext<'a> {
    registry: &'a mut HandlerRegistry,
    sink: &'a EventSink,
}

impl<'a> RenderContext<'a> {
    /// Context writing into `registry` and wiring listeners to `sink`.
    pub fn new(registry: &'a mut HandlerRegistry, sink: &'a EventSink) -> Self {
        Self { registry, sink }
    }

    fn emit(&self, interaction: Interaction) -> tessera_port::Listener {
        let sink = Rc::clone(self.sink);
        Rc::new(move |_: Captured| sink(interaction.clone()))
    }

    fn emit_value(&self, element_id: &str) -> tessera_port::Listener {
        let sink = Rc::clone(self.sink);
        let element_id = element_id.to_owned();
        Rc::new(move |captured: Captured| {
            let value = match captured {
                Captured::Text(text) => FieldValue::Text(text),
                Captured::Checked(checked) => FieldValue::Checked(checked),
                Captured::Activated => return,
            };
            sink(Interaction::value(element_id.clone(), value));
        })
    }
}

/// Build the element for `node` (and, for containers, its subtree).
///
/// Never fails for any decoded node; the only errors are host failures.
/// Unknown kinds render a visible placeholder naming the tag.
pub fn render_node<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    match &node.kind {
        ComponentKind::Title => title(dom, node),
        ComponentKind::Text => text(dom, node),
        ComponentKind::Button => button(dom, node, cx),
        ComponentKind::Container => container(dom, node, cx),
        ComponentKind::InputText => input_text(dom, node, cx),
        ComponentKind::Select => select(dom, node, cx),
        ComponentKind::Checkbox => checkbox(dom, node, cx),
        ComponentKind::Table => table(dom, node),
        ComponentKind::Unknown(tag) => {
            warn!(element_id = %node.id, tag = %tag, "unknown component type");
            let el = dom.create("div")?;
            dom.set_text(&el, &format!("Unknown component: {tag}"))?;
            Ok(el)
        }
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn styled<D: DomPort>(
    dom: &D,
    tag: &str,
    id: &str,
    props: &Props,
    default_class: &str,
) -> Result<D::Element, DomError> {
    let el = dom.create(tag)?;
    if !id.is_empty() {
        dom.set_id(&el, id)?;
    }
    dom.set_class(&el, props.class_name().unwrap_or(default_class))?;
    Ok(el)
}

fn title<D: DomPort>(dom: &D, node: &ComponentNode) -> Result<D::Element, DomError> {
    let tag = format!("h{}", node.props.level());
    let el = styled(dom, &tag, &node.id, &node.props, TITLE_CLASS)?;
    dom.set_text(&el, &node.props.text_or("text", ""))?;
    Ok(el)
}

fn text<D: DomPort>(dom: &D, node: &ComponentNode) -> Result<D::Element, DomError> {
    let el = styled(dom, "p", &node.id, &node.props, TEXT_CLASS)?;
    dom.set_text(&el, &node.props.text_or("content", ""))?;
    Ok(el)
}

fn button<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    let el = styled(dom, "button", &node.id, &node.props, BUTTON_CLASS)?;
    dom.set_text(&el, &node.props.text_or("label", "Button"))?;
    match node.handlers.click() {
        Some(handler_id) => {
            dom.listen(&el, Listen::Click, cx.emit(Interaction::click(&node.id, handler_id)))?;
            cx.registry.register(&node.id, handler_id);
        }
        None => debug!(element_id = %node.id, "button has no click handler"),
    }
    Ok(el)
}

fn container<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    let el = styled(dom, "div", &node.id, &node.props, CONTAINER_CLASS)?;
    for child in node.rendered_children() {
        let child_el = render_node(dom, child, cx)?;
        dom.append(&el, &child_el)?;
    }
    Ok(el)
}

fn input_text<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    let el = styled(dom, "input", &node.id, &node.props, FIELD_CLASS)?;
    dom.set_attribute(&el, "type", "text")?;
    dom.set_attribute(&el, "placeholder", &node.props.text_or("placeholder", ""))?;
    dom.set_property(&el, &Property::Value(node.props.text_or("value", "")))?;
    dom.listen(&el, Listen::Input, cx.emit_value(&node.id))?;
    Ok(el)
}

fn select<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    let el = styled(dom, "select", &node.id, &node.props, FIELD_CLASS)?;
    // Pre-selection is a strict string comparison against `props.value`.
    let current = node.props.get("value").and_then(Value::as_str);
    for option in node.props.options() {
        let option_el = dom.create("option")?;
        dom.set_attribute(&option_el, "value", &option.value)?;
        dom.set_text(&option_el, &option.label)?;
        if current == Some(option.value.as_str()) {
            dom.set_property(&option_el, &Property::Selected(true))?;
        }
        dom.append(&el, &option_el)?;
    }
    dom.listen(&el, Listen::Change, cx.emit_value(&node.id))?;
    Ok(el)
}

fn checkbox<D: DomPort>(
    dom: &D,
    node: &ComponentNode,
    cx: &mut RenderContext<'_>,
) -> Result<D::Element, DomError> {
    let wrapper = styled(dom, "div", "", &node.props, CHECKBOX_WRAPPER_CLASS)?;

    let control = dom.create("input")?;
    dom.set_attribute(&control, "type", "checkbox")?;
    if !node.id.is_empty() {
        dom.set_id(&control, &node.id)?;
    }
    dom.set_property(&control, &Property::Checked(node.props.flag("checked")))?;
    dom.set_class(&control, CHECKBOX_CLASS)?;

    let label = dom.create("label")?;
    dom.set_attribute(&label, "for", &node.id)?;
    dom.set_text(&label, &node.props.text_or("label", ""))?;
    dom.set_class(&label, CHECKBOX_LABEL_CLASS)?;

    dom.append(&wrapper, &control)?;
    dom.append(&wrapper, &label)?;
    dom.listen(&control, Listen::Toggle, cx.emit_value(&node.id))?;
    Ok(wrapper)
}

fn table<D: DomPort>(dom: &D, node: &ComponentNode) -> Result<D::Element, DomError> {
    let wrapper = dom.create("div")?;
    dom.set_class(&wrapper, TABLE_WRAPPER_CLASS)?;
    let table = styled(dom, "table", &node.id, &node.props, TABLE_CLASS)?;

    // A declared list drives the body even when empty; the header needs
    // at least one column.
    let columns = node.props.columns();
    if let Some(columns) = columns.as_ref().filter(|columns| !columns.is_empty()) {
        let thead = dom.create("thead")?;
        dom.set_class(&thead, THEAD_CLASS)?;
        let header = dom.create("tr")?;
        for column in columns {
            let th = dom.create("th")?;
            dom.set_text(&th, &capitalize_first(column))?;
            dom.set_class(&th, TH_CLASS)?;
            dom.append(&header, &th)?;
        }
        dom.append(&thead, &header)?;
        dom.append(&table, &thead)?;
    }

    let tbody = dom.create("tbody")?;
    dom.set_class(&tbody, TBODY_CLASS)?;
    for (index, row) in node.props.rows().into_iter().enumerate() {
        let tr = dom.create("tr")?;
        dom.set_class(&tr, if index % 2 == 0 { EVEN_ROW_CLASS } else { ODD_ROW_CLASS })?;
        // Without declared columns each row uses its own keys, so
        // heterogeneous rows do not line up.
        let keys: Vec<String> = match &columns {
            Some(columns) => columns.clone(),
            None => row.keys().into_iter().map(str::to_owned).collect(),
        };
        for key in &keys {
            let td = dom.create("td")?;
            dom.set_text(&td, &row.cell(key))?;
            dom.set_class(&td, TD_CLASS)?;
            dom.append(&tr, &td)?;
        }
        dom.append(&tbody, &tr)?;
    }
    dom.append(&table, &tbody)?;
    dom.append(&wrapper, &table)?;
    Ok(wrapper)
}
