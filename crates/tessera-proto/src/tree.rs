// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The whole page as an ordered list of root nodes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::node::decode_node;
use crate::ComponentNode;

/// Ordered root nodes describing the full page at one point in time.
///
/// Replaced wholesale on every successful fetch; nothing carries over
/// between trees.
///
/// Decoding isolates each root: an entry that is not a node object becomes
/// an `Unknown` placeholder instead of failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComponentTree(Vec<ComponentNode>);

impl ComponentTree {
    /// Empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> &[ComponentNode] {
        &self.0
    }

    /// Iterate root nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentNode> {
        self.0.iter()
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty page.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the root list.
    pub fn into_inner(self) -> Vec<ComponentNode> {
        self.0
    }

    /// Pre-order walk over every node the renderer would visit
    /// (children are only followed through containers).
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a ComponentNode)) {
        fn go<'a>(node: &'a ComponentNode, visit: &mut impl FnMut(&'a ComponentNode)) {
            visit(node);
            for child in node.rendered_children() {
                go(child, visit);
            }
        }
        for root in &self.0 {
            go(root, &mut visit);
        }
    }

    /// Count of rendered nodes at every depth.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    /// Ids of buttons with a declared `click` handler, in walk order.
    pub fn interactive_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(|node| {
            if node.is_interactive() {
                ids.push(node.id.as_str());
            }
        });
        ids
    }

    /// Number of buttons with a declared `click` handler.
    pub fn interactive_count(&self) -> usize {
        self.interactive_ids().len()
    }

    /// Ids that occur more than once among rendered nodes.
    pub fn duplicate_ids(&self) -> BTreeSet<&str> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        self.walk(|node| *seen.entry(node.id.as_str()).or_default() += 1);
        seen.into_iter()
            .filter(|(id, n)| *n > 1 && !id.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// First rendered node with `id`.
    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        let mut found = None;
        self.walk(|node| {
            if found.is_none() && node.id == id {
                found = Some(node);
            }
        });
        found
    }
}

impl<'de> Deserialize<'de> for ComponentTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let roots = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self(roots.into_iter().map(decode_node).collect()))
    }
}

impl From<Vec<ComponentNode>> for ComponentTree {
    fn from(roots: Vec<ComponentNode>) -> Self {
        Self(roots)
    }
}

impl FromIterator<ComponentNode> for ComponentTree {
    fn from_iter<I: IntoIterator<Item = ComponentNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ComponentTree {
    type Item = &'a ComponentNode;
    type IntoIter = std::slice::Iter<'a, ComponentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
