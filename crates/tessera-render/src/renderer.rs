// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Whole-tree replacement.

use serde::Serialize;
use tessera_port::{DomError, DomPort};
use tessera_proto::ComponentTree;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{render_node, EventSink, HandlerRegistry, RenderContext};

/// A root node that could not be built; its siblings still rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeFailure {
    /// Position among the roots.
    pub index: usize,
    /// Node id (possibly empty).
    pub id: String,
    /// Host failure message.
    pub error: String,
}

/// Outcome of one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Root nodes attached to the host.
    pub rendered: usize,
    /// Root nodes that failed, in order.
    pub failures: Vec<NodeFailure>,
    /// Click handlers of every attached subtree.
    pub handlers: HandlerRegistry,
}

/// Failure of the render cycle as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The content host could not be emptied; nothing was rendered.
    #[error("cannot clear content host: {0}")]
    ClearHost(#[source] DomError),
}

/// Strategy that turns a tree into the content of the host element.
///
/// The controller only depends on this trait, so an incremental renderer can
/// replace [`FullRebuild`] without touching transport or dispatch.
pub trait Renderer<D: DomPort> {
    /// Replace everything under `host` with `tree`, wiring listeners to
    /// `sink`. Per-node failures are reported, not raised.
    fn replace(
        &self,
        dom: &D,
        host: &D::Element,
        tree: &ComponentTree,
        sink: &EventSink,
    ) -> Result<RenderReport, RenderError>;
}

/// Discards every element and listener, then rebuilds from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullRebuild;

impl<D: DomPort> Renderer<D> for FullRebuild {
    fn replace(
        &self,
        dom: &D,
        host: &D::Element,
        tree: &ComponentTree,
        sink: &EventSink,
    ) -> Result<RenderReport, RenderError> {
        dom.release_listeners();
        dom.clear_children(host).map_err(RenderError::ClearHost)?;

        let duplicates = tree.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "element ids are not unique in this tree");
        }

        let mut report = RenderReport::default();
        for (index, node) in tree.iter().enumerate() {
            // Handlers of a root only count once the root is attached.
            let mut scratch = HandlerRegistry::new();
            let built = render_node(dom, node, &mut RenderContext::new(&mut scratch, sink))
                .and_then(|el| dom.append(host, &el));
            match built {
                Ok(()) => {
                    report.handlers.absorb(scratch);
                    report.rendered += 1;
                }
                Err(error) => {
                    warn!(
                        index,
                        element_id = %node.id,
                        kind = %node.kind,
                        %error,
                        "component failed to render"
                    );
                    report.failures.push(NodeFailure {
                        index,
                        id: node.id.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }
        debug!(
            rendered = report.rendered,
            failed = report.failures.len(),
            handlers = report.handlers.len(),
            "component tree rendered"
        );
        Ok(report)
    }
}
