// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted server with deferred replies and request capture.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use tessera_port::{Transport, TransportError};
use tessera_proto::wire::{EventRequest, EventResponse};
use tessera_proto::ComponentTree;

enum Reply<T> {
    Ready(Result<T, TransportError>),
    Deferred(oneshot::Receiver<Result<T, TransportError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, TransportError> {
        match self {
            Self::Ready(result) => result,
            Self::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_owned()))),
        }
    }
}

/// Sender half of a deferred reply; the pending request completes when the
/// gate is resolved.
pub struct Gate<T> {
    tx: oneshot::Sender<Result<T, TransportError>>,
}

impl<T> Gate<T> {
    /// Complete the pending request with `result`.
    pub fn resolve(self, result: Result<T, TransportError>) {
        // The request side may already be gone; nothing to deliver then.
        let _ = self.tx.send(result);
    }

    /// Complete the pending request successfully.
    pub fn succeed(self, value: T) {
        self.resolve(Ok(value));
    }
}

#[derive(Default)]
struct Script {
    trees: VecDeque<Reply<ComponentTree>>,
    events: VecDeque<Reply<EventResponse>>,
    sent: Vec<EventRequest>,
    fetches: usize,
}

/// [`Transport`] answering from queued replies, in order.
///
/// An empty tree queue answers a fetch with a network error; an empty event
/// queue answers with a bare success ("no UI change"). Requests are recorded
/// when issued, before their reply resolves. Clones share the script.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful tree fetch.
    pub fn push_tree(&self, tree: ComponentTree) -> &Self {
        self.inner.borrow_mut().trees.push_back(Reply::Ready(Ok(tree)));
        self
    }

    /// Queue a failed tree fetch.
    pub fn push_tree_error(&self, error: TransportError) -> &Self {
        self.inner.borrow_mut().trees.push_back(Reply::Ready(Err(error)));
        self
    }

    /// Queue a tree fetch that completes when the returned gate resolves.
    pub fn defer_tree(&self) -> Gate<ComponentTree> {
        let (tx, rx) = oneshot::channel();
        self.inner.borrow_mut().trees.push_back(Reply::Deferred(rx));
        Gate { tx }
    }

    /// Queue an event reply.
    pub fn push_event(&self, response: EventResponse) -> &Self {
        self.inner.borrow_mut().events.push_back(Reply::Ready(Ok(response)));
        self
    }

    /// Queue a failed event round trip.
    pub fn push_event_error(&self, error: TransportError) -> &Self {
        self.inner.borrow_mut().events.push_back(Reply::Ready(Err(error)));
        self
    }

    /// Queue an event reply that completes when the returned gate resolves.
    pub fn defer_event(&self) -> Gate<EventResponse> {
        let (tx, rx) = oneshot::channel();
        self.inner.borrow_mut().events.push_back(Reply::Deferred(rx));
        Gate { tx }
    }

    /// Every event request issued so far.
    pub fn sent(&self) -> Vec<EventRequest> {
        self.inner.borrow().sent.clone()
    }

    /// Number of tree fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.inner.borrow().fetches
    }
}

impl Transport for ScriptedTransport {
    fn fetch_tree(&self) -> impl Future<Output = Result<ComponentTree, TransportError>> {
        let reply = {
            let mut script = self.inner.borrow_mut();
            script.fetches += 1;
            script.trees.pop_front()
        };
        async move {
            match reply {
                Some(reply) => reply.resolve().await,
                None => Err(TransportError::Network("no scripted tree".to_owned())),
            }
        }
    }

    fn send_event(
        &self,
        request: &EventRequest,
    ) -> impl Future<Output = Result<EventResponse, TransportError>> {
        let reply = {
            let mut script = self.inner.borrow_mut();
            script.sent.push(request.clone());
            script.events.pop_front()
        };
        async move {
            match reply {
                Some(reply) => reply.resolve().await,
                None => Ok(EventResponse::success(None)),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use tessera_proto::EventType;

    fn click() -> EventRequest {
        EventRequest {
            event_type: EventType::Click,
            element_id: "b1".into(),
            handler_id: Some("h1".into()),
            value: None,
            timestamp: String::new(),
        }
    }

    #[test]
    fn replies_in_order_and_records_requests() {
        let transport = ScriptedTransport::new();
        transport
            .push_event_error(TransportError::Network("down".into()))
            .push_event(EventResponse::success(Some(ComponentTree::new())));
        assert!(block_on(transport.send_event(&click())).is_err());
        let second = block_on(transport.send_event(&click())).unwrap();
        assert!(second.replacement().is_some());
        let third = block_on(transport.send_event(&click())).unwrap();
        assert!(third.replacement().is_none());
        assert_eq!(transport.sent().len(), 3);
    }

    #[test]
    fn deferred_reply_waits_for_gate() {
        let transport = ScriptedTransport::new();
        let gate = transport.defer_tree();
        let pending = transport.fetch_tree();
        assert_eq!(transport.fetch_count(), 1);
        gate.succeed(ComponentTree::new());
        assert!(block_on(pending).unwrap().is_empty());
    }

    #[test]
    fn empty_tree_queue_is_a_network_error() {
        let transport = ScriptedTransport::new();
        assert!(matches!(
            block_on(transport.fetch_tree()),
            Err(TransportError::Network(_))
        ));
    }
}
