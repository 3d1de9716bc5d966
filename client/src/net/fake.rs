//! Scripted transport for gateway tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;

use super::transport::{ApiReply, ApiRequest, Transport, TransportError};

type Outcome = Result<ApiReply, TransportError>;

enum Scripted {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
struct Inner {
    script: VecDeque<Scripted>,
    requests: Vec<ApiRequest>,
}

/// Replays scripted outcomes in order and records every request it sees.
/// An exhausted script answers with a network error.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    inner: Rc<RefCell<Inner>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.push(Scripted::Ready(Ok(ApiReply::new(status, body))));
        self
    }

    pub(crate) fn fail(&self, err: TransportError) -> &Self {
        self.push(Scripted::Ready(Err(err)));
        self
    }

    /// Script an outcome that resolves only once the returned sender fires.
    pub(crate) fn gate(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    fn push(&self, scripted: Scripted) {
        self.inner.borrow_mut().script.push_back(scripted);
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        let next = {
            let mut inner = self.inner.borrow_mut();
            inner.requests.push(request);
            inner.script.pop_front()
        };
        match next {
            Some(Scripted::Ready(outcome)) => outcome,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_owned()))),
            None => Err(TransportError::Network("no scripted reply".to_owned())),
        }
    }
}
