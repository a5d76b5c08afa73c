use std::{
    fmt,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
};

use tracing::debug;

use crate::loader::{LoadOutcome, ResourceLoader};

pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request {}", self.0)
    }
}

pub struct Completion {
    pub request: RequestId,
    pub src: String,
    pub outcome: LoadOutcome,
}

/// Starts fetches on loader workers and funnels their outcomes back to the
/// thread that owns the managers.
pub struct Dispatcher {
    loader: ResourceLoader,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    waker: Option<Waker>,
    next_request: u64,
    dispatched: usize,
}

impl Dispatcher {
    pub fn new(loader: ResourceLoader) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            loader,
            sender,
            receiver,
            waker: None,
            next_request: 0,
            dispatched: 0,
        }
    }

    /// `waker` is called from the worker right after a completion is queued.
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    pub fn dispatch(&mut self, src: &str) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.dispatched += 1;
        debug!("dispatching {request} for {src}");

        let sender = self.sender.clone();
        let waker = self.waker.clone();
        let owned = src.to_owned();
        self.loader.load(src, move |outcome| {
            let _ = sender.send(Completion {
                request,
                src: owned,
                outcome,
            });
            if let Some(waker) = waker {
                waker();
            }
        });
        request
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until the next completion arrives.
    pub fn next_blocking(&self) -> Option<Completion> {
        self.receiver.recv().ok()
    }

    /// Total number of fetches handed to the loader.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}
