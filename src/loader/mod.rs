//! Single-shot resource fetching.
//!
//! A [`ResourceLoader`] turns an image source into exactly one outcome: the
//! resource was fetched and decodes as an image, or it failed with a
//! [`LoadError`]. Nothing here touches managers or the shared cache.

use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    thread,
};

use futures::channel::oneshot;
use tracing::error;
use url::Url;

use crate::error::LoadError;

mod transport;

pub use transport::{DefaultTransport, Transport, decode_data_url};

pub type LoadOutcome = Result<(), LoadError>;

/// Turns a possibly relative source into the absolute url that is fetched.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, src: &str) -> Result<Url, LoadError>;
}

impl<F> UrlResolver for F
where
    F: Fn(&str) -> Result<Url, LoadError> + Send + Sync,
{
    fn resolve(&self, src: &str) -> Result<Url, LoadError> {
        self(src)
    }
}

/// Anchors relative sources at the root of a page origin (scheme, host and
/// port). Sources that already parse as absolute urls pass through.
#[derive(Debug, Clone)]
pub struct OriginResolver {
    root: Url,
}

impl OriginResolver {
    pub fn new(origin: Url) -> Self {
        let mut root = origin;
        root.set_path("/");
        root.set_query(None);
        root.set_fragment(None);
        Self { root }
    }

    pub fn parse(origin: &str) -> Result<Self, LoadError> {
        let url = Url::parse(origin).map_err(|source| LoadError::InvalidUrl {
            src: origin.to_owned(),
            source,
        })?;
        Ok(Self::new(url))
    }
}

impl Default for OriginResolver {
    fn default() -> Self {
        Self::new(Url::parse("http://localhost/").expect("static origin is a valid url"))
    }
}

impl UrlResolver for OriginResolver {
    fn resolve(&self, src: &str) -> Result<Url, LoadError> {
        let invalid = |source| LoadError::InvalidUrl {
            src: src.to_owned(),
            source,
        };
        match Url::parse(src) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self.root.join(src).map_err(invalid),
            Err(error) => Err(invalid(error)),
        }
    }
}

#[derive(Clone)]
pub struct ResourceLoader {
    transport: Arc<dyn Transport>,
    resolver: Arc<dyn UrlResolver>,
}

impl ResourceLoader {
    pub fn new(transport: impl Transport, resolver: impl UrlResolver + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolve(&self, src: &str) -> Result<Url, LoadError> {
        if src.is_empty() {
            return Err(LoadError::EmptySource);
        }
        self.resolver.resolve(src)
    }

    /// Fetches and decodes `src` on the calling thread.
    pub fn load_blocking(&self, src: &str) -> LoadOutcome {
        let url = self.resolve(src)?;
        let bytes = self.transport.fetch(&url)?;
        image::load_from_memory(&bytes)?;
        Ok(())
    }

    /// Starts one fetch on a worker thread. `done` runs exactly once, on the
    /// worker, with the outcome. A panic inside the transport or the decoder
    /// is reported as [`LoadError::Disconnected`].
    pub fn load<F>(&self, src: &str, done: F)
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        let loader = self.clone();
        let src = src.to_owned();
        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| loader.load_blocking(&src)))
                .unwrap_or_else(|_| {
                    error!("loader worker panicked while fetching {src}");
                    Err(LoadError::Disconnected)
                });
            done(outcome);
        });
    }

    /// Same as [`ResourceLoader::load`] but hands the outcome back as a future.
    pub fn fetch(&self, src: &str) -> LoadHandle {
        let (sender, receiver) = oneshot::channel();
        self.load(src, move |outcome| {
            let _ = sender.send(outcome);
        });
        LoadHandle { receiver }
    }
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new(DefaultTransport::new(), OriginResolver::default())
    }
}

/// Resolves once the fetch started by [`ResourceLoader::fetch`] finishes.
pub struct LoadHandle {
    receiver: oneshot::Receiver<LoadOutcome>,
}

impl Future for LoadHandle {
    type Output = LoadOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(LoadError::Disconnected)),
            Poll::Pending => Poll::Pending,
        }
    }
}
