use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Identity of a managed element. Lookups in the registry and the
/// visibility watcher are keyed by this, never by the element value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Hands out a process-unique id for hosts that have no identity of
    /// their own to offer.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A renderable image element owned by the host.
///
/// The loader reads nothing from it except its identity and writes exactly
/// one attribute, the displayed image source.
pub trait ImageElement {
    fn id(&self) -> ElementId;

    fn set_src(&self, src: &str);
}
