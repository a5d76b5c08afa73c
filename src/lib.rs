//! Deferred image loading.
//!
//! Elements registered with a [`Coordinator`] show a loading placeholder
//! until the shared [`VisibilityWatcher`] reports them inside the viewport.
//! Each element is then driven by its own [`Manager`] through
//! `Loading -> Loaded | Error`, with a [`LoadedCache`] sparing repeat
//! fetches of sources that already loaded once.

#![warn(clippy::all)]

pub mod cache;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod loader;
pub mod manager;
pub mod rect;
pub mod vec2;
pub mod watcher;

#[cfg(test)]
mod testing;

pub use cache::LoadedCache;
pub use config::{DEFAULT_PLACEHOLDER, LazyOptions, Placeholders};
pub use coordinator::{Coordinator, ElementLifecycle};
pub use element::{ElementId, ImageElement};
pub use error::LoadError;
pub use loader::{
    DefaultTransport, LoadHandle, LoadOutcome, OriginResolver, ResourceLoader, Transport,
    UrlResolver,
};
pub use manager::{LoadState, LoadStep, Manager};
pub use rect::Rect;
pub use vec2::Vec2;
pub use watcher::{IntersectionEntry, VisibilityWatcher, WatcherConfig};
