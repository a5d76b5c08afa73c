//! Registry of managed elements plus the shared visibility watcher.
//!
//! The [`Coordinator`] lives on one thread. Fetches run on loader workers,
//! but their outcomes are only applied when the host calls
//! [`Coordinator::poll`] or [`Coordinator::run_until_idle`].

use std::{cell::RefCell, collections::HashMap, rc::Rc, sync::Arc};

use tracing::debug;

use crate::{
    cache::LoadedCache,
    config::{LazyOptions, Placeholders},
    dispatch::{Completion, Dispatcher, RequestId},
    element::{ElementId, ImageElement},
    loader::ResourceLoader,
    manager::{LoadState, LoadStep, Manager},
    rect::Rect,
    watcher::{IntersectionEntry, VisibilityWatcher, WatcherConfig},
};

/// The three calls a host UI layer makes as elements come and go.
pub trait ElementLifecycle {
    fn register(&mut self, element: &Rc<dyn ImageElement>, src: &str);

    fn target_changed(&mut self, id: ElementId, src: &str);

    fn unregister(&mut self, id: ElementId);
}

pub struct Coordinator {
    managers: HashMap<ElementId, Rc<RefCell<Manager>>>,
    watcher: VisibilityWatcher,
    cache: LoadedCache,
    placeholders: Placeholders,
    dispatcher: Dispatcher,
    // keeps managers alive until their fetch reports, even after removal
    pending: HashMap<RequestId, Rc<RefCell<Manager>>>,
}

impl Coordinator {
    pub fn new(options: &LazyOptions, loader: ResourceLoader) -> Self {
        Self {
            managers: HashMap::new(),
            watcher: VisibilityWatcher::new(WatcherConfig::default()),
            cache: LoadedCache::new(),
            placeholders: options.placeholders(),
            dispatcher: Dispatcher::new(loader),
            pending: HashMap::new(),
        }
    }

    /// `waker` runs on a loader worker whenever an outcome is ready to be
    /// picked up by [`Coordinator::poll`].
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.dispatcher.set_waker(Arc::new(waker));
        self
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    pub fn cache(&self) -> &LoadedCache {
        &self.cache
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.managers.contains_key(&id)
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.watcher.is_observing(id)
    }

    pub fn state(&self, id: ElementId) -> Option<LoadState> {
        self.managers.get(&id).map(|manager| manager.borrow().state())
    }

    pub fn target(&self, id: ElementId) -> Option<String> {
        self.managers
            .get(&id)
            .map(|manager| manager.borrow().src().to_owned())
    }

    /// Fetches in flight, including those of removed elements.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total fetches handed to the loader so far.
    pub fn dispatched(&self) -> usize {
        self.dispatcher.dispatched()
    }

    /// Starts managing `element`, showing the loading placeholder right away.
    /// Adding an element that is already registered replaces its manager.
    pub fn add<E: ImageElement + 'static>(&mut self, element: &Rc<E>, src: &str) {
        let element: Rc<dyn ImageElement> = element.clone();
        self.insert(&element, src);
    }

    fn insert(&mut self, element: &Rc<dyn ImageElement>, src: &str) {
        let id = element.id();
        if self.managers.remove(&id).is_some() {
            debug!("{id} registered twice, replacing its manager");
            self.watcher.reset(id);
        }

        let manager = Manager::new(
            element,
            src,
            self.placeholders.clone(),
            self.cache.clone(),
        );
        self.managers.insert(id, Rc::new(RefCell::new(manager)));
        self.watcher.observe(id);
        debug!("{id} registered with {src}");
    }

    pub fn update(&mut self, id: ElementId, src: &str) {
        let Some(manager) = self.managers.get(&id).cloned() else {
            return;
        };
        let step = manager.borrow_mut().update(src, &mut self.dispatcher);
        self.track(step, &manager);
    }

    pub fn remove(&mut self, id: ElementId) {
        if self.managers.contains_key(&id) {
            self.unregister_id(id);
        }
    }

    fn unregister_id(&mut self, id: ElementId) {
        self.managers.remove(&id);
        self.watcher.unobserve(id);
        debug!("{id} unregistered");
    }

    fn track(&mut self, step: LoadStep, manager: &Rc<RefCell<Manager>>) {
        if let LoadStep::Dispatched(request) = step {
            self.pending.insert(request, manager.clone());
        }
    }

    /// Visibility callback. Elements reported as visible get loaded, or
    /// dropped from the registry when they already are.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(manager) = self.managers.get(&entry.target).cloned() else {
                continue;
            };
            if manager.borrow().state() == LoadState::Loaded {
                self.unregister_id(entry.target);
                continue;
            }
            let step = manager.borrow_mut().load(&mut self.dispatcher);
            self.track(step, &manager);
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.watcher.set_viewport(viewport);
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.watcher.set_bounds(id, bounds);
    }

    fn apply(&mut self, completion: Completion) {
        let Completion {
            request,
            src,
            outcome,
        } = completion;
        match self.pending.remove(&request) {
            Some(manager) => manager.borrow_mut().complete(request, &src, outcome),
            None => debug!("no manager waiting on {request}"),
        }
    }

    /// Delivers pending visibility changes and every fetch outcome that has
    /// arrived so far. Never blocks. Returns how many events were handled.
    pub fn poll(&mut self) -> usize {
        let records = self.watcher.take_records();
        let mut handled = records.len();
        self.on_intersection(&records);

        while let Some(completion) = self.dispatcher.try_next() {
            self.apply(completion);
            handled += 1;
        }
        handled
    }

    /// Like [`Coordinator::poll`], but waits for every in-flight fetch to
    /// report first.
    pub fn run_until_idle(&mut self) -> usize {
        let mut handled = self.poll();
        while !self.pending.is_empty() {
            let Some(completion) = self.dispatcher.next_blocking() else {
                break;
            };
            self.apply(completion);
            handled += 1 + self.poll();
        }
        handled
    }
}

impl ElementLifecycle for Coordinator {
    fn register(&mut self, element: &Rc<dyn ImageElement>, src: &str) {
        self.insert(element, src);
    }

    fn target_changed(&mut self, id: ElementId, src: &str) {
        self.update(id, src);
    }

    fn unregister(&mut self, id: ElementId) {
        self.remove(id);
    }
}
