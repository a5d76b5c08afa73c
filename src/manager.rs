use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::{
    cache::LoadedCache,
    config::Placeholders,
    dispatch::{Dispatcher, RequestId},
    element::{ElementId, ImageElement},
    loader::LoadOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadState {
    Loading,
    Loaded,
    Error,
}

/// What a call to [`Manager::load`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    /// Not loading, or a fetch for the current target is already in flight.
    Skipped,
    /// Target was in the shared cache and is displayed right away.
    Cached,
    Dispatched(RequestId),
}

/// Load state of one element.
///
/// State only moves `Loading -> Loaded` or `Loading -> Error`; only
/// [`Manager::update`] puts it back to `Loading`.
pub struct Manager {
    id: ElementId,
    element: Weak<dyn ImageElement>,
    src: String,
    state: LoadState,
    placeholders: Placeholders,
    cache: LoadedCache,
    in_flight: Option<(RequestId, String)>,
}

impl Manager {
    /// Displays the loading placeholder immediately. No fetch happens until
    /// [`Manager::load`].
    pub fn new(
        element: &Rc<dyn ImageElement>,
        src: impl Into<String>,
        placeholders: Placeholders,
        cache: LoadedCache,
    ) -> Self {
        let manager = Self {
            id: element.id(),
            element: Rc::downgrade(element),
            src: src.into(),
            state: LoadState::Loading,
            placeholders,
            cache,
            in_flight: None,
        };
        manager.render(&manager.placeholders.loading);
        manager
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|(request, _)| *request)
    }

    fn render(&self, src: &str) {
        match self.element.upgrade() {
            Some(element) => element.set_src(src),
            None => trace!("element {} is gone, dropping render of {src}", self.id),
        }
    }

    pub fn load(&mut self, dispatcher: &mut Dispatcher) -> LoadStep {
        if self.state != LoadState::Loading {
            return LoadStep::Skipped;
        }

        if matches!(&self.in_flight, Some((_, src)) if *src == self.src) {
            return LoadStep::Skipped;
        }

        if self.cache.contains(&self.src) {
            debug!("{} cache hit for {}", self.id, self.src);
            self.state = LoadState::Loaded;
            self.in_flight = None;
            self.render(&self.src);
            return LoadStep::Cached;
        }

        let request = dispatcher.dispatch(&self.src);
        self.in_flight = Some((request, self.src.clone()));
        LoadStep::Dispatched(request)
    }

    /// Applies the outcome of a fetch this manager dispatched.
    ///
    /// Outcomes of superseded requests leave state and element alone; a
    /// successful one still marks its source as loaded.
    pub fn complete(&mut self, request: RequestId, src: &str, outcome: LoadOutcome) {
        let current = matches!(&self.in_flight, Some((in_flight, _)) if *in_flight == request);
        if !current || self.state != LoadState::Loading {
            trace!("{} ignoring stale {request} for {src}", self.id);
            if outcome.is_ok() {
                self.cache.put(src);
            }
            return;
        }

        self.in_flight = None;
        match outcome {
            Ok(()) => {
                self.state = LoadState::Loaded;
                self.render(&self.src);
                self.cache.put(&self.src);
            }
            Err(error) => {
                self.state = LoadState::Error;
                let placeholder = self.placeholders.error.clone();
                self.render(&placeholder);
                warn!(element = %self.id, src = %self.src, "image failed to load: {error}");
            }
        }
    }

    /// Switches to a new target. Same target is a no-op.
    pub fn update(&mut self, src: &str, dispatcher: &mut Dispatcher) -> LoadStep {
        if self.src == src {
            return LoadStep::Skipped;
        }
        self.src = src.to_owned();
        self.state = LoadState::Loading;
        self.load(dispatcher)
    }
}
