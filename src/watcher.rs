use std::collections::BTreeMap;

use crate::{element::ElementId, rect::Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherConfig {
    /// Grows (or shrinks, when negative) the viewport before testing.
    pub root_margin: f32,
    /// Fraction of the element that must be visible. `0.0` means any overlap.
    pub threshold: f32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            root_margin: 0.0,
            threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f32,
}

impl IntersectionEntry {
    pub fn visible(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    pub fn hidden(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

#[derive(Default)]
struct Observation {
    bounds: Option<Rect>,
    reported: Option<bool>,
}

/// Reports when observed elements start or stop intersecting the viewport.
///
/// Layout is pushed in by the host; [`VisibilityWatcher::take_records`]
/// returns only the elements whose status changed since the last batch.
pub struct VisibilityWatcher {
    config: WatcherConfig,
    viewport: Rect,
    observed: BTreeMap<ElementId, Observation>,
}

impl VisibilityWatcher {
    pub fn new(config: WatcherConfig) -> Self {
        Self {
            config,
            viewport: Rect::default(),
            observed: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> WatcherConfig {
        self.config
    }

    pub fn observe(&mut self, id: ElementId) {
        self.observed.entry(id).or_default();
    }

    /// Forgets the last reported status of `id` so the next batch reports it
    /// again. Its bounds are kept.
    pub fn reset(&mut self, id: ElementId) {
        if let Some(observation) = self.observed.get_mut(&id) {
            observation.reported = None;
        }
    }

    pub fn unobserve(&mut self, id: ElementId) {
        self.observed.remove(&id);
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.observed.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Ignored for elements that are not observed.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(observation) = self.observed.get_mut(&id) {
            observation.bounds = Some(bounds);
        }
    }

    fn measure(&self, bounds: &Rect) -> (bool, f32) {
        let root = self.viewport.inflate(self.config.root_margin);
        let Some(overlap) = root.intersection(bounds) else {
            return (false, 0.0);
        };
        let area = bounds.area();
        let ratio = if area > 0.0 {
            (overlap.area() / area).min(1.0)
        } else {
            1.0
        };
        let is_intersecting = if self.config.threshold > 0.0 {
            ratio >= self.config.threshold
        } else {
            true
        };
        (is_intersecting, ratio)
    }

    /// Elements without bounds yet are skipped until layout reaches them.
    pub fn take_records(&mut self) -> Vec<IntersectionEntry> {
        let mut records = Vec::new();
        let measured: Vec<_> = self
            .observed
            .iter()
            .filter_map(|(id, observation)| {
                observation
                    .bounds
                    .map(|bounds| (*id, observation.reported, self.measure(&bounds)))
            })
            .collect();

        for (target, reported, (is_intersecting, ratio)) in measured {
            if reported == Some(is_intersecting) {
                continue;
            }
            if let Some(observation) = self.observed.get_mut(&target) {
                observation.reported = Some(is_intersecting);
            }
            records.push(IntersectionEntry {
                target,
                is_intersecting,
                ratio,
            });
        }
        records
    }
}

impl Default for VisibilityWatcher {
    fn default() -> Self {
        Self::new(WatcherConfig::default())
    }
}
