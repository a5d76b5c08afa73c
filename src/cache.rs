use std::{cell::RefCell, collections::HashSet, rc::Rc};

/// Set of sources that completed a successful fetch at least once.
///
/// Cloning hands out another reference to the same set. Entries are never
/// evicted; membership only means "skip waiting for the network", not that
/// any bytes are still held anywhere.
#[derive(Clone, Default)]
pub struct LoadedCache {
    loaded: Rc<RefCell<HashSet<String>>>,
}

impl LoadedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, src: &str) {
        let mut guard = self.loaded.borrow_mut();
        if !guard.contains(src) {
            guard.insert(src.to_owned());
        }
    }

    pub fn contains(&self, src: &str) -> bool {
        self.loaded.borrow().contains(src)
    }

    pub fn len(&self) -> usize {
        self.loaded.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let cache = LoadedCache::new();
        let other = cache.clone();
        cache.put("photo.png");
        assert!(other.contains("photo.png"));
        assert!(!other.contains("photo.jpg"));
    }

    #[test]
    fn put_is_a_union() {
        let cache = LoadedCache::new();
        cache.put("a.png");
        cache.put("a.png");
        assert_eq!(cache.len(), 1);
    }
}
