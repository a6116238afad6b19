//! Neighbour preloading for the gallery.

use std::collections::HashSet;

/// Indices within `radius` of `current`, nearest first, next before previous.
///
/// Wraps around the list and never contains `current` or duplicates, so a
/// two-image list yields one neighbour.
pub fn adjacent_indices(current: usize, total: usize, radius: usize) -> Vec<usize> {
    if total <= 1 || current >= total {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(radius * 2);
    for step in 1..=radius.min(total - 1) {
        let next = (current + step) % total;
        let prev = (current + total - step % total) % total;
        for idx in [next, prev] {
            if idx != current && !indices.contains(&idx) {
                indices.push(idx);
            }
        }
    }
    indices
}

/// Remembers which URLs were already loaded or preloaded this page session.
#[derive(Debug, Clone)]
pub struct PreloadSet {
    /// Number of neighbours to preload on each side
    radius: usize,
    known: HashSet<String>,
}

impl PreloadSet {
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            known: HashSet::new(),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn set_radius(&mut self, radius: usize) {
        self.radius = radius;
    }

    /// Record `url` as cached. Returns `true` if it was not known before.
    pub fn mark(&mut self, url: &str) -> bool {
        if self.known.contains(url) {
            return false;
        }
        self.known.insert(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.known.contains(url)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// URLs around `current` in `images` that still need preloading.
    /// They are marked as known on return.
    pub fn plan(&mut self, images: &[String], current: usize) -> Vec<String> {
        adjacent_indices(current, images.len(), self.radius)
            .into_iter()
            .filter_map(|idx| images.get(idx))
            .filter(|url| self.mark(url))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}.png", i)).collect()
    }

    #[test]
    fn test_adjacent_wraps() {
        assert_eq!(adjacent_indices(0, 5, 1), vec![1, 4]);
        assert_eq!(adjacent_indices(4, 5, 1), vec![0, 3]);
        assert_eq!(adjacent_indices(2, 5, 2), vec![3, 1, 4, 0]);
    }

    #[test]
    fn test_adjacent_small_lists() {
        assert!(adjacent_indices(0, 0, 1).is_empty());
        assert!(adjacent_indices(0, 1, 1).is_empty());
        assert_eq!(adjacent_indices(0, 2, 1), vec![1]);
        assert_eq!(adjacent_indices(1, 3, 5), vec![2, 0]);
        assert!(adjacent_indices(7, 3, 1).is_empty());
    }

    #[test]
    fn test_plan_skips_known() {
        let images = urls(4);
        let mut set = PreloadSet::new(1);
        set.mark("0.png");

        assert_eq!(set.plan(&images, 0), vec!["1.png", "3.png"]);
        // Neighbours of 1 are 2 (new) and 0 (known)
        assert_eq!(set.plan(&images, 1), vec!["2.png"]);
        assert!(set.plan(&images, 2).is_empty());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_plan_with_duplicate_urls() {
        let images = vec!["a.png".to_string(), "b.png".to_string(), "b.png".to_string()];
        let mut set = PreloadSet::new(1);
        assert_eq!(set.plan(&images, 0), vec!["b.png"]);
    }

    #[test]
    fn test_radius_zero_disables() {
        let mut set = PreloadSet::new(0);
        assert!(set.plan(&urls(3), 0).is_empty());
        set.set_radius(1);
        assert_eq!(set.radius(), 1);
        assert_eq!(set.plan(&urls(3), 0).len(), 2);
    }
}
