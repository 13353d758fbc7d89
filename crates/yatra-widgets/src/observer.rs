#![forbid(unsafe_code)]

//! Intersection-driven observers: reveal-on-scroll, counters, lazy images.
//!
//! Each observer consumes [`IntersectionEvent`]s for the elements it
//! watches. An element counts as intersecting when its visible ratio is
//! positive and at least the observer's threshold. All three observers are
//! one-shot per element: once triggered, the element is no longer watched.

use ahash::{AHashMap, AHashSet};
use yatra_core::event::{ElementId, IntersectionEvent};

fn crosses(ratio: f32, threshold: f32) -> bool {
    ratio.is_finite() && ratio > 0.0 && ratio >= threshold
}

// ---------------------------------------------------------------------------
// Reveal
// ---------------------------------------------------------------------------

/// Marks elements `animate` the first time they scroll into view.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f32,
    watching: AHashSet<ElementId>,
    revealed: AHashSet<ElementId>,
}

impl RevealObserver {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            watching: AHashSet::new(),
            revealed: AHashSet::new(),
        }
    }

    pub fn observe(&mut self, id: impl Into<ElementId>) {
        let id = id.into();
        if !self.revealed.contains(&id) {
            self.watching.insert(id);
        }
    }

    /// Returns `true` if this report revealed the element.
    pub fn on_intersection(&mut self, event: &IntersectionEvent) -> bool {
        if !crosses(event.ratio, self.threshold) || !self.watching.remove(&event.target) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "observer.reveal", target = %event.target);
        self.revealed.insert(event.target.clone());
        true
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    #[must_use]
    pub fn is_watching(&self, id: &str) -> bool {
        self.watching.contains(id)
    }

    /// Revealed element ids, sorted.
    #[must_use]
    pub fn revealed(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.revealed.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Count-up from 0 to `target` over a fixed number of frames.
///
/// Frame `k` displays `ceil(target * k / frames)`; the last frame displays
/// `target` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    frames: u32,
    frame: u32,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: u64, frames: u32) -> Self {
        Self {
            target,
            frames: frames.max(1),
            frame: 0,
        }
    }

    /// Value shown at frame `k`.
    #[must_use]
    pub fn value_at(&self, k: u32) -> u64 {
        if k >= self.frames {
            return self.target;
        }
        let num = u128::from(self.target) * u128::from(k);
        let den = u128::from(self.frames);
        u64::try_from(num.div_ceil(den)).unwrap_or(self.target)
    }

    /// Advance one frame, returning the value to display.
    pub fn step(&mut self) -> Option<u64> {
        if self.is_done() {
            return None;
        }
        self.frame += 1;
        Some(self.value_at(self.frame))
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.value_at(self.frame)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.frame >= self.frames
    }

    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }
}

/// Starts counter animations when stat numbers come into view.
#[derive(Debug, Clone)]
pub struct CounterObserver {
    threshold: f32,
    frames: u32,
    watching: AHashMap<ElementId, u64>,
    running: Vec<(ElementId, CounterAnimation)>,
    displayed: AHashMap<ElementId, u64>,
}

impl CounterObserver {
    #[must_use]
    pub fn new(threshold: f32, frames: u32) -> Self {
        Self {
            threshold,
            frames,
            watching: AHashMap::new(),
            running: Vec::new(),
            displayed: AHashMap::new(),
        }
    }

    /// Watch a counter with its `data-target`.
    pub fn observe(&mut self, id: impl Into<ElementId>, target: u64) {
        self.watching.insert(id.into(), target);
    }

    /// Returns `true` if this report started the counter.
    pub fn on_intersection(&mut self, event: &IntersectionEvent) -> bool {
        if !crosses(event.ratio, self.threshold) {
            return false;
        }
        let Some(target) = self.watching.remove(&event.target) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "observer.counter.start", target = %event.target, value = target);
        self.displayed.insert(event.target.clone(), 0);
        self.running
            .push((event.target.clone(), CounterAnimation::new(target, self.frames)));
        true
    }

    /// Advance every running counter by one animation frame.
    ///
    /// Returns the `(id, value)` pairs that changed.
    pub fn tick_frame(&mut self) -> Vec<(ElementId, u64)> {
        let mut updates = Vec::with_capacity(self.running.len());
        for (id, anim) in &mut self.running {
            if let Some(value) = anim.step() {
                self.displayed.insert(id.clone(), value);
                updates.push((id.clone(), value));
            }
        }
        self.running.retain(|(_, anim)| !anim.is_done());
        updates
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    #[must_use]
    pub fn displayed(&self, id: &str) -> Option<u64> {
        self.displayed.get(id).copied()
    }

    /// Displayed values of started counters, sorted by id.
    #[must_use]
    pub fn displayed_values(&self) -> Vec<(String, u64)> {
        let mut values: Vec<(String, u64)> =
            self.displayed.iter().map(|(k, v)| (k.clone(), *v)).collect();
        values.sort_unstable();
        values
    }
}

// ---------------------------------------------------------------------------
// Lazy images
// ---------------------------------------------------------------------------

/// Swaps `data-src` into `src` when an image first intersects.
#[derive(Debug, Clone)]
pub struct LazyImageObserver {
    threshold: f32,
    pending: AHashMap<ElementId, String>,
    loaded: AHashMap<ElementId, String>,
}

impl Default for LazyImageObserver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LazyImageObserver {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pending: AHashMap::new(),
            loaded: AHashMap::new(),
        }
    }

    pub fn observe(&mut self, id: impl Into<ElementId>, data_src: impl Into<String>) {
        self.pending.insert(id.into(), data_src.into());
    }

    /// Returns the source to load if this report triggered the image.
    pub fn on_intersection(&mut self, event: &IntersectionEvent) -> Option<String> {
        if !crosses(event.ratio, self.threshold) {
            return None;
        }
        let src = self.pending.remove(&event.target)?;
        self.loaded.insert(event.target.clone(), src.clone());
        Some(src)
    }

    #[must_use]
    pub fn loaded_src(&self, id: &str) -> Option<&str> {
        self.loaded.get(id).map(String::as_str)
    }

    /// Loaded `(id, src)` pairs, sorted by id.
    #[must_use]
    pub fn loaded(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .loaded
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        out.sort_unstable();
        out
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
