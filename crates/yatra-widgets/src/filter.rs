#![forbid(unsafe_code)]

//! Tag filter and criteria search over the package cards.
//!
//! # Filtering
//!
//! `apply_filter(tag)` makes a card visible iff `tag == "all"` or the card's
//! tag set contains `tag`. Every card visible afterwards carries the
//! `ENTERING` flag so the host replays the entrance animation.
//!
//! # Searching
//!
//! Search is two-phase because the page scrolls to the packages before
//! highlighting: [`FilterEngine::check_search`] validates the criteria, and
//! [`FilterEngine::highlight_matches`] applies the highlight later.
//! Highlights are restricted to cards visible under the active filter, and
//! applying a filter drops any highlight.

use ahash::AHashMap;
use bitflags::bitflags;

use crate::notification_queue::Notifier;

/// Filter value that shows every card.
pub const ALL: &str = "all";

pub const EMPTY_SEARCH_MESSAGE: &str = "Please select at least one search criteria.";

bitflags! {
    /// Display state of a card.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CardFlags: u8 {
        /// Shown under the active filter.
        const VISIBLE = 0b0001;
        /// Just revealed; plays the entrance animation.
        const ENTERING = 0b0010;
        /// Matches the last search.
        const HIGHLIGHTED = 0b0100;
    }
}

/// Split a `data-category` attribute into lowercase tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// One package card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `data-destination`.
    pub destination: String,
    tags: Vec<String>,
    flags: CardFlags,
}

impl Card {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            destination: String::new(),
            tags: Vec::new(),
            flags: CardFlags::VISIBLE,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Set tags from a `data-category` style string.
    #[must_use]
    pub fn tags(mut self, raw: &str) -> Self {
        self.tags = parse_tags(raw);
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    #[must_use]
    pub fn tag_list(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> CardFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(CardFlags::VISIBLE)
    }

    fn matches(&self, criteria: &SearchCriteria) -> bool {
        let destination = criteria.destination.trim();
        if !destination.is_empty() && contains_ignore_case(&self.destination, destination) {
            return true;
        }
        let travel_type = criteria.travel_type.trim();
        if !travel_type.is_empty() && self.has_tag(travel_type) {
            return true;
        }
        let text = criteria.text.trim();
        !text.is_empty()
            && (contains_ignore_case(&self.title, text)
                || contains_ignore_case(&self.description, text))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Search form values. Blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub destination: String,
    pub travel_type: String,
    /// Counts as a criterion but matches no card attribute.
    pub duration: String,
    /// Free text matched against title and description.
    pub text: String,
}

impl SearchCriteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.destination, &self.travel_type, &self.duration, &self.text]
            .iter()
            .all(|v| v.trim().is_empty())
    }
}

/// Why a search was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    EmptyCriteria,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCriteria => write!(f, "no search criteria selected"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Render-ready snapshot of the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterView {
    pub active_filter: String,
    /// Filter control values; the one equal to `active_filter` is active.
    pub controls: Vec<String>,
    pub cards: Vec<(String, CardFlags)>,
    /// Bumped by every `apply_filter`; entering cards replay when it moves.
    pub applied: u64,
}

/// Filter/search engine over a fixed card collection.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    active_filter: String,
    controls: Vec<String>,
    cards: Vec<Card>,
    by_id: AHashMap<String, usize>,
    applied: u64,
}

impl FilterEngine {
    /// All cards start visible under `"all"`.
    #[must_use]
    pub fn new(cards: Vec<Card>, controls: Vec<String>) -> Self {
        let by_id = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self {
            active_filter: ALL.to_owned(),
            controls,
            cards,
            by_id,
            applied: 0,
        }
    }

    /// Show only cards tagged `tag` (or every card for `"all"`). Every
    /// visible card plays the entrance animation again.
    ///
    /// Returns the number of visible cards.
    pub fn apply_filter(&mut self, tag: &str) -> usize {
        let tag = tag.trim().to_lowercase();
        let show_all = tag == ALL;
        let mut visible = 0;
        for card in &mut self.cards {
            let now_visible = show_all || card.has_tag(&tag);
            card.flags.remove(CardFlags::HIGHLIGHTED);
            card.flags.set(CardFlags::VISIBLE, now_visible);
            card.flags.set(CardFlags::ENTERING, now_visible);
            visible += usize::from(now_visible);
        }
        self.applied = self.applied.wrapping_add(1);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "filter.apply", filter = %tag, visible);
        self.active_filter = tag;
        visible
    }

    /// Accept or refuse a search before the host scrolls to the results.
    pub fn check_search(
        &self,
        criteria: &SearchCriteria,
        notifier: &mut dyn Notifier,
    ) -> Result<(), SearchError> {
        if criteria.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "filter.search.empty");
            notifier.error(EMPTY_SEARCH_MESSAGE);
            return Err(SearchError::EmptyCriteria);
        }
        Ok(())
    }

    /// Highlight visible cards matching `criteria`; unhighlight the rest.
    ///
    /// Returns the ids of highlighted cards.
    pub fn highlight_matches(&mut self, criteria: &SearchCriteria) -> Vec<String> {
        let mut hits = Vec::new();
        for card in &mut self.cards {
            let hit = card.is_visible() && card.matches(criteria);
            card.flags.set(CardFlags::HIGHLIGHTED, hit);
            if hit {
                hits.push(card.id.clone());
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "filter.search.highlight", hits = hits.len());
        hits
    }

    /// Remove every highlight. Returns whether anything changed.
    pub fn clear_highlights(&mut self) -> bool {
        let mut changed = false;
        for card in &mut self.cards {
            changed |= card.flags.contains(CardFlags::HIGHLIGHTED);
            card.flags.remove(CardFlags::HIGHLIGHTED);
        }
        changed
    }

    #[must_use]
    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.by_id.get(id).and_then(|&i| self.cards.get(i))
    }

    #[must_use]
    pub fn visible_ids(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| c.id.as_str())
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> FilterView {
        FilterView {
            active_filter: self.active_filter.clone(),
            controls: self.controls.clone(),
            cards: self
                .cards
                .iter()
                .map(|c| (c.id.clone(), c.flags))
                .collect(),
            applied: self.applied,
        }
    }
}
