#![forbid(unsafe_code)]

//! Navigation chrome: active-link tracking, navbar state, back-to-top,
//! mobile menu, keyboard focus outline, and the loading screen.

use yatra_core::event::{ClickRegion, KeyCode};
use yatra_core::geometry::SectionBounds;

// ---------------------------------------------------------------------------
// Scroll-driven navbar state
// ---------------------------------------------------------------------------

/// Thresholds for [`NavHighlighter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavThresholds {
    /// Added to `scroll_y` before probing section bounds.
    pub lookahead: f64,
    /// Navbar is `scrolled` strictly beyond this offset.
    pub scrolled_after: f64,
    /// Back-to-top is shown strictly beyond this offset.
    pub back_to_top_after: f64,
}

impl Default for NavThresholds {
    fn default() -> Self {
        Self {
            lookahead: 200.0,
            scrolled_after: 100.0,
            back_to_top_after: 500.0,
        }
    }
}

/// Derived navbar state for one scroll position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Section whose nav link is active.
    pub active: Option<String>,
    pub scrolled: bool,
    pub back_to_top: bool,
}

/// Tracks which section the visitor is reading.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    sections: Vec<SectionBounds>,
    thresholds: NavThresholds,
    state: NavState,
}

impl NavHighlighter {
    #[must_use]
    pub fn new(sections: Vec<SectionBounds>, thresholds: NavThresholds) -> Self {
        Self {
            sections,
            thresholds,
            state: NavState::default(),
        }
    }

    /// Recompute state for `scroll_y`. Returns `true` if anything changed.
    ///
    /// When several sections contain the probe point the last one in
    /// document order wins; when none does, the previous link stays active.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let probe = scroll_y + self.thresholds.lookahead;
        let hit = self
            .sections
            .iter()
            .rev()
            .find(|s| s.contains(probe))
            .map(|s| s.id.clone());
        let next = NavState {
            active: hit.or_else(|| self.state.active.clone()),
            scrolled: scroll_y > self.thresholds.scrolled_after,
            back_to_top: scroll_y > self.thresholds.back_to_top_after,
        };
        if next == self.state {
            return false;
        }
        #[cfg(feature = "tracing")]
        if next.active != self.state.active {
            tracing::debug!(message = "nav.active", section = ?next.active, scroll_y);
        }
        self.state = next;
        true
    }

    /// Activate the link for `section_id` directly (nav click).
    ///
    /// Unknown ids are ignored and return `None`; otherwise the section's
    /// top offset is returned so the host can scroll to it.
    pub fn activate(&mut self, section_id: &str) -> Option<f64> {
        let section = self.section(section_id)?;
        let top = section.top;
        self.state.active = Some(section_id.to_owned());
        Some(top)
    }

    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&SectionBounds> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionBounds] {
        &self.sections
    }

    #[must_use]
    pub fn state(&self) -> &NavState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Mobile menu
// ---------------------------------------------------------------------------

/// Hamburger menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Flip open/closed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Close when a click lands outside the nav container.
    pub fn on_click(&mut self, region: ClickRegion) -> bool {
        region != ClickRegion::NavContainer && self.close()
    }

    /// Close when the window grows past the mobile breakpoint.
    pub fn on_resize(&mut self, width: u32, breakpoint: u32) -> bool {
        width > breakpoint && self.close()
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

// ---------------------------------------------------------------------------
// Keyboard focus outline
// ---------------------------------------------------------------------------

/// `keyboard-navigation` body class: on after Tab, off after mouse down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOutline {
    keyboard: bool,
}

impl FocusOutline {
    /// Returns `true` if the state changed.
    pub fn on_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Tab && !self.keyboard {
            self.keyboard = true;
            return true;
        }
        false
    }

    /// Returns `true` if the state changed.
    pub fn on_pointer_down(&mut self) -> bool {
        std::mem::replace(&mut self.keyboard, false)
    }

    #[inline]
    #[must_use]
    pub fn is_keyboard(&self) -> bool {
        self.keyboard
    }
}

// ---------------------------------------------------------------------------
// Loading screen
// ---------------------------------------------------------------------------

/// Loading overlay lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingScreen {
    #[default]
    Visible,
    /// `fade-out` class applied.
    Fading,
    /// `display: none`.
    Hidden,
}

impl LoadingScreen {
    /// Start fading. Returns `true` if the state changed.
    pub fn fade(&mut self) -> bool {
        if *self == Self::Visible {
            *self = Self::Fading;
            return true;
        }
        false
    }

    /// Hide completely. Returns `true` if the state changed.
    pub fn hide(&mut self) -> bool {
        if *self == Self::Hidden {
            return false;
        }
        *self = Self::Hidden;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> NavHighlighter {
        NavHighlighter::new(
            vec![
                SectionBounds::new("home", 0.0, 800.0),
                SectionBounds::new("destinations", 800.0, 1000.0),
                SectionBounds::new("packages", 1800.0, 900.0),
                // Overlaps the end of packages.
                SectionBounds::new("contact", 2600.0, 600.0),
            ],
            NavThresholds::default(),
        )
    }

    #[test]
    fn probe_uses_lookahead() {
        let mut nav = page();
        assert!(nav.on_scroll(600.0));
        assert_eq!(nav.state().active.as_deref(), Some("destinations"));
        assert!(nav.state().scrolled);
        assert!(nav.state().back_to_top);
    }

    #[test]
    fn last_match_wins() {
        let mut nav = page();
        nav.on_scroll(2450.0);
        assert_eq!(nav.state().active.as_deref(), Some("contact"));
    }

    #[test]
    fn no_match_keeps_previous() {
        let mut nav = page();
        nav.on_scroll(0.0);
        assert_eq!(nav.state().active.as_deref(), Some("home"));
        nav.on_scroll(10_000.0);
        assert_eq!(nav.state().active.as_deref(), Some("home"));
    }

    #[test]
    fn thresholds_are_strict() {
        let mut nav = page();
        nav.on_scroll(100.0);
        assert!(!nav.state().scrolled);
        nav.on_scroll(500.0);
        assert!(nav.state().scrolled);
        assert!(!nav.state().back_to_top);
        assert!(!nav.on_scroll(500.0));
    }

    #[test]
    fn activate_unknown_is_noop() {
        let mut nav = page();
        assert_eq!(nav.activate("nowhere"), None);
        assert_eq!(nav.state().active, None);
        assert_eq!(nav.activate("packages"), Some(1800.0));
        assert_eq!(nav.state().active.as_deref(), Some("packages"));
    }

    #[test]
    fn menu_closes_outside_nav_and_on_wide_resize() {
        let mut m = MobileMenu::default();
        assert!(m.toggle());
        assert!(!m.on_click(ClickRegion::NavContainer));
        assert!(m.on_click(ClickRegion::Elsewhere));
        assert!(!m.is_open());
        m.toggle();
        assert!(!m.on_resize(768, 768));
        assert!(m.on_resize(769, 768));
    }

    #[test]
    fn focus_outline_toggles() {
        let mut f = FocusOutline::default();
        assert!(!f.on_key(KeyCode::Enter));
        assert!(f.on_key(KeyCode::Tab));
        assert!(!f.on_key(KeyCode::Tab));
        assert!(f.on_pointer_down());
        assert!(!f.on_pointer_down());
    }

    #[test]
    fn loading_screen_sequence() {
        let mut l = LoadingScreen::default();
        assert!(l.fade());
        assert!(!l.fade());
        assert!(l.hide());
        assert!(!l.hide());
        assert_eq!(l, LoadingScreen::Hidden);
    }
}
