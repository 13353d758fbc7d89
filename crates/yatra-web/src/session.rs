#![forbid(unsafe_code)]

//! Host-driven site session.
//!
//! [`SiteSession`] owns one instance of every interaction engine, the
//! one-shot [`Scheduler`], the scroll/resize debouncers, and the toast
//! queue. The host drives it in three ways:
//!
//! 1. push browser events with [`handle_event`](SiteSession::handle_event),
//! 2. call the page-level entry points (`change_slide`, `next_step`, ...),
//! 3. advance time and call [`step`](SiteSession::step), which fires due
//!    timers, flushes debouncers, ticks animations, and returns the DOM
//!    patches for the frame.
//!
//! Nothing blocks and nothing reads a wall clock; the same inputs always
//! produce the same patches.

use std::time::Duration;

use yatra_core::debounce::Debouncer;
use yatra_core::event::{ElementId, Event, IntersectionEvent, TouchSurface};
use yatra_core::geometry::{ElementBox, Viewport};
use yatra_core::gesture::{Swipe, SwipeRecognizer};
use yatra_runtime::{
    Clock, DeterministicClock, MemoryStore, PreferenceStore, Scheduler, SiteConfig, Theme,
};
use yatra_widgets::Notifier;
use yatra_widgets::carousel::{Carousel, Direction, Transition};
use yatra_widgets::filter::{FilterEngine, SearchCriteria};
use yatra_widgets::forms::{self, ContactForm};
use yatra_widgets::modal::BookingModal;
use yatra_widgets::nav::{
    FocusOutline, LoadingScreen, MobileMenu, NavHighlighter, NavThresholds,
};
use yatra_widgets::notification_queue::{NotificationQueue, QueueAction, QueueConfig};
use yatra_widgets::observer::{CounterObserver, LazyImageObserver, RevealObserver};
use yatra_widgets::wizard::{StepWizard, WizardOutcome};

use crate::catalog;
use crate::dom::{DomPatch, Target, ids};
use crate::error::{self, SiteError};
use crate::layout::PageLayout;
use crate::render::{self, SiteView};

/// Notification shown by [`SiteSession::show_all_destinations`].
pub const ALL_DESTINATIONS_MESSAGE: &str = "Loading all 29 states and territories...";
/// Notification shown by [`SiteSession::show_all_packages`].
pub const ALL_PACKAGES_MESSAGE: &str = "Loading additional travel packages...";

/// One-shot work deferred through the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    FadeLoadingScreen,
    HideLoadingScreen,
    OpenBookingModal,
    ExploreDestination(String),
    HighlightSearch(SearchCriteria),
    ClearHighlights,
}

/// Output of one [`SiteSession::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Patches to apply, in order.
    pub patches: Vec<DomPatch>,
    /// Earliest instant at which another step would change something.
    pub next_deadline: Option<Duration>,
    /// A counter is mid-animation; step again on the next frame.
    pub animating: bool,
}

/// All interactive state of one page.
pub struct SiteSession {
    config: SiteConfig,
    clock: DeterministicClock,
    store: Box<dyn PreferenceStore>,
    theme: Theme,

    section_ids: Vec<String>,
    nav: NavHighlighter,
    menu: MobileMenu,
    focus: FocusOutline,
    loading: LoadingScreen,

    hero: Carousel,
    testimonials: Carousel,
    swipe: SwipeRecognizer,

    wizard: StepWizard,
    modal: BookingModal,
    filter: FilterEngine,

    reveal: RevealObserver,
    counters: CounterObserver,
    images: LazyImageObserver,

    toasts: NotificationQueue,
    scheduler: Scheduler<Deferred>,
    scroll: Debouncer<f64>,
    resize: Debouncer<u32>,

    outbox: Vec<DomPatch>,
    last_view: Option<SiteView>,
}

impl std::fmt::Debug for SiteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteSession")
            .field("now", &self.now())
            .field("theme", &self.theme)
            .field("hero", &self.hero.active())
            .field("testimonial", &self.testimonials.active())
            .field("step", &self.wizard.current())
            .field("modal", &self.modal.phase())
            .field("filter", &self.filter.active_filter())
            .field("pending_timers", &self.scheduler.pending_count())
            .finish_non_exhaustive()
    }
}

impl SiteSession {
    /// Create a session with in-memory preferences.
    #[must_use]
    pub fn new(layout: PageLayout, config: SiteConfig) -> Self {
        Self::with_store(layout, config, Box::new(MemoryStore::new()))
    }

    /// Create a session backed by `store`. The theme is read immediately.
    #[must_use]
    pub fn with_store(
        layout: PageLayout,
        config: SiteConfig,
        store: Box<dyn PreferenceStore>,
    ) -> Self {
        let theme = Theme::load(store.as_ref());
        let thresholds = NavThresholds {
            lookahead: config.scroll.nav_lookahead_px,
            scrolled_after: config.scroll.navbar_scrolled_after_px,
            back_to_top_after: config.scroll.back_to_top_after_px,
        };
        let queue = QueueConfig::new()
            .max_visible(config.notifications.max_visible)
            .max_queued(config.notifications.max_queued)
            .default_duration(config.notifications.display());

        let mut reveal = RevealObserver::new(config.observer.reveal_threshold);
        for id in &layout.reveal {
            reveal.observe(id.clone());
        }
        let mut counters =
            CounterObserver::new(config.observer.counter_threshold, config.observer.counter_frames);
        for c in &layout.counters {
            counters.observe(c.id.clone(), c.target);
        }
        let mut images = LazyImageObserver::new(config.observer.lazy_threshold);
        for img in &layout.lazy_images {
            images.observe(img.id.clone(), img.src.clone());
        }

        let mut session = Self {
            clock: DeterministicClock::new(),
            store,
            theme,
            section_ids: layout.sections.iter().map(|s| s.id.clone()).collect(),
            nav: NavHighlighter::new(layout.section_bounds(), thresholds),
            menu: MobileMenu::default(),
            focus: FocusOutline::default(),
            loading: LoadingScreen::Visible,
            hero: Carousel::new(
                "hero",
                layout.hero_slides,
                config.hero.interval(),
                config.hero.settle(),
            ),
            testimonials: Carousel::new(
                "testimonials",
                layout.testimonials,
                config.testimonials.interval(),
                config.testimonials.settle(),
            ),
            swipe: SwipeRecognizer::new(config.gesture.swipe_config()),
            wizard: StepWizard::new(layout.step_specs()),
            modal: BookingModal::new(config.booking.close_delay()),
            filter: FilterEngine::new(layout.cards(), layout.filters.clone()),
            reveal,
            counters,
            images,
            toasts: NotificationQueue::new(queue),
            scheduler: Scheduler::new(),
            scroll: Debouncer::new(config.scroll.debounce()),
            resize: Debouncer::new(config.resize.debounce()),
            outbox: Vec::new(),
            last_view: None,
            config,
        };
        session.start();
        session
    }

    /// Decode a JSON layout sent by the host.
    pub fn from_json_layout(json: &str, config: SiteConfig) -> Result<Self, SiteError> {
        let layout = PageLayout::from_json(json).map_err(|e| SiteError::Layout(e.to_string()))?;
        Ok(Self::new(layout, config))
    }

    fn start(&mut self) {
        let now = self.now();
        if self.config.hero.auto_start {
            self.hero.start(now);
        }
        if self.config.testimonials.auto_start {
            self.testimonials.start(now);
        }
        self.scheduler
            .schedule(now, self.config.loading.fade_after(), Deferred::FadeLoadingScreen);
        tracing::info!(
            message = "site.start",
            sections = self.section_ids.len(),
            slides = self.hero.len(),
            testimonials = self.testimonials.len(),
            steps = self.wizard.total(),
            theme = self.theme.as_str(),
        );
    }

    // -- time --------------------------------------------------------------

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Advance the session clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the session clock. Moving backwards is ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Catch up with an external clock, e.g. a `MonotonicClock` on
    /// native hosts.
    pub fn sync_clock(&mut self, clock: &dyn Clock) {
        self.clock.set(clock.now_mono());
    }

    // -- host events -------------------------------------------------------

    /// Route one browser event to the engines that care about it.
    pub fn handle_event(&mut self, event: &Event) {
        let now = self.now();
        match event {
            Event::Key(key) => {
                self.focus.on_key(key.code);
                self.modal.on_key(key.code, now);
            }
            Event::PointerDown => {
                self.focus.on_pointer_down();
            }
            Event::Touch(_) => {
                if let Some(swipe) = self.swipe.process(event) {
                    self.apply_swipe(&swipe, now);
                }
            }
            Event::Scroll(scroll) => {
                self.scroll.push(scroll.y, now);
            }
            Event::Resize(resize) => {
                self.resize.push(resize.width, now);
            }
            Event::Click(click) => {
                self.menu.on_click(click.region);
                self.modal.on_click(click.region, now);
            }
            Event::Intersection(hit) => self.on_intersection(hit),
        }
    }

    /// Decode and route a JSON-encoded host event.
    ///
    /// Returns `Ok(false)` for event kinds with no engine meaning.
    #[cfg(feature = "input-parser")]
    pub fn push_encoded_input(&mut self, json: &str) -> Result<bool, SiteError> {
        match crate::input_parser::parse_encoded_input_to_event(json)? {
            Some(event) => {
                self.handle_event(&event);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Feed measured element boxes to the observers, for hosts without an
    /// `IntersectionObserver`. Reveal targets use the configured bottom
    /// inset; counters and images use the plain viewport.
    pub fn observe_boxes(&mut self, viewport: Viewport, boxes: &[(ElementId, ElementBox)]) {
        let margin = self.config.observer.reveal_bottom_margin_px;
        for (id, bounds) in boxes {
            let inset = IntersectionEvent {
                target: id.clone(),
                ratio: viewport.visible_ratio(*bounds, margin),
            };
            self.reveal.on_intersection(&inset);
            let plain = IntersectionEvent {
                target: id.clone(),
                ratio: viewport.visible_ratio(*bounds, 0.0),
            };
            self.counters.on_intersection(&plain);
            self.images.on_intersection(&plain);
        }
    }

    fn on_intersection(&mut self, hit: &IntersectionEvent) {
        self.reveal.on_intersection(hit);
        self.counters.on_intersection(hit);
        self.images.on_intersection(hit);
    }

    fn apply_swipe(&mut self, swipe: &Swipe, now: Duration) {
        let carousel = match swipe.surface {
            TouchSurface::Hero => &mut self.hero,
            TouchSurface::Testimonials => &mut self.testimonials,
        };
        carousel.on_swipe(swipe, now);
    }

    // -- frame -------------------------------------------------------------

    /// Run everything due at the current time and return the frame's patches.
    pub fn step(&mut self) -> StepResult {
        let now = self.now();
        let _span = tracing::debug_span!("site.step", now_ms = now.as_millis() as u64).entered();

        for deferred in self.scheduler.fire_due(now) {
            self.run_deferred(deferred, now);
        }
        if let Some(y) = self.scroll.poll(now) {
            self.nav.on_scroll(y);
        }
        if let Some(width) = self.resize.poll(now) {
            self.menu
                .on_resize(width, self.config.resize.mobile_breakpoint_px);
        }
        self.hero.tick(now);
        self.testimonials.tick(now);
        self.modal.tick(now);
        self.counters.tick_frame();
        let toast_actions = self.toasts.tick(now);

        let view = self.view();
        let mut patches = std::mem::take(&mut self.outbox);
        patches.extend(render::diff(self.last_view.as_ref(), &view));
        patches.extend(self.toast_patches(&toast_actions));
        self.last_view = Some(view);

        if !patches.is_empty() {
            tracing::debug!(message = "site.patches", count = patches.len());
        }
        StepResult {
            patches,
            next_deadline: self.next_deadline(),
            animating: self.counters.is_animating(),
        }
    }

    fn run_deferred(&mut self, deferred: Deferred, now: Duration) {
        match deferred {
            Deferred::FadeLoadingScreen => {
                if self.loading.fade() {
                    self.scheduler.schedule(
                        now,
                        self.config.loading.hide_after_fade(),
                        Deferred::HideLoadingScreen,
                    );
                }
            }
            Deferred::HideLoadingScreen => {
                self.loading.hide();
            }
            Deferred::OpenBookingModal => {
                self.open_booking_modal();
            }
            Deferred::ExploreDestination(id) => match catalog::lookup(&id) {
                Some(destination) => {
                    let message =
                        format!("{} details would open in a dedicated modal.", destination.name);
                    self.toasts.info(&message);
                }
                None => error::report(&SiteError::UnknownDestination(id)),
            },
            Deferred::HighlightSearch(criteria) => {
                let hits = self.filter.highlight_matches(&criteria);
                tracing::debug!(message = "site.search.highlight", hits = hits.len());
                self.scheduler.replace(
                    now,
                    self.config.search.highlight(),
                    Deferred::ClearHighlights,
                );
            }
            Deferred::ClearHighlights => {
                self.filter.clear_highlights();
            }
        }
    }

    fn toast_patches(&self, actions: &[QueueAction]) -> Vec<DomPatch> {
        actions
            .iter()
            .filter_map(|action| match *action {
                QueueAction::Hide(id) => Some(DomPatch::RemoveToast { id: id.get() }),
                QueueAction::Show(id) => self.toasts.get(id).map(|toast| DomPatch::InsertToast {
                    id: id.get(),
                    kind: toast.kind.class_name().to_owned(),
                    icon: toast.kind.icon().to_owned(),
                    message: toast.message.clone(),
                }),
            })
            .collect()
    }

    /// Earliest instant at which [`step`](Self::step) has timed work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.scheduler.next_deadline(),
            self.scroll.deadline(),
            self.resize.deadline(),
            self.hero.next_deadline(),
            self.testimonials.next_deadline(),
            self.modal.next_deadline(),
            self.toasts.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Snapshot of everything visible.
    #[must_use]
    pub fn view(&self) -> SiteView {
        SiteView {
            loading: self.loading,
            sections: self.section_ids.clone(),
            nav: self.nav.state().clone(),
            menu_open: self.menu.is_open(),
            keyboard_nav: self.focus.is_keyboard(),
            theme: self.theme,
            hero: self.hero.view(),
            testimonials: self.testimonials.view(),
            wizard: self.wizard.view(),
            modal: self.modal.view(),
            filter: self.filter.view(),
            revealed: self.reveal.revealed().into_iter().map(str::to_owned).collect(),
            counters: self.counters.displayed_values(),
            images: self
                .images
                .loaded()
                .into_iter()
                .map(|(id, src)| (id.to_owned(), src.to_owned()))
                .collect(),
        }
    }

    // -- booking -----------------------------------------------------------

    /// Show the booking modal and restart the wizard.
    pub fn open_booking_modal(&mut self) -> bool {
        if !self.modal.open() {
            return false;
        }
        self.wizard.reset();
        self.outbox.push(DomPatch::ResetForm {
            id: ids::BOOKING_FORM.to_owned(),
        });
        true
    }

    pub fn close_booking_modal(&mut self) -> bool {
        let now = self.now();
        self.modal.close(now)
    }

    pub fn set_booking_field(&mut self, field: &str, value: &str) {
        self.wizard.set_field(field, value);
    }

    pub fn next_step(&mut self) -> WizardOutcome {
        self.wizard.next(&mut self.toasts)
    }

    pub fn previous_step(&mut self) -> WizardOutcome {
        self.wizard.previous()
    }

    /// Submit the booking from the last step; closes the modal on success.
    pub fn submit_booking(&mut self) -> WizardOutcome {
        let outcome = self.wizard.submit(&mut self.toasts);
        if outcome == WizardOutcome::Submitted {
            self.outbox.push(DomPatch::ResetForm {
                id: ids::BOOKING_FORM.to_owned(),
            });
            self.close_booking_modal();
        }
        outcome
    }

    // -- carousels ---------------------------------------------------------

    /// Step the hero slider by the sign of `direction`.
    pub fn change_slide(&mut self, direction: i32) -> Result<Transition, SiteError> {
        let direction = Direction::from_sign(direction).ok_or(SiteError::NoDirection)?;
        let now = self.now();
        self.hero
            .advance(direction, now)
            .ok_or(SiteError::EmptyCarousel("hero"))
    }

    /// Show hero slide `index` (wrapped into range).
    pub fn go_to_slide(&mut self, index: i64) -> Result<Transition, SiteError> {
        let now = self.now();
        self.hero
            .jump_to(index, now)
            .ok_or(SiteError::EmptyCarousel("hero"))
    }

    /// Step the testimonial rotator by the sign of `direction`.
    pub fn change_testimonial(&mut self, direction: i32) -> Result<Transition, SiteError> {
        let direction = Direction::from_sign(direction).ok_or(SiteError::NoDirection)?;
        let now = self.now();
        self.testimonials
            .advance(direction, now)
            .ok_or(SiteError::EmptyCarousel("testimonials"))
    }

    /// Show testimonial `index` (wrapped into range).
    pub fn current_testimonial(&mut self, index: i64) -> Result<Transition, SiteError> {
        let now = self.now();
        self.testimonials
            .jump_to(index, now)
            .ok_or(SiteError::EmptyCarousel("testimonials"))
    }

    /// Stop both carousels from auto-advancing (e.g. the tab is hidden).
    pub fn pause_carousels(&mut self) {
        self.hero.pause();
        self.testimonials.pause();
    }

    /// Resume auto-advance one interval from now.
    pub fn resume_carousels(&mut self) {
        let now = self.now();
        self.hero.resume(now);
        self.testimonials.resume(now);
    }

    // -- navigation --------------------------------------------------------

    /// Mark the nav link active, scroll the section into view, close the menu.
    pub fn scroll_to_section(&mut self, section_id: &str) -> Result<(), SiteError> {
        if self.nav.activate(section_id).is_none() {
            return Err(SiteError::UnknownSection(section_id.to_owned()));
        }
        self.outbox.push(DomPatch::ScrollIntoView {
            target: Target::id(section_id),
        });
        self.menu.close();
        Ok(())
    }

    pub fn scroll_to_top(&mut self) {
        self.outbox.push(DomPatch::ScrollTo { top: 0.0 });
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle()
    }

    pub fn close_menu(&mut self) -> bool {
        self.menu.close()
    }

    // -- packages ----------------------------------------------------------

    /// Apply a package filter. Returns the number of visible cards.
    pub fn filter(&mut self, tag: &str) -> usize {
        self.scheduler
            .cancel_where(|d| matches!(d, Deferred::ClearHighlights));
        self.filter.apply_filter(tag)
    }

    /// Scroll to the packages and highlight matches shortly after.
    pub fn search(&mut self, criteria: SearchCriteria) -> Result<(), SiteError> {
        self.filter.check_search(&criteria, &mut self.toasts)?;
        let now = self.now();
        self.outbox.push(DomPatch::ScrollIntoView {
            target: Target::id(ids::PACKAGES_SECTION),
        });
        self.scheduler
            .cancel_where(|d| matches!(d, Deferred::HighlightSearch(_)));
        self.scheduler.schedule(
            now,
            self.config.search.highlight_delay(),
            Deferred::HighlightSearch(criteria),
        );
        Ok(())
    }

    pub fn book_package(&mut self, package_id: &str) {
        let message = format!("Booking {} package...", catalog::humanize_id(package_id));
        self.toasts.info(&message);
        self.schedule_booking_open();
    }

    pub fn book_experience(&mut self, experience_id: &str) {
        let message = format!("Booking {} experience...", catalog::humanize_id(experience_id));
        self.toasts.info(&message);
        self.schedule_booking_open();
    }

    fn schedule_booking_open(&mut self) {
        let now = self.now();
        self.scheduler.replace(
            now,
            self.config.stubs.booking_open_delay(),
            Deferred::OpenBookingModal,
        );
    }

    pub fn view_package_details(&mut self, package_id: &str) {
        let message = format!("Loading {} package details...", catalog::humanize_id(package_id));
        self.toasts.info(&message);
    }

    pub fn show_all_destinations(&mut self) {
        self.toasts.info(ALL_DESTINATIONS_MESSAGE);
    }

    pub fn show_all_packages(&mut self) {
        self.toasts.info(ALL_PACKAGES_MESSAGE);
    }

    /// Announce the destination now and its details after the explore delay.
    pub fn explore_destination(&mut self, destination_id: &str) {
        let message = format!("Exploring {}...", catalog::capitalize(destination_id));
        self.toasts.info(&message);
        let now = self.now();
        self.scheduler.schedule(
            now,
            self.config.stubs.explore_delay(),
            Deferred::ExploreDestination(destination_id.to_owned()),
        );
    }

    // -- forms -------------------------------------------------------------

    /// Validate and "send" the contact form from its `(name, value)` pairs.
    pub fn submit_contact<'a>(
        &mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), SiteError> {
        let mut form = ContactForm::from_pairs(pairs);
        form.submit(&mut self.toasts)?;
        self.outbox.push(DomPatch::ResetForm {
            id: ids::CONTACT_FORM.to_owned(),
        });
        Ok(())
    }

    pub fn subscribe_newsletter(&mut self, email: &str) -> Result<(), SiteError> {
        forms::subscribe_newsletter(email, &mut self.toasts)?;
        self.outbox.push(DomPatch::ResetForm {
            id: ids::NEWSLETTER_FORM.to_owned(),
        });
        Ok(())
    }

    // -- preferences -------------------------------------------------------

    /// Flip the theme and persist it.
    ///
    /// The new theme is applied even when the store refuses the write.
    pub fn toggle_theme(&mut self) -> Result<Theme, SiteError> {
        self.theme = self.theme.toggle();
        tracing::debug!(message = "site.theme", theme = self.theme.as_str());
        self.theme.store(self.store.as_mut())?;
        Ok(self.theme)
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn hero(&self) -> &Carousel {
        &self.hero
    }

    #[must_use]
    pub fn testimonials(&self) -> &Carousel {
        &self.testimonials
    }

    #[must_use]
    pub fn wizard(&self) -> &StepWizard {
        &self.wizard
    }

    #[must_use]
    pub fn modal(&self) -> &BookingModal {
        &self.modal
    }

    #[must_use]
    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filter
    }

    #[must_use]
    pub fn toasts(&self) -> &NotificationQueue {
        &self.toasts
    }

    #[must_use]
    pub fn loading(&self) -> LoadingScreen {
        self.loading
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatra_core::event::{ClickRegion, KeyCode};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn session() -> SiteSession {
        SiteSession::new(PageLayout::tourism_site(), SiteConfig::default())
    }

    #[test]
    fn loading_screen_fades_then_hides() {
        let mut s = session();
        s.step();
        s.set_time(ms(2000));
        s.step();
        assert_eq!(s.loading(), LoadingScreen::Fading);
        s.set_time(ms(2499));
        s.step();
        assert_eq!(s.loading(), LoadingScreen::Fading);
        s.set_time(ms(2500));
        s.step();
        assert_eq!(s.loading(), LoadingScreen::Hidden);
    }

    #[test]
    fn escape_closes_modal_after_delay() {
        let mut s = session();
        assert!(s.open_booking_modal());
        s.set_time(ms(100));
        s.handle_event(&Event::key(KeyCode::Escape));
        assert!(!s.modal().is_open());
        s.set_time(ms(399));
        s.step();
        assert!(s.modal().view().displayed);
        s.set_time(ms(400));
        s.step();
        assert!(!s.modal().view().displayed);
    }

    #[test]
    fn click_outside_nav_closes_menu() {
        let mut s = session();
        assert!(s.toggle_menu());
        s.handle_event(&Event::click(ClickRegion::NavContainer));
        assert!(s.menu_open());
        s.handle_event(&Event::click(ClickRegion::Elsewhere));
        assert!(!s.menu_open());
    }

    #[test]
    fn zero_direction_is_rejected() {
        let mut s = session();
        assert!(matches!(s.change_slide(0), Err(SiteError::NoDirection)));
        assert_eq!(s.hero().active(), 0);
    }

    #[test]
    fn empty_carousels_are_inert() {
        let mut s = SiteSession::new(PageLayout::default(), SiteConfig::default());
        assert!(matches!(
            s.change_testimonial(1),
            Err(SiteError::EmptyCarousel("testimonials"))
        ));
        assert!(s.hero().next_deadline().is_none());
    }

    #[test]
    fn sync_clock_follows_external_time() {
        let mut s = session();
        let mut external = DeterministicClock::new();
        external.advance(ms(2000));
        s.sync_clock(&external);
        assert_eq!(s.now(), ms(2000));
        s.sync_clock(&yatra_runtime::MonotonicClock::new());
        assert_eq!(s.now(), ms(2000));
    }

    #[test]
    fn paused_carousels_hold_still() {
        let mut s = session();
        s.pause_carousels();
        assert!(s.next_deadline().is_some_and(|d| d < ms(5000)));
        s.set_time(ms(20_000));
        s.step();
        assert_eq!((s.hero().active(), s.testimonials().active()), (0, 0));
        s.resume_carousels();
        assert_eq!(s.hero().next_deadline(), Some(ms(25_000)));
    }

    #[test]
    fn far_future_time_steps_promptly() {
        let mut s = session();
        s.step();
        s.set_time(Duration::MAX);
        s.step();
        s.advance_time(Duration::MAX);
        s.step();
        assert!(s.hero().active() < s.hero().len());
        assert!(s.testimonials().active() < s.testimonials().len());
    }

    #[test]
    fn toggle_theme_persists() {
        let mut s = session();
        assert_eq!(s.toggle_theme().ok(), Some(Theme::Dark));
        assert_eq!(s.store().get(yatra_runtime::THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn stored_theme_is_read_at_start() {
        let mut store = MemoryStore::new();
        Theme::Dark.store(&mut store).expect("memory store");
        let s = SiteSession::with_store(
            PageLayout::tourism_site(),
            SiteConfig::default(),
            Box::new(store),
        );
        assert_eq!(s.theme(), Theme::Dark);
    }
}
