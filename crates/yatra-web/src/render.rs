#![forbid(unsafe_code)]

//! View snapshot and reconciler.
//!
//! [`SiteView`] gathers the `view()` snapshots of every engine. [`diff`]
//! compares two snapshots and emits the [`DomPatch`]es that turn the page
//! showing `prev` into the page showing `next`. With no previous snapshot
//! every piece is emitted, which is how the first frame syncs the page.
//!
//! # Invariants
//!
//! 1. `diff(Some(v), v)` is empty.
//! 2. Applying `diff(None, next)` to any page yields `next`'s page.
//! 3. Per group, patches are emitted in index order.

use yatra_runtime::Theme;
use yatra_widgets::carousel::CarouselView;
use yatra_widgets::filter::{CardFlags, FilterView};
use yatra_widgets::modal::ModalView;
use yatra_widgets::nav::{LoadingScreen, NavState};
use yatra_widgets::wizard::WizardView;

use crate::dom::{DomPatch, Target, ids};

/// Everything visible on the page, as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteView {
    pub loading: LoadingScreen,
    /// Section ids in document order; nav link `i` points at section `i`.
    pub sections: Vec<String>,
    pub nav: NavState,
    pub menu_open: bool,
    pub keyboard_nav: bool,
    pub theme: Theme,
    pub hero: CarouselView,
    pub testimonials: CarouselView,
    pub wizard: WizardView,
    pub modal: ModalView,
    pub filter: FilterView,
    /// Revealed element ids, sorted.
    pub revealed: Vec<String>,
    /// Displayed counter values, sorted by id.
    pub counters: Vec<(String, u64)>,
    /// Loaded lazy images, sorted by id.
    pub images: Vec<(String, String)>,
}

impl SiteView {
    /// Body scroll is locked while the menu or the modal needs it.
    #[must_use]
    pub fn body_locked(&self) -> bool {
        self.menu_open || self.modal.locks_scroll
    }
}

/// Patches that turn `prev` into `next`.
#[must_use]
pub fn diff(prev: Option<&SiteView>, next: &SiteView) -> Vec<DomPatch> {
    let mut out = Vec::new();
    diff_chrome(prev, next, &mut out);
    diff_carousel(
        prev.map(|p| &p.hero),
        &next.hero,
        ids::HERO_SLIDE,
        ids::HERO_DOT,
        ids::HERO_TRACK,
        &mut out,
    );
    diff_carousel(
        prev.map(|p| &p.testimonials),
        &next.testimonials,
        ids::TESTIMONIAL_CARD,
        ids::TESTIMONIAL_DOT,
        ids::TESTIMONIAL_TRACK,
        &mut out,
    );
    diff_modal(prev.map(|p| &p.modal), &next.modal, &mut out);
    diff_wizard(prev.map(|p| &p.wizard), &next.wizard, &mut out);
    diff_filter(prev.map(|p| &p.filter), &next.filter, &mut out);
    diff_observers(prev, next, &mut out);
    out
}

fn changed<T: PartialEq>(prev: Option<T>, next: T) -> bool {
    prev != Some(next)
}

fn display(shown: bool, how: &str) -> String {
    if shown { how.to_owned() } else { "none".to_owned() }
}

fn diff_chrome(prev: Option<&SiteView>, next: &SiteView, out: &mut Vec<DomPatch>) {
    if changed(prev.map(|p| &p.loading), &next.loading) {
        let fading = next.loading != LoadingScreen::Visible;
        out.push(DomPatch::class(Target::id(ids::LOADING_SCREEN), "fade-out", fading));
        if next.loading == LoadingScreen::Hidden {
            out.push(DomPatch::style(Target::id(ids::LOADING_SCREEN), "display", "none"));
        }
    }

    if changed(prev.map(|p| p.nav.scrolled), next.nav.scrolled) {
        out.push(DomPatch::class(Target::id(ids::NAVBAR), "scrolled", next.nav.scrolled));
    }
    if changed(prev.map(|p| p.nav.back_to_top), next.nav.back_to_top) {
        out.push(DomPatch::class(Target::id(ids::BACK_TO_TOP), "show", next.nav.back_to_top));
    }
    let links_changed =
        prev.is_none_or(|p| p.nav.active != next.nav.active || p.sections != next.sections);
    if links_changed {
        for (index, id) in next.sections.iter().enumerate() {
            let on = next.nav.active.as_deref() == Some(id.as_str());
            let was = prev.and_then(|p| p.nav.active.as_deref()) == Some(id.as_str());
            if prev.is_none() || on != was {
                out.push(DomPatch::class(Target::item(ids::NAV_LINK, index), "active", on));
            }
        }
    }

    if changed(prev.map(|p| p.menu_open), next.menu_open) {
        out.push(DomPatch::class(Target::id(ids::HAMBURGER), "active", next.menu_open));
        out.push(DomPatch::class(Target::id(ids::NAV_MENU), "active", next.menu_open));
    }
    if changed(prev.map(SiteView::body_locked), next.body_locked()) {
        let value = if next.body_locked() { "hidden" } else { "" };
        out.push(DomPatch::style(Target::Body, "overflow", value));
    }
    if changed(prev.map(|p| p.keyboard_nav), next.keyboard_nav) {
        out.push(DomPatch::class(Target::Body, "keyboard-navigation", next.keyboard_nav));
    }
    if changed(prev.map(|p| p.theme), next.theme) {
        out.push(DomPatch::class(Target::Body, "dark-theme", next.theme == Theme::Dark));
    }
}

fn diff_carousel(
    prev: Option<&CarouselView>,
    next: &CarouselView,
    item_group: &str,
    dot_group: &str,
    track: &str,
    out: &mut Vec<DomPatch>,
) {
    if !changed(prev, next) || next.len == 0 {
        return;
    }
    let full = prev.is_none_or(|p| p.len != next.len);
    for index in 0..next.len {
        let on = next.is_active(index);
        if full || prev.is_some_and(|p| p.is_active(index)) != on {
            out.push(DomPatch::class(Target::item(item_group, index), "active", on));
            out.push(DomPatch::class(Target::item(dot_group, index), "active", on));
        }
    }
    out.push(DomPatch::style(Target::id(track), "transform", next.track_transform()));
}

fn diff_modal(prev: Option<&ModalView>, next: &ModalView, out: &mut Vec<DomPatch>) {
    let target = || Target::id(ids::BOOKING_MODAL);
    if changed(prev.map(|p| p.active), next.active) {
        out.push(DomPatch::class(target(), "active", next.active));
    }
    if changed(prev.map(|p| p.displayed), next.displayed) {
        out.push(DomPatch::style(target(), "display", display(next.displayed, "flex")));
    }
}

fn diff_wizard(prev: Option<&WizardView>, next: &WizardView, out: &mut Vec<DomPatch>) {
    if !changed(prev, next) {
        return;
    }
    let full = prev.is_none_or(|p| p.total != next.total);

    if full || prev.is_some_and(|p| p.current != next.current) {
        for step in 1..=next.total {
            let on = next.is_step_visible(step);
            if full || prev.is_some_and(|p| p.is_step_visible(step)) != on {
                out.push(DomPatch::class(Target::item(ids::FORM_STEP, step - 1), "active", on));
            }
        }
        out.push(DomPatch::style(
            Target::id(ids::PROGRESS_FILL),
            "width",
            format!("{}%", next.progress_percent),
        ));
    }

    for (index, on) in next.markers.iter().enumerate() {
        let was = prev.and_then(|p| p.markers.get(index));
        if full || was != Some(on) {
            out.push(DomPatch::class(Target::item(ids::PROGRESS_STEP, index), "active", *on));
        }
    }

    let buttons = [
        (ids::PREV_STEP, next.show_prev, prev.map(|p| p.show_prev)),
        (ids::NEXT_STEP, next.show_next, prev.map(|p| p.show_next)),
        (ids::SUBMIT_STEP, next.show_submit, prev.map(|p| p.show_submit)),
    ];
    for (id, shown, was) in buttons {
        if full || was != Some(shown) {
            out.push(DomPatch::style(Target::id(id), "display", display(shown, "block")));
        }
    }

    for (field, mark) in &next.marks {
        let was = prev.and_then(|p| p.marks.iter().find(|(f, _)| f == field).map(|(_, m)| m));
        if was != Some(mark) {
            out.push(DomPatch::style(
                Target::Field(field.clone()),
                "border-color",
                mark.border_color(),
            ));
        }
    }
    if let Some(prev) = prev {
        for (field, _) in &prev.marks {
            if !next.marks.iter().any(|(f, _)| f == field) {
                out.push(DomPatch::style(
                    Target::Field(field.clone()),
                    "border-color",
                    "",
                ));
            }
        }
    }
}

fn diff_filter(prev: Option<&FilterView>, next: &FilterView, out: &mut Vec<DomPatch>) {
    if !changed(prev, next) {
        return;
    }
    if changed(prev.map(|p| &p.active_filter), &next.active_filter) || prev.is_none() {
        for (index, control) in next.controls.iter().enumerate() {
            let on = *control == next.active_filter;
            let was = prev.is_some_and(|p| p.active_filter == *control);
            if prev.is_none() || on != was {
                out.push(DomPatch::class(Target::item(ids::FILTER_BUTTON, index), "active", on));
            }
        }
    }
    let replay = prev.is_some_and(|p| p.applied != next.applied);
    for (id, flags) in &next.cards {
        let was = prev.and_then(|p| p.cards.iter().find(|(i, _)| i == id).map(|(_, f)| *f));
        diff_card(id, was, *flags, replay, out);
    }
}

fn diff_card(
    id: &str,
    was: Option<CardFlags>,
    now: CardFlags,
    replay: bool,
    out: &mut Vec<DomPatch>,
) {
    let target = || Target::id(id);
    let flip = |flag: CardFlags| was.is_none_or(|w| w.contains(flag) != now.contains(flag));

    if flip(CardFlags::VISIBLE) {
        let shown = now.contains(CardFlags::VISIBLE);
        out.push(DomPatch::style(target(), "display", display(shown, "block")));
    }
    let entering = now.contains(CardFlags::ENTERING);
    if (flip(CardFlags::ENTERING) && (was.is_some() || entering)) || (replay && entering) {
        let value = if entering {
            "fadeInUp 0.5s ease forwards"
        } else {
            ""
        };
        out.push(DomPatch::style(target(), "animation", value));
    }
    if flip(CardFlags::HIGHLIGHTED) && (was.is_some() || now.contains(CardFlags::HIGHLIGHTED)) {
        let on = now.contains(CardFlags::HIGHLIGHTED);
        out.push(DomPatch::class(target(), "search-highlight", on));
    }
}

fn diff_observers(prev: Option<&SiteView>, next: &SiteView, out: &mut Vec<DomPatch>) {
    for id in &next.revealed {
        if prev.is_none_or(|p| p.revealed.binary_search(id).is_err()) {
            out.push(DomPatch::class(Target::id(id.clone()), "animate", true));
        }
    }
    for (id, value) in &next.counters {
        let was = prev.and_then(|p| p.counters.iter().find(|(i, _)| i == id).map(|(_, v)| *v));
        if was != Some(*value) {
            out.push(DomPatch::text(Target::id(id.clone()), value.to_string()));
        }
    }
    for (id, src) in &next.images {
        if prev.is_none_or(|p| !p.images.iter().any(|(i, _)| i == id)) {
            out.push(DomPatch::attr(Target::id(id.clone()), "src", src.clone()));
            out.push(DomPatch::class(Target::id(id.clone()), "lazy", false));
        }
    }
}
