//! End-to-end session tests: events and entry points in, DOM patches out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use yatra_core::event::{Event, TouchSurface};
use yatra_runtime::SiteConfig;
use yatra_web::dom::ids;
use yatra_web::session::ALL_PACKAGES_MESSAGE;
use yatra_web::{DomPatch, PageLayout, SiteError, SiteSession, Target};
use yatra_widgets::filter::{CardFlags, EMPTY_SEARCH_MESSAGE, SearchCriteria};
use yatra_widgets::wizard::{BOOKING_SUBMITTED_MESSAGE, WizardOutcome};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn session() -> SiteSession {
    let mut s = SiteSession::new(PageLayout::tourism_site(), SiteConfig::default());
    s.step();
    s
}

fn step_at(s: &mut SiteSession, at: u64) -> Vec<DomPatch> {
    s.set_time(ms(at));
    s.step().patches
}

fn toast_messages(patches: &[DomPatch]) -> Vec<String> {
    patches
        .iter()
        .filter_map(|p| match p {
            DomPatch::InsertToast { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

fn highlighted(s: &SiteSession, id: &str) -> bool {
    s.filter_engine()
        .card(id)
        .is_some_and(|c| c.flags().contains(CardFlags::HIGHLIGHTED))
}

// ---------------------------------------------------------------------------
// Carousels
// ---------------------------------------------------------------------------

#[test]
fn hero_auto_advances_on_interval() {
    let mut s = session();
    assert!(step_at(&mut s, 4999)
        .iter()
        .all(|p| p.target() != Some(&Target::id(ids::HERO_TRACK))));

    let patches = step_at(&mut s, 5000);
    assert_eq!(s.hero().active(), 1);
    assert!(patches.contains(&DomPatch::class(
        Target::item(ids::HERO_SLIDE, 0),
        "active",
        false
    )));
    assert!(patches.contains(&DomPatch::class(
        Target::item(ids::HERO_SLIDE, 1),
        "active",
        true
    )));
    assert!(patches.contains(&DomPatch::style(
        Target::id(ids::HERO_TRACK),
        "transform",
        "translateX(-100%)"
    )));
    // Testimonials run on their own 6s cadence.
    assert_eq!(s.testimonials().active(), 0);
}

#[test]
fn manual_slide_wraps_and_delays_auto_advance() {
    let mut s = session();
    s.set_time(ms(3000));
    let t = s.change_slide(-1).expect("hero has slides");
    assert_eq!((t.from, t.to), (0, 2));

    // Settle (1s) plus one interval (5s) from the manual change.
    step_at(&mut s, 8999);
    assert_eq!(s.hero().active(), 2);
    step_at(&mut s, 9000);
    assert_eq!(s.hero().active(), 0);
}

#[test]
fn swipe_left_on_hero_advances() {
    let mut s = session();
    s.handle_event(&Event::touch_start(TouchSurface::Hero, 300.0));
    s.handle_event(&Event::touch_end(TouchSurface::Hero, 200.0));
    assert_eq!(s.hero().active(), 1);

    // Short drags are not swipes.
    s.handle_event(&Event::touch_start(TouchSurface::Hero, 300.0));
    s.handle_event(&Event::touch_end(TouchSurface::Hero, 260.0));
    assert_eq!(s.hero().active(), 1);

    s.handle_event(&Event::touch_start(TouchSurface::Testimonials, 100.0));
    s.handle_event(&Event::touch_end(TouchSurface::Testimonials, 200.0));
    assert_eq!(s.testimonials().active(), 2);
}

#[test]
fn encoded_touch_drives_testimonials() {
    let mut s = session();
    assert!(s
        .push_encoded_input(r#"{"kind":"touch","phase":"start","surface":"testimonials","x":400}"#)
        .expect("valid input"));
    assert!(s
        .push_encoded_input(r#"{"kind":"touch","phase":"end","surface":"testimonials","x":250}"#)
        .expect("valid input"));
    assert_eq!(s.testimonials().active(), 1);

    let patches = step_at(&mut s, 10);
    assert!(patches.contains(&DomPatch::class(
        Target::item(ids::TESTIMONIAL_DOT, 1),
        "active",
        true
    )));
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[test]
fn booking_wizard_walkthrough() {
    let mut s = session();
    assert!(s.open_booking_modal());
    let patches = step_at(&mut s, 10);
    assert!(patches.contains(&DomPatch::ResetForm {
        id: ids::BOOKING_FORM.to_owned()
    }));
    assert!(patches.contains(&DomPatch::class(Target::id(ids::BOOKING_MODAL), "active", true)));
    assert!(patches.contains(&DomPatch::style(Target::Body, "overflow", "hidden")));

    assert!(matches!(s.next_step(), WizardOutcome::Blocked(_)));
    let patches = step_at(&mut s, 20);
    assert!(patches.contains(&DomPatch::style(
        Target::Field("destination".to_owned()),
        "border-color",
        "#ef4444"
    )));

    s.set_booking_field("destination", "rajasthan");
    s.set_booking_field("travelDate", "2026-12-01");
    s.set_booking_field("travelers", "2");
    assert_eq!(s.next_step(), WizardOutcome::Advanced { from: 1, to: 2 });
    let patches = step_at(&mut s, 30);
    assert!(patches.contains(&DomPatch::style(
        Target::id(ids::PROGRESS_FILL),
        "width",
        format!("{}%", 2.0_f64 / 3.0 * 100.0)
    )));

    assert_eq!(s.submit_booking(), WizardOutcome::Rejected);
    s.set_booking_field("fullName", "Asha Rao");
    s.set_booking_field("email", "asha@example.com");
    s.set_booking_field("phone", "+91 98765 43210");
    assert_eq!(s.next_step(), WizardOutcome::Advanced { from: 2, to: 3 });
    assert_eq!(s.next_step(), WizardOutcome::Unchanged);

    s.set_booking_field("paymentMethod", "card");
    assert_eq!(s.submit_booking(), WizardOutcome::Submitted);
    assert!(!s.modal().is_open());
    assert_eq!(s.wizard().current(), 1);

    let patches = step_at(&mut s, 40);
    assert_eq!(toast_messages(&patches), vec![BOOKING_SUBMITTED_MESSAGE.to_owned()]);
    assert!(patches.contains(&DomPatch::class(Target::id(ids::BOOKING_MODAL), "active", false)));

    let patches = step_at(&mut s, 340);
    assert!(patches.contains(&DomPatch::style(Target::id(ids::BOOKING_MODAL), "display", "none")));
    assert!(patches.contains(&DomPatch::style(Target::Body, "overflow", "")));
}

#[test]
fn book_package_opens_modal_after_delay() {
    let mut s = session();
    s.book_package("golden-triangle");
    let patches = step_at(&mut s, 0);
    assert_eq!(
        toast_messages(&patches),
        vec!["Booking golden triangle package...".to_owned()]
    );

    step_at(&mut s, 499);
    assert!(!s.modal().is_open());
    let patches = step_at(&mut s, 500);
    assert!(s.modal().is_open());
    assert!(patches.contains(&DomPatch::ResetForm {
        id: ids::BOOKING_FORM.to_owned()
    }));
}

#[test]
fn repeated_booking_clicks_open_once() {
    let mut s = session();
    s.book_experience("camel-safari");
    s.set_time(ms(300));
    s.book_experience("camel-safari");
    step_at(&mut s, 500);
    assert!(!s.modal().is_open());
    step_at(&mut s, 800);
    assert!(s.modal().is_open());
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

#[test]
fn search_highlights_then_clears() {
    let mut s = session();
    let criteria = SearchCriteria {
        destination: "kerala".to_owned(),
        ..SearchCriteria::default()
    };
    s.search(criteria).expect("non-empty search");

    let patches = step_at(&mut s, 0);
    assert!(patches.contains(&DomPatch::ScrollIntoView {
        target: Target::id(ids::PACKAGES_SECTION)
    }));

    step_at(&mut s, 499);
    assert!(!highlighted(&s, "kerala-backwaters"));

    let patches = step_at(&mut s, 500);
    assert!(highlighted(&s, "kerala-backwaters"));
    assert!(!highlighted(&s, "goa-beaches"));
    assert!(patches.contains(&DomPatch::class(
        Target::id("kerala-backwaters"),
        "search-highlight",
        true
    )));

    step_at(&mut s, 5499);
    assert!(highlighted(&s, "kerala-backwaters"));
    step_at(&mut s, 5500);
    assert!(!highlighted(&s, "kerala-backwaters"));
}

#[test]
fn empty_search_is_rejected_with_error_toast() {
    let mut s = session();
    let err = s.search(SearchCriteria::default()).expect_err("empty search");
    assert!(matches!(err, SiteError::Search(_)));

    let patches = step_at(&mut s, 0);
    assert_eq!(toast_messages(&patches), vec![EMPTY_SEARCH_MESSAGE.to_owned()]);
    assert!(!patches
        .iter()
        .any(|p| matches!(p, DomPatch::ScrollIntoView { .. })));
}

#[test]
fn filter_hides_non_matching_cards() {
    let mut s = session();
    assert_eq!(s.filter("beach"), 2);
    let patches = step_at(&mut s, 0);
    assert!(patches.contains(&DomPatch::style(
        Target::id("golden-triangle"),
        "display",
        "none"
    )));
    assert!(patches.contains(&DomPatch::class(
        Target::item(ids::FILTER_BUTTON, 3),
        "active",
        true
    )));

    assert_eq!(s.filter("all"), 5);
    let patches = step_at(&mut s, 10);
    assert!(patches.contains(&DomPatch::style(
        Target::id("golden-triangle"),
        "display",
        "block"
    )));
    assert!(patches.contains(&DomPatch::style(
        Target::id("golden-triangle"),
        "animation",
        "fadeInUp 0.5s ease forwards"
    )));
}

#[test]
fn reapplying_filter_replays_entrance_on_visible_cards() {
    let mut s = session();
    step_at(&mut s, 0);
    s.filter("beach");
    step_at(&mut s, 10);
    s.filter("beach");
    let patches = step_at(&mut s, 20);
    let fade_in = |id: &str| {
        DomPatch::style(Target::id(id), "animation", "fadeInUp 0.5s ease forwards")
    };
    assert!(patches.contains(&fade_in("kerala-backwaters")));
    assert!(patches.contains(&fade_in("goa-beaches")));
    assert!(!patches.contains(&fade_in("golden-triangle")));
}

#[test]
fn explore_destination_follows_up_with_details() {
    let mut s = session();
    s.explore_destination("rajasthan");
    let patches = step_at(&mut s, 0);
    assert_eq!(toast_messages(&patches), vec!["Exploring Rajasthan...".to_owned()]);

    let patches = step_at(&mut s, 1000);
    assert_eq!(
        toast_messages(&patches),
        vec!["Rajasthan details would open in a dedicated modal.".to_owned()]
    );
    assert!(patches
        .iter()
        .any(|p| matches!(p, DomPatch::RemoveToast { .. })));
}

// ---------------------------------------------------------------------------
// Scroll, resize, notifications
// ---------------------------------------------------------------------------

#[test]
fn scroll_is_debounced_before_nav_updates() {
    let mut s = session();
    s.handle_event(&Event::scroll(120.0));
    s.set_time(ms(8));
    s.handle_event(&Event::scroll(2100.0));

    let patches = step_at(&mut s, 10);
    assert!(!patches.contains(&DomPatch::class(Target::id(ids::NAVBAR), "scrolled", true)));

    let patches = step_at(&mut s, 18);
    assert!(patches.contains(&DomPatch::class(Target::id(ids::NAVBAR), "scrolled", true)));
    assert!(patches.contains(&DomPatch::class(Target::id(ids::BACK_TO_TOP), "show", true)));
    assert!(patches.contains(&DomPatch::class(Target::item(ids::NAV_LINK, 2), "active", true)));
}

#[test]
fn wide_resize_closes_menu() {
    let mut s = session();
    assert!(s.toggle_menu());
    s.handle_event(&Event::resize(1024, 768));
    step_at(&mut s, 249);
    assert!(s.menu_open());
    step_at(&mut s, 250);
    assert!(!s.menu_open());
}

#[test]
fn toast_is_removed_after_display_time() {
    let mut s = session();
    s.set_time(ms(100));
    s.show_all_packages();
    let patches = s.step().patches;
    let insert = patches
        .iter()
        .find_map(|p| match p {
            DomPatch::InsertToast { id, kind, message, .. } => {
                Some((*id, kind.clone(), message.clone()))
            }
            _ => None,
        })
        .expect("toast shown");
    assert_eq!(insert.1, "info");
    assert_eq!(insert.2, ALL_PACKAGES_MESSAGE);

    assert!(!step_at(&mut s, 4099).contains(&DomPatch::RemoveToast { id: insert.0 }));
    assert!(step_at(&mut s, 4100).contains(&DomPatch::RemoveToast { id: insert.0 }));
}

#[test]
fn newsletter_and_contact_reset_their_forms() {
    let mut s = session();
    assert!(matches!(
        s.subscribe_newsletter("not-an-email"),
        Err(SiteError::Validation(_))
    ));
    s.subscribe_newsletter("traveler@example.com")
        .expect("valid email");
    s.submit_contact([
        ("firstName", "Asha"),
        ("lastName", "Rao"),
        ("email", "asha@example.com"),
        ("destination", "kerala"),
        ("travelers", "2"),
        ("message", "Namaste"),
    ])
    .expect("complete form");

    let patches = step_at(&mut s, 0);
    assert!(patches.contains(&DomPatch::ResetForm {
        id: ids::NEWSLETTER_FORM.to_owned()
    }));
    assert!(patches.contains(&DomPatch::ResetForm {
        id: ids::CONTACT_FORM.to_owned()
    }));
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: Option<String>,
    span: Option<String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_owned());
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
            span: ctx.event_span(event).map(|s| s.name().to_owned()),
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: events.clone(),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

#[test]
fn unknown_destination_is_logged_and_ignored() {
    let events = with_capture(|| {
        let mut s = session();
        s.explore_destination("atlantis");
        s.set_time(ms(1000));
        let patches = s.step().patches;
        assert!(toast_messages(&patches).is_empty());
    });

    assert!(events
        .iter()
        .any(|e| e.message.as_deref() == Some("site.start") && e.level == tracing::Level::INFO));
    let ignored = events
        .iter()
        .find(|e| e.message.as_deref() == Some("site.ignored"))
        .expect("ignored error logged");
    assert_eq!(ignored.level, tracing::Level::DEBUG);
    assert_eq!(ignored.span.as_deref(), Some("site.step"));
}
