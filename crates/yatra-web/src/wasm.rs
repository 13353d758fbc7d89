#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the [`SiteRunner`].
//!
//! This module wraps [`SiteSession`] with JS-friendly types. Patches cross
//! the boundary as JSON strings. Only compiled on `wasm32` targets.

use std::collections::BTreeMap;

use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yatra_runtime::{
    MemoryStore, PreferenceStore, SiteConfig, StorageError, duration_from_millis_f64,
};
use yatra_widgets::filter::SearchCriteria;
use yatra_widgets::wizard::WizardOutcome;

use crate::dom;
use crate::error::{self, Recovery, SiteError};
use crate::layout::PageLayout;
use crate::session::SiteSession;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Log through tracing and, for unexpected errors, `console.error`.
fn fail(err: &SiteError) {
    error::report(err);
    if err.recovery() == Recovery::Log {
        console_error(&format!("Website error: {err}"));
    }
}


/// `window.localStorage` as a [`PreferenceStore`].
struct LocalStorage {
    storage: JsValue,
}

impl LocalStorage {
    fn open() -> Option<Self> {
        let storage = Reflect::get(&js_sys::global(), &"localStorage".into()).ok()?;
        if storage.is_undefined() || storage.is_null() {
            return None;
        }
        Some(Self { storage })
    }

    fn call(&self, method: &str, args: &Array) -> Result<JsValue, JsValue> {
        let f = Reflect::get(&self.storage, &method.into())?.dyn_into::<js_sys::Function>()?;
        Reflect::apply(&f, &self.storage, args)
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.call("getItem", &Array::of1(&key.into()))
            .ok()?
            .as_string()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.call("setItem", &Array::of2(&key.into(), &value.into()))
            .map(|_| ())
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.call("removeItem", &Array::of1(&key.into()))
            .map(|_| ())
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

fn outcome_name(outcome: &WizardOutcome) -> &'static str {
    match outcome {
        WizardOutcome::Advanced { .. } => "advanced",
        WizardOutcome::Retreated { .. } => "retreated",
        WizardOutcome::Unchanged => "unchanged",
        WizardOutcome::Blocked(_) => "blocked",
        WizardOutcome::Submitted => "submitted",
        WizardOutcome::Rejected => "rejected",
    }
}

#[wasm_bindgen]
pub struct SiteRunner {
    inner: SiteSession,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl SiteRunner {
    /// Create a runner from a JSON [`PageLayout`]; an empty string selects
    /// the stock tourism page.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: &str) -> Result<SiteRunner, JsValue> {
        install_panic_hook();
        let layout = if layout_json.trim().is_empty() {
            PageLayout::tourism_site()
        } else {
            PageLayout::from_json(layout_json).map_err(|e| {
                let err = SiteError::Layout(e.to_string());
                fail(&err);
                JsValue::from_str(&err.to_string())
            })?
        };
        let store: Box<dyn PreferenceStore> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self {
            inner: SiteSession::with_store(layout, SiteConfig::default(), store),
        })
    }

    /// Advance the clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time(duration_from_millis_f64(dt_ms));
    }

    /// Set the clock to `now_ms` (e.g. a `requestAnimationFrame` timestamp).
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, now_ms: f64) {
        self.inner.set_time(duration_from_millis_f64(now_ms));
    }

    /// Parse a JSON-encoded event and route it.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match self.inner.push_encoded_input(json) {
            Ok(accepted) => accepted,
            Err(err) => {
                fail(&err);
                false
            }
        }
    }

    /// Run due work and return the frame's patches as a JSON array.
    pub fn step(&mut self) -> String {
        let result = self.inner.step();
        match dom::to_json(&result.patches) {
            Ok(json) => json,
            Err(e) => {
                console_error(&format!("patch encoding failed: {e}"));
                "[]".to_owned()
            }
        }
    }

    /// Milliseconds until the next timed work, or `undefined`.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner
            .next_deadline()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    #[wasm_bindgen(js_name = openBookingModal)]
    pub fn open_booking_modal(&mut self) {
        self.inner.open_booking_modal();
    }

    #[wasm_bindgen(js_name = closeBookingModal)]
    pub fn close_booking_modal(&mut self) {
        self.inner.close_booking_modal();
    }

    #[wasm_bindgen(js_name = setBookingField)]
    pub fn set_booking_field(&mut self, field: &str, value: &str) {
        self.inner.set_booking_field(field, value);
    }

    #[wasm_bindgen(js_name = nextStep)]
    pub fn next_step(&mut self) -> String {
        outcome_name(&self.inner.next_step()).to_owned()
    }

    #[wasm_bindgen(js_name = previousStep)]
    pub fn previous_step(&mut self) -> String {
        outcome_name(&self.inner.previous_step()).to_owned()
    }

    #[wasm_bindgen(js_name = submitBooking)]
    pub fn submit_booking(&mut self) -> String {
        outcome_name(&self.inner.submit_booking()).to_owned()
    }

    #[wasm_bindgen(js_name = changeSlide)]
    pub fn change_slide(&mut self, direction: i32) {
        if let Err(err) = self.inner.change_slide(direction) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = goToSlide)]
    pub fn go_to_slide(&mut self, index: i32) {
        if let Err(err) = self.inner.go_to_slide(i64::from(index)) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = changeTestimonial)]
    pub fn change_testimonial(&mut self, direction: i32) {
        if let Err(err) = self.inner.change_testimonial(direction) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = currentTestimonial)]
    pub fn current_testimonial(&mut self, index: i32) {
        if let Err(err) = self.inner.current_testimonial(i64::from(index)) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = pauseCarousels)]
    pub fn pause_carousels(&mut self) {
        self.inner.pause_carousels();
    }

    #[wasm_bindgen(js_name = resumeCarousels)]
    pub fn resume_carousels(&mut self) {
        self.inner.resume_carousels();
    }

    #[wasm_bindgen(js_name = scrollToSection)]
    pub fn scroll_to_section(&mut self, section_id: &str) {
        if let Err(err) = self.inner.scroll_to_section(section_id) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&mut self) {
        self.inner.scroll_to_top();
    }

    #[wasm_bindgen(js_name = toggleMobileMenu)]
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.inner.toggle_menu()
    }

    #[wasm_bindgen(js_name = filterPackages)]
    pub fn filter_packages(&mut self, filter: &str) -> u32 {
        u32::try_from(self.inner.filter(filter)).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = searchPackages)]
    pub fn search_packages(&mut self, destination: &str, travel_type: &str, duration: &str) {
        let criteria = SearchCriteria {
            destination: destination.to_owned(),
            travel_type: travel_type.to_owned(),
            duration: duration.to_owned(),
            text: String::new(),
        };
        if let Err(err) = self.inner.search(criteria) {
            fail(&err);
        }
    }

    #[wasm_bindgen(js_name = bookPackage)]
    pub fn book_package(&mut self, package_id: &str) {
        self.inner.book_package(package_id);
    }

    #[wasm_bindgen(js_name = bookExperience)]
    pub fn book_experience(&mut self, experience_id: &str) {
        self.inner.book_experience(experience_id);
    }

    #[wasm_bindgen(js_name = viewPackageDetails)]
    pub fn view_package_details(&mut self, package_id: &str) {
        self.inner.view_package_details(package_id);
    }

    #[wasm_bindgen(js_name = showAllDestinations)]
    pub fn show_all_destinations(&mut self) {
        self.inner.show_all_destinations();
    }

    #[wasm_bindgen(js_name = showAllPackages)]
    pub fn show_all_packages(&mut self) {
        self.inner.show_all_packages();
    }

    #[wasm_bindgen(js_name = exploreDestination)]
    pub fn explore_destination(&mut self, destination_id: &str) {
        self.inner.explore_destination(destination_id);
    }

    /// Submit the contact form given its fields as a JSON object.
    #[wasm_bindgen(js_name = submitContact)]
    pub fn submit_contact(&mut self, fields_json: &str) -> bool {
        let fields: BTreeMap<String, String> = match serde_json::from_str(fields_json) {
            Ok(fields) => fields,
            Err(e) => {
                fail(&SiteError::Layout(format!("contact fields: {e}")));
                return false;
            }
        };
        let pairs = fields.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        match self.inner.submit_contact(pairs) {
            Ok(()) => true,
            Err(err) => {
                fail(&err);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = subscribeNewsletter)]
    pub fn subscribe_newsletter(&mut self, email: &str) -> bool {
        match self.inner.subscribe_newsletter(email) {
            Ok(()) => true,
            Err(err) => {
                fail(&err);
                false
            }
        }
    }

    /// Flip the theme; returns the new theme name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> String {
        if let Err(err) = self.inner.toggle_theme() {
            fail(&err);
        }
        self.inner.theme().as_str().to_owned()
    }
}
