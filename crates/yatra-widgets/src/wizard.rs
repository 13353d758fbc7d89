#![forbid(unsafe_code)]

//! Linear multi-step form with per-step validation gating.
//!
//! Steps are numbered from 1. Moving forward requires every required field
//! of the current step to be non-blank after trimming; moving back is always
//! allowed and clamps at step 1. Submitting is only possible on the last
//! step and resets the wizard on success.
//!
//! # State machine
//!
//! ```text
//!   next() [valid]        next() [valid]
//! 1 ─────────────► 2 ─────────────► ... ─► total
//!   ◄──────────────   ◄──────────────        │
//!     previous()        previous()           │ submit() [valid]
//!   ▲                                        │
//!   └──────────────── reset ◄────────────────┘
//! ```
//!
//! Failed validation marks blank fields invalid, raises exactly one error
//! notification, and leaves `current` untouched.

use ahash::AHashMap;

use crate::forms::{REQUIRED_FIELDS_MESSAGE, ValidationError};
use crate::notification_queue::Notifier;

pub const BOOKING_SUBMITTED_MESSAGE: &str =
    "Booking request submitted! We will contact you within 24 hours.";

/// Required field ids for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSpec {
    required: Vec<String>,
}

impl StepSpec {
    #[must_use]
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }
}

/// Current field values of the wizard's form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: AHashMap<String, String>,
}

impl FormState {
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Whether `field` holds something other than whitespace.
    #[must_use]
    pub fn is_filled(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }
}

/// Validation styling of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMark {
    Valid,
    Invalid,
}

impl FieldMark {
    /// Border color applied to the field.
    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Self::Valid => "#e2e8f0",
            Self::Invalid => "#ef4444",
        }
    }
}

/// Result of a wizard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Moved to a later step.
    Advanced { from: usize, to: usize },
    /// Moved to an earlier step.
    Retreated { from: usize, to: usize },
    /// Nothing to do (already at the boundary).
    Unchanged,
    /// Validation failed; nothing moved.
    Blocked(ValidationError),
    /// The booking was accepted and the wizard reset.
    Submitted,
    /// `submit()` outside the last step.
    Rejected,
}

/// Render-ready snapshot of the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    /// 1-based current step.
    pub current: usize,
    pub total: usize,
    /// Width of the progress fill in percent.
    pub progress_percent: f64,
    /// `active` state of each progress marker.
    pub markers: Vec<bool>,
    pub show_prev: bool,
    pub show_next: bool,
    pub show_submit: bool,
    /// Field marks, sorted by field id.
    pub marks: Vec<(String, FieldMark)>,
}

impl WizardView {
    /// Whether step `step` (1-based) is the visible one.
    #[must_use]
    pub fn is_step_visible(&self, step: usize) -> bool {
        step == self.current
    }
}

/// Step wizard state machine.
#[derive(Debug, Clone)]
pub struct StepWizard {
    steps: Vec<StepSpec>,
    current: usize,
    form: FormState,
    marks: AHashMap<String, FieldMark>,
}

impl StepWizard {
    /// Create a wizard at step 1. An empty step list becomes one empty step.
    #[must_use]
    pub fn new(steps: Vec<StepSpec>) -> Self {
        let steps = if steps.is_empty() {
            vec![StepSpec::default()]
        } else {
            steps
        };
        Self {
            steps,
            current: 1,
            form: FormState::default(),
            marks: AHashMap::new(),
        }
    }

    /// Validate the current step and move forward.
    pub fn next(&mut self, notifier: &mut dyn Notifier) -> WizardOutcome {
        if self.current >= self.total() {
            return WizardOutcome::Unchanged;
        }
        if let Err(err) = self.validate_current() {
            return self.blocked(err, notifier);
        }
        let from = self.current;
        self.current += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "wizard.next", from, to = self.current);
        WizardOutcome::Advanced {
            from,
            to: self.current,
        }
    }

    /// Move back one step without validation.
    pub fn previous(&mut self) -> WizardOutcome {
        if self.current <= 1 {
            return WizardOutcome::Unchanged;
        }
        let from = self.current;
        self.current -= 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "wizard.previous", from, to = self.current);
        WizardOutcome::Retreated {
            from,
            to: self.current,
        }
    }

    /// Submit from the last step.
    pub fn submit(&mut self, notifier: &mut dyn Notifier) -> WizardOutcome {
        if self.current != self.total() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "wizard.submit.rejected", current = self.current);
            return WizardOutcome::Rejected;
        }
        if let Err(err) = self.validate_current() {
            return self.blocked(err, notifier);
        }
        notifier.success(BOOKING_SUBMITTED_MESSAGE);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "wizard.submit");
        self.reset();
        WizardOutcome::Submitted
    }

    /// Return to step 1 and clear the form.
    pub fn reset(&mut self) {
        self.current = 1;
        self.form.clear();
        self.marks.clear();
    }

    /// Set a field value.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.form.set(field, value);
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn mark(&self, field: &str) -> Option<FieldMark> {
        self.marks.get(field).copied()
    }

    #[must_use]
    pub fn view(&self) -> WizardView {
        let total = self.total();
        let mut marks: Vec<(String, FieldMark)> =
            self.marks.iter().map(|(k, v)| (k.clone(), *v)).collect();
        marks.sort_by(|a, b| a.0.cmp(&b.0));
        WizardView {
            current: self.current,
            total,
            progress_percent: self.current as f64 / total as f64 * 100.0,
            markers: (0..total).map(|i| i < self.current).collect(),
            show_prev: self.current > 1,
            show_next: self.current < total,
            show_submit: self.current == total,
            marks,
        }
    }

    fn validate_current(&mut self) -> Result<(), ValidationError> {
        let step = &self.steps[self.current - 1];
        let mut missing = Vec::new();
        for field in step.required() {
            let mark = if self.form.is_filled(field) {
                FieldMark::Valid
            } else {
                missing.push(field.clone());
                FieldMark::Invalid
            };
            self.marks.insert(field.clone(), mark);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    fn blocked(&self, err: ValidationError, notifier: &mut dyn Notifier) -> WizardOutcome {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "wizard.blocked", step = self.current, error = %err);
        notifier.error(REQUIRED_FIELDS_MESSAGE);
        WizardOutcome::Blocked(err)
    }
}
