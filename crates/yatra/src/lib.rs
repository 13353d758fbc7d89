#![forbid(unsafe_code)]

//! Yatra public facade crate.
//!
//! Re-exports the session, the engines, and the DOM patch vocabulary from
//! the member crates, and offers a prelude for embedding code.

// --- Core re-exports -------------------------------------------------------

pub use yatra_core::event::{ClickRegion, ElementId, Event, KeyCode, TouchSurface};
pub use yatra_core::geometry::{ElementBox, Viewport};

// --- Runtime re-exports ----------------------------------------------------

pub use yatra_runtime::{
    ConfigError, MemoryStore, PreferenceStore, SiteConfig, StorageError, THEME_KEY, Theme,
};

// --- Widget re-exports -----------------------------------------------------

pub use yatra_widgets::Notifier;
pub use yatra_widgets::filter::SearchCriteria;
pub use yatra_widgets::forms::ValidationError;
pub use yatra_widgets::wizard::WizardOutcome;

// --- Web re-exports --------------------------------------------------------

pub use yatra_web::{DomPatch, PageLayout, Recovery, SiteSession, SiteView, StepResult, Target};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for yatra embedders.
pub use yatra_web::SiteError as Error;

/// Standard result type for yatra APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DomPatch, Error, Event, PageLayout, Recovery, Result, SearchCriteria, SiteConfig,
        SiteSession, StepResult, Target, Theme, WizardOutcome,
    };

    pub use crate::{core, runtime, web, widgets};
}

pub use yatra_core as core;
pub use yatra_runtime as runtime;
pub use yatra_web as web;
pub use yatra_widgets as widgets;
