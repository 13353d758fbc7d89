#![forbid(unsafe_code)]

//! `yatra-web` runs the Yatra interaction engines inside a web page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes events and calls entry
//!   points; the session never touches the DOM.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! Each [`SiteSession::step`] diffs the new [`SiteView`] against the last
//! one and returns a list of [`DomPatch`]es for the host to apply. On
//! `wasm32` the [`SiteRunner`] exports the session to JavaScript.

pub mod catalog;
pub mod dom;
pub mod error;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod layout;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod render;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use dom::{DomPatch, Target};
pub use error::{Recovery, SiteError};
pub use layout::PageLayout;
pub use render::SiteView;
pub use session::{SiteSession, StepResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::SiteRunner;
