#![forbid(unsafe_code)]

//! Interaction engines for the Yatra site.
//!
//! Every engine is a plain state machine: operations take an explicit `now`
//! where timing matters, report user-facing messages through a
//! [`Notifier`](notification_queue::Notifier), and expose a `view()`
//! snapshot that `yatra-web` reconciles into DOM patches.
//!
//! - [`carousel`] - hero slider and testimonial rotator
//! - [`wizard`] - booking step wizard
//! - [`filter`] - package filter and search highlight
//! - [`observer`] - reveal, counter, and lazy-image observers
//! - [`nav`] - navbar, mobile menu, focus outline, loading screen
//! - [`modal`] - booking modal lifecycle
//! - [`forms`] - contact and newsletter validation
//! - [`toast`] / [`notification_queue`] - transient notifications

pub mod carousel;
pub mod filter;
pub mod forms;
pub mod modal;
pub mod nav;
pub mod notification_queue;
pub mod observer;
pub mod toast;
pub mod wizard;

pub use notification_queue::Notifier;
