#![forbid(unsafe_code)]

//! Session error taxonomy.
//!
//! Three families, each with a fixed [`Recovery`]:
//!
//! | Family | Examples | Recovery |
//! |--------|----------|----------|
//! | Missing element | unknown section, empty carousel | `Ignore` (debug log) |
//! | Validation | blank field, bad email, empty search | `Notify` (toast already shown) |
//! | Runtime | storage, malformed host input, layout | `Log` (error log) |

use yatra_runtime::{ConfigError, StorageError};
use yatra_widgets::filter::SearchError;
use yatra_widgets::forms::ValidationError;

#[cfg(feature = "input-parser")]
use crate::input_parser::InputParseError;

/// How the session reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Silent no-op.
    Ignore,
    /// The user has been told; nothing else to do.
    Notify,
    /// Unexpected; log at `error`.
    Log,
}

/// Errors surfaced by [`SiteSession`](crate::session::SiteSession).
#[derive(Debug)]
pub enum SiteError {
    /// No `section[id]` with this id.
    UnknownSection(String),
    /// No catalog entry with this id.
    UnknownDestination(String),
    /// The named carousel has no items.
    EmptyCarousel(&'static str),
    /// A zero step was requested.
    NoDirection,
    /// Form or wizard validation failed.
    Validation(ValidationError),
    /// Search refused.
    Search(SearchError),
    /// Preference storage failed.
    Storage(StorageError),
    /// Site configuration was rejected.
    Config(ConfigError),
    /// The host sent a layout that does not decode.
    Layout(String),
    /// The host sent an event that does not decode.
    #[cfg(feature = "input-parser")]
    Input(InputParseError),
}

impl SiteError {
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::UnknownSection(_)
            | Self::UnknownDestination(_)
            | Self::EmptyCarousel(_)
            | Self::NoDirection => Recovery::Ignore,
            Self::Validation(_) | Self::Search(_) => Recovery::Notify,
            Self::Storage(_) | Self::Config(_) | Self::Layout(_) => Recovery::Log,
            #[cfg(feature = "input-parser")]
            Self::Input(_) => Recovery::Log,
        }
    }
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSection(id) => write!(f, "unknown section: {id}"),
            Self::UnknownDestination(id) => write!(f, "unknown destination: {id}"),
            Self::EmptyCarousel(label) => write!(f, "carousel {label} has no items"),
            Self::NoDirection => write!(f, "step direction must be non-zero"),
            Self::Validation(e) => write!(f, "validation failed: {e}"),
            Self::Search(e) => write!(f, "search refused: {e}"),
            Self::Storage(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Layout(msg) => write!(f, "invalid layout: {msg}"),
            #[cfg(feature = "input-parser")]
            Self::Input(e) => write!(f, "invalid host input: {e}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Config(e) => Some(e),
            #[cfg(feature = "input-parser")]
            Self::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SiteError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<SearchError> for SiteError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<StorageError> for SiteError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for SiteError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(feature = "input-parser")]
impl From<InputParseError> for SiteError {
    fn from(e: InputParseError) -> Self {
        Self::Input(e)
    }
}

/// Log `err` according to its [`Recovery`].
pub fn report(err: &SiteError) {
    match err.recovery() {
        Recovery::Ignore => tracing::debug!(message = "site.ignored", error = %err),
        Recovery::Notify => tracing::debug!(message = "site.rejected", error = %err),
        Recovery::Log => tracing::error!(message = "site.error", error = %err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_by_family() {
        assert_eq!(
            SiteError::UnknownSection("x".into()).recovery(),
            Recovery::Ignore
        );
        assert_eq!(
            SiteError::from(ValidationError::InvalidEmail).recovery(),
            Recovery::Notify
        );
        assert_eq!(
            SiteError::from(StorageError::Unavailable("quota".into())).recovery(),
            Recovery::Log
        );
    }

    #[test]
    fn display_and_source() {
        use std::error::Error as _;
        let err = SiteError::from(SearchError::EmptyCriteria);
        assert_eq!(err.to_string(), "search refused: no search criteria selected");
        assert!(err.source().is_some());
        assert!(SiteError::NoDirection.source().is_none());
    }
}
