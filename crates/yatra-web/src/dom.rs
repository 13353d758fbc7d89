#![forbid(unsafe_code)]

//! DOM patch vocabulary.
//!
//! A [`DomPatch`] is one mutation the host applies to the live page. The
//! session never touches the DOM itself; it emits patches and the host
//! (the JS glue, or a test) applies them in order.
//!
//! Patches serialize to tagged JSON:
//!
//! ```json
//! {"op":"set_class","target":{"id":"navbar"},"class":"scrolled","on":true}
//! ```

use serde::Serialize;

/// Element a patch applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// `document.getElementById(id)`.
    Id(String),
    /// The `index`-th element of a repeated group (`.hero-slide`, `.dot`, ...).
    Item { group: String, index: usize },
    /// Form control by `name`.
    Field(String),
    /// `document.body`.
    Body,
}

impl Target {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn item(group: impl Into<String>, index: usize) -> Self {
        Self::Item {
            group: group.into(),
            index,
        }
    }
}

/// Well-known element ids and item groups.
pub mod ids {
    pub const LOADING_SCREEN: &str = "loadingScreen";
    pub const NAVBAR: &str = "navbar";
    pub const NAV_MENU: &str = "navMenu";
    pub const HAMBURGER: &str = "hamburger";
    pub const BACK_TO_TOP: &str = "backToTop";
    pub const BOOKING_MODAL: &str = "bookingModal";
    pub const PROGRESS_FILL: &str = "progressFill";
    pub const PREV_STEP: &str = "prevStep";
    pub const NEXT_STEP: &str = "nextStep";
    pub const SUBMIT_STEP: &str = "submitStep";
    pub const BOOKING_FORM: &str = "bookingForm";
    pub const CONTACT_FORM: &str = "contactForm";
    pub const NEWSLETTER_FORM: &str = "newsletterForm";
    pub const PACKAGES_SECTION: &str = "packages";
    pub const HERO_TRACK: &str = "heroTrack";
    pub const TESTIMONIAL_TRACK: &str = "testimonialTrack";

    pub const HERO_SLIDE: &str = "hero-slide";
    pub const HERO_DOT: &str = "hero-dot";
    pub const TESTIMONIAL_CARD: &str = "testimonial-card";
    pub const TESTIMONIAL_DOT: &str = "dot";
    pub const FORM_STEP: &str = "form-step";
    pub const PROGRESS_STEP: &str = "step";
    pub const NAV_LINK: &str = "nav-link";
    pub const FILTER_BUTTON: &str = "filter-btn";
}

/// One DOM mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    /// Add (`on`) or remove a class.
    SetClass {
        target: Target,
        class: String,
        on: bool,
    },
    /// Set an inline style property; an empty value clears it.
    SetStyle {
        target: Target,
        property: String,
        value: String,
    },
    /// Replace the text content.
    SetText { target: Target, text: String },
    /// Set an attribute.
    SetAttr {
        target: Target,
        name: String,
        value: String,
    },
    /// Show a toast.
    InsertToast {
        id: u64,
        kind: String,
        icon: String,
        message: String,
    },
    /// Hide a toast.
    RemoveToast { id: u64 },
    /// Smooth-scroll the window to an absolute offset.
    ScrollTo { top: f64 },
    /// Smooth-scroll an element into view (`block: start`).
    ScrollIntoView { target: Target },
    /// `form.reset()`.
    ResetForm { id: String },
}

impl DomPatch {
    #[must_use]
    pub fn class(target: Target, class: &str, on: bool) -> Self {
        Self::SetClass {
            target,
            class: class.to_owned(),
            on,
        }
    }

    #[must_use]
    pub fn style(target: Target, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property: property.to_owned(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self::SetText {
            target,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn attr(target: Target, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttr {
            target,
            name: name.to_owned(),
            value: value.into(),
        }
    }

    /// The element this patch touches, if any.
    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        match self {
            Self::SetClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetText { target, .. }
            | Self::SetAttr { target, .. }
            | Self::ScrollIntoView { target } => Some(target),
            Self::InsertToast { .. }
            | Self::RemoveToast { .. }
            | Self::ScrollTo { .. }
            | Self::ResetForm { .. } => None,
        }
    }
}

/// Encode a patch list as a JSON array.
pub fn to_json(patches: &[DomPatch]) -> Result<String, serde_json::Error> {
    serde_json::to_string(patches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_class_json_shape() {
        let json = to_json(&[DomPatch::class(Target::id("navbar"), "scrolled", true)])
            .expect("serialize");
        assert_eq!(
            json,
            r#"[{"op":"set_class","target":{"id":"navbar"},"class":"scrolled","on":true}]"#
        );
    }

    #[test]
    fn item_and_body_targets() {
        let json = to_json(&[
            DomPatch::style(Target::Body, "overflow", "hidden"),
            DomPatch::class(Target::item("dot", 2), "active", false),
        ])
        .expect("serialize");
        assert!(json.contains(r#""target":"body""#));
        assert!(json.contains(r#""target":{"item":{"group":"dot","index":2}}"#));
    }

    #[test]
    fn toast_patches_have_no_target() {
        let p = DomPatch::RemoveToast { id: 3 };
        assert_eq!(p.target(), None);
        assert_eq!(
            to_json(&[p]).expect("serialize"),
            r#"[{"op":"remove_toast","id":3}]"#
        );
    }
}
