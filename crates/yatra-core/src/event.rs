#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The embedding page translates browser events into [`Event`] values and
//! pushes them into a session. Coordinates and scroll offsets are CSS pixels.
//!
//! Only the information the interaction engines actually read is carried:
//! a touch reports its horizontal position, a click reports which region of
//! the page it landed in, and an intersection report carries the visible
//! area ratio of one observed element.

/// Stable identifier of an element the host reports on (usually its DOM `id`).
pub type ElementId = String;

/// Canonical host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard key was pressed.
    Key(KeyEvent),
    /// A mouse button went down anywhere on the page.
    PointerDown,
    /// A touch started, ended, or was cancelled on a swipe surface.
    Touch(TouchEvent),
    /// The window scrolled.
    Scroll(ScrollEvent),
    /// The window was resized.
    Resize(ResizeEvent),
    /// A click landed in a region the engines care about.
    Click(ClickEvent),
    /// An observed element's visible ratio changed.
    Intersection(IntersectionEvent),
}

impl Event {
    /// Key press shorthand.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Touch-start shorthand.
    #[must_use]
    pub const fn touch_start(surface: TouchSurface, x: f32) -> Self {
        Self::Touch(TouchEvent::new(TouchPhase::Start, surface, x))
    }

    /// Touch-end shorthand.
    #[must_use]
    pub const fn touch_end(surface: TouchSurface, x: f32) -> Self {
        Self::Touch(TouchEvent::new(TouchPhase::End, surface, x))
    }

    /// Scroll shorthand.
    #[must_use]
    pub const fn scroll(y: f64) -> Self {
        Self::Scroll(ScrollEvent { y })
    }

    /// Resize shorthand.
    #[must_use]
    pub const fn resize(width: u32, height: u32) -> Self {
        Self::Resize(ResizeEvent { width, height })
    }

    /// Click shorthand.
    #[must_use]
    pub const fn click(region: ClickRegion) -> Self {
        Self::Click(ClickEvent { region })
    }

    /// Intersection shorthand.
    #[must_use]
    pub fn intersection(target: impl Into<ElementId>, ratio: f32) -> Self {
        Self::Intersection(IntersectionEvent {
            target: target.into(),
            ratio,
        })
    }
}

/// Keys with engine-level meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Closes the booking modal.
    Escape,
    /// Turns on the keyboard focus outline.
    Tab,
    /// Enter / Return.
    Enter,
    /// Any other key.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            _ => Self::Other,
        }
    }
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self { code }
    }
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    End,
    Cancel,
}

/// Swipe-capable region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchSurface {
    /// The hero slider.
    Hero,
    /// The testimonial track.
    Testimonials,
}

/// Touch event (first touch point only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub surface: TouchSurface,
    /// `clientX` of the first touch (or changed touch on end).
    pub x: f32,
}

impl TouchEvent {
    #[must_use]
    pub const fn new(phase: TouchPhase, surface: TouchSurface, x: f32) -> Self {
        Self { phase, surface, x }
    }
}

/// Window scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// `window.scrollY`.
    pub y: f64,
}

/// Window inner size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
}

/// Where a click landed, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickRegion {
    /// Inside `.nav-container`.
    NavContainer,
    /// On the modal backdrop itself (not its content).
    ModalBackdrop,
    /// Anywhere else.
    Elsewhere,
}

/// Click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub region: ClickRegion,
}

/// Visibility report for one observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEvent {
    pub target: ElementId,
    /// Fraction of the element's area inside the (margin-adjusted) viewport.
    pub ratio: f32,
}
