#![forbid(unsafe_code)]

//! JSON input parser for converting host-encoded browser events to
//! [`yatra_core::event::Event`] values.
//!
//! The JS glue forwards DOM events as small JSON objects:
//!
//! ```json
//! {"kind":"key","key":"Escape"}
//! {"kind":"touch","phase":"start","surface":"hero","x":312.5}
//! {"kind":"scroll","y":640}
//! {"kind":"intersection","target":"stat-travelers","ratio":0.82}
//! ```
//!
//! Kinds without an engine meaning return `Ok(None)`.

use serde::Deserialize;
use yatra_core::event::{
    ClickEvent, ClickRegion, Event, IntersectionEvent, KeyCode, KeyEvent, ResizeEvent,
    ScrollEvent, TouchEvent, TouchPhase, TouchSurface,
};

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// A field carried a value outside its vocabulary.
    UnknownValue {
        field: &'static str,
        value: String,
    },
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownValue { field, value } => write!(f, "unknown {field}: {value}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    surface: Option<String>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    ratio: Option<f32>,
}

/// Parse one JSON-encoded host event.
pub fn parse_encoded_input_to_event(json: &str) -> Result<Option<Event>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "key" => {
            let key = raw.key.ok_or(InputParseError::MissingField("key"))?;
            Ok(Some(Event::Key(KeyEvent::new(KeyCode::from_dom_key(&key)))))
        }
        "pointer_down" | "mousedown" => Ok(Some(Event::PointerDown)),
        "touch" => parse_touch(&raw).map(Some),
        "scroll" => {
            let y = raw.y.ok_or(InputParseError::MissingField("y"))?;
            Ok(Some(Event::Scroll(ScrollEvent { y })))
        }
        "resize" => {
            let width = raw.width.ok_or(InputParseError::MissingField("width"))?;
            let height = raw.height.ok_or(InputParseError::MissingField("height"))?;
            Ok(Some(Event::Resize(ResizeEvent { width, height })))
        }
        "click" => {
            let region = match raw.region.as_deref() {
                Some("nav_container") => ClickRegion::NavContainer,
                Some("modal_backdrop") => ClickRegion::ModalBackdrop,
                Some(_) | None => ClickRegion::Elsewhere,
            };
            Ok(Some(Event::Click(ClickEvent { region })))
        }
        "intersection" => {
            let target = raw.target.ok_or(InputParseError::MissingField("target"))?;
            let ratio = raw.ratio.ok_or(InputParseError::MissingField("ratio"))?;
            Ok(Some(Event::Intersection(IntersectionEvent { target, ratio })))
        }
        _ => Ok(None),
    }
}

fn parse_touch(raw: &RawInput) -> Result<Event, InputParseError> {
    let phase = match raw.phase.as_deref() {
        Some("start") => TouchPhase::Start,
        Some("end") => TouchPhase::End,
        Some("cancel") => TouchPhase::Cancel,
        Some(other) => {
            return Err(InputParseError::UnknownValue {
                field: "phase",
                value: other.to_owned(),
            });
        }
        None => return Err(InputParseError::MissingField("phase")),
    };
    let surface = match raw.surface.as_deref() {
        Some("hero") => TouchSurface::Hero,
        Some("testimonials") => TouchSurface::Testimonials,
        Some(other) => {
            return Err(InputParseError::UnknownValue {
                field: "surface",
                value: other.to_owned(),
            });
        }
        None => return Err(InputParseError::MissingField("surface")),
    };
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    Ok(Event::Touch(TouchEvent::new(phase, surface, x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps_dom_names() {
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"key","key":"Escape"}"#),
            Ok(Some(Event::key(KeyCode::Escape)))
        );
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"key","key":"q"}"#),
            Ok(Some(Event::key(KeyCode::Other)))
        );
    }

    #[test]
    fn touch_requires_phase_surface_and_x() {
        assert_eq!(
            parse_encoded_input_to_event(
                r#"{"kind":"touch","phase":"end","surface":"testimonials","x":10.5}"#
            ),
            Ok(Some(Event::touch_end(TouchSurface::Testimonials, 10.5)))
        );
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"touch","phase":"end","surface":"hero"}"#),
            Err(InputParseError::MissingField("x"))
        );
        assert!(matches!(
            parse_encoded_input_to_event(r#"{"kind":"touch","phase":"hover","surface":"hero","x":1}"#),
            Err(InputParseError::UnknownValue { field: "phase", .. })
        ));
    }

    #[test]
    fn click_regions_default_to_elsewhere() {
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"click","region":"modal_backdrop"}"#),
            Ok(Some(Event::click(ClickRegion::ModalBackdrop)))
        );
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"click"}"#),
            Ok(Some(Event::click(ClickRegion::Elsewhere)))
        );
    }

    #[test]
    fn scroll_resize_intersection() {
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"scroll","y":640}"#),
            Ok(Some(Event::scroll(640.0)))
        );
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"resize","width":800,"height":600}"#),
            Ok(Some(Event::resize(800, 600)))
        );
        assert_eq!(
            parse_encoded_input_to_event(r#"{"kind":"intersection","target":"s1","ratio":0.5}"#),
            Ok(Some(Event::intersection("s1", 0.5)))
        );
    }

    #[test]
    fn unknown_kind_and_bad_json() {
        assert_eq!(parse_encoded_input_to_event(r#"{"kind":"wheel"}"#), Ok(None));
        assert!(matches!(
            parse_encoded_input_to_event("not json"),
            Err(InputParseError::Json(_))
        ));
    }
}
