#![forbid(unsafe_code)]

//! Static page description.
//!
//! The host measures the page once (and again after a resize) and hands the
//! session a [`PageLayout`]: section offsets for nav highlighting, the card
//! collection for filtering, item counts for the carousels, the elements
//! each observer watches, and the required fields of every booking step.
//!
//! Layouts are plain serde data so the JS glue can send them as JSON.

use serde::{Deserialize, Serialize};
use yatra_core::geometry::SectionBounds;
use yatra_widgets::filter::{ALL, Card};
use yatra_widgets::wizard::StepSpec;

/// `section[id]` with its measured offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionLayout {
    #[must_use]
    pub fn new(id: &str, top: f64, height: f64) -> Self {
        Self {
            id: id.to_owned(),
            top,
            height,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> SectionBounds {
        SectionBounds::new(self.id.clone(), self.top, self.height)
    }
}

/// `.package-card` and its data attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardLayout {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `data-destination`.
    pub destination: String,
    /// `data-category`.
    pub category: String,
}

impl CardLayout {
    fn to_card(&self) -> Card {
        Card::new(self.id.clone())
            .title(self.title.clone())
            .description(self.description.clone())
            .destination(self.destination.clone())
            .tags(&self.category)
    }
}

/// `.stat-number` with its `data-target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterLayout {
    pub id: String,
    pub target: u64,
}

/// `img[data-src]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImageLayout {
    pub id: String,
    pub src: String,
}

/// Everything the session needs to know about the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Sections in document order.
    pub sections: Vec<SectionLayout>,
    pub hero_slides: usize,
    pub testimonials: usize,
    /// `data-filter` values of the filter buttons, in order.
    pub filters: Vec<String>,
    pub cards: Vec<CardLayout>,
    /// `.scroll-animate` element ids.
    pub reveal: Vec<String>,
    pub counters: Vec<CounterLayout>,
    pub lazy_images: Vec<LazyImageLayout>,
    /// Required field names of each booking step.
    pub booking_steps: Vec<Vec<String>>,
}

impl PageLayout {
    /// Decode a layout sent by the host.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections.iter().map(SectionLayout::bounds).collect()
    }

    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().map(CardLayout::to_card).collect()
    }

    #[must_use]
    pub fn step_specs(&self) -> Vec<StepSpec> {
        self.booking_steps
            .iter()
            .map(|fields| StepSpec::new(fields.iter().cloned()))
            .collect()
    }

    /// Index of a section in document order.
    #[must_use]
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// The stock tourism landing page.
    #[must_use]
    pub fn tourism_site() -> Self {
        let sections = [
            ("home", 0.0, 900.0),
            ("destinations", 900.0, 1100.0),
            ("packages", 2000.0, 1200.0),
            ("experiences", 3200.0, 900.0),
            ("testimonials", 4100.0, 700.0),
            ("contact", 4800.0, 900.0),
        ]
        .into_iter()
        .map(|(id, top, height)| SectionLayout::new(id, top, height))
        .collect();

        let card = |id: &str, title: &str, description: &str, destination: &str, category: &str| {
            CardLayout {
                id: id.to_owned(),
                title: title.to_owned(),
                description: description.to_owned(),
                destination: destination.to_owned(),
                category: category.to_owned(),
            }
        };

        Self {
            sections,
            hero_slides: 3,
            testimonials: 3,
            filters: [ALL, "cultural", "adventure", "beach", "spiritual"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            cards: vec![
                card(
                    "golden-triangle",
                    "Golden Triangle Tour",
                    "Delhi, Agra and Jaipur in seven days of forts and palaces.",
                    "rajasthan",
                    "cultural heritage",
                ),
                card(
                    "kerala-backwaters",
                    "Kerala Backwaters Escape",
                    "Houseboat cruises and quiet beaches along the Malabar coast.",
                    "kerala",
                    "beach relaxation",
                ),
                card(
                    "himalayan-trek",
                    "Himalayan Adventure",
                    "Trekking and river rafting in the high valleys.",
                    "himachal",
                    "adventure",
                ),
                card(
                    "goa-beaches",
                    "Goa Beach Holiday",
                    "Sun, sand and seafood on the western shore.",
                    "goa",
                    "beach",
                ),
                card(
                    "varanasi-ghats",
                    "Spiritual Varanasi",
                    "Dawn boat rides and evening aarti on the Ganges.",
                    "varanasi",
                    "spiritual cultural",
                ),
            ],
            reveal: [
                "destinations-header",
                "packages-header",
                "experiences-header",
                "contact-header",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            counters: vec![
                CounterLayout {
                    id: "stat-travelers".to_owned(),
                    target: 50_000,
                },
                CounterLayout {
                    id: "stat-destinations".to_owned(),
                    target: 29,
                },
                CounterLayout {
                    id: "stat-packages".to_owned(),
                    target: 150,
                },
            ],
            lazy_images: vec![LazyImageLayout {
                id: "experience-image-1".to_owned(),
                src: "images/experience-1.jpg".to_owned(),
            }],
            booking_steps: vec![
                vec![
                    "destination".to_owned(),
                    "travelDate".to_owned(),
                    "travelers".to_owned(),
                ],
                vec![
                    "fullName".to_owned(),
                    "email".to_owned(),
                    "phone".to_owned(),
                ],
                vec!["paymentMethod".to_owned()],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let layout =
            PageLayout::from_json(r#"{"hero_slides":4,"sections":[{"id":"home","top":0,"height":500}]}"#)
                .expect("decode");
        assert_eq!(layout.hero_slides, 4);
        assert_eq!(layout.testimonials, 0);
        assert_eq!(layout.section_index("home"), Some(0));
        assert!(layout.cards.is_empty());
    }

    #[test]
    fn tourism_site_is_consistent() {
        let layout = PageLayout::tourism_site();
        assert_eq!(layout.step_specs().len(), 3);
        assert_eq!(layout.filters[0], ALL);
        let cards = layout.cards();
        assert!(cards.iter().any(|c| c.has_tag("beach")));
        assert_eq!(layout.section_index("packages"), Some(2));
    }

    #[test]
    fn json_round_trip_preserves_layout() {
        let layout = PageLayout::tourism_site();
        let json = serde_json::to_string(&layout).expect("encode");
        assert_eq!(PageLayout::from_json(&json).expect("decode"), layout);
    }
}
