#![forbid(unsafe_code)]

//! Static destination catalog and display-name helpers for the stubs.

/// One featured destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    pub images: &'static [&'static str],
}

const DESTINATIONS: &[Destination] = &[
    Destination {
        id: "rajasthan",
        name: "Rajasthan",
        tagline: "Land of Kings & Palaces",
        description: "Experience royal heritage in magnificent palaces, explore golden deserts, \
                      and witness vibrant festivals.",
        highlights: &[
            "Magnificent Palaces",
            "Desert Safari",
            "Camel Rides",
            "Folk Performances",
        ],
        images: &[
            "https://images.unsplash.com/photo-1477587458883-47145ed94245?w=800&h=600&fit=crop&q=85",
            "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800&h=600&fit=crop&q=85",
        ],
    },
    Destination {
        id: "kerala",
        name: "Kerala",
        tagline: "God's Own Country",
        description: "Cruise through serene backwaters, relax on pristine beaches, and experience \
                      authentic Ayurvedic treatments.",
        highlights: &[
            "Houseboat Cruises",
            "Ayurvedic Treatments",
            "Spice Plantations",
            "Beach Resorts",
        ],
        images: &[
            "https://images.unsplash.com/photo-1602216056096-3b40cc0c9944?w=800&h=600&fit=crop&q=85",
            "https://images.unsplash.com/photo-1588777564147-b3bc75eb5b08?w=800&h=600&fit=crop&q=85",
        ],
    },
];

/// Look up a destination by id.
#[must_use]
pub fn lookup(id: &str) -> Option<&'static Destination> {
    DESTINATIONS.iter().find(|d| d.id == id)
}

/// Every catalog entry.
#[must_use]
pub fn all() -> &'static [Destination] {
    DESTINATIONS
}

/// `"golden-triangle"` → `"golden triangle"`. Only the first dash is replaced.
#[must_use]
pub fn humanize_id(id: &str) -> String {
    id.replacen('-', " ", 1)
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(lookup("kerala").map(|d| d.name), Some("Kerala"));
        assert_eq!(lookup("rajasthan").map(|d| d.highlights.len()), Some(4));
        assert!(lookup("atlantis").is_none());
        assert_eq!(all().len(), 2);
    }

    #[test]
    fn humanize_replaces_first_dash_only() {
        assert_eq!(humanize_id("golden-triangle-tour"), "golden triangle-tour");
        assert_eq!(humanize_id("goa"), "goa");
    }

    #[test]
    fn capitalize_first_char() {
        assert_eq!(capitalize("kerala"), "Kerala");
        assert_eq!(capitalize(""), "");
    }
}
