//! Property tests for the carousel, wizard, and filter engines.

use std::time::Duration;

use proptest::prelude::*;
use yatra_widgets::carousel::{Carousel, Direction, normalize_index};
use yatra_widgets::filter::{ALL, Card, FilterEngine};
use yatra_widgets::toast::ToastKind;
use yatra_widgets::wizard::{StepSpec, StepWizard, WizardOutcome};

type Sink = Vec<(ToastKind, String)>;

const TAGS: [&str; 4] = ["beach", "cultural", "adventure", "heritage"];

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn carousel(len: usize) -> Carousel {
    Carousel::new("test", len, ms(5000), ms(1000))
}

proptest! {
    /// `len` forward steps return to the starting index.
    #[test]
    fn full_cycle_returns_to_start(len in 1usize..20, start in 0i64..40) {
        let mut c = carousel(len);
        c.jump_to(start, ms(0));
        let origin = c.active();
        for _ in 0..len {
            c.advance(Direction::Forward, ms(0));
        }
        prop_assert_eq!(c.active(), origin);
    }

    /// A backward step undoes a forward step and vice versa.
    #[test]
    fn inverse_pairs(len in 1usize..20, start in 0i64..40, forward_first in any::<bool>()) {
        let mut c = carousel(len);
        c.jump_to(start, ms(0));
        let origin = c.active();
        let first = if forward_first { Direction::Forward } else { Direction::Backward };
        c.advance(first, ms(0));
        c.advance(first.reverse(), ms(0));
        prop_assert_eq!(c.active(), origin);
    }

    /// Any sequence of operations keeps `active` in range.
    #[test]
    fn active_stays_in_range(
        len in 1usize..10,
        ops in prop::collection::vec((0u8..3, -50i64..50, 0u64..20_000), 0..50),
    ) {
        let mut c = carousel(len);
        c.start(ms(0));
        let mut now = 0;
        for (op, idx, dt) in ops {
            now += dt;
            match op {
                0 => { c.advance(Direction::Forward, ms(now)); }
                1 => { c.jump_to(idx, ms(now)); }
                _ => { c.tick(ms(now)); }
            }
            prop_assert!(c.active() < len);
            prop_assert_eq!(Some(c.active()), normalize_index(c.active() as i64, len));
        }
    }

    /// A manual advance followed by silence auto-advances at exactly
    /// `settle + interval`, however many manual advances came first.
    #[test]
    fn rearm_fires_once_at_settle_plus_interval(
        len in 2usize..8,
        presses in prop::collection::vec(1u64..800, 1..10),
    ) {
        let mut c = carousel(len);
        c.start(ms(0));
        let mut now = 0;
        for gap in presses {
            now += gap;
            c.advance(Direction::Forward, ms(now));
        }
        let before = c.active();
        prop_assert!(c.tick(ms(now + 5999)).is_none());
        prop_assert!(c.tick(ms(now + 6000)).is_some());
        prop_assert_eq!(c.active(), (before + 1) % len);
    }

    /// With a blank required field, `next()` never moves and notifies once.
    #[test]
    fn blank_field_blocks_next(
        total in 2usize..6,
        blank in 0usize..3,
        whitespace in "[ \t]{0,3}",
    ) {
        let fields = ["a", "b", "c"];
        let steps = (0..total).map(|_| StepSpec::new(fields)).collect();
        let mut w = StepWizard::new(steps);
        for (i, f) in fields.iter().enumerate() {
            let value = if i == blank { whitespace.clone() } else { "x".to_string() };
            w.set_field(*f, value);
        }
        let mut sink = Sink::new();
        let outcome = w.next(&mut sink);
        prop_assert!(matches!(outcome, WizardOutcome::Blocked(_)));
        prop_assert_eq!(w.current(), 1);
        prop_assert_eq!(sink.len(), 1);
    }

    /// `total - 1` valid `next()` calls reach the last step; a valid submit
    /// resets to step 1.
    #[test]
    fn valid_walk_reaches_end_and_submit_resets(total in 1usize..8) {
        let steps = (0..total).map(|i| StepSpec::new([format!("f{i}")])).collect();
        let mut w = StepWizard::new(steps);
        let mut sink = Sink::new();
        for i in 0..total {
            w.set_field(format!("f{i}"), "value");
        }
        for _ in 1..total {
            let advanced = matches!(w.next(&mut sink), WizardOutcome::Advanced { .. });
            prop_assert!(advanced);
        }
        prop_assert_eq!(w.current(), total);
        prop_assert_eq!(w.submit(&mut sink), WizardOutcome::Submitted);
        prop_assert_eq!(w.current(), 1);
    }

    /// After any filter, every visible card carries the tag (or the filter
    /// is "all"), and every tagged card is visible.
    #[test]
    fn filter_visibility_matches_tags(
        card_tags in prop::collection::vec(prop::collection::vec(0usize..4, 0..3), 1..12),
        filters in prop::collection::vec(0usize..5, 1..6),
    ) {
        let cards = card_tags
            .iter()
            .enumerate()
            .map(|(i, tags)| {
                let raw: Vec<&str> = tags.iter().map(|t| TAGS[*t]).collect();
                Card::new(format!("card-{i}")).tags(&raw.join(" "))
            })
            .collect();
        let mut e = FilterEngine::new(cards, Vec::new());
        for f in filters {
            let tag = if f == 4 { ALL } else { TAGS[f] };
            let visible = e.apply_filter(tag);
            let mut counted = 0;
            for card in e.cards() {
                let expected = tag == ALL || card.has_tag(tag);
                prop_assert_eq!(card.is_visible(), expected);
                counted += usize::from(expected);
            }
            prop_assert_eq!(visible, counted);
        }
    }
}
