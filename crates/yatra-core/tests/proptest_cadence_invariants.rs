//! Property-based invariant tests for cadence timing and debouncing.
//!
//! 1. A cadence never reports more fires than elapsed / interval allows.
//! 2. After a rearm the next fire is exactly settle + interval away.
//! 3. Any burst of rearms leaves exactly one pending deadline.
//! 4. A debouncer releases at most one value per quiet period, and it is
//!    always the most recently pushed one.

use std::time::Duration;

use proptest::prelude::*;
use yatra_core::cadence::Cadence;
use yatra_core::debounce::Debouncer;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

proptest! {
    #[test]
    fn fires_bounded_by_elapsed_time(
        interval in 1u64..10_000,
        polls in proptest::collection::vec(0u64..5_000, 1..50),
    ) {
        let mut c = Cadence::new(ms(interval), ms(1000));
        c.start(ms(0));
        let mut now = 0u64;
        let mut total = 0u64;
        for step in polls {
            now += step;
            total += u64::from(c.poll(ms(now)));
        }
        prop_assert_eq!(total, now / interval);
    }

    #[test]
    fn rearm_schedules_settle_plus_interval(
        interval in 1u64..10_000,
        settle in 0u64..5_000,
        at in 0u64..100_000,
    ) {
        let mut c = Cadence::new(ms(interval), ms(settle));
        c.start(ms(0));
        c.rearm(ms(at));
        let due = at + settle + interval;
        prop_assert_eq!(c.next_deadline(), Some(ms(due)));
        prop_assert_eq!(c.poll(ms(due - 1)), 0);
        prop_assert_eq!(c.poll(ms(due)), 1);
    }

    #[test]
    fn rearm_burst_leaves_one_deadline(
        gaps in proptest::collection::vec(0u64..900, 1..20),
    ) {
        let mut c = Cadence::new(ms(5000), ms(1000));
        c.start(ms(0));
        let mut now = 0u64;
        for gap in gaps {
            now += gap;
            c.rearm(ms(now));
        }
        let due = now + 6000;
        prop_assert_eq!(c.poll(ms(due)), 1);
        prop_assert_eq!(c.poll(ms(due + 4999)), 0);
    }

    #[test]
    fn debounce_latest_value_wins(
        values in proptest::collection::vec(any::<i32>(), 1..30),
        wait in 1u64..500,
    ) {
        let mut d = Debouncer::new(ms(wait));
        let mut now = 0u64;
        for v in &values {
            d.push(*v, ms(now));
            prop_assert_eq!(d.poll(ms(now)), None);
            now += wait / 2;
        }
        let last = *values.last().unwrap();
        let released = d.poll(ms(now + wait));
        prop_assert_eq!(released, Some(last));
        prop_assert_eq!(d.poll(ms(now + 10 * wait)), None);
    }
}
