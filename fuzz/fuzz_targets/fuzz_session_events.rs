#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yatra_core::event::{ClickRegion, Event, KeyCode, TouchSurface};
use yatra_runtime::SiteConfig;
use yatra_web::{PageLayout, SiteSession};

#[derive(Debug, Arbitrary)]
enum Op {
    Wait(u16),
    Touch {
        testimonials: bool,
        start: i16,
        end: i16,
    },
    Scroll(u16),
    Resize(u16),
    Click(u8),
    Key(bool),
    ChangeSlide(i8),
    GoToSlide(i32),
    Field {
        index: u8,
        filled: bool,
    },
    Next,
    Previous,
    Submit,
    OpenModal,
    CloseModal,
    Filter(u8),
    BookPackage,
    ToggleMenu,
    Intersection {
        target: u8,
        ratio: u8,
    },
}

const FIELDS: [&str; 7] = [
    "destination",
    "travelDate",
    "travelers",
    "fullName",
    "email",
    "phone",
    "paymentMethod",
];
const FILTERS: [&str; 6] = ["all", "cultural", "adventure", "beach", "spiritual", "unknown"];
const OBSERVED: [&str; 3] = ["stat-travelers", "destinations-header", "missing"];

fuzz_target!(|ops: Vec<Op>| {
    let mut s = SiteSession::new(PageLayout::tourism_site(), SiteConfig::default());
    for op in ops.into_iter().take(256) {
        match op {
            Op::Wait(ms) => s.advance_time(Duration::from_millis(u64::from(ms))),
            Op::Touch {
                testimonials,
                start,
                end,
            } => {
                let surface = if testimonials {
                    TouchSurface::Testimonials
                } else {
                    TouchSurface::Hero
                };
                s.handle_event(&Event::touch_start(surface, f32::from(start)));
                s.handle_event(&Event::touch_end(surface, f32::from(end)));
            }
            Op::Scroll(y) => s.handle_event(&Event::scroll(f64::from(y))),
            Op::Resize(w) => s.handle_event(&Event::resize(u32::from(w), 800)),
            Op::Click(r) => {
                let region = match r % 3 {
                    0 => ClickRegion::NavContainer,
                    1 => ClickRegion::ModalBackdrop,
                    _ => ClickRegion::Elsewhere,
                };
                s.handle_event(&Event::click(region));
            }
            Op::Key(escape) => {
                let code = if escape { KeyCode::Escape } else { KeyCode::Tab };
                s.handle_event(&Event::key(code));
            }
            Op::ChangeSlide(d) => {
                let _ = s.change_slide(i32::from(d));
            }
            Op::GoToSlide(i) => {
                let _ = s.go_to_slide(i64::from(i));
            }
            Op::Field { index, filled } => {
                let field = FIELDS[usize::from(index) % FIELDS.len()];
                s.set_booking_field(field, if filled { "x" } else { "  " });
            }
            Op::Next => {
                let _ = s.next_step();
            }
            Op::Previous => {
                let _ = s.previous_step();
            }
            Op::Submit => {
                let _ = s.submit_booking();
            }
            Op::OpenModal => {
                s.open_booking_modal();
            }
            Op::CloseModal => {
                s.close_booking_modal();
            }
            Op::Filter(f) => {
                s.filter(FILTERS[usize::from(f) % FILTERS.len()]);
            }
            Op::BookPackage => s.book_package("golden-triangle"),
            Op::ToggleMenu => {
                s.toggle_menu();
            }
            Op::Intersection { target, ratio } => {
                let id = OBSERVED[usize::from(target) % OBSERVED.len()];
                s.handle_event(&Event::intersection(id, f32::from(ratio) / 255.0));
            }
        }
        let _ = s.step();

        // Invariants that must hold after every step.
        assert!(s.hero().active() < s.hero().len());
        assert!(s.testimonials().active() < s.testimonials().len());
        let current = s.wizard().current();
        assert!((1..=s.wizard().total()).contains(&current));
        let visible = s.filter_engine().visible_ids().len();
        let active = s.filter_engine().active_filter();
        if active == "all" {
            assert_eq!(visible, s.filter_engine().cards().len());
        } else {
            assert!(s
                .filter_engine()
                .cards()
                .iter()
                .all(|c| !c.is_visible() || c.has_tag(active)));
        }
    }
});
