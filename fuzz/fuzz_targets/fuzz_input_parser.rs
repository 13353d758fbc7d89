#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use yatra_runtime::SiteConfig;
use yatra_web::input_parser::parse_encoded_input_to_event;
use yatra_web::{PageLayout, SiteSession};

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary text to the host-event decoder; it must never panic.
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let _ = parse_encoded_input_to_event(json);
    let _ = PageLayout::from_json(json);

    // Whatever decodes must also be safe to route and render.
    let mut session = SiteSession::new(PageLayout::tourism_site(), SiteConfig::default());
    for line in json.lines() {
        let _ = session.push_encoded_input(line);
        session.advance_time(Duration::from_millis(16));
        let _ = session.step();
    }
});
