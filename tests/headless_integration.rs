use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use herotext::config::{Config, Section};
use herotext::filler::FixedFiller;
use herotext::page::Page;
use herotext::runtime::{Clock, FixedTicker, HeroEvent, ManualClock, Runner, TestEventSource};

fn dot_filler() -> FixedFiller {
    FixedFiller('.')
}

fn two_section_config() -> Config {
    Config {
        name: "Grace".into(),
        sections: vec![
            Section::new("Compilers", &["A-0 and FLOW-MATIC"]),
            Section::new("Navy", &["Rear admiral"]),
        ],
        ..Config::default()
    }
}

// Headless run of the page using the internal runtime without a TTY.
// Keys arrive through TestEventSource while a ManualClock drives time.
#[test]
fn headless_section_switch_flow() {
    let clock = ManualClock::new();
    let mut page = Page::with_filler(&two_section_config(), dot_filler).unwrap();
    page.start(clock.now()).unwrap();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    tx.send(HeroEvent::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)))
        .unwrap();

    for _ in 0..200u32 {
        clock.advance(Duration::from_millis(10));
        match runner.step() {
            HeroEvent::Tick | HeroEvent::Resize => {}
            HeroEvent::Key(key) => {
                if key.code == KeyCode::Right {
                    page.next_section(clock.now()).unwrap();
                }
            }
        }
        page.advance(clock.now());
    }

    assert_eq!(page.section_index(), 1);
    assert_eq!(page.section_title(), "Navy");
    let paragraphs: Vec<&str> = page.paragraph_texts().collect();
    assert_eq!(paragraphs, ["Rear admiral"]);
    assert_eq!(page.name_text(), "Grace");
    assert!(page.is_settled());
}

#[test]
fn headless_teardown_stops_all_output() {
    let clock = ManualClock::new();
    let mut page = Page::with_filler(&two_section_config(), dot_filler).unwrap();
    page.start(clock.now()).unwrap();

    clock.advance(Duration::from_millis(30));
    page.advance(clock.now());
    let name = page.name_text().to_string();
    let typed = page.typed_text().to_string();
    let title = page.section_title().to_string();

    page.teardown();
    assert_eq!(page.next_deadline(), None);

    clock.advance(Duration::from_secs(60));
    assert!(!page.advance(clock.now()));
    assert_eq!(page.name_text(), name);
    assert_eq!(page.typed_text(), typed);
    assert_eq!(page.section_title(), title);
}

#[test]
fn headless_deadline_driven_loop() {
    // Advance exactly to each deadline, the way the binary sleeps until the
    // next one, and make sure the reveal finishes in the expected frames.
    let clock = ManualClock::new();
    let config = Config {
        sections: vec![],
        ..two_section_config()
    };
    let mut page = Page::with_filler(&config, dot_filler).unwrap();
    page.start(clock.now()).unwrap();

    let mut wakeups = 0;
    while !page.is_settled() {
        let due = page.next_deadline().expect("typewriter always has a deadline");
        clock.set(due);
        page.advance(clock.now());
        wakeups += 1;
        assert!(wakeups < 1_000);
    }

    // "Grace" with the default step of 2 takes 10 frames, 9 after the first
    assert_eq!(page.name_text(), "Grace");
    assert_eq!(clock.now(), Duration::from_millis(9 * 12));
}
