#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::PathBuf;

use debench_core::engine::Tracker;
use debench_core::message::{MessageLevel, MessageLog};
use debench_core::probe;
use debench_overlay::config::OverlaySection;
use debench_overlay::report::ReportAssembler;
use debench_overlay::session::Session;
use debench_overlay::sysinfo::RequestInfo;
use debench_overlay::template::TemplateEngine;
use debench_overlay::util::{format_bytes, percent_of};
use debench_overlay::assets;

fn theme_in(dir: &tempfile::TempDir) -> PathBuf {
    let theme = dir.path().join("theme");
    assets::ensure_assets_present(&theme).unwrap();
    theme
}

#[test]
fn format_bytes_table() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1024), "1 KB");
    assert_eq!(format_bytes(1024 * 1024), "1 MB");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(500), "500 B");
    assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
}

#[test]
fn percent_denominator_is_floored_to_one() {
    assert_eq!(percent_of(5, 0), 500);
    assert_eq!(percent_of(0, 0), 0);
    assert_eq!(percent_of(50, 200), 25);
    assert_eq!(percent_of(1, 3), 33);
}

#[test]
fn full_report_renders_one_row_per_checkpoint_message_and_error() {
    let dir = tempfile::tempdir().unwrap();
    let theme = theme_in(&dir);

    let mut tracker = Tracker::new(probe::now_ms(), true).unwrap();
    tracker.mark("db query").unwrap();
    tracker.capture_error("worker panicked", "worker.rs", 42);
    tracker.finalize(probe::now_ms()).unwrap();

    let mut messages = MessageLog::new();
    messages.record("cache warm", MessageLevel::Info);

    let engine = TemplateEngine::new(true);
    let assembler = ReportAssembler::new(&engine, &theme);
    let request = RequestInfo {
        method: "GET".into(),
        status: 200,
    };

    let html = assembler.build(&tracker, &messages, &request, false).unwrap();

    assert!(html.contains("#Script"));
    assert!(html.contains("#Debench"));
    assert!(html.contains("#db query"));
    assert!(html.contains("cache warm"));
    assert!(html.contains("INFO"));
    assert!(html.contains("worker panicked"));
    assert!(html.contains("worker.rs:42"));
    assert!(html.contains("GET"));
    assert!(html.contains("200"));
    // Three checkpoint rows: Script, Debench, db query.
    assert_eq!(html.matches("debench-row").count(), 3);
}

#[test]
fn minimal_report_is_a_single_condensed_line() {
    let dir = tempfile::tempdir().unwrap();
    let theme = theme_in(&dir);

    let mut tracker = Tracker::new(probe::now_ms(), true).unwrap();
    tracker.finalize(probe::now_ms()).unwrap();

    let engine = TemplateEngine::new(true);
    let assembler = ReportAssembler::new(&engine, &theme);

    let html = assembler
        .build(&tracker, &MessageLog::new(), &RequestInfo::default(), true)
        .unwrap();

    assert!(html.contains("debench-minimal"));
    assert!(html.contains("2 points"));
    assert!(!html.contains("debench-row"));
}

#[test]
fn session_flushes_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let section = OverlaySection {
        theme_dir: dir.path().join("theme").to_string_lossy().into_owned(),
        ..OverlaySection::default()
    };

    let mut session = Session::new(section).unwrap();
    session.mark("step").unwrap();

    let first = session.flush().unwrap();
    assert!(first.is_some());

    let second = session.flush().unwrap();
    assert!(second.is_none());
}

#[test]
fn messages_stay_with_their_own_session() {
    let dir = tempfile::tempdir().unwrap();
    let section = OverlaySection {
        theme_dir: dir.path().join("theme").to_string_lossy().into_owned(),
        ..OverlaySection::default()
    };

    let mut a = Session::new(section.clone()).unwrap();
    let mut b = Session::new(section).unwrap();
    a.record("belongs to request a", MessageLevel::Info);
    b.record("belongs to request b", MessageLevel::Info);

    // Flushing one session must not steal the other's messages.
    let html_b = b.flush().unwrap().unwrap();
    assert!(html_b.contains("belongs to request b"));
    assert!(!html_b.contains("belongs to request a"));

    let html_a = a.flush().unwrap().unwrap();
    assert!(html_a.contains("belongs to request a"));
    assert!(!html_a.contains("belongs to request b"));
}

#[test]
fn disabled_session_produces_no_output() {
    let section = OverlaySection {
        enabled: false,
        // Theme bootstrap must not run for a disabled session.
        theme_dir: "/nonexistent/debench-theme".into(),
        ..OverlaySection::default()
    };

    let mut session = Session::new(section).unwrap();
    session.mark("ignored").unwrap();
    assert_eq!(session.tracker().checkpoint_count(), 0);

    assert!(session.flush().unwrap().is_none());
}
