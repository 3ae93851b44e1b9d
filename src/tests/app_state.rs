use super::{AppState, Focus, Mode};
use crate::config::Config;
use crate::document::Document;
use crate::formats::markdown::MarkdownFormat;
use crate::nav::{LinkRef, NavRow};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// `# Guide` at line 0, then Install at 6, Usage at 18 and Faq at 35; 76 lines in all.
fn guide_text() -> String {
    let mut text = String::from("# Guide\n");
    for i in 0..4 {
        writeln!(text, "intro {i}").unwrap();
    }
    for (title, body) in [("Install", 10), ("Usage", 15), ("Faq", 40)] {
        write!(text, "\n## {title}\n").unwrap();
        for i in 0..body {
            writeln!(text, "line {i}").unwrap();
        }
    }
    text
}

fn guide() -> Document {
    Document::from_sources(
        vec![(PathBuf::from("guide.md"), guide_text())],
        &MarkdownFormat,
    )
}

fn ready(cfg: &Config) -> (AppState, Instant) {
    let start = Instant::now();
    let mut app = AppState::new(vec![], guide(), cfg, start);
    let now = start + ms(100);
    assert!(app.tick(now));
    (app, now)
}

#[test]
fn test_highlight_waits_for_initial_rebuild() {
    let start = Instant::now();
    let mut app = AppState::new(vec![], guide(), &Config::default(), start);

    let early = app.scroll_content(5);
    assert_eq!(early.active, None, "nothing is tracked before the load delay");

    assert!(!app.tick(start + ms(99)));
    assert!(app.tick(start + ms(100)));
    assert_eq!(app.page.nav.active_ids(), vec!["install"]);
}

#[test]
fn test_group_title_section_has_no_link() {
    let (app, _) = ready(&Config::default());

    // At the top only the level-1 heading is reached, and it titles the group.
    assert_eq!(app.page.content.offset(), 0);
    assert!(app.page.nav.active_ids().is_empty());
    assert_eq!(app.tracker.sections().len(), 4);
    assert_eq!(app.tracker.tracked_ids(), vec!["faq", "install", "usage"]);
}

#[test]
fn test_lookahead_activates_before_heading() {
    let (mut app, _) = ready(&Config::default());

    app.scroll_content(15);
    assert_eq!(app.page.nav.active_ids(), vec!["install"]);
    // 16 + 2 reaches Usage at line 18.
    app.scroll_content(1);
    assert_eq!(app.page.nav.active_ids(), vec!["usage"]);
}

#[test]
fn test_navigate_jumps_and_schedules_rebuild() {
    let (mut app, now) = ready(&Config::default());

    let update = app.navigate_to("usage", now).unwrap();
    assert_eq!(update.active.as_deref(), Some("usage"));
    assert_eq!(app.page.content.offset(), 18);
    assert_eq!(app.page.hash.as_deref(), Some("usage"));
    assert!(app.scheduler.is_pending());

    assert!(app.tick(now + ms(50)));
    assert_eq!(app.page.nav.active_ids(), vec!["usage"]);
}

#[test]
fn test_navigate_to_unknown_section() {
    let (mut app, now) = ready(&Config::default());

    assert!(app.navigate_to("nowhere", now).is_none());
    assert_eq!(app.message.as_deref(), Some("No section nowhere"));
    assert!(!app.scheduler.is_pending());
}

#[test]
fn test_scroll_top_tag_follows_threshold() {
    let (mut app, _) = ready(&Config::default());
    app.resize(10, 10);

    app.scroll_content(20);
    assert_eq!(app.page.scroll_top, Some(false));
    app.scroll_content(1);
    assert_eq!(app.page.scroll_top, Some(true));

    let update = app.scroll_to_top();
    assert!(!update.scroll_top_visible);
    assert_eq!(app.page.scroll_top, Some(false));
}

#[test]
fn test_missing_scroll_top_tag_is_skipped() {
    let cfg = Config {
        scroll_top_button: false,
        ..Config::default()
    };
    let (mut app, _) = ready(&cfg);

    let update = app.scroll_content(40);
    assert!(update.scroll_top_visible);
    assert_eq!(app.page.scroll_top, None);
    assert_eq!(app.page.nav.active_ids(), vec!["faq"]);
}

#[test]
fn test_sidebar_follows_active_link() {
    let mut text = String::new();
    for i in 0..30 {
        write!(text, "## S{i}\na\nb\nc\n").unwrap();
    }
    let doc = Document::from_sources(vec![(PathBuf::from("many.md"), text)], &MarkdownFormat);
    let start = Instant::now();
    let mut app = AppState::new(vec![], doc, &Config::default(), start);
    app.resize(5, 10);
    app.tick(start + ms(100));

    // 120 lines in a 10-line viewport end at offset 110, reaching S28 at 112.
    let update = app.scroll_to_bottom();
    assert_eq!(update.active.as_deref(), Some("s28"));
    assert!(update.centered);
    assert_eq!(app.page.sidebar_scroll, 26, "centring is clamped to the last page of rows");

    let again = app.scroll_content(0);
    assert!(!again.centered);
    assert_eq!(app.page.sidebar_scroll, 26);
}

#[test]
fn test_search_then_follow_link() {
    let (mut app, now) = ready(&Config::default());

    app.start_search();
    assert_eq!(app.mode, Mode::Search);
    assert_eq!(app.focus, Focus::Sidebar);
    for c in "fa".chars() {
        app.push_search_char(c);
    }
    assert_eq!(
        app.page.nav.rows(),
        vec![NavRow::Group(0), NavRow::Item(LinkRef { group: 0, item: 2 })]
    );

    app.finish_search();
    app.move_cursor(1);
    app.activate_cursor(now);
    assert_eq!(app.page.content.offset(), 35);
    assert_eq!(app.page.nav.active_ids(), vec!["faq"]);
    assert_eq!(app.search, "fa", "finishing keeps the filter");

    app.pop_search_char();
    app.clear_search();
    assert_eq!(app.page.nav.rows().len(), 4);
    assert_eq!(app.mode, Mode::Browse);
}

#[test]
fn test_toggle_group_from_link_row() {
    let (mut app, now) = ready(&Config::default());
    app.move_cursor(2);
    assert_eq!(
        app.cursor_row(),
        Some(NavRow::Item(LinkRef { group: 0, item: 1 }))
    );

    app.toggle_group_at_cursor();
    assert_eq!(app.sidebar_cursor, 0);
    assert_eq!(app.page.nav.rows(), vec![NavRow::Group(0)]);

    app.activate_cursor(now);
    assert_eq!(app.page.nav.rows().len(), 4, "activating a header unfolds it");
}

#[test]
fn test_reload_rebuilds_after_content_change() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), guide_text()).unwrap();
    let files = vec![file.path().to_path_buf()];

    let start = Instant::now();
    let doc = Document::load(&files, &MarkdownFormat);
    let mut app = AppState::new(files, doc, &Config::default(), start);
    app.tick(start + ms(100));
    app.navigate_to("faq", start + ms(200));

    fs::write(file.path(), "# Guide\n\n## Install\n\n## Extra\n").unwrap();
    let later = start + ms(300);
    app.reload(later);

    assert_eq!(app.message.as_deref(), Some("Reloaded 3 sections"));
    assert_eq!(app.page.hash, None, "the jumped-to section is gone");
    assert!(!app.tick(later + ms(99)));
    assert!(app.tick(later + ms(100)));
    assert_eq!(app.tracker.tracked_ids(), vec!["extra", "install"]);
    assert!(app.tracker.link("faq").is_none());
}
