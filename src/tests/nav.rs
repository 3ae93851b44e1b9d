use super::{LinkRef, NavData, NavRow};
use crate::section::Section;

fn section(file: &str, id: &str, level: usize, offset: usize) -> Section {
    Section {
        id: id.to_string(),
        title: id.replace('-', " "),
        level,
        offset,
        line_start: offset,
        file_path: file.to_string(),
    }
}

fn sample() -> NavData {
    NavData::from_sections(&[
        section("intro.md", "introduction", 1, 0),
        section("intro.md", "what-is-it", 2, 4),
        section("intro.md", "quick-stats", 2, 9),
        section("start.md", "prerequisites", 2, 20),
        section("start.md", "installation", 2, 25),
        section("start.md", "first-run", 3, 30),
    ])
}

#[test]
fn test_groups_follow_files() {
    let nav = sample();

    assert_eq!(nav.groups.len(), 2);
    assert_eq!(nav.groups[0].title, "introduction");
    let intro_ids: Vec<&str> = nav.groups[0].items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(intro_ids, vec!["what-is-it", "quick-stats"]);

    // No level-1 heading, so the file names the group and every heading is a link.
    assert_eq!(nav.groups[1].title, "start");
    assert_eq!(nav.groups[1].items.len(), 3);
    assert!(nav.link("introduction").is_none());
}

#[test]
fn test_rows_skip_collapsed_groups() {
    let mut nav = sample();
    assert_eq!(nav.rows().len(), 7);

    nav.toggle_group(0);
    assert_eq!(
        nav.rows()[..2],
        [NavRow::Group(0), NavRow::Group(1)],
        "collapsed group keeps only its header"
    );
    assert_eq!(nav.row_of(LinkRef { group: 0, item: 1 }), None);
    assert_eq!(nav.row_of(LinkRef { group: 1, item: 0 }), Some(2));

    nav.toggle_group(0);
    assert_eq!(nav.row_of(LinkRef { group: 0, item: 1 }), Some(2));
}

#[test]
fn test_filter_hides_unmatched_groups() {
    let mut nav = sample();
    nav.filter("INSTALL");

    assert!(!nav.groups[0].visible);
    assert!(nav.groups[1].visible);
    assert_eq!(
        nav.rows(),
        vec![
            NavRow::Group(1),
            NavRow::Item(LinkRef { group: 1, item: 1 })
        ]
    );
}

#[test]
fn test_filter_expands_matching_groups() {
    let mut nav = sample();
    nav.toggle_group(1);
    assert!(nav.groups[1].collapsed);

    nav.filter("run");
    assert!(!nav.groups[1].collapsed);
    assert_eq!(nav.row_of(nav.link("first-run").unwrap()), Some(1));
}

#[test]
fn test_empty_filter_restores_everything() {
    let mut nav = sample();
    nav.filter("zzz");
    assert!(nav.rows().is_empty());

    nav.toggle_group(0);
    nav.filter("");
    assert!(nav.groups.iter().all(|g| g.visible));
    assert!(nav.groups[0].collapsed, "clearing the filter leaves folding alone");
    assert_eq!(nav.rows().len(), 5);
}

#[test]
fn test_title_only_group_survives_cleared_search() {
    let mut nav = NavData::from_sections(&[section("solo.md", "solo", 1, 0)]);
    assert_eq!(nav.rows(), vec![NavRow::Group(0)]);

    nav.filter("solo");
    assert!(nav.rows().is_empty(), "a group without links has nothing to match");

    nav.filter("");
    assert_eq!(nav.rows(), vec![NavRow::Group(0)]);
}

#[test]
fn test_outline_serialises_links_only() {
    let json = serde_json::to_value(sample()).unwrap();

    assert_eq!(json["groups"][0]["title"], "introduction");
    assert_eq!(json["groups"][1]["items"][2]["id"], "first-run");
    assert!(json["groups"][0].get("collapsed").is_none());
    assert!(json["groups"][0]["items"][0].get("active").is_none());
}
