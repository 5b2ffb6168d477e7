//! Properties of the deterministic task ordering.

use std::collections::HashSet;

use plotline::task::{sort_tasks, Task};

fn task(name: &str, start: i64, feature: Option<&str>) -> Task {
    let mut t = Task::new(name, start, start + 10);
    t.feature = feature.map(str::to_string);
    t
}

fn fixture() -> Vec<Task> {
    vec![
        task("ship", 400, Some("launch")),
        task("write docs", 150, None),
        task("api", 120, Some("backend")),
        task("schema", 100, Some("backend")),
        task("announce", 300, Some("launch")),
        task("kickoff", 10, None),
    ]
}

#[test]
fn ungrouped_first_then_groups_by_earliest_start() {
    let names: Vec<_> = sort_tasks(&fixture()).iter().map(|t| t.name.clone()).collect();
    assert_eq!(
        names,
        vec!["kickoff", "write docs", "schema", "api", "announce", "ship"]
    );
}

#[test]
fn sorting_is_idempotent() {
    let once = sort_tasks(&fixture());
    let twice = sort_tasks(&once);
    assert_eq!(once, twice);
}

#[test]
fn sorting_preserves_the_id_multiset() {
    let input = fixture();
    let before: HashSet<_> = input.iter().map(|t| t.id.clone()).collect();
    let sorted = sort_tasks(&input);
    let after: HashSet<_> = sorted.iter().map(|t| t.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(sorted.len(), input.len());
}

#[test]
fn equal_starts_keep_relative_order() {
    let tasks = vec![
        task("first", 100, None),
        task("second", 100, None),
        task("third", 100, None),
    ];
    let names: Vec<_> = sort_tasks(&tasks).iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn empty_and_single_collections_are_fine() {
    assert!(sort_tasks(&[]).is_empty());
    let one = vec![task("only", 5, Some("solo"))];
    assert_eq!(sort_tasks(&one), one);
}
