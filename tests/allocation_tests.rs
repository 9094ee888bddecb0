use capacity_tool::{AssignmentSlot, ProjectRecord, ResourceDirectory, RosterRecord};

fn member(department: &str, name: &str) -> RosterRecord {
    RosterRecord::new(department, name)
}

fn slot(label: &str, resource_name: &str, hours: f64) -> AssignmentSlot {
    AssignmentSlot {
        label: label.to_string(),
        resource_name: resource_name.to_string(),
        hours,
    }
}

fn project(
    initiative: &str,
    pm: &str,
    pm_hours: f64,
    assignments: Vec<AssignmentSlot>,
) -> ProjectRecord {
    ProjectRecord {
        initiative: initiative.to_string(),
        planned_start_date: "1/1/2025".to_string(),
        planned_end_quarter: "2025, Q4".to_string(),
        duration_months: 12.0,
        project_manager: pm.to_string(),
        project_manager_hours: pm_hours,
        assignments,
    }
}

#[test]
fn pm_hours_accumulate_on_named_resource() {
    let roster = vec![member("Eng", "Smith, John")];
    let projects = vec![
        project("Alpha", "Smith, John", 500.0, Vec::new()),
        project("Beta", "Smith, John", 300.0, Vec::new()),
    ];

    let directory = ResourceDirectory::build(&roster, &projects);
    let smith = directory.get("Smith, John").unwrap();
    assert_eq!(smith.allocated_hours, 800.0);
    assert_eq!(smith.projects.len(), 2);
    assert_eq!(smith.projects[0].initiative, "Alpha");
    assert_eq!(smith.projects[0].role, "Project Manager");
    assert_eq!(smith.projects[1].initiative, "Beta");
}

#[test]
fn pm_contribution_is_recorded_even_at_zero_hours() {
    let roster = vec![member("Eng", "Smith, John")];
    let projects = vec![project("Alpha", "Smith, John", 0.0, Vec::new())];

    let directory = ResourceDirectory::build(&roster, &projects);
    let smith = directory.get("Smith, John").unwrap();
    assert_eq!(smith.allocated_hours, 0.0);
    assert_eq!(smith.projects.len(), 1);
    assert_eq!(smith.projects[0].hours, 0.0);
}

#[test]
fn slot_assignments_use_slot_label_as_role() {
    let roster = vec![member("Eng", "Jones, Sarah")];
    let projects = vec![project(
        "Alpha",
        "Nobody",
        100.0,
        vec![slot("Resource 2", "Jones, Sarah", 240.0)],
    )];

    let directory = ResourceDirectory::build(&roster, &projects);
    let jones = directory.get("Jones, Sarah").unwrap();
    assert_eq!(jones.allocated_hours, 240.0);
    assert_eq!(jones.projects[0].role, "Resource 2");
}

#[test]
fn zero_and_negative_slot_hours_are_skipped() {
    let roster = vec![member("Eng", "Jones, Sarah")];
    let projects = vec![project(
        "Alpha",
        "",
        0.0,
        vec![
            slot("Resource 1", "Jones, Sarah", 0.0),
            slot("Resource 2", "Jones, Sarah", -40.0),
        ],
    )];

    let directory = ResourceDirectory::build(&roster, &projects);
    let jones = directory.get("Jones, Sarah").unwrap();
    assert_eq!(jones.allocated_hours, 0.0);
    assert!(jones.projects.is_empty());
}

#[test]
fn names_absent_from_roster_contribute_nothing() {
    // Orphaned allocations are silently dropped.
    let roster = vec![member("Eng", "Smith, John")];
    let projects = vec![project(
        "Alpha",
        "Ghost, Casper",
        400.0,
        vec![slot("Resource 1", "Another Ghost", 200.0)],
    )];

    let directory = ResourceDirectory::build(&roster, &projects);
    assert_eq!(directory.len(), 1);
    assert!(directory.get("Ghost, Casper").is_none());
    let smith = directory.get("Smith, John").unwrap();
    assert_eq!(smith.allocated_hours, 0.0);
}

#[test]
fn duplicate_roster_names_keep_last_department() {
    // Last write wins, and the entry keeps its original position.
    let roster = vec![
        member("Eng", "Smith, John"),
        member("Eng", "Jones, Sarah"),
        member("Product", "Smith, John"),
    ];

    let directory = ResourceDirectory::build(&roster, &[]);
    assert_eq!(directory.len(), 2);
    assert_eq!(directory.resources()[0].name, "Smith, John");
    assert_eq!(directory.resources()[0].department, "Product");
    assert_eq!(directory.resources()[1].name, "Jones, Sarah");
}

#[test]
fn duplicate_roster_name_resets_accumulated_state() {
    // The overwrite installs a fresh entry; it cannot carry hours from the
    // shadowed record because attribution happens after the roster fold.
    let roster = vec![member("Eng", "Smith, John"), member("Product", "Smith, John")];
    let projects = vec![project("Alpha", "Smith, John", 100.0, Vec::new())];

    let directory = ResourceDirectory::build(&roster, &projects);
    let smith = directory.get("Smith, John").unwrap();
    assert_eq!(smith.department, "Product");
    assert_eq!(smith.allocated_hours, 100.0);
}

#[test]
fn roster_rows_with_empty_names_are_skipped() {
    let roster = vec![member("Eng", ""), member("Eng", "Jones, Sarah")];
    let directory = ResourceDirectory::build(&roster, &[]);
    assert_eq!(directory.len(), 1);
    assert!(directory.get("").is_none());
}

#[test]
fn join_is_deterministic_over_identical_inputs() {
    let roster = vec![member("Eng", "Smith, John"), member("Product", "Wilson, Lisa")];
    let projects = vec![project(
        "Alpha",
        "Smith, John",
        500.0,
        vec![slot("Resource 1", "Wilson, Lisa", 120.0)],
    )];

    let first = ResourceDirectory::build(&roster, &projects);
    let second = ResourceDirectory::build(&roster, &projects);
    assert_eq!(first, second);
}
