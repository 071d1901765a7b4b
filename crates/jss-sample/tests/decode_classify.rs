use jss_core::Jobs;
use jss_sample::{
    classify, decode, decode_with, Assignment, DecodeOptions, DuplicatePolicy, ResultCategory,
};

fn single_job() -> Jobs {
    Jobs::new([("1", vec![(0u32, 2u32), (1, 1), (0, 1)])]).unwrap()
}

fn feasible_assignment() -> Assignment {
    [
        ("1_0,0", 1u8),
        ("1_0,1", 0),
        ("1_1,2", 1),
        ("1_1,3", 0),
        ("1_2,3", 1),
        ("1_2,4", 0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn decodes_selected_task_starts() {
    let schedule = decode(&feasible_assignment(), &single_job()).unwrap();
    let resolved = schedule.resolved().expect("feasible");
    assert_eq!(resolved["1"], vec![0, 2, 3]);
    assert!(schedule.is_feasible());
}

#[test]
fn feasible_schedule_reports_makespan() {
    let jobs = single_job();
    let schedule = decode(&feasible_assignment(), &jobs).unwrap();
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Makespan(4));
}

#[test]
fn missing_task_is_infeasible() {
    let jobs = single_job();
    let mut assignment = feasible_assignment();
    assignment.insert("1_2,3", 0);
    let schedule = decode(&assignment, &jobs).unwrap();
    assert_eq!(schedule.starts("1").unwrap(), &[Some(0), Some(2), None]);
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Infeasible);
}

#[test]
fn makespan_is_maximum_over_jobs() {
    let jobs = Jobs::new([
        ("1", vec![(0u32, 2u32), (1, 1)]),
        ("2", vec![(1, 1), (0, 3)]),
    ])
    .unwrap();
    let assignment: Assignment = [("1_0,0", 1u8), ("1_1,2", 1), ("2_0,0", 1), ("2_1,2", 1)]
        .into_iter()
        .collect();
    let schedule = decode(&assignment, &jobs).unwrap();
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Makespan(5));
}

#[test]
fn one_unresolved_job_spoils_the_whole_sample() {
    let jobs = Jobs::new([("1", vec![(0u32, 1u32)]), ("2", vec![(1, 1)])]).unwrap();
    let assignment: Assignment = [("1_0,0", 1u8), ("2_0,0", 0)].into_iter().collect();
    let schedule = decode(&assignment, &jobs).unwrap();
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Infeasible);
}

#[test]
fn auxiliary_variables_are_ignored() {
    let jobs = single_job();
    let mut assignment = feasible_assignment();
    assignment.insert("aux0", 1);
    assignment.insert("aux_1_0,9", 1);
    let schedule = decode(&assignment, &jobs).unwrap();
    assert_eq!(schedule.resolved().unwrap()["1"], vec![0, 2, 3]);
}

#[test]
fn duplicate_slot_last_seen_wins() {
    let jobs = single_job();
    let mut assignment = feasible_assignment();
    assignment.insert("1_2,4", 1);
    let schedule = decode(&assignment, &jobs).unwrap();
    assert_eq!(schedule.overwrites(), 1);
    assert_eq!(schedule.starts("1").unwrap()[2], Some(4));
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Makespan(5));
}

#[test]
fn duplicate_slot_rejected_when_strict() {
    let jobs = single_job();
    let mut assignment = feasible_assignment();
    assignment.insert("1_2,4", 1);
    let options = DecodeOptions {
        duplicate_policy: DuplicatePolicy::Reject,
    };
    let schedule = decode_with(&assignment, &jobs, &options).unwrap();
    assert_eq!(schedule.conflicts(), &[("1".to_string(), 2)]);
    assert!(!schedule.is_feasible());
    assert!(schedule.resolved().is_none());
    assert_eq!(classify(&schedule, &jobs), ResultCategory::Infeasible);
}

#[test]
fn unknown_job_is_a_decode_error() {
    let assignment: Assignment = [("7_0,0", 1u8)].into_iter().collect();
    let err = decode(&assignment, &single_job()).unwrap_err();
    assert_eq!(err.info().code, "unknown-job");
}

#[test]
fn task_index_past_the_job_is_a_decode_error() {
    let assignment: Assignment = [("1_3,0", 1u8)].into_iter().collect();
    let err = decode(&assignment, &single_job()).unwrap_err();
    assert_eq!(err.info().code, "task-out-of-range");
}

#[test]
fn malformed_labels_only_matter_when_selected() {
    let jobs = single_job();
    let mut assignment = feasible_assignment();
    assignment.insert("garbage", 0);
    assert!(decode(&assignment, &jobs).is_ok());
    assignment.insert("garbage", 1);
    assert_eq!(decode(&assignment, &jobs).unwrap_err().info().code, "label-parse");
}

#[test]
fn decoding_is_idempotent() {
    let jobs = single_job();
    let assignment = feasible_assignment();
    let first = decode(&assignment, &jobs).unwrap();
    let second = decode(&assignment, &jobs).unwrap();
    assert_eq!(first, second);
}
