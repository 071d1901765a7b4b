use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn jss_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jss-sim"))
}

#[test]
fn summarize_prints_trimmed_median() {
    let output = jss_sim()
        .args(["summarize", "5", "1", "9", "3", "7"])
        .output()
        .expect("run jss-sim summarize");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["median"], 5.0);
    assert_eq!(value["low_margin"], 2.0);
    assert_eq!(value["high_margin"], 2.0);
    assert_eq!(value["trimmed"], true);
}

#[test]
fn aggregate_weights_by_occurrence() {
    let dir = tempdir().unwrap();
    let jobs = dir.path().join("jobs.yaml");
    fs::write(&jobs, "\"1\": [[0, 2], [1, 1]]\n").unwrap();
    let sampleset = dir.path().join("sampleset.json");
    fs::write(
        &sampleset,
        r#"{"records": [
            {"assignment": {"1_0,0": 1, "1_1,2": 1, "aux0": 1}, "num_occurrences": 7},
            {"assignment": {"1_0,0": 1}, "num_occurrences": 3}
        ]}"#,
    )
    .unwrap();

    let output = jss_sim()
        .arg("aggregate")
        .arg("--jobs")
        .arg(&jobs)
        .arg("--sampleset")
        .arg(&sampleset)
        .output()
        .expect("run jss-sim aggregate");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["histogram"]["3"], 7);
    assert_eq!(value["histogram"]["error"], 3);
    assert_eq!(value["total"], 10);
    assert_eq!(value["best_makespan"], 3);
    assert_eq!(value["best"]["category"], 3);
    assert_eq!(value["best"]["schedule"]["starts"]["1"][1], 2);
}

#[test]
fn sweep_writes_report_and_dump() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.yaml");
    fs::write(
        &plan,
        "jobs: {\"1\": [[0, 1], [1, 1]], \"2\": [[1, 1]]}\n\
         parameter: {type: horizon, values: [2, 3]}\n\
         sampler: {num_reads: 8, anneal: {num_sweeps: 16}}\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    let output = jss_sim()
        .arg("sweep")
        .arg("--plan")
        .arg(&plan)
        .arg("--out")
        .arg(&out)
        .args(["--seed", "7", "--trials", "3"])
        .output()
        .expect("run jss-sim sweep");
    assert!(output.status.success());
    let dump = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2: ["));
    assert!(lines[1].starts_with("3: ["));

    let report: Value =
        serde_json::from_slice(&fs::read(out.join("sweep_report.json")).unwrap()).unwrap();
    assert_eq!(report["points"][0]["error_counts"].as_array().unwrap().len(), 3);
    assert!(out.join("summary.csv").exists());
}

#[test]
fn hardware_sweep_reports_empty_distributions() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.yaml");
    fs::write(
        &plan,
        "jobs: {\"1\": [[0, 1]]}\nparameter: {type: chain-strength, horizon: 2, values: [1.5]}\n",
    )
    .unwrap();
    let output = jss_sim()
        .arg("sweep")
        .arg("--plan")
        .arg(&plan)
        .arg("--out")
        .arg(dir.path().join("out"))
        .arg("--hardware")
        .output()
        .expect("run jss-sim sweep");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.5: []\n");
}
