use std::io::Write;
use std::sync::Mutex;

use app_identity::registry;
use app_identity_suite::{generate_suite, load_suites, run, RunnerOptions};

static LOCK: Mutex<()> = Mutex::new(());

#[test]
fn generated_suite_written_to_disk_loads_and_passes() {
    let _guard = LOCK.lock().unwrap();
    registry::reset();

    let suite = generate_suite().unwrap();
    let json = suite.to_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(json.as_bytes())
        .unwrap();

    let options = RunnerOptions::default();
    let loaded = load_suites(&[path], &options).unwrap();
    assert_eq!(loaded.len(), 1);

    let (output, success) = run(&loaded, &options);
    assert!(success, "expected success:\n{output}");
    assert!(!output.contains("not ok"));
    assert!(output.starts_with("TAP Version 14"));
}

#[test]
fn directory_of_suites_is_globbed_for_json_files() {
    let _guard = LOCK.lock().unwrap();
    registry::reset();

    let suite = generate_suite().unwrap();
    let json = suite.to_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::File::create(dir.path().join("a.json"))
        .unwrap()
        .write_all(json.as_bytes())
        .unwrap();
    std::fs::File::create(dir.path().join("ignore.txt"))
        .unwrap()
        .write_all(b"not a suite")
        .unwrap();

    let options = RunnerOptions::default();
    let loaded = load_suites(&[dir.path().to_path_buf()], &options).unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn no_paths_and_no_stdin_is_an_error() {
    let options = RunnerOptions::default();
    assert!(load_suites(&[], &options).is_err());
}
