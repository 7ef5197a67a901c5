//! Integration tests for the record -> artifact flow
//!
//! Each test runs a workload from `common::workloads` through `run_traced`
//! and inspects the JSON written to disk.

use playback::{run_traced, run_traced_to, FrameType, PlaybackError, Recorder, SerializeMode};
use serde_json::Value as Json;

use super::common::{temp_config, workloads, FIXTURE_ROOT};

fn read_json(path: &std::path::Path) -> Json {
    let text = std::fs::read_to_string(path).expect("Artifact should exist");
    serde_json::from_str(&text).expect("Artifact should be valid JSON")
}

/// Test tracing `add_one(5)` with shallow snapshots and row output
#[test]
fn test_add_one_shallow_rows() {
    let (config, _dir, output) = temp_config(SerializeMode::Row, false);

    let result = run_traced(config, |hook| workloads::add_one(hook, 5)).unwrap();
    assert_eq!(result, 6);

    let json = read_json(&output);
    let frames = json["frames"].as_array().unwrap();

    let first = &frames[0];
    assert_eq!(first["frame_type"], "call");
    assert_eq!(first["fn_name"], "add_one");
    assert!(first["locals"].is_null());
    assert!(first["time_taken"].is_null());

    let line = frames
        .iter()
        .find(|f| f["frame_type"] == "line")
        .expect("Should record a line frame");
    assert_eq!(line["locals"], serde_json::json!({ "x": 5 }));
    assert!(line["time_taken"].as_f64().unwrap() >= 0.0);

    let last = frames.last().unwrap();
    assert_eq!(last["frame_type"], "return");
    assert_eq!(last["locals"]["return"], 6);
    assert!(last["time_taken"].is_null());
}

/// Test that the artifact carries the source of the traced file
#[test]
fn test_artifact_includes_project_sources() {
    let (config, _dir, output) = temp_config(SerializeMode::Row, true);
    run_traced(config, |hook| workloads::add_one(hook, 1)).unwrap();

    let json = read_json(&output);
    let files = json["files"].as_object().unwrap();
    assert_eq!(files.len(), 1);

    let (path, text) = files.iter().next().unwrap();
    assert!(path.starts_with(FIXTURE_ROOT));
    assert!(text.as_str().unwrap().contains("pub fn add_one"));
}

/// Test that library frames are reduced to the entry call
#[test]
fn test_library_code_is_suppressed() {
    let (config, _dir, output) = temp_config(SerializeMode::Row, true);
    run_traced(config, workloads::call_library).unwrap();

    let json = read_json(&output);
    let frames = json["frames"].as_array().unwrap();
    let summary: Vec<(&str, &str)> = frames
        .iter()
        .map(|f| {
            (
                f["frame_type"].as_str().unwrap(),
                f["fn_name"].as_str().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("call", "call_library"),
            ("line", "call_library"),
            ("call", "len"),
            ("line", "call_library"),
        ]
    );
    assert_eq!(frames[2]["locals"], serde_json::json!({ "s": "abc" }));
    assert_eq!(frames[3]["locals"], serde_json::json!({ "n": 3 }));

    // Library sources are never bundled.
    assert_eq!(json["files"].as_object().unwrap().len(), 1);
}

/// Test deep snapshots of a reference cycle in column form
#[test]
fn test_cycle_in_columns() {
    let (config, _dir, output) = temp_config(SerializeMode::Column, true);
    run_traced(config, workloads::build_cycle).unwrap();

    let json = read_json(&output);
    let columns = json["frames"].as_object().unwrap();
    let n = columns["frame_type"].as_array().unwrap().len();
    for column in columns.values() {
        assert_eq!(column.as_array().unwrap().len(), n);
    }

    let locals = columns["locals"].as_array().unwrap();
    let linked = &locals[2]["a"];
    assert_eq!(linked["name"], "A");
    assert_eq!(linked["fields"]["c"]["name"], "C");
    assert_eq!(linked["fields"]["c"]["fields"]["b"]["fields"]["a"], "<A>");

    let ret = &locals[3]["return"];
    assert_eq!(ret["fields"]["c"]["fields"]["b"]["name"], "B");
}

/// Test that an unencodable value fails the save, not the workload
#[test]
fn test_opaque_value_fails_encoding() {
    let (config, _dir, output) = temp_config(SerializeMode::Row, true);
    let err = run_traced(config, workloads::open_and_fail).unwrap_err();

    assert!(matches!(err, PlaybackError::Encode(_)));
    assert!(!output.exists());
}

/// Test that the listing is printed even when a source file is missing
#[test]
fn test_listing_printed_before_sources_are_read() {
    let (config, _dir, output) = temp_config(SerializeMode::Row, true);
    let mut listing = Vec::new();

    let err = run_traced_to(config, &mut listing, workloads::ghost_line).unwrap_err();

    assert!(matches!(err, PlaybackError::Io { ref path, .. } if path.ends_with("ghost.rs")));
    assert_eq!(
        String::from_utf8(listing).unwrap(),
        "| [LINE] @ 3 (ghost) <-- {} (ghost.rs)\n"
    );
    assert!(!output.exists());
}

/// Test that a workload error is returned untouched after recording
#[test]
fn test_workload_error_still_records() {
    let mut recorder = Recorder::new(playback::Config::new(FIXTURE_ROOT));
    let result = recorder.record(workloads::open_and_fail);
    assert_eq!(result, Err("disk on fire".to_string()));

    // The exception event itself leaves no frame.
    let kinds: Vec<FrameType> = recorder.frames().iter().map(|f| f.frame_type).collect();
    assert_eq!(kinds, vec![FrameType::Call, FrameType::Line]);
}

/// Test that the timing invariants hold across a mixed timeline
#[test]
fn test_timing_invariants() {
    let mut recorder = Recorder::new(playback::Config::new(FIXTURE_ROOT));
    recorder.record(|hook| {
        workloads::add_one(hook, 1);
        workloads::call_library(hook);
        workloads::add_one(hook, 2);
    });

    let frames = recorder.frames();
    assert_eq!(frames[0].frame_type, FrameType::Call);
    for frame in frames.iter() {
        match frame.frame_type {
            FrameType::Line => assert!(frame.time_taken.is_some_and(|t| t >= 0.0)),
            FrameType::Call | FrameType::Return => assert!(frame.time_taken.is_none()),
        }
    }
}
