//! Integration tests for artifact projections
//!
//! One recording is projected in every mode and read back.

use playback::{Artifact, Config, Frame, Recorder, SerializeMode, Session};

use super::common::{workloads, FIXTURE_ROOT};

fn recorded_session() -> Session {
    let mut recorder = Recorder::new(Config::new(FIXTURE_ROOT));
    recorder.record(|hook| {
        workloads::add_one(hook, 41);
        workloads::build_cycle(hook);
    });
    recorder.finish().expect("Fixture sources should be readable")
}

/// Test that every projection decodes back to the recorded frames
#[test]
fn test_all_modes_round_trip_through_disk() {
    let session = recorded_session();
    let dir = tempfile::tempdir().unwrap();

    for mode in [
        SerializeMode::Row,
        SerializeMode::Column,
        SerializeMode::Compact,
    ] {
        let path = dir.path().join(format!("{mode:?}.json"));
        session.save(mode, &path).unwrap();

        let loaded = Artifact::load(&path).unwrap();
        assert_eq!(&loaded.files, session.files());

        let frames: Vec<Frame> = loaded.frames.into_frames().unwrap();
        assert_eq!(frames.len(), session.frames().len(), "{mode:?}");
        for (decoded, recorded) in frames.iter().zip(session.frames()) {
            assert_eq!(decoded.frame_type, recorded.frame_type);
            assert_eq!(decoded.line_no, recorded.line_no);
            assert_eq!(decoded.file_name, recorded.file_name);
            assert_eq!(decoded.fn_name, recorded.fn_name);
            assert_eq!(decoded.locals, recorded.locals);
        }
    }
}

/// Test that the listing has one line per frame
#[test]
fn test_listing_matches_frames() {
    let session = recorded_session();
    let listing = session.listing();

    assert_eq!(listing.lines().count(), session.frames().len());
    assert!(listing.starts_with("| [CALL] @ "));
    assert!(listing.contains("(add_one) <-- {x: 41} (workloads.rs)"));
}
