//! Batch lifecycle integration tests.
//!
//! These tests drive the batch runner with the mock remuxer and temporary
//! directories:
//! - classification (non-video files and directories are never touched)
//! - success path (output written, original deleted or kept)
//! - failure paths (source preserved, batch continues)
//! - output directory creation and overwrite-on-rerun

use std::path::PathBuf;

use tempfile::TempDir;

use ffix_core::{
    testing::MockRemuxer, BatchOptions, BatchRunner, FileOutcome, RemuxError,
};

/// Test fixture: a source dir, an output dir path, and a shared mock.
struct TestHarness {
    source_dir: TempDir,
    output_root: TempDir,
    remuxer: MockRemuxer,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            source_dir: TempDir::new().expect("Failed to create source dir"),
            output_root: TempDir::new().expect("Failed to create output root"),
            remuxer: MockRemuxer::new(),
        }
    }

    fn source_file(&self, name: &str) -> PathBuf {
        let path = self.source_dir.path().join(name);
        std::fs::write(&path, b"test content").expect("Failed to create source file");
        path
    }

    fn output_path(&self) -> PathBuf {
        self.output_root.path().join("out")
    }

    fn options(&self) -> BatchOptions {
        BatchOptions::new(self.output_path()).with_source_path(self.source_dir.path())
    }

    fn runner(&self, options: BatchOptions) -> BatchRunner<MockRemuxer> {
        BatchRunner::new(options, self.remuxer.clone())
    }
}

#[tokio::test]
async fn test_non_video_files_are_never_touched() {
    let harness = TestHarness::new();
    let movie = harness.source_file("movie.mp4");
    let notes = harness.source_file("notes.txt");
    let cover = harness.source_file("cover.jpg");

    let report = harness.runner(harness.options()).run().await.unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(report.outcome_for(&movie).unwrap().converted());

    // The mock only ever saw the video file.
    let jobs = harness.remuxer.recorded_jobs().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job.input_path, movie);

    // Non-video files survive even though originals are deleted on success.
    assert!(notes.exists());
    assert!(cover.exists());
}

#[tokio::test]
async fn test_directories_are_skipped_regardless_of_name() {
    let harness = TestHarness::new();
    let sub = harness.source_dir.path().join("clips.mp4");
    std::fs::create_dir(&sub).unwrap();

    let report = harness.runner(harness.options()).run().await.unwrap();

    assert!(report.outcomes.is_empty());
    assert_eq!(harness.remuxer.job_count().await, 0);
    assert!(sub.exists());
}

#[tokio::test]
async fn test_success_deletes_original_by_default() {
    let harness = TestHarness::new();
    let movie = harness.source_file("movie.mp4");

    let report = harness.runner(harness.options()).run().await.unwrap();

    let expected_output = harness.output_path().join("movie.mp4");
    assert!(expected_output.exists());
    assert!(!movie.exists());

    match report.outcome_for(&movie).unwrap() {
        FileOutcome::Converted {
            output_path,
            removed_original,
        } => {
            assert_eq!(output_path, &expected_output);
            assert!(removed_original);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_keep_originals_preserves_source() {
    let harness = TestHarness::new();
    let movie = harness.source_file("movie.mp4");

    let options = harness.options().with_keep_originals(true);
    let report = harness.runner(options).run().await.unwrap();

    assert!(harness.output_path().join("movie.mp4").exists());
    assert!(movie.exists());

    match report.outcome_for(&movie).unwrap() {
        FileOutcome::Converted {
            removed_original, ..
        } => assert!(!removed_original),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_transcoder_failure_preserves_source_and_continues() {
    let harness = TestHarness::new();
    let bad = harness.source_file("bad.mkv");
    let good = harness.source_file("good.mp4");
    harness
        .remuxer
        .fail_input_with(&bad, 1, "Invalid data found when processing input")
        .await;

    let report = harness.runner(harness.options()).run().await.unwrap();

    // The failing file is untouched and reported with its exit code.
    assert!(bad.exists());
    match report.outcome_for(&bad).unwrap() {
        FileOutcome::Failed(RemuxError::ExitedNonZero { code, stderr }) => {
            assert_eq!(*code, Some(1));
            assert!(stderr.contains("Invalid data"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    // The other file still converted.
    assert!(report.outcome_for(&good).unwrap().converted());
    assert!(!good.exists());
    assert!(harness.output_path().join("good.mp4").exists());
}

#[tokio::test]
async fn test_launch_failure_is_distinct_and_continues() {
    let harness = TestHarness::new();
    harness.source_file("a.mp4");
    harness.source_file("b.mp4");
    harness
        .remuxer
        .set_next_error(RemuxError::LaunchFailed {
            program: PathBuf::from("ffmpeg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        })
        .await;

    let report = harness.runner(harness.options()).run().await.unwrap();

    // Enumeration order is unspecified: one of the two fails to launch, the
    // other converts.
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.converted_count(), 1);

    let (failed_path, outcome) = report
        .outcomes
        .iter()
        .find(|(_, o)| matches!(o, FileOutcome::Failed(_)))
        .unwrap();
    assert!(matches!(
        outcome,
        FileOutcome::Failed(RemuxError::LaunchFailed { .. })
    ));
    // The file whose transcoder never started is preserved.
    assert!(failed_path.exists());
}

#[tokio::test]
async fn test_output_dir_creation_failure_is_per_file_and_nonfatal() {
    let harness = TestHarness::new();
    let movie = harness.source_file("movie.mp4");

    // A regular file occupying the output path makes create_dir_all fail.
    std::fs::write(harness.output_path(), b"in the way").unwrap();

    let report = harness.runner(harness.options()).run().await.unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(matches!(
        report.outcome_for(&movie).unwrap(),
        FileOutcome::Failed(RemuxError::Filesystem { .. })
    ));
    // The source is preserved and the transcoder was never invoked.
    assert!(movie.exists());
    assert_eq!(harness.remuxer.job_count().await, 0);
}

#[tokio::test]
async fn test_empty_source_dir_completes_without_errors() {
    let harness = TestHarness::new();

    let report = harness.runner(harness.options()).run().await.unwrap();

    assert!(report.outcomes.is_empty());
    assert_eq!(harness.remuxer.job_count().await, 0);
}

#[tokio::test]
async fn test_output_directory_is_created_on_demand() {
    let harness = TestHarness::new();
    harness.source_file("movie.mp4");

    let nested = harness.output_root.path().join("deeply/nested/out");
    let options = BatchOptions::new(&nested).with_source_path(harness.source_dir.path());
    harness.runner(options).run().await.unwrap();

    assert!(nested.is_dir());
    assert!(nested.join("movie.mp4").exists());
}

#[tokio::test]
async fn test_rerun_with_keep_overwrites_without_duplicating() {
    let harness = TestHarness::new();
    harness.source_file("movie.mp4");
    let options = harness.options().with_keep_originals(true);

    let first = harness.runner(options.clone()).run().await.unwrap();
    let second = harness.runner(options).run().await.unwrap();

    assert_eq!(first.converted_count(), 1);
    assert_eq!(second.converted_count(), 1);

    // Same single destination file both times, no collision renaming.
    let entries: Vec<_> = std::fs::read_dir(harness.output_path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("movie.mp4")]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_remove_failure_is_nonfatal_and_keeps_both_files() {
    use std::os::unix::fs::PermissionsExt;

    // Deleting from a read-only directory fails, unless the process runs
    // with privileges that bypass directory permissions (e.g. root in CI).
    // Probe first and skip if that is the case.
    let probe = TempDir::new().unwrap();
    let probe_file = probe.path().join("probe");
    std::fs::write(&probe_file, b"x").unwrap();
    std::fs::set_permissions(probe.path(), std::fs::Permissions::from_mode(0o555)).unwrap();
    let bypasses_permissions = std::fs::remove_file(&probe_file).is_ok();
    std::fs::set_permissions(probe.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
    if bypasses_permissions {
        return;
    }

    let harness = TestHarness::new();
    let movie = harness.source_file("movie.mp4");
    let other = harness.source_file("other.mp4");

    // A read-only source directory makes the post-success unlink fail.
    let readonly = std::fs::Permissions::from_mode(0o555);
    std::fs::set_permissions(harness.source_dir.path(), readonly).unwrap();

    let report = harness.runner(harness.options()).run().await.unwrap();

    // Restore so TempDir cleanup can delete the directory.
    std::fs::set_permissions(
        harness.source_dir.path(),
        std::fs::Permissions::from_mode(0o755),
    )
    .unwrap();

    // Both entries converted; deletion failed for both, sources remain.
    assert_eq!(report.outcomes.len(), 2);
    for path in [&movie, &other] {
        assert!(path.exists());
        assert!(matches!(
            report.outcome_for(path).unwrap(),
            FileOutcome::RemoveFailed { .. }
        ));
    }
    assert!(harness.output_path().join("movie.mp4").exists());
    assert!(harness.output_path().join("other.mp4").exists());
}
