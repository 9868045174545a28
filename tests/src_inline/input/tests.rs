use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::reader::read_feedback_export;
use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_agreementqc_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const EXPORT: &str = r#"{
  "posts": [
    {"postId": "p1", "feedback": {"sentiment": "positive"}, "llm": {"llmSentiment": ["happy"]}},
    {"postId": 42, "feedback": {"theme": "negative"}},
    {"postId": "p3"}
  ]
}"#;

#[test]
fn test_reads_plain_and_gz_exports() {
    let dir = make_temp_dir();
    let plain = dir.join("reviewer1.json");
    let gz = dir.join("reviewer2.json.gz");
    fs::write(&plain, EXPORT).unwrap();
    write_gz(&gz, EXPORT);

    for path in [&plain, &gz] {
        let export = read_feedback_export(path).unwrap();
        assert_eq!(export.posts.len(), 3);
        assert_eq!(export.posts[0].item_id().0, "p1");
        assert_eq!(export.posts[1].item_id().0, "42");
        assert_eq!(
            export.posts[0].feedback_value("sentiment"),
            Some(&serde_json::json!("positive"))
        );
        assert!(export.posts[2].feedback_value("sentiment").is_none());
        assert!(export.posts[1].prediction_value("llmTheme").is_none());
    }
}

#[test]
fn test_reviewer_identity_follows_input_order() {
    let dir = make_temp_dir();
    let a = dir.join("b_second_alphabetically.json");
    let b = dir.join("a_first_alphabetically.json");
    fs::write(&a, EXPORT).unwrap();
    fs::write(&b, r#"{"posts": []}"#).unwrap();

    let sources = load_reviewer_sources(&[&a, &b]).unwrap();
    assert_eq!(sources[0].reviewer, ReviewerId(1));
    assert_eq!(sources[0].path, a);
    assert_eq!(sources[1].reviewer, ReviewerId(2));
    assert!(sources[1].export.posts.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_reviewer_sources(&[dir.join("nope.json")]).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}

#[test]
fn test_malformed_json_is_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("broken.json");
    fs::write(&path, "{\"posts\": [").unwrap();
    match read_feedback_export(&path).unwrap_err() {
        InputError::Malformed { reason, .. } => assert!(reason.contains("not well-formed")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_posts_container_is_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("no_posts.json");
    fs::write(&path, r#"{"items": []}"#).unwrap();
    match read_feedback_export(&path).unwrap_err() {
        InputError::Malformed { reason, path: p } => {
            assert!(reason.contains("posts"));
            assert_eq!(p, path);
        }
        other => panic!("unexpected error: {other}"),
    }
}
