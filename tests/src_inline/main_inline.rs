use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::pipeline::stage6_report::{AGREEMENT_SUMMARY_FILE, EVALUATION_SUMMARY_FILE};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_agreementqc_main_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const REVIEWER_A: &str = r#"{"posts": [
  {"postId": "p1", "feedback": {"theme": "positive", "overall": "positive"}, "llm": {"llmTheme": "travel"}},
  {"postId": "p2", "feedback": {"theme": "negative", "overall": "negative"}, "llm": {"llmTheme": "food"}}
]}"#;

const REVIEWER_B: &str = r#"{"posts": [
  {"postId": "p1", "feedback": {"theme": "positive", "overall": "positive"}, "llm": {"llmTheme": "travel"}},
  {"postId": "p2", "feedback": {"theme": "negative", "overall": "positive"}, "llm": {"llmTheme": "food"}}
]}"#;

fn fixture() -> (PathBuf, Vec<String>) {
    let dir = make_temp_dir();
    fs::write(dir.join("a.json"), REVIEWER_A).unwrap();
    fs::write(dir.join("b.json"), REVIEWER_B).unwrap();
    let inputs = vec![
        dir.join("a.json").display().to_string(),
        dir.join("b.json").display().to_string(),
    ];
    (dir, inputs)
}

fn parse(command: &str, inputs: &[String], out: &PathBuf, extra: &[&str]) -> Cli {
    let mut argv = vec!["kira-agreementqc".to_string(), command.to_string()];
    for input in inputs {
        argv.push("--input".to_string());
        argv.push(input.clone());
    }
    argv.push("--out".to_string());
    argv.push(out.display().to_string());
    argv.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_agreement_command_writes_reports() {
    let (dir, inputs) = fixture();
    let out = dir.join("agreement");
    run(parse("agreement", &inputs, &out, &[])).unwrap();
    let text = fs::read_to_string(out.join(AGREEMENT_SUMMARY_FILE)).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(summary["categories"].as_array().unwrap().len(), 6);
    assert_eq!(summary["reviewer_count"], 2);
}

#[test]
fn test_evaluate_command_writes_reports() {
    let (dir, inputs) = fixture();
    let out = dir.join("evaluation");
    run(parse("evaluate", &inputs, &out, &["--category", "theme"])).unwrap();
    let text = fs::read_to_string(out.join(EVALUATION_SUMMARY_FILE)).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(summary["overall_metrics"]["total_correct"], 1);
    assert_eq!(summary["overall_metrics"]["total_incorrect"], 1);
}

#[test]
fn test_evaluate_rejects_overall_category() {
    let (dir, inputs) = fixture();
    let cli = parse("evaluate", &inputs, &dir.join("x"), &["--category", "overall"]);
    let err = run(cli).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidCategorySet(_)));
}

#[test]
fn test_single_input_fails() {
    let (dir, inputs) = fixture();
    let err = run(parse("agreement", &inputs[..1], &dir.join("x"), &[])).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientReviewers { .. }));
}
