use serde_json::json;

use crate::model::rating::{EvaluationRecord, Prediction, Rating, RatingRecord, ReviewerId};

use super::*;

fn eval_record(
    item: &str,
    reviewer: usize,
    category: Category,
    vote: i8,
    prediction: Prediction,
) -> EvaluationRecord {
    let label = match vote {
        1 => Some("positive".to_string()),
        0 => Some("negative".to_string()),
        _ => None,
    };
    EvaluationRecord {
        record: RatingRecord {
            item_id: ItemId::from(item),
            reviewer: ReviewerId(reviewer),
            category,
            rating: Rating::from_label(label.as_deref()),
            raw_label: label,
        },
        prediction,
    }
}

fn table(n_reviewers: usize, items: &[&str], records: Vec<EvaluationRecord>) -> EvaluationTable {
    EvaluationTable {
        reviewers: (1..=n_reviewers).map(ReviewerId).collect(),
        items: items.iter().map(|i| ItemId::from(*i)).collect(),
        records,
    }
}

#[test]
fn test_verdict_counts_and_accuracy() {
    let theme = Category::Theme;
    let t = table(
        3,
        &["a", "b", "c"],
        vec![
            eval_record("a", 1, theme, 1, Prediction::Available(json!("travel"))),
            eval_record("a", 2, theme, 1, Prediction::Available(json!("travel"))),
            eval_record("a", 3, theme, 0, Prediction::Available(json!("travel"))),
            eval_record("b", 1, theme, 0, Prediction::Unavailable),
            eval_record("b", 2, theme, 0, Prediction::Unavailable),
            eval_record("b", 3, theme, -1, Prediction::Unavailable),
            eval_record("c", 1, theme, -1, Prediction::Unavailable),
            eval_record("c", 2, theme, -1, Prediction::Unavailable),
            eval_record("c", 3, theme, -1, Prediction::Unavailable),
        ],
    );
    let evals = run_consensus(&t, &CategorySet::new(&[theme]).unwrap());
    let e = &evals[0];
    assert_eq!((e.correct, e.incorrect, e.uncertain, e.no_data), (1, 1, 0, 1));
    assert_eq!(e.total_items, 3);
    assert_eq!(e.total_evaluated(), 2);
    assert_eq!(e.accuracy, 0.5);
    assert_eq!(e.error_rate, 0.5);
    assert!(e.metrics_defined);

    let a = &e.details[0];
    assert_eq!(a.consensus.verdict, Verdict::Correct);
    assert!((a.consensus.confidence - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(a.prediction, Some(json!("travel")));
    assert_eq!(e.details[1].consensus.votes, vec![0, 0]);
    assert_eq!(e.details[1].prediction, None);
}

#[test]
fn test_ties_only_leave_metrics_undefined() {
    let cat = Category::Objects;
    let t = table(
        2,
        &["a"],
        vec![
            eval_record("a", 1, cat, 1, Prediction::Unavailable),
            eval_record("a", 2, cat, 0, Prediction::Unavailable),
        ],
    );
    let e = &run_consensus(&t, &CategorySet::new(&[cat]).unwrap())[0];
    assert_eq!(e.uncertain, 1);
    assert_eq!(e.details[0].consensus.confidence, 0.5);
    assert!(!e.metrics_defined);
    assert_eq!(e.accuracy, 0.0);
    assert_eq!(e.error_rate, 0.0);
}

#[test]
fn test_first_available_prediction_is_kept() {
    let cat = Category::Sentiment;
    let t = table(
        2,
        &["a"],
        vec![
            eval_record("a", 1, cat, 1, Prediction::Unavailable),
            eval_record("a", 2, cat, 1, Prediction::Available(json!("joy"))),
        ],
    );
    let e = &run_consensus(&t, &CategorySet::new(&[cat]).unwrap())[0];
    assert_eq!(e.details[0].prediction, Some(json!("joy")));
    assert_eq!(e.details.len(), 1);
    assert_eq!(e.details[0].consensus.verdict, Verdict::Correct);
}
