use crate::model::bands::AgreementBand;
use crate::model::flags::Flag;
use crate::model::rating::ReviewerId;
use crate::model::verdict::build_consensus;
use crate::pipeline::stage3_agreement::{AgreementMethod, CategoryAgreementResult};
use crate::pipeline::stage4_consensus::ItemConsensus;
use crate::pipeline::stage5_evaluate::Assessment;

use super::*;

fn agreement_summary() -> AgreementSummary {
    AgreementSummary {
        method: AgreementMethod::CohenKappa,
        reviewer_count: 2,
        item_count: 6,
        categories: vec![
            CategoryAgreementResult {
                category: Category::Theme,
                outcome: CategoryOutcome::Score(0.123456789),
                raw_agreement: Some(2.0 / 3.0),
                retained_rows: 6,
                confusion: Some(ConfusionMatrix {
                    both_positive: 3,
                    first_positive_second_negative: 1,
                    first_negative_second_positive: 1,
                    both_negative: 1,
                    total_items: 6,
                    reviewer1_positive_rate: 4.0 / 6.0,
                    reviewer2_positive_rate: 4.0 / 6.0,
                }),
            },
            CategoryAgreementResult {
                category: Category::Objects,
                outcome: CategoryOutcome::NoData,
                raw_agreement: None,
                retained_rows: 0,
                confusion: None,
            },
            CategoryAgreementResult {
                category: Category::Sentiment,
                outcome: CategoryOutcome::ComputeError("degenerate".to_string()),
                raw_agreement: Some(1.0),
                retained_rows: 2,
                confusion: None,
            },
        ],
        overall_score: Some(0.123456789),
        overall_raw_agreement: Some(5.0 / 6.0),
        band: AgreementBand::Slight,
        guidance: GuidanceTier::Low,
    }
}

#[test]
fn test_agreement_export_rounds_and_reparses() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Flag::ReviewerOrderSensitive, "order");
    diagnostics.push(Flag::DuplicateRecord, "dup");

    let export = agreement_export(&agreement_summary(), &diagnostics, 4);
    let text = render_json(&export).unwrap();
    assert!(text.ends_with('\n'));
    let parsed: AgreementSummaryExport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, export);

    assert_eq!(parsed.method, "Cohen's Kappa");
    assert_eq!(parsed.overall_score, Some(0.1235));
    assert_eq!(parsed.overall_raw_agreement, Some(0.8333));
    assert_eq!(parsed.interpretation.level, "Slight");

    let theme = &parsed.categories[0];
    assert_eq!(theme.status, ScoreStatus::Ok);
    assert_eq!(theme.score, Some(0.1235));
    let m = theme.confusion_matrix.as_ref().unwrap();
    assert_eq!(m.matrix.positive_positive, 3);
    assert_eq!(m.reviewer_1_positive_rate, 0.6667);

    assert_eq!(parsed.categories[1].status, ScoreStatus::NoData);
    assert_eq!(parsed.categories[1].score, None);
    assert_eq!(parsed.categories[2].status, ScoreStatus::Error);
    assert_eq!(parsed.categories[2].error.as_deref(), Some("degenerate"));

    // grouped by flag order
    assert_eq!(parsed.diagnostics[0].flag, Flag::DuplicateRecord);
    assert_eq!(parsed.diagnostics[1].flag, Flag::ReviewerOrderSensitive);
}

#[test]
fn test_null_scores_serialize_as_null() {
    let export = agreement_export(&agreement_summary(), &Diagnostics::new(), 4);
    let value = serde_json::to_value(&export).unwrap();
    assert!(value["categories"][1]["score"].is_null());
    assert!(value["categories"][1].get("confusion_matrix").is_none());
    assert_eq!(value["categories"][2]["status"], "error");
}

#[test]
fn test_disagreements_use_reviewer_labels() {
    let d = Disagreement {
        item_id: ItemId::from("p9"),
        category: Category::Theme,
        labels: vec![
            (ReviewerId(1), Some("positive".to_string())),
            (ReviewerId(2), None),
        ],
    };
    let export = disagreements_export(&[d]);
    assert_eq!(export[0].labels[0].reviewer, "Reviewer_1");
    assert_eq!(export[0].labels[1].label, None);
}

fn evaluation_summary() -> EvaluationSummary {
    let consensus = build_consensus(vec![1, 1, 0]);
    EvaluationSummary {
        reviewer_count: 3,
        item_count: 1,
        categories: vec![CategoryEvaluation {
            category: Category::Theme,
            correct: 2,
            incorrect: 1,
            uncertain: 0,
            no_data: 0,
            total_items: 3,
            accuracy: 2.0 / 3.0,
            error_rate: 1.0 / 3.0,
            metrics_defined: true,
            details: vec![ItemConsensus {
                item_id: ItemId::from("p1"),
                consensus,
                prediction: Some(serde_json::json!("beach")),
            }],
        }],
        overall: OverallMetrics {
            total_correct: 2,
            total_incorrect: 1,
            total_uncertain: 0,
            total_no_data: 0,
            total_evaluated: 3,
            accuracy: 2.0 / 3.0,
            error_rate: 1.0 / 3.0,
            metrics_defined: true,
        },
        problem_items: vec![ProblemItem {
            item_id: ItemId::from("p1"),
            errors: 2,
            total: 3,
            error_rate: 2.0 / 3.0,
        }],
        assessment: Assessment {
            strongest: Some((Category::Theme, 2.0 / 3.0)),
            weakest: Some((Category::Theme, 2.0 / 3.0)),
            tier: Some(PerformanceTier::Poor),
            small_sample: true,
        },
    }
}

#[test]
fn test_evaluation_export_rounds_and_reparses() {
    let export = evaluation_export(&evaluation_summary(), &Diagnostics::new(), 4);
    let parsed: EvaluationSummaryExport =
        serde_json::from_str(&render_json(&export).unwrap()).unwrap();
    assert_eq!(parsed, export);
    assert_eq!(parsed.categories[0].accuracy, 0.6667);
    assert_eq!(parsed.categories[0].total_evaluated, 3);
    assert_eq!(parsed.overall_metrics.overall_error_rate, 0.3333);
    assert_eq!(parsed.problem_items[0].error_rate, 0.6667);
    assert_eq!(parsed.assessment.tier, Some(PerformanceTier::Poor));
}

#[test]
fn test_evaluation_details_flatten_per_item() {
    let details = evaluation_details_export(&evaluation_summary(), 4);
    assert_eq!(details.len(), 1);
    let d = &details[0];
    assert_eq!(d.consensus, Verdict::Correct);
    assert_eq!(d.confidence, 0.6667);
    assert_eq!(d.votes, vec![1, 1, 0]);
    assert_eq!(d.n_votes, 3);
    assert_eq!(d.prediction, Some(serde_json::json!("beach")));
}
