use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::bands::{GuidanceTier, PerformanceTier};
use crate::model::category::Category;
use crate::model::flags::{Diagnostic, Diagnostics};
use crate::model::rating::ItemId;
use crate::model::scores::CategoryOutcome;
use crate::model::verdict::Verdict;
use crate::pipeline::stage3_agreement::{AgreementSummary, ConfusionMatrix, Disagreement};
use crate::pipeline::stage4_consensus::CategoryEvaluation;
use crate::pipeline::stage5_evaluate::{EvaluationSummary, OverallMetrics, ProblemItem};
use crate::report::{round_opt, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementSummaryExport {
    pub method: String,
    pub reviewer_count: usize,
    pub item_count: usize,
    pub categories: Vec<CategoryAgreementExport>,
    pub overall_score: Option<f64>,
    pub overall_raw_agreement: Option<f64>,
    pub interpretation: InterpretationExport,
    pub guidance: GuidanceTier,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Ok,
    NoData,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAgreementExport {
    pub category: Category,
    pub score: Option<f64>,
    pub status: ScoreStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub raw_agreement: Option<f64>,
    pub retained_rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<ConfusionMatrixExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrixExport {
    pub matrix: ConfusionCellsExport,
    pub total_items: usize,
    pub reviewer_1_positive_rate: f64,
    pub reviewer_2_positive_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionCellsExport {
    pub positive_positive: usize,
    pub positive_negative: usize,
    pub negative_positive: usize,
    pub negative_negative: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationExport {
    pub level: String,
    pub description: String,
    pub reliability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisagreementExport {
    pub item_id: ItemId,
    pub category: Category,
    pub labels: Vec<ReviewerLabelExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerLabelExport {
    pub reviewer: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummaryExport {
    pub reviewer_count: usize,
    pub item_count: usize,
    pub categories: Vec<CategoryEvaluationExport>,
    pub overall_metrics: OverallMetricsExport,
    pub problem_items: Vec<ProblemItemExport>,
    pub assessment: AssessmentExport,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEvaluationExport {
    pub category: Category,
    pub correct: usize,
    pub incorrect: usize,
    pub uncertain: usize,
    pub no_data: usize,
    pub total_items: usize,
    pub total_evaluated: usize,
    pub accuracy: f64,
    pub error_rate: f64,
    pub metrics_defined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMetricsExport {
    pub total_correct: usize,
    pub total_incorrect: usize,
    pub total_uncertain: usize,
    pub total_no_data: usize,
    pub total_evaluated: usize,
    pub overall_accuracy: f64,
    pub overall_error_rate: f64,
    pub metrics_defined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemItemExport {
    pub item_id: ItemId,
    pub errors: usize,
    pub total: usize,
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentExport {
    pub strongest: Option<CategoryAccuracyExport>,
    pub weakest: Option<CategoryAccuracyExport>,
    pub tier: Option<PerformanceTier>,
    pub small_sample: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAccuracyExport {
    pub category: Category,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDetailExport {
    pub category: Category,
    pub item_id: ItemId,
    pub consensus: Verdict,
    pub confidence: f64,
    pub n_votes: usize,
    pub votes: Vec<u8>,
    pub prediction: Option<Value>,
}

pub fn agreement_export(
    summary: &AgreementSummary,
    diagnostics: &Diagnostics,
    decimals: u32,
) -> AgreementSummaryExport {
    let categories = summary
        .categories
        .iter()
        .map(|c| {
            let status = match &c.outcome {
                CategoryOutcome::Score(_) => ScoreStatus::Ok,
                CategoryOutcome::NoData => ScoreStatus::NoData,
                CategoryOutcome::ComputeError(_) => ScoreStatus::Error,
            };
            CategoryAgreementExport {
                category: c.category,
                score: round_opt(c.outcome.score(), decimals),
                status,
                error: c.outcome.error().map(str::to_string),
                raw_agreement: round_opt(c.raw_agreement, decimals),
                retained_rows: c.retained_rows,
                confusion_matrix: c.confusion.as_ref().map(|m| confusion_export(m, decimals)),
            }
        })
        .collect();

    AgreementSummaryExport {
        method: summary.method.name().to_string(),
        reviewer_count: summary.reviewer_count,
        item_count: summary.item_count,
        categories,
        overall_score: round_opt(summary.overall_score, decimals),
        overall_raw_agreement: round_opt(summary.overall_raw_agreement, decimals),
        interpretation: InterpretationExport {
            level: summary.band.level().to_string(),
            description: summary.band.description().to_string(),
            reliability: summary.band.reliability().to_string(),
        },
        guidance: summary.guidance,
        diagnostics: diagnostics.sorted(),
    }
}

fn confusion_export(m: &ConfusionMatrix, decimals: u32) -> ConfusionMatrixExport {
    ConfusionMatrixExport {
        matrix: ConfusionCellsExport {
            positive_positive: m.both_positive,
            positive_negative: m.first_positive_second_negative,
            negative_positive: m.first_negative_second_positive,
            negative_negative: m.both_negative,
        },
        total_items: m.total_items,
        reviewer_1_positive_rate: round_to(m.reviewer1_positive_rate, decimals),
        reviewer_2_positive_rate: round_to(m.reviewer2_positive_rate, decimals),
    }
}

pub fn disagreements_export(disagreements: &[Disagreement]) -> Vec<DisagreementExport> {
    disagreements
        .iter()
        .map(|d| DisagreementExport {
            item_id: d.item_id.clone(),
            category: d.category,
            labels: d
                .labels
                .iter()
                .map(|(reviewer, label)| ReviewerLabelExport {
                    reviewer: reviewer.label(),
                    label: label.clone(),
                })
                .collect(),
        })
        .collect()
}

pub fn evaluation_export(
    summary: &EvaluationSummary,
    diagnostics: &Diagnostics,
    decimals: u32,
) -> EvaluationSummaryExport {
    EvaluationSummaryExport {
        reviewer_count: summary.reviewer_count,
        item_count: summary.item_count,
        categories: summary
            .categories
            .iter()
            .map(|c| category_evaluation_export(c, decimals))
            .collect(),
        overall_metrics: overall_export(&summary.overall, decimals),
        problem_items: summary
            .problem_items
            .iter()
            .map(|p| problem_item_export(p, decimals))
            .collect(),
        assessment: AssessmentExport {
            strongest: summary
                .assessment
                .strongest
                .map(|(category, acc)| CategoryAccuracyExport {
                    category,
                    accuracy: round_to(acc, decimals),
                }),
            weakest: summary
                .assessment
                .weakest
                .map(|(category, acc)| CategoryAccuracyExport {
                    category,
                    accuracy: round_to(acc, decimals),
                }),
            tier: summary.assessment.tier,
            small_sample: summary.assessment.small_sample,
        },
        diagnostics: diagnostics.sorted(),
    }
}

fn category_evaluation_export(c: &CategoryEvaluation, decimals: u32) -> CategoryEvaluationExport {
    CategoryEvaluationExport {
        category: c.category,
        correct: c.correct,
        incorrect: c.incorrect,
        uncertain: c.uncertain,
        no_data: c.no_data,
        total_items: c.total_items,
        total_evaluated: c.total_evaluated(),
        accuracy: round_to(c.accuracy, decimals),
        error_rate: round_to(c.error_rate, decimals),
        metrics_defined: c.metrics_defined,
    }
}

fn overall_export(o: &OverallMetrics, decimals: u32) -> OverallMetricsExport {
    OverallMetricsExport {
        total_correct: o.total_correct,
        total_incorrect: o.total_incorrect,
        total_uncertain: o.total_uncertain,
        total_no_data: o.total_no_data,
        total_evaluated: o.total_evaluated,
        overall_accuracy: round_to(o.accuracy, decimals),
        overall_error_rate: round_to(o.error_rate, decimals),
        metrics_defined: o.metrics_defined,
    }
}

fn problem_item_export(p: &ProblemItem, decimals: u32) -> ProblemItemExport {
    ProblemItemExport {
        item_id: p.item_id.clone(),
        errors: p.errors,
        total: p.total,
        error_rate: round_to(p.error_rate, decimals),
    }
}

pub fn evaluation_details_export(
    summary: &EvaluationSummary,
    decimals: u32,
) -> Vec<EvaluationDetailExport> {
    let mut out = Vec::new();
    for eval in &summary.categories {
        for detail in &eval.details {
            out.push(EvaluationDetailExport {
                category: eval.category,
                item_id: detail.item_id.clone(),
                consensus: detail.consensus.verdict,
                confidence: round_to(detail.consensus.confidence, decimals),
                n_votes: detail.consensus.votes.len(),
                votes: detail.consensus.votes.clone(),
                prediction: detail.prediction.clone(),
            });
        }
    }
    out
}

pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
