use std::collections::HashMap;

use crate::model::bands::PerformanceTier;
use crate::model::category::{Category, CategorySet};
use crate::model::flags::{Diagnostics, Flag};
use crate::model::rating::ItemId;
use crate::model::scores::ratio;
use crate::model::thresholds::AnalysisProfile;
use crate::model::verdict::Verdict;
use crate::pipeline::stage1_extract::EvaluationTable;
use crate::pipeline::stage4_consensus::{CategoryEvaluation, run_consensus};
use crate::pipeline::{AnalysisError, require_reviewers};

#[derive(Debug, Clone, PartialEq)]
pub struct OverallMetrics {
    pub total_correct: usize,
    pub total_incorrect: usize,
    pub total_uncertain: usize,
    pub total_no_data: usize,
    pub total_evaluated: usize,
    pub accuracy: f64,
    pub error_rate: f64,
    pub metrics_defined: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemItem {
    pub item_id: ItemId,
    pub errors: usize,
    pub total: usize,
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub strongest: Option<(Category, f64)>,
    pub weakest: Option<(Category, f64)>,
    pub tier: Option<PerformanceTier>,
    pub small_sample: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    pub reviewer_count: usize,
    pub item_count: usize,
    pub categories: Vec<CategoryEvaluation>,
    pub overall: OverallMetrics,
    pub problem_items: Vec<ProblemItem>,
    pub assessment: Assessment,
}

pub fn run_evaluation(
    table: &EvaluationTable,
    categories: &CategorySet,
    profile: &AnalysisProfile,
    diagnostics: &mut Diagnostics,
) -> Result<EvaluationSummary, AnalysisError> {
    let n_reviewers = table.reviewer_count();
    require_reviewers(n_reviewers, profile.min_reviewers.max(2))?;

    tracing::info!(
        reviewers = n_reviewers,
        items = table.item_count(),
        categories = ?categories.names(),
        "evaluating model correctness"
    );

    let evaluations = run_consensus(table, categories);
    for eval in &evaluations {
        if !eval.metrics_defined {
            diagnostics.push(
                Flag::UndefinedAccuracy,
                format!(
                    "no decisive verdicts for {}; accuracy and error rate reported as 0",
                    eval.category
                ),
            );
        }
    }

    let overall = overall_metrics(&evaluations);
    let problem_items = problem_items(&table.items, &evaluations, profile.problem_item_ratio);
    let assessment = assess(&evaluations, &overall, table.item_count(), profile);

    tracing::info!(
        accuracy = overall.accuracy,
        error_rate = overall.error_rate,
        problem_items = problem_items.len(),
        "evaluation complete"
    );

    Ok(EvaluationSummary {
        reviewer_count: n_reviewers,
        item_count: table.item_count(),
        categories: evaluations,
        overall,
        problem_items,
        assessment,
    })
}

/// Counts are summed across categories before dividing, so categories with more
/// decisive verdicts weigh more.
pub fn overall_metrics(evaluations: &[CategoryEvaluation]) -> OverallMetrics {
    let total_correct: usize = evaluations.iter().map(|e| e.correct).sum();
    let total_incorrect: usize = evaluations.iter().map(|e| e.incorrect).sum();
    let total_uncertain: usize = evaluations.iter().map(|e| e.uncertain).sum();
    let total_no_data: usize = evaluations.iter().map(|e| e.no_data).sum();
    let total_evaluated = total_correct + total_incorrect;

    let accuracy = ratio(total_correct, total_evaluated);
    let error_rate = ratio(total_incorrect, total_evaluated);

    OverallMetrics {
        total_correct,
        total_incorrect,
        total_uncertain,
        total_no_data,
        total_evaluated,
        accuracy: accuracy.unwrap_or(0.0),
        error_rate: error_rate.unwrap_or(0.0),
        metrics_defined: accuracy.is_some(),
    }
}

/// Items whose share of incorrect verdicts among decisive ones exceeds `threshold`,
/// sorted by that share descending. Equal shares keep item order.
pub fn problem_items(
    items: &[ItemId],
    evaluations: &[CategoryEvaluation],
    threshold: f64,
) -> Vec<ProblemItem> {
    let verdicts: Vec<HashMap<&ItemId, Verdict>> = evaluations
        .iter()
        .map(|eval| {
            eval.details
                .iter()
                .filter(|d| d.consensus.verdict.is_decisive())
                .map(|d| (&d.item_id, d.consensus.verdict))
                .collect()
        })
        .collect();

    let mut out = Vec::new();
    for item_id in items {
        let mut errors = 0usize;
        let mut decisive = 0usize;
        for by_item in &verdicts {
            let Some(&verdict) = by_item.get(item_id) else {
                continue;
            };
            decisive += 1;
            if verdict == Verdict::Incorrect {
                errors += 1;
            }
        }
        let Some(error_rate) = ratio(errors, decisive) else {
            continue;
        };
        if error_rate > threshold {
            out.push(ProblemItem {
                item_id: item_id.clone(),
                errors,
                total: decisive,
                error_rate,
            });
        }
    }
    out.sort_by(|a, b| b.error_rate.total_cmp(&a.error_rate));
    out
}

fn assess(
    evaluations: &[CategoryEvaluation],
    overall: &OverallMetrics,
    item_count: usize,
    profile: &AnalysisProfile,
) -> Assessment {
    let mut strongest: Option<(Category, f64)> = None;
    let mut weakest: Option<(Category, f64)> = None;
    for eval in evaluations.iter().filter(|e| e.metrics_defined) {
        if strongest.is_none_or(|(_, best)| eval.accuracy > best) {
            strongest = Some((eval.category, eval.accuracy));
        }
        if weakest.is_none_or(|(_, worst)| eval.accuracy < worst) {
            weakest = Some((eval.category, eval.accuracy));
        }
    }

    let tier = if overall.metrics_defined {
        Some(PerformanceTier::from_accuracy(overall.accuracy, profile))
    } else {
        None
    };

    Assessment {
        strongest,
        weakest,
        tier,
        small_sample: item_count < profile.small_sample_items,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_evaluate.rs"]
mod tests;
