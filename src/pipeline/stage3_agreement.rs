use crate::model::bands::{AgreementBand, GuidanceTier};
use crate::model::category::{Category, CategorySet};
use crate::model::flags::{Diagnostics, Flag};
use crate::model::kappa::{cohen_kappa, count_matrix, fleiss_kappa, raw_agreement};
use crate::model::rating::{ItemId, ReviewerId};
use crate::model::scores::{CategoryOutcome, mean_present};
use crate::model::thresholds::AnalysisProfile;
use crate::pipeline::stage1_extract::RatingTable;
use crate::pipeline::stage2_matrix::{RatingMatrix, build_rating_matrix};
use crate::pipeline::{AnalysisError, require_reviewers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementMethod {
    CohenKappa,
    FleissKappa,
}

impl AgreementMethod {
    pub fn for_reviewers(n_reviewers: usize) -> Self {
        if n_reviewers == 2 {
            AgreementMethod::CohenKappa
        } else {
            AgreementMethod::FleissKappa
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgreementMethod::CohenKappa => "Cohen's Kappa",
            AgreementMethod::FleissKappa => "Fleiss' Kappa",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    pub both_positive: usize,
    pub first_positive_second_negative: usize,
    pub first_negative_second_positive: usize,
    pub both_negative: usize,
    pub total_items: usize,
    pub reviewer1_positive_rate: f64,
    pub reviewer2_positive_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAgreementResult {
    pub category: Category,
    pub outcome: CategoryOutcome,
    pub raw_agreement: Option<f64>,
    pub retained_rows: usize,
    pub confusion: Option<ConfusionMatrix>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgreementSummary {
    pub method: AgreementMethod,
    pub reviewer_count: usize,
    pub item_count: usize,
    pub categories: Vec<CategoryAgreementResult>,
    pub overall_score: Option<f64>,
    pub overall_raw_agreement: Option<f64>,
    pub band: AgreementBand,
    pub guidance: GuidanceTier,
}

/// An item where reviewers gave at least two distinct non-null labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Disagreement {
    pub item_id: ItemId,
    pub category: Category,
    pub labels: Vec<(ReviewerId, Option<String>)>,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub summary: AgreementSummary,
    pub disagreements: Vec<Disagreement>,
}

pub fn run_agreement(
    table: &RatingTable,
    categories: &CategorySet,
    profile: &AnalysisProfile,
    diagnostics: &mut Diagnostics,
) -> Result<Stage3Output, AnalysisError> {
    let n_reviewers = table.reviewer_count();
    require_reviewers(n_reviewers, profile.min_reviewers.max(2))?;

    let method = AgreementMethod::for_reviewers(n_reviewers);
    tracing::info!(
        method = method.name(),
        reviewers = n_reviewers,
        items = table.item_count(),
        "computing inter-reviewer agreement"
    );
    if n_reviewers == 2 {
        diagnostics.push(
            Flag::ReviewerOrderSensitive,
            "confusion matrices are oriented by input order; reordering the inputs swaps reviewer 1 and reviewer 2",
        );
    }

    let mut results = Vec::with_capacity(categories.len());
    let mut disagreements = Vec::new();
    for category in categories.iter() {
        let result = match build_rating_matrix(table, category) {
            Ok(matrix) => {
                disagreements.extend(find_disagreements(&matrix, &table.reviewers));
                agreement_for_matrix(&matrix, method)
            }
            Err(e) => CategoryAgreementResult {
                category,
                outcome: CategoryOutcome::ComputeError(e.to_string()),
                raw_agreement: None,
                retained_rows: 0,
                confusion: None,
            },
        };
        if let Some(reason) = result.outcome.error() {
            diagnostics.push(
                Flag::CategoryComputeFailure,
                format!("{} for {category} failed: {reason}", method.name()),
            );
        }
        results.push(result);
    }

    let overall_score = mean_present(results.iter().map(|r| r.outcome.score()));
    let overall_raw_agreement = mean_present(results.iter().map(|r| r.raw_agreement));

    let summary = AgreementSummary {
        method,
        reviewer_count: n_reviewers,
        item_count: table.item_count(),
        categories: results,
        overall_score,
        overall_raw_agreement,
        band: AgreementBand::from_score(overall_score),
        guidance: GuidanceTier::from_score(overall_score, profile),
    };

    tracing::info!(
        overall = ?summary.overall_score,
        level = summary.band.level(),
        disagreements = disagreements.len(),
        "agreement computed"
    );

    Ok(Stage3Output {
        summary,
        disagreements,
    })
}

pub fn agreement_for_matrix(
    matrix: &RatingMatrix,
    method: AgreementMethod,
) -> CategoryAgreementResult {
    let rows = matrix.retained_rows();

    let outcome = match method {
        AgreementMethod::CohenKappa if matrix.n_reviewers == 2 => {
            let first: Vec<u8> = rows.iter().map(|r| r[0]).collect();
            let second: Vec<u8> = rows.iter().map(|r| r[1]).collect();
            CategoryOutcome::from_result(cohen_kappa(&first, &second))
        }
        AgreementMethod::CohenKappa => CategoryOutcome::ComputeError(format!(
            "two-rater statistic needs exactly 2 reviewers, found {}",
            matrix.n_reviewers
        )),
        AgreementMethod::FleissKappa => {
            CategoryOutcome::from_result(fleiss_kappa(&count_matrix(&rows)))
        }
    };

    let confusion = if matrix.n_reviewers == 2 {
        confusion_matrix(&rows)
    } else {
        None
    };

    CategoryAgreementResult {
        category: matrix.category,
        outcome,
        raw_agreement: raw_agreement(&rows),
        retained_rows: rows.len(),
        confusion,
    }
}

/// 2x2 table over retained two-reviewer rows; `None` when no row is retained.
pub fn confusion_matrix(rows: &[Vec<u8>]) -> Option<ConfusionMatrix> {
    if rows.is_empty() {
        return None;
    }
    let mut cells = [[0usize; 2]; 2];
    for row in rows {
        let first = usize::from(row[0] == 0);
        let second = usize::from(row[1] == 0);
        cells[first][second] += 1;
    }
    let total = rows.len();
    let [[pp, pn], [np, nn]] = cells;
    Some(ConfusionMatrix {
        both_positive: pp,
        first_positive_second_negative: pn,
        first_negative_second_positive: np,
        both_negative: nn,
        total_items: total,
        reviewer1_positive_rate: (pp + pn) as f64 / total as f64,
        reviewer2_positive_rate: (pp + np) as f64 / total as f64,
    })
}

pub fn find_disagreements(matrix: &RatingMatrix, reviewers: &[ReviewerId]) -> Vec<Disagreement> {
    let mut out = Vec::new();
    for row in &matrix.rows {
        let mut distinct: Vec<&str> = Vec::new();
        for label in row.cells.iter().filter_map(|c| c.raw_label.as_deref()) {
            if !distinct.contains(&label) {
                distinct.push(label);
            }
        }
        if distinct.len() > 1 {
            out.push(Disagreement {
                item_id: row.item_id.clone(),
                category: matrix.category,
                labels: reviewers
                    .iter()
                    .copied()
                    .zip(row.cells.iter().map(|c| c.raw_label.clone()))
                    .collect(),
            });
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_agreement.rs"]
mod tests;
