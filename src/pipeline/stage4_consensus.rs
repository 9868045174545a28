use std::collections::HashMap;

use serde_json::Value;

use crate::model::category::{Category, CategorySet};
use crate::model::rating::ItemId;
use crate::model::scores::ratio;
use crate::model::verdict::{ConsensusVerdict, Verdict, build_consensus};
use crate::pipeline::stage1_extract::EvaluationTable;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemConsensus {
    pub item_id: ItemId,
    pub consensus: ConsensusVerdict,
    /// First available model prediction for this item across reviewer sources.
    pub prediction: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEvaluation {
    pub category: Category,
    pub correct: usize,
    pub incorrect: usize,
    pub uncertain: usize,
    pub no_data: usize,
    pub total_items: usize,
    pub accuracy: f64,
    pub error_rate: f64,
    /// False when no item reached a decisive verdict; accuracy and error rate are then 0.
    pub metrics_defined: bool,
    pub details: Vec<ItemConsensus>,
}

impl CategoryEvaluation {
    pub fn total_evaluated(&self) -> usize {
        self.correct + self.incorrect
    }
}

#[derive(Debug, Default)]
struct VoteCell {
    votes: Vec<u8>,
    prediction: Option<Value>,
}

/// Correctness votes per (category, item), in reviewer order, with missing votes dropped.
fn collect_votes(table: &EvaluationTable) -> HashMap<(Category, &ItemId), VoteCell> {
    let mut cells: HashMap<(Category, &ItemId), VoteCell> = HashMap::new();
    for rec in &table.records {
        let cell = cells
            .entry((rec.record.category, &rec.record.item_id))
            .or_default();
        if let Some(v) = rec.record.rating.binary() {
            cell.votes.push(v);
        }
        if cell.prediction.is_none() {
            cell.prediction = rec.prediction.as_value().cloned();
        }
    }
    cells
}

pub fn run_consensus(table: &EvaluationTable, categories: &CategorySet) -> Vec<CategoryEvaluation> {
    let mut cells = collect_votes(table);
    let mut out = Vec::with_capacity(categories.len());

    for category in categories.iter() {
        let mut eval = CategoryEvaluation {
            category,
            correct: 0,
            incorrect: 0,
            uncertain: 0,
            no_data: 0,
            total_items: 0,
            accuracy: 0.0,
            error_rate: 0.0,
            metrics_defined: false,
            details: Vec::with_capacity(table.item_count()),
        };

        for item_id in &table.items {
            let Some(cell) = cells.remove(&(category, item_id)) else {
                continue;
            };
            let consensus = build_consensus(cell.votes);
            match consensus.verdict {
                Verdict::Correct => eval.correct += 1,
                Verdict::Incorrect => eval.incorrect += 1,
                Verdict::Uncertain => eval.uncertain += 1,
                Verdict::NoData => eval.no_data += 1,
            }
            eval.details.push(ItemConsensus {
                item_id: item_id.clone(),
                consensus,
                prediction: cell.prediction,
            });
        }

        eval.total_items = eval.details.len();
        let decisive = eval.total_evaluated();
        if let (Some(acc), Some(err)) =
            (ratio(eval.correct, decisive), ratio(eval.incorrect, decisive))
        {
            eval.accuracy = acc;
            eval.error_rate = err;
            eval.metrics_defined = true;
        }

        tracing::info!(
            category = %category,
            correct = eval.correct,
            incorrect = eval.incorrect,
            uncertain = eval.uncertain,
            no_data = eval.no_data,
            "category consensus built"
        );
        out.push(eval);
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_consensus.rs"]
mod tests;
