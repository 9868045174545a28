use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::input::ReviewerSource;
use crate::input::export::PostEntry;
use crate::model::category::{Category, CategorySet};
use crate::model::flags::{Diagnostics, Flag};
use crate::model::rating::{
    EvaluationRecord, ItemId, Prediction, Rating, RatingRecord, ReviewerId,
};

/// Flattened records plus the reviewer and item axes they were read against.
#[derive(Debug, Clone)]
pub struct RecordTable<R> {
    /// Reviewers with at least one post, in input order. Ids keep their input position.
    pub reviewers: Vec<ReviewerId>,
    /// Union of item ids over all sources, in first-encounter order.
    pub items: Vec<ItemId>,
    pub records: Vec<R>,
}

pub type RatingTable = RecordTable<RatingRecord>;
pub type EvaluationTable = RecordTable<EvaluationRecord>;

impl AsRef<RatingRecord> for EvaluationRecord {
    fn as_ref(&self) -> &RatingRecord {
        &self.record
    }
}

impl AsRef<RatingRecord> for RatingRecord {
    fn as_ref(&self) -> &RatingRecord {
        self
    }
}

impl<R: AsRef<RatingRecord>> RecordTable<R> {
    pub fn reviewer_count(&self) -> usize {
        self.reviewers.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn ratings(&self) -> impl Iterator<Item = &RatingRecord> + '_ {
        self.records.iter().map(|r| r.as_ref())
    }
}

pub fn extract_ratings(
    sources: &[ReviewerSource],
    categories: &CategorySet,
    diagnostics: &mut Diagnostics,
) -> RatingTable {
    extract_with(sources, categories, diagnostics, |record, _, _, _| record)
}

pub fn extract_evaluations(
    sources: &[ReviewerSource],
    categories: &CategorySet,
    diagnostics: &mut Diagnostics,
) -> EvaluationTable {
    extract_with(
        sources,
        categories,
        diagnostics,
        |record, post, category, diagnostics| {
            let prediction = lookup_prediction(post, category, &record.item_id, diagnostics);
            EvaluationRecord { record, prediction }
        },
    )
}

fn extract_with<R, F>(
    sources: &[ReviewerSource],
    categories: &CategorySet,
    diagnostics: &mut Diagnostics,
    mut make: F,
) -> RecordTable<R>
where
    R: AsRef<RatingRecord>,
    F: FnMut(RatingRecord, &PostEntry, Category, &mut Diagnostics) -> R,
{
    let mut reviewers = Vec::with_capacity(sources.len());
    let mut items = Vec::new();
    let mut seen_items: HashSet<ItemId> = HashSet::new();
    let mut records: Vec<R> = Vec::new();

    for source in sources {
        if source.export.posts.is_empty() {
            diagnostics.push(
                Flag::EmptySource,
                format!(
                    "{} ({}) has no posts; not counted as a reviewer",
                    source.reviewer.label(),
                    source.path.display()
                ),
            );
            continue;
        }
        reviewers.push(source.reviewer);

        let ids: Vec<ItemId> = source.export.posts.iter().map(PostEntry::item_id).collect();
        let mut last_entry: HashMap<&ItemId, usize> = HashMap::with_capacity(ids.len());
        for (idx, item_id) in ids.iter().enumerate() {
            last_entry.insert(item_id, idx);
        }

        for (idx, (post, item_id)) in source.export.posts.iter().zip(&ids).enumerate() {
            if seen_items.insert(item_id.clone()) {
                items.push(item_id.clone());
            }
            if last_entry.get(item_id) != Some(&idx) {
                diagnostics.push(
                    Flag::DuplicateRecord,
                    format!(
                        "{} ({}) lists item {} more than once; keeping the last entry",
                        source.reviewer.label(),
                        source.path.display(),
                        item_id
                    ),
                );
                continue;
            }

            for category in categories.iter() {
                let record = rate_post(post, item_id, source.reviewer, category, diagnostics);
                records.push(make(record, post, category, diagnostics));
            }
        }
    }

    tracing::info!(
        reviewers = reviewers.len(),
        items = items.len(),
        records = records.len(),
        "extracted rating records"
    );

    RecordTable {
        reviewers,
        items,
        records,
    }
}

fn rate_post(
    post: &PostEntry,
    item_id: &ItemId,
    reviewer: ReviewerId,
    category: Category,
    diagnostics: &mut Diagnostics,
) -> RatingRecord {
    let raw_label = match post.feedback_value(category.feedback_key()) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    if let Some(label) = raw_label.as_deref() {
        if !Rating::is_known_label(label) {
            diagnostics.push(
                Flag::UnknownLabel,
                format!(
                    "{} gave unrecognised label {:?} for item {} / {}; treated as missing",
                    reviewer.label(),
                    label,
                    item_id,
                    category
                ),
            );
        }
    }

    RatingRecord {
        item_id: item_id.clone(),
        reviewer,
        category,
        rating: Rating::from_label(raw_label.as_deref()),
        raw_label,
    }
}

fn lookup_prediction(
    post: &PostEntry,
    category: Category,
    item_id: &ItemId,
    diagnostics: &mut Diagnostics,
) -> Prediction {
    let Some(field) = category.prediction_field() else {
        return Prediction::Unavailable;
    };
    let prediction = Prediction::from_value(post.prediction_value(field));
    if prediction == Prediction::Unavailable {
        diagnostics.push(
            Flag::MissingPrediction,
            format!("missing {field} for item {item_id}"),
        );
    }
    prediction
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
