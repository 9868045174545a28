use std::collections::HashMap;

use crate::model::category::Category;
use crate::model::rating::{ItemId, Rating, RatingRecord, ReviewerId};
use crate::pipeline::stage1_extract::RecordTable;

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub rating: Rating,
    pub raw_label: Option<String>,
}

impl MatrixCell {
    fn missing() -> Self {
        Self {
            rating: Rating::Missing,
            raw_label: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatrixRow {
    pub item_id: ItemId,
    /// One cell per reviewer, in the order of the table's reviewer axis.
    pub cells: Vec<MatrixCell>,
}

impl MatrixRow {
    pub fn binary(&self) -> Option<Vec<u8>> {
        self.cells.iter().map(|c| c.rating.binary()).collect()
    }
}

/// Reviewer-by-item ratings for one category.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    pub category: Category,
    pub n_reviewers: usize,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    #[error("record for item {item} names reviewer {reviewer}, who is not on the reviewer axis")]
    UnknownReviewer { item: ItemId, reviewer: usize },
    #[error("record for item {0} is not on the item axis")]
    UnknownItem(ItemId),
}

impl RatingMatrix {
    /// Binary rows where every reviewer supplied a usable rating, in item order.
    pub fn retained_rows(&self) -> Vec<Vec<u8>> {
        self.rows.iter().filter_map(|r| r.binary()).collect()
    }
}

pub fn build_rating_matrix<R: AsRef<RatingRecord>>(
    table: &RecordTable<R>,
    category: Category,
) -> Result<RatingMatrix, MatrixError> {
    let n_reviewers = table.reviewer_count();
    let col_of: HashMap<ReviewerId, usize> = table
        .reviewers
        .iter()
        .enumerate()
        .map(|(idx, reviewer)| (*reviewer, idx))
        .collect();
    let row_of: HashMap<&ItemId, usize> = table
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| (item, idx))
        .collect();

    let mut rows: Vec<MatrixRow> = table
        .items
        .iter()
        .map(|item| MatrixRow {
            item_id: item.clone(),
            cells: vec![MatrixCell::missing(); n_reviewers],
        })
        .collect();

    for record in table.ratings().filter(|r| r.category == category) {
        let Some(&col) = col_of.get(&record.reviewer) else {
            return Err(MatrixError::UnknownReviewer {
                item: record.item_id.clone(),
                reviewer: record.reviewer.0,
            });
        };
        let Some(&row) = row_of.get(&record.item_id) else {
            return Err(MatrixError::UnknownItem(record.item_id.clone()));
        };
        rows[row].cells[col] = MatrixCell {
            rating: record.rating,
            raw_label: record.raw_label.clone(),
        };
    }

    Ok(RatingMatrix {
        category,
        n_reviewers,
        rows,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_matrix.rs"]
mod tests;
