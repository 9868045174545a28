use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::category::Category;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId(value.to_string())
    }
}

/// Ordinal reviewer identity: position of the reviewer's source in the input list, from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewerId(pub usize);

impl ReviewerId {
    pub fn from_index(index: usize) -> Self {
        ReviewerId(index + 1)
    }

    pub fn label(self) -> String {
        format!("Reviewer_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Positive,
    Negative,
    Missing,
}

impl Rating {
    /// Maps a feedback label; `None` means the label is absent or not a recognised value.
    pub fn from_label(label: Option<&str>) -> Rating {
        match label {
            Some("positive") => Rating::Positive,
            Some("negative") => Rating::Negative,
            _ => Rating::Missing,
        }
    }

    pub fn is_known_label(label: &str) -> bool {
        matches!(label, "positive" | "negative")
    }

    /// 1 for positive, 0 for negative, `None` for missing.
    pub fn binary(self) -> Option<u8> {
        match self {
            Rating::Positive => Some(1),
            Rating::Negative => Some(0),
            Rating::Missing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub item_id: ItemId,
    pub reviewer: ReviewerId,
    pub category: Category,
    pub rating: Rating,
    pub raw_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Available(serde_json::Value),
    Unavailable,
}

impl Prediction {
    /// Scalars are kept as is; for a sequence only the first element counts.
    pub fn from_value(value: Option<&serde_json::Value>) -> Prediction {
        match value {
            None | Some(serde_json::Value::Null) => Prediction::Unavailable,
            Some(serde_json::Value::Array(items)) => match items.first() {
                None | Some(serde_json::Value::Null) => Prediction::Unavailable,
                Some(first) => Prediction::Available(first.clone()),
            },
            Some(other) => Prediction::Available(other.clone()),
        }
    }

    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Prediction::Available(v) => Some(v),
            Prediction::Unavailable => None,
        }
    }
}

/// A rating record whose rating is a reviewer's judgment of the model's prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    pub record: RatingRecord,
    pub prediction: Prediction,
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/rating.rs"]
mod tests;
