use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum Category {
    Overall,
    Theme,
    Objects,
    Sentiment,
    ContentQuality,
    ContentIntent,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Overall,
        Category::Theme,
        Category::Objects,
        Category::Sentiment,
        Category::ContentQuality,
        Category::ContentIntent,
    ];

    /// Key of this category inside a post's `feedback` object.
    pub fn feedback_key(self) -> &'static str {
        match self {
            Category::Overall => "overall",
            Category::Theme => "theme",
            Category::Objects => "objects",
            Category::Sentiment => "sentiment",
            Category::ContentQuality => "contentQuality",
            Category::ContentIntent => "contentIntent",
        }
    }

    /// Field holding the model's prediction inside a post's `llm` object.
    pub fn prediction_field(self) -> Option<&'static str> {
        match self {
            Category::Overall => None,
            Category::Theme => Some("llmTheme"),
            Category::Objects => Some("llmObjects"),
            Category::Sentiment => Some("llmSentiment"),
            Category::ContentQuality => Some("llmContentQuality"),
            Category::ContentIntent => Some("llmContentIntent"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feedback_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategorySetError {
    #[error("category set is empty")]
    Empty,
    #[error("category {0} listed more than once")]
    Duplicate(Category),
    #[error("category {0} has no prediction field and cannot be evaluated")]
    NoPredictionField(Category),
}

/// Ordered, duplicate-free list of categories an analysis runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new(categories: &[Category]) -> Result<Self, CategorySetError> {
        if categories.is_empty() {
            return Err(CategorySetError::Empty);
        }
        let mut seen = Vec::with_capacity(categories.len());
        for &category in categories {
            if seen.contains(&category) {
                return Err(CategorySetError::Duplicate(category));
            }
            seen.push(category);
        }
        Ok(Self { categories: seen })
    }

    /// Like [`CategorySet::new`], but every category must map to a prediction field.
    pub fn for_evaluation(categories: &[Category]) -> Result<Self, CategorySetError> {
        let set = Self::new(categories)?;
        if let Some(&bad) = set
            .categories
            .iter()
            .find(|c| c.prediction_field().is_none())
        {
            return Err(CategorySetError::NoPredictionField(bad));
        }
        Ok(set)
    }

    pub fn agreement_default() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
        }
    }

    pub fn evaluation_default() -> Self {
        Self {
            categories: Category::ALL
                .iter()
                .copied()
                .filter(|c| c.prediction_field().is_some())
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.feedback_key()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/category.rs"]
mod tests;
