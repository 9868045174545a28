use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::rating::ItemId;

/// One reviewer's feedback export.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackExport {
    pub posts: Vec<PostEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostEntry {
    #[serde(rename = "postId")]
    pub post_id: RawItemId,
    #[serde(default)]
    pub feedback: Option<Map<String, Value>>,
    #[serde(default)]
    pub llm: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawItemId {
    Text(String),
    Number(serde_json::Number),
}

impl RawItemId {
    /// Numeric and text ids with the same digits name the same item, so `1` in one
    /// reviewer's export matches `"1"` in another's.
    pub fn to_item_id(&self) -> ItemId {
        match self {
            RawItemId::Text(s) => ItemId::from(s.as_str()),
            RawItemId::Number(n) => ItemId(n.to_string()),
        }
    }
}

impl PostEntry {
    pub fn item_id(&self) -> ItemId {
        self.post_id.to_item_id()
    }

    pub fn feedback_value(&self, key: &str) -> Option<&Value> {
        self.feedback.as_ref().and_then(|f| f.get(key))
    }

    pub fn prediction_value(&self, field: &str) -> Option<&Value> {
        self.llm.as_ref().and_then(|l| l.get(field))
    }
}
