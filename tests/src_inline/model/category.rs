use super::*;

#[test]
fn test_prediction_fields_are_distinct() {
    let mut fields: Vec<&str> = Category::ALL
        .iter()
        .filter_map(|c| c.prediction_field())
        .collect();
    let n = fields.len();
    fields.sort();
    fields.dedup();
    assert_eq!(fields.len(), n);
    assert_eq!(Category::Overall.prediction_field(), None);
    assert_eq!(
        Category::ContentQuality.prediction_field(),
        Some("llmContentQuality")
    );
}

#[test]
fn test_defaults() {
    assert_eq!(CategorySet::agreement_default().len(), 6);
    let eval = CategorySet::evaluation_default();
    assert_eq!(
        eval.names(),
        vec!["theme", "objects", "sentiment", "contentQuality", "contentIntent"]
    );
}

#[test]
fn test_evaluation_set_rejects_category_without_prediction_field() {
    let err = CategorySet::for_evaluation(&[Category::Theme, Category::Overall]).unwrap_err();
    assert_eq!(err, CategorySetError::NoPredictionField(Category::Overall));
}

#[test]
fn test_rejects_empty_and_duplicates() {
    assert_eq!(CategorySet::new(&[]).unwrap_err(), CategorySetError::Empty);
    assert_eq!(
        CategorySet::new(&[Category::Theme, Category::Theme]).unwrap_err(),
        CategorySetError::Duplicate(Category::Theme)
    );
}

#[test]
fn test_serde_uses_feedback_keys() {
    assert_eq!(
        serde_json::to_string(&Category::ContentIntent).unwrap(),
        "\"contentIntent\""
    );
    let c: Category = serde_json::from_str("\"contentQuality\"").unwrap();
    assert_eq!(c, Category::ContentQuality);
    assert_eq!(Category::Sentiment.to_string(), "sentiment");
}
