use std::path::{Path, PathBuf};

pub mod export;
pub mod reader;

use export::FeedbackExport;
use reader::read_feedback_export;

use crate::model::rating::ReviewerId;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed input {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// One reviewer's parsed export. Reviewer identity comes from list position only.
#[derive(Debug, Clone)]
pub struct ReviewerSource {
    pub reviewer: ReviewerId,
    pub path: PathBuf,
    pub export: FeedbackExport,
}

pub fn load_reviewer_sources<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<ReviewerSource>, InputError> {
    let mut out = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let reviewer = ReviewerId::from_index(idx);
        let export = read_feedback_export(path)?;
        tracing::info!(
            reviewer = %reviewer.label(),
            path = %path.display(),
            posts = export.posts.len(),
            "loaded reviewer export"
        );
        out.push(ReviewerSource {
            reviewer,
            path: path.to_path_buf(),
            export,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
