use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;
use crate::input::export::FeedbackExport;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_feedback_export(path: &Path) -> Result<FeedbackExport, InputError> {
    let reader = open_maybe_gz(path)?;
    serde_json::from_reader(reader).map_err(|e| {
        let reason = if e.is_io() {
            format!("read failed: {e}")
        } else if e.is_syntax() || e.is_eof() {
            format!("not well-formed JSON: {e}")
        } else {
            format!("missing or mistyped `posts` container or `postId`: {e}")
        };
        InputError::Malformed {
            path: path.to_path_buf(),
            reason,
        }
    })
}
