use crate::model::kappa::KappaError;

/// Result of one category's statistic. Failures stay local to their category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOutcome {
    Score(f64),
    NoData,
    ComputeError(String),
}

impl CategoryOutcome {
    pub fn from_result(result: Result<f64, KappaError>) -> Self {
        match result {
            Ok(v) => CategoryOutcome::Score(v),
            Err(KappaError::NoRows) => CategoryOutcome::NoData,
            Err(e) => CategoryOutcome::ComputeError(e.to_string()),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            CategoryOutcome::Score(v) => Some(*v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CategoryOutcome::ComputeError(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Arithmetic mean of the present values; `None` when nothing is present.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.into_iter().flatten() {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

pub fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scores.rs"]
mod tests;
