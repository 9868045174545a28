//! Chance-corrected agreement statistics over binary ratings.
//!
//! Ratings are `0` (negative) or `1` (positive). Rows are items, columns are
//! reviewers, and only fully rated rows are passed in.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KappaError {
    #[error("no complete rows to compare")]
    NoRows,
    #[error("rating shape mismatch: {0}")]
    Shape(String),
    #[error("statistic is undefined: {0}")]
    Degenerate(String),
}

pub fn row_is_unanimous(row: &[u8]) -> bool {
    match row.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Fraction of rows where every reviewer gave the same rating. `None` for no rows.
pub fn raw_agreement(rows: &[Vec<u8>]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let agreeing = rows.iter().filter(|r| row_is_unanimous(r)).count();
    Some(agreeing as f64 / rows.len() as f64)
}

/// Cohen's kappa for two reviewers.
///
/// Identical rating vectors score exactly 1.0; the general formula is 0/0 when
/// both reviewers used a single label throughout.
pub fn cohen_kappa(a: &[u8], b: &[u8]) -> Result<f64, KappaError> {
    if a.len() != b.len() {
        return Err(KappaError::Shape(format!(
            "reviewer vectors differ in length ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(KappaError::NoRows);
    }
    if a == b {
        return Ok(1.0);
    }

    let n = a.len() as f64;
    let mut observed = 0usize;
    let mut a_pos = 0usize;
    let mut b_pos = 0usize;
    for (&x, &y) in a.iter().zip(b) {
        if x == y {
            observed += 1;
        }
        if x == 1 {
            a_pos += 1;
        }
        if y == 1 {
            b_pos += 1;
        }
    }

    let po = observed as f64 / n;
    let pa = a_pos as f64 / n;
    let pb = b_pos as f64 / n;
    let pe = pa * pb + (1.0 - pa) * (1.0 - pb);

    finite((po - pe) / (1.0 - pe), "expected agreement equals 1")
}

/// Per-item vote counts as `[positive, negative]`.
pub fn count_matrix(rows: &[Vec<u8>]) -> Vec<[u32; 2]> {
    rows.iter()
        .map(|row| {
            let pos = row.iter().filter(|&&v| v == 1).count() as u32;
            let neg = row.iter().filter(|&&v| v == 0).count() as u32;
            [pos, neg]
        })
        .collect()
}

/// Fleiss' kappa for three or more reviewers over a `[positive, negative]` count matrix.
///
/// Every row must carry the same number of ratings. A matrix where every row is
/// unanimous scores exactly 1.0.
pub fn fleiss_kappa(counts: &[[u32; 2]]) -> Result<f64, KappaError> {
    if counts.is_empty() {
        return Err(KappaError::NoRows);
    }
    let n_raters = counts[0][0] + counts[0][1];
    if n_raters < 2 {
        return Err(KappaError::Shape(format!(
            "need at least 2 ratings per item, found {n_raters}"
        )));
    }
    if let Some(row) = counts.iter().position(|c| c[0] + c[1] != n_raters) {
        return Err(KappaError::Shape(format!(
            "item {row} has {} ratings, expected {n_raters}",
            counts[row][0] + counts[row][1]
        )));
    }
    if counts.iter().all(|c| c[0] == 0 || c[1] == 0) {
        return Ok(1.0);
    }

    let n_items = counts.len() as f64;
    let m = n_raters as f64;

    let mut col_totals = [0f64; 2];
    let mut p_mean = 0f64;
    for c in counts {
        col_totals[0] += c[0] as f64;
        col_totals[1] += c[1] as f64;
        let sq = (c[0] as f64).powi(2) + (c[1] as f64).powi(2);
        p_mean += (sq - m) / (m * (m - 1.0));
    }
    p_mean /= n_items;

    let total = n_items * m;
    let p_exp = (col_totals[0] / total).powi(2) + (col_totals[1] / total).powi(2);

    finite((p_mean - p_exp) / (1.0 - p_exp), "expected agreement equals 1")
}

fn finite(value: f64, reason: &str) -> Result<f64, KappaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(KappaError::Degenerate(reason.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/kappa.rs"]
mod tests;
