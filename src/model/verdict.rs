use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Uncertain,
    NoData,
}

impl Verdict {
    pub fn is_decisive(self) -> bool {
        matches!(self, Verdict::Correct | Verdict::Incorrect)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusVerdict {
    pub verdict: Verdict,
    pub confidence: f64,
    pub votes: Vec<u8>,
}

/// Majority vote over correctness votes (`1` correct, `0` incorrect); missing votes
/// must already be dropped. Exact ties are uncertain at confidence 0.5.
pub fn build_consensus(votes: Vec<u8>) -> ConsensusVerdict {
    if votes.is_empty() {
        return ConsensusVerdict {
            verdict: Verdict::NoData,
            confidence: 0.0,
            votes,
        };
    }

    let correct = votes.iter().filter(|&&v| v == 1).count();
    let incorrect = votes.iter().filter(|&&v| v == 0).count();
    let total = votes.len() as f64;

    let (verdict, confidence) = if correct > incorrect {
        (Verdict::Correct, correct as f64 / total)
    } else if incorrect > correct {
        (Verdict::Incorrect, incorrect as f64 / total)
    } else {
        (Verdict::Uncertain, 0.5)
    };

    ConsensusVerdict {
        verdict,
        confidence,
        votes,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/verdict.rs"]
mod tests;
