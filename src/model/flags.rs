use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    EmptySource,
    DuplicateRecord,
    UnknownLabel,
    MissingPrediction,
    CategoryComputeFailure,
    UndefinedAccuracy,
    ReviewerOrderSensitive,
}

pub fn flag_order() -> &'static [Flag] {
    &[
        Flag::EmptySource,
        Flag::DuplicateRecord,
        Flag::UnknownLabel,
        Flag::MissingPrediction,
        Flag::CategoryComputeFailure,
        Flag::UndefinedAccuracy,
        Flag::ReviewerOrderSensitive,
    ]
}

pub fn flag_name(flag: Flag) -> &'static str {
    match flag {
        Flag::EmptySource => "EMPTY_SOURCE",
        Flag::DuplicateRecord => "DUPLICATE_RECORD",
        Flag::UnknownLabel => "UNKNOWN_LABEL",
        Flag::MissingPrediction => "MISSING_PREDICTION",
        Flag::CategoryComputeFailure => "CATEGORY_COMPUTE_FAILURE",
        Flag::UndefinedAccuracy => "UNDEFINED_ACCURACY",
        Flag::ReviewerOrderSensitive => "REVIEWER_ORDER_SENSITIVE",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub flag: Flag,
    pub message: String,
}

/// Non-fatal findings collected during a run. Every push is also logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: Flag, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(flag = flag_name(flag), "{message}");
        self.entries.push(Diagnostic { flag, message });
    }

    pub fn count(&self, flag: Flag) -> usize {
        self.entries.iter().filter(|d| d.flag == flag).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by flag in `flag_order`, insertion order kept within a flag.
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut out = Vec::with_capacity(self.entries.len());
        for &flag in flag_order() {
            out.extend(self.entries.iter().filter(|d| d.flag == flag).cloned());
        }
        out
    }
}
