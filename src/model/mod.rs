pub mod bands;
pub mod category;
pub mod flags;
pub mod kappa;
pub mod rating;
pub mod scores;
pub mod thresholds;
pub mod verdict;
