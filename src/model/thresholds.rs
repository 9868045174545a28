#[derive(Debug, Clone)]
pub struct AnalysisProfile {
    pub min_reviewers: usize,
    pub problem_item_ratio: f64,
    pub export_decimals: u32,
    pub small_sample_items: usize,
    pub guidance_high: f64,
    pub guidance_moderate: f64,
    pub tier_excellent: f64,
    pub tier_good: f64,
    pub tier_fair: f64,
}

impl AnalysisProfile {
    pub fn default_v1() -> Self {
        Self {
            min_reviewers: 2,
            problem_item_ratio: 0.5,
            export_decimals: 4,
            small_sample_items: 30,
            guidance_high: 0.60,
            guidance_moderate: 0.40,
            tier_excellent: 0.90,
            tier_good: 0.80,
            tier_fair: 0.70,
        }
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}
