use crate::model::bands::{AgreementBand, GuidanceTier, PerformanceTier};
use crate::model::flags::{Diagnostics, flag_name, flag_order};
use crate::pipeline::stage3_agreement::AgreementSummary;
use crate::pipeline::stage5_evaluate::EvaluationSummary;
use crate::report::{format_percent, format_percent_opt, format_score};

const RULE: &str = "============================================================";

pub fn render_agreement_text(
    summary: &AgreementSummary,
    reviewer_paths: &[String],
    diagnostics: &Diagnostics,
) -> String {
    let mut out = String::new();

    out.push_str("Inter-Reviewer Agreement Report\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!("Method: {}\n", summary.method.name()));
    out.push_str(&format!("Reviewers: {}\n", summary.reviewer_count));
    out.push_str(&format!("Items: {}\n", summary.item_count));
    for (idx, path) in reviewer_paths.iter().enumerate() {
        out.push_str(&format!("  Reviewer_{}: {}\n", idx + 1, path));
    }
    out.push('\n');

    out.push_str("2. Category scores\n");
    for c in &summary.categories {
        let score = c.outcome.score();
        let band = if score.is_some() {
            format!("  ({})", AgreementBand::from_score(score).level())
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:<20} kappa={}{}  raw={}  n={}\n",
            c.category.feedback_key(),
            format_score(score),
            band,
            format_percent_opt(c.raw_agreement),
            c.retained_rows
        ));
        if let Some(reason) = c.outcome.error() {
            out.push_str(&format!("{:<20} error: {}\n", "", reason));
        }
    }
    out.push('\n');

    out.push_str("3. Overall\n");
    out.push_str(&format!("Overall score: {}\n", format_score(summary.overall_score)));
    out.push_str(&format!(
        "Overall raw agreement: {}\n",
        format_percent_opt(summary.overall_raw_agreement)
    ));
    out.push_str(&format!("Agreement level: {}\n", summary.band.level()));
    out.push_str(&format!("Description: {}\n", summary.band.description()));
    out.push_str(&format!("Reliability: {}\n\n", summary.band.reliability()));

    out.push_str("4. Confusion matrices\n");
    if summary.reviewer_count == 2 {
        for c in &summary.categories {
            match &c.confusion {
                Some(m) => {
                    out.push_str(&format!(
                        "{} (n={})\n",
                        c.category.feedback_key().to_uppercase(),
                        m.total_items
                    ));
                    out.push_str("                    Reviewer 2\n");
                    out.push_str("                    Positive    Negative\n");
                    out.push_str(&format!(
                        "Reviewer 1  Pos      {:3}         {:3}\n",
                        m.both_positive, m.first_positive_second_negative
                    ));
                    out.push_str(&format!(
                        "            Neg      {:3}         {:3}\n",
                        m.first_negative_second_positive, m.both_negative
                    ));
                    out.push_str(&format!(
                        "Reviewer 1 positive rate: {}\nReviewer 2 positive rate: {}\n\n",
                        format_percent(m.reviewer1_positive_rate),
                        format_percent(m.reviewer2_positive_rate)
                    ));
                }
                None => {
                    out.push_str(&format!("{}: no data\n\n", c.category.feedback_key()));
                }
            }
        }
    } else {
        out.push_str("(only available for exactly 2 reviewers)\n\n");
    }

    out.push_str("5. Guidance\n");
    out.push_str(guidance_statement(summary.guidance));
    out.push('\n');

    push_diagnostics(&mut out, "6. Diagnostics", diagnostics);
    out
}

fn guidance_statement(tier: GuidanceTier) -> &'static str {
    match tier {
        GuidanceTier::High => {
            "High agreement: reviewers judged consistently; negative ratings are reliable error signals and majority voting is appropriate for consensus.\n"
        }
        GuidanceTier::Moderate => {
            "Moderate agreement: some items are ambiguous; review disagreements and refine the rating guidelines.\n"
        }
        GuidanceTier::Low => {
            "Low agreement: reviewers could not agree reliably; clarify instructions with examples and re-rate.\n"
        }
        GuidanceTier::Unknown => "Agreement could not be calculated; check the input data.\n",
    }
}

pub fn render_evaluation_text(summary: &EvaluationSummary, diagnostics: &Diagnostics) -> String {
    let mut out = String::new();

    out.push_str("Model Correctness Evaluation Report\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!("Reviewers: {}\n", summary.reviewer_count));
    out.push_str(&format!("Items: {}\n\n", summary.item_count));

    out.push_str("2. Category performance\n");
    out.push_str(&format!(
        "{:<20} {:<10} {:<10} {:<10} {:<10} {}\n",
        "Category", "Correct", "Wrong", "Uncertain", "No data", "Accuracy"
    ));
    for c in &summary.categories {
        let accuracy = if c.metrics_defined {
            format_percent(c.accuracy)
        } else {
            "N/A".to_string()
        };
        out.push_str(&format!(
            "{:<20} {:<10} {:<10} {:<10} {:<10} {}\n",
            c.category.feedback_key(),
            c.correct,
            c.incorrect,
            c.uncertain,
            c.no_data,
            accuracy
        ));
    }
    out.push('\n');

    let o = &summary.overall;
    out.push_str("3. Overall\n");
    out.push_str(&format!("Decisive verdicts: {}\n", o.total_evaluated));
    out.push_str(&format!("Correct: {}\n", o.total_correct));
    out.push_str(&format!("Incorrect: {}\n", o.total_incorrect));
    out.push_str(&format!("Uncertain: {}\n", o.total_uncertain));
    out.push_str(&format!("Accuracy: {}\n", format_percent(o.accuracy)));
    out.push_str(&format!("Error rate: {}\n\n", format_percent(o.error_rate)));

    out.push_str("4. Assessment\n");
    let a = &summary.assessment;
    if let Some((category, acc)) = a.strongest {
        out.push_str(&format!("Strongest: {} ({})\n", category, format_percent(acc)));
    }
    if let Some((category, acc)) = a.weakest {
        out.push_str(&format!("Needs improvement: {} ({})\n", category, format_percent(acc)));
    }
    if let Some(tier) = a.tier {
        out.push_str(tier_statement(tier));
    }
    if a.small_sample {
        out.push_str(&format!(
            "Warning: only {} items evaluated; collect more for robust conclusions.\n",
            summary.item_count
        ));
    }
    out.push('\n');

    out.push_str("5. Problem items\n");
    if summary.problem_items.is_empty() {
        out.push_str("none\n");
    }
    for p in &summary.problem_items {
        out.push_str(&format!(
            "{}: {}/{} errors ({})\n",
            p.item_id,
            p.errors,
            p.total,
            format_percent(p.error_rate)
        ));
    }
    out.push('\n');

    push_diagnostics(&mut out, "6. Diagnostics", diagnostics);
    out
}

fn tier_statement(tier: PerformanceTier) -> &'static str {
    match tier {
        PerformanceTier::Excellent => "Excellent: accuracy at or above 90%\n",
        PerformanceTier::Good => "Good: accuracy between 80% and 90%\n",
        PerformanceTier::Fair => "Fair: accuracy between 70% and 80%\n",
        PerformanceTier::Poor => "Poor: accuracy below 70%\n",
    }
}

fn push_diagnostics(out: &mut String, title: &str, diagnostics: &Diagnostics) {
    out.push_str(title);
    out.push('\n');
    if diagnostics.is_empty() {
        out.push_str("none\n");
        return;
    }
    for &flag in flag_order() {
        let n = diagnostics.count(flag);
        if n > 0 {
            out.push_str(&format!("{}: {}\n", flag_name(flag), n));
        }
    }
    for d in diagnostics.sorted() {
        out.push_str(&format!("[{}] {}\n", flag_name(d.flag), d.message));
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
