pub mod json;
pub mod text;

pub fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

pub fn round_opt(v: Option<f64>, decimals: u32) -> Option<f64> {
    v.map(|x| round_to(x, decimals))
}

pub fn format_score(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.4}", x),
        None => "N/A".to_string(),
    }
}

pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

pub fn format_percent_opt(v: Option<f64>) -> String {
    match v {
        Some(x) => format_percent(x),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
