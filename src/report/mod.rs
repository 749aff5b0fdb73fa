pub mod export;
pub mod json;
pub mod text;

pub fn format_percent(v: f64) -> String {
    if v.is_finite() {
        format!("{:.1}%", v)
    } else {
        "0.0%".to_string()
    }
}

/// Tabs and line breaks would split a TSV cell; replace them with spaces.
pub fn sanitize_cell(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

/// `YYYY-MM-DD` from an ISO-8601 timestamp.
pub fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
