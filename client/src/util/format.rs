//! Display formatting for costs, timings, and model metadata.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `$0.53` style dollar amount.
pub fn format_cost(amount: f64) -> String {
    format!("${amount:.2}")
}

/// `6.32s` style response time.
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.2}s")
}

/// Input/output price line shown on model cards.
pub fn price_line(input: &str, output: &str) -> String {
    format!("{input} / {output} per 1M tokens")
}

/// Initials for the header avatar, at most two characters.
pub fn initials(name: &str) -> String {
    let mut out: String = name
        .split(|c: char| c.is_whitespace() || c == '.' || c == '_' || c == '-')
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect();
    if out.is_empty() {
        out.push('?');
    }
    out.to_uppercase()
}
