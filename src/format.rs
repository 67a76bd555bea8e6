//! Number formatting for labels and notices.

/// Group an integer with comma thousands separators: `-1234567` → `-1,234,567`
pub fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Whole currency units with separators and a suffix: `1234567.4` → `1,234,567 KRW`
pub fn currency(amount: f64, suffix: &str) -> String {
    format!("{} {}", with_thousands(amount.round() as i64), suffix)
}

/// Two-decimal percentage: `5.0` → `5.00%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}
