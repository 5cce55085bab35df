use chrono::Utc;

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// pt-BR currency rendering: "R$ 1.234,56".
/// Alert descriptions are shown to Brazilian auditors, so amounts follow
/// the statement's locale rather than the machine's.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}
