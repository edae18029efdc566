use chrono::NaiveDate;

/// Renders an amount with its currency code, e.g. `120.50 BHD`.
/// Non-finite amounts render as zero rather than leaking `NaN` to users.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let safe = if amount.is_finite() { amount } else { 0.0 };
    format!("{:.2} {}", safe, currency)
}

pub fn format_hours(hours: f64) -> String {
    let safe = if hours.is_finite() { hours } else { 0.0 };
    format!("{:.1} h", safe)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
