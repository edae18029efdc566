use chrono::NaiveDate;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a clock time into minutes since midnight.
///
/// Accepts `HH:MM`, `H:MM`, `HH:MM:SS`, and a bare minutes-since-midnight
/// integer, matching the shapes the backend has historically delivered.
/// Returns `None` for anything else.
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut parts = trimmed.splitn(3, ':');
    let first = parts.next()?;
    match parts.next() {
        Some(minutes_part) => {
            // Minutes must be exactly two digits; hours may be one or two.
            if minutes_part.len() != 2 {
                return None;
            }
            let hours: u32 = first.parse().ok()?;
            let minutes: u32 = minutes_part.parse().ok()?;
            if minutes >= 60 {
                return None;
            }
            // Seconds, when present, are ignored.
            Some((hours * 60 + minutes) % MINUTES_PER_DAY)
        }
        None => {
            let minutes: u32 = first.parse().ok()?;
            Some(minutes % MINUTES_PER_DAY)
        }
    }
}

/// Canonicalizes a clock time to `HH:MM`, falling back when unparseable.
pub fn canonical_hhmm(value: &str, fallback: &str) -> String {
    match parse_hhmm(value) {
        Some(minutes) => format_minutes(minutes),
        None => fallback.to_string(),
    }
}

/// Canonicalizes a clock time when it parses; otherwise keeps the trimmed
/// raw string so downstream duration math sees the unparseable value.
pub fn canonical_or_raw(value: &str) -> String {
    match parse_hhmm(value) {
        Some(minutes) => format_minutes(minutes),
        None => value.trim().to_string(),
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Duration in hours between two `HH:MM` strings.
///
/// An end earlier than the start is treated as crossing midnight (24h is
/// added before subtracting). A start equal to the end is zero hours, and
/// if either side is unparseable the whole duration is zero rather than
/// an error.
pub fn duration_hours(start: &str, end: &str) -> f64 {
    let (Some(start_min), Some(parsed_end)) = (parse_hhmm(start), parse_hhmm(end)) else {
        return 0.0;
    };
    let mut end_min = parsed_end;
    if end_min < start_min {
        end_min += MINUTES_PER_DAY;
    }
    f64::from(end_min - start_min) / 60.0
}

/// Tolerant calendar-date parsing.
///
/// Accepts `YYYY-MM-DD`, or a longer ISO-8601 datetime by taking the date
/// prefix. Returns `None` for malformed input.
pub fn parse_date_only(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() < 10 {
        return None;
    }
    NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d").ok()
}

/// Canonical `YYYY-MM-DD` key for a date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
