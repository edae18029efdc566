use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::timeslot::{canonical_hhmm, canonical_or_raw, date_key, parse_date_only};

pub const DEFAULT_RANGE_START: &str = "16:00";
pub const DEFAULT_RANGE_END: &str = "18:00";

/// One explicitly recorded meeting of a course.
///
/// Dates are canonical `YYYY-MM-DD` when they parse; otherwise the raw
/// string is kept so positional attendance keys stay stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSlot {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl SessionSlot {
    pub fn new(date: impl Into<String>, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percent,
    Amount,
}

/// Discount applied to gross revenue, clamped per type when resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Discount {
    pub kind: DiscountType,
    pub value: f64,
}

impl Discount {
    pub fn percent(value: f64) -> Self {
        Self {
            kind: DiscountType::Percent,
            value,
        }
    }

    pub fn amount(value: f64) -> Self {
        Self {
            kind: DiscountType::Amount,
            value,
        }
    }

    /// Monetary discount against a gross revenue figure.
    ///
    /// Percent values clamp into `[0, 100]`; fixed amounts clamp into
    /// `[0, gross]`. Non-finite values count as zero.
    pub fn amount_against(&self, gross: f64) -> f64 {
        let value = if self.value.is_finite() { self.value } else { 0.0 };
        match self.kind {
            DiscountType::Amount => value.clamp(0.0, gross.max(0.0)),
            DiscountType::Percent => gross * value.clamp(0.0, 100.0) / 100.0,
        }
    }
}

/// Instructor reference as it arrives from the backend: either a bare id or
/// an embedded document. `key()` is the one normalization used wherever
/// identity is compared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InstructorRef {
    Id(String),
    Embedded(EmbeddedInstructor),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EmbeddedInstructor {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(
        alias = "ratePerHour",
        alias = "payPerHour",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_per_hour: Option<f64>,
}

impl InstructorRef {
    /// Stable identity key regardless of the underlying shape.
    pub fn key(&self) -> String {
        match self {
            InstructorRef::Id(id) => id.clone(),
            InstructorRef::Embedded(embedded) => embedded.id.clone(),
        }
    }

    pub fn embedded(&self) -> Option<&EmbeddedInstructor> {
        match self {
            InstructorRef::Id(_) => None,
            InstructorRef::Embedded(embedded) => Some(embedded),
        }
    }
}

/// A course record as the core consumes it: recurrence window, explicit
/// sessions, enrollment and pricing inputs, and optional backend-computed
/// overrides. Externally owned; the engines treat it as read-only.
///
/// Deserialization goes through [`RawCourse`], which absorbs the legacy
/// field spellings once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawCourse")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Weekday indices, 0=Sunday..6=Saturday, sorted and deduplicated.
    pub days_of_week: Vec<u8>,
    pub range_start_time: String,
    pub range_end_time: String,
    /// Explicit per-session schedule; non-empty lists take precedence over
    /// the recurrence rule so manual edits are never clobbered.
    pub sessions: Vec<SessionSlot>,
    pub instructors: Vec<InstructorRef>,
    /// Hourly rate overrides keyed by instructor id.
    pub instructor_rates: BTreeMap<String, f64>,
    pub cost_per_student: f64,
    pub students: Option<u32>,
    /// Enrollment ids; the list length backs the student count when the
    /// numeric field is absent.
    pub enrolled: Vec<String>,
    pub materials_cost: f64,
    pub discount: Discount,
    pub total_sessions: Option<u32>,
    pub total_hours: Option<f64>,
    pub revenue: Option<f64>,
    pub instructor_expense: Option<f64>,
}

impl Course {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            location: None,
            start_date: None,
            end_date: None,
            days_of_week: Vec::new(),
            range_start_time: DEFAULT_RANGE_START.to_string(),
            range_end_time: DEFAULT_RANGE_END.to_string(),
            sessions: Vec::new(),
            instructors: Vec::new(),
            instructor_rates: BTreeMap::new(),
            cost_per_student: 0.0,
            students: None,
            enrolled: Vec::new(),
            materials_cost: 0.0,
            discount: Discount::default(),
            total_sessions: None,
            total_hours: None,
            revenue: None,
            instructor_expense: None,
        }
    }

    /// Rate from the course-level override map, if any.
    pub fn rate_override(&self, instructor_key: &str) -> Option<f64> {
        self.instructor_rates
            .get(instructor_key)
            .copied()
            .filter(|rate| rate.is_finite())
    }

    pub fn assign_instructor(&mut self, id: impl Into<String>, hourly_rate: Option<f64>) {
        let key = id.into();
        if let Some(rate) = hourly_rate {
            self.instructor_rates.insert(key.clone(), rate);
        }
        if !self.instructors.iter().any(|r| r.key() == key) {
            self.instructors.push(InstructorRef::Id(key));
        }
    }
}

/// Boundary adapter for externally supplied course documents.
///
/// Accepts the canonical snake_case shape this crate writes as well as the
/// backend's historical spellings (`startDate`, `courseDatesTimes`, `cost`,
/// string-typed numbers, the legacy `discountPct` percent field) and coerces
/// everything into [`Course`] exactly once.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCourse {
    #[serde(alias = "_id")]
    id: Option<String>,
    #[serde(alias = "name")]
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    #[serde(alias = "startDate")]
    start_date: Option<Value>,
    #[serde(alias = "endDate")]
    end_date: Option<Value>,
    #[serde(alias = "daysOfWeek")]
    days_of_week: Vec<Value>,
    #[serde(alias = "rangeStartTime")]
    range_start_time: Option<Value>,
    #[serde(alias = "rangeEndTime")]
    range_end_time: Option<Value>,
    #[serde(alias = "courseDatesTimes")]
    sessions: Vec<RawSessionSlot>,
    instructors: Vec<InstructorRef>,
    #[serde(alias = "instructorRates")]
    instructor_rates: BTreeMap<String, Value>,
    #[serde(alias = "cost", alias = "costPerStudent")]
    cost_per_student: Option<Value>,
    students: Option<Value>,
    enrolled: Vec<Value>,
    #[serde(alias = "materialsCost")]
    materials_cost: Option<Value>,
    discount: Option<Discount>,
    #[serde(alias = "discountType")]
    discount_type: Option<String>,
    #[serde(alias = "discountValue")]
    discount_value: Option<Value>,
    #[serde(alias = "discountPct")]
    discount_pct: Option<Value>,
    #[serde(alias = "totalSessions")]
    total_sessions: Option<Value>,
    #[serde(alias = "totalHours")]
    total_hours: Option<Value>,
    revenue: Option<Value>,
    #[serde(alias = "instructorExpense")]
    instructor_expense: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSlot {
    #[serde(alias = "day", alias = "sessionDate")]
    date: Option<Value>,
    #[serde(alias = "from", alias = "start")]
    start_time: Option<Value>,
    #[serde(alias = "to", alias = "end")]
    end_time: Option<Value>,
}

impl From<RawCourse> for Course {
    fn from(raw: RawCourse) -> Self {
        let (students, enrolled) = resolve_enrollment(raw.students.as_ref(), &raw.enrolled);
        Course {
            id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| "Untitled course".to_string()),
            description: raw.description.filter(|d| !d.is_empty()),
            location: raw.location.filter(|l| !l.is_empty()),
            start_date: raw.start_date.as_ref().and_then(coerce_date),
            end_date: raw.end_date.as_ref().and_then(coerce_date),
            days_of_week: coerce_days(&raw.days_of_week),
            range_start_time: coerce_time(raw.range_start_time.as_ref(), DEFAULT_RANGE_START),
            range_end_time: coerce_time(raw.range_end_time.as_ref(), DEFAULT_RANGE_END),
            sessions: raw.sessions.iter().map(normalize_slot).collect(),
            instructors: raw.instructors,
            instructor_rates: raw
                .instructor_rates
                .into_iter()
                .map(|(key, value)| (key, coerce_f64(Some(&value)).unwrap_or(0.0)))
                .collect(),
            cost_per_student: coerce_f64(raw.cost_per_student.as_ref()).unwrap_or(0.0),
            students,
            enrolled,
            materials_cost: coerce_f64(raw.materials_cost.as_ref())
                .filter(|v| *v >= 0.0)
                .unwrap_or(0.0),
            discount: resolve_discount(
                raw.discount,
                raw.discount_type.as_deref(),
                raw.discount_value.as_ref(),
                raw.discount_pct.as_ref(),
            ),
            total_sessions: coerce_f64(raw.total_sessions.as_ref())
                .filter(|v| *v >= 0.0)
                .map(|v| v as u32),
            total_hours: coerce_f64(raw.total_hours.as_ref()),
            revenue: coerce_f64(raw.revenue.as_ref()),
            instructor_expense: coerce_f64(raw.instructor_expense.as_ref()),
        }
    }
}

fn normalize_slot(raw: &RawSessionSlot) -> SessionSlot {
    let date_raw = coerce_string(raw.date.as_ref());
    let date = match parse_date_only(&date_raw) {
        Some(parsed) => date_key(parsed),
        None => date_raw.trim().to_string(),
    };
    SessionSlot {
        date,
        start_time: canonical_or_raw(&coerce_string(raw.start_time.as_ref())),
        end_time: canonical_or_raw(&coerce_string(raw.end_time.as_ref())),
    }
}

fn resolve_discount(
    canonical: Option<Discount>,
    kind: Option<&str>,
    value: Option<&Value>,
    legacy_pct: Option<&Value>,
) -> Discount {
    if let Some(discount) = canonical {
        return discount;
    }
    let kind = match kind {
        Some("amount") => DiscountType::Amount,
        _ => DiscountType::Percent,
    };
    let resolved = match coerce_f64(value) {
        Some(v) => v,
        // Legacy single-field shape: always a percentage.
        None => match coerce_f64(legacy_pct) {
            Some(pct) => return Discount::percent(pct),
            None => 0.0,
        },
    };
    Discount { kind, value: resolved }
}

fn resolve_enrollment(students: Option<&Value>, enrolled: &[Value]) -> (Option<u32>, Vec<String>) {
    let mut roster: Vec<String> = enrolled
        .iter()
        .map(|v| coerce_string(Some(v)))
        .filter(|s| !s.is_empty())
        .collect();
    match students {
        // The backend sometimes stores the roster itself under `students`.
        Some(Value::Array(list)) => {
            if roster.is_empty() {
                roster = list
                    .iter()
                    .map(|v| coerce_string(Some(v)))
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            (None, roster)
        }
        other => (
            coerce_f64(other).filter(|v| *v >= 0.0).map(|v| v as u32),
            roster,
        ),
    }
}

fn coerce_days(values: &[Value]) -> Vec<u8> {
    let mut days: Vec<u8> = values
        .iter()
        .filter_map(|v| coerce_f64(Some(v)))
        .filter(|v| (0.0..=6.0).contains(v))
        .map(|v| v as u8)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_only(s),
        _ => None,
    }
}

fn coerce_time(value: Option<&Value>, fallback: &str) -> String {
    canonical_hhmm(&coerce_string(value), fallback)
}

/// Numeric coercion shared by every monetary/count field: numbers pass
/// through when finite, strings parse with grouping commas stripped, and
/// everything else is absent.
fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let cleaned = s.trim().replace(',', "");
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
