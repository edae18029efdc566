use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An instructor profile as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Instructor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Default hourly pay rate; course-level overrides win over this.
    #[serde(alias = "hourly_rate", alias = "ratePerHour", alias = "payPerHour")]
    pub rate_per_hour: f64,
}

impl Default for Instructor {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: None,
            rate_per_hour: 0.0,
        }
    }
}

impl Instructor {
    pub fn new(name: impl Into<String>, rate_per_hour: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: None,
            rate_per_hour,
        }
    }

    /// Display label: name, else the email local part, else the id.
    pub fn label(&self) -> String {
        let trimmed = self.name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
        if let Some(email) = self.email.as_deref() {
            if let Some(local) = email.split('@').next() {
                if !local.is_empty() {
                    return local.to_string();
                }
            }
        }
        self.id.clone()
    }
}
