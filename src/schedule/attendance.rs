use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Attendance record for one course: instructor id mapped to the session
/// keys that instructor was present for.
///
/// Serializes as `{ "<instructor-id>": ["2024-01-03", ...] }`, the shape
/// the attendance endpoint and its local fallback store both use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AttendanceSheet(BTreeMap<String, BTreeSet<String>>);

impl AttendanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_present(&self, instructor_id: &str, session_key: &str) -> bool {
        self.0
            .get(instructor_id)
            .is_some_and(|keys| keys.contains(session_key))
    }

    /// Session keys marked present for an instructor, in sorted order.
    pub fn present_keys(&self, instructor_id: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(instructor_id)
            .into_iter()
            .flat_map(|keys| keys.iter().map(String::as_str))
    }

    pub fn present_count(&self, instructor_id: &str) -> usize {
        self.0.get(instructor_id).map_or(0, BTreeSet::len)
    }

    pub fn mark(&mut self, instructor_id: impl Into<String>, session_key: impl Into<String>) {
        self.0
            .entry(instructor_id.into())
            .or_default()
            .insert(session_key.into());
    }

    /// Flips one session for one instructor, returning the new state.
    pub fn toggle(&mut self, instructor_id: &str, session_key: &str) -> bool {
        let keys = self.0.entry(instructor_id.to_string()).or_default();
        if keys.remove(session_key) {
            false
        } else {
            keys.insert(session_key.to_string());
            true
        }
    }

    pub fn mark_all<I, K>(&mut self, instructor_id: impl Into<String>, session_keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys = self.0.entry(instructor_id.into()).or_default();
        keys.clear();
        keys.extend(session_keys.into_iter().map(Into::into));
    }

    pub fn clear(&mut self, instructor_id: &str) {
        self.0.remove(instructor_id);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}
