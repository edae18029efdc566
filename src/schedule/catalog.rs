use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::Course;
use super::instructor::Instructor;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted unit: every course and instructor profile one business
/// manages, plus bookkeeping stamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Catalog::schema_version_default")]
    pub schema_version: u8,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            courses: Vec::new(),
            instructors: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_course(&mut self, course: Course) -> String {
        let id = course.id.clone();
        self.courses.push(course);
        self.touch();
        id
    }

    pub fn add_instructor(&mut self, instructor: Instructor) -> String {
        let id = instructor.id.clone();
        self.instructors.push(instructor);
        self.touch();
        id
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructors.iter().find(|instructor| instructor.id == id)
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Non-fatal referential checks run after a catalog is loaded.
pub fn catalog_warnings(catalog: &Catalog) -> Vec<String> {
    let known: std::collections::HashSet<&str> = catalog
        .instructors
        .iter()
        .map(|instructor| instructor.id.as_str())
        .collect();
    let mut warnings = Vec::new();

    for course in &catalog.courses {
        for reference in &course.instructors {
            let key = reference.key();
            if key.is_empty() {
                warnings.push(format!(
                    "course {} carries an instructor reference with no id",
                    course.id
                ));
            } else if !known.contains(key.as_str()) {
                warnings.push(format!(
                    "course {} references unknown instructor {}",
                    course.id, key
                ));
            }
        }
        for rate_key in course.instructor_rates.keys() {
            if !course.instructors.iter().any(|r| &r.key() == rate_key) {
                warnings.push(format!(
                    "course {} has a rate for unassigned instructor {}",
                    course.id, rate_key
                ));
            }
        }
    }
    warnings
}
