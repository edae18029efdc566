pub mod json_backend;

use std::path::Path;

use crate::{errors::CourseError, schedule::Catalog};

pub type Result<T> = std::result::Result<T, CourseError>;

/// Abstraction over persistence backends capable of storing catalogs and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, catalog: &Catalog, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Catalog>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, catalog: &Catalog, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Catalog>;

    /// Optional helpers for ad-hoc file operations. Default implementations forward to
    /// the JSON codec when not overridden.
    fn save_to_path(&self, catalog: &Catalog, path: &Path) -> Result<()> {
        json_backend::save_catalog_to_path(catalog, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Catalog> {
        json_backend::load_catalog_from_path(path)
    }
}

pub use json_backend::JsonStorage;
