use std::{fs, path::Path};

use crate::{errors::CourseError, schedule::Catalog};

/// Writes the provided catalog to disk atomically by staging to a temporary file.
pub fn save_catalog_to_file(catalog: &Catalog, path: &Path) -> Result<(), CourseError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a catalog snapshot from disk, returning structured errors on failure.
pub fn load_catalog_from_file(path: &Path) -> Result<Catalog, CourseError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
