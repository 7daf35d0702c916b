//! JSON snapshot codec with schema validation.
//!
//! Loading is all-or-nothing: the text must deserialize into the typed
//! [`Project`] tree (unknown fields rejected) and then pass [`validate`]
//! before anything is handed back. A failed load never yields a partial
//! project.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::HashSet;

use uuid::Uuid;

use crate::doc::Project;

/// Why a snapshot could not be loaded or saved.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The text is not a structurally valid project document.
    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The project could not be written out.
    #[error("snapshot encode failed: {0}")]
    Encode(serde_json::Error),

    /// A project needs at least one page.
    #[error("snapshot has no pages")]
    NoPages,

    /// `currentPageIndex` does not point at a page.
    #[error("current page index {index} out of range ({len} pages)")]
    CurrentPageOutOfRange { index: usize, len: usize },

    /// Two entities share an id.
    #[error("duplicate id {0}")]
    DuplicateId(Uuid),

    /// A bounded numeric field holds a value outside its range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Parse and validate a project snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the text is malformed or the resulting tree
/// breaks a document invariant.
pub fn from_json(text: &str) -> Result<Project, SnapshotError> {
    let project: Project = serde_json::from_str(text)?;
    validate(&project)?;
    Ok(project)
}

/// Serialize a project as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn to_json(project: &Project) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(project).map_err(SnapshotError::Encode)
}

/// Check the invariants serde cannot express.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate(project: &Project) -> Result<(), SnapshotError> {
    if project.pages.is_empty() {
        return Err(SnapshotError::NoPages);
    }
    if project.current_page_index >= project.pages.len() {
        return Err(SnapshotError::CurrentPageOutOfRange {
            index: project.current_page_index,
            len: project.pages.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut claim = |id: Uuid| if seen.insert(id) { Ok(()) } else { Err(SnapshotError::DuplicateId(id)) };

    claim(project.id)?;
    for page in &project.pages {
        claim(page.id)?;
        for panel in &page.panels {
            claim(panel.id)?;
            check_unit("panel opacity", panel.opacity)?;
            check_non_negative("panel borderWidth", panel.border_width)?;
            for obj in &panel.objects {
                claim(obj.id)?;
                check_unit("object opacity", obj.opacity)?;
                if let Some(width) = obj.border_width {
                    check_non_negative("object borderWidth", width)?;
                }
            }
        }
    }
    Ok(())
}

fn check_unit(field: &'static str, value: f64) -> Result<(), SnapshotError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(SnapshotError::OutOfRange { field, value }) }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SnapshotError> {
    if value >= 0.0 { Ok(()) } else { Err(SnapshotError::OutOfRange { field, value }) }
}
