use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::model::Project;

/// Parse a whole `.saywhat` file into a `Project`.
///
/// The file is editor-written JSON: a `savedWithVersion` stamp and a
/// top-level `sequences` array. Files from older editors may omit the
/// stamp or per-node `lines`/`responses` arrays; those load as empty
/// rather than failing.
pub fn load(json: &str) -> Result<Project> {
    // Grab the entire file as a dynamic value first.
    let root: Value = serde_json::from_str(json)?;

    let document = root
        .as_object()
        .ok_or_else(|| anyhow!("project file is not a JSON object"))?;
    if !document.contains_key("sequences") {
        return Err(anyhow!("project file has no `sequences` array"));
    }

    let project = serde_json::from_value(root)?;
    Ok(project)
}
