//! Sample file loading.
//!
//! `.json` files hold an array of strings; any other file is read as one
//! item per non-blank line.

use labeldesk_core::{Result, SampleSource};
use std::path::Path;

pub fn load_samples(path: &Path) -> Result<SampleSource> {
    let raw = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let items: Vec<String> = if is_json {
        serde_json::from_str(&raw)?
    } else {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };

    tracing::info!(path = %path.display(), count = items.len(), "samples loaded");
    SampleSource::new(items)
}
