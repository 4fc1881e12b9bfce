//! CLI output: error mapping and result formatting.

use crate::cli::parse::OutputFormat;
use crate::error::ApiError;
use crate::snapshot::walker::Divergence;
use crate::snapshot::Path;
use serde_json::json;
use std::collections::BTreeMap;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

/// One `<path>\t<hash>` line per subtree, or a JSON object with `--format json`.
pub fn format_hashes(hashes: &BTreeMap<Path, String>, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        let map: serde_json::Map<String, serde_json::Value> = hashes
            .iter()
            .map(|(path, hash)| (path.to_string(), json!(hash)))
            .collect();
        return serde_json::Value::Object(map).to_string();
    }
    hashes
        .iter()
        .map(|(path, hash)| format!("{}\t{}", path, hash))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_divergences(divergences: &[Divergence]) -> String {
    if divergences.is_empty() {
        return "No divergence".to_string();
    }
    divergences
        .iter()
        .map(|d| format!("{}\tlocal={}\tremote={}", d.path, d.local, d.remote))
        .collect::<Vec<_>>()
        .join("\n")
}
