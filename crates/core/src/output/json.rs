use crate::models::Report;
use super::FormatError;

/// Serialize a Report to pretty-printed JSON (two-space indent)
pub fn to_json(report: &Report) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}
