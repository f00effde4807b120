use crate::models::Report;
use super::FormatError;

/// Serialize a Report to YAML
pub fn to_yaml(report: &Report) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
