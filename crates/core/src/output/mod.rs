mod json;
mod markdown;
mod yaml;

pub use json::to_json;
pub use markdown::to_markdown;
pub use yaml::to_yaml;

use crate::models::Report;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name shared by both snapshot files
pub const SNAPSHOT_FILE_STEM: &str = "project_snapshot";

/// Format of the structured report file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Serialize a report in the given structured format
pub fn format_output(report: &Report, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
    }
}

/// Where the two snapshot files ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub report: PathBuf,
    pub markdown: PathBuf,
}

/// Write the structured report and its markdown rendering into `dir`.
/// Existing files are overwritten.
pub fn write_snapshot(
    report: &Report,
    dir: &Path,
    format: OutputFormat,
) -> Result<SnapshotPaths, FormatError> {
    let paths = SnapshotPaths {
        report: dir.join(format!("{}.{}", SNAPSHOT_FILE_STEM, format.extension())),
        markdown: dir.join(format!("{}.md", SNAPSHOT_FILE_STEM)),
    };

    write_file(&paths.report, &format_output(report, format)?)?;
    write_file(&paths.markdown, &to_markdown(report))?;

    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), FormatError> {
    fs::write(path, contents).map_err(|source| FormatError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportEntry;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        Report {
            utilities: vec![ReportEntry {
                name: "formatDate".to_string(),
                file: "/app/src/date.ts".to_string(),
                description: "No description available".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_write_snapshot_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let paths = write_snapshot(&sample_report(), dir.path(), OutputFormat::Json).unwrap();

        assert_eq!(paths.report, dir.path().join("project_snapshot.json"));
        assert_eq!(paths.markdown, dir.path().join("project_snapshot.md"));

        let json = fs::read_to_string(&paths.report).unwrap();
        assert!(json.contains("\"utilities\""));
        let md = fs::read_to_string(&paths.markdown).unwrap();
        assert!(md.contains("## Utility Functions"));
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let report = sample_report();

        let paths = write_snapshot(&report, dir.path(), OutputFormat::Json).unwrap();
        let first = (
            fs::read(&paths.report).unwrap(),
            fs::read(&paths.markdown).unwrap(),
        );
        write_snapshot(&report, dir.path(), OutputFormat::Json).unwrap();
        let second = (
            fs::read(&paths.report).unwrap(),
            fs::read(&paths.markdown).unwrap(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_yaml_snapshot_extension() {
        let dir = TempDir::new().unwrap();
        let paths = write_snapshot(&sample_report(), dir.path(), OutputFormat::Yaml).unwrap();

        assert_eq!(paths.report, dir.path().join("project_snapshot.yaml"));
        assert!(paths.report.exists());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = write_snapshot(&sample_report(), &missing, OutputFormat::Json);
        assert!(matches!(result, Err(FormatError::WriteError { .. })));
    }
}
