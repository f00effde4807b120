//! MTA Rust Snapshot Core Library
//!
//! This library scans a TypeScript/React source tree and produces a condensed
//! snapshot of its structure, meant to orient a reader who has never seen the
//! codebase.
//!
//! # Features
//!
//! - Pattern-based recognizers for functions, components, hooks, classes,
//!   interfaces, decorator factories and imports (no AST, best effort)
//! - Nearest-preceding `/** ... */` comment attached as the description
//! - Keyword classification into core modules and utilities
//! - Output as JSON or YAML plus a markdown rendering
//!
//! # Example
//!
//! ```no_run
//! use mta_rust_snapshot_core::{generate_snapshot, write_snapshot, OutputFormat, SnapshotConfig};
//! use std::path::PathBuf;
//!
//! let config = SnapshotConfig::new(PathBuf::from("."));
//! let (_scan, report) = generate_snapshot(config).unwrap();
//!
//! let paths = write_snapshot(&report, &PathBuf::from("."), OutputFormat::Json).unwrap();
//! println!("{}", paths.report.display());
//! ```

pub mod config;
pub mod extractor;
pub mod models;
pub mod output;
pub mod parsers;
pub mod scanner;
pub mod summary;

// Re-exports for convenience
pub use config::{ConfigError, ErrorPolicy, SnapshotConfig};
pub use extractor::{ExtractError, FileExtractor};
pub use models::*;
pub use output::{
    format_output, to_markdown, write_snapshot, FormatError, OutputFormat, SnapshotPaths,
};
pub use parsers::{CommentLocator, ParserError};
pub use scanner::{ProjectScanner, ScanError};
pub use summary::SummaryBuilder;

/// Scan the configured root and classify the result
pub fn generate_snapshot(config: SnapshotConfig) -> Result<(ProjectScan, Report), ScanError> {
    let builder = SummaryBuilder::new(&config);
    let scan = ProjectScanner::new(config)?.scan()?;
    let report = builder.build(&scan.files);
    Ok((scan, report))
}
