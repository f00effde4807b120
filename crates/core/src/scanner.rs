use crate::config::{ErrorPolicy, IgnoreFilter, SnapshotConfig};
use crate::extractor::{ExtractError, FileExtractor};
use crate::models::{ProjectScan, ScanStats};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("Parser error: {0}")]
    Parser(#[from] crate::parsers::ParserError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Walks a project tree and collects a [`FileRecord`] per file that has
/// at least one declaration
pub struct ProjectScanner {
    config: SnapshotConfig,
    ignore_filter: IgnoreFilter,
    extractor: FileExtractor,
}

impl ProjectScanner {
    pub fn new(config: SnapshotConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        let extractor = FileExtractor::new()?;
        Ok(Self {
            config,
            ignore_filter,
            extractor,
        })
    }

    /// Scan the project sequentially in file-name order
    pub fn scan(&self) -> Result<ProjectScan, ScanError> {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        // the root itself is never pruned, only directories below it
        let walker = WalkDir::new(&self.config.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !self.ignore_filter.is_excluded_dir(e.path())
            });

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            // symlinks to directories are reported as non-dirs when links
            // are not followed; only regular file targets are read
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if !self.ignore_filter.accepts_file(path) {
                continue;
            }
            stats.files_visited += 1;

            let record = match self.extractor.extract(path) {
                Ok(record) => record,
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Abort => return Err(e.into()),
                    ErrorPolicy::Skip => {
                        warn!("Skipping unreadable file: {}", e);
                        stats.files_skipped += 1;
                        continue;
                    }
                },
            };
            stats.files_extracted += 1;

            debug!(
                path = %path.display(),
                declarations = record.declaration_count(),
                imports = record.imports.len(),
                "Extracted file"
            );

            if record.has_declarations() {
                stats.files_retained += 1;
                files.push(record);
            }
        }

        info!(
            visited = stats.files_visited,
            retained = stats.files_retained,
            skipped = stats.files_skipped,
            "Scan complete"
        );

        Ok(ProjectScan {
            root: self.config.root.clone(),
            files,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn scan(root: &Path) -> ProjectScan {
        ProjectScanner::new(SnapshotConfig::new(root.to_path_buf()))
            .unwrap()
            .scan()
            .unwrap()
    }

    fn scanned_names(result: &ProjectScan) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| {
                Path::new(&f.path)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_scanner_creation() {
        let scanner = ProjectScanner::new(SnapshotConfig::default());
        assert!(scanner.is_ok());
    }

    #[test]
    fn test_import_only_files_are_dropped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/index.ts", "import { App } from './App';\n");
        write(dir.path(), "src/App.tsx", "export function App() {\n  return null;\n}\n");

        let result = scan(dir.path());

        assert_eq!(scanned_names(&result), vec!["App.tsx"]);
        assert_eq!(result.stats.files_visited, 2);
        assert_eq!(result.stats.files_extracted, 2);
        assert_eq!(result.stats.files_retained, 1);
    }

    #[test]
    fn test_excluded_directories_are_never_visited() {
        let dir = TempDir::new().unwrap();
        let body = "export function visible() {}\n";
        write(dir.path(), "src/keep.ts", body);
        write(dir.path(), "node_modules/pkg/index.ts", body);
        write(dir.path(), "src/deep/dist/out.ts", body);
        write(dir.path(), "build/gen.ts", body);
        write(dir.path(), "public/asset.ts", body);
        write(dir.path(), ".git/hooks/x.ts", body);

        let result = scan(dir.path());

        assert_eq!(scanned_names(&result), vec!["keep.ts"]);
        assert_eq!(result.stats.files_visited, 1);
    }

    #[test]
    fn test_suffix_filter() {
        let dir = TempDir::new().unwrap();
        let body = "export function visible() {}\n";
        write(dir.path(), "a.ts", body);
        write(dir.path(), "b.tsx", body);
        write(dir.path(), "c.d.ts", body);
        write(dir.path(), "d.test.ts", body);
        write(dir.path(), "e.spec.ts", body);
        write(dir.path(), "f.js", body);

        let result = scan(dir.path());

        assert_eq!(scanned_names(&result), vec!["a.ts", "b.tsx"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let body = "export class Thing {}\n";
        write(dir.path(), "zeta.ts", body);
        write(dir.path(), "alpha.ts", body);
        write(dir.path(), "mid/beta.ts", body);

        let first = scan(dir.path());
        let second = scan(dir.path());

        assert_eq!(scanned_names(&first), vec!["alpha.ts", "beta.ts", "zeta.ts"]);
        assert_eq!(first.files, second.files);
    }

    #[test]
    fn test_unreadable_file_aborts_by_default() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.ts", "export class Good {}\n");
        fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0xfd]).unwrap();

        let result = ProjectScanner::new(SnapshotConfig::new(dir.path().to_path_buf()))
            .unwrap()
            .scan();

        assert!(matches!(result, Err(ScanError::Extract(_))));
    }

    #[test]
    fn test_unreadable_file_skipped_under_skip_policy() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.ts", "export class Good {}\n");
        fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0xfd]).unwrap();

        let config = SnapshotConfig::new(dir.path().to_path_buf())
            .with_error_policy(ErrorPolicy::Skip);
        let result = ProjectScanner::new(config).unwrap().scan().unwrap();

        assert_eq!(scanned_names(&result), vec!["good.ts"]);
        assert_eq!(result.stats.files_skipped, 1);
        assert_eq!(result.stats.files_visited, 2);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let config = SnapshotConfig::new(PathBuf::from("/definitely/not/a/project"));
        let result = ProjectScanner::new(config).unwrap().scan();

        assert!(matches!(result, Err(ScanError::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_with_source_suffix_is_not_read() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "real/a.ts", "export class Thing {}\n");
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link.ts")).unwrap();

        let result = scan(dir.path());

        assert_eq!(scanned_names(&result), vec!["a.ts"]);
        assert_eq!(result.stats.files_visited, 1);
        assert_eq!(result.stats.files_skipped, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_file_is_read() {
        let dir = TempDir::new().unwrap();
        let target = write(dir.path(), "real/impl.txt", "export class Linked {}\n");
        std::os::unix::fs::symlink(target, dir.path().join("linked.ts")).unwrap();

        let result = scan(dir.path());

        assert_eq!(scanned_names(&result), vec!["linked.ts"]);
        assert_eq!(result.files[0].classes[0].name, "Linked");
    }

    #[test]
    fn test_gitignore_is_opt_in() {
        let dir = TempDir::new().unwrap();
        let body = "export class Thing {}\n";
        write(dir.path(), ".gitignore", "generated/\n");
        write(dir.path(), "generated/api.ts", body);
        write(dir.path(), "src/app.ts", body);

        assert_eq!(scanned_names(&scan(dir.path())), vec!["api.ts", "app.ts"]);

        let config =
            SnapshotConfig::new(dir.path().to_path_buf()).with_respect_gitignore(true);
        let result = ProjectScanner::new(config).unwrap().scan().unwrap();
        assert_eq!(scanned_names(&result), vec!["app.ts"]);
    }
}
