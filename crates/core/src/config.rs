use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory names whose whole subtree is never visited
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", "public", ".git"];

/// File name suffixes that mark a file as source
pub const DEFAULT_SOURCE_SUFFIXES: &[&str] = &[".ts", ".tsx"];

/// Suffixes that disqualify a file even if it looks like source
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[".d.ts", ".test.ts", ".spec.ts"];

/// Keywords that promote a class to a core module
pub const DEFAULT_CORE_MODULE_KEYWORDS: &[&str] =
    &["loader", "registry", "store", "context", "provider"];

/// Keywords that mark a function as a utility
pub const DEFAULT_UTILITY_KEYWORDS: &[&str] = &["util", "helper", "format", "validate", "transform"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
    #[error("Failed to parse gitignore: {0}")]
    GitignoreError(#[from] ignore::Error),
    #[error("Failed to parse config file {path}: {source}")]
    TomlError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// What to do with a source file that cannot be read as UTF-8 text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run with the read error
    #[default]
    Abort,
    /// Log a warning, count the file as skipped and keep going
    Skip,
}

/// Configuration for a snapshot run
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Directory names pruned from the walk
    pub excluded_dirs: Vec<String>,
    /// Accepted file name suffixes
    pub source_suffixes: Vec<String>,
    /// Rejected file name suffixes, checked after `source_suffixes`
    pub excluded_suffixes: Vec<String>,
    /// Keywords for the core module bucket
    pub core_module_keywords: Vec<String>,
    /// Keywords for the utilities bucket
    pub utility_keywords: Vec<String>,
    /// Additional ignore patterns (glob style)
    pub ignore_patterns: Vec<String>,
    /// Honor `<root>/.gitignore`
    pub respect_gitignore: bool,
    /// Handling of unreadable files
    pub error_policy: ErrorPolicy,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            excluded_dirs: owned(DEFAULT_EXCLUDED_DIRS),
            source_suffixes: owned(DEFAULT_SOURCE_SUFFIXES),
            excluded_suffixes: owned(DEFAULT_EXCLUDED_SUFFIXES),
            core_module_keywords: owned(DEFAULT_CORE_MODULE_KEYWORDS),
            utility_keywords: owned(DEFAULT_UTILITY_KEYWORDS),
            ignore_patterns: vec![],
            respect_gitignore: false,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl SnapshotConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_utility_keywords(mut self, keywords: Vec<String>) -> Self {
        self.utility_keywords = keywords;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Apply overrides from a TOML file on top of the current values
    pub fn load_overrides(self, path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let overrides: ConfigOverrides =
            toml::from_str(&text).map_err(|source| ConfigError::TomlError {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(overrides.apply(self))
    }
}

/// Optional keys accepted in a snapshot TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub excluded_dirs: Option<Vec<String>>,
    pub source_suffixes: Option<Vec<String>>,
    pub excluded_suffixes: Option<Vec<String>>,
    pub core_module_keywords: Option<Vec<String>>,
    pub utility_keywords: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub respect_gitignore: Option<bool>,
    pub on_unreadable: Option<ErrorPolicy>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: SnapshotConfig) -> SnapshotConfig {
        if let Some(v) = self.excluded_dirs {
            config.excluded_dirs = v;
        }
        if let Some(v) = self.source_suffixes {
            config.source_suffixes = v;
        }
        if let Some(v) = self.excluded_suffixes {
            config.excluded_suffixes = v;
        }
        if let Some(v) = self.core_module_keywords {
            config.core_module_keywords = v;
        }
        if let Some(v) = self.utility_keywords {
            config.utility_keywords = v;
        }
        if let Some(v) = self.ignore_patterns {
            config.ignore_patterns = v;
        }
        if let Some(v) = self.respect_gitignore {
            config.respect_gitignore = v;
        }
        if let Some(v) = self.on_unreadable {
            config.error_policy = v;
        }
        config
    }
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    excluded_dirs: HashSet<String>,
    source_suffixes: Vec<String>,
    excluded_suffixes: Vec<String>,
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
}

impl IgnoreFilter {
    pub fn new(config: &SnapshotConfig) -> Result<Self, ConfigError> {
        let gitignore = if config.respect_gitignore {
            let gitignore_path = config.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&config.root);
                builder.add(&gitignore_path);
                Some(builder.build()?)
            } else {
                None
            }
        } else {
            None
        };

        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        Ok(Self {
            excluded_dirs: config.excluded_dirs.iter().cloned().collect(),
            source_suffixes: config.source_suffixes.clone(),
            excluded_suffixes: config.excluded_suffixes.clone(),
            gitignore,
            custom_globs,
        })
    }

    /// Whether a directory (and everything under it) is pruned
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name() {
            if self.excluded_dirs.contains(&*name.to_string_lossy()) {
                return true;
            }
        }
        self.matches_ignore_rules(path, true)
    }

    /// Whether a file passes the suffix rules and the ignore rules
    pub fn accepts_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        self.accepts_file_name(&name.to_string_lossy()) && !self.matches_ignore_rules(path, false)
    }

    /// Suffix check on a bare file name
    pub fn accepts_file_name(&self, name: &str) -> bool {
        self.source_suffixes.iter().any(|s| name.ends_with(s.as_str()))
            && !self.excluded_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    fn matches_ignore_rules(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}
