use crate::config::{SnapshotConfig, DEFAULT_CORE_MODULE_KEYWORDS, DEFAULT_UTILITY_KEYWORDS};
use crate::models::{CoreModuleEntry, DeclarationRecord, FileRecord, Report, ReportEntry};

/// A declaration tagged with the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDeclaration {
    pub name: String,
    pub file: String,
    pub description: String,
}

impl FlatDeclaration {
    fn new(record: &DeclarationRecord, file: &str) -> Self {
        Self {
            name: record.name.clone(),
            file: file.to_string(),
            description: record.description.clone(),
        }
    }

    fn to_entry(&self) -> ReportEntry {
        ReportEntry {
            name: self.name.clone(),
            file: self.file.clone(),
            description: self.description.clone(),
        }
    }
}

/// Per-category declarations across the whole project
#[derive(Debug, Clone, Default)]
pub struct FlattenedDeclarations {
    pub components: Vec<FlatDeclaration>,
    pub hooks: Vec<FlatDeclaration>,
    pub functions: Vec<FlatDeclaration>,
    pub classes: Vec<FlatDeclaration>,
    pub interfaces: Vec<FlatDeclaration>,
}

/// Concatenate each category across files, keeping file order and the
/// order within each file
pub fn flatten(records: &[FileRecord]) -> FlattenedDeclarations {
    let mut flat = FlattenedDeclarations::default();

    for file in records {
        let path = file.path.as_str();
        flat.components
            .extend(file.components.iter().map(|d| FlatDeclaration::new(d, path)));
        flat.hooks
            .extend(file.hooks.iter().map(|d| FlatDeclaration::new(d, path)));
        flat.functions
            .extend(file.functions.iter().map(|d| FlatDeclaration::new(d, path)));
        flat.classes
            .extend(file.classes.iter().map(|d| FlatDeclaration::new(d, path)));
        flat.interfaces
            .extend(file.interfaces.iter().map(|d| FlatDeclaration::new(d, path)));
    }

    flat
}

/// Buckets extracted declarations into the final [`Report`]
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    core_module_keywords: Vec<String>,
    utility_keywords: Vec<String>,
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::with_keywords(
            DEFAULT_CORE_MODULE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_UTILITY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl SummaryBuilder {
    pub fn new(config: &SnapshotConfig) -> Self {
        Self::with_keywords(
            config.core_module_keywords.clone(),
            config.utility_keywords.clone(),
        )
    }

    pub fn with_keywords(core_module_keywords: Vec<String>, utility_keywords: Vec<String>) -> Self {
        let lower = |v: Vec<String>| -> Vec<String> {
            v.into_iter().map(|k| k.to_lowercase()).collect()
        };
        Self {
            core_module_keywords: lower(core_module_keywords),
            utility_keywords: lower(utility_keywords),
        }
    }

    pub fn build(&self, records: &[FileRecord]) -> Report {
        let flat = flatten(records);
        let mut report = Report::default();

        // one entry per matching keyword, so a class can appear more than once
        for class in &flat.classes {
            for _ in Self::keyword_hits(&self.core_module_keywords, class) {
                report.core_modules.push(CoreModuleEntry {
                    name: class.name.clone(),
                    kind: "class".to_string(),
                    file: class.file.clone(),
                    description: class.description.clone(),
                });
            }
        }

        report.components = flat.components.iter().map(FlatDeclaration::to_entry).collect();
        report.hooks = flat.hooks.iter().map(FlatDeclaration::to_entry).collect();

        for function in &flat.functions {
            for _ in Self::keyword_hits(&self.utility_keywords, function) {
                report.utilities.push(function.to_entry());
            }
        }

        report.types = flat.interfaces.iter().map(FlatDeclaration::to_entry).collect();

        report
    }

    /// Keywords found in either the name or the file path, case-insensitively
    fn keyword_hits<'a>(
        keywords: &'a [String],
        declaration: &FlatDeclaration,
    ) -> impl Iterator<Item = &'a String> {
        let name = declaration.name.to_lowercase();
        let file = declaration.file.to_lowercase();
        keywords
            .iter()
            .filter(move |k| name.contains(k.as_str()) || file.contains(k.as_str()))
    }
}
