use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of declaration a recognizer looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `function foo()` or `const foo = (...)`
    Function,
    /// Capitalized function/const whose parameter list opens a block
    Component,
    /// `useSomething` bindings
    Hook,
    Class,
    Interface,
    /// Exported `FooModule` / `FooDecorator` factory functions
    Decorator,
    Import,
}

impl DeclarationKind {
    /// Key used for this kind inside a [`FileRecord`]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "functions",
            DeclarationKind::Component => "components",
            DeclarationKind::Hook => "hooks",
            DeclarationKind::Class => "classes",
            DeclarationKind::Interface => "interfaces",
            DeclarationKind::Decorator => "decorators",
            DeclarationKind::Import => "imports",
        }
    }

    /// Description used when no doc comment can be attributed
    pub fn fallback_description(&self) -> &'static str {
        match self {
            DeclarationKind::Function | DeclarationKind::Class => "No description available",
            DeclarationKind::Component => "React component",
            DeclarationKind::Hook => "React hook",
            DeclarationKind::Interface => "TypeScript interface",
            DeclarationKind::Decorator => "Decorator function",
            DeclarationKind::Import => "",
        }
    }
}

/// A single recognizer hit, before name filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub kind: DeclarationKind,
    /// Captured identifier (the raw binding list for imports)
    pub name: String,
    /// Byte offset of the start of the whole match
    pub start: usize,
    /// Quoted module path, imports only
    pub source: Option<String>,
}

/// A recognized declaration with its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub name: String,
    pub description: String,
}

/// One imported name and the raw path it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub name: String,
    pub source: String,
}

/// Everything extracted from one source file
///
/// Empty categories are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<DeclarationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportRecord>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Declaration list for a kind. Imports have their own record type and
    /// yield `None`.
    pub(crate) fn declarations_mut(
        &mut self,
        kind: DeclarationKind,
    ) -> Option<&mut Vec<DeclarationRecord>> {
        match kind {
            DeclarationKind::Function => Some(&mut self.functions),
            DeclarationKind::Component => Some(&mut self.components),
            DeclarationKind::Hook => Some(&mut self.hooks),
            DeclarationKind::Class => Some(&mut self.classes),
            DeclarationKind::Interface => Some(&mut self.interfaces),
            DeclarationKind::Decorator => Some(&mut self.decorators),
            DeclarationKind::Import => None,
        }
    }

    /// Number of non-import declarations
    pub fn declaration_count(&self) -> usize {
        self.functions.len()
            + self.classes.len()
            + self.interfaces.len()
            + self.components.len()
            + self.hooks.len()
            + self.decorators.len()
    }

    /// Whether the scanner should keep this file. Imports alone don't count.
    pub fn has_declarations(&self) -> bool {
        self.declaration_count() > 0
    }
}

/// Core module entry, always tagged as a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreModuleEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub file: String,
    pub description: String,
}

/// Entry in one of the plain report categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub file: String,
    pub description: String,
}

/// Classified project summary written to the snapshot files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_modules: Vec<CoreModuleEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ReportEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<ReportEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub utilities: Vec<ReportEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ReportEntry>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.core_modules.is_empty()
            && self.components.is_empty()
            && self.hooks.is_empty()
            && self.utilities.is_empty()
            && self.types.is_empty()
    }

    /// Total number of entries across all categories
    pub fn entry_count(&self) -> usize {
        self.core_modules.len()
            + self.components.len()
            + self.hooks.len()
            + self.utilities.len()
            + self.types.len()
    }
}

/// Counters collected while walking the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files that passed the directory and suffix filters
    pub files_visited: usize,
    /// Files read and run through the extractor
    pub files_extracted: usize,
    /// Files kept because they had at least one declaration
    pub files_retained: usize,
    /// Unreadable files skipped under the skip policy
    pub files_skipped: usize,
}

/// Result of scanning one project root
#[derive(Debug, Clone)]
pub struct ProjectScan {
    pub root: PathBuf,
    pub files: Vec<FileRecord>,
    pub stats: ScanStats,
}
