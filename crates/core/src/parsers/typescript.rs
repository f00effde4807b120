use crate::models::{DeclarationKind, RawMatch};
use regex::Regex;

use super::ParserError;

const FUNCTION_PATTERN: &str = r#"(export\s+)?(async\s+)?(function|const)\s+([a-zA-Z0-9_]+)\s*(\([^)]*\)|\s*=\s*\([^)]*\)|\s*=\s*[a-zA-Z0-9_]+\s*=>)"#;
const COMPONENT_PATTERN: &str = r#"(export\s+)?(?:function|const)\s+([a-zA-Z0-9_]+)\s*(?:\([^)]*\)|\s*=\s*\([^)]*\)|\s*=\s*[a-zA-Z0-9_]+\s*=>)\s*(?:=>)?\s*\{"#;
const HOOK_PATTERN: &str = r#"(export\s+)?(?:function|const)\s+(use[A-Z][a-zA-Z0-9_]*)"#;
const CLASS_PATTERN: &str = r#"(export\s+)?class\s+([a-zA-Z0-9_]+)"#;
const INTERFACE_PATTERN: &str = r#"(export\s+)?interface\s+([a-zA-Z0-9_]+)"#;
const DECORATOR_PATTERN: &str =
    r#"export\s+function\s+([A-Z][a-zA-Z0-9_]*(?:Module|Decorator))\b"#;
const IMPORT_PATTERN: &str =
    r#"import\s+\{?\s*([^}]*?)\s*\}?\s+from\s+['"]([^'"]+)['"]"#;

/// Marker that hides a name from the snapshot
const PRIVATE_PREFIX: char = '_';

/// A single-kind recognizer backed by one regular expression
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    kind: DeclarationKind,
    pattern: Regex,
    name_group: usize,
    source_group: Option<usize>,
}

impl PatternRecognizer {
    pub fn new(
        kind: DeclarationKind,
        pattern: &str,
        name_group: usize,
        source_group: Option<usize>,
    ) -> Result<Self, ParserError> {
        let pattern =
            Regex::new(pattern).map_err(|source| ParserError::PatternError { kind, source })?;
        Ok(Self {
            kind,
            pattern,
            name_group,
            source_group,
        })
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Every non-overlapping match over the whole text, in source order.
    /// Matches whose name group did not participate are dropped.
    pub fn recognize(&self, content: &str) -> Vec<RawMatch> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(self.name_group)?.as_str().to_string();
                let source = match self.source_group {
                    Some(group) => Some(caps.get(group)?.as_str().to_string()),
                    None => None,
                };
                Some(RawMatch {
                    kind: self.kind,
                    name,
                    start: whole.start(),
                    source,
                })
            })
            .collect()
    }

    /// Name-validity rule for this kind. For imports this applies to each
    /// comma-separated binding, not to the captured list.
    pub fn accepts_name(&self, name: &str) -> bool {
        if name.is_empty() || name.starts_with(PRIVATE_PREFIX) {
            return false;
        }
        match self.kind {
            DeclarationKind::Component => name.chars().next().is_some_and(char::is_uppercase),
            DeclarationKind::Hook => name
                .strip_prefix("use")
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase()),
            _ => true,
        }
    }
}

/// One recognizer per declaration kind, in extraction order
#[derive(Debug, Clone)]
pub struct Recognizers {
    recognizers: Vec<PatternRecognizer>,
}

impl Recognizers {
    pub fn iter(&self) -> impl Iterator<Item = &PatternRecognizer> {
        self.recognizers.iter()
    }
}

/// Compile the fixed recognizer set
pub fn create_recognizers() -> Result<Recognizers, ParserError> {
    let recognizers = vec![
        PatternRecognizer::new(DeclarationKind::Function, FUNCTION_PATTERN, 4, None)?,
        PatternRecognizer::new(DeclarationKind::Component, COMPONENT_PATTERN, 2, None)?,
        PatternRecognizer::new(DeclarationKind::Hook, HOOK_PATTERN, 2, None)?,
        PatternRecognizer::new(DeclarationKind::Class, CLASS_PATTERN, 2, None)?,
        PatternRecognizer::new(DeclarationKind::Interface, INTERFACE_PATTERN, 2, None)?,
        PatternRecognizer::new(DeclarationKind::Decorator, DECORATOR_PATTERN, 1, None)?,
        PatternRecognizer::new(DeclarationKind::Import, IMPORT_PATTERN, 1, Some(2))?,
    ];
    Ok(Recognizers { recognizers })
}
