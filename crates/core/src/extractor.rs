use crate::models::{DeclarationKind, DeclarationRecord, FileRecord, ImportRecord, RawMatch};
use crate::parsers::{create_recognizers, CommentLocator, ParserError, PatternRecognizer, Recognizers};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs every recognizer over one file and builds its [`FileRecord`]
#[derive(Debug, Clone)]
pub struct FileExtractor {
    recognizers: Recognizers,
    comments: CommentLocator,
}

impl FileExtractor {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            recognizers: create_recognizers()?,
            comments: CommentLocator::new()?,
        })
    }

    /// Read a file as UTF-8 text and extract it
    pub fn extract(&self, path: &Path) -> Result<FileRecord, ExtractError> {
        let content = fs::read_to_string(path).map_err(|source| ExtractError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_source(&path.to_string_lossy(), &content))
    }

    /// Extract already-loaded content, recording `path` as given
    pub fn extract_source(&self, path: &str, content: &str) -> FileRecord {
        let mut record = FileRecord::new(path);

        for recognizer in self.recognizers.iter() {
            let matches = recognizer.recognize(content);
            trace!(
                path,
                kind = recognizer.kind().as_str(),
                matches = matches.len(),
                "Recognized"
            );
            match recognizer.kind() {
                DeclarationKind::Import => {
                    record.imports.extend(Self::import_records(recognizer, matches));
                }
                kind => {
                    let declarations = self.declaration_records(recognizer, content, matches);
                    if let Some(list) = record.declarations_mut(kind) {
                        list.extend(declarations);
                    }
                }
            }
        }

        record
    }

    fn declaration_records(
        &self,
        recognizer: &PatternRecognizer,
        content: &str,
        matches: Vec<RawMatch>,
    ) -> Vec<DeclarationRecord> {
        matches
            .into_iter()
            .filter(|m| recognizer.accepts_name(&m.name))
            .map(|m| {
                let comment = self.comments.locate(content, m.start);
                let description = if comment.is_empty() {
                    m.kind.fallback_description().to_string()
                } else {
                    comment
                };
                DeclarationRecord {
                    name: m.name,
                    description,
                }
            })
            .collect()
    }

    fn import_records(recognizer: &PatternRecognizer, matches: Vec<RawMatch>) -> Vec<ImportRecord> {
        let mut imports = Vec::new();
        for m in matches {
            let Some(source) = m.source else {
                continue;
            };
            let bindings = m.name.trim();
            if bindings.is_empty() || source.is_empty() {
                continue;
            }
            for item in bindings.split(',').map(str::trim) {
                if recognizer.accepts_name(item) {
                    imports.push(ImportRecord {
                        name: item.to_string(),
                        source: source.clone(),
                    });
                }
            }
        }
        imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn extract(content: &str) -> FileRecord {
        FileExtractor::new()
            .unwrap()
            .extract_source("src/sample.ts", content)
    }

    #[test]
    fn test_plain_exported_function() {
        let record = extract("export function formatDate(d) { return d; }");

        assert_eq!(record.path, "src/sample.ts");
        assert_eq!(
            record.functions,
            vec![DeclarationRecord {
                name: "formatDate".to_string(),
                description: "No description available".to_string(),
            }]
        );
        assert!(record.components.is_empty());
        assert!(record.classes.is_empty());
        assert!(record.imports.is_empty());

        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_doc_comment_becomes_description() {
        let record = extract(
            r#"
/**
 * Custom hook for pipeline simulation
 */
export const usePipelineSimulation = () => {
  return null;
};
"#,
        );

        assert_eq!(record.hooks.len(), 1);
        assert_eq!(record.hooks[0].name, "usePipelineSimulation");
        assert_eq!(
            record.hooks[0].description,
            "Custom hook for pipeline simulation"
        );
        // the same span is also a function, and both records are kept
        assert_eq!(record.functions[0].name, "usePipelineSimulation");
        assert_eq!(
            record.functions[0].description,
            "Custom hook for pipeline simulation"
        );
    }

    #[test]
    fn test_fallback_descriptions_per_kind() {
        let record = extract(
            r#"
export interface Props { title: string }
export const StatsCard = (props) => {
  return null;
};
export function useStats() {}
export class Loader {}
export function ExperimentModule(info) {}
"#,
        );

        assert_eq!(record.interfaces[0].description, "TypeScript interface");
        assert_eq!(record.components[0].description, "React component");
        assert_eq!(record.hooks[0].description, "React hook");
        assert_eq!(record.classes[0].description, "No description available");
        assert_eq!(record.decorators[0].description, "Decorator function");
    }

    #[test]
    fn test_import_bindings_expand() {
        let record = extract(
            r#"
import { useState, useEffect, _private } from 'react';
import Papa from "papaparse";
export function parse() {}
"#,
        );

        let imported: Vec<(&str, &str)> = record
            .imports
            .iter()
            .map(|i| (i.name.as_str(), i.source.as_str()))
            .collect();
        assert_eq!(
            imported,
            vec![
                ("useState", "react"),
                ("useEffect", "react"),
                ("Papa", "papaparse"),
            ]
        );
    }

    #[test]
    fn test_imports_only_file_has_no_declarations() {
        let record = extract("import { a } from './a';\nimport b from './b';");

        assert_eq!(record.imports.len(), 2);
        assert!(!record.has_declarations());
    }

    #[test]
    fn test_extract_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "export class UserStore {{}}").unwrap();

        let record = FileExtractor::new().unwrap().extract(file.path()).unwrap();
        assert_eq!(record.path, file.path().to_string_lossy());
        assert_eq!(record.classes[0].name, "UserStore");
    }

    #[test]
    fn test_extract_rejects_non_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x63]).unwrap();

        let result = FileExtractor::new().unwrap().extract(file.path());
        assert!(matches!(result, Err(ExtractError::ReadError { .. })));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = FileExtractor::new()
            .unwrap()
            .extract(Path::new("/definitely/not/here.ts"));
        assert!(result.is_err());
    }
}
