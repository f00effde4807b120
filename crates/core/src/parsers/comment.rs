use regex::Regex;

use super::ParserError;

const DOC_COMMENT_PATTERN: &str = r"/\*\*\s*([\s\S]*?)\s*\*/";
const DECORATION_PATTERN: &str = r"(?m)^(?:[ \t]*\*)+|\*+[ \t]*\z";
const WHITESPACE_PATTERN: &str = r"\s+";

/// Finds the `/** ... */` block nearest before an offset.
///
/// Attribution is positional only: the last doc comment anywhere before the
/// declaration wins, even when it documents some other statement further up
/// the file. There is no adjacency or blank-line check.
#[derive(Debug, Clone)]
pub struct CommentLocator {
    doc_comment: Regex,
    decoration: Regex,
    whitespace: Regex,
}

impl CommentLocator {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            doc_comment: Regex::new(DOC_COMMENT_PATTERN)?,
            decoration: Regex::new(DECORATION_PATTERN)?,
            whitespace: Regex::new(WHITESPACE_PATTERN)?,
        })
    }

    /// Normalized text of the last doc comment in `content[..offset]`, or an
    /// empty string when there is none.
    pub fn locate(&self, content: &str, offset: usize) -> String {
        let end = offset.min(content.len());
        let Some(prefix) = content.get(..end) else {
            return String::new();
        };

        self.doc_comment
            .captures_iter(prefix)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|body| self.normalize(body.as_str()))
            .unwrap_or_default()
    }

    /// Drops line-leading `*` runs and the stars of a `**/` closer, then
    /// collapses whitespace
    fn normalize(&self, body: &str) -> String {
        let stripped = self.decoration.replace_all(body, "");
        self.whitespace
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }
}
