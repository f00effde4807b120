mod comment;
mod typescript;

pub use comment::CommentLocator;
pub use typescript::{create_recognizers, PatternRecognizer, Recognizers};

use crate::models::DeclarationKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Invalid pattern for {kind:?}: {source}")]
    PatternError {
        kind: DeclarationKind,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid comment pattern: {0}")]
    CommentPatternError(#[from] regex::Error),
}
