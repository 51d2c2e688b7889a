use thiserror::Error;

use crate::document::StructureError;

/// A reader failure together with the 1-based position where it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ReaderError {
    pub(crate) source: ErrorSource,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl ReaderError {
    /// What went wrong.
    #[must_use]
    pub fn source(&self) -> &ErrorSource {
        &self.source
    }

    /// 1-based line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The syntax error, if this is one.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::SyntaxError(e) => Some(e),
            ErrorSource::StructureError(_) => None,
        }
    }
}

/// The cause behind a [`ReaderError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    /// The text is not valid JSON.
    #[error("syntax error: {0}")]
    SyntaxError(#[from] SyntaxError),
    /// The document under construction refused an entry.
    #[error("structure error: {0}")]
    StructureError(#[from] StructureError),
}

/// Ways JSON text can be malformed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character that cannot appear here.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// The text does not start with `{` or `[`.
    #[error("expected '{{' or '[' at top level, found '{0}'")]
    UnexpectedTopLevel(char),
    /// A non-hex digit inside a `\uXXXX` escape.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A `\uXXXX` escape that is not a scalar value.
    #[error("invalid unicode escape sequence \\u{0:X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:X}")]
    LoneSurrogate(u32),
    /// A number with no finite representation, or an integer past `i64`
    /// when overflow is an error.
    #[error("number out of range: {0}")]
    NumberOutOfRange(alloc::string::String),
    /// Nesting past [`ReaderOptions::max_depth`](crate::ReaderOptions::max_depth).
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    /// Non-whitespace after the top-level document.
    #[error("trailing characters after top-level value")]
    TrailingCharacters,
    /// The text ended inside a document.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
