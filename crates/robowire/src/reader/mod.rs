//! JSON reader: text in, one [`Document`] out.
//!
//! Overview
//! - The reader walks the input once, character by character, driven by an
//!   explicit [`ReadState`] machine. Nesting is tracked on a heap stack of
//!   [`Frame`]s rather than by recursion, so deeply nested input costs memory
//!   and never stack depth.
//! - Exactly one document is active at a time. Opening `{` or `[` saves the
//!   active document and its pending key on the stack and starts a new one;
//!   the matching `}` or `]` pops the frame and stores the finished document
//!   in its parent, either as the next element or bound to the saved key.
//! - Only composite values are accepted at the top level. A bare scalar is
//!   rejected with [`SyntaxError::UnexpectedTopLevel`].
//!
//! Strings
//! - A string with no escapes is sliced straight from the input. Otherwise the
//!   decoded characters go through a scratch buffer. `\uXXXX` escapes are
//!   decoded by [`UnicodeEscapeBuffer`], which also joins surrogate pairs.
//!
//! Numbers
//! - The lexer follows the JSON number grammar (`-`, leading zero, fraction,
//!   exponent). A lexeme without `.` or exponent becomes [`Value::Integer`];
//!   integers outside the `i64` range follow [`IntegerOverflow`].
//!
//! Errors carry the line and column of the character that was rejected. The
//! reader does no logging.

mod error;
mod escape_buffer;
mod literal_buffer;
mod numbers;
mod options;

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::mem;

pub use error::{ErrorSource, ReaderError, SyntaxError};
use escape_buffer::UnicodeEscapeBuffer;
use literal_buffer::{ExpectedLiteralBuffer, Step};
use numbers::NumberLexeme;
pub use options::{IntegerOverflow, ReaderOptions};

use crate::document::{Document, DocumentKind, StructureError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents a peeked character from the input.
enum PeekedChar {
    /// Some character
    Char(char),
    /// End of input.
    EndOfInput,
}

use PeekedChar::{Char, EndOfInput};

/// Structural position of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    StartObject,
    StartArray,
    StartArrayElement,
    EndArrayElement,
    EndArray,
    StartKey,
    EndKey,
    StartValue,
    EndValue,
    EndObject,
    Error,
}

/// Position inside a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Start,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    StringSurrogateEscape,
    StringSurrogateU,
}

/// A saved parent document and the key its child will be bound to.
#[derive(Debug)]
struct Frame {
    key: Option<String>,
    parent: Document,
}

/// What a value position turned out to hold.
enum ReadValue {
    Scalar(Value),
    Nested(DocumentKind),
}

/// Reads one JSON object or array from a string.
///
/// A reader is single use: [`JsonReader::read`] consumes it.
///
/// # Examples
///
/// ```
/// use robowire::JsonReader;
///
/// let doc = JsonReader::new(r#"{"value":"move","type":"DIRECT"}"#).read().unwrap();
/// assert_eq!(doc.get_str("type"), Some("DIRECT"));
/// ```
#[derive(Debug)]
pub struct JsonReader<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    options: ReaderOptions,
    state: ReadState,
    stack: Vec<Frame>,
    current: Document,
    current_key: Option<String>,
    current_value: Option<Value>,
    buffer: String,
    escape: UnicodeEscapeBuffer,
}

impl<'a> JsonReader<'a> {
    /// A reader over `text` with default options.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, ReaderOptions::default())
    }

    /// A reader over `text`.
    #[must_use]
    pub fn with_options(text: &'a str, options: ReaderOptions) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            column: 1,
            options,
            state: ReadState::StartObject,
            stack: Vec::new(),
            current: Document::new_object(),
            current_key: None,
            current_value: None,
            buffer: String::new(),
            escape: UnicodeEscapeBuffer::new(),
        }
    }

    /// Parses the whole input into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns a [`ReaderError`] for malformed input, for a top-level value
    /// that is not an object or array, for anything but whitespace after the
    /// top-level value, and when a configured limit is exceeded.
    pub fn read(mut self) -> Result<Document, ReaderError> {
        match self.run() {
            Ok(doc) => Ok(doc),
            Err(err) => {
                self.state = ReadState::Error;
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<Document, ReaderError> {
        self.skip_whitespace();
        match self.peek_char() {
            Char('{') => {
                self.advance_char();
                self.begin(DocumentKind::Object);
            }
            Char('[') => {
                self.advance_char();
                self.begin(DocumentKind::Array);
            }
            Char(c) => return Err(self.syntax_error(SyntaxError::UnexpectedTopLevel(c))),
            EndOfInput => return Err(self.invalid_eof()),
        }
        self.check_depth()?;

        loop {
            if let Some(doc) = self.step()? {
                return Ok(doc);
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------------------------------------

    fn step(&mut self) -> Result<Option<Document>, ReaderError> {
        use ReadState::*;

        if !matches!(self.state, EndObject | EndArray) {
            self.skip_whitespace();
        }
        let next_char = self.peek_char();

        match self.state {
            Error => Err(self.invalid_char(next_char)),

            StartObject => match next_char {
                Char('}') => {
                    self.advance_char();
                    self.state = EndObject;
                    Ok(None)
                }
                Char('"') => {
                    self.state = StartKey;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            StartKey => match next_char {
                Char('"') => {
                    self.advance_char();
                    let key = self.read_string()?;
                    self.current_key = Some(key);
                    self.state = EndKey;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            EndKey => match next_char {
                Char(':') => {
                    self.advance_char();
                    self.state = StartValue;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            StartValue => {
                match self.read_value()? {
                    ReadValue::Scalar(v) => {
                        self.current_value = Some(v);
                        self.state = EndValue;
                    }
                    ReadValue::Nested(kind) => self.open(kind)?,
                }
                Ok(None)
            }

            EndValue => match next_char {
                Char(',') => {
                    self.commit_pair()?;
                    self.advance_char();
                    self.state = StartKey;
                    Ok(None)
                }
                Char('}') => {
                    self.commit_pair()?;
                    self.advance_char();
                    self.state = EndObject;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            StartArray => match next_char {
                Char(']') => {
                    self.advance_char();
                    self.state = EndArray;
                    Ok(None)
                }
                _ => {
                    self.state = StartArrayElement;
                    Ok(None)
                }
            },

            StartArrayElement => {
                match self.read_value()? {
                    ReadValue::Scalar(v) => {
                        self.current.push(v).map_err(|e| self.structure_error(e))?;
                        self.state = EndArrayElement;
                    }
                    ReadValue::Nested(kind) => self.open(kind)?,
                }
                Ok(None)
            }

            EndArrayElement => match next_char {
                Char(',') => {
                    self.advance_char();
                    self.state = StartArrayElement;
                    Ok(None)
                }
                Char(']') => {
                    self.advance_char();
                    self.state = EndArray;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            EndObject | EndArray => self.close(),
        }
    }

    fn begin(&mut self, kind: DocumentKind) {
        self.current = Document::with_kind(kind);
        self.state = match kind {
            DocumentKind::Object => ReadState::StartObject,
            DocumentKind::Array => ReadState::StartArray,
        };
    }

    /// Saves the active document with its pending key and starts a child.
    fn open(&mut self, kind: DocumentKind) -> Result<(), ReaderError> {
        let parent = mem::replace(&mut self.current, Document::with_kind(kind));
        self.stack.push(Frame {
            key: self.current_key.take(),
            parent,
        });
        self.begin(kind);
        self.check_depth()
    }

    /// Finishes the active document. Returns it when it was the top level.
    fn close(&mut self) -> Result<Option<Document>, ReaderError> {
        let Some(Frame { key, parent }) = self.stack.pop() else {
            self.skip_whitespace();
            if let Char(_) = self.peek_char() {
                return Err(self.syntax_error(SyntaxError::TrailingCharacters));
            }
            return Ok(Some(mem::replace(&mut self.current, Document::new_object())));
        };

        let finished = mem::replace(&mut self.current, parent);
        match self.current.kind() {
            DocumentKind::Array => {
                self.current.push(finished).map_err(|e| self.structure_error(e))?;
                self.state = ReadState::EndArrayElement;
            }
            DocumentKind::Object => {
                self.current_key = key;
                self.current_value = Some(Value::Document(finished));
                self.state = ReadState::EndValue;
            }
        }
        Ok(None)
    }

    fn commit_pair(&mut self) -> Result<(), ReaderError> {
        let (Some(key), Some(value)) = (self.current_key.take(), self.current_value.take()) else {
            return Err(self.invalid_char(self.peek_char()));
        };
        self.current.add(key, value).map_err(|e| self.structure_error(e))
    }

    fn check_depth(&self) -> Result<(), ReaderError> {
        match self.options.max_depth {
            Some(max) if self.stack.len() + 1 > max => {
                Err(self.syntax_error(SyntaxError::NestingTooDeep(max)))
            }
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------------------------------

    fn read_value(&mut self) -> Result<ReadValue, ReaderError> {
        match self.peek_char() {
            Char('{') => {
                self.advance_char();
                Ok(ReadValue::Nested(DocumentKind::Object))
            }
            Char('[') => {
                self.advance_char();
                Ok(ReadValue::Nested(DocumentKind::Array))
            }
            Char('"') => {
                self.advance_char();
                Ok(ReadValue::Scalar(Value::String(self.read_string()?)))
            }
            Char('-' | '0'..='9') => self.read_number().map(ReadValue::Scalar),
            Char(c @ ('t' | 'f' | 'n')) => self.read_literal(c).map(ReadValue::Scalar),
            c => Err(self.invalid_char(c)),
        }
    }

    fn read_literal(&mut self, first: char) -> Result<Value, ReaderError> {
        self.advance_char();
        let mut expected = ExpectedLiteralBuffer::new(first);
        loop {
            let c = match self.peek_char() {
                Char(c) => c,
                EndOfInput => return Err(self.invalid_eof()),
            };
            match expected.step(c) {
                Step::NeedMore => self.advance_char(),
                Step::Done(value) => {
                    self.advance_char();
                    return Ok(value);
                }
                Step::Reject => return Err(self.invalid_char(Char(c))),
            }
        }
    }

    /// Reads string content after the opening quote, consuming the closing one.
    fn read_string(&mut self) -> Result<String, ReaderError> {
        // No escapes before the closing quote: slice it out directly.
        let rest = &self.text[self.pos..];
        if let Some(end) = rest.find(|c: char| c == '"' || c == '\\' || c < ' ') {
            if rest.as_bytes()[end] == b'"' {
                let s = &rest[..end];
                self.column += s.chars().count() + 1;
                self.pos += end + 1;
                return Ok(s.to_string());
            }
        }

        self.buffer.clear();
        self.escape.reset();
        let mut lex = LexState::String;
        loop {
            let c = match self.peek_char() {
                Char(c) => c,
                EndOfInput => return Err(self.invalid_eof()),
            };
            lex = match lex {
                LexState::String => match c {
                    '"' => {
                        self.advance_char();
                        return Ok(mem::take(&mut self.buffer));
                    }
                    '\\' => LexState::StringEscape,
                    c if c < ' ' => return Err(self.invalid_char(Char(c))),
                    c => {
                        self.buffer.push(c);
                        LexState::String
                    }
                },
                LexState::StringEscape if c == 'u' => LexState::StringEscapeUnicode,
                LexState::StringEscape => {
                    let decoded = match c {
                        '"' => '"',
                        '\\' => '\\',
                        '/' => '/',
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        c => return Err(self.invalid_char(Char(c))),
                    };
                    self.buffer.push(decoded);
                    LexState::String
                }
                LexState::StringEscapeUnicode => match self.escape.feed(c) {
                    Ok(Some(ch)) => {
                        self.buffer.push(ch);
                        LexState::String
                    }
                    Ok(None) if self.escape.awaiting_low_surrogate() => LexState::StringSurrogateEscape,
                    Ok(None) => LexState::StringEscapeUnicode,
                    Err(e) => return Err(self.syntax_error(e)),
                },
                LexState::StringSurrogateEscape if c == '\\' => LexState::StringSurrogateU,
                LexState::StringSurrogateU if c == 'u' => LexState::StringEscapeUnicode,
                LexState::StringSurrogateEscape | LexState::StringSurrogateU => {
                    let high = self.escape.pending_high().unwrap_or_default();
                    return Err(self.syntax_error(SyntaxError::LoneSurrogate(high)));
                }
                _ => return Err(self.invalid_char(Char(c))),
            };
            self.advance_char();
        }
    }

    fn read_number(&mut self) -> Result<Value, ReaderError> {
        use LexState::{
            DecimalExponent, DecimalExponentInteger, DecimalExponentSign, DecimalFraction, DecimalInteger,
            DecimalPoint, Sign, Start, Zero,
        };

        let start = self.pos;
        let mut lex = Start;
        let mut float = false;
        loop {
            let next_char = self.peek_char();
            lex = match (lex, next_char) {
                (Start, Char('-')) => Sign,
                (Start | Sign, Char('0')) => Zero,
                (Start | Sign | DecimalInteger, Char('0'..='9')) => DecimalInteger,
                (Zero | DecimalInteger, Char('.')) => {
                    float = true;
                    DecimalPoint
                }
                (DecimalPoint | DecimalFraction, Char('0'..='9')) => DecimalFraction,
                (Zero | DecimalInteger | DecimalFraction, Char('e' | 'E')) => {
                    float = true;
                    DecimalExponent
                }
                (DecimalExponent, Char('+' | '-')) => DecimalExponentSign,
                (DecimalExponent | DecimalExponentSign | DecimalExponentInteger, Char('0'..='9')) => {
                    DecimalExponentInteger
                }
                (Zero | DecimalInteger | DecimalFraction | DecimalExponentInteger, _) => break,
                (_, c) => return Err(self.invalid_char(c)),
            };
            self.advance_char();
        }

        let text = &self.text[start..self.pos];
        let lexeme = if float {
            NumberLexeme::Float(text)
        } else {
            NumberLexeme::Integer(text)
        };
        self.number_value(lexeme)
    }

    fn number_value(&self, lexeme: NumberLexeme<'_>) -> Result<Value, ReaderError> {
        let out_of_range = |text: &str| self.syntax_error(SyntaxError::NumberOutOfRange(text.to_string()));
        let parse_float = |text: &str| match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Float(n)),
            _ => Err(out_of_range(text)),
        };
        match lexeme {
            NumberLexeme::Integer(text) => match text.parse::<i64>() {
                Ok(n) => Ok(Value::Integer(n)),
                Err(_) => match self.options.integer_overflow {
                    IntegerOverflow::Float => parse_float(text),
                    IntegerOverflow::Error => Err(out_of_range(text)),
                },
            },
            NumberLexeme::Float(text) => parse_float(text),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------------------------------

    fn peek_char(&self) -> PeekedChar {
        match self.text[self.pos..].chars().next() {
            Some(c) => Char(c),
            None => EndOfInput,
        }
    }

    #[inline]
    fn advance_char(&mut self) {
        if let Some(ch) = self.text[self.pos..].chars().next() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek_char() {
                // Strict JSON whitespace (always allowed)
                Char(' ' | '\n' | '\r' | '\t') => self.advance_char(),
                // Additional Unicode whitespace (only when enabled)
                Char(c) if self.options.allow_unicode_whitespace && c.is_whitespace() => {
                    self.advance_char();
                }
                _ => return,
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    fn invalid_char(&self, c: PeekedChar) -> ReaderError {
        match c {
            EndOfInput => self.invalid_eof(),
            Char(c) => self.syntax_error(SyntaxError::InvalidCharacter(c)),
        }
    }

    fn invalid_eof(&self) -> ReaderError {
        self.syntax_error(SyntaxError::UnexpectedEndOfInput)
    }

    fn structure_error(&self, err: StructureError) -> ReaderError {
        self.reader_error(ErrorSource::StructureError(err))
    }

    fn syntax_error(&self, err: SyntaxError) -> ReaderError {
        self.reader_error(ErrorSource::SyntaxError(err))
    }

    fn reader_error(&self, source: ErrorSource) -> ReaderError {
        let err = ReaderError {
            source,
            line: self.line,
            column: self.column,
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        err
    }
}

/// Reads `text` with default [`ReaderOptions`].
///
/// # Errors
///
/// See [`JsonReader::read`].
pub fn read(text: &str) -> Result<Document, ReaderError> {
    JsonReader::new(text).read()
}

/// Reads `text` with the given options.
///
/// # Errors
///
/// See [`JsonReader::read`].
pub fn read_with_options(text: &str, options: ReaderOptions) -> Result<Document, ReaderError> {
    JsonReader::with_options(text, options).read()
}
