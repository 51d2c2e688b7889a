/// What to do with an integer literal that does not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerOverflow {
    /// Store the number as an `f64`, losing precision.
    #[default]
    Float,
    /// Fail with [`SyntaxError::NumberOutOfRange`](super::SyntaxError::NumberOutOfRange).
    Error,
}

/// Configuration options for [`JsonReader`](super::JsonReader).
///
/// # Examples
///
/// ```rust
/// use robowire::{IntegerOverflow, JsonReader, ReaderOptions};
///
/// let options = ReaderOptions {
///     max_depth: Some(8),
///     integer_overflow: IntegerOverflow::Error,
///     ..Default::default()
/// };
/// let doc = JsonReader::with_options("[1, 2]", options).read().unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default only the four JSON whitespace characters are skipped: space
    /// (U+0020), line feed (U+000A), carriage return (U+000D), and horizontal
    /// tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Maximum number of nested objects/arrays, counting the top-level one.
    ///
    /// `None` places no limit; the reader never recurses, so depth only costs
    /// heap for the frame stack.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,

    /// Handling of integer literals outside the `i64` range.
    ///
    /// # Default
    ///
    /// [`IntegerOverflow::Float`]
    pub integer_overflow: IntegerOverflow,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}
