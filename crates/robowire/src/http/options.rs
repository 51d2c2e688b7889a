/// How `content-length` is computed from an accumulated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentLengthMode {
    /// UTF-8 byte length, which is what the value means on the wire.
    #[default]
    Bytes,
    /// Number of Unicode scalar values, for peers that count characters.
    Chars,
}

/// Configuration options for message framing.
///
/// # Examples
///
/// ```rust
/// use robowire::http::{ContentLengthMode, FramingOptions};
///
/// let options = FramingOptions {
///     content_length: ContentLengthMode::Chars,
///     ..Default::default()
/// };
/// assert_eq!(options.max_headers, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramingOptions {
    /// How `add_message` recomputes `content-length`.
    ///
    /// # Default
    ///
    /// [`ContentLengthMode::Bytes`]
    pub content_length: ContentLengthMode,

    /// Upper bound on header lines accepted when parsing inbound messages.
    ///
    /// # Default
    ///
    /// `None` (no limit)
    pub max_headers: Option<usize>,
}
