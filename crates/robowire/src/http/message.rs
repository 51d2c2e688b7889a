use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;

use super::{
    ContentLengthMode, DatagramDenominator, Denominator, FramingOptions, HTTP_NEW_LINE, HeaderBuilder, HttpVersion,
    ProtocolError, RequestDenominator, ResponseDenominator, StatusCode, field_names,
};

/// A framed message: first line, headers, optional body, and the names of
/// the units to notify once it has been handled.
///
/// Every [`add_message`](Self::add_message) appends to the body and resets
/// `content-length` to the length of the whole body.
///
/// ```rust
/// use robowire::http::{DecoratedRequest, HttpMethod, HttpVersion, RequestDenominator};
///
/// let mut request = DecoratedRequest::new(RequestDenominator::with_path(
///     HttpMethod::Post,
///     "/units/stringConsumer",
///     HttpVersion::Http11,
/// ));
/// request.add_message("hello").add_message("world");
/// assert_eq!(request.body(), Some("helloworld"));
/// assert_eq!(request.header("content-length"), Some("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedMessage<D> {
    denominator: D,
    headers: HeaderBuilder,
    body: Option<String>,
    callbacks: Vec<String>,
    options: FramingOptions,
}

/// An HTTP request.
pub type DecoratedRequest = DecoratedMessage<RequestDenominator>;

/// An HTTP response.
pub type DecoratedResponse = DecoratedMessage<ResponseDenominator>;

impl<D: Denominator> DecoratedMessage<D> {
    /// A message with no headers and no body.
    #[must_use]
    pub fn new(denominator: D) -> Self {
        Self::with_options(denominator, FramingOptions::default())
    }

    /// Like [`Self::new`], counting `content-length` per `options`.
    #[must_use]
    pub fn with_options(denominator: D, options: FramingOptions) -> Self {
        Self {
            denominator,
            headers: HeaderBuilder::new(),
            body: None,
            callbacks: Vec::new(),
            options,
        }
    }

    /// The first line.
    #[must_use]
    pub fn denominator(&self) -> &D {
        &self.denominator
    }

    /// All headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &HeaderBuilder {
        &self.headers
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// See [`HeaderBuilder::add`].
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.add(key, value);
        self
    }

    /// See [`HeaderBuilder::add_all`].
    pub fn add_headers<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.add_all(entries);
        self
    }

    /// Appends `text` to the body and updates `content-length`.
    pub fn add_message(&mut self, text: &str) -> &mut Self {
        self.body.get_or_insert_with(String::new).push_str(text);
        let length = self.content_length();
        self.headers
            .add(field_names::CONTENT_LENGTH, alloc::format!("{length}"));
        self
    }

    /// The accumulated body; `None` until something is added.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Length of the accumulated body as `content-length` counts it.
    #[must_use]
    pub fn content_length(&self) -> usize {
        let body = self.body.as_deref().unwrap_or_default();
        match self.options.content_length {
            ContentLengthMode::Bytes => body.len(),
            ContentLengthMode::Chars => body.chars().count(),
        }
    }

    /// Names one more unit to inform.
    pub fn add_callback(&mut self, unit: impl Into<String>) -> &mut Self {
        self.callbacks.push(unit.into());
        self
    }

    /// [`Self::add_callback`] for each unit, in order.
    pub fn add_callbacks<S: Into<String>>(&mut self, units: impl IntoIterator<Item = S>) -> &mut Self {
        self.callbacks.extend(units.into_iter().map(Into::into));
        self
    }

    /// Units to inform once the message has been handled, in the order they
    /// were added. Duplicates are kept.
    #[must_use]
    pub fn callbacks(&self) -> &[String] {
        &self.callbacks
    }

    /// `first line CRLF headers CRLF body`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let first_line = self.denominator.generate();
        let mut out = String::with_capacity(first_line.len() + self.body.as_ref().map_or(0, String::len) + 64);
        out.push_str(&first_line);
        out.push_str(HTTP_NEW_LINE);
        self.headers.write_entries(&mut out);
        out.push_str(HTTP_NEW_LINE);
        if let Some(body) = &self.body {
            out.push_str(body);
        }
        tracing::debug!(first_line = %first_line, length = out.len(), "serialized message");
        out
    }

    fn from_raw(denominator: D, raw: RawMessage<'_>, options: FramingOptions) -> Self {
        let mut message = Self::with_options(denominator, options);
        message.headers = raw.headers;
        message.body = raw.body.map(Into::into);
        message
    }
}

impl DecoratedMessage<RequestDenominator> {
    /// Parses an inbound request.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] for anything that is not a well-formed
    /// request.
    pub fn parse(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Self::parse_with_options(bytes, FramingOptions::default())
    }

    /// # Errors
    ///
    /// See [`Self::parse`].
    pub fn parse_with_options(bytes: &[u8], options: FramingOptions) -> Result<Self, ProtocolError> {
        let raw = split_message(bytes, options)?;
        let denominator = RequestDenominator::parse(raw.first_line)?;
        tracing::debug!(
            method = %denominator.method(),
            path = denominator.path(),
            headers = raw.headers.len(),
            "parsed request"
        );
        Ok(Self::from_raw(denominator, raw, options))
    }
}

impl DecoratedMessage<ResponseDenominator> {
    /// An empty response with the given status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(ResponseDenominator::new(status, HttpVersion::Http11))
    }

    /// Status from the first line.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.denominator.status()
    }

    /// Parses an inbound response.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] for anything that is not a well-formed
    /// response.
    pub fn parse(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Self::parse_with_options(bytes, FramingOptions::default())
    }

    /// # Errors
    ///
    /// See [`Self::parse`].
    pub fn parse_with_options(bytes: &[u8], options: FramingOptions) -> Result<Self, ProtocolError> {
        let raw = split_message(bytes, options)?;
        let denominator = ResponseDenominator::parse(raw.first_line)?;
        tracing::debug!(status = %denominator.status(), headers = raw.headers.len(), "parsed response");
        Ok(Self::from_raw(denominator, raw, options))
    }
}

/// Inbound message split into its parts, before the first line is
/// interpreted.
struct RawMessage<'a> {
    first_line: &'a str,
    headers: HeaderBuilder,
    body: Option<&'a str>,
}

fn split_head(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = bytes.find(b"\r\n\r\n") {
        return Some((&bytes[..i], &bytes[i + 4..]));
    }
    bytes.find(b"\n\n").map(|i| (&bytes[..i], &bytes[i + 2..]))
}

fn split_message(bytes: &[u8], options: FramingOptions) -> Result<RawMessage<'_>, ProtocolError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ProtocolError::EmptyMessage);
    }
    let (head, body) = split_head(bytes).unwrap_or((bytes, &[][..]));
    let head = head.to_str().map_err(|_| ProtocolError::InvalidUtf8)?;

    let mut lines = head.lines();
    let first_line = lines.next().unwrap_or_default();

    let mut headers = HeaderBuilder::new();
    for (n, line) in lines.enumerate() {
        if let Some(max) = options.max_headers.filter(|&max| n >= max) {
            return Err(ProtocolError::TooManyHeaders(max));
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(ProtocolError::MalformedHeader(line.into()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ProtocolError::MalformedHeader(line.into()));
        }
        headers.add(key, value.trim());
    }

    let body = match headers.get(field_names::CONTENT_LENGTH) {
        Some(length) => {
            let expected = length
                .parse::<usize>()
                .map_err(|_| ProtocolError::InvalidContentLength(length.into()))?;
            Some(take_body(body, expected, options.content_length)?)
        }
        None if body.is_empty() => None,
        None => Some(body.to_str().map_err(|_| ProtocolError::InvalidUtf8)?),
    };

    Ok(RawMessage {
        first_line,
        headers,
        body,
    })
}

/// Takes exactly `expected` units of body; anything after belongs to the next
/// message.
fn take_body(body: &[u8], expected: usize, mode: ContentLengthMode) -> Result<&str, ProtocolError> {
    match mode {
        ContentLengthMode::Bytes => {
            let Some(bytes) = body.get(..expected) else {
                return Err(ProtocolError::TruncatedBody {
                    expected,
                    actual: body.len(),
                });
            };
            bytes.to_str().map_err(|_| ProtocolError::InvalidUtf8)
        }
        ContentLengthMode::Chars => {
            let text = body.to_str().map_err(|_| ProtocolError::InvalidUtf8)?;
            match text.char_indices().nth(expected) {
                Some((end, _)) => Ok(&text[..end]),
                None => {
                    let actual = text.chars().count();
                    if actual < expected {
                        Err(ProtocolError::TruncatedBody { expected, actual })
                    } else {
                        Ok(text)
                    }
                }
            }
        }
    }
}

/// A datagram: a type-tagged first line, a blank line, then raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatagramDecoratedRequest {
    denominator: DatagramDenominator,
    body: Vec<u8>,
    callbacks: Vec<String>,
}

impl DatagramDecoratedRequest {
    /// A datagram with an empty body.
    #[must_use]
    pub fn new(denominator: DatagramDenominator) -> Self {
        Self {
            denominator,
            body: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// The first line.
    #[must_use]
    pub fn denominator(&self) -> &DatagramDenominator {
        &self.denominator
    }

    /// Appends raw bytes to the body.
    pub fn add_message(&mut self, bytes: &[u8]) -> &mut Self {
        self.body.extend_from_slice(bytes);
        self
    }

    /// The raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, when it is valid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        self.body.to_str().ok()
    }

    /// Names one more unit to inform.
    pub fn add_callback(&mut self, unit: impl Into<String>) -> &mut Self {
        self.callbacks.push(unit.into());
        self
    }

    /// Units to inform, in the order they were added.
    #[must_use]
    pub fn callbacks(&self) -> &[String] {
        &self.callbacks
    }

    /// First line, `\r\n\r\n`, then the body bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let first_line = self.denominator.generate();
        let mut out = Vec::with_capacity(first_line.len() + 4 + self.body.len());
        out.extend_from_slice(first_line.as_bytes());
        out.extend_from_slice(b"\r\n\r\n");
        out.extend_from_slice(&self.body);
        tracing::debug!(first_line = %first_line, length = out.len(), "serialized datagram");
        out
    }

    /// # Errors
    ///
    /// [`ProtocolError::MissingSeparator`] when there is no blank line after
    /// the first line, and whatever [`DatagramDenominator::parse`] reports.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.is_empty() {
            return Err(ProtocolError::EmptyMessage);
        }
        let Some(i) = bytes.find(b"\r\n\r\n") else {
            return Err(ProtocolError::MissingSeparator);
        };
        let first_line = bytes[..i].to_str().map_err(|_| ProtocolError::InvalidUtf8)?;
        let denominator = DatagramDenominator::parse(first_line)?;
        tracing::debug!(
            body_type = %denominator.body_type(),
            path = denominator.path(),
            length = bytes.len() - i - 4,
            "parsed datagram"
        );
        let mut request = Self::new(denominator);
        request.add_message(&bytes[i + 4..]);
        Ok(request)
    }
}
