//! First-line generators.
//!
//! A denominator owns everything that goes on the first line of a framed
//! message and renders it without the trailing CRLF.
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use super::{HttpMethod, HttpVersion, ProtocolError, StatusCode, path::parse_query};

/// Renders the first line of a framed message.
pub trait Denominator {
    /// The first line, without line terminator.
    fn generate(&self) -> String;
}

/// `METHOD PATH VERSION`, e.g. `GET /units/status HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDenominator {
    method: HttpMethod,
    path: String,
    version: HttpVersion,
    attributes: Vec<(String, String)>,
}

impl RequestDenominator {
    /// A request for the root path `/`.
    #[must_use]
    pub fn new(method: HttpMethod, version: HttpVersion) -> Self {
        Self::with_path(method, "/", version)
    }

    /// A request for `path`, which must not carry a query.
    #[must_use]
    pub fn with_path(method: HttpMethod, path: impl Into<String>, version: HttpVersion) -> Self {
        Self {
            method,
            path: path.into(),
            version,
            attributes: Vec::new(),
        }
    }

    /// Adds query attributes, written after the path as `?k=v&k2=v2`.
    #[must_use]
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The path without its query.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The protocol version.
    #[must_use]
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Query attributes in order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Parses a request line.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::MalformedFirstLine`] unless the line is exactly three
    /// tokens separated by single spaces with a non-empty path; unknown methods
    /// and versions are reported as such.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let tokens: Vec<&str> = line.split(' ').collect();
        let [method, target, version] = tokens[..] else {
            return Err(ProtocolError::MalformedFirstLine(line.into()));
        };
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        if path.is_empty() {
            return Err(ProtocolError::MalformedFirstLine(line.into()));
        }
        Ok(Self::with_path(method.parse()?, path, version.parse()?).with_attributes(parse_query(query, "&")))
    }
}

impl Denominator for RequestDenominator {
    fn generate(&self) -> String {
        let mut line = format!("{} {}", self.method, self.path);
        for (i, (k, v)) in self.attributes.iter().enumerate() {
            line.push(if i == 0 { '?' } else { '&' });
            line.push_str(k);
            if !v.is_empty() {
                line.push('=');
                line.push_str(v);
            }
        }
        line.push(' ');
        line.push_str(self.version.name());
        line
    }
}

/// `VERSION CODE REASON`, e.g. `HTTP/1.1 200 OK`.
///
/// Named statuses always render their canonical reason phrase. A
/// [`StatusCode::Other`] keeps the phrase it was parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDenominator {
    status: StatusCode,
    version: HttpVersion,
    reason: Option<String>,
}

impl ResponseDenominator {
    /// A status line with the canonical reason phrase.
    #[must_use]
    pub fn new(status: StatusCode, version: HttpVersion) -> Self {
        Self {
            status,
            version,
            reason: None,
        }
    }

    /// The status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The protocol version.
    #[must_use]
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// The reason phrase as it will be written.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or(self.status.reason_phrase())
    }

    /// Parses a status line. The reason phrase may contain spaces and is not
    /// checked against the code.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::MalformedFirstLine`] when fewer than three tokens are
    /// present; [`ProtocolError::UnknownStatusCode`] unless the code is three
    /// digits in `100..=599`.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut tokens = line.splitn(3, ' ');
        let (Some(version), Some(code), Some(reason)) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ProtocolError::MalformedFirstLine(line.into()));
        };
        let status = Some(code)
            .filter(|c| c.len() == 3 && c.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|c| c.parse::<u16>().ok())
            .and_then(StatusCode::from_any_code)
            .ok_or_else(|| ProtocolError::UnknownStatusCode(code.into()))?;
        let mut denominator = Self::new(status, version.parse()?);
        if matches!(status, StatusCode::Other(_)) {
            denominator.reason = Some(reason.into());
        }
        Ok(denominator)
    }
}

impl Denominator for ResponseDenominator {
    fn generate(&self) -> String {
        format!("{} {} {}", self.version, self.status.code(), self.reason())
    }
}

/// Kind of payload a datagram carries, sent as a four digit tag.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatagramBodyType {
    /// `0001`, a JSON message.
    Json,
    /// `0002`, plain text.
    Text,
    /// `0003`, opaque bytes.
    Binary,
}

impl DatagramBodyType {
    /// Every body type, in tag order.
    pub const ALL: [DatagramBodyType; 3] = [DatagramBodyType::Json, DatagramBodyType::Text, DatagramBodyType::Binary];

    /// The numeric tag.
    #[must_use]
    pub fn tag(self) -> u16 {
        match self {
            DatagramBodyType::Json => 1,
            DatagramBodyType::Text => 2,
            DatagramBodyType::Binary => 3,
        }
    }

    /// Looks up a body type by numeric tag.
    #[must_use]
    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for DatagramBodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.tag(), width = DatagramDenominator::TAG_WIDTH)
    }
}

/// `TAG PATH`, e.g. `0001 /units/stringConsumer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatagramDenominator {
    body_type: DatagramBodyType,
    path: String,
}

impl DatagramDenominator {
    /// Digits in the zero-padded body type tag.
    pub const TAG_WIDTH: usize = 4;

    /// A datagram line for `path`.
    #[must_use]
    pub fn new(body_type: DatagramBodyType, path: impl Into<String>) -> Self {
        Self {
            body_type,
            path: path.into(),
        }
    }

    /// Kind of the body that follows.
    #[must_use]
    pub fn body_type(&self) -> DatagramBodyType {
        self.body_type
    }

    /// The unit path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parses a datagram first line.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownBodyType`] unless the line starts with a known
    /// four digit tag followed by a space and a path.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let Some((tag, path)) = line.split_once(' ') else {
            return Err(ProtocolError::MalformedFirstLine(line.into()));
        };
        if path.is_empty() || path.contains(' ') {
            return Err(ProtocolError::MalformedFirstLine(line.into()));
        }
        let body_type = Some(tag)
            .filter(|t| t.len() == Self::TAG_WIDTH && t.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|t| t.parse::<u16>().ok())
            .and_then(DatagramBodyType::from_tag)
            .ok_or_else(|| ProtocolError::UnknownBodyType(tag.to_string()))?;
        Ok(Self::new(body_type, path))
    }
}

impl Denominator for DatagramDenominator {
    fn generate(&self) -> String {
        format!("{} {}", self.body_type, self.path)
    }
}
