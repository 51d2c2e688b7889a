use alloc::string::String;

use thiserror::Error;

/// Malformed framing on the inbound side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No bytes, or only whitespace.
    #[error("empty message")]
    EmptyMessage,
    /// The head, or a text body, is not UTF-8.
    #[error("message is not valid UTF-8")]
    InvalidUtf8,
    /// The first line has the wrong shape.
    #[error("malformed first line \"{0}\"")]
    MalformedFirstLine(String),
    /// A method token outside [`HttpMethod`](super::HttpMethod).
    #[error("unknown method \"{0}\"")]
    UnknownMethod(String),
    /// A version other than `HTTP/1.0` or `HTTP/1.1`.
    #[error("unknown version \"{0}\"")]
    UnknownVersion(String),
    /// Not three digits in `100..=599`.
    #[error("unknown status code \"{0}\"")]
    UnknownStatusCode(String),
    /// A header line without `:` or with an empty name.
    #[error("malformed header line \"{0}\"")]
    MalformedHeader(String),
    /// More header lines than [`FramingOptions::max_headers`](super::FramingOptions::max_headers).
    #[error("more than {0} header lines")]
    TooManyHeaders(usize),
    /// A `content-length` that is not a decimal number.
    #[error("invalid content-length \"{0}\"")]
    InvalidContentLength(String),
    /// Fewer body units than `content-length` announced.
    #[error("body shorter than content-length: expected {expected}, got {actual}")]
    TruncatedBody {
        /// Announced length.
        expected: usize,
        /// Length received.
        actual: usize,
    },
    /// A datagram without the blank line after its first line.
    #[error("datagram has no header/body separator")]
    MissingSeparator,
    /// A datagram tag outside [`DatagramBodyType`](super::DatagramBodyType).
    #[error("unknown datagram body type \"{0}\"")]
    UnknownBodyType(String),
}
