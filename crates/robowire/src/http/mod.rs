//! HTTP/1.x and datagram framing for unit-to-unit messages.
//!
//! Messages are built from a first line ([`Denominator`]), a header block and
//! an optional body. Nothing here touches sockets: messages are turned into
//! bytes with [`DecoratedMessage::to_wire`] and parsed back from bytes with
//! `parse`.
//!
//! ```rust
//! use robowire::http::{DecoratedRequest, HttpMethod, request_headers};
//!
//! let request = DecoratedRequest::parse(
//!     b"GET /units/status HTTP/1.1\r\nhost: robot:8042\r\n\r\n",
//! )
//! .unwrap();
//! assert_eq!(request.denominator().method(), HttpMethod::Get);
//! assert_eq!(request.denominator().path(), "/units/status");
//!
//! let headers = request_headers("robot:8042");
//! assert_eq!(headers.get("Host"), Some("robot:8042"));
//! ```
mod denominator;
mod error;
mod exchange;
mod header;
mod message;
mod method;
mod options;
pub mod path;

pub use denominator::{DatagramBodyType, DatagramDenominator, Denominator, RequestDenominator, ResponseDenominator};
pub use error::ProtocolError;
pub use exchange::{decode_request_body, encode_response, failure_response, handle_request, status_for};
pub use header::{HTTP_NEW_LINE, HeaderBuilder, basic_headers, field_names, field_values, request_headers};
pub use message::{DatagramDecoratedRequest, DecoratedMessage, DecoratedRequest, DecoratedResponse};
pub use method::{HttpMethod, HttpVersion, StatusCode};
pub use options::{ContentLengthMode, FramingOptions};
