use core::{fmt, str::FromStr};

use super::ProtocolError;

/// Request methods understood by the framing layer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `TRACE`
    Trace,
    /// `OPTIONS`
    Options,
    /// `CONNECT`
    Connect,
}

impl HttpMethod {
    /// Every method, in declaration order.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Trace,
        HttpMethod::Options,
        HttpMethod::Connect,
    ];

    /// The wire token, e.g. `"GET"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
        }
    }

    /// Case-sensitive lookup by wire token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HttpMethod {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ProtocolError::UnknownMethod(s.into()))
    }
}

/// Protocol version on request and status lines.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpVersion {
    /// `HTTP/1.0`
    Http10,
    /// `HTTP/1.1`
    #[default]
    Http11,
}

impl HttpVersion {
    /// The wire token, e.g. `"HTTP/1.1"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }

    /// Exact lookup by wire token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HTTP/1.0" => Some(HttpVersion::Http10),
            "HTTP/1.1" => Some(HttpVersion::Http11),
            _ => None,
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HttpVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ProtocolError::UnknownVersion(s.into()))
    }
}

/// Response status codes with their reason phrases.
///
/// Codes without a named variant are kept as [`StatusCode::Other`], so
/// responses from peers that use them still parse.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `200 OK`
    Ok,
    /// `201 Created`
    Created,
    /// `202 Accepted`
    Accepted,
    /// `204 No Content`
    NoContent,
    /// `301 Moved Permanently`
    MovedPermanently,
    /// `302 Found`
    Found,
    /// `304 Not Modified`
    NotModified,
    /// `400 Bad Request`
    BadRequest,
    /// `401 Unauthorized`
    Unauthorized,
    /// `403 Forbidden`
    Forbidden,
    /// `404 Not Found`
    NotFound,
    /// `405 Method Not Allowed`
    MethodNotAllowed,
    /// `408 Request Timeout`
    RequestTimeout,
    /// `409 Conflict`
    Conflict,
    /// `415 Unsupported Media Type`
    UnsupportedMediaType,
    /// `429 Too Many Requests`
    TooManyRequests,
    /// `500 Internal Server Error`
    InternalServerError,
    /// `501 Not Implemented`
    NotImplemented,
    /// `502 Bad Gateway`
    BadGateway,
    /// `503 Service Unavailable`
    ServiceUnavailable,
    /// `504 Gateway Timeout`
    GatewayTimeout,
    /// `505 HTTP Version Not Supported`
    HttpVersionNotSupported,
    /// Any other code in `100..=599`. It has no canonical reason phrase.
    Other(u16),
}

impl StatusCode {
    /// Every named status, in ascending code order.
    pub const ALL: [StatusCode; 22] = [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::Accepted,
        StatusCode::NoContent,
        StatusCode::MovedPermanently,
        StatusCode::Found,
        StatusCode::NotModified,
        StatusCode::BadRequest,
        StatusCode::Unauthorized,
        StatusCode::Forbidden,
        StatusCode::NotFound,
        StatusCode::MethodNotAllowed,
        StatusCode::RequestTimeout,
        StatusCode::Conflict,
        StatusCode::UnsupportedMediaType,
        StatusCode::TooManyRequests,
        StatusCode::InternalServerError,
        StatusCode::NotImplemented,
        StatusCode::BadGateway,
        StatusCode::ServiceUnavailable,
        StatusCode::GatewayTimeout,
        StatusCode::HttpVersionNotSupported,
    ];

    /// The numeric code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::Accepted => 202,
            StatusCode::NoContent => 204,
            StatusCode::MovedPermanently => 301,
            StatusCode::Found => 302,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::RequestTimeout => 408,
            StatusCode::Conflict => 409,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::TooManyRequests => 429,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::BadGateway => 502,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::GatewayTimeout => 504,
            StatusCode::HttpVersionNotSupported => 505,
            StatusCode::Other(code) => code,
        }
    }

    /// Canonical reason phrase; empty for [`StatusCode::Other`].
    #[must_use]
    pub fn reason_phrase(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::Accepted => "Accepted",
            StatusCode::NoContent => "No Content",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::Found => "Found",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestTimeout => "Request Timeout",
            StatusCode::Conflict => "Conflict",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::TooManyRequests => "Too Many Requests",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::GatewayTimeout => "Gateway Timeout",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
            StatusCode::Other(_) => "",
        }
    }

    /// Looks up a named status only.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Any code in `100..=599`, named when possible.
    #[must_use]
    pub fn from_any_code(code: u16) -> Option<Self> {
        match Self::from_code(code) {
            Some(status) => Some(status),
            None if (100..=599).contains(&code) => Some(StatusCode::Other(code)),
            None => None,
        }
    }

    /// `true` for `2xx`.
    #[must_use]
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[test]
    fn method_names_round_trip() {
        for method in HttpMethod::ALL {
            assert_eq!(method.name().parse::<HttpMethod>().unwrap(), method);
        }
        assert!(matches!("get".parse::<HttpMethod>(), Err(ProtocolError::UnknownMethod(_))));
    }

    #[test]
    fn version_lookup() {
        assert_eq!(HttpVersion::from_name("HTTP/1.0"), Some(HttpVersion::Http10));
        assert_eq!(HttpVersion::default().to_string(), "HTTP/1.1");
        assert!("HTTP/2".parse::<HttpVersion>().is_err());
    }

    #[rstest]
    #[case(200, "200 OK")]
    #[case(202, "202 Accepted")]
    #[case(415, "415 Unsupported Media Type")]
    #[case(505, "505 HTTP Version Not Supported")]
    fn status_display(#[case] code: u16, #[case] expected: &str) {
        assert_eq!(StatusCode::from_code(code).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case(301, "301 Moved Permanently")]
    #[case(403, "403 Forbidden")]
    #[case(409, "409 Conflict")]
    fn more_named_statuses(#[case] code: u16, #[case] expected: &str) {
        assert_eq!(StatusCode::from_code(code).unwrap().to_string(), expected);
    }

    #[test]
    fn unknown_status_code() {
        assert_eq!(StatusCode::from_code(418), None);
        assert_eq!(StatusCode::from_any_code(418), Some(StatusCode::Other(418)));
        assert_eq!(StatusCode::from_any_code(404), Some(StatusCode::NotFound));
        assert_eq!(StatusCode::from_any_code(99), None);
        assert_eq!(StatusCode::from_any_code(600), None);
        assert!(StatusCode::Other(299).is_success());
        assert!(StatusCode::NoContent.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }
}
