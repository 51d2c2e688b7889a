use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt::Write as _;

use super::{HttpMethod, HttpVersion};

/// Line terminator used by every framed message.
pub const HTTP_NEW_LINE: &str = "\r\n";

/// Header field names, lower-case as they are written on the wire.
pub mod field_names {
    /// Target host and port.
    pub const HOST: &str = "host";
    /// Connection reuse.
    pub const CONNECTION: &str = "connection";
    /// Caching directives.
    pub const CACHE_CONTROL: &str = "cache-control";
    /// Client identification.
    pub const USER_AGENT: &str = "user-agent";
    /// Accepted media types.
    pub const ACCEPT: &str = "accept";
    /// Accepted content codings.
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    /// Accepted languages.
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    /// Media type of the body.
    pub const CONTENT_TYPE: &str = "content-type";
    /// Body length, in bytes unless configured otherwise.
    pub const CONTENT_LENGTH: &str = "content-length";
    /// Identifies the sending unit.
    pub const ROBO_UNIT_UID: &str = "uid";
}

/// Common header field values.
pub mod field_values {
    /// `connection`
    pub const KEEP_ALIVE: &str = "keep-alive";
    /// `cache-control`
    pub const NO_CACHE: &str = "no-cache";
    /// `user-agent` of outbound requests.
    pub const CLIENT_NAME: &str = "Robo4J-HttpClient";
    /// `accept`
    pub const ACCEPT_ANY: &str = "*/*";
    /// `accept-encoding`
    pub const ACCEPT_ENCODING: &str = "gzip, deflate, sdch, br";
    /// `accept-language`
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8";
    /// `content-type` of requests without a typed body.
    pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
    /// `content-type` of encoded messages.
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Headers every outbound request carries, in the order they are written.
#[must_use]
pub fn basic_headers() -> [(&'static str, &'static str); 7] {
    use field_names as n;
    use field_values as v;
    [
        (n::CACHE_CONTROL, v::NO_CACHE),
        (n::USER_AGENT, v::CLIENT_NAME),
        (n::CONNECTION, v::KEEP_ALIVE),
        (n::ACCEPT, v::ACCEPT_ANY),
        (n::ACCEPT_ENCODING, v::ACCEPT_ENCODING),
        (n::ACCEPT_LANGUAGE, v::ACCEPT_LANGUAGE),
        (n::CONTENT_TYPE, v::CONTENT_TYPE_HTML),
    ]
}

/// `host` followed by [`basic_headers`].
#[must_use]
pub fn request_headers(host: &str) -> HeaderBuilder {
    let mut headers = HeaderBuilder::new();
    headers.add(field_names::HOST, host).add_all(basic_headers());
    headers
}

/// Ordered header collection, optionally with first-line parts.
///
/// Keys compare ASCII-case-insensitively; adding an existing key replaces its
/// value and keeps its position. [`HeaderBuilder::build`] does not consume
/// the builder and yields the same text every time.
///
/// ```rust
/// use robowire::http::{HeaderBuilder, StatusCode, field_names};
///
/// let text = HeaderBuilder::new()
///     .add_first_line("HTTP/1.1")
///     .add_first_line(StatusCode::Ok.code())
///     .add_first_line(StatusCode::Ok.reason_phrase())
///     .add(field_names::ROBO_UNIT_UID, "1234")
///     .build();
/// assert_eq!(text, "HTTP/1.1 200 OK\r\nuid: 1234\r\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBuilder {
    first_line: Vec<String>,
    entries: Vec<(String, String)>,
    /// Lower-cased key to position in `entries`.
    index: BTreeMap<String, usize>,
}

impl HeaderBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one space-separated token to the first line.
    pub fn add_first_line(&mut self, part: impl core::fmt::Display) -> &mut Self {
        let mut token = String::new();
        let _ = write!(token, "{part}");
        self.first_line.push(token);
        self
    }

    /// Sets `key` to `value`. An existing key, in any case, keeps its
    /// spelling and position.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        let folded = key.to_ascii_lowercase();
        if let Some(&at) = self.index.get(&folded) {
            self.entries[at].1 = value;
        } else {
            self.index.insert(folded, self.entries.len());
            self.entries.push((key, value));
        }
        self
    }

    /// [`Self::add`] for each pair, in order.
    pub fn add_all<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in entries {
            self.add(k, v);
        }
        self
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(&key.to_ascii_lowercase())
            .map(|&at| self.entries[at].1.as_str())
    }

    /// `true` when [`Self::get`] finds `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no header was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First line (when any parts were added) and one `key: value` line per
    /// entry, each terminated by CRLF.
    #[must_use]
    pub fn build(&self) -> String {
        let mut out = String::new();
        if !self.first_line.is_empty() {
            out.push_str(&self.first_line.join(" "));
            out.push_str(HTTP_NEW_LINE);
        }
        self.write_entries(&mut out);
        out
    }

    /// Like [`HeaderBuilder::build`], wrapping the first-line parts in a
    /// request line: `METHOD <parts> VERSION`.
    #[must_use]
    pub fn build_request(&self, method: HttpMethod, version: HttpVersion) -> String {
        let mut out = String::new();
        let _ = write!(out, "{method} {} {version}{HTTP_NEW_LINE}", self.first_line.join(" "));
        self.write_entries(&mut out);
        out
    }

    pub(crate) fn write_entries(&self, out: &mut String) {
        for (k, v) in &self.entries {
            let _ = write!(out, "{k}: {v}{HTTP_NEW_LINE}");
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderBuilder {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderBuilder::new();
        headers.add_all(iter);
        headers
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::http::StatusCode;

    #[test]
    fn request_header_layout() {
        let header = HeaderBuilder::new()
            .add_first_line("units/controller")
            .add_all(basic_headers())
            .build_request(HttpMethod::Get, HttpVersion::Http11);
        let lines: Vec<_> = header.split_terminator(HTTP_NEW_LINE).collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "GET units/controller HTTP/1.1");
        assert_eq!(lines[2], "user-agent: Robo4J-HttpClient");
        assert_eq!(lines[3], "connection: keep-alive");
    }

    #[test]
    fn response_first_line_from_parts() {
        let header = HeaderBuilder::new()
            .add_first_line(HttpVersion::Http11)
            .add_first_line(StatusCode::Ok.code())
            .add_first_line(StatusCode::Ok.reason_phrase())
            .add(field_names::ROBO_UNIT_UID, "1234")
            .build();
        assert_eq!(header, "HTTP/1.1 200 OK\r\nuid: 1234\r\n");
    }

    #[test]
    fn overwrite_is_case_insensitive_and_in_place() {
        let mut headers = HeaderBuilder::new();
        headers.add("Host", "a").add("accept", "*/*").add("HOST", "b");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("host"), Some("b"));
        assert_eq!(headers.build(), "Host: b\r\naccept: */*\r\n");
    }

    #[test]
    fn build_is_idempotent() {
        let headers = request_headers("localhost:8042");
        assert_eq!(headers.build(), headers.build());
        assert!(headers.build().starts_with("host: localhost:8042\r\n"));
    }

    #[test]
    fn collects_from_pairs() {
        let headers: HeaderBuilder = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(headers.iter().collect::<Vec<_>>(), [("a", "1"), ("b", "2")]);
    }
}
