#![expect(missing_docs)]

use robowire::{
    CodecRegistry, Descriptor, FieldDescriptor, Message, WireError,
    http::{
        self, DatagramBodyType, DatagramDecoratedRequest, DatagramDenominator, DecoratedRequest, DecoratedResponse,
        Denominator, HeaderBuilder, HttpMethod, HttpVersion, ProtocolError, RequestDenominator, ResponseDenominator,
        StatusCode, field_names,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
struct StringMessage {
    message: String,
}

impl Message for StringMessage {
    fn descriptor() -> Descriptor<Self> {
        Descriptor::new("StringMessage").with(FieldDescriptor::field(
            "message",
            |m: &Self| &m.message,
            |m: &mut Self, v| m.message = v,
        ))
    }
}

#[test]
fn request_first_line() {
    let denominator = RequestDenominator::with_path(HttpMethod::Get, "/units/status", HttpVersion::Http11);
    assert_eq!(denominator.generate(), "GET /units/status HTTP/1.1");
}

#[test]
fn response_first_line() {
    let denominator = ResponseDenominator::new(StatusCode::Ok, HttpVersion::Http11);
    assert_eq!(denominator.generate(), "HTTP/1.1 200 OK");
}

#[test]
fn body_appends_update_content_length() {
    let mut request = DecoratedRequest::new(RequestDenominator::with_path(
        HttpMethod::Post,
        "/units/stringConsumer",
        HttpVersion::Http11,
    ));
    request.add_message("hello");
    request.add_message("world");
    assert_eq!(request.body(), Some("helloworld"));
    assert_eq!(request.header(field_names::CONTENT_LENGTH), Some("10"));
    assert!(request.to_wire().ends_with("content-length: 10\r\n\r\nhelloworld"));
}

#[test]
fn header_build_is_idempotent() {
    let mut builder = HeaderBuilder::new();
    builder
        .add_first_line(HttpMethod::Post)
        .add_first_line("/units/controller")
        .add_first_line(HttpVersion::Http11)
        .add_all(http::basic_headers())
        .add(field_names::HOST, "localhost:8042");
    let first = builder.build();
    assert_eq!(first, builder.build());
    assert!(first.starts_with("POST /units/controller HTTP/1.1\r\n"));
    assert_eq!(first.matches("\r\n").count(), 9);
}

#[test]
fn typed_request_over_the_wire() {
    let mut registry = CodecRegistry::new();
    registry.register::<StringMessage>();

    let outbound = StringMessage {
        message: "Hello i:0".into(),
    };
    let mut request = DecoratedRequest::new(RequestDenominator::with_path(
        HttpMethod::Post,
        "/units/stringConsumer",
        HttpVersion::Http11,
    ));
    request
        .add_headers(http::request_headers("localhost:8042").iter())
        .add_message(&registry.encode(&outbound).unwrap())
        .add_callback("stringConsumer");
    let wire = request.to_wire();

    let inbound = DecoratedRequest::parse(wire.as_bytes()).unwrap();
    assert_eq!(inbound.header("Host"), Some("localhost:8042"));
    let decoded: StringMessage = http::decode_request_body(&registry, &inbound).unwrap();
    assert_eq!(decoded, outbound);
    assert!(inbound.callbacks().is_empty());
}

#[test]
fn handler_response_round_trip() {
    let mut registry = CodecRegistry::new();
    registry.register::<StringMessage>();

    let raw = b"POST /units/echo HTTP/1.1\r\ncontent-length: 17\r\n\r\n{\"message\":\"hi\"}\n";
    let request = DecoratedRequest::parse(raw).unwrap();
    let response = http::handle_request(&registry, &request, |m: StringMessage| {
        Ok(StringMessage {
            message: m.message.repeat(2),
        })
    });
    let parsed = DecoratedResponse::parse(response.to_wire().as_bytes()).unwrap();
    assert_eq!(parsed.status(), StatusCode::Ok);
    assert_eq!(parsed.body(), Some(r#"{"message":"hihi"}"#));
}

#[test]
fn responses_with_unnamed_codes_parse() {
    let raw = b"HTTP/1.1 401 Unauthorized\r\nwww-authenticate: Basic\r\n\r\n";
    assert_eq!(DecoratedResponse::parse(raw).unwrap().status(), StatusCode::Unauthorized);

    let raw = b"HTTP/1.1 451 Unavailable For Legal Reasons\r\ncontent-length: 2\r\n\r\nno";
    let parsed = DecoratedResponse::parse(raw).unwrap();
    assert_eq!(parsed.status(), StatusCode::Other(451));
    assert_eq!(parsed.body(), Some("no"));
    assert!(parsed.to_wire().starts_with("HTTP/1.1 451 Unavailable For Legal Reasons\r\n"));
}

#[test]
fn malformed_body_becomes_failure_response() {
    let mut registry = CodecRegistry::new();
    registry.register::<StringMessage>();

    let request = DecoratedRequest::parse(b"POST /units/echo HTTP/1.1\r\n\r\n{\"message\":}").unwrap();
    let response = http::handle_request(&registry, &request, |m: StringMessage| Ok(m));
    assert_eq!(response.status(), StatusCode::BadRequest);
    assert!(response.to_wire().starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert_eq!(
        response.body(),
        Some(r#"{"error":"syntax error: invalid character '}' at 1:12"}"#)
    );
}

#[test]
fn protocol_errors_map_to_bad_request() {
    let err: WireError = DecoratedRequest::parse(b"FETCH / HTTP/1.1\r\n\r\n").unwrap_err().into();
    assert_eq!(err, WireError::Protocol(ProtocolError::UnknownMethod("FETCH".into())));
    assert_eq!(http::status_for(&err), StatusCode::BadRequest);
    assert_eq!(http::failure_response(&err).status(), StatusCode::BadRequest);
}

#[test]
fn datagram_round_trip() {
    let mut request = DatagramDecoratedRequest::new(DatagramDenominator::new(
        DatagramBodyType::Json,
        http::path::to_path(http::path::UNITS, &["stringConsumer"]),
    ));
    request.add_message(br#"{"message":"Hello i:0"}"#);
    let bytes = request.to_bytes();
    assert!(bytes.starts_with(b"0001 /units/stringConsumer\r\n\r\n"));

    let parsed = DatagramDecoratedRequest::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.denominator().body_type(), DatagramBodyType::Json);
    assert_eq!(parsed.body(), request.body());
}

#[test]
fn unit_path_configuration() {
    let configs = http::path::parse_unit_paths(
        r#"[{"roboUnit":"imageController","method":"GET","callbacks":["imageProcessor"]},{"roboUnit":"","method":"POST"}]"#,
    )
    .unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].path(), "/units/imageController");
    assert_eq!(configs[0].method, HttpMethod::Get);
    assert_eq!(configs[0].callbacks, ["imageProcessor"]);
    assert_eq!(configs[1].path(), "/");
}
