//! Glue between framed messages and the codec registry.
//!
//! A unit handler receives a typed request and returns a typed response; the
//! functions here do the decoding, encoding and error mapping around it.
use alloc::format;

use super::{DecoratedRequest, DecoratedResponse, StatusCode, field_names, field_values};
use crate::{
    WireError,
    codec::{CodecRegistry, DecodeError, EncodeError, quote},
};

/// Status code reported to the peer for a failed exchange.
///
/// Malformed input is the client's fault; a type without a codec is an
/// unsupported media type; failures while producing output are ours.
#[must_use]
pub fn status_for(error: &WireError) -> StatusCode {
    match error {
        WireError::Decode(DecodeError::UnregisteredType { .. })
        | WireError::Encode(EncodeError::UnregisteredType { .. }) => StatusCode::UnsupportedMediaType,
        WireError::Reader(_) | WireError::Decode(_) | WireError::Protocol(_) => StatusCode::BadRequest,
        WireError::Encode(_) | WireError::Structure(_) => StatusCode::InternalServerError,
    }
}

/// A JSON response `{"error":"..."}` describing `error`.
#[must_use]
pub fn failure_response(error: &WireError) -> DecoratedResponse {
    let status = status_for(error);
    tracing::warn!(status = status.code(), error = %error, "exchange failed");
    let mut response = DecoratedResponse::from_status(status);
    response
        .add_header(field_names::CONTENT_TYPE, field_values::CONTENT_TYPE_JSON)
        .add_message(&format!("{{\"error\":{}}}", quote(&format!("{error}"))));
    response
}

/// Decodes the body of `request` as a `T`. A request without a body decodes
/// like an empty string and fails.
///
/// # Errors
///
/// Whatever the registry's codec for `T` reports.
pub fn decode_request_body<T: Default + 'static>(
    registry: &CodecRegistry,
    request: &DecoratedRequest,
) -> Result<T, WireError> {
    Ok(registry.decode::<T>(request.body().unwrap_or_default())?)
}

/// A JSON response carrying `value`.
///
/// # Errors
///
/// Whatever the registry's codec for `T` reports.
pub fn encode_response<T: Default + 'static>(
    registry: &CodecRegistry,
    status: StatusCode,
    value: &T,
) -> Result<DecoratedResponse, WireError> {
    let body = registry.encode(value)?;
    let mut response = DecoratedResponse::from_status(status);
    response
        .add_header(field_names::CONTENT_TYPE, field_values::CONTENT_TYPE_JSON)
        .add_message(&body);
    Ok(response)
}

/// Decodes `request` into `Req`, runs `handler`, and encodes its `Resp` as a
/// `200 OK`. Any failure along the way, including one returned by the
/// handler, becomes a [`failure_response`].
pub fn handle_request<Req, Resp, F>(registry: &CodecRegistry, request: &DecoratedRequest, handler: F) -> DecoratedResponse
where
    Req: Default + 'static,
    Resp: Default + 'static,
    F: FnOnce(Req) -> Result<Resp, WireError>,
{
    let result = decode_request_body::<Req>(registry, request)
        .and_then(handler)
        .and_then(|resp| encode_response(registry, StatusCode::Ok, &resp));
    match result {
        Ok(response) => {
            tracing::debug!(path = request.denominator().path(), "exchange handled");
            response
        }
        Err(error) => failure_response(&error),
    }
}
