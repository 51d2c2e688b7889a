use thiserror::Error;

use crate::{
    codec::{DecodeError, EncodeError},
    document::StructureError,
    http::ProtocolError,
    reader::ReaderError,
};

/// Any failure raised by the wire core.
///
/// Every layer has its own error type; this enum lets callers that drive a
/// whole exchange use `?` across all of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    /// Malformed JSON text.
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// Misuse of a document.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// JSON that does not fit the target message.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A message with no JSON form.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Malformed framing.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
