//! Wire core for unit-to-unit messaging: a JSON document model and reader,
//! typed message codecs built on explicit field descriptors, and HTTP-style
//! and datagram framing of encoded messages.
//!
//! Inbound, raw bytes are split by [`http`] into a first line, headers and a
//! body, and the body is decoded by a [`CodecRegistry`] into a typed message.
//! Outbound, the registry encodes the message and the framing layer assembles
//! first line, headers and body into wire text.
//!
//! ```rust
//! use robowire::{CodecRegistry, Descriptor, FieldDescriptor, Message};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct SimpleCommand {
//!     value: String,
//!     kind: String,
//! }
//!
//! impl Message for SimpleCommand {
//!     fn descriptor() -> Descriptor<Self> {
//!         Descriptor::new("SimpleCommand")
//!             .with(FieldDescriptor::field("value", |c: &Self| &c.value, |c, v| c.value = v))
//!             .with(FieldDescriptor::field("type", |c: &Self| &c.kind, |c, v| c.kind = v))
//!     }
//! }
//!
//! let mut registry = CodecRegistry::new();
//! registry.register::<SimpleCommand>();
//!
//! let cmd: SimpleCommand = registry.decode(r#"{"value":"move","type":"DIRECT"}"#).unwrap();
//! assert_eq!(cmd.kind, "DIRECT");
//! assert_eq!(registry.encode(&cmd).unwrap(), r#"{"value":"move","type":"DIRECT"}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod adapter;
pub mod codec;
mod document;
mod error;
pub mod http;
mod reader;

#[cfg(test)]
mod tests;

pub use codec::{
    Codec, CodecRegistry, DecodeError, Descriptor, EncodeError, FieldDescriptor, FieldType, Message, WireEnum,
    WireField,
};
pub use document::{Document, DocumentKind, StructureError, Value};
pub use error::WireError;
pub use reader::{
    ErrorSource, IntegerOverflow, JsonReader, ReaderError, ReaderOptions, SyntaxError, read, read_with_options,
};
