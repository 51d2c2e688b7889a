//! Typed message codecs.
//!
//! A codec maps between JSON text and one Rust type `T`. The mapping is an
//! explicit [`Descriptor`]: an ordered list of named fields, each with a wire
//! type and a pair of accessors. Descriptors are built once, usually through
//! [`Message::descriptor`], and kept in a [`CodecRegistry`].
//!
//! Decoding starts from `T::default()` and fills each described field from the
//! same-named entry of the JSON object. Missing entries and `null` keep the
//! default; entries with no matching field are ignored. Encoding writes every
//! described field, in declared order, as one JSON object.

mod error;
mod field;
mod registry;

use alloc::{boxed::Box, string::String, sync::Arc, vec::Vec};
use core::fmt;

pub use error::{DecodeError, EncodeError};
pub use field::{FieldType, WireEnum, WireField};
pub use registry::CodecRegistry;

use crate::{
    adapter::{EnumAdapter, JsonTypeAdapter, ObjectAdapter, StringAdapter},
    document::{Document, Value},
    reader::{JsonReader, ReaderOptions},
};

type EncodeFn<T> = Box<dyn Fn(&T, &mut String) -> Result<(), EncodeError> + Send + Sync>;
type DecodeFn<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), DecodeError> + Send + Sync>;

/// One named field of a message type.
pub struct FieldDescriptor<T> {
    name: &'static str,
    field_type: FieldType,
    encode: EncodeFn<T>,
    decode: DecodeFn<T>,
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> FieldDescriptor<T> {
    /// A field of any [`WireField`] type.
    pub fn field<F: WireField + 'static>(
        name: &'static str,
        get: impl Fn(&T) -> &F + Send + Sync + 'static,
        set: impl Fn(&mut T, F) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            field_type: F::field_type(),
            encode: Box::new(move |t: &T, out: &mut String| get(t).write_json(out)),
            decode: Box::new(move |t: &mut T, v: &Value| {
                set(t, F::from_value(v)?);
                Ok(())
            }),
        }
    }

    /// An enum-like field, carried as its variant name.
    pub fn enumeration<E: WireEnum>(
        name: &'static str,
        get: impl Fn(&T) -> E + Send + Sync + 'static,
        set: impl Fn(&mut T, E) + Send + Sync + 'static,
    ) -> Self {
        let field_type = FieldType::Enum(short_type_name::<E>());
        let expected = field_type.clone();
        Self {
            name,
            field_type,
            encode: Box::new(move |t: &T, out: &mut String| EnumAdapter.write(&get(t), out)),
            decode: Box::new(move |t: &mut T, v: &Value| {
                let Value::String(s) = v else {
                    return Err(DecodeError::mismatch(expected.clone(), v));
                };
                let variant = E::from_name(s).ok_or_else(|| DecodeError::UnknownVariant {
                    field: String::new(),
                    value: s.clone(),
                })?;
                set(t, variant);
                Ok(())
            }),
        }
    }

    /// A nested message field, described by `M`'s own descriptor.
    pub fn message<M: Message>(
        name: &'static str,
        get: impl Fn(&T) -> &M + Send + Sync + 'static,
        set: impl Fn(&mut T, M) + Send + Sync + 'static,
    ) -> Self {
        let nested = Arc::new(M::descriptor());
        let for_decode = Arc::clone(&nested);
        Self {
            name,
            field_type: FieldType::Message(nested.name()),
            encode: Box::new(move |t: &T, out: &mut String| ObjectAdapter::new(&*nested).write(get(t), out)),
            decode: Box::new(move |t: &mut T, v: &Value| {
                set(t, for_decode.decode_value(v)?);
                Ok(())
            }),
        }
    }

    /// A field holding a list of nested messages.
    pub fn messages<M: Message>(
        name: &'static str,
        get: impl Fn(&T) -> &[M] + Send + Sync + 'static,
        set: impl Fn(&mut T, Vec<M>) + Send + Sync + 'static,
    ) -> Self {
        let nested = Arc::new(M::descriptor());
        let for_decode = Arc::clone(&nested);
        let field_type = FieldType::Array(Box::new(FieldType::Message(nested.name())));
        let expected = field_type.clone();
        Self {
            name,
            field_type,
            encode: Box::new(move |t: &T, out: &mut String| {
                let adapter = ObjectAdapter::new(&*nested);
                out.push('[');
                for (i, item) in get(t).iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    adapter
                        .write(item, out)
                        .map_err(|e| e.at_field(&alloc::format!("[{i}]")))?;
                }
                out.push(']');
                Ok(())
            }),
            decode: Box::new(move |t: &mut T, v: &Value| {
                let Some(doc) = v.as_document().filter(|d| d.is_array()) else {
                    return Err(DecodeError::mismatch(expected.clone(), v));
                };
                let items = doc
                    .elements()
                    .enumerate()
                    .map(|(i, item)| {
                        for_decode
                            .decode_value(item)
                            .map_err(|e| e.at_field(&alloc::format!("[{i}]")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                set(t, items);
                Ok(())
            }),
        }
    }
}

impl<T> FieldDescriptor<T> {
    /// The JSON key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared wire type.
    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub(crate) fn encode(&self, value: &T, out: &mut String) -> Result<(), EncodeError> {
        (self.encode)(value, out)
    }

    pub(crate) fn decode(&self, target: &mut T, value: &Value) -> Result<(), DecodeError> {
        (self.decode)(target, value)
    }
}

/// The ordered field list of one message type.
pub struct Descriptor<T> {
    name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T> Descriptor<T> {
    /// An empty descriptor; `name` appears in error messages.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field; builder form of [`Descriptor::push`].
    #[must_use]
    pub fn with(mut self, field: FieldDescriptor<T>) -> Self {
        self.push(field);
        self
    }

    /// Appends a field. Fields are encoded in the order they are pushed.
    pub fn push(&mut self, field: FieldDescriptor<T>) {
        self.fields.push(field);
    }

    /// The message name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declared order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Writes `value` as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonFiniteNumber`] naming the offending field.
    pub fn encode(&self, value: &T) -> Result<String, EncodeError> {
        ObjectAdapter::new(self).to_json(value)
    }
}

impl<T: Default> Descriptor<T> {
    /// Builds a `T` from an object document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ExpectedObject`] for an array document and
    /// [`DecodeError::FieldType`] when an entry has the wrong type.
    pub fn decode_document(&self, doc: &Document) -> Result<T, DecodeError> {
        if doc.is_array() {
            return Err(DecodeError::ExpectedObject { type_name: self.name });
        }
        let mut out = T::default();
        for field in &self.fields {
            match doc.get(field.name) {
                None | Some(Value::Null) => {}
                Some(v) => field.decode(&mut out, v).map_err(|e| e.at_field(field.name))?,
            }
        }
        Ok(out)
    }

    fn decode_value(&self, value: &Value) -> Result<T, DecodeError> {
        match value {
            Value::Document(doc) if doc.is_object() => self.decode_document(doc),
            other => Err(DecodeError::mismatch(FieldType::Message(self.name), other)),
        }
    }
}

/// A type with a fixed wire shape.
///
/// `descriptor` is called once when the type is registered, and once per
/// enclosing descriptor when the type is nested.
pub trait Message: Default + 'static {
    /// Builds the field list.
    fn descriptor() -> Descriptor<Self>;
}

/// A descriptor bound to reader options: decodes text into `T` and encodes
/// `T` back to text.
#[derive(Debug)]
pub struct Codec<T> {
    descriptor: Descriptor<T>,
    options: ReaderOptions,
}

impl<T: Default> Codec<T> {
    /// Binds `descriptor` to `options`.
    #[must_use]
    pub fn new(descriptor: Descriptor<T>, options: ReaderOptions) -> Self {
        Self { descriptor, options }
    }

    /// The bound descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor<T> {
        &self.descriptor
    }

    /// # Errors
    ///
    /// Returns [`DecodeError::Reader`] for malformed JSON, otherwise see
    /// [`Descriptor::decode_document`].
    pub fn decode(&self, text: &str) -> Result<T, DecodeError> {
        let doc = JsonReader::with_options(text, self.options).read()?;
        self.descriptor.decode_document(&doc)
    }

    /// # Errors
    ///
    /// See [`Descriptor::decode_document`].
    pub fn decode_document(&self, doc: &Document) -> Result<T, DecodeError> {
        self.descriptor.decode_document(doc)
    }

    /// # Errors
    ///
    /// See [`Descriptor::encode`].
    pub fn encode(&self, value: &T) -> Result<String, EncodeError> {
        self.descriptor.encode(value)
    }
}

/// Last path segment of a type name, for messages.
fn short_type_name<T>() -> &'static str {
    let full = core::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Quotes a bare string; shared by the framing layer for error bodies.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::new();
    let _ = StringAdapter.write(s, &mut out);
    out
}
