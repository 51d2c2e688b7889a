use alloc::{boxed::Box, collections::BTreeMap, string::String};
use core::any::{Any, TypeId, type_name};

use super::{Codec, DecodeError, Descriptor, EncodeError, Message};
use crate::{document::Document, reader::ReaderOptions};

/// The set of codecs known to one process.
///
/// Build it at start-up, register every message type, then share it by
/// reference; it is `Send + Sync` and never mutated after registration.
///
/// ```rust
/// use robowire::{CodecRegistry, DecodeError};
///
/// let registry = CodecRegistry::new();
/// assert!(matches!(
///     registry.decode::<String>("{}"),
///     Err(DecodeError::UnregisteredType { .. })
/// ));
/// ```
#[derive(Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<TypeId, Box<dyn Any + Send + Sync>>,
    options: ReaderOptions,
}

impl core::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.codecs.len())
            .field("options", &self.options)
            .finish()
    }
}

impl CodecRegistry {
    /// An empty registry with default reader options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose codecs all read with `options`.
    #[must_use]
    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            codecs: BTreeMap::new(),
            options,
        }
    }

    /// Registers `T` using its [`Message::descriptor`]. Registering a type
    /// again replaces its codec.
    pub fn register<T: Message>(&mut self) -> &mut Self {
        self.register_with(T::descriptor())
    }

    /// Registers `T` with an explicitly built descriptor.
    pub fn register_with<T: Default + 'static>(&mut self, descriptor: Descriptor<T>) -> &mut Self {
        tracing::debug!(
            codec = descriptor.name(),
            fields = descriptor.fields().len(),
            "registered codec"
        );
        self.codecs
            .insert(TypeId::of::<T>(), Box::new(Codec::new(descriptor, self.options)));
        self
    }

    /// `true` once `T` is registered.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.codecs.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// `true` before anything is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// The codec for `T`, if registered.
    #[must_use]
    pub fn codec<T: 'static>(&self) -> Option<&Codec<T>> {
        self.codecs
            .get(&TypeId::of::<T>())
            .and_then(|codec| codec.downcast_ref::<Codec<T>>())
    }

    /// # Errors
    ///
    /// Returns [`DecodeError::UnregisteredType`] when `T` has no codec, and
    /// otherwise whatever [`Codec::decode`] returns.
    pub fn decode<T: Default + 'static>(&self, text: &str) -> Result<T, DecodeError> {
        self.codec::<T>()
            .ok_or(DecodeError::UnregisteredType {
                type_name: type_name::<T>(),
            })?
            .decode(text)
    }

    /// # Errors
    ///
    /// Returns [`DecodeError::UnregisteredType`] when `T` has no codec, and
    /// otherwise whatever [`Codec::decode_document`] returns.
    pub fn decode_document<T: Default + 'static>(&self, doc: &Document) -> Result<T, DecodeError> {
        self.codec::<T>()
            .ok_or(DecodeError::UnregisteredType {
                type_name: type_name::<T>(),
            })?
            .decode_document(doc)
    }

    /// # Errors
    ///
    /// Returns [`EncodeError::UnregisteredType`] when `T` has no codec, and
    /// otherwise whatever [`Codec::encode`] returns.
    pub fn encode<T: Default + 'static>(&self, value: &T) -> Result<String, EncodeError> {
        self.codec::<T>()
            .ok_or(EncodeError::UnregisteredType {
                type_name: type_name::<T>(),
            })?
            .encode(value)
    }
}
