use alloc::{format, string::String};

use thiserror::Error;

use super::FieldType;
use crate::reader::ReaderError;

/// Failure turning JSON text or a document into a typed message.
///
/// `field` is a path such as `outer.inner` or `list[2]`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The text is not a JSON document.
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// A message was read from a top-level array.
    #[error("expected a JSON object for {type_name}, found an array")]
    ExpectedObject {
        /// Descriptor name of the message.
        type_name: &'static str,
    },
    /// A value of the wrong JSON type.
    #[error("field '{field}': expected {expected}, found {found}")]
    FieldType {
        /// Path of the offending field.
        field: String,
        /// What the descriptor declares.
        expected: FieldType,
        /// JSON type name of what was found.
        found: &'static str,
    },
    /// An integer that does not fit the field's integer type.
    #[error("field '{field}': {value} is out of range for {expected}")]
    OutOfRange {
        /// Path of the offending field.
        field: String,
        /// The integer as read.
        value: i64,
        /// What the descriptor declares.
        expected: FieldType,
    },
    /// A number that becomes infinite when narrowed to `f32`.
    #[error("field '{field}': {value:e} does not fit in a 32-bit float")]
    FloatOutOfRange {
        /// Path of the offending field.
        field: String,
        /// The number as read.
        value: f64,
    },
    /// A string that names no variant of an enum-like field.
    #[error("field '{field}': unknown variant \"{value}\"")]
    UnknownVariant {
        /// Path of the offending field.
        field: String,
        /// The unmatched name.
        value: String,
    },
    /// The target type was never registered.
    #[error("no codec registered for {type_name}")]
    UnregisteredType {
        /// Rust type name of the target.
        type_name: &'static str,
    },
}

impl DecodeError {
    /// Prefixes the field path with `name`, so errors raised inside nested
    /// messages and arrays read as `outer.inner` or `list[2]`.
    #[must_use]
    pub fn at_field(mut self, name: &str) -> Self {
        if let DecodeError::FieldType { field, .. }
        | DecodeError::OutOfRange { field, .. }
        | DecodeError::FloatOutOfRange { field, .. }
        | DecodeError::UnknownVariant { field, .. } = &mut self
        {
            *field = join_path(name, field);
        }
        self
    }

    pub(crate) fn mismatch(expected: FieldType, found: &crate::Value) -> Self {
        DecodeError::FieldType {
            field: String::new(),
            expected,
            found: found.type_name(),
        }
    }
}

/// Failure turning a typed message into JSON text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// NaN or infinity, which JSON cannot spell.
    #[error("field '{field}' is not a finite number")]
    NonFiniteNumber {
        /// Path of the offending field.
        field: String,
    },
    /// The source type was never registered.
    #[error("no codec registered for {type_name}")]
    UnregisteredType {
        /// Rust type name of the source.
        type_name: &'static str,
    },
}

impl EncodeError {
    /// See [`DecodeError::at_field`].
    #[must_use]
    pub fn at_field(mut self, name: &str) -> Self {
        if let EncodeError::NonFiniteNumber { field } = &mut self {
            *field = join_path(name, field);
        }
        self
    }
}

fn join_path(outer: &str, inner: &str) -> String {
    if inner.is_empty() {
        outer.into()
    } else if inner.starts_with('[') {
        format!("{outer}{inner}")
    } else {
        format!("{outer}.{inner}")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn field_paths_compose() {
        let err = DecodeError::mismatch(FieldType::Integer, &crate::Value::Boolean(true))
            .at_field("[3]")
            .at_field("speeds")
            .at_field("drive");
        assert_eq!(err.to_string(), "field 'drive.speeds[3]': expected integer, found boolean");
    }

    #[test]
    fn unregistered_is_untouched_by_paths() {
        let err = EncodeError::UnregisteredType { type_name: "Foo" }.at_field("x");
        assert_eq!(err.to_string(), "no codec registered for Foo");
    }
}
