use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::fmt;

use super::DecodeError;
use crate::{
    adapter::{BooleanAdapter, JsonTypeAdapter, NumberAdapter, StringAdapter},
    codec::EncodeError,
    document::Value,
};

/// The wire type of one descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON number without fraction or exponent.
    Integer,
    /// Any JSON number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// Enum-like value, named by its type.
    Enum(&'static str),
    /// Nested message, named by its descriptor.
    Message(&'static str),
    /// JSON array with elements of one type.
    Array(Box<FieldType>),
    /// A field that may be `null`.
    Optional(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Float => f.write_str("float"),
            FieldType::Boolean => f.write_str("boolean"),
            FieldType::Enum(name) => write!(f, "enum {name}"),
            FieldType::Message(name) => write!(f, "object {name}"),
            FieldType::Array(inner) => write!(f, "array of {inner}"),
            FieldType::Optional(inner) => write!(f, "{inner} or null"),
        }
    }
}

/// A Rust type that can sit in a message field.
///
/// Implemented for strings, the integer and float primitives, `bool`, and
/// `Vec`/`Option` of any of them. Enum-like fields and nested messages are
/// declared with [`FieldDescriptor::enumeration`](super::FieldDescriptor::enumeration)
/// and [`FieldDescriptor::message`](super::FieldDescriptor::message) instead.
pub trait WireField: Sized {
    /// The wire type, used in error messages.
    fn field_type() -> FieldType;

    /// Appends the JSON form of `self`.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] for values with no JSON form.
    fn write_json(&self, out: &mut String) -> Result<(), EncodeError>;

    /// Converts a non-null document value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::FieldType`], [`DecodeError::OutOfRange`] or
    /// [`DecodeError::FloatOutOfRange`] with an empty field path; the
    /// descriptor fills the path in.
    fn from_value(value: &Value) -> Result<Self, DecodeError>;
}

impl WireField for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        StringAdapter.write(self.as_str(), out)
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch(Self::field_type(), other)),
        }
    }
}

impl WireField for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        BooleanAdapter.write(self, out)
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::mismatch(Self::field_type(), value))
    }
}

impl WireField for i64 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        NumberAdapter.write(self, out)
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::mismatch(Self::field_type(), value))
    }
}

macro_rules! narrow_integer_field {
    ($($ty:ty),*) => {$(
        impl WireField for $ty {
            fn field_type() -> FieldType {
                FieldType::Integer
            }

            fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
                NumberAdapter.write(&i64::from(*self), out)
            }

            fn from_value(value: &Value) -> Result<Self, DecodeError> {
                let n = i64::from_value(value)?;
                <$ty>::try_from(n).map_err(|_| DecodeError::OutOfRange {
                    field: String::new(),
                    value: n,
                    expected: Self::field_type(),
                })
            }
        }
    )*};
}

narrow_integer_field!(i8, i16, i32, u8, u16, u32);

impl WireField for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        NumberAdapter.write(self, out)
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        // Integers are accepted for float fields.
        value
            .as_f64()
            .ok_or_else(|| DecodeError::mismatch(Self::field_type(), value))
    }
}

impl WireField for f32 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        NumberAdapter.write(&f64::from(*self), out)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let wide = f64::from_value(value)?;
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(DecodeError::FloatOutOfRange {
                field: String::new(),
                value: wide,
            })
        }
    }
}

impl<F: WireField> WireField for Vec<F> {
    fn field_type() -> FieldType {
        FieldType::Array(Box::new(F::field_type()))
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        out.push('[');
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            item.write_json(out).map_err(|e| e.at_field(&format!("[{i}]")))?;
        }
        out.push(']');
        Ok(())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Document(doc) if doc.is_array() => doc
                .elements()
                .enumerate()
                .map(|(i, v)| F::from_value(v).map_err(|e| e.at_field(&format!("[{i}]"))))
                .collect(),
            other => Err(DecodeError::mismatch(Self::field_type(), other)),
        }
    }
}

impl<F: WireField> WireField for Option<F> {
    fn field_type() -> FieldType {
        FieldType::Optional(Box::new(F::field_type()))
    }

    fn write_json(&self, out: &mut String) -> Result<(), EncodeError> {
        match self {
            Some(v) => v.write_json(out),
            None => {
                out.push_str("null");
                Ok(())
            }
        }
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            v => F::from_value(v).map(Some),
        }
    }
}

/// An enum-like type carried on the wire as its variant name.
///
/// ```rust
/// use robowire::WireEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Direction { Left, Right }
///
/// impl WireEnum for Direction {
///     const VARIANTS: &'static [Self] = &[Direction::Left, Direction::Right];
///     fn name(&self) -> &'static str {
///         match self { Direction::Left => "LEFT", Direction::Right => "RIGHT" }
///     }
/// }
///
/// assert_eq!(Direction::from_name("RIGHT"), Some(Direction::Right));
/// ```
pub trait WireEnum: Copy + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Name written on the wire.
    fn name(&self) -> &'static str;

    /// Exact, case-sensitive lookup by name.
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn narrow_float_rejects_overflow() {
        assert_eq!(f32::from_value(&Value::Float(1.5)), Ok(1.5));
        assert_eq!(f32::from_value(&Value::Integer(-3)), Ok(-3.0));
        let err = f32::from_value(&Value::Float(1e300)).unwrap_err().at_field("gain");
        assert_eq!(err.to_string(), "field 'gain': 1e300 does not fit in a 32-bit float");
    }

    #[test]
    fn narrow_integer_rejects_overflow() {
        assert!(matches!(
            u8::from_value(&Value::Integer(256)),
            Err(DecodeError::OutOfRange { value: 256, .. })
        ));
    }
}
