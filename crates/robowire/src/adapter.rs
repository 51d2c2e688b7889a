//! Single-value converters to JSON text.
//!
//! Adapters only write; reading goes through [`crate::JsonReader`] and the
//! codec layer. Each adapter appends to a caller-owned `String` so a whole
//! message can be assembled in one buffer.
//!
//! ```rust
//! use robowire::adapter::{JsonTypeAdapter, NumberAdapter, StringAdapter};
//!
//! assert_eq!(StringAdapter.to_json("say \"hi\"").unwrap(), r#""say \"hi\"""#);
//! assert_eq!(NumberAdapter.to_json(&2.0_f64).unwrap(), "2.0");
//! assert!(NumberAdapter.to_json(&f64::NAN).is_err());
//! ```
use alloc::string::String;
use core::fmt::Write as _;

use crate::{
    codec::{Descriptor, EncodeError, WireEnum},
    document::{Document, Value, write_escaped_string, write_float},
};

/// Converts one value of type `T` to JSON text.
pub trait JsonTypeAdapter<T: ?Sized> {
    /// Appends the JSON form of `value` to `out`.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] when `value` has no JSON representation.
    fn write(&self, value: &T, out: &mut String) -> Result<(), EncodeError>;

    /// Returns the JSON form of `value` as a new string.
    ///
    /// # Errors
    ///
    /// See [`JsonTypeAdapter::write`].
    fn to_json(&self, value: &T) -> Result<String, EncodeError> {
        let mut out = String::new();
        self.write(value, &mut out)?;
        Ok(out)
    }
}

/// Quoted, escaped strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringAdapter;

impl JsonTypeAdapter<str> for StringAdapter {
    fn write(&self, value: &str, out: &mut String) -> Result<(), EncodeError> {
        out.push('"');
        // Writing into a String cannot fail.
        let _ = write_escaped_string(value, out);
        out.push('"');
        Ok(())
    }
}

impl JsonTypeAdapter<String> for StringAdapter {
    fn write(&self, value: &String, out: &mut String) -> Result<(), EncodeError> {
        JsonTypeAdapter::<str>::write(self, value, out)
    }
}

/// `true` and `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanAdapter;

impl JsonTypeAdapter<bool> for BooleanAdapter {
    fn write(&self, value: &bool, out: &mut String) -> Result<(), EncodeError> {
        out.push_str(if *value { "true" } else { "false" });
        Ok(())
    }
}

/// Integers verbatim; floats always with a `.` or an exponent so they read
/// back as floats. NaN and infinities are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberAdapter;

impl JsonTypeAdapter<i64> for NumberAdapter {
    fn write(&self, value: &i64, out: &mut String) -> Result<(), EncodeError> {
        let _ = write!(out, "{value}");
        Ok(())
    }
}

impl JsonTypeAdapter<f64> for NumberAdapter {
    fn write(&self, value: &f64, out: &mut String) -> Result<(), EncodeError> {
        if !value.is_finite() {
            return Err(EncodeError::NonFiniteNumber { field: String::new() });
        }
        let _ = write_float(*value, out);
        Ok(())
    }
}

/// Enum-like values, written as their quoted variant name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumAdapter;

impl<E: WireEnum> JsonTypeAdapter<E> for EnumAdapter {
    fn write(&self, value: &E, out: &mut String) -> Result<(), EncodeError> {
        StringAdapter.write(value.name(), out)
    }
}

/// Generic values and documents, written recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAdapter;

impl JsonTypeAdapter<Value> for DocumentAdapter {
    fn write(&self, value: &Value, out: &mut String) -> Result<(), EncodeError> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => BooleanAdapter.write(b, out)?,
            Value::Integer(n) => NumberAdapter.write(n, out)?,
            Value::Float(n) => NumberAdapter.write(n, out)?,
            Value::String(s) => StringAdapter.write(s.as_str(), out)?,
            Value::Document(doc) => self.write(doc, out)?,
        }
        Ok(())
    }
}

impl JsonTypeAdapter<Document> for DocumentAdapter {
    fn write(&self, doc: &Document, out: &mut String) -> Result<(), EncodeError> {
        if doc.is_array() {
            out.push('[');
            for (i, v) in doc.elements().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.write(v, out).map_err(|e| e.at_field(&alloc::format!("[{i}]")))?;
            }
            out.push(']');
        } else {
            out.push('{');
            for (i, (k, v)) in doc.entries().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                StringAdapter.write(k, out)?;
                out.push(':');
                self.write(v, out).map_err(|e| e.at_field(k))?;
            }
            out.push('}');
        }
        Ok(())
    }
}

/// Composite values described by a [`Descriptor`]: fields are written in
/// declared order as one JSON object.
#[derive(Debug)]
pub struct ObjectAdapter<'d, T> {
    descriptor: &'d Descriptor<T>,
}

impl<'d, T> ObjectAdapter<'d, T> {
    /// Writes values of `T` through `descriptor`.
    #[must_use]
    pub fn new(descriptor: &'d Descriptor<T>) -> Self {
        Self { descriptor }
    }
}

impl<T> JsonTypeAdapter<T> for ObjectAdapter<'_, T> {
    fn write(&self, value: &T, out: &mut String) -> Result<(), EncodeError> {
        out.push('{');
        for (i, field) in self.descriptor.fields().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            StringAdapter.write(field.name(), out)?;
            out.push(':');
            field.encode(value, out).map_err(|e| e.at_field(field.name()))?;
        }
        out.push('}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::read;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Direct,
        Relative,
    }

    impl WireEnum for Mode {
        const VARIANTS: &'static [Self] = &[Mode::Direct, Mode::Relative];

        fn name(&self) -> &'static str {
            match self {
                Mode::Direct => "DIRECT",
                Mode::Relative => "RELATIVE",
            }
        }
    }

    #[test]
    fn scalar_adapters() {
        assert_eq!(BooleanAdapter.to_json(&true).unwrap(), "true");
        assert_eq!(NumberAdapter.to_json(&-42_i64).unwrap(), "-42");
        assert_eq!(NumberAdapter.to_json(&1e300_f64).unwrap(), "1e300");
        assert_eq!(NumberAdapter.to_json(&0.5_f64).unwrap(), "0.5");
        assert_eq!(StringAdapter.to_json("tab\there").unwrap(), r#""tab\there""#);
        assert_eq!(EnumAdapter.to_json(&Mode::Relative).unwrap(), r#""RELATIVE""#);
    }

    #[test]
    fn infinity_is_rejected() {
        let err = NumberAdapter.to_json(&f64::INFINITY).unwrap_err();
        assert_eq!(err, EncodeError::NonFiniteNumber { field: String::new() });
    }

    #[test]
    fn document_adapter_matches_display() {
        let doc = read(r#"{"a":[1,2.5,"x",null,{"b":false}],"c":"é"}"#).unwrap();
        assert_eq!(DocumentAdapter.to_json(&doc).unwrap(), doc.to_string());
    }

    #[test]
    fn document_adapter_names_bad_float() {
        let mut inner = Document::new_array();
        inner.push(1.0).unwrap();
        inner.push(f64::NAN).unwrap();
        let mut doc = Document::new_object();
        doc.add("samples", inner).unwrap();
        let err = DocumentAdapter.to_json(&doc).unwrap_err();
        assert_eq!(err.to_string(), "field 'samples[1]' is not a finite number");
    }
}
