//! Unit paths and their configuration.
//!
//! Units are addressed as `/units/<name>`. Servers and clients are told which
//! units to expose (or call) with a small JSON configuration in one of two
//! shapes:
//!
//! ```json
//! [{"roboUnit":"imageProcessor","method":"POST","callbacks":["archive"]}]
//! ```
//!
//! ```json
//! {"imageProcessor":["POST","archive"]}
//! ```
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use super::HttpMethod;
use crate::{
    codec::{DecodeError, Descriptor, FieldDescriptor, FieldType, Message, WireEnum},
    document::Value,
    reader::read,
};

/// Path segment under which units are exposed.
pub const UNITS: &str = "units";

/// Joins segments into an absolute path: `to_path("units", &["x"])` is
/// `/units/x`.
#[must_use]
pub fn to_path(first: &str, rest: &[&str]) -> String {
    let mut path = format!("/{first}");
    for segment in rest {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Splits a URI query into ordered `(key, value)` pairs.
///
/// Entries without a key are skipped and an entry without `=` gets an empty
/// value. Repeated keys are all kept.
#[must_use]
pub fn parse_query(query: &str, delimiter: &str) -> Vec<(String, String)> {
    query
        .split(delimiter)
        .map(|entry| entry.split_once('=').unwrap_or((entry, "")))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl WireEnum for HttpMethod {
    const VARIANTS: &'static [Self] = &HttpMethod::ALL;

    fn name(&self) -> &'static str {
        HttpMethod::name(*self)
    }
}

/// Which unit a path serves, with what method, and whom to notify.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitPathConfig {
    /// Name of the unit, as in `/units/<name>`.
    pub robo_unit: String,
    /// Method the path answers to.
    pub method: HttpMethod,
    /// Units to notify after handling.
    pub callbacks: Vec<String>,
}

impl UnitPathConfig {
    /// A config without callbacks.
    #[must_use]
    pub fn new(robo_unit: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            robo_unit: robo_unit.into(),
            method,
            callbacks: Vec::new(),
        }
    }

    /// `/units/<robo_unit>`, or `/` for an empty unit name.
    #[must_use]
    pub fn path(&self) -> String {
        if self.robo_unit.is_empty() {
            "/".into()
        } else {
            to_path(UNITS, &[&self.robo_unit])
        }
    }
}

impl Message for UnitPathConfig {
    fn descriptor() -> Descriptor<Self> {
        Descriptor::new("UnitPathConfig")
            .with(FieldDescriptor::field(
                "roboUnit",
                |c: &Self| &c.robo_unit,
                |c, v| c.robo_unit = v,
            ))
            .with(FieldDescriptor::enumeration("method", |c: &Self| c.method, |c, v| c.method = v))
            .with(FieldDescriptor::field(
                "callbacks",
                |c: &Self| &c.callbacks,
                |c, v| c.callbacks = v,
            ))
    }
}

/// Decodes a unit path configuration: an array of objects, or a single
/// object standing for a one-element array.
///
/// # Errors
///
/// Returns [`DecodeError::Reader`] for malformed JSON and the usual field
/// errors for entries of the wrong shape.
pub fn parse_unit_paths(text: &str) -> Result<Vec<UnitPathConfig>, DecodeError> {
    let doc = read(text)?;
    let descriptor = UnitPathConfig::descriptor();
    if doc.is_object() {
        return Ok(alloc::vec![descriptor.decode_document(&doc)?]);
    }
    doc.elements()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Document(entry) if entry.is_object() => descriptor.decode_document(entry),
            other => Err(DecodeError::mismatch(FieldType::Message(descriptor.name()), other)),
        }
        .map_err(|e| e.at_field(&format!("[{i}]"))))
        .collect()
}

/// Decodes the compact `{"unit":["METHOD","callback",...]}` form.
///
/// # Errors
///
/// Returns [`DecodeError::Reader`] for malformed JSON,
/// [`DecodeError::FieldType`] when an entry is not a non-empty array of
/// strings, and [`DecodeError::UnknownVariant`] for unknown methods.
pub fn parse_path_methods(text: &str) -> Result<Vec<UnitPathConfig>, DecodeError> {
    let doc = read(text)?;
    if doc.is_array() {
        return Err(DecodeError::ExpectedObject {
            type_name: "UnitPathConfig",
        });
    }
    let entry_type = FieldType::Array(alloc::boxed::Box::new(FieldType::String));
    doc.entries()
        .map(|(unit, value)| {
            let strings = match value {
                Value::Document(list) if list.is_array() => list
                    .elements()
                    .enumerate()
                    .map(|(i, v)| {
                        v.as_str()
                            .ok_or_else(|| DecodeError::mismatch(FieldType::String, v).at_field(&format!("[{i}]")))
                    })
                    .collect::<Result<Vec<_>, _>>(),
                other => Err(DecodeError::mismatch(entry_type.clone(), other)),
            }
            .map_err(|e| e.at_field(unit))?;
            let Some((method, callbacks)) = strings.split_first() else {
                return Err(DecodeError::mismatch(entry_type.clone(), value).at_field(unit));
            };
            let method = HttpMethod::from_name(method).ok_or_else(|| DecodeError::UnknownVariant {
                field: unit.to_string(),
                value: (*method).to_string(),
            })?;
            Ok(UnitPathConfig {
                robo_unit: unit.to_string(),
                method,
                callbacks: callbacks.iter().map(|c| (*c).to_string()).collect(),
            })
        })
        .collect()
}
