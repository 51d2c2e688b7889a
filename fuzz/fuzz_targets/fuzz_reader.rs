#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use robowire::{Document, ReaderOptions, Value, read, read_with_options};

#[derive(Debug, Arbitrary)]
struct Input {
    allow_unicode_whitespace: bool,
    max_depth: Option<u8>,
    text: String,
}

/// Numbers compare by value: `-0` is an integer here and a float in
/// `serde_json`, and integers past `i64` become floats on both sides.
fn same_number(ours: &Value, theirs: &serde_json::Number) -> bool {
    match (ours, theirs.as_i64()) {
        (Value::Integer(a), Some(b)) => *a == b,
        _ => ours.as_f64() == theirs.as_f64(),
    }
}

fn same_value(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Integer(_) | Value::Float(_), serde_json::Value::Number(n)) => same_number(ours, n),
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Document(doc), _) => same_document(doc, theirs),
        _ => false,
    }
}

fn same_document(ours: &Document, theirs: &serde_json::Value) -> bool {
    match theirs {
        serde_json::Value::Array(items) => {
            ours.is_array()
                && ours.len() == items.len()
                && ours.elements().zip(items).all(|(a, b)| same_value(a, b))
        }
        serde_json::Value::Object(map) => {
            ours.is_object()
                && ours.len() == map.len()
                && ours
                    .entries()
                    .zip(map)
                    .all(|((ka, va), (kb, vb))| ka == kb && same_value(va, vb))
        }
        _ => false,
    }
}

fn reader(input: &Input) {
    let ours = read(&input.text);
    let theirs = serde_json::from_str::<serde_json::Value>(&input.text);

    match (&ours, &theirs) {
        (Ok(doc), Ok(value)) => assert!(same_document(doc, value), "{doc} != {value}"),
        (Ok(doc), Err(e)) => {
            // serde_json stops at 128 levels; deeper documents are ours alone.
            assert!(e.to_string().contains("recursion limit"), "accepted {doc}, serde_json: {e}");
        }
        (Err(e), Ok(value)) => {
            assert!(!value.is_object() && !value.is_array(), "rejected {value}: {e}");
        }
        (Err(_), Err(_)) => {}
    }

    // Options never turn a rejection into an acceptance, except for extra
    // whitespace.
    let options = ReaderOptions {
        allow_unicode_whitespace: input.allow_unicode_whitespace,
        max_depth: input.max_depth.map(usize::from),
        ..Default::default()
    };
    if let Ok(doc) = read_with_options(&input.text, options) {
        if !input.allow_unicode_whitespace {
            assert!(ours.is_ok(), "accepted only with {options:?}: {doc}");
        }
        // Compact output always reads back equal.
        assert_eq!(read(&doc.to_string()).as_ref(), Ok(&doc));
    }
}

fuzz_target!(|input: Input| reader(&input));
