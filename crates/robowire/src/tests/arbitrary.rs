use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Document, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

fn gen_scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 5 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Integer(i64::arbitrary(g)),
        3 => Value::Float(JsonNumber::arbitrary(g).0),
        _ => Value::String(String::arbitrary(g)),
    }
}

fn gen_document(g: &mut Gen, depth: usize) -> Document {
    let len = usize::arbitrary(g) % 4;
    let mut doc = if bool::arbitrary(g) {
        Document::new_object()
    } else {
        Document::new_array()
    };
    for _ in 0..len {
        let value = if depth > 0 && usize::arbitrary(g) % 3 == 0 {
            Value::Document(gen_document(g, depth - 1))
        } else {
            gen_scalar(g)
        };
        let result = if doc.is_object() {
            doc.add(String::arbitrary(g), value)
        } else {
            doc.push(value)
        };
        assert!(result.is_ok());
    }
    doc
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        gen_document(g, depth)
    }
}
