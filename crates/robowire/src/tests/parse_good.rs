use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use rstest::rstest;

use crate::{Document, DocumentKind, IntegerOverflow, ReaderOptions, Value, read, read_with_options};

fn first(text: &str) -> Value {
    read(text).unwrap().get_index(0).cloned().unwrap()
}

#[test]
fn empty_object() {
    let doc = read("{}").unwrap();
    assert_eq!(doc.kind(), DocumentKind::Object);
    assert!(doc.is_empty());
}

#[test]
fn empty_array() {
    let doc = read("[]").unwrap();
    assert_eq!(doc.kind(), DocumentKind::Array);
    assert!(doc.is_empty());
}

#[test]
fn surrounding_whitespace() {
    let doc = read(" \r\n\t[ 1 , 2 ]\n\n ").unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn key_order_is_kept() {
    let doc = read(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
}

#[test]
fn duplicate_key_replaces_in_place() {
    let doc = read(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(doc.get_i64("a"), Some(3));
}

#[test]
fn nested_objects_bind_to_their_keys() {
    let doc = read(r#"{"pos":{"x":1,"y":{"z":[true]}},"after":"ok"}"#).unwrap();
    let pos = doc.get_document("pos").unwrap();
    assert_eq!(pos.get_i64("x"), Some(1));
    let y = pos.get_document("y").unwrap();
    assert_eq!(y.get_document("z").unwrap().get_index(0), Some(&Value::Boolean(true)));
    assert_eq!(doc.get_str("after"), Some("ok"));
}

#[test]
fn arrays_of_objects() {
    let doc = read(r#"[{"a":1},{"a":2},[],{}]"#).unwrap();
    let kinds: Vec<_> = doc
        .elements()
        .filter_map(Value::as_document)
        .map(Document::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![DocumentKind::Object, DocumentKind::Object, DocumentKind::Array, DocumentKind::Object]
    );
}

#[rstest]
#[case("[0]", Value::Integer(0))]
#[case("[-0]", Value::Integer(0))]
#[case("[42]", Value::Integer(42))]
#[case("[-9223372036854775808]", Value::Integer(i64::MIN))]
#[case("[9223372036854775807]", Value::Integer(i64::MAX))]
#[case("[1.5]", Value::Float(1.5))]
#[case("[-0.25]", Value::Float(-0.25))]
#[case("[1e2]", Value::Float(100.0))]
#[case("[1E+2]", Value::Float(100.0))]
#[case("[12e-1]", Value::Float(1.2))]
#[case("[0.0e0]", Value::Float(0.0))]
fn numbers(#[case] text: &str, #[case] expected: Value) {
    assert_eq!(first(text), expected);
}

#[test]
fn big_integers_widen_to_float_by_default() {
    assert_eq!(first("[18446744073709551616]"), Value::Float(18_446_744_073_709_551_616.0));
    let options = ReaderOptions {
        integer_overflow: IntegerOverflow::Float,
        ..Default::default()
    };
    assert!(read_with_options("[-9223372036854775809]", options).is_ok());
}

#[rstest]
#[case(r#"["plain"]"#, "plain")]
#[case(r#"[""]"#, "")]
#[case(r#"["Aé"]"#, "Aé")]
#[case(r#"["😀"]"#, "😀")]
#[case(r#"["😀 tail"]"#, "😀 tail")]
#[case(r#"["tab\tnew\nline"]"#, "tab\tnew\nline")]
#[case(r#"["\/"]"#, "/")]
#[case("[\"raw é and 中文\"]", "raw é and 中文")]
fn strings(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(first(text).as_str(), Some(expected));
}

#[rstest]
#[case("[true]", Value::Boolean(true))]
#[case("[false]", Value::Boolean(false))]
#[case("[null]", Value::Null)]
fn literals(#[case] text: &str, #[case] expected: Value) {
    assert_eq!(first(text), expected);
}

#[test]
fn keys_may_need_unescaping() {
    let doc = read(r#"{"a\"b":1,"é":2}"#).unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["a\"b", "é"]);
}

#[test]
fn compact_text_is_canonical() {
    let text = r#"{"a":[1,2.5,"x",true,null],"b":{"c":-3}}"#;
    assert_eq!(read(text).unwrap().to_string(), text);
    let spaced = "{ \"a\" : [ 1 , 2.5 , \"x\" , true , null ] , \"b\" : { \"c\" : -3 } }";
    assert_eq!(read(spaced).unwrap().to_string(), text);
}

#[test]
fn escaped_output_reads_back() {
    let doc = read(r#"["quote \" backslash \\ control \u0001 separator  "]"#).unwrap();
    let again = read(&doc.to_string()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn wide_object_reads_in_order() {
    use core::fmt::Write;

    let mut text = String::from("{");
    for i in 0..50_000 {
        if i > 0 {
            text.push(',');
        }
        write!(text, "\"k{i}\":{i}").unwrap();
    }
    text.push_str(",\"k7\":\"last\"}");

    let doc = read(&text).unwrap();
    assert_eq!(doc.len(), 50_000);
    assert_eq!(doc.keys().next(), Some("k0"));
    assert_eq!(doc.keys().last(), Some("k49999"));
    assert_eq!(doc.get_i64("k31337"), Some(31_337));
    assert_eq!(doc.get_str("k7"), Some("last"));
}
