#![expect(missing_docs)]

use quickcheck::{Arbitrary, Gen, QuickCheck};
use robowire::{
    CodecRegistry, DecodeError, Descriptor, FieldDescriptor, FieldType, Message, ReaderOptions, WireEnum, read,
};

#[derive(Debug, Clone, Default, PartialEq)]
struct SimpleCommand {
    value: String,
    kind: String,
}

impl Message for SimpleCommand {
    fn descriptor() -> Descriptor<Self> {
        Descriptor::new("SimpleCommand")
            .with(FieldDescriptor::field("value", |c: &Self| &c.value, |c: &mut Self, v| c.value = v))
            .with(FieldDescriptor::field("type", |c: &Self| &c.kind, |c: &mut Self, v| c.kind = v))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Direction {
    #[default]
    Forward,
    Backward,
    Left,
    Right,
}

impl WireEnum for Direction {
    const VARIANTS: &'static [Self] = &[Self::Forward, Self::Backward, Self::Left, Self::Right];

    fn name(&self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Backward => "BACKWARD",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ScanPoint {
    angle: f32,
    range: f32,
}

impl Message for ScanPoint {
    fn descriptor() -> Descriptor<Self> {
        Descriptor::new("ScanPoint")
            .with(FieldDescriptor::field("angle", |p: &Self| &p.angle, |p: &mut Self, v| p.angle = v))
            .with(FieldDescriptor::field("range", |p: &Self| &p.range, |p: &mut Self, v| p.range = v))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Scan {
    id: u32,
    direction: Direction,
    origin: ScanPoint,
    points: Vec<ScanPoint>,
    tags: Vec<String>,
    note: Option<String>,
    complete: bool,
}

impl Message for Scan {
    fn descriptor() -> Descriptor<Self> {
        Descriptor::new("Scan")
            .with(FieldDescriptor::field("id", |s: &Self| &s.id, |s: &mut Self, v| s.id = v))
            .with(FieldDescriptor::enumeration(
                "direction",
                |s: &Self| s.direction,
                |s: &mut Self, v| s.direction = v,
            ))
            .with(FieldDescriptor::message("origin", |s: &Self| &s.origin, |s: &mut Self, v| s.origin = v))
            .with(FieldDescriptor::messages(
                "points",
                |s: &Self| s.points.as_slice(),
                |s: &mut Self, v| s.points = v,
            ))
            .with(FieldDescriptor::field("tags", |s: &Self| &s.tags, |s: &mut Self, v| s.tags = v))
            .with(FieldDescriptor::field("note", |s: &Self| &s.note, |s: &mut Self, v| s.note = v))
            .with(FieldDescriptor::field("complete", |s: &Self| &s.complete, |s: &mut Self, v| s.complete = v))
    }
}

fn finite_f32(g: &mut Gen) -> f32 {
    let mut value = f32::arbitrary(g);
    while !value.is_finite() {
        value = f32::arbitrary(g);
    }
    value
}

impl Arbitrary for ScanPoint {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            angle: finite_f32(g),
            range: finite_f32(g),
        }
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(Self::VARIANTS).unwrap_or(&Self::Forward)
    }
}

impl Arbitrary for Scan {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 8;
        Self {
            id: u32::arbitrary(g),
            direction: Direction::arbitrary(g),
            origin: ScanPoint::arbitrary(g),
            points: (0..len).map(|_| ScanPoint::arbitrary(g)).collect(),
            tags: Vec::arbitrary(g),
            note: Option::arbitrary(g),
            complete: bool::arbitrary(g),
        }
    }
}

fn registry() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    registry.register::<SimpleCommand>().register::<Scan>();
    registry
}

#[test]
fn simple_command_wire_form() {
    let registry = registry();
    let text = r#"{"value":"move","type":"DIRECT"}"#;
    let cmd: SimpleCommand = registry.decode(text).unwrap();
    assert_eq!(
        cmd,
        SimpleCommand {
            value: "move".into(),
            kind: "DIRECT".into(),
        }
    );
    assert_eq!(registry.encode(&cmd).unwrap(), text);
}

#[test]
fn nested_message_round_trip() {
    let registry = registry();
    let scan = Scan {
        id: 7,
        direction: Direction::Left,
        origin: ScanPoint { angle: 0.5, range: 1.25 },
        points: vec![
            ScanPoint { angle: -1.0, range: 2.0 },
            ScanPoint { angle: 1.0, range: 3.5 },
        ],
        tags: vec!["lidar".into(), "front".into()],
        note: None,
        complete: true,
    };
    let text = registry.encode(&scan).unwrap();
    insta::assert_snapshot!(text, @r#"{"id":7,"direction":"LEFT","origin":{"angle":0.5,"range":1.25},"points":[{"angle":-1.0,"range":2.0},{"angle":1.0,"range":3.5}],"tags":["lidar","front"],"note":null,"complete":true}"#);
    let back: Scan = registry.decode(&text).unwrap();
    assert_eq!(back, scan);
}

/// Property: any scan decodes back from its own encoding.
#[test]
fn scan_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(scan: Scan) -> bool {
        let registry = registry();
        registry
            .encode(&scan)
            .is_ok_and(|text| registry.decode::<Scan>(&text).is_ok_and(|back| back == scan))
    }

    let tests = if is_ci::cached() { 5_000 } else { 500 };
    QuickCheck::new().tests(tests).quickcheck(prop as fn(Scan) -> bool);
}

#[quickcheck_macros::quickcheck]
fn simple_command_roundtrip(value: String, kind: String) -> bool {
    let registry = registry();
    let cmd = SimpleCommand { value, kind };
    registry
        .encode(&cmd)
        .is_ok_and(|text| registry.decode::<SimpleCommand>(&text).is_ok_and(|back| back == cmd))
}

#[test]
fn missing_fields_keep_defaults() {
    let scan: Scan = registry().decode(r#"{"id":3,"note":"partial","unknown":[1,2]}"#).unwrap();
    assert_eq!(scan.id, 3);
    assert_eq!(scan.note.as_deref(), Some("partial"));
    assert_eq!(scan.direction, Direction::Forward);
    assert!(scan.points.is_empty());
}

#[test]
fn top_level_keys_in_source_order() {
    let doc = read(r#"{"c":1,"a":2,"b":3,"d":4}"#).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["c", "a", "b", "d"]);
}

#[test]
fn three_level_nesting() {
    let doc = read(r#"{"outer":[{"inner":"x"},{"inner":"y"}]}"#).unwrap();
    let list = doc.get_document("outer").unwrap();
    let inner: Vec<_> = list
        .elements()
        .filter_map(|v| v.as_document())
        .filter_map(|d| d.get_str("inner"))
        .collect();
    assert_eq!(inner, ["x", "y"]);
}

#[test]
fn decode_errors_name_the_field() {
    let registry = registry();
    let err = registry.decode::<Scan>(r#"{"points":[{"angle":1},{"angle":"wide"}]}"#).unwrap_err();
    assert_eq!(
        err,
        DecodeError::FieldType {
            field: "points[1].angle".into(),
            expected: FieldType::Float,
            found: "string",
        }
    );

    let err = registry.decode::<Scan>(r#"{"id":-1}"#).unwrap_err();
    assert!(matches!(err, DecodeError::OutOfRange { ref field, value: -1, .. } if field == "id"));

    let err = registry.decode::<Scan>(r#"{"origin":{"angle":1e300}}"#).unwrap_err();
    assert!(matches!(err, DecodeError::FloatOutOfRange { ref field, .. } if field == "origin.angle"));

    let err = registry.decode::<Scan>(r#"{"direction":"UP"}"#).unwrap_err();
    assert_eq!(err.to_string(), "field 'direction': unknown variant \"UP\"");
}

#[test]
fn array_where_object_expected() {
    let err = registry().decode::<SimpleCommand>("[]").unwrap_err();
    assert_eq!(
        err,
        DecodeError::ExpectedObject {
            type_name: "SimpleCommand"
        }
    );
}

#[test]
fn syntax_errors_surface_through_decode() {
    let err = registry().decode::<SimpleCommand>(r#"{"value":}"#).unwrap_err();
    let DecodeError::Reader(reader) = err else {
        panic!("expected a reader error, got {err:?}");
    };
    assert_eq!((reader.line(), reader.column()), (1, 10));
}

#[test]
fn unregistered_types_are_reported() {
    let registry = CodecRegistry::new();
    let err = registry.decode::<SimpleCommand>("{}").unwrap_err();
    assert!(matches!(err, DecodeError::UnregisteredType { .. }));
    assert!(registry.encode(&SimpleCommand::default()).is_err());
}

#[test]
fn registry_options_apply_to_decode() {
    let mut registry = CodecRegistry::with_options(ReaderOptions {
        max_depth: Some(1),
        ..Default::default()
    });
    registry.register::<Scan>();
    assert!(registry.decode::<Scan>(r#"{"id":1}"#).is_ok());
    assert!(registry.decode::<Scan>(r#"{"origin":{}}"#).is_err());
}
