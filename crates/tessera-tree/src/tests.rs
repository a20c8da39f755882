use super::*;
use tessera_parse::Utf8Policy;
use tessera_testhelpers::{Marked, nested};

fn parse_error(source: &str) -> ParseError {
    match parse(source) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected parse error for {source:?}, got {other:?}"),
    }
}

#[test]
fn test_parse_simple() {
    tessera_testhelpers::init_tracing();
    let v = parse(r#"{"name": "Alice", "age": 30, "admin": false}"#).unwrap();
    assert_eq!(v["name"].as_str(), Some("Alice"));
    assert_eq!(v["age"].as_i64(), Some(30));
    assert_eq!(v["admin"].as_bool(), Some(false));
}

#[test]
fn test_number_classification() {
    let v = parse("[0, -0, 9223372036854775807, 9223372036854775808, 18446744073709551616, 1e2, -1.5]")
        .unwrap();
    let kinds: Vec<Kind> = v.iter().map(|item| item.value.kind()).collect();
    assert_eq!(
        kinds,
        [
            Kind::Integer,
            Kind::Integer,
            Kind::Integer,
            Kind::Unsigned,
            Kind::Float,
            Kind::Float,
            Kind::Float,
        ]
    );
    assert_eq!(v[3], Value::Unsigned(9_223_372_036_854_775_808));
    assert_eq!(v[4], Value::Float(18446744073709551616.0));
}

#[test]
fn test_missing_value_position() {
    let marked = Marked::new("{\"a\":\u{00BB}}");
    let err = parse_error(&marked.source);
    assert!(err.is_syntax());
    assert_eq!(err.offset(), marked.offset);
    assert_eq!(err.position.line(), 1);
    assert_eq!(err.position.column(), 6);
}

#[test]
fn test_bad_escape_position() {
    let err = parse_error(r#""\q""#);
    assert!(err.is_lexical());
    assert_eq!(err.offset(), 2);
}

#[test]
fn test_position_on_later_line() {
    let marked = Marked::new("{\n  \"a\": 1,\n  \"b\": \u{00BB}nul\n}");
    let err = parse(marked.bytes()).unwrap_err();
    let err = err.as_parse_error().unwrap();
    assert_eq!(err.offset(), marked.offset);
    assert_eq!(err.position.line(), 3);
    assert_eq!(err.position.column(), 8);
}

#[test]
fn test_empty_input() {
    let err = parse_error("");
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    assert!(parse_many("", ParseOptions::default()).unwrap().is_empty());
}

#[test]
fn test_parse_with_ignores_multiple_values() {
    let options = ParseOptions::new().allow_multiple_values(true);
    let err = parse_with("1 2", options).unwrap_err();
    assert!(matches!(
        err.as_parse_error().map(|e| &e.kind),
        Some(ParseErrorKind::TrailingContent { .. })
    ));
}

#[test]
fn test_utf8_policy() {
    let source = b"[\"a\xffb\"]";
    assert!(parse(source).is_err());
    let v = parse_with(source, ParseOptions::new().utf8(Utf8Policy::Substitute)).unwrap();
    assert_eq!(v[0].as_str(), Some("a\u{FFFD}b"));
}

#[test]
fn test_from_reader() {
    let v = from_reader(&b"{\"k\": [true]}"[..]).unwrap();
    assert_eq!(v["k"][0], Value::Bool(true));
}

#[test]
fn test_from_reader_io_error() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }
    match from_reader(Broken) {
        Err(Error::Io(err)) => assert_eq!(err.to_string(), "disk on fire"),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_deep_input_with_depth_limit() {
    let source = nested(5_000_000, "[", "]");
    let options = ParseOptions::new().max_depth(10_000);
    let err = parse_with(&source, options).unwrap_err();
    let err = err.as_parse_error().unwrap();
    assert_eq!(
        err.kind,
        ParseErrorKind::DepthLimitExceeded { limit: 10_000 }
    );
}

#[test]
fn test_deep_tree_builds_and_drops() {
    let depth = 150_000;
    let source = nested(depth, "[", "]");
    let v = parse(&source).unwrap();
    let mut current = &v;
    let mut levels = 0;
    while let Some(inner) = current.get_index(0) {
        current = inner;
        levels += 1;
    }
    assert_eq!(levels, depth - 1);
    drop(v);
}
