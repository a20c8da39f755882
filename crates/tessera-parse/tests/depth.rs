//! Pathologically deep inputs must not overflow the call stack.

use tessera_parse::{ParseErrorKind, ParseOptions, Parser, Validator, accept};
use tessera_testhelpers::nested;

const DEEP: usize = 5_000_000;

#[test]
fn deep_arrays_are_accepted() {
    tessera_testhelpers::init_tracing();
    let source = nested(DEEP, "[", "]");
    assert!(accept(&source, ParseOptions::default()));
}

#[test]
fn deep_objects_are_accepted() {
    let depth = 1_000_000;
    let mut source = Vec::new();
    for _ in 0..depth {
        source.extend_from_slice(br#"{"k":"#);
    }
    source.extend_from_slice(b"null");
    source.extend(std::iter::repeat_n(b'}', depth));
    assert!(accept(&source, ParseOptions::default()));
}

#[test]
fn deep_unclosed_input_fails_cleanly() {
    let mut source = nested(DEEP, "[", "]");
    source.truncate(DEEP + 10);
    let err = Parser::new(&source).parse(&mut Validator).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    assert_eq!(err.offset(), DEEP + 10);
}

#[test]
fn depth_limit_stops_deep_input_early() {
    let source = nested(DEEP, "[", "]");
    let err = Parser::with_options(&source, ParseOptions::new().max_depth(512))
        .parse(&mut Validator)
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::DepthLimitExceeded { limit: 512 });
    assert_eq!(err.offset(), 512);
}
