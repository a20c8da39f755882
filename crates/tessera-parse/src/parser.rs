//! Event-based JSON parser.
//!
//! Nesting is tracked on an explicit heap stack, so the call stack stays flat
//! no matter how deep the document goes.

use std::borrow::Cow;

use tessera_tokenizer::{Position, Span, Token, TokenKind, TokenValue, Tokenizer};
use tracing::{debug, trace};

use crate::{Consumer, Event, Expected, ParseError, ParseErrorKind, ParseOptions, Validator};

/// How a parse that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All input was consumed.
    Complete,
    /// The consumer asked to stop.
    Stopped,
}

impl ParseOutcome {
    /// Whether the whole input was parsed.
    pub fn is_complete(self) -> bool {
        self == ParseOutcome::Complete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
enum PathSegment<'src> {
    Index(usize),
    /// `None` until the object's first key is read.
    Key(Option<Cow<'src, str>>),
}

enum Flow {
    Continue,
    Stop,
}

/// Forward an event, bailing out if the consumer declines to continue.
macro_rules! emit {
    ($call:expr) => {
        if !$call {
            return Ok(Flow::Stop);
        }
    };
}

/// Event-based parser for JSON documents.
pub struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
    /// Single-token lookahead slot.
    pending: Option<Token<'src>>,
    options: ParseOptions,
    stack: Vec<Container>,
    path: Vec<PathSegment<'src>>,
}

impl<'src> Parser<'src> {
    /// Create a parser with default options.
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(source: &'src [u8], options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::with_options(source, options.lex_options()),
            pending: None,
            options,
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// The options this parser runs with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the whole input, delivering events to `consumer`.
    ///
    /// On failure the consumer's [`Consumer::parse_error`] is called once
    /// before the error is returned.
    pub fn parse<C: Consumer<'src> + ?Sized>(
        mut self,
        consumer: &mut C,
    ) -> Result<ParseOutcome, ParseError> {
        debug!(options = ?self.options, "parsing");
        match self.parse_document(consumer) {
            Ok(outcome) => {
                debug!(?outcome, "parse finished");
                Ok(outcome)
            }
            Err(err) => {
                debug!(%err, "parse failed");
                consumer.parse_error(&err);
                Err(err)
            }
        }
    }

    /// Convenience: parse and collect all events.
    pub fn parse_to_vec(self) -> Result<Vec<Event<'src>>, ParseError> {
        let mut events = Vec::new();
        self.parse(&mut events)?;
        Ok(events)
    }

    fn parse_document<C: Consumer<'src> + ?Sized>(
        &mut self,
        consumer: &mut C,
    ) -> Result<ParseOutcome, ParseError> {
        if !self.options.allow_multiple_values {
            if let Flow::Stop = self.parse_value(consumer)? {
                return Ok(ParseOutcome::Stopped);
            }
            let token = self.next()?;
            if token.kind != TokenKind::Eof {
                return Err(self.error_at(
                    ParseErrorKind::TrailingContent { found: token.kind },
                    token.position,
                    token.span,
                ));
            }
            return Ok(ParseOutcome::Complete);
        }

        loop {
            let token = self.next()?;
            if token.kind == TokenKind::Eof {
                return Ok(ParseOutcome::Complete);
            }
            self.stash(token);
            if let Flow::Stop = self.parse_value(consumer)? {
                return Ok(ParseOutcome::Stopped);
            }
        }
    }

    /// Parse one complete value, including everything nested in it.
    fn parse_value<C: Consumer<'src> + ?Sized>(
        &mut self,
        consumer: &mut C,
    ) -> Result<Flow, ParseError> {
        'value: loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::LBrace => {
                    self.enter(Container::Object, &token)?;
                    emit!(consumer.begin_object());
                    let token = self.next()?;
                    if token.kind == TokenKind::RBrace {
                        self.leave();
                        emit!(consumer.end_object());
                    } else {
                        let key = self.expect_key(token, Expected::KeyOrEndObject)?;
                        if let Flow::Stop = self.member(key, consumer)? {
                            return Ok(Flow::Stop);
                        }
                        continue 'value;
                    }
                }
                TokenKind::LBracket => {
                    self.enter(Container::Array, &token)?;
                    emit!(consumer.begin_array());
                    let token = self.next()?;
                    if token.kind == TokenKind::RBracket {
                        self.leave();
                        emit!(consumer.end_array());
                    } else {
                        self.stash(token);
                        continue 'value;
                    }
                }
                _ => {
                    if let Flow::Stop = self.scalar(token, consumer)? {
                        return Ok(Flow::Stop);
                    }
                }
            }

            // A value just completed: close containers until one of them
            // asks for another value, or the top level is reached.
            loop {
                let Some(&container) = self.stack.last() else {
                    return Ok(Flow::Continue);
                };
                let token = self.next()?;
                match (container, token.kind) {
                    (Container::Array, TokenKind::Comma) => {
                        if self.options.allow_trailing_commas {
                            let next = self.next()?;
                            if next.kind == TokenKind::RBracket {
                                self.leave();
                                emit!(consumer.end_array());
                                continue;
                            }
                            self.stash(next);
                        }
                        if let Some(PathSegment::Index(index)) = self.path.last_mut() {
                            *index += 1;
                        }
                        continue 'value;
                    }
                    (Container::Array, TokenKind::RBracket) => {
                        self.leave();
                        emit!(consumer.end_array());
                    }
                    (Container::Object, TokenKind::Comma) => {
                        let token = self.next()?;
                        if token.kind == TokenKind::RBrace && self.options.allow_trailing_commas {
                            self.leave();
                            emit!(consumer.end_object());
                            continue;
                        }
                        let key = self.expect_key(token, Expected::Key)?;
                        if let Flow::Stop = self.member(key, consumer)? {
                            return Ok(Flow::Stop);
                        }
                        continue 'value;
                    }
                    (Container::Object, TokenKind::RBrace) => {
                        self.leave();
                        emit!(consumer.end_object());
                    }
                    (Container::Array, _) => {
                        return Err(self.unexpected(&token, Expected::CommaOrEndArray));
                    }
                    (Container::Object, _) => {
                        return Err(self.unexpected(&token, Expected::CommaOrEndObject));
                    }
                }
            }
        }
    }

    fn scalar<C: Consumer<'src> + ?Sized>(
        &mut self,
        token: Token<'src>,
        consumer: &mut C,
    ) -> Result<Flow, ParseError> {
        trace!(kind = ?token.kind, offset = token.span.start, "scalar");
        let Token {
            kind,
            span,
            position,
            value,
        } = token;
        let more = match value {
            TokenValue::String(value) => consumer.string(value),
            TokenValue::Integer(value) => consumer.number_integer(value),
            TokenValue::Unsigned(value) => consumer.number_unsigned(value),
            TokenValue::Float(value) => consumer.number_float(value),
            TokenValue::None => match kind {
                TokenKind::Null => consumer.null(),
                TokenKind::True => consumer.boolean(true),
                TokenKind::False => consumer.boolean(false),
                _ => return Err(self.unexpected_kind(kind, position, span, Expected::Value)),
            },
        };
        Ok(if more { Flow::Continue } else { Flow::Stop })
    }

    /// Emit a member key and consume the colon after it.
    fn member<C: Consumer<'src> + ?Sized>(
        &mut self,
        key: Cow<'src, str>,
        consumer: &mut C,
    ) -> Result<Flow, ParseError> {
        if let Some(PathSegment::Key(slot)) = self.path.last_mut() {
            *slot = Some(key.clone());
        }
        emit!(consumer.key(key));
        let token = self.next()?;
        if token.kind != TokenKind::Colon {
            return Err(self.unexpected(&token, Expected::Colon));
        }
        Ok(Flow::Continue)
    }

    fn expect_key(
        &self,
        token: Token<'src>,
        expected: Expected,
    ) -> Result<Cow<'src, str>, ParseError> {
        match token.value {
            TokenValue::String(key) => Ok(key),
            _ => Err(self.unexpected_kind(token.kind, token.position, token.span, expected)),
        }
    }

    fn enter(&mut self, container: Container, token: &Token<'src>) -> Result<(), ParseError> {
        if let Some(limit) = self.options.max_depth
            && self.stack.len() >= limit
        {
            return Err(self.error_at(
                ParseErrorKind::DepthLimitExceeded { limit },
                token.position,
                token.span,
            ));
        }
        self.stack.push(container);
        if self.options.track_path {
            self.path.push(match container {
                Container::Array => PathSegment::Index(0),
                Container::Object => PathSegment::Key(None),
            });
        }
        trace!(depth = self.stack.len(), ?container, "enter");
        Ok(())
    }

    fn leave(&mut self) {
        let container = self.stack.pop();
        self.path.pop();
        trace!(depth = self.stack.len(), ?container, "leave");
    }

    fn next(&mut self) -> Result<Token<'src>, ParseError> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }
        match self.tokenizer.next_token() {
            Ok(token) => Ok(token),
            Err(err) => Err(ParseError::from(err).with_path(self.current_path())),
        }
    }

    fn stash(&mut self, token: Token<'src>) {
        debug_assert!(self.pending.is_none(), "double stash");
        self.pending = Some(token);
    }

    fn unexpected(&self, token: &Token<'src>, expected: Expected) -> ParseError {
        self.unexpected_kind(token.kind, token.position, token.span, expected)
    }

    fn unexpected_kind(
        &self,
        found: TokenKind,
        position: Position,
        span: Span,
        expected: Expected,
    ) -> ParseError {
        let kind = if found == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof { expected }
        } else {
            ParseErrorKind::UnexpectedToken { found, expected }
        };
        self.error_at(kind, position, span)
    }

    fn error_at(&self, kind: ParseErrorKind, position: Position, span: Span) -> ParseError {
        ParseError::new(kind, position, span).with_path(self.current_path())
    }

    /// JSON Pointer to the node under construction, if tracking is on.
    fn current_path(&self) -> Option<String> {
        if !self.options.track_path {
            return None;
        }
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Index(index) => {
                    out.push('/');
                    out.push_str(&index.to_string());
                }
                PathSegment::Key(Some(key)) => {
                    out.push('/');
                    for c in key.chars() {
                        match c {
                            '~' => out.push_str("~0"),
                            '/' => out.push_str("~1"),
                            c => out.push(c),
                        }
                    }
                }
                PathSegment::Key(None) => {}
            }
        }
        Some(out)
    }
}

/// Check that `source` is well-formed under `options` without building
/// anything.
pub fn accept(source: &[u8], options: ParseOptions) -> bool {
    matches!(
        Parser::with_options(source, options).parse(&mut Validator),
        Ok(ParseOutcome::Complete)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_testhelpers::Marked;
    use tessera_tokenizer::LexErrorKind;

    fn parse(source: &str) -> Vec<Event<'_>> {
        parse_with(source, ParseOptions::default())
    }

    fn parse_with(source: &str, options: ParseOptions) -> Vec<Event<'_>> {
        tracing::debug!(source, "parsing");
        let mut events = Vec::new();
        let _ = Parser::with_options(source.as_bytes(), options).parse(&mut events);
        tracing::debug!(?events, "parsed");
        events
    }

    fn error_of(source: &str, options: ParseOptions) -> ParseError {
        match Parser::with_options(source.as_bytes(), options).parse(&mut Validator) {
            Err(err) => err,
            Ok(outcome) => panic!("expected error for {source:?}, got {outcome:?}"),
        }
    }

    /// Stops after a fixed number of events.
    struct StopAfter {
        events: Vec<Event<'static>>,
        remaining: usize,
        errors: usize,
    }

    impl StopAfter {
        fn new(remaining: usize) -> Self {
            Self {
                events: Vec::new(),
                remaining,
                errors: 0,
            }
        }

        fn record(&mut self, event: Event<'_>) -> bool {
            self.events.push(event.into_owned());
            self.remaining -= 1;
            self.remaining > 0
        }
    }

    impl<'src> Consumer<'src> for StopAfter {
        fn null(&mut self) -> bool {
            self.record(Event::Null)
        }
        fn boolean(&mut self, value: bool) -> bool {
            self.record(Event::Bool(value))
        }
        fn number_integer(&mut self, value: i64) -> bool {
            self.record(Event::Integer(value))
        }
        fn number_unsigned(&mut self, value: u64) -> bool {
            self.record(Event::Unsigned(value))
        }
        fn number_float(&mut self, value: f64) -> bool {
            self.record(Event::Float(value))
        }
        fn string(&mut self, value: Cow<'src, str>) -> bool {
            self.record(Event::String(value))
        }
        fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool {
            self.record(Event::Binary { bytes, subtype })
        }
        fn begin_object(&mut self) -> bool {
            self.record(Event::BeginObject)
        }
        fn key(&mut self, key: Cow<'src, str>) -> bool {
            self.record(Event::Key(key))
        }
        fn end_object(&mut self) -> bool {
            self.record(Event::EndObject)
        }
        fn begin_array(&mut self) -> bool {
            self.record(Event::BeginArray)
        }
        fn end_array(&mut self) -> bool {
            self.record(Event::EndArray)
        }
        fn parse_error(&mut self, _error: &ParseError) {
            self.errors += 1;
        }
    }

    #[test]
    fn test_scalars() {
        tessera_testhelpers::init_tracing();
        assert_eq!(parse("null"), vec![Event::Null]);
        assert_eq!(parse(" true "), vec![Event::Bool(true)]);
        assert_eq!(parse("false"), vec![Event::Bool(false)]);
        assert_eq!(parse("-7"), vec![Event::Integer(-7)]);
        assert_eq!(
            parse("18446744073709551615"),
            vec![Event::Unsigned(u64::MAX)]
        );
        assert_eq!(parse("1.5"), vec![Event::Float(1.5)]);
        assert_eq!(parse(r#""hi""#), vec![Event::String("hi".into())]);
    }

    #[test]
    fn test_object_events() {
        let events = parse(r#"{"a": [1, {}], "b": null}"#);
        assert_eq!(
            events,
            vec![
                Event::BeginObject,
                Event::Key("a".into()),
                Event::BeginArray,
                Event::Integer(1),
                Event::BeginObject,
                Event::EndObject,
                Event::EndArray,
                Event::Key("b".into()),
                Event::Null,
                Event::EndObject,
            ]
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("[]"), vec![Event::BeginArray, Event::EndArray]);
        assert_eq!(parse("{ }"), vec![Event::BeginObject, Event::EndObject]);
        assert_eq!(
            parse("[[],{}]"),
            vec![
                Event::BeginArray,
                Event::BeginArray,
                Event::EndArray,
                Event::BeginObject,
                Event::EndObject,
                Event::EndArray,
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_are_all_reported() {
        let events = parse(r#"{"a":1,"a":2}"#);
        let keys = events
            .iter()
            .filter(|e| matches!(e, Event::Key(_)))
            .count();
        assert_eq!(keys, 2);
    }

    #[test]
    fn test_missing_value_is_syntax_error() {
        let marked = Marked::new("{\"a\":\u{00BB}}");
        let err = error_of(&marked.source, ParseOptions::default());
        assert!(err.is_syntax());
        assert_eq!(err.offset(), marked.offset);
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::RBrace,
                expected: Expected::Value,
            }
        );
    }

    #[test]
    fn test_bad_escape_is_lexical_error() {
        let err = error_of(r#""\q""#, ParseOptions::default());
        assert!(err.is_lexical());
        assert_eq!(err.offset(), 2);
        assert_eq!(err.kind, ParseErrorKind::Lexical(LexErrorKind::InvalidEscape('q')));
    }

    #[test]
    fn test_error_is_last_event() {
        let events = parse("[1, 2");
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events.last(),
            Some(Event::Error(ParseError {
                kind: ParseErrorKind::UnexpectedEof {
                    expected: Expected::CommaOrEndArray
                },
                ..
            }))
        ));
    }

    #[test]
    fn test_empty_input() {
        let err = error_of("", ParseOptions::default());
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedEof {
                expected: Expected::Value
            }
        );
        assert_eq!(err.offset(), 0);
        assert!(!accept(b"   ", ParseOptions::default()));
    }

    #[test]
    fn test_trailing_content() {
        let marked = Marked::new("1 \u{00BB}2");
        let err = error_of(&marked.source, ParseOptions::default());
        assert_eq!(
            err.kind,
            ParseErrorKind::TrailingContent {
                found: TokenKind::Integer
            }
        );
        assert_eq!(err.offset(), marked.offset);
    }

    #[test]
    fn test_multiple_values() {
        let options = ParseOptions::new().allow_multiple_values(true);
        assert_eq!(
            parse_with("1 [true]\n\"x\"", options),
            vec![
                Event::Integer(1),
                Event::BeginArray,
                Event::Bool(true),
                Event::EndArray,
                Event::String("x".into()),
            ]
        );
        assert!(parse_with("  ", options).is_empty());
        assert!(accept(b"", options));
    }

    #[test]
    fn test_unexpected_tokens() {
        let cases: &[(&str, Expected)] = &[
            ("{\"a\" 1}", Expected::Colon),
            ("{1:2}", Expected::KeyOrEndObject),
            ("{\"a\":1,}", Expected::Key),
            ("[1 2]", Expected::CommaOrEndArray),
            ("{\"a\":1 \"b\"}", Expected::CommaOrEndObject),
            ("[,]", Expected::Value),
            ("]", Expected::Value),
        ];
        for (source, expected) in cases {
            let err = error_of(source, ParseOptions::default());
            match err.kind {
                ParseErrorKind::UnexpectedToken { expected: got, .. } => {
                    assert_eq!(got, *expected, "for {source:?}")
                }
                other => panic!("unexpected error kind {other:?} for {source:?}"),
            }
        }
    }

    #[test]
    fn test_trailing_commas() {
        let options = ParseOptions::new().allow_trailing_commas(true);
        assert!(!accept(b"[1,]", ParseOptions::default()));
        assert!(accept(b"[1,]", options));
        assert!(accept(br#"{"a":1,}"#, options));
        assert!(accept(b"[[1,],]", options));
        assert!(!accept(b"[,]", options));
        assert!(!accept(b"[1,,]", options));
        assert!(!accept(b"{,}", options));
    }

    #[test]
    fn test_comments() {
        let source = "// leading\n[1, /* two */ 2]";
        assert!(!accept(source.as_bytes(), ParseOptions::default()));
        let options = ParseOptions::new().ignore_comments(true);
        assert_eq!(
            parse_with(source, options),
            vec![
                Event::BeginArray,
                Event::Integer(1),
                Event::Integer(2),
                Event::EndArray
            ]
        );
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().max_depth(2);
        assert!(accept(b"[[1]]", options));
        assert!(accept(b"[{\"a\":1}]", options));
        let marked = Marked::new("[[\u{00BB}[1]]]");
        let err = error_of(&marked.source, options);
        assert_eq!(err.kind, ParseErrorKind::DepthLimitExceeded { limit: 2 });
        assert_eq!(err.offset(), marked.offset);
        assert!(accept(b"1", ParseOptions::new().max_depth(0)));
        assert!(!accept(b"[]", ParseOptions::new().max_depth(0)));
    }

    #[test]
    fn test_stop_early() {
        let mut consumer = StopAfter::new(3);
        let outcome = Parser::new(b"[1, 2, 3, 4]").parse(&mut consumer);
        assert_eq!(outcome, Ok(ParseOutcome::Stopped));
        assert_eq!(
            consumer.events,
            vec![Event::BeginArray, Event::Integer(1), Event::Integer(2)]
        );
        assert_eq!(consumer.errors, 0);
    }

    #[test]
    fn test_stop_on_last_event_is_still_stopped() {
        let mut consumer = StopAfter::new(1);
        assert_eq!(
            Parser::new(b"1").parse(&mut consumer),
            Ok(ParseOutcome::Stopped)
        );
    }

    #[test]
    fn test_parse_error_callback_once() {
        let mut consumer = StopAfter::new(100);
        assert!(Parser::new(b"[1, }").parse(&mut consumer).is_err());
        assert_eq!(consumer.errors, 1);
    }

    #[test]
    fn test_path_tracking() {
        let options = ParseOptions::new().track_path(true);
        let err = error_of(r#"{"a": [1, {"b": tru}]}"#, options);
        assert!(err.is_lexical());
        assert_eq!(err.path.as_deref(), Some("/a/1/b"));

        let err = error_of(r#"{"a/b~": [}"#, options);
        assert_eq!(err.path.as_deref(), Some("/a~1b~0/0"));

        let err = error_of("1 2", options);
        assert_eq!(err.path.as_deref(), Some(""));

        let err = error_of("[1, 2", ParseOptions::default());
        assert_eq!(err.path, None);
    }

    #[test]
    fn test_parse_to_vec() {
        let events = Parser::new(b"[true]").parse_to_vec().unwrap();
        assert_eq!(
            events,
            vec![Event::BeginArray, Event::Bool(true), Event::EndArray]
        );
        assert!(Parser::new(b"[").parse_to_vec().is_err());
    }

    #[test]
    fn test_replay_recorded_events() {
        let events = parse(r#"{"k":[1,"two"]}"#);
        let mut copy = Vec::new();
        for event in events.clone() {
            assert!(event.dispatch(&mut copy));
        }
        assert_eq!(copy, events);
    }
}
