//! Event-based JSON parser.
//!
//! [`Parser`] reads a byte slice and reports what it finds to a [`Consumer`]
//! as a flat sequence of events. Nesting lives on a heap stack, so inputs
//! nested millions of levels deep parse without touching the call stack.
//!
//! ```
//! use tessera_parse::{Event, Parser};
//!
//! let events = Parser::new(br#"{"a": [1]}"#).parse_to_vec().unwrap();
//! assert_eq!(events[1], Event::Key("a".into()));
//! ```

pub use tessera_tokenizer::{Position, Span, TokenKind, Utf8Policy};

mod consumer;
pub use consumer::{Consumer, Validator};

mod error;
pub use error::{Expected, ParseError, ParseErrorKind};

mod event;
pub use event::Event;

mod options;
pub use options::ParseOptions;

mod parser;
pub use parser::{ParseOutcome, Parser, accept};
