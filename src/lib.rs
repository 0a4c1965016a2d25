//! A strict JSON parser with spans.
//!
//! This library turns a JSON text buffer into an owned value tree, validating
//! every byte against the grammar along the way. We deviate from typical
//! deserialization libraries in that the primary goal is not to be *fast*,
//! but to reject malformed input precisely: a failed parse reports exactly
//! which of a fixed set of error kinds occurred and the byte span where it
//! happened, so a frontend can render compiler-style diagnostics instead of a
//! generic "invalid JSON" message.
//!
//! There is no streaming mode, no schema validation, and no serializer; one
//! call parses one complete document:
//!
//! ```
//! use strictjson::{parse, Value};
//!
//! let value = parse(r#"{ "enabled": true, "retries": 3 }"#).unwrap();
//! assert_eq!(value.get("retries").and_then(Value::as_number), Some(3.0));
//!
//! let err = parse("{ \"enabled\": tru }").unwrap_err();
//! assert_eq!(err.kind().name(), "invalid-value");
//! ```
//!
//! Documents with duplicate object keys are grammatically well-formed and
//! parse successfully; all members are retained in source order so callers
//! can decide what duplicates mean for them.

mod cursor;
mod error;
mod parser;
mod span;
mod value;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use span::Span;
pub use value::Value;
