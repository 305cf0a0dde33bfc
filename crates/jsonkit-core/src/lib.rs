//! # jsonkit-core
//!
//! A dynamic JSON value model with a strict parser and compact/pretty
//! printers, for programs that need to read, build, query, mutate and emit
//! JSON without a fixed schema.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonkit_core::{array, object, parse, PrettyPrinter, Printer, Type};
//!
//! // Parse
//! let mut v = parse(r#"{"name":"json","integers":[1,2,"3"]}"#).unwrap();
//! assert!(v["integers"].is(Type::Array));
//! assert_eq!(v["integers"][2].convert::<i64>().unwrap(), 3);
//!
//! // Mutate: slot access promotes null into containers
//! v["properties"]["size"] = 42.into();
//! v["integers"].push(4).unwrap();
//!
//! // Print
//! assert_eq!(
//!     Printer::new().print(&v),
//!     r#"{"name":"json","integers":[1,2,"3",4],"properties":{"size":42}}"#
//! );
//!
//! // Build with explicit markers
//! let built = object! { "a" => array![97, 98, 99] };
//! assert_eq!(PrettyPrinter::with_indent(0).print(&built), "{\n\"a\": [\n97,\n98,\n99\n]\n}");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value`, `Type`, `Object`, indexing and construction
//! - [`convert`] — typed conversions (`FromValue`, `Container`)
//! - [`parser`] — text → `Value`
//! - [`printer`] — `Value` → text
//! - [`interop`] — serde and `serde_json` bridges
//! - [`error`] — error types for conversion and parse failures

pub mod convert;
pub mod error;
pub mod interop;
pub mod parser;
pub mod printer;
pub mod value;

pub use convert::{Container, FromValue};
pub use error::{ConversionError, Error, ParseError, Result};
pub use parser::{parse, parse_bytes, Parser};
pub use printer::{to_string, to_string_pretty, PrettyPrinter, Printer};
pub use value::{Array, Object, Type, Value, ValueIndex, NULL};
