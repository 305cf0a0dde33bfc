//! JSON serializers: [`Printer`] (compact) and [`PrettyPrinter`] (indented).
//!
//! Both share the same scalar rules:
//!
//! - **Numbers**: shortest text that reads back as the same `f64`, never in
//!   exponent form, with no trailing `.0` on integral values. `-0` prints as
//!   `0`. `NaN` and the infinities have no JSON spelling and print as `null`.
//! - **Strings**: `"` and `\` are escaped, control characters below U+0020
//!   use `\b \f \n \r \t` or `\u00XX`, and everything else is written as raw
//!   UTF-8.
//! - **Objects** keep insertion order.
//!
//! # Example
//! ```
//! use jsonkit_core::{array, object, PrettyPrinter, Printer};
//!
//! let v = object! { "a" => array![1, 2.5, "x"], "b" => object! {} };
//! assert_eq!(Printer::new().print(&v), r#"{"a":[1,2.5,"x"],"b":{}}"#);
//! assert_eq!(
//!     PrettyPrinter::new().print(&v),
//!     "{\n  \"a\": [\n    1,\n    2.5,\n    \"x\"\n  ],\n  \"b\": {}\n}"
//! );
//! ```

use std::fmt;

use crate::value::Value;

/// Default pretty-printing indent width, in spaces.
pub const DEFAULT_INDENT: usize = 2;

/// Compact serializer with no insignificant whitespace.
///
/// [`print`](Printer::print) sizes each output from the previous one, so a
/// printer kept across similar documents allocates once per call.
/// [`write_to`](Printer::write_to) encodes through a reused buffer and hands
/// the writer the whole text in one `write_str`.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    size_hint: usize,
    buf: String,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, value: &Value) -> String {
        let mut out = String::with_capacity(self.size_hint);
        encode_compact(value, &mut out);
        self.size_hint = out.len();
        out
    }

    pub fn write_to<W: fmt::Write>(&mut self, value: &Value, out: &mut W) -> fmt::Result {
        self.buf.clear();
        encode_compact(value, &mut self.buf);
        out.write_str(&self.buf)
    }
}

/// Multi-line serializer: one element or entry per line, nested containers
/// indented by a fixed number of spaces per level.
///
/// Reuses allocations the same way as [`Printer`].
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    indent: String,
    size_hint: usize,
    buf: String,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// A printer indenting each level by `width` spaces.
    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
            size_hint: 0,
            buf: String::new(),
        }
    }

    pub fn print(&mut self, value: &Value) -> String {
        let mut out = String::with_capacity(self.size_hint);
        encode_pretty(value, &self.indent, 0, &mut out);
        self.size_hint = out.len();
        out
    }

    pub fn write_to<W: fmt::Write>(&mut self, value: &Value, out: &mut W) -> fmt::Result {
        self.buf.clear();
        encode_pretty(value, &self.indent, 0, &mut self.buf);
        out.write_str(&self.buf)
    }
}

/// Compact text of `value`.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    encode_compact(value, &mut out);
    out
}

/// Pretty text of `value` with the default indent.
pub fn to_string_pretty(value: &Value) -> String {
    let mut out = String::new();
    encode_pretty(value, &" ".repeat(DEFAULT_INDENT), 0, &mut out);
    out
}

/// Compact by default, pretty with the alternate flag (`{:#}`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if f.alternate() {
            to_string_pretty(self)
        } else {
            to_string(self)
        };
        f.write_str(&text)
    }
}

fn encode_compact(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(object) => {
            out.push('{');
            for (i, (key, item)) in object.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(key, out);
                out.push(':');
                encode_compact(item, out);
            }
            out.push('}');
        }
        _ => encode_scalar(value, out),
    }
}

/// Emit `value` at nesting `depth`. The caller has already written the
/// indentation for the first line; closing brackets are indented here.
fn encode_pretty(value: &Value, indent: &str, depth: usize, out: &mut String) {
    match value {
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(object) if object.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(indent, depth + 1, out);
                encode_pretty(item, indent, depth + 1, out);
            }
            newline(indent, depth, out);
            out.push(']');
        }
        Value::Object(object) => {
            out.push('{');
            for (i, (key, item)) in object.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(indent, depth + 1, out);
                encode_string(key, out);
                out.push_str(": ");
                encode_pretty(item, indent, depth + 1, out);
            }
            newline(indent, depth, out);
            out.push('}');
        }
        _ => encode_scalar(value, out),
    }
}

fn newline(indent: &str, depth: usize, out: &mut String) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

fn encode_scalar(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => encode_string(s, out),
        // containers are handled by the callers
        Value::Array(_) | Value::Object(_) => {}
    }
}

/// Canonical text of a number.
pub(crate) fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    // Normalize -0 to 0
    if n == 0.0 {
        return "0".to_string();
    }
    // f64's Display is the shortest round-trip form and never uses an
    // exponent or a trailing ".0".
    format!("{}", n)
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NULL;
    use crate::{array, object};

    #[test]
    fn scalars() {
        assert_eq!(to_string(&NULL), "null");
        assert_eq!(to_string(&Value::from(true)), "true");
        assert_eq!(to_string(&Value::from(false)), "false");
        assert_eq!(to_string(&Value::from("a string")), "\"a string\"");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(1.5e-7), "0.00000015");
        assert_eq!(format_number(f64::NAN), "null");
        assert_eq!(format_number(f64::NEG_INFINITY), "null");
    }

    #[test]
    fn string_escapes() {
        let v = Value::from("q\"b\\n\nt\tr\rb\u{08}f\u{0C}z\u{00}e\u{1f}/λ😀");
        assert_eq!(
            to_string(&v),
            r#""q\"b\\n\nt\tr\rb\bf\fz\u0000e\u001f/λ😀""#
        );
    }

    #[test]
    fn compact_containers() {
        let v = array![1, 2, 3, "4", false, NULL];
        assert_eq!(to_string(&v), r#"[1,2,3,"4",false,null]"#);
        assert_eq!(to_string(&array![]), "[]");
        assert_eq!(to_string(&object! {}), "{}");

        let o = object! { "b" => 1, "a" => array![array!["key", "value"]] };
        assert_eq!(to_string(&o), r#"{"b":1,"a":[["key","value"]]}"#);
    }

    #[test]
    fn pretty_layout() {
        let v = object! {
            "name" => "json",
            "properties" => object! {
                "size" => 42,
                "integers" => array![1, 2, "3"],
                "empty" => array![],
            },
        };
        let expected = r#"{
  "name": "json",
  "properties": {
    "size": 42,
    "integers": [
      1,
      2,
      "3"
    ],
    "empty": []
  }
}"#;
        assert_eq!(PrettyPrinter::new().print(&v), expected);
        assert_eq!(format!("{v:#}"), expected);
    }

    #[test]
    fn pretty_custom_indent() {
        let v = array![object! { "a" => 1 }];
        assert_eq!(
            PrettyPrinter::with_indent(4).print(&v),
            "[\n    {\n        \"a\": 1\n    }\n]"
        );
    }

    #[test]
    fn pretty_scalars_and_empties_stay_on_one_line() {
        let mut printer = PrettyPrinter::new();
        assert_eq!(printer.print(&Value::from(25)), "25");
        assert_eq!(printer.print(&array![]), "[]");
        assert_eq!(printer.print(&object! {}), "{}");
    }

    #[test]
    fn write_to_appends_to_any_writer() {
        let v = object! { "a" => array![1, "x"] };
        let mut out = String::from("prefix ");
        let mut printer = Printer::new();
        printer.write_to(&v, &mut out).unwrap();
        printer.write_to(&NULL, &mut out).unwrap();
        assert_eq!(out, r#"prefix {"a":[1,"x"]}null"#);

        let mut pretty = String::new();
        PrettyPrinter::new().write_to(&v, &mut pretty).unwrap();
        assert_eq!(pretty, PrettyPrinter::new().print(&v));
    }

    #[test]
    fn write_to_reports_writer_errors() {
        struct Refuse;
        impl fmt::Write for Refuse {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }
        assert!(Printer::new().write_to(&array![1], &mut Refuse).is_err());
        assert!(PrettyPrinter::new().write_to(&array![1], &mut Refuse).is_err());
    }

    #[test]
    fn printers_are_reusable() {
        let mut printer = Printer::new();
        assert_eq!(printer.print(&array![1]), "[1]");
        assert_eq!(printer.print(&Value::from("x")), "\"x\"");
        assert_eq!(format!("{}", object! { "k" => NULL }), r#"{"k":null}"#);
    }
}
