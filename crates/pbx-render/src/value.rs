//! Property values and their text form.
//!
//! A project file is an old-style property list: strings, `( )` arrays and
//! `{ }` dictionaries, with `/* */` comments after object references.

use std::borrow::Cow;
use std::fmt::Write;

use pbx_core::ObjectId;

/// A value in an object record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A string, quoted only when it has to be.
    Scalar(String),
    /// A reference to another object, optionally followed by a comment.
    Ref {
        /// The referenced object.
        id: ObjectId,
        /// Label written as `/* comment */`.
        comment: Option<String>,
    },
    /// An ordered array.
    List(Vec<Value>),
    /// A dictionary with a fixed key order.
    Dict(Vec<(String, Value)>),
}

impl Value {
    /// A scalar from anything printable.
    pub fn text(value: impl ToString) -> Self {
        Self::Scalar(value.to_string())
    }

    /// A reference without a comment.
    #[must_use]
    pub const fn bare(id: ObjectId) -> Self {
        Self::Ref { id, comment: None }
    }

    /// A list of scalars.
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::List(values.into_iter().map(Self::text).collect())
    }
}

/// Returns `true` if `c` may appear in an unquoted string.
const fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | '.' | ':')
}

/// Quotes `text` if it cannot be written bare.
///
/// Bare strings consist only of ASCII alphanumerics and `_ $ / . :`, and
/// never contain `//`, which would start a comment. Inside quotes, control
/// characters without a short escape are written as `\Uxxxx`.
///
/// # Examples
///
/// ```
/// use pbx_render::quote;
///
/// assert_eq!(quote("sourcecode.swift"), "sourcecode.swift");
/// assert_eq!(quote("<group>"), "\"<group>\"");
/// assert_eq!(quote(""), "\"\"");
/// ```
#[must_use]
pub fn quote(text: &str) -> Cow<'_, str> {
    if !text.is_empty() && text.chars().all(is_bare_char) && !text.contains("//") {
        return Cow::Borrowed(text);
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\U{:04x}", u32::from(c))),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Appends ` /* comment */`.
pub(crate) fn push_comment(out: &mut String, comment: &str) {
    out.push_str(" /* ");
    out.push_str(&comment.replace("*/", "*\u{2215}"));
    out.push_str(" */");
}

pub(crate) fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Writes `value` with nested containers on their own lines.
///
/// `depth` is the indentation of the line the value starts on.
pub(crate) fn write_multiline(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Scalar(_) | Value::Ref { .. } => write_atom(out, value),
        Value::List(items) => {
            out.push_str("(\n");
            for item in items {
                push_indent(out, depth + 1);
                write_multiline(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(')');
        }
        Value::Dict(fields) => {
            out.push_str("{\n");
            for (key, field) in fields {
                push_indent(out, depth + 1);
                out.push_str(&quote(key));
                out.push_str(" = ");
                write_multiline(out, field, depth + 1);
                out.push_str(";\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

/// Writes `value` on a single line.
pub(crate) fn write_inline(out: &mut String, value: &Value) {
    match value {
        Value::Scalar(_) | Value::Ref { .. } => write_atom(out, value),
        Value::List(items) => {
            out.push('(');
            for item in items {
                write_inline(out, item);
                out.push_str(", ");
            }
            out.push(')');
        }
        Value::Dict(fields) => {
            out.push('{');
            for (key, field) in fields {
                out.push_str(&quote(key));
                out.push_str(" = ");
                write_inline(out, field);
                out.push_str("; ");
            }
            out.push('}');
        }
    }
}

fn write_atom(out: &mut String, value: &Value) {
    match value {
        Value::Scalar(text) => out.push_str(&quote(text)),
        Value::Ref { id, comment } => {
            let _ = write!(out, "{id}");
            if let Some(comment) = comment {
                push_comment(out, comment);
            }
        }
        Value::List(_) | Value::Dict(_) => write_inline(out, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_rules() {
        let cases = [
            ("YES_AGGRESSIVE", "YES_AGGRESSIVE"),
            ("13.0", "13.0"),
            ("Sources/App/Main.swift", "Sources/App/Main.swift"),
            ("cn.mistbit.voicememo", "cn.mistbit.voicememo"),
            ("gnu++20", "\"gnu++20\""),
            ("$(inherited)", "\"$(inherited)\""),
            ("-Onone", "\"-Onone\""),
            ("dwarf-with-dsym", "\"dwarf-with-dsym\""),
            ("Xcode 14.0", "\"Xcode 14.0\""),
            ("https://example.com/pkg.git", "\"https://example.com/pkg.git\""),
            ("say \"hi\"", "\"say \\\"hi\\\"\""),
            ("back\\slash", "\"back\\\\slash\""),
            ("two\nlines", "\"two\\nlines\""),
        ];
        for (input, expected) in cases {
            assert_eq!(quote(input), expected, "{input}");
        }
    }

    #[test]
    fn test_quote_escapes_control_characters() {
        assert_eq!(quote("a\rb"), "\"a\\rb\"");
        assert_eq!(quote("bell\u{7}"), "\"bell\\U0007\"");
        assert_eq!(quote("esc\u{1b}[0m"), "\"esc\\U001b[0m\"");
        assert_eq!(quote("del\u{7f}"), "\"del\\U007f\"");
        assert!(!quote("x\u{1}y").chars().any(char::is_control));
    }

    #[test]
    fn test_quote_borrows_bare_strings() {
        assert!(matches!(quote("wrapper.application"), Cow::Borrowed(_)));
        assert!(matches!(quote("a b"), Cow::Owned(_)));
    }

    #[test]
    fn test_multiline_list_and_dict() {
        let value = Value::Dict(vec![
            ("kind".to_owned(), Value::text("upToNextMajorVersion")),
            ("items".to_owned(), Value::texts(["DEBUG=1", "$(inherited)"])),
            ("empty".to_owned(), Value::List(Vec::new())),
        ]);
        let mut out = String::new();
        write_multiline(&mut out, &value, 0);
        assert_eq!(
            out,
            "{\n\tkind = upToNextMajorVersion;\n\titems = (\n\t\t\"DEBUG=1\",\n\t\t\"$(inherited)\",\n\t);\n\tempty = (\n\t);\n}"
        );
    }

    #[test]
    fn test_inline_dict_with_reference() {
        let id = ObjectId::from_key("file:a.swift");
        let value = Value::Dict(vec![
            ("isa".to_owned(), Value::text("PBXBuildFile")),
            (
                "fileRef".to_owned(),
                Value::Ref {
                    id,
                    comment: Some("a.swift".to_owned()),
                },
            ),
        ]);
        let mut out = String::new();
        write_inline(&mut out, &value);
        assert_eq!(out, format!("{{isa = PBXBuildFile; fileRef = {id} /* a.swift */; }}"));
    }

    #[test]
    fn test_comment_cannot_close_early() {
        let mut out = String::new();
        push_comment(&mut out, "weird*/name");
        assert_eq!(out.matches("*/").count(), 1);
        assert!(out.ends_with(" */"));
    }
}
