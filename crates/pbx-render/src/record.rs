//! A single object entry in the `objects` dictionary.

use pbx_core::ObjectId;

use crate::value::{Value, push_comment, push_indent, write_inline, write_multiline};

/// Indentation of object entries inside `objects = { ... }`.
const ENTRY_DEPTH: usize = 2;

/// How a record is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Everything on one line, the way Xcode writes build files and file
    /// references.
    Inline,
    /// One field per line.
    Multiline,
}

/// An object entry: identifier, optional comment, ordered fields.
///
/// # Examples
///
/// ```
/// use pbx_core::ObjectId;
/// use pbx_render::{Layout, Record, Value};
///
/// let id = ObjectId::from_key("phase:frameworks");
/// let text = Record::new(id, Layout::Inline)
///     .comment("Frameworks")
///     .field("isa", Value::text("PBXFrameworksBuildPhase"))
///     .render();
/// assert_eq!(
///     text,
///     format!("\t\t{id} /* Frameworks */ = {{isa = PBXFrameworksBuildPhase; }};\n")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: ObjectId,
    comment: Option<String>,
    fields: Vec<(String, Value)>,
    layout: Layout,
}

impl Record {
    /// Starts an empty record.
    #[must_use]
    pub const fn new(id: ObjectId, layout: Layout) -> Self {
        Self {
            id,
            comment: None,
            fields: Vec::new(),
            layout,
        }
    }

    /// Sets the comment written after the identifier.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets or clears the comment.
    #[must_use]
    pub fn maybe_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.push((key.into(), value));
        self
    }

    /// The object this record describes.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Renders the entry, including leading indentation and trailing newline.
    #[must_use]
    pub fn render(self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Appends the rendered entry to `out`.
    pub fn render_into(self, out: &mut String) {
        push_indent(out, ENTRY_DEPTH);
        out.push_str(&self.id.to_string());
        if let Some(comment) = &self.comment {
            push_comment(out, comment);
        }
        out.push_str(" = ");

        let body = Value::Dict(self.fields);
        match self.layout {
            Layout::Inline => write_inline(out, &body),
            Layout::Multiline => write_multiline(out, &body, ENTRY_DEPTH),
        }
        out.push_str(";\n");
    }
}
