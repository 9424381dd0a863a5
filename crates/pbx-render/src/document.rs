//! The file envelope: header, sections, root reference.

use std::fmt::Write;

use pbx_core::{Isa, ObjectId};
use rustc_hash::FxHashMap;

use crate::record::Record;

/// First line of every project file; marks the text as UTF-8.
pub const ENCODING_MARKER: &str = "// !$*UTF8*$!";

/// Assembles object records into a complete project file.
///
/// Records are grouped by kind. Sections are written in [`Isa::ALL`] order
/// regardless of the order they were added, and every section is written
/// even when it has no records.
#[derive(Debug)]
pub struct Document {
    object_version: u32,
    root: ObjectId,
    sections: FxHashMap<Isa, Vec<Record>>,
}

impl Document {
    /// Creates an empty document for the given root object.
    #[must_use]
    pub fn new(object_version: u32, root: ObjectId) -> Self {
        Self {
            object_version,
            root,
            sections: FxHashMap::default(),
        }
    }

    /// Appends a record to the section for `isa`.
    pub fn push(&mut self, isa: Isa, record: Record) {
        self.sections.entry(isa).or_default().push(record);
    }

    /// Number of records added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Returns `true` if no records were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the document.
    #[must_use]
    pub fn finish(mut self) -> String {
        let mut out = String::with_capacity(256 + self.len() * 160);

        out.push_str(ENCODING_MARKER);
        out.push_str("\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n");
        let _ = writeln!(out, "\tobjectVersion = {};", self.object_version);
        out.push_str("\tobjects = {\n");

        for isa in Isa::ALL {
            let name = isa.as_str();
            let _ = writeln!(out, "\n/* Begin {name} section */");
            for record in self.sections.remove(&isa).unwrap_or_default() {
                record.render_into(&mut out);
            }
            let _ = writeln!(out, "/* End {name} section */");
        }

        out.push_str("\t};\n");
        let _ = writeln!(out, "\trootObject = {} /* Project object */;", self.root);
        out.push_str("}\n");
        out
    }
}
