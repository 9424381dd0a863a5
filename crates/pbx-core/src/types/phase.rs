//! Build phases and the build-file wrappers they list.

use crate::id::ObjectId;

/// The kind of a build phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Compile sources.
    Sources,
    /// Link frameworks and libraries.
    Frameworks,
    /// Copy bundle resources.
    Resources,
}

impl PhaseKind {
    /// Human-readable name, used in comments.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sources => "Sources",
            Self::Frameworks => "Frameworks",
            Self::Resources => "Resources",
        }
    }
}

/// A `PBXBuildFile`: one file as processed by one phase.
///
/// A file listed by two phases gets two wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildFile {
    /// The wrapped file reference.
    pub file_ref: ObjectId,
    /// The phase that lists this wrapper.
    pub phase: PhaseKind,
}

/// A build phase of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPhase {
    /// Which step this is.
    pub kind: PhaseKind,
    /// Build files, in discovery order.
    pub files: Vec<ObjectId>,
}

impl BuildPhase {
    /// `buildActionMask` value Xcode writes for every phase.
    pub const BUILD_ACTION_MASK: u32 = 2_147_483_647;

    /// Creates an empty phase.
    #[must_use]
    pub const fn new(kind: PhaseKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
        }
    }
}
