//! Non-fatal data-quality findings recorded during a run.

use std::fmt;
use tracing::warn;

/// Kind of entity a member reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    /// Field reference.
    Field,
    /// Component reference.
    Component,
    /// Group reference.
    Group,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Component => write!(f, "component"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// Member reference whose target is not defined in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissingReference {
    /// Kind of the missing target.
    pub kind: ReferenceKind,
    /// Missing identifier.
    pub id: u32,
    /// Entity whose member list holds the reference.
    pub context: String,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} referenced by {} not found",
            self.kind, self.id, self.context
        )
    }
}

/// Collector of missing references.
///
/// Each distinct finding is logged once, when first recorded.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    missing: Vec<MissingReference>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a missing reference.
    pub fn missing(&mut self, kind: ReferenceKind, id: u32, context: &str) {
        let reference = MissingReference {
            kind,
            id,
            context: context.to_string(),
        };
        if self.missing.contains(&reference) {
            return;
        }
        warn!(kind = %kind, id, context, "unresolved member reference");
        self.missing.push(reference);
    }

    /// Returns the recorded missing references in discovery order.
    #[must_use]
    pub fn missing_references(&self) -> &[MissingReference] {
        &self.missing
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Consumes the collector and returns its findings.
    #[must_use]
    pub fn into_missing_references(self) -> Vec<MissingReference> {
        self.missing
    }
}
