//! Transitive closure of member references.
//!
//! The resolver walks member lists depth first, expanding component and
//! group references into their constituent fields. The result is the set of
//! field tags reachable from the roots and the groups met on the way, keyed
//! by id so that each group is emitted exactly once.

use crate::diagnostics::{Diagnostics, ReferenceKind};
use orchestra_avro_repository::{EntityIndex, Group, Member};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::trace;

/// Treatment of the standard header and trailer components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTrailer {
    /// Header and trailer references are not expanded.
    #[default]
    Skip,
    /// Header and trailer references are expanded like any component.
    Include,
}

impl HeaderTrailer {
    /// Returns true if header and trailer members are part of the result.
    #[must_use]
    pub const fn is_included(self) -> bool {
        matches!(self, Self::Include)
    }
}

/// Fields and groups reachable from a set of roots.
#[derive(Debug, Clone, Default)]
pub struct Closure<'a> {
    field_ids: BTreeSet<u32>,
    groups: BTreeMap<u32, &'a Group>,
}

impl<'a> Closure<'a> {
    /// Returns the reachable field tags in ascending order.
    #[must_use]
    pub fn field_ids(&self) -> &BTreeSet<u32> {
        &self.field_ids
    }

    /// Returns true if the field tag is reachable.
    #[must_use]
    pub fn contains_field(&self, id: u32) -> bool {
        self.field_ids.contains(&id)
    }

    /// Returns true if the group id is reachable.
    #[must_use]
    pub fn contains_group(&self, id: u32) -> bool {
        self.groups.contains_key(&id)
    }

    /// Iterates over the collected groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &'a Group> + '_ {
        self.groups.values().copied()
    }

    /// Returns the number of collected groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Removes every field tag that is also reachable in `other`.
    pub fn remove_fields_of(&mut self, other: &Closure<'_>) {
        self.field_ids.retain(|id| !other.field_ids.contains(id));
    }

    /// Adds the groups of `other` that are not already collected.
    pub fn merge_groups(&mut self, other: &Closure<'a>) {
        for (id, group) in &other.groups {
            self.groups.entry(*id).or_insert(*group);
        }
    }
}

/// Depth-first resolver over member lists.
///
/// One resolver accumulates a single closure; every entity is expanded at
/// most once, which also bounds recursion on self-referencing input.
pub struct ReferenceResolver<'i, 'a> {
    index: &'i EntityIndex<'a>,
    header_trailer: HeaderTrailer,
    visited: HashSet<(ReferenceKind, u32)>,
    closure: Closure<'a>,
}

impl<'i, 'a> ReferenceResolver<'i, 'a> {
    /// Creates a resolver with an empty closure.
    #[must_use]
    pub fn new(index: &'i EntityIndex<'a>, header_trailer: HeaderTrailer) -> Self {
        Self {
            index,
            header_trailer,
            visited: HashSet::new(),
            closure: Closure::default(),
        }
    }

    /// Adds everything reachable from a member list to the closure.
    ///
    /// # Arguments
    /// * `context` - Name of the entity owning `members`, used in diagnostics
    /// * `members` - Root member list
    /// * `diagnostics` - Collector for unresolved references
    pub fn resolve(&mut self, context: &str, members: &[Member], diagnostics: &mut Diagnostics) {
        for member in members {
            match member {
                Member::Field(r) => {
                    self.closure.field_ids.insert(r.id);
                }
                Member::Group(r) => self.resolve_group(context, r.id, diagnostics),
                Member::Component(r) => self.resolve_component(context, r.id, diagnostics),
            }
        }
    }

    fn resolve_group(&mut self, context: &str, id: u32, diagnostics: &mut Diagnostics) {
        let Some(group) = self.index.group(id) else {
            diagnostics.missing(ReferenceKind::Group, id, context);
            return;
        };
        if !self.visited.insert((ReferenceKind::Group, id)) {
            return;
        }
        trace!(group = %group.name, context, "expanding group");

        self.closure.groups.entry(id).or_insert(group);
        if self.index.field(group.num_in_group).is_some() {
            self.closure.field_ids.insert(group.num_in_group);
        } else {
            diagnostics.missing(ReferenceKind::Field, group.num_in_group, &group.name);
        }
        self.resolve(&group.name, &group.members, diagnostics);
    }

    fn resolve_component(&mut self, context: &str, id: u32, diagnostics: &mut Diagnostics) {
        let Some(component) = self.index.component(id) else {
            diagnostics.missing(ReferenceKind::Component, id, context);
            return;
        };
        if component.is_header_or_trailer() && !self.header_trailer.is_included() {
            return;
        }
        if !self.visited.insert((ReferenceKind::Component, id)) {
            return;
        }
        trace!(component = %component.name, context, "expanding component");

        self.resolve(&component.name, &component.members, diagnostics);
    }

    /// Returns the accumulated closure.
    #[must_use]
    pub fn finish(self) -> Closure<'a> {
        self.closure
    }
}
