//! Entity lookup tables.
//!
//! The index borrows the repository and maps every entity kind by its key.
//! Maps are ordered so that iteration, and therefore generated output, is
//! deterministic. Duplicate keys resolve to the last definition.

use crate::messages::{Component, Group, Message};
use crate::types::{Category, CodeSet, Datatype, Field, Repository, Section};
use std::collections::BTreeMap;

/// Lookup tables over a repository's entities.
#[derive(Debug, Clone)]
pub struct EntityIndex<'a> {
    fields: BTreeMap<u32, &'a Field>,
    components: BTreeMap<u32, &'a Component>,
    groups: BTreeMap<u32, &'a Group>,
    code_sets: BTreeMap<&'a str, &'a CodeSet>,
    datatypes: BTreeMap<&'a str, &'a Datatype>,
    categories: BTreeMap<&'a str, &'a Category>,
    sections: BTreeMap<&'a str, &'a Section>,
    messages: &'a [Message],
}

impl<'a> EntityIndex<'a> {
    /// Builds the index for a repository.
    #[must_use]
    pub fn new(repository: &'a Repository) -> Self {
        Self {
            fields: repository.fields.iter().map(|f| (f.id, f)).collect(),
            components: repository.components.iter().map(|c| (c.id, c)).collect(),
            groups: repository.groups.iter().map(|g| (g.id, g)).collect(),
            code_sets: repository
                .code_sets
                .iter()
                .map(|c| (c.name.as_str(), c))
                .collect(),
            datatypes: repository
                .datatypes
                .iter()
                .map(|d| (d.name.as_str(), d))
                .collect(),
            categories: repository
                .categories
                .iter()
                .map(|c| (c.name.as_str(), c))
                .collect(),
            sections: repository
                .sections
                .iter()
                .map(|s| (s.name.as_str(), s))
                .collect(),
            messages: &repository.messages,
        }
    }

    /// Gets a field by tag.
    #[must_use]
    pub fn field(&self, id: u32) -> Option<&'a Field> {
        self.fields.get(&id).copied()
    }

    /// Gets a component by id.
    #[must_use]
    pub fn component(&self, id: u32) -> Option<&'a Component> {
        self.components.get(&id).copied()
    }

    /// Gets a group by id.
    #[must_use]
    pub fn group(&self, id: u32) -> Option<&'a Group> {
        self.groups.get(&id).copied()
    }

    /// Gets a code set by name.
    #[must_use]
    pub fn code_set(&self, name: &str) -> Option<&'a CodeSet> {
        self.code_sets.get(name).copied()
    }

    /// Gets a datatype by name.
    #[must_use]
    pub fn datatype(&self, name: &str) -> Option<&'a Datatype> {
        self.datatypes.get(name).copied()
    }

    /// Gets a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&'a Category> {
        self.categories.get(name).copied()
    }

    /// Gets a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&'a Section> {
        self.sections.get(name).copied()
    }

    /// Returns the section a message belongs to through its category.
    #[must_use]
    pub fn section_of(&self, message: &Message) -> Option<&'a str> {
        self.category(&message.category)?.section.as_deref()
    }

    /// Iterates over fields in tag order.
    pub fn fields(&self) -> impl Iterator<Item = &'a Field> + '_ {
        self.fields.values().copied()
    }

    /// Iterates over components in id order.
    pub fn components(&self) -> impl Iterator<Item = &'a Component> + '_ {
        self.components.values().copied()
    }

    /// Iterates over groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &'a Group> + '_ {
        self.groups.values().copied()
    }

    /// Iterates over code sets in name order.
    pub fn code_sets(&self) -> impl Iterator<Item = &'a CodeSet> + '_ {
        self.code_sets.values().copied()
    }

    /// Iterates over datatypes in name order.
    pub fn datatypes(&self) -> impl Iterator<Item = &'a Datatype> + '_ {
        self.datatypes.values().copied()
    }

    /// Returns the messages in document order.
    #[must_use]
    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{STANDARD_HEADER_ID, STANDARD_TRAILER_ID};
    use crate::types::Category;

    fn create_repository() -> Repository {
        let mut repository = Repository::new("FIX.Test", "FIX.Latest");
        repository.fields.push(Field::new(11, "ClOrdID", "String"));
        repository.fields.push(Field::new(54, "Side", "SideCodeSet"));
        repository.fields.push(Field::new(11, "ClOrdIDv2", "String"));
        repository
            .components
            .push(Component::new(STANDARD_HEADER_ID, "StandardHeader"));
        repository
            .components
            .push(Component::new(STANDARD_TRAILER_ID, "StandardTrailer"));
        repository.groups.push(Group::new(2000, "PartyIDs", 453));
        repository.code_sets.push(CodeSet::new("SideCodeSet", "char"));
        repository.datatypes.push(Datatype::new("Price"));
        repository.categories.push(Category {
            name: "Session".to_string(),
            section: Some("Session".to_string()),
            annotation: Default::default(),
        });
        repository.messages.push(Message::new("Heartbeat", "Session"));
        repository
    }

    #[test]
    fn test_index_lookups() {
        let repository = create_repository();
        let index = EntityIndex::new(&repository);

        assert_eq!(index.field(54).map(|f| f.name.as_str()), Some("Side"));
        assert!(index.component(STANDARD_HEADER_ID).is_some());
        assert_eq!(index.group(2000).map(|g| g.num_in_group), Some(453));
        assert!(index.code_set("SideCodeSet").is_some());
        assert!(index.datatype("Price").is_some());
        assert!(index.field(999).is_none());
        assert!(index.code_set("Missing").is_none());
    }

    #[test]
    fn test_index_last_write_wins() {
        let repository = create_repository();
        let index = EntityIndex::new(&repository);

        assert_eq!(index.field(11).map(|f| f.name.as_str()), Some("ClOrdIDv2"));
        assert_eq!(index.fields().count(), 2);
    }

    #[test]
    fn test_index_iteration_order() {
        let repository = create_repository();
        let index = EntityIndex::new(&repository);

        let ids: Vec<u32> = index.fields().map(|f| f.id).collect();
        assert_eq!(ids, vec![11, 54]);
        let ids: Vec<u32> = index.components().map(|c| c.id).collect();
        assert_eq!(ids, vec![STANDARD_HEADER_ID, STANDARD_TRAILER_ID]);
    }

    #[test]
    fn test_section_of_message() {
        let repository = create_repository();
        let index = EntityIndex::new(&repository);

        let heartbeat = &index.messages()[0];
        assert_eq!(index.section_of(heartbeat), Some("Session"));
        assert!(index.section("Session").is_none());
    }
}
