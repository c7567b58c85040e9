//! Session and application layer partitioning.

use crate::diagnostics::Diagnostics;
use crate::resolver::{Closure, HeaderTrailer, ReferenceResolver};
use orchestra_avro_repository::{EntityIndex, Message};
use tracing::debug;

/// Messages and closures split by session layer membership.
///
/// Session messages are resolved with header and trailer expansion, the
/// others without. Once both closures are complete, fields reachable from
/// session messages are removed from the application closure, so the two
/// field sets are disjoint.
#[derive(Debug, Clone)]
pub struct SessionPartition<'a> {
    session_messages: Vec<&'a Message>,
    non_session_messages: Vec<&'a Message>,
    session: Closure<'a>,
    non_session: Closure<'a>,
}

impl<'a> SessionPartition<'a> {
    /// Partitions the indexed messages and resolves both subsets.
    ///
    /// Groups reachable only from standalone components are added to the
    /// application closure so that every group a component refers to is
    /// emitted.
    pub fn compute(index: &EntityIndex<'a>, diagnostics: &mut Diagnostics) -> Self {
        let (session_messages, non_session_messages): (Vec<&'a Message>, Vec<&'a Message>) =
            index.messages().iter().partition(|m| m.is_session());

        let session = resolve_messages(index, &session_messages, HeaderTrailer::Include, diagnostics);
        let mut non_session =
            resolve_messages(index, &non_session_messages, HeaderTrailer::Skip, diagnostics);

        let mut components = ReferenceResolver::new(index, HeaderTrailer::Skip);
        for component in index.components().filter(|c| !c.is_header_or_trailer()) {
            components.resolve(&component.name, &component.members, diagnostics);
        }
        non_session.merge_groups(&components.finish());

        non_session.remove_fields_of(&session);

        debug!(
            session_messages = session_messages.len(),
            non_session_messages = non_session_messages.len(),
            session_fields = session.field_ids().len(),
            non_session_fields = non_session.field_ids().len(),
            "partitioned messages"
        );

        Self {
            session_messages,
            non_session_messages,
            session,
            non_session,
        }
    }

    /// Returns the messages of the `Session` category in document order.
    #[must_use]
    pub fn session_messages(&self) -> &[&'a Message] {
        &self.session_messages
    }

    /// Returns all other messages in document order.
    #[must_use]
    pub fn non_session_messages(&self) -> &[&'a Message] {
        &self.non_session_messages
    }

    /// Returns the closure of the session messages.
    #[must_use]
    pub fn session(&self) -> &Closure<'a> {
        &self.session
    }

    /// Returns the closure of the application messages, minus session fields.
    #[must_use]
    pub fn non_session(&self) -> &Closure<'a> {
        &self.non_session
    }
}

fn resolve_messages<'a>(
    index: &EntityIndex<'a>,
    messages: &[&'a Message],
    header_trailer: HeaderTrailer,
    diagnostics: &mut Diagnostics,
) -> Closure<'a> {
    let mut resolver = ReferenceResolver::new(index, header_trailer);
    for message in messages {
        resolver.resolve(&message.name, &message.members, diagnostics);
    }
    resolver.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::trading_repository;

    #[test]
    fn test_partition_is_stable() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mut diagnostics = Diagnostics::new();

        let partition = SessionPartition::compute(&index, &mut diagnostics);

        let session: Vec<&str> = partition
            .session_messages()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        let other: Vec<&str> = partition
            .non_session_messages()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(session, vec!["Heartbeat", "Logon"]);
        assert_eq!(other, vec!["NewOrderSingle"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_field_sets_are_disjoint() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mut diagnostics = Diagnostics::new();

        let partition = SessionPartition::compute(&index, &mut diagnostics);

        let session = partition.session().field_ids();
        let non_session = partition.non_session().field_ids();
        assert!(session.is_disjoint(non_session));
        // Text is shared and attributed to the session layer.
        assert!(session.contains(&58));
        assert!(!non_session.contains(&58));
    }

    #[test]
    fn test_session_closure_includes_header() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mut diagnostics = Diagnostics::new();

        let partition = SessionPartition::compute(&index, &mut diagnostics);

        let session: Vec<u32> = partition.session().field_ids().iter().copied().collect();
        assert_eq!(
            session,
            vec![8, 9, 10, 34, 35, 43, 58, 98, 108, 112, 372, 384]
        );
        let non_session: Vec<u32> = partition.non_session().field_ids().iter().copied().collect();
        assert_eq!(non_session, vec![11, 38, 44, 54, 60, 447, 448, 453, 516]);
    }

    #[test]
    fn test_groups_by_partition() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mut diagnostics = Diagnostics::new();

        let partition = SessionPartition::compute(&index, &mut diagnostics);

        assert!(partition.session().contains_group(2098));
        assert!(!partition.session().contains_group(1012));
        assert!(partition.non_session().contains_group(1012));
        assert!(!partition.non_session().contains_group(2098));
    }

    #[test]
    fn test_component_only_groups_are_collected() {
        let mut repository = trading_repository();
        repository
            .messages
            .retain(|m| m.name != "NewOrderSingle");
        let index = EntityIndex::new(&repository);
        let mut diagnostics = Diagnostics::new();

        let partition = SessionPartition::compute(&index, &mut diagnostics);

        assert!(partition.non_session().contains_group(1012));
        assert!(partition.non_session().field_ids().is_empty());
    }
}
