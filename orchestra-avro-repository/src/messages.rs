//! Structural entity definitions.
//!
//! This module contains components, repeating groups and messages, together
//! with the member references that make up their layouts.

use crate::types::Annotation;

/// Identifier of the standard session header component.
pub const STANDARD_HEADER_ID: u32 = 1024;

/// Identifier of the standard session trailer component.
pub const STANDARD_TRAILER_ID: u32 = 1025;

/// Category name identifying session-layer messages.
pub const SESSION_CATEGORY: &str = "Session";

/// Returns true if the component id is the standard header or trailer.
#[must_use]
pub const fn is_header_or_trailer(id: u32) -> bool {
    id == STANDARD_HEADER_ID || id == STANDARD_TRAILER_ID
}

/// Presence requirement of a member reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
    /// Member must be present.
    Required,
    /// Member may be absent.
    #[default]
    Optional,
}

impl Presence {
    /// Parses a presence attribute value.
    ///
    /// Only `required` is mandatory; `constant`, `forbidden` and `ignored`
    /// members are treated as optional.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == "required" {
            Self::Required
        } else {
            Self::Optional
        }
    }

    /// Returns true for optional members.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Optional)
    }
}

/// Target of a member reference with its local attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// Target entity identifier.
    pub id: u32,
    /// Presence requirement.
    pub presence: Presence,
    /// Annotation local to this reference.
    pub annotation: Annotation,
}

impl MemberRef {
    /// Creates an optional reference without annotation.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            presence: Presence::Optional,
            annotation: Annotation::default(),
        }
    }

    /// Creates a required reference without annotation.
    #[must_use]
    pub fn required(id: u32) -> Self {
        Self {
            presence: Presence::Required,
            ..Self::new(id)
        }
    }
}

/// Member of a component, group or message layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Reference to a field.
    Field(MemberRef),
    /// Reference to a repeating group.
    Group(MemberRef),
    /// Reference to a component.
    Component(MemberRef),
}

impl Member {
    /// Returns the shared reference attributes.
    #[must_use]
    pub fn reference(&self) -> &MemberRef {
        match self {
            Self::Field(r) | Self::Group(r) | Self::Component(r) => r,
        }
    }

    /// Returns the target identifier.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.reference().id
    }
}

/// Reusable component definition.
#[derive(Debug, Clone)]
pub struct Component {
    /// Component identifier.
    pub id: u32,
    /// Component name.
    pub name: String,
    /// Category name.
    pub category: Option<String>,
    /// Ordered members.
    pub members: Vec<Member>,
    /// Documentation.
    pub annotation: Annotation,
}

impl Component {
    /// Creates a new empty component.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            members: Vec::new(),
            annotation: Annotation::default(),
        }
    }

    /// Returns true for the standard header or trailer.
    #[must_use]
    pub const fn is_header_or_trailer(&self) -> bool {
        is_header_or_trailer(self.id)
    }
}

/// Repeating group definition.
#[derive(Debug, Clone)]
pub struct Group {
    /// Group identifier.
    pub id: u32,
    /// Group name.
    pub name: String,
    /// Category name.
    pub category: Option<String>,
    /// Field carrying the number of entries.
    pub num_in_group: u32,
    /// Ordered members of one entry.
    pub members: Vec<Member>,
    /// Documentation.
    pub annotation: Annotation,
}

impl Group {
    /// Creates a new empty group.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, num_in_group: u32) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            num_in_group,
            members: Vec::new(),
            annotation: Annotation::default(),
        }
    }
}

/// Message definition.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message identifier.
    pub id: Option<u32>,
    /// Message name.
    pub name: String,
    /// FIX MsgType value.
    pub msg_type: Option<String>,
    /// Category name.
    pub category: String,
    /// Ordered members of the message structure.
    pub members: Vec<Member>,
    /// Documentation.
    pub annotation: Annotation,
}

impl Message {
    /// Creates a new empty message.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            msg_type: None,
            category: category.into(),
            members: Vec::new(),
            annotation: Annotation::default(),
        }
    }

    /// Returns true if the message belongs to the session layer.
    ///
    /// The category comparison is exact and case-sensitive.
    #[must_use]
    pub fn is_session(&self) -> bool {
        self.category == SESSION_CATEGORY
    }
}
