//! Connection group model.

use uuid::Uuid;

use super::Profile;

/// Name of the group that always exists
pub const DEFAULT_GROUP: &str = "Default";

/// A named, ordered collection of profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionGroup {
    /// Unique group name
    pub name: String,
    /// Profiles in display order
    pub connections: Vec<Profile>,
}

impl ConnectionGroup {
    /// Creates an empty group
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: Vec::new(),
        }
    }

    /// Creates the empty default group
    #[must_use]
    pub fn default_group() -> Self {
        Self::new(DEFAULT_GROUP)
    }

    /// Returns true if this is the undeletable default group
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_GROUP
    }

    /// Index of the profile with the given id
    #[must_use]
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.connections.iter().position(|c| c.id == id)
    }

    /// Profile with the given id
    #[must_use]
    pub fn find(&self, id: Uuid) -> Option<&Profile> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Mutable profile with the given id
    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Profile> {
        self.connections.iter_mut().find(|c| c.id == id)
    }
}
