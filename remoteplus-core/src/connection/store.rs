//! Connection store for group and profile CRUD operations
//!
//! This module provides the `ConnectionStore` which owns the in-memory
//! `StoreDocument` and persists it through `ConfigManager` after every
//! mutation. Operations report "not found" and "not allowed" through their
//! `bool` / `Option` results; persistence failures are logged and never
//! propagated.

use std::path::PathBuf;

use uuid::Uuid;

use crate::config::{ConfigManager, StoreDocument};
use crate::error::ConfigResult;
use crate::models::{ConnectionGroup, Profile, ProfileFields, ProfileUpdate, DEFAULT_GROUP};

use super::search::filter_profiles;

/// Direction of a manual reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the list (-1)
    Up,
    /// Towards the end of the list (+1)
    Down,
}

impl MoveDirection {
    /// Converts a `-1` / `+1` offset; other values are rejected
    #[must_use]
    pub const fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(Self::Up),
            1 => Some(Self::Down),
            _ => None,
        }
    }

    /// Signed index offset of this direction
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Durable store of connection groups and profiles
///
/// Exactly one store should be live per configuration directory; there is
/// no file locking.
#[derive(Debug)]
pub struct ConnectionStore {
    /// Current state, always a complete document
    document: StoreDocument,
    /// Configuration manager for persistence
    config_manager: ConfigManager,
}

impl ConnectionStore {
    /// Creates a store for the given configuration directory and loads it
    #[must_use]
    pub fn open(config_manager: ConfigManager) -> Self {
        let mut store = Self {
            document: StoreDocument::default(),
            config_manager,
        };
        store.load();
        store
    }

    /// Creates a store in the default configuration directory and loads it
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn open_default() -> ConfigResult<Self> {
        Ok(Self::open(ConfigManager::new()?))
    }

    /// Path of the connections file
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.config_manager.connections_path()
    }

    /// Read-only view of the whole document
    #[must_use]
    pub fn document(&self) -> &StoreDocument {
        &self.document
    }

    // ========== Persistence ==========

    /// Loads the connections file.
    ///
    /// A missing file keeps the current state. A file that cannot be read or
    /// parsed is logged and the current state is kept unchanged.
    pub fn load(&mut self) {
        match self.config_manager.load_document() {
            Ok(Some(document)) => self.document = document,
            Ok(None) => {}
            Err(e) => {
                tracing::error!(
                    path = %self.path().display(),
                    error = %e,
                    "Failed to load remote connections"
                );
            }
        }
    }

    /// Saves the connections file atomically; failures are logged
    pub fn save(&self) {
        if let Err(e) = self.config_manager.save_document(&self.document) {
            tracing::error!(
                path = %self.path().display(),
                error = %e,
                "Failed to save remote connections"
            );
        }
    }

    // ========== Preferences ==========

    /// Whether the manager closes after connecting
    #[must_use]
    pub fn close_on_connect(&self) -> bool {
        self.document.close_on_connect
    }

    /// Sets the close-on-connect preference and persists it
    pub fn set_close_on_connect(&mut self, value: bool) {
        self.document.close_on_connect = value;
        self.save();
    }

    // ========== Groups ==========

    /// Group names in insertion order
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.document.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Returns true if the group exists
    #[must_use]
    pub fn has_group(&self, name: &str) -> bool {
        self.document.contains_group(name)
    }

    /// Name of the active group; the default group if the stored one is gone
    #[must_use]
    pub fn active_group(&self) -> &str {
        self.document.resolved_active_group()
    }

    /// Makes `name` the active group; does nothing if it doesn't exist
    pub fn set_active_group(&mut self, name: &str) {
        if !self.document.contains_group(name) {
            return;
        }
        self.document.active_group = name.to_string();
        self.save();
    }

    /// Creates an empty group
    ///
    /// Returns false if a group with this name already exists.
    pub fn create_group(&mut self, name: &str) -> bool {
        if self.document.contains_group(name) {
            return false;
        }
        self.document.groups.push(ConnectionGroup::new(name));
        tracing::debug!(group = name, "Created group");
        self.save();
        true
    }

    /// Renames a group, keeping its position and profile order
    ///
    /// Returns false if `old` is the default group, `old` doesn't exist, or
    /// `new` already exists.
    pub fn rename_group(&mut self, old: &str, new: &str) -> bool {
        if old == DEFAULT_GROUP || self.document.contains_group(new) {
            return false;
        }
        let Some(group) = self.document.group_mut(old) else {
            return false;
        };
        group.name = new.to_string();

        if self.document.active_group == old {
            self.document.active_group = new.to_string();
        }
        tracing::debug!(from = old, to = new, "Renamed group");
        self.save();
        true
    }

    /// Deletes a group
    ///
    /// With `move_to_default` the group's profiles are appended, in order, to
    /// the default group; otherwise they are discarded. Returns false if
    /// `name` is the default group or doesn't exist.
    pub fn delete_group(&mut self, name: &str, move_to_default: bool) -> bool {
        if name == DEFAULT_GROUP {
            return false;
        }
        let Some(index) = self.document.groups.iter().position(|g| g.name == name) else {
            return false;
        };

        let removed = self.document.groups.remove(index);
        let moved = removed.connections.len();
        if move_to_default {
            self.default_group_mut().connections.extend(removed.connections);
        }

        if self.document.active_group == name {
            self.document.active_group = DEFAULT_GROUP.to_string();
        }
        tracing::debug!(
            group = name,
            profiles = moved,
            moved_to_default = move_to_default,
            "Deleted group"
        );
        self.save();
        true
    }

    fn default_group_mut(&mut self) -> &mut ConnectionGroup {
        let groups = &mut self.document.groups;
        let index = match groups.iter().position(ConnectionGroup::is_default) {
            Some(index) => index,
            None => {
                groups.push(ConnectionGroup::default_group());
                groups.len() - 1
            }
        };
        &mut groups[index]
    }

    // ========== Profiles ==========

    /// Profiles of a group in display order; empty if the group doesn't exist
    #[must_use]
    pub fn connections(&self, group: &str) -> &[Profile] {
        self.document
            .group(group)
            .map(|g| g.connections.as_slice())
            .unwrap_or_default()
    }

    /// Profile with the given id in a group
    #[must_use]
    pub fn connection(&self, group: &str, id: Uuid) -> Option<&Profile> {
        self.document.group(group).and_then(|g| g.find(id))
    }

    /// Profiles of a group whose name or host contains `query`
    #[must_use]
    pub fn search(&self, group: &str, query: &str) -> Vec<&Profile> {
        filter_profiles(self.connections(group), query)
    }

    /// Appends a new profile to a group
    ///
    /// Returns the new profile's id, or `None` if the group doesn't exist or
    /// the port is 0.
    pub fn add_connection(&mut self, group: &str, fields: ProfileFields) -> Option<Uuid> {
        if fields.port == 0 {
            tracing::debug!(group, "Rejected profile with port 0");
            return None;
        }
        let target = self.document.group_mut(group)?;
        let profile = Profile::new(fields);
        let id = profile.id;
        target.connections.push(profile);

        tracing::debug!(group, connection_id = %id, "Added connection");
        self.save();
        Some(id)
    }

    /// Merges `update` into a profile in place
    ///
    /// Returns false if the group or profile doesn't exist, or if the update
    /// sets port 0.
    pub fn update_connection(&mut self, group: &str, id: Uuid, update: ProfileUpdate) -> bool {
        if update.port == Some(0) {
            tracing::debug!(group, connection_id = %id, "Rejected update to port 0");
            return false;
        }
        let Some(profile) = self.document.group_mut(group).and_then(|g| g.find_mut(id)) else {
            return false;
        };
        profile.apply(update);

        tracing::debug!(group, connection_id = %id, "Updated connection");
        self.save();
        true
    }

    /// Removes a profile
    ///
    /// Returns false if the group or profile doesn't exist.
    pub fn delete_connection(&mut self, group: &str, id: Uuid) -> bool {
        let Some(target) = self.document.group_mut(group) else {
            return false;
        };
        let Some(index) = target.position(id) else {
            return false;
        };
        target.connections.remove(index);

        tracing::debug!(group, connection_id = %id, "Deleted connection");
        self.save();
        true
    }

    /// Swaps a profile with its neighbour in `direction`
    ///
    /// Returns false if the group or profile doesn't exist, or if the profile
    /// is already first (moving up) or last (moving down).
    pub fn move_connection(&mut self, group: &str, id: Uuid, direction: MoveDirection) -> bool {
        let Some(target) = self.document.group_mut(group) else {
            return false;
        };
        let Some(index) = target.position(id) else {
            return false;
        };
        let new_index = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|i| *i < target.connections.len()),
        };
        let Some(new_index) = new_index else {
            return false;
        };
        target.connections.swap(index, new_index);

        self.save();
        true
    }
}
