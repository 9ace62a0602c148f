//! In-memory form of the connections file
//!
//! `StoreDocument` is rebuilt from parsed JSON one field at a time: every known
//! key has a documented default, malformed entries are dropped with a warning,
//! and unknown keys are carried along so that saving never loses them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{ConnectionGroup, ConnectionMode, Profile, DEFAULT_GROUP, DEFAULT_PORT};

/// Top-level JSON key of the active group name
pub const KEY_ACTIVE_GROUP: &str = "active_group";
/// Top-level JSON key of the close-on-connect preference
pub const KEY_CLOSE_ON_CONNECT: &str = "close_on_connect";
/// Top-level JSON key of the group mapping
pub const KEY_GROUPS: &str = "groups";

/// Full persisted state of the connection store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDocument {
    /// Name of the group last shown in the manager; may be stale on disk
    pub active_group: String,
    /// Whether the manager dialog closes after a successful connect
    pub close_on_connect: bool,
    /// Groups in insertion order
    pub groups: Vec<ConnectionGroup>,
    /// Unknown top-level keys, in the order they were loaded
    pub extra: Map<String, Value>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            active_group: DEFAULT_GROUP.to_string(),
            close_on_connect: true,
            groups: vec![ConnectionGroup::default_group()],
            extra: Map::new(),
        }
    }
}

impl StoreDocument {
    /// Builds a document from parsed JSON, falling back to defaults field by field.
    ///
    /// The default group is appended if the loaded mapping lacks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn reconcile(value: Value) -> ConfigResult<Self> {
        let Value::Object(mut map) = value else {
            return Err(ConfigError::Parse(
                "top-level value is not an object".to_string(),
            ));
        };

        let mut doc = Self::default();

        match map.remove(KEY_ACTIVE_GROUP) {
            Some(Value::String(name)) => doc.active_group = name,
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring non-string active_group");
            }
            None => {}
        }

        match map.remove(KEY_CLOSE_ON_CONNECT) {
            Some(Value::Bool(flag)) => doc.close_on_connect = flag,
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring non-boolean close_on_connect");
            }
            None => {}
        }

        match map.remove(KEY_GROUPS) {
            Some(Value::Object(groups)) => {
                doc.groups = groups
                    .into_iter()
                    .map(|(name, entries)| reconcile_group(name, entries))
                    .collect();
            }
            Some(_) => {
                tracing::warn!("Ignoring groups value that is not an object");
            }
            None => {}
        }

        if !doc.contains_group(DEFAULT_GROUP) {
            doc.groups.push(ConnectionGroup::default_group());
        }

        doc.extra = map;
        Ok(doc)
    }

    /// Returns true if a group with this name exists
    #[must_use]
    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    /// Group with the given name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ConnectionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Mutable group with the given name
    pub fn group_mut(&mut self, name: &str) -> Option<&mut ConnectionGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Active group name, or the default group if the stored one is gone
    #[must_use]
    pub fn resolved_active_group(&self) -> &str {
        if self.contains_group(&self.active_group) {
            &self.active_group
        } else {
            DEFAULT_GROUP
        }
    }

    /// Serializes to the on-disk text form (2-space indentation, UTF-8 unescaped)
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))
    }

    /// Parses the on-disk text form
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ConfigError::Deserialize(format!("Invalid JSON: {e}")))?;
        Self::reconcile(value)
    }
}

fn reconcile_group(name: String, entries: Value) -> ConnectionGroup {
    let mut group = ConnectionGroup::new(name);
    match entries {
        Value::Array(items) => {
            group.connections = items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| reconcile_profile(&group.name, index, item))
                .collect();
        }
        _ => {
            tracing::warn!(group = %group.name, "Group entry is not a list, treating as empty");
        }
    }
    group
}

fn reconcile_profile(group: &str, index: usize, item: Value) -> Option<Profile> {
    let Value::Object(mut fields) = item else {
        tracing::warn!(group, index, "Skipping profile entry that is not an object");
        return None;
    };

    let id = match fields.remove("id") {
        Some(Value::String(text)) => Uuid::parse_str(&text).ok(),
        _ => None,
    }
    .unwrap_or_else(|| {
        tracing::warn!(group, index, "Profile has no valid id, assigning a new one");
        Uuid::new_v4()
    });

    let port = match fields.remove("port") {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p != 0),
        Some(_) => None,
        None => Some(DEFAULT_PORT),
    }
    .unwrap_or_else(|| {
        tracing::warn!(group, index, "Profile port is invalid, using default");
        DEFAULT_PORT
    });

    let mode = match fields.remove("mode") {
        Some(Value::String(text)) => text.parse().unwrap_or_else(|()| {
            tracing::warn!(group, index, mode = %text, "Unknown profile mode, using leader");
            ConnectionMode::Leader
        }),
        _ => ConnectionMode::Leader,
    };

    Some(Profile {
        id,
        name: take_string(&mut fields, "name"),
        host: take_string(&mut fields, "host"),
        key: take_string(&mut fields, "key"),
        port,
        mode,
        self_hosted: matches!(fields.remove("selfHosted"), Some(Value::Bool(true))),
        extra: fields,
    })
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

/// Serializes the group list as a name-to-profiles mapping
struct GroupsMap<'a>(&'a [ConnectionGroup]);

impl Serialize for GroupsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in self.0 {
            map.serialize_entry(&group.name, &group.connections)?;
        }
        map.end()
    }
}

impl Serialize for StoreDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.extra.len()))?;
        map.serialize_entry(KEY_ACTIVE_GROUP, &self.active_group)?;
        map.serialize_entry(KEY_CLOSE_ON_CONNECT, &self.close_on_connect)?;
        map.serialize_entry(KEY_GROUPS, &GroupsMap(&self.groups))?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StoreDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::reconcile(value).map_err(serde::de::Error::custom)
    }
}
