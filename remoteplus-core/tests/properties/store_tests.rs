//! Property-based tests for the connection store
//!
//! Every mutation is persisted immediately, so each property reopens the
//! store from disk and compares against an in-memory model.

use proptest::prelude::*;
use remoteplus_core::{
    ConfigManager, ConnectionStore, MoveDirection, ProfileFields, ProfileUpdate, DEFAULT_GROUP,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper to create a store over a temporary directory
fn create_test_store() -> (ConnectionStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ConnectionStore::open(ConfigManager::with_config_dir(
        temp_dir.path().to_path_buf(),
    ));
    (store, temp_dir)
}

fn reopen(temp_dir: &TempDir) -> ConnectionStore {
    ConnectionStore::open(ConfigManager::with_config_dir(temp_dir.path().to_path_buf()))
}

fn names(store: &ConnectionStore, group: &str) -> Vec<String> {
    store
        .connections(group)
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

// ========== Generators ==========

// Strategy for generating profile names
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,15}"
}

// Strategy for generating group names distinct from the default group
fn arb_group_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{1,10}"
}

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Delete(usize),
    Move(usize, bool),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_name().prop_map(Op::Add),
        (0usize..8).prop_map(Op::Delete),
        (0usize..8, any::<bool>()).prop_map(|(i, up)| Op::Move(i, up)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Profile order follows a simple list model through adds, deletes and
    /// moves, and survives reopening
    #[test]
    fn operations_match_list_model(ops in prop::collection::vec(arb_op(), 1..20)) {
        let (mut store, temp_dir) = create_test_store();
        let mut model: Vec<(Uuid, String)> = Vec::new();

        for op in ops {
            match op {
                Op::Add(name) => {
                    let id = store
                        .add_connection(DEFAULT_GROUP, ProfileFields::new(name.clone(), "h", "k"))
                        .expect("default group exists");
                    model.push((id, name));
                }
                Op::Delete(index) => {
                    if let Some((id, _)) = model.get(index).cloned() {
                        prop_assert!(store.delete_connection(DEFAULT_GROUP, id));
                        model.remove(index);
                    } else {
                        prop_assert!(!store.delete_connection(DEFAULT_GROUP, Uuid::new_v4()));
                    }
                }
                Op::Move(index, up) => {
                    let Some((id, _)) = model.get(index).cloned() else {
                        continue;
                    };
                    let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
                    let target = if up {
                        index.checked_sub(1)
                    } else {
                        Some(index + 1).filter(|t| *t < model.len())
                    };
                    let moved = store.move_connection(DEFAULT_GROUP, id, direction);
                    prop_assert_eq!(moved, target.is_some());
                    if let Some(target) = target {
                        model.swap(index, target);
                    }
                }
            }
        }

        let expected: Vec<String> = model.iter().map(|(_, n)| n.clone()).collect();
        prop_assert_eq!(names(&store, DEFAULT_GROUP), expected.clone());
        prop_assert_eq!(names(&reopen(&temp_dir), DEFAULT_GROUP), expected);
    }

    /// Deleting a group moves its profiles to the end of the default group
    #[test]
    fn delete_group_moves_profiles_in_order(
        group in arb_group_name(),
        existing in prop::collection::vec(arb_name(), 0..4),
        moved in prop::collection::vec(arb_name(), 0..4),
    ) {
        let (mut store, temp_dir) = create_test_store();
        prop_assert!(store.create_group(&group));
        for name in &existing {
            store.add_connection(DEFAULT_GROUP, ProfileFields::new(name.clone(), "h", "k"));
        }
        for name in &moved {
            store.add_connection(&group, ProfileFields::new(name.clone(), "h", "k"));
        }
        store.set_active_group(&group);

        prop_assert!(store.delete_group(&group, true));

        let mut expected = existing.clone();
        expected.extend(moved.iter().cloned());
        let reopened = reopen(&temp_dir);
        prop_assert_eq!(names(&reopened, DEFAULT_GROUP), expected);
        prop_assert!(!reopened.has_group(&group));
        prop_assert_eq!(reopened.active_group(), DEFAULT_GROUP);
    }

    /// Renaming keeps the group's position and profiles
    #[test]
    fn rename_group_keeps_position(
        groups in prop::collection::btree_set(arb_group_name(), 2..5),
        new_name in "[A-Z][a-z]{3,8}",
    ) {
        prop_assume!(new_name != DEFAULT_GROUP);
        let (mut store, temp_dir) = create_test_store();
        let groups: Vec<String> = groups.into_iter().collect();
        for group in &groups {
            prop_assert!(store.create_group(group));
        }
        store.add_connection(&groups[0], ProfileFields::new("kept", "h", "k"));

        prop_assert!(store.rename_group(&groups[0], &new_name));

        let reopened = reopen(&temp_dir);
        let listed = reopened.groups();
        prop_assert_eq!(listed[1], new_name.as_str());
        prop_assert_eq!(names(&reopened, &new_name), vec!["kept".to_string()]);
        prop_assert!(!reopened.has_group(&groups[0]));
    }

    /// Any accepted port survives reopening; port 0 is refused
    #[test]
    fn accepted_ports_survive_reopen(port in any::<u16>(), update_port in any::<u16>()) {
        let (mut store, temp_dir) = create_test_store();
        let added = store.add_connection(
            DEFAULT_GROUP,
            ProfileFields::new("p", "h", "k").with_port(port),
        );
        prop_assert_eq!(added.is_some(), port != 0);
        let Some(id) = added else {
            return Ok(());
        };

        let updated =
            store.update_connection(DEFAULT_GROUP, id, ProfileUpdate::new().port(update_port));
        prop_assert_eq!(updated, update_port != 0);

        let expected = if updated { update_port } else { port };
        prop_assert_eq!(store.connection(DEFAULT_GROUP, id).unwrap().port, expected);
        let reopened = reopen(&temp_dir);
        prop_assert_eq!(reopened.document(), store.document());
    }

    /// Updates only touch the fields they carry
    #[test]
    fn update_merges_fields(name in arb_name(), port in 1u16..=65535u16) {
        let (mut store, temp_dir) = create_test_store();
        let id = store
            .add_connection(DEFAULT_GROUP, ProfileFields::new("original", "host.example", "secret"))
            .unwrap();

        prop_assert!(store.update_connection(
            DEFAULT_GROUP,
            id,
            ProfileUpdate::new().name(name.clone()).port(port),
        ));

        let reopened = reopen(&temp_dir);
        let profile = reopened.connection(DEFAULT_GROUP, id).unwrap();
        prop_assert_eq!(&profile.name, &name);
        prop_assert_eq!(profile.port, port);
        prop_assert_eq!(profile.host.as_str(), "host.example");
        prop_assert_eq!(profile.key.as_str(), "secret");
    }
}

#[test]
fn test_default_group_is_protected() {
    let (mut store, _temp_dir) = create_test_store();
    assert!(!store.create_group(DEFAULT_GROUP));
    assert!(!store.rename_group(DEFAULT_GROUP, "Other"));
    assert!(!store.delete_group(DEFAULT_GROUP, true));
    assert_eq!(store.groups(), [DEFAULT_GROUP]);
}

#[test]
fn test_discarding_group_drops_profiles() {
    let (mut store, temp_dir) = create_test_store();
    store.create_group("Lab");
    store.add_connection("Lab", ProfileFields::new("gone", "h", "k"));

    assert!(store.delete_group("Lab", false));
    assert!(reopen(&temp_dir).connections(DEFAULT_GROUP).is_empty());
}

#[test]
fn test_unknown_group_operations_fail() {
    let (mut store, _temp_dir) = create_test_store();
    let fields = ProfileFields::new("n", "h", "k");
    assert_eq!(store.add_connection("Missing", fields), None);
    assert!(!store.update_connection("Missing", Uuid::new_v4(), ProfileUpdate::new()));
    assert!(!store.move_connection("Missing", Uuid::new_v4(), MoveDirection::Up));
    assert!(store.connections("Missing").is_empty());
    assert!(!store.path().exists());
}
