use domain_access_control::{
    LocalDomainAccessStore, OwnerAccessControlEntry, Permission, TrustLevel,
};
use std::sync::Arc;
use std::thread;

fn owner_ace(permission: Permission, trust: TrustLevel) -> OwnerAccessControlEntry {
    OwnerAccessControlEntry {
        uid: "testUser1".to_string(),
        domain: "domain1".to_string(),
        interface_name: "interface1".to_string(),
        required_trust_level: trust,
        required_ace_change_trust_level: trust,
        operation: "READ".to_string(),
        consumer_permission: permission,
    }
}

/// A reader racing a writer must only ever see one of the two complete entry
/// versions, never a mixture of fields from both.
#[test]
fn readers_never_observe_a_half_written_entry() {
    let store = Arc::new(LocalDomainAccessStore::new());
    let version_a = owner_ace(Permission::Yes, TrustLevel::High);
    let version_b = owner_ace(Permission::No, TrustLevel::Low);
    store.update_owner_access_control_entry(version_a.clone());

    let writer_store = store.clone();
    let writer_a = version_a.clone();
    let writer_b = version_b.clone();
    let writer = thread::spawn(move || {
        for _ in 0..500 {
            writer_store.update_owner_access_control_entry(writer_b.clone());
            writer_store.update_owner_access_control_entry(writer_a.clone());
        }
    });

    let mut observed = 0usize;
    while observed < 2_000 {
        let entry = store
            .get_owner_access_control_entry("testUser1", "domain1", "interface1", "READ")
            .expect("entry is never absent during the race");
        assert!(
            entry == version_a || entry == version_b,
            "torn read: {entry:?}"
        );
        observed += 1;
    }

    writer.join().expect("writer should not panic");
}

/// Concurrent writers to disjoint keys all land.
#[test]
fn concurrent_writers_serialize_without_loss() {
    let store = Arc::new(LocalDomainAccessStore::new());

    let mut handles = Vec::new();
    for writer_index in 0..4 {
        let writer_store = store.clone();
        handles.push(thread::spawn(move || {
            for entry_index in 0..25 {
                let mut entry = owner_ace(Permission::Yes, TrustLevel::Low);
                entry.operation = format!("op-{writer_index}-{entry_index}");
                assert!(writer_store.update_owner_access_control_entry(entry));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("writer should not panic");
    }

    assert_eq!(store.get_owner_access_control_entries("testUser1").len(), 100);
}
