use domain_access_control::{
    DomainRoleEntry, LocalDomainAccessStore, MasterAccessControlEntry,
    MasterRegistrationControlEntry, OwnerAccessControlEntry, OwnerRegistrationControlEntry,
    Permission, Role, TrustLevel,
};
use std::collections::BTreeSet;

fn domain_role(uid: &str) -> DomainRoleEntry {
    DomainRoleEntry::new(
        uid,
        BTreeSet::from(["domain1".to_string(), "domain2".to_string()]),
        Role::Owner,
    )
}

fn master_ace(uid: &str, interface_name: &str) -> MasterAccessControlEntry {
    MasterAccessControlEntry {
        uid: uid.to_string(),
        domain: "domain1".to_string(),
        interface_name: interface_name.to_string(),
        default_required_trust_level: TrustLevel::Low,
        possible_required_trust_levels: vec![TrustLevel::Low, TrustLevel::Mid],
        default_required_control_entry_change_trust_level: TrustLevel::Mid,
        possible_required_control_entry_change_trust_levels: vec![TrustLevel::Mid],
        operation: "READ".to_string(),
        default_consumer_permission: Permission::Ask,
        possible_consumer_permissions: vec![Permission::Ask, Permission::No],
    }
}

fn owner_ace(uid: &str, interface_name: &str) -> OwnerAccessControlEntry {
    OwnerAccessControlEntry {
        uid: uid.to_string(),
        domain: "domain1".to_string(),
        interface_name: interface_name.to_string(),
        required_trust_level: TrustLevel::High,
        required_ace_change_trust_level: TrustLevel::Mid,
        operation: "WRITE".to_string(),
        consumer_permission: Permission::Yes,
    }
}

fn master_rce(uid: &str) -> MasterRegistrationControlEntry {
    MasterRegistrationControlEntry {
        uid: uid.to_string(),
        domain: "domain1".to_string(),
        interface_name: "interface1".to_string(),
        default_required_trust_level: TrustLevel::Low,
        possible_required_trust_levels: vec![TrustLevel::Low],
        default_required_control_entry_change_trust_level: TrustLevel::Low,
        possible_required_control_entry_change_trust_levels: vec![TrustLevel::Low],
        default_provider_permission: Permission::Yes,
        possible_provider_permissions: vec![Permission::Yes, Permission::No],
    }
}

fn owner_rce(uid: &str) -> OwnerRegistrationControlEntry {
    OwnerRegistrationControlEntry {
        uid: uid.to_string(),
        domain: "domain1".to_string(),
        interface_name: "interface1".to_string(),
        required_trust_level: TrustLevel::Mid,
        required_ace_change_trust_level: TrustLevel::Low,
        provider_permission: Permission::Ask,
    }
}

#[test]
fn all_entry_kinds_survive_reconstruction() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("access-store.persist");

    {
        let store = LocalDomainAccessStore::open(&path).expect("open should succeed");
        assert!(store.update_domain_role(domain_role("testUser1")));
        assert!(store.update_master_access_control_entry(master_ace("testUser1", "interface1")));
        assert!(store.update_master_access_control_entry(master_ace(
            "testUser1",
            "this/is/a/test/interface"
        )));
        assert!(store.update_mediator_access_control_entry(master_ace("testUser2", "interface1")));
        assert!(store.update_owner_access_control_entry(owner_ace("testUser1", "interface1")));
        assert!(store.update_master_registration_control_entry(master_rce("testUser1")));
        assert!(store.update_mediator_registration_control_entry(master_rce("testUser2")));
        assert!(store.update_owner_registration_control_entry(owner_rce("testUser1")));
    }

    let restored = LocalDomainAccessStore::open(&path).expect("reopen should succeed");

    assert_eq!(
        restored.get_domain_role("testUser1", Role::Owner),
        Some(domain_role("testUser1"))
    );
    assert_eq!(
        restored.get_master_access_control_entry(
            "testUser1",
            "domain1",
            "this/is/a/test/interface",
            "READ"
        ),
        Some(master_ace("testUser1", "this/is/a/test/interface"))
    );
    assert_eq!(
        restored.get_master_access_control_entries("testUser1").len(),
        2
    );
    assert_eq!(
        restored.get_mediator_access_control_entries("testUser2"),
        vec![master_ace("testUser2", "interface1")]
    );
    assert_eq!(
        restored.get_owner_access_control_entry("testUser1", "domain1", "interface1", "WRITE"),
        Some(owner_ace("testUser1", "interface1"))
    );
    assert_eq!(
        restored.get_master_registration_control_entry("testUser1", "domain1", "interface1"),
        Some(master_rce("testUser1"))
    );
    assert_eq!(
        restored.get_mediator_registration_control_entries("testUser2"),
        vec![master_rce("testUser2")]
    );
    assert_eq!(
        restored.get_owner_registration_control_entry("testUser1", "domain1", "interface1"),
        Some(owner_rce("testUser1"))
    );
}

#[test]
fn removals_are_durable_too() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("access-store.persist");

    {
        let store = LocalDomainAccessStore::open(&path).expect("open should succeed");
        store.update_master_access_control_entry(master_ace("testUser1", "interface1"));
        assert!(store.remove_master_access_control_entry(
            "testUser1",
            "domain1",
            "interface1",
            "READ"
        ));
    }

    let restored = LocalDomainAccessStore::open(&path).expect("reopen should succeed");

    assert!(restored
        .get_master_access_control_entries("testUser1")
        .is_empty());
}

#[test]
fn corrupt_store_file_is_fatal_at_construction() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("access-store.persist");
    std::fs::write(&path, "definitely not json").expect("write corrupt file");

    assert!(LocalDomainAccessStore::open(&path).is_err());
}

#[test]
fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("access-store.persist");

    let store = LocalDomainAccessStore::open(&path).expect("open should succeed");

    assert!(store.get_domain_roles("testUser1").is_empty());
}
