use domain_access_control::{
    AccessControlListEditor, CallContext, DomainRoleEntry, LocalDomainAccessController,
    LocalDomainAccessStore, OwnerAccessControlEntry, OwnerRegistrationControlEntry, Permission,
    Role, TrustLevel,
};
use std::collections::BTreeSet;
use std::sync::Arc;

fn setup(audit_mode: bool) -> (AccessControlListEditor, Arc<LocalDomainAccessStore>) {
    // One-time subscriber init so audit events are visible under RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let store = Arc::new(LocalDomainAccessStore::new());
    let controller = Arc::new(LocalDomainAccessController::new(store.clone()));
    (
        AccessControlListEditor::new(store.clone(), controller, audit_mode),
        store,
    )
}

fn owner_ace(domain: &str) -> OwnerAccessControlEntry {
    OwnerAccessControlEntry {
        uid: "consumerUser".to_string(),
        domain: domain.to_string(),
        interface_name: "interface1".to_string(),
        required_trust_level: TrustLevel::Low,
        required_ace_change_trust_level: TrustLevel::Low,
        operation: "READ".to_string(),
        consumer_permission: Permission::Yes,
    }
}

fn owner_rce(domain: &str) -> OwnerRegistrationControlEntry {
    OwnerRegistrationControlEntry {
        uid: "providerUser".to_string(),
        domain: domain.to_string(),
        interface_name: "interface1".to_string(),
        required_trust_level: TrustLevel::Low,
        required_ace_change_trust_level: TrustLevel::Low,
        provider_permission: Permission::Yes,
    }
}

#[test]
fn owner_edits_need_the_owner_role_for_the_target_domain() {
    let (editor, store) = setup(false);
    store.update_domain_role(DomainRoleEntry::new(
        "editorUser",
        BTreeSet::from(["domain1".to_string()]),
        Role::Owner,
    ));
    let context = CallContext::new("editorUser");

    assert!(editor.update_owner_access_control_entry(&context, owner_ace("domain1")));
    assert!(!editor.update_owner_access_control_entry(&context, owner_ace("domain2")));

    assert!(editor.update_owner_registration_control_entry(&context, owner_rce("domain1")));
    assert!(editor.remove_owner_registration_control_entry(
        &context,
        "providerUser",
        "domain1",
        "interface1"
    ));
    assert!(!editor.remove_owner_registration_control_entry(
        &context,
        "providerUser",
        "domain2",
        "interface1"
    ));
}

#[test]
fn master_role_does_not_grant_owner_edits() {
    let (editor, store) = setup(false);
    store.update_domain_role(DomainRoleEntry::new(
        "editorUser",
        BTreeSet::from(["domain1".to_string()]),
        Role::Master,
    ));
    let context = CallContext::new("editorUser");

    assert!(!editor.update_owner_access_control_entry(&context, owner_ace("domain1")));
}

#[test]
fn denial_is_a_false_result_not_a_panic_or_error() {
    let (editor, store) = setup(false);
    let context = CallContext::new("nobody");

    let denied = editor.update_owner_access_control_entry(&context, owner_ace("domain1"));

    assert!(!denied);
    assert!(store
        .get_owner_access_control_entries("consumerUser")
        .is_empty());
}

#[test]
fn audit_mode_records_but_does_not_enforce() {
    let (editor, store) = setup(true);
    let context = CallContext::new("unprivilegedUser");

    // No role entry at all, yet the edit goes through in audit mode.
    assert!(editor.update_owner_access_control_entry(&context, owner_ace("domain1")));
    assert_eq!(
        store.get_owner_access_control_entries("consumerUser").len(),
        1
    );

    // Removal through the audited path works the same way.
    assert!(editor.remove_owner_access_control_entry(
        &context,
        "consumerUser",
        "domain1",
        "interface1",
        "READ"
    ));
}
