//! Canonical structured event names used across `message-router`.

// Routing-table lifecycle events.
pub const HOP_ADD_OK: &str = "hop_add_ok";
pub const HOP_ADD_UPDATE_SKIPPED: &str = "hop_add_update_skipped";
pub const HOP_ADD_STICKY_CONFLICT: &str = "hop_add_sticky_conflict";
pub const HOP_REMOVE_OK: &str = "hop_remove_ok";
pub const HOP_REMOVE_MISSING: &str = "hop_remove_missing";
pub const HOP_REMOVE_STICKY_REJECTED: &str = "hop_remove_sticky_rejected";
pub const HOP_EXPIRED_PURGED: &str = "hop_expired_purged";

// Routing-table persistence events.
pub const PERSISTENCE_LOAD_OK: &str = "persistence_load_ok";
pub const PERSISTENCE_LOAD_FAILED: &str = "persistence_load_failed";
pub const PERSISTENCE_WRITE_FAILED: &str = "persistence_write_failed";

// Stub registry and cache events.
pub const STUB_CREATE: &str = "stub_create";
pub const STUB_REUSE: &str = "stub_reuse";
pub const STUB_EVICT: &str = "stub_evict";
pub const STUB_NO_FACTORY: &str = "stub_no_factory";
pub const STUB_AMBIGUOUS_FACTORY: &str = "stub_ambiguous_factory";
pub const STUB_FACTORY_REGISTERED: &str = "stub_factory_registered";

// Router delivery events.
pub const ROUTE_SEND_ATTEMPT: &str = "route_send_attempt";
pub const ROUTE_SEND_OK: &str = "route_send_ok";
pub const ROUTE_SEND_RETRY: &str = "route_send_retry";
pub const ROUTE_SEND_FAILED: &str = "route_send_failed";
pub const ROUTE_MESSAGE_EXPIRED: &str = "route_message_expired";
pub const ROUTE_UNKNOWN_PARTICIPANT: &str = "route_unknown_participant";
pub const ROUTE_CLEANUP_SWEEP: &str = "route_cleanup_sweep";
