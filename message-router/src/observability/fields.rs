//! Canonical structured field keys and value-format helpers.

use crate::message::Message;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";

pub const PARTICIPANT_ID: &str = "participant_id";
pub const MSG_ID: &str = "msg_id";
pub const ADDRESS: &str = "address";
pub const TRANSPORT: &str = "transport";

pub const ATTEMPT: &str = "attempt";
pub const DELAY_MS: &str = "delay_ms";
pub const ERR: &str = "err";
pub const REASON: &str = "reason";

pub const REASON_EXPIRED: &str = "expired";
pub const REASON_STICKY: &str = "sticky";
pub const REASON_TTL_ELAPSED: &str = "ttl_elapsed";

pub fn format_message_context(message: &Message) -> String {
    format!(
        "{}->{} ({})",
        message.sender(),
        message.recipient(),
        message.id()
    )
}

#[cfg(test)]
mod tests {
    use super::format_message_context;
    use crate::message::Message;

    #[test]
    fn message_context_names_both_ends() {
        let message = Message::new("sender-a", "recipient-b", 1_000, vec![]);

        let formatted = format_message_context(&message);

        assert!(formatted.starts_with("sender-a->recipient-b"));
        assert!(formatted.contains(message.id()));
    }
}
