use async_trait::async_trait;
use message_router::stubs::{
    MessagingStubRegistry, TransmitError, WebSocketMessagingStubFactory, WebSocketSender,
};
use message_router::{Message, MessageRouter, RouterConfig};
use message_router::routing::RoutingTable;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// WebSocket sender double that records every send and can delay or fail
/// individual destination urls.
#[derive(Default)]
pub struct RecordingWebSocketSender {
    pub sent: Mutex<Vec<(String, String)>>,
    delays: Mutex<HashMap<String, Duration>>,
    transient_failures: Mutex<HashMap<String, usize>>,
}

impl RecordingWebSocketSender {
    #[allow(dead_code)]
    pub async fn delay_url(&self, url: &str, delay: Duration) {
        self.delays.lock().await.insert(url.to_string(), delay);
    }

    #[allow(dead_code)]
    pub async fn fail_transiently(&self, url: &str, times: usize) {
        self.transient_failures
            .lock()
            .await
            .insert(url.to_string(), times);
    }

    pub async fn sent_to(&self, url: &str) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(sent_url, _)| sent_url == url)
            .count()
    }
}

#[async_trait]
impl WebSocketSender for RecordingWebSocketSender {
    async fn send(&self, url: &str, message: &Message) -> Result<(), TransmitError> {
        let delay = self.delays.lock().await.get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut failures = self.transient_failures.lock().await;
            if let Some(remaining) = failures.get_mut(url) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(TransmitError::transient("connection refused"));
                }
            }
        }

        self.sent
            .lock()
            .await
            .push((url.to_string(), message.id().to_string()));
        Ok(())
    }
}

pub fn fast_retry_config() -> RouterConfig {
    RouterConfig {
        initial_retry_interval_ms: 1,
        max_retry_interval_ms: 8,
        retry_multiplier: 2.0,
        routing_table_cleanup_interval_ms: 25,
        routing_table_persistence_file: None,
    }
}

pub fn make_router(sender: Arc<RecordingWebSocketSender>, config: RouterConfig) -> MessageRouter {
    // One-time subscriber init is owned by the test process boundary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut stub_registry = MessagingStubRegistry::new();
    stub_registry
        .register_factory(Arc::new(WebSocketMessagingStubFactory::new(sender)))
        .expect("factory registration should succeed");

    MessageRouter::new(
        Arc::new(RoutingTable::new()),
        Arc::new(stub_registry),
        config,
    )
}
