mod support;

use message_router::{now_millis, Address, Message};
use std::sync::Arc;
use std::time::Duration;
use support::{fast_retry_config, make_router, RecordingWebSocketSender};

fn ws_address(url: &str) -> Arc<Address> {
    Arc::new(Address::WebSocket {
        url: url.to_string(),
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn routes_to_distinct_participants_do_not_block_each_other() {
    let sender = Arc::new(RecordingWebSocketSender::default());
    sender
        .delay_url("ws://slow-host:4242", Duration::from_millis(500))
        .await;
    let router = Arc::new(make_router(sender.clone(), fast_retry_config()));

    for (participant, url) in [
        ("slow-provider", "ws://slow-host:4242"),
        ("fast-provider", "ws://fast-host:4242"),
    ] {
        router
            .add_next_hop(
                participant,
                ws_address(url),
                true,
                now_millis() + 60_000,
                false,
                false,
            )
            .await
            .expect("registration should succeed");
    }

    let slow_router = router.clone();
    let slow = tokio::spawn(async move {
        slow_router
            .route(Message::new("proxy", "slow-provider", 60_000, vec![]))
            .await
    });

    // The fast route must complete while the slow transmit is still parked.
    let fast = tokio::time::timeout(
        Duration::from_millis(250),
        router.route(Message::new("proxy", "fast-provider", 60_000, vec![])),
    )
    .await;

    assert!(fast.expect("fast route should not be blocked").is_ok());
    assert_eq!(sender.sent_to("ws://fast-host:4242").await, 1);

    slow.await
        .expect("slow route task should not panic")
        .expect("slow route should complete too");
    assert_eq!(sender.sent_to("ws://slow-host:4242").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_participants_route_concurrently() {
    let sender = Arc::new(RecordingWebSocketSender::default());
    let router = Arc::new(make_router(sender.clone(), fast_retry_config()));

    for index in 0..16 {
        router
            .add_next_hop(
                format!("provider-{index}"),
                ws_address(&format!("ws://host-{index}:4242")),
                true,
                now_millis() + 60_000,
                false,
                false,
            )
            .await
            .expect("registration should succeed");
    }

    let mut route_tasks = Vec::new();
    for index in 0..16 {
        let task_router = router.clone();
        route_tasks.push(tokio::spawn(async move {
            task_router
                .route(Message::new(
                    "proxy",
                    format!("provider-{index}"),
                    60_000,
                    vec![],
                ))
                .await
        }));
    }

    for task in route_tasks {
        task.await
            .expect("route task should not panic")
            .expect("route should succeed");
    }
    assert_eq!(sender.sent.lock().await.len(), 16);
}
