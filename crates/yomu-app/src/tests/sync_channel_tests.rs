//! Pointer sources call back synchronously; these check that events queued
//! from a sync closure reach the async side in order.

use std::time::Duration;

use kanal::unbounded_async;
use tokio::time::timeout;
use yomu_types::{AppEvent, PointerEvent, TextSource};

fn pointer(offset: i64) -> AppEvent {
    AppEvent::Pointer {
        event: PointerEvent {
            sentence: "食べられない".to_string(),
            offset,
            x: None,
            y: None,
        },
        source: TextSource::Websocket,
    }
}

#[tokio::test]
async fn test_try_send_from_sync_closure() {
    let (tx, rx) = unbounded_async::<AppEvent>();

    let on_event = move |offset| {
        tx.try_send(pointer(offset)).unwrap();
    };
    for offset in 0..5 {
        on_event(offset);
    }

    for expected in 0..5 {
        let event = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match event {
            AppEvent::Pointer { event, .. } => assert_eq!(event.offset, expected),
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_full_queue_drops_instead_of_blocking() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(1);

    assert!(tx.try_send(pointer(0)).unwrap());
    assert!(!tx.try_send(pointer(1)).unwrap());

    let event = rx.recv().await.unwrap();
    assert!(matches!(event, AppEvent::Pointer { event, .. } if event.offset == 0));
}

#[tokio::test]
async fn test_multiple_spawned_sends() {
    let (tx, rx) = unbounded_async::<AppEvent>();

    for i in 0..100 {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(pointer(i)).await.expect("send failed");
        });
    }

    let mut count = 0;
    let result = timeout(Duration::from_secs(2), async {
        while count < 100 {
            rx.recv().await.expect("recv failed");
            count += 1;
        }
    })
    .await;

    assert!(result.is_ok(), "Timeout waiting for events!");
    assert_eq!(count, 100);
}
