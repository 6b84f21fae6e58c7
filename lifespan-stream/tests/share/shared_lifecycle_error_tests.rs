// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lifespan_core::{ActivityEvent, LifecycleError, LifecycleSubject, StreamItem};
use lifespan_stream::SharedLifecycle;
use lifespan_test_utils::{assert_stream_ended, unwrap_stream, unwrap_value};

#[tokio::test]
async fn test_shared_lifecycle_error_reaches_every_subscriber_then_ends() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleSubject::new();
    let shared = SharedLifecycle::new(owner.clone());
    let mut first = shared.subscribe();
    let mut second = shared.subscribe();

    // Act
    owner.next(ActivityEvent::Create)?;
    owner.error(LifecycleError::stream_error("owner crashed"))?;

    // Assert
    for subscriber in [&mut first, &mut second] {
        assert_eq!(
            unwrap_value(Some(unwrap_stream(subscriber, 500).await)),
            ActivityEvent::Create
        );
        assert!(matches!(
            unwrap_stream(subscriber, 500).await,
            StreamItem::Error(LifecycleError::StreamProcessing { .. })
        ));
        assert_stream_ended(subscriber, 500).await;
    }
    assert!(!shared.is_connected());

    Ok(())
}

#[tokio::test]
async fn test_shared_lifecycle_subscriber_after_error_reconnects() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleSubject::new();
    owner.next(ActivityEvent::Start)?;
    let shared = SharedLifecycle::new(owner.clone());
    let mut first = shared.subscribe();
    assert_eq!(
        unwrap_value(Some(unwrap_stream(&mut first, 500).await)),
        ActivityEvent::Start
    );

    // Act
    owner.error(LifecycleError::stream_error("owner crashed"))?;
    assert!(unwrap_stream(&mut first, 500).await.is_error());
    let mut late = shared.subscribe();

    // Assert: a closed owner replays its last stage and ends
    assert_eq!(
        unwrap_value(Some(unwrap_stream(&mut late, 500).await)),
        ActivityEvent::Start
    );
    assert_stream_ended(&mut late, 500).await;
    assert_eq!(shared.connection_count(), 2);

    Ok(())
}
