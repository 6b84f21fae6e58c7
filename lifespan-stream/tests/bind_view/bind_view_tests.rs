// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lifespan_core::{LifecycleError, LifecycleSubject};
use lifespan_stream::{bind_view, ComposeExt};
use lifespan_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
    CountingSource,
};

#[derive(Debug, Clone, PartialEq)]
struct Detached {
    view_id: u32,
}

#[tokio::test]
async fn test_bind_view_ends_on_first_detach() -> anyhow::Result<()> {
    // Arrange
    let detaches = LifecycleSubject::new();
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_view(detaches.clone()));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    detaches.next(Detached { view_id: 7 })?;
    detaches.next(Detached { view_id: 7 })?;
    tx.send(2)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_view_mirrors_while_attached() -> anyhow::Result<()> {
    // Arrange
    let detaches = LifecycleSubject::<()>::new();
    let counting = CountingSource::new(detaches.clone());
    let (tx, source) = test_channel::<&str>();
    let mut bound = source.compose(&bind_view(counting.clone()));

    // Act
    tx.send("a")?;
    tx.send("b")?;

    // Assert
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), "a");
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), "b");
    assert_no_element_emitted(&mut bound, 100).await;
    assert_eq!(counting.active_count(), 1);

    detaches.next(())?;
    assert_stream_ended(&mut bound, 500).await;
    assert_eq!(counting.active_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_bind_view_detach_error_terminates() -> anyhow::Result<()> {
    // Arrange
    let detaches = LifecycleSubject::<()>::new();
    let (_tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_view(detaches.clone()));
    assert_no_element_emitted(&mut bound, 50).await;

    // Act
    detaches.error(LifecycleError::stream_error("window destroyed"))?;

    // Assert
    assert!(unwrap_stream(&mut bound, 500).await.is_error());
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}
