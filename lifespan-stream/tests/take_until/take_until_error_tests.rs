// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lifespan_core::{LifecycleError, StreamItem};
use lifespan_stream::TakeUntilExt;
use lifespan_test_utils::{
    assert_stream_ended, test_channel, test_channel_with_errors, unwrap_stream, unwrap_value,
};

#[tokio::test]
async fn test_take_until_forwards_source_errors() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<i32>();
    let (_stop, notifier) = test_channel::<()>();
    let mut result = source.take_until_notified(notifier);

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(LifecycleError::stream_error("source failed")))?;
    tx.send(StreamItem::Value(2))?;

    // Assert
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut result, 500).await)), 1);
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(LifecycleError::StreamProcessing { .. })
    ));
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut result, 500).await)), 2);

    Ok(())
}

#[tokio::test]
async fn test_take_until_notifier_error_is_forwarded_then_ends() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let (stop, notifier) = test_channel_with_errors::<()>();
    let mut result = source.take_until_notified(notifier);

    // Act
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut result, 500).await)), 1);
    stop.send(StreamItem::Error(LifecycleError::stream_error("feed failed")))?;
    tx.send(2)?;

    // Assert
    let item = unwrap_stream(&mut result, 500).await;
    assert_eq!(
        item.unwrap_err().to_string(),
        "Stream processing error: feed failed"
    );
    assert_stream_ended(&mut result, 500).await;
    assert!(tx.is_closed());

    Ok(())
}
