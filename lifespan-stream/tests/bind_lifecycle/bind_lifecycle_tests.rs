// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use lifespan_core::{
    from_fn, from_stream, ActivityEvent, ActivityTransitions, AtOrAfter, FragmentEvent,
    LifecycleSubject, StageTable, StreamItem,
};
use lifespan_stream::{bind_activity, bind_fragment, bind_lifecycle, bind_lifecycle_with, ComposeExt};
use lifespan_test_utils::fixtures::subject_at;
use lifespan_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
    CountingSource,
};

#[tokio::test]
async fn test_bind_activity_resume_ends_at_pause() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Resume);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(owner.clone()));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(ActivityEvent::Pause)?;
    tx.send(2)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_activity_create_survives_stop() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Create);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(owner.clone()));

    // Act & Assert
    for stage in [
        ActivityEvent::Start,
        ActivityEvent::Resume,
        ActivityEvent::Pause,
        ActivityEvent::Stop,
    ] {
        owner.next(stage)?;
    }
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(ActivityEvent::Destroy)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_activity_pause_ends_at_stop() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Pause);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(owner.clone()));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(ActivityEvent::Stop)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_activity_ignores_reemitted_start_stage() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Resume);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(owner.clone()));
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    // Act
    owner.next(ActivityEvent::Resume)?;
    tx.send(2)?;

    // Assert
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 2);
    assert_no_element_emitted(&mut bound, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_fragment_create_view_ends_at_destroy_view() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(FragmentEvent::CreateView);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_fragment(owner.clone()));

    // Act & Assert
    owner.next(FragmentEvent::Start)?;
    owner.next(FragmentEvent::Resume)?;
    owner.next(FragmentEvent::Pause)?;
    owner.next(FragmentEvent::Stop)?;
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(FragmentEvent::DestroyView)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_fragment_destroy_ends_at_detach() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(FragmentEvent::Destroy);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_fragment(owner.clone()));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(FragmentEvent::Detach)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_after_terminal_stage_completes_without_error() -> anyhow::Result<()> {
    // Arrange
    let feed = from_stream(stream::iter([StreamItem::Value(ActivityEvent::Destroy)]));
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(feed));

    // Act
    tx.send(1)?;

    // Assert
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_to_closed_owner_completes_without_error() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Destroy);
    owner.close();
    let (_tx, source) = test_channel::<i32>();

    // Act
    let collected: Vec<_> = source.compose(&bind_activity(owner)).collect().await;

    // Assert
    assert!(collected.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_bind_before_first_stage_uses_first_emitted_stage() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleSubject::new();
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(owner.clone()));
    assert_no_element_emitted(&mut bound, 50).await;

    // Act & Assert
    owner.next(ActivityEvent::Start)?;
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.next(ActivityEvent::Stop)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_to_feed_ending_without_stage_mirrors_source() -> anyhow::Result<()> {
    // Arrange
    let feed = from_fn(stream::empty::<StreamItem<ActivityEvent>>);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(feed));

    // Act
    tx.send(1)?;
    drop(tx);

    // Assert
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_bind_lifecycle_connects_once_per_bound_stream() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Start);
    let counting = CountingSource::new(owner.clone());
    let transformer = bind_lifecycle(counting.clone(), ActivityTransitions);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&transformer);
    assert_eq!(counting.connect_count(), 0);

    // Act
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    // Assert
    assert_eq!(counting.connect_count(), 1);
    assert_eq!(counting.active_count(), 1);

    owner.next(ActivityEvent::Stop)?;
    assert_stream_ended(&mut bound, 500).await;
    assert_eq!(counting.connect_count(), 1);
    assert_eq!(counting.active_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_bind_lifecycle_dropping_bound_stream_releases_feed() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Resume);
    let counting = CountingSource::new(owner.clone());
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_activity(counting.clone()));
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    // Act
    drop(bound);

    // Assert
    assert_eq!(counting.active_count(), 0);
    assert!(tx.is_closed());

    Ok(())
}

#[tokio::test]
async fn test_bind_lifecycle_transformer_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let owner = subject_at(ActivityEvent::Create);
    let counting = CountingSource::new(owner.clone());
    let transformer = bind_activity(counting.clone());
    let (tx_first, first) = test_channel::<i32>();

    let mut bound_first = first.compose(&transformer);
    tx_first.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound_first, 500).await)), 1);

    // Act: the second application starts while the owner is resumed
    owner.next(ActivityEvent::Start)?;
    owner.next(ActivityEvent::Resume)?;
    let (tx_second, second) = test_channel::<i32>();
    let mut bound_second = second.compose(&transformer);
    tx_second.send(2)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound_second, 500).await)), 2);

    // Assert: each bound stream has its own window
    owner.next(ActivityEvent::Pause)?;
    assert_stream_ended(&mut bound_second, 500).await;
    tx_first.send(3)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound_first, 500).await)), 3);

    owner.next(ActivityEvent::Stop)?;
    owner.next(ActivityEvent::Destroy)?;
    assert_stream_ended(&mut bound_first, 500).await;
    assert_eq!(counting.connect_count(), 1);
    assert_eq!(counting.active_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_bind_lifecycle_with_custom_table_and_matcher() -> anyhow::Result<()> {
    // Arrange
    let table = StageTable::new("Activity", ActivityEvent::Destroy)
        .with(ActivityEvent::Resume, ActivityEvent::Stop);
    let owner = subject_at(ActivityEvent::Resume);
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&bind_lifecycle_with(owner.clone(), table, AtOrAfter));

    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    // Act: PAUSE is before STOP, DESTROY is past it
    owner.next(ActivityEvent::Pause)?;
    tx.send(2)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 2);
    owner.next(ActivityEvent::Destroy)?;

    // Assert
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}
