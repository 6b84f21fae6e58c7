// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lifespan_core::{ActivityEvent, FragmentEvent, SubjectError};
use lifespan_stream::{ComposeExt, LifecycleOwner, LifecycleProvider};
use lifespan_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, unwrap_value,
};

#[tokio::test]
async fn test_owner_tracks_current_stage() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleOwner::new();
    assert_eq!(owner.current(), None);

    // Act
    owner.dispatch(FragmentEvent::Attach)?;
    owner.dispatch(FragmentEvent::Create)?;

    // Assert
    assert_eq!(owner.current(), Some(FragmentEvent::Create));
    assert!(!owner.is_destroyed());

    Ok(())
}

#[tokio::test]
async fn test_owner_closes_after_terminal_stage() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleOwner::new();
    owner.dispatch(ActivityEvent::Create)?;

    // Act
    owner.dispatch(ActivityEvent::Destroy)?;

    // Assert
    assert!(owner.is_destroyed());
    assert_eq!(owner.current(), Some(ActivityEvent::Destroy));
    assert_eq!(
        owner.dispatch(ActivityEvent::Create),
        Err(SubjectError::Closed)
    );

    Ok(())
}

#[tokio::test]
async fn test_owner_bind_until_event() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleOwner::new();
    owner.dispatch(ActivityEvent::Create)?;
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&owner.bind_until_event(ActivityEvent::Pause));

    // Act & Assert
    owner.dispatch(ActivityEvent::Start)?;
    owner.dispatch(ActivityEvent::Resume)?;
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);

    owner.dispatch(ActivityEvent::Pause)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_owner_bind_to_lifecycle_uses_topology_table() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleOwner::new();
    for stage in [
        FragmentEvent::Attach,
        FragmentEvent::Create,
        FragmentEvent::CreateView,
        FragmentEvent::Start,
    ] {
        owner.dispatch(stage)?;
    }
    let (tx, source) = test_channel::<i32>();
    let mut bound = source.compose(&owner.bind_to_lifecycle());

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);
    owner.dispatch(FragmentEvent::Resume)?;
    owner.dispatch(FragmentEvent::Pause)?;
    assert_no_element_emitted(&mut bound, 100).await;

    owner.dispatch(FragmentEvent::Stop)?;
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_owner_bound_after_destroy_completes_immediately() -> anyhow::Result<()> {
    // Arrange
    let owner = LifecycleOwner::new();
    owner.dispatch(ActivityEvent::Create)?;
    owner.dispatch(ActivityEvent::Destroy)?;
    let (tx, source) = test_channel::<i32>();

    // Act
    let mut bound = source.compose(&owner.bind_to_lifecycle());
    tx.send(1)?;

    // Assert
    assert_stream_ended(&mut bound, 500).await;

    Ok(())
}
