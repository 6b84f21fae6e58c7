// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use lifespan_core::StreamItem;
use std::time::Duration;
use tokio::time::sleep;

/// Waits for the next item, panicking if the stream ends or nothing arrives in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    tokio::select! {
        item = stream.next() => match item {
            Some(item) => item,
            None => panic!("Stream ended, expected an item."),
        },
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("No item emitted within {timeout_ms}ms.");
        }
    }
}

/// Extracts the value of an item, panicking on errors and on end of stream.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(err)) => panic!("Expected a value, got error: {err}"),
        None => panic!("Expected a value, stream ended."),
    }
}

/// Asserts that the stream completes within the timeout, without emitting anything else.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "Unexpected item emitted, expected end of stream.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Stream still open after {timeout_ms}ms, expected end of stream.");
        }
    }
}

/// Asserts that the stream neither emits nor completes within the timeout.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _state = stream.next() => {
            panic!("Unexpected emission or completion, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}
