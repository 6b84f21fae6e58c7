// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::lifecycle_error::LifecycleError;

/// One element of a lifecycle feed, a bound stream or a termination notifier.
///
/// Failures travel in-band next to the values, so a feed that breaks does not tear down the
/// streams bound to it: binders decide what an error means for the binding.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    Value(T),
    Error(LifecycleError),
}

/// Two values compare by value. An error is never equal to anything, not even itself.
impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        matches!((self, other), (Self::Value(left), Self::Value(right)) if left == right)
    }
}

impl<T> StreamItem<T> {
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Transforms the value, leaving an error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StreamItem<U> {
        self.into_result().map(f).into()
    }

    /// Views the item as a `Result`.
    pub fn into_result(self) -> Result<T, LifecycleError> {
        self.into()
    }

    /// # Panics
    ///
    /// Panics with the error's message if the item is an `Error`.
    pub fn unwrap(self) -> T {
        self.into_result()
            .unwrap_or_else(|err| panic!("called `StreamItem::unwrap()` on an error: {err}"))
    }

    /// # Panics
    ///
    /// Panics if the item is a `Value`.
    pub fn unwrap_err(self) -> LifecycleError {
        match self {
            Self::Error(err) => err,
            Self::Value(_) => panic!("called `StreamItem::unwrap_err()` on a value"),
        }
    }
}

impl<T> From<Result<T, LifecycleError>> for StreamItem<T> {
    fn from(result: Result<T, LifecycleError>) -> Self {
        result.map_or_else(Self::Error, Self::Value)
    }
}

impl<T> From<StreamItem<T>> for Result<T, LifecycleError> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(value) => Ok(value),
            StreamItem::Error(err) => Err(err),
        }
    }
}
