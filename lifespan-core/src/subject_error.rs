// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Errors returned by [`LifecycleSubject`](crate::LifecycleSubject) operations.
///
/// These describe misuse of the subject itself (dispatching after the lifecycle ended),
/// not failures travelling through a stream. Convert into
/// [`LifecycleError`](crate::LifecycleError) when they need to go downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new stages or subscribers.
    Closed,
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Lifecycle subject is closed"),
        }
    }
}

impl std::error::Error for SubjectError {}
