// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for lifecycle binding.
//!
//! [`LifecycleError`] covers both errors returned while a binder is being built and errors
//! carried in-band by [`StreamItem::Error`](crate::StreamItem::Error).
//!
//! Three kinds are part of the binding contract:
//!
//! - [`LifecycleError::Configuration`] is returned at construction time, before anything
//!   subscribes to the lifecycle feed.
//! - [`LifecycleError::OutsideLifecycle`] is raised by a transition table when the binding
//!   starts at the terminal stage. The automatic binder recovers from it and completes the
//!   bound stream; callers never observe it.
//! - [`LifecycleError::UnsupportedStage`] is raised when a table has no entry for a stage.
//!   It is fatal and reaches the bound stream as an error.
//!
//! # Examples
//!
//! ```
//! use lifespan_core::{ActivityEvent, ActivityTransitions, TransitionTable};
//!
//! let err = ActivityTransitions
//!     .termination_stage_for(&ActivityEvent::Destroy)
//!     .unwrap_err();
//! assert!(err.is_outside_lifecycle());
//! assert!(!err.is_fatal());
//! ```

/// Root error type for lifecycle binding.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// A binder was built with a missing or conflicting argument.
    #[error("Invalid binder configuration: {context}")]
    Configuration {
        /// What was missing or conflicting
        context: String,
    },

    /// The binding started at the terminal stage, so there is no later stage to end at.
    #[error("Cannot bind to {topology} lifecycle when outside of it.")]
    OutsideLifecycle {
        /// Name of the lifecycle topology (`Activity`, `Fragment`, ...)
        topology: &'static str,
    },

    /// The transition table has no entry for the stage the binding started at.
    #[error("Binding to {stage} not yet implemented")]
    UnsupportedStage {
        /// Rendered stage
        stage: String,
    },

    /// General in-band stream failure.
    #[error("Stream processing error: {context}")]
    StreamProcessing {
        /// Description of what went wrong
        context: String,
    },

    /// Error produced by caller code and forwarded through a stream.
    #[error("User error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LifecycleError {
    /// Create a configuration error with the given context
    pub fn configuration(context: impl Into<String>) -> Self {
        Self::Configuration {
            context: context.into(),
        }
    }

    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessing {
            context: context.into(),
        }
    }

    /// Create an outside-lifecycle error for the named topology
    #[must_use]
    pub const fn outside_lifecycle(topology: &'static str) -> Self {
        Self::OutsideLifecycle { topology }
    }

    /// Create an unsupported-stage error for the given stage
    pub fn unsupported_stage(stage: impl core::fmt::Display) -> Self {
        Self::UnsupportedStage {
            stage: stage.to_string(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }

    /// Returns `true` for the error the automatic binder turns into a graceful completion.
    #[must_use]
    pub const fn is_outside_lifecycle(&self) -> bool {
        matches!(self, Self::OutsideLifecycle { .. })
    }

    /// Returns `true` for errors that indicate a programming or configuration defect.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::UnsupportedStage { .. }
        )
    }
}

/// Specialized Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// Extension trait for converting foreign errors into `LifecycleError`
pub trait IntoLifecycleError {
    /// Convert this error into a `LifecycleError`
    fn into_lifecycle_error(self) -> LifecycleError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoLifecycleError for E {
    fn into_lifecycle_error(self) -> LifecycleError {
        LifecycleError::user_error(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// User errors are flattened into a [`LifecycleError::StreamProcessing`] carrying the
    /// context; every other kind is returned unchanged.
    ///
    /// # Errors
    /// Returns `Err(LifecycleError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LifecycleError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| match e.into() {
            LifecycleError::User(inner) => LifecycleError::StreamProcessing {
                context: format!("{}: {inner}", context.into()),
            },
            other => other,
        })
    }
}

impl Clone for LifecycleError {
    fn clone(&self) -> Self {
        match self {
            Self::Configuration { context } => Self::Configuration {
                context: context.clone(),
            },
            Self::OutsideLifecycle { topology } => Self::OutsideLifecycle {
                topology: *topology,
            },
            Self::UnsupportedStage { stage } => Self::UnsupportedStage {
                stage: stage.clone(),
            },
            Self::StreamProcessing { context } => Self::StreamProcessing {
                context: context.clone(),
            },
            // Boxed user errors cannot be cloned, keep the message
            Self::User(e) => Self::StreamProcessing {
                context: format!("User error: {e}"),
            },
        }
    }
}

impl From<crate::SubjectError> for LifecycleError {
    fn from(err: crate::SubjectError) -> Self {
        Self::stream_error(err.to_string())
    }
}
