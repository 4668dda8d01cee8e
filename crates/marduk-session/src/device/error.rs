use thiserror::Error;

use super::BackendVariant;
use crate::session::LifecycleState;

/// Status reported by a context-suspend device when it re-acquires a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResumeStatus {
    Success,
    /// The context could not be (re)created.
    NotInitialized,
    /// The window handed to the device cannot back a surface.
    BadNativeWindow,
    /// The context was lost while suspended and must be rebuilt.
    ContextLost,
}

impl ResumeStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        self == ResumeStatus::Success
    }
}

/// Why a surface could not be re-acquired on resume.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("no native window available")]
    NoWindow,

    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("context resume reported {0:?}")]
    Context(ResumeStatus),
}

/// Errors surfaced by the session lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No usable backend or window at startup. The session cannot run.
    #[error("failed to initialize {variant} backend: {reason}")]
    FatalInit {
        variant: BackendVariant,
        reason: String,
    },

    /// Surface re-acquisition failed. The session stays paused until the
    /// next window becomes available.
    #[error("failed to resume session: {0}")]
    RecoverableResume(#[from] ResumeError),

    #[error("operation requires an initialized session (state: {0:?})")]
    NotInitialized(LifecycleState),

    #[error("session already terminated")]
    Terminated,
}

impl SessionError {
    /// True when the session cannot continue and the process should stop
    /// rendering.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::FatalInit { .. } | SessionError::Terminated)
    }
}
