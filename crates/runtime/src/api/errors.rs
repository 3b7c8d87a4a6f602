//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the engine, and text providers so
//! clients can bubble them up with consistent context.
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ExecuteError, TickError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Tick(#[from] TickError),

    #[error("manual stepping requires TickMode::Manual")]
    NotManual,

    #[error("failed to load realm lore")]
    Lore(#[source] anyhow::Error),
}

/// Failures of a realm-details provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("text service rate limited the request")]
    RateLimited { retry_after: Option<Duration> },

    #[error("text service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("text service returned malformed content: {0}")]
    Malformed(String),

    #[error("text service is not configured: {0}")]
    NotConfigured(&'static str),
}

impl ProviderError {
    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::RateLimited { .. } => true,
            ProviderError::Http(error) => error.is_timeout() || error.is_connect(),
            ProviderError::Status { status, .. } => *status >= 500,
            ProviderError::Malformed(_) | ProviderError::NotConfigured(_) => false,
        }
    }
}
