//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the core
//! engines so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Cast(#[from] game_core::CastError),

    #[error(transparent)]
    QuestCompile(#[from] game_core::QuestCompileError),

    #[error("no quest named {0:?} is running")]
    UnknownQuest(String),
}
