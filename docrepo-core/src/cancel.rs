//! Cooperative cancellation handles passed through to erasers.
//!
//! A [`Cancellation`] either wraps a [`CancellationToken`] supplied by the caller or
//! is the [`Cancellation::none()`] sentinel, which can never be cancelled. Repository
//! operations that take no token forward the sentinel; operations that take a token
//! forward it as-is. Only erasers act on cancellation.

use futures::future::{self, Either};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{RepositoryError, RepositoryResult};

/// An optional cancellation token; the default is the non-cancellable sentinel.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: Option<CancellationToken>,
}

impl Cancellation {
    /// The non-cancellable sentinel.
    pub fn none() -> Self {
        Self { token: None }
    }

    /// Returns `true` if this is the non-cancellable sentinel.
    pub fn is_none(&self) -> bool {
        self.token.is_none()
    }

    /// Returns `true` if a token is present and cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    /// Fails with [`RepositoryError::Cancelled`] if cancellation has been requested.
    pub fn check(&self) -> RepositoryResult<()> {
        if self.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        Ok(())
    }

    /// Drives `operation` to completion unless the token is cancelled first.
    ///
    /// An already cancelled token fails without polling `operation`. The sentinel
    /// simply awaits `operation`.
    pub async fn run<F, R>(&self, operation: F) -> RepositoryResult<R>
    where
        F: Future<Output = RepositoryResult<R>>,
    {
        let Some(token) = &self.token else {
            return operation.await;
        };

        self.check()?;

        let cancelled = std::pin::pin!(token.cancelled());
        let operation = std::pin::pin!(operation);

        match future::select(cancelled, operation).await {
            Either::Left(_) => Err(RepositoryError::Cancelled),
            Either::Right((result, _)) => result,
        }
    }
}

impl From<CancellationToken> for Cancellation {
    fn from(token: CancellationToken) -> Self {
        Self { token: Some(token) }
    }
}

impl From<&CancellationToken> for Cancellation {
    fn from(token: &CancellationToken) -> Self {
        Self { token: Some(token.clone()) }
    }
}
