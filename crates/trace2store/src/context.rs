//! Caller-supplied cancellation and deadlines.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Carries a cancellation signal and an optional deadline into an export call.
///
/// Cloning a context shares its cancellation token. Use [`Context::child`]
/// for a context that can be canceled on its own.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(token: CancellationToken) -> Self {
        Context {
            token,
            deadline: None,
        }
    }

    /// Returns a copy of the context with the given deadline. An earlier
    /// existing deadline is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Context {
            token: self.token.clone(),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// A context canceled whenever `self` is, which can also be canceled
    /// without affecting `self`.
    pub fn child(&self) -> Self {
        Context {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reports why the context is done, or `None` if it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn check(&self) -> Result<(), ContextError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_live() {
        let ctx = Context::background();
        assert_eq!(ctx.err(), None);
        assert!(ctx.check().is_ok());
        assert_eq!(ctx.deadline(), None);
    }

    #[test]
    fn test_cancel() {
        let ctx = Context::background();
        let clone = ctx.clone();
        ctx.cancel();
        assert_eq!(clone.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn test_child_cancel_does_not_affect_parent() {
        let parent = Context::background();
        let child = parent.child();
        child.cancel();
        assert_eq!(child.err(), Some(ContextError::Canceled));
        assert_eq!(parent.err(), None);

        let child = parent.child();
        parent.cancel();
        assert_eq!(child.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn test_external_token() {
        let token = CancellationToken::new();
        let ctx = Context::with_cancellation(token.clone());
        token.cancel();
        assert_eq!(ctx.check(), Err(ContextError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.err(), None);

        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_deadline_wins() {
        let ctx = Context::background().with_timeout(Duration::from_secs(1));
        let later = ctx.with_timeout(Duration::from_secs(60));
        assert_eq!(later.deadline(), ctx.deadline());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_reported_before_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_secs(1));
        ctx.cancel();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(ctx.err(), Some(ContextError::Canceled));
    }
}
