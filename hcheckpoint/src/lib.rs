//! Single-assignment checkpoint futures.
//!
//! A [`Checkpoint`] starts unresolved and settles exactly once with a value,
//! an error, or a cancellation. The first writer wins; later writers observe a
//! no-op. Every waiter, whether it started waiting before or after the
//! checkpoint settled, observes the same resolution.
//!
//! ```rust
//! use hcheckpoint::{Checkpoint, Resolution};
//!
//! let checkpoint = Checkpoint::<u32, String>::new();
//! assert!(checkpoint.try_resolve(7));
//! assert!(!checkpoint.try_fail("too late".to_string()));
//!
//! assert_eq!(checkpoint.peek(), Some(Resolution::Value(7)));
//! assert!(checkpoint.is_succeeded());
//! ```

mod error;

use std::pin::pin;
use std::sync::{Arc, OnceLock};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

pub use error::WaitError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T, E> {
    Value(T),
    Error(E),
    Cancelled,
}

impl<T, E> Resolution<T, E> {
    pub fn into_result(self) -> Result<T, WaitError<E>> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(error) => Err(WaitError::Failed(error)),
            Self::Cancelled => Err(WaitError::Cancelled),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

struct Shared<T, E> {
    state: OnceLock<Resolution<T, E>>,
    notify: Notify,
}

pub struct Checkpoint<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Clone for Checkpoint<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Default for Checkpoint<T, E> {
    fn default() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: OnceLock::new(),
                notify: Notify::new(),
            }),
        }
    }
}

impl<T, E> std::fmt::Debug for Checkpoint<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.shared.state.get() {
            None => "unresolved",
            Some(Resolution::Value(_)) => "value",
            Some(Resolution::Error(_)) => "error",
            Some(Resolution::Cancelled) => "cancelled",
        };
        f.debug_struct("Checkpoint").field("state", &state).finish()
    }
}

impl<T, E> Checkpoint<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when this call settled the checkpoint.
    pub fn try_resolve(&self, value: T) -> bool {
        self.settle(Resolution::Value(value))
    }

    pub fn try_fail(&self, error: E) -> bool {
        self.settle(Resolution::Error(error))
    }

    pub fn try_cancel(&self) -> bool {
        self.settle(Resolution::Cancelled)
    }

    pub fn is_resolved(&self) -> bool {
        self.shared.state.get().is_some()
    }

    pub fn is_succeeded(&self) -> bool {
        self.shared
            .state
            .get()
            .is_some_and(|resolution| resolution.is_value())
    }

    fn settle(&self, resolution: Resolution<T, E>) -> bool {
        let won = self.shared.state.set(resolution).is_ok();
        if won {
            self.shared.notify.notify_waiters();
        }
        won
    }
}

impl<T, E> Checkpoint<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn peek(&self) -> Option<Resolution<T, E>> {
        self.shared.state.get().cloned()
    }

    pub fn value(&self) -> Option<T> {
        match self.shared.state.get() {
            Some(Resolution::Value(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn wait(&self) -> Result<T, WaitError<E>> {
        loop {
            let mut notified = pin!(self.shared.notify.notified());
            notified.as_mut().enable();

            if let Some(resolution) = self.shared.state.get() {
                return resolution.clone().into_result();
            }

            notified.await;
        }
    }

    /// Waits for resolution unless `cancel` fires first.
    ///
    /// Interrupting one waiter leaves the checkpoint and every other waiter
    /// untouched.
    pub async fn wait_with(&self, cancel: &CancellationToken) -> Result<T, WaitError<E>> {
        if cancel.is_cancelled() {
            return Err(WaitError::Interrupted);
        }

        tokio::select! {
            biased;
            result = self.wait() => result,
            _ = cancel.cancelled() => Err(WaitError::Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;

    #[test]
    fn first_writer_wins_and_later_writers_are_ignored() {
        let checkpoint = Checkpoint::<&'static str, String>::new();

        assert!(checkpoint.try_fail("boom".to_string()));
        assert!(!checkpoint.try_resolve("late"));
        assert!(!checkpoint.try_cancel());

        assert_eq!(checkpoint.peek(), Some(Resolution::Error("boom".to_string())));
        assert!(checkpoint.is_resolved());
        assert!(!checkpoint.is_succeeded());
        assert_eq!(checkpoint.value(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn waiters_before_and_after_resolution_observe_same_value() {
        let checkpoint = Checkpoint::<u64, String>::new();
        let mut early = Vec::new();
        for _ in 0..8 {
            let checkpoint = checkpoint.clone();
            early.push(tokio::spawn(async move { checkpoint.wait().await }));
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(checkpoint.try_resolve(42));

        for handle in early {
            assert_eq!(handle.await.expect("join"), Ok(42));
        }
        assert_eq!(checkpoint.wait().await, Ok(42));
    }

    #[tokio::test]
    async fn cancelled_checkpoint_reports_cancellation() {
        let checkpoint = Checkpoint::<(), String>::new();
        assert!(checkpoint.try_cancel());

        assert_eq!(checkpoint.wait().await, Err(WaitError::Cancelled));
    }

    #[tokio::test]
    async fn interrupted_waiter_does_not_affect_other_waiters() {
        let checkpoint = Checkpoint::<u8, String>::new();
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(
            checkpoint.wait_with(&token).await,
            Err(WaitError::Interrupted)
        );
        assert!(!checkpoint.is_resolved());

        let waiter = {
            let checkpoint = checkpoint.clone();
            tokio::spawn(async move { checkpoint.wait().await })
        };
        checkpoint.try_resolve(3);

        assert_eq!(waiter.await.expect("join"), Ok(3));
    }

    #[tokio::test]
    async fn wait_with_returns_when_token_fires_while_pending() {
        let checkpoint = Checkpoint::<u8, String>::new();
        let token = CancellationToken::new();

        let waiter = {
            let checkpoint = checkpoint.clone();
            let token = token.clone();
            tokio::spawn(async move { checkpoint.wait_with(&token).await })
        };
        token.cancel();

        assert_eq!(waiter.await.expect("join"), Err(WaitError::Interrupted));
        assert!(!checkpoint.is_resolved());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_writers_produce_exactly_one_winner() {
        let checkpoint = Checkpoint::<usize, usize>::new();
        let wins = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();

        for index in 0..16 {
            let checkpoint = checkpoint.clone();
            let wins = Arc::clone(&wins);
            handles.push(tokio::spawn(async move {
                let won = if index % 2 == 0 {
                    checkpoint.try_resolve(index)
                } else {
                    checkpoint.try_fail(index)
                };
                if won {
                    wins.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        for handle in handles {
            handle.await.expect("join");
        }

        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert!(checkpoint.is_resolved());
    }
}
