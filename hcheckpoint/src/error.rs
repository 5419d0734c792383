use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitError<E> {
    /// The checkpoint settled with an error.
    Failed(E),
    /// The checkpoint itself was cancelled.
    Cancelled,
    /// The waiter's own cancellation signal fired before resolution.
    Interrupted,
}

impl<E> Display for WaitError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(error) => write!(f, "checkpoint failed: {error}"),
            Self::Cancelled => f.write_str("checkpoint was cancelled"),
            Self::Interrupted => f.write_str("wait was interrupted by caller cancellation"),
        }
    }
}

impl<E> Error for WaitError<E> where E: Error + 'static {}
