use crate::error::ContextError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation and deadline carried alongside a single call.
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can cancel a call in flight. Whether that interrupts a send already on
/// the wire is up to the transport.
#[derive(Clone, Debug, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    /// A timeout too large to represent as an `Instant` means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Context {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails once the context is cancelled or past its deadline.
    pub fn err(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.remaining() {
            Some(remaining) if remaining.is_zero() => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_timeout_has_no_deadline() {
        let ctx = Context::with_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(ctx.deadline(), None);
        assert_eq!(ctx.err(), Ok(()));

        let ctx = Context::with_timeout(Duration::MAX);
        assert_eq!(ctx.remaining(), None);
    }

    #[test]
    fn background_never_expires() {
        let ctx = Context::background();
        assert_eq!(ctx.remaining(), None);
        assert_eq!(ctx.err(), Ok(()));
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = Context::background();
        let handle = ctx.clone();
        handle.cancel();

        assert!(ctx.is_cancelled());
        assert_eq!(ctx.err(), Err(ContextError::Cancelled));
    }

    #[test]
    fn elapsed_deadline() {
        let ctx = Context::with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(ctx.err(), Err(ContextError::DeadlineExceeded));

        let ctx = Context::with_timeout(Duration::from_secs(60));
        assert!(ctx.remaining().unwrap() > Duration::from_secs(30));
        assert_eq!(ctx.err(), Ok(()));
    }
}
