//! Cancellation tokens used to unwind statement execution early.
//!
//! A [`CancellationTokenSource`] is owned by whoever can observe "this work
//! should stop" (the statement manager, on `Cancel` or TTL eviction; the HTTP
//! layer, on request-context cancellation). [`CancellationToken`]s are cheap,
//! cloneable handles handed down into the executor and checked between
//! dispatch steps.

use std::fmt;
use std::sync::{
    Arc, LazyLock, Weak,
    atomic::{AtomicU64, Ordering},
};

static NEVER_CANCELS_CST: LazyLock<CancellationTokenSource> =
    LazyLock::new(CancellationTokenSource::new);

/// Marker error for a cancelled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelledError;

impl fmt::Display for CancelledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for CancelledError {}

/// Turns any error type `E` into a cancellable error type.
///
/// A function that returns `Result<T, Cancellable<E>>` can return
/// `Err(Cancellable::Cancelled)` to indicate that the operation was
/// cancelled, without needing `E` to carry a cancellation variant itself.
#[derive(Debug)]
pub enum Cancellable<E> {
    Cancelled,
    Error(E),
}

impl<E: From<CancelledError>> Cancellable<E> {
    /// Flattens `Cancellable<E>` into `E`, relying on `E: From<CancelledError>`.
    pub fn flatten(self) -> E {
        match self {
            Cancellable::Cancelled => E::from(CancelledError),
            Cancellable::Error(e) => e,
        }
    }
}

impl<E> From<CancelledError> for Cancellable<E> {
    fn from(_: CancelledError) -> Self {
        Cancellable::Cancelled
    }
}

impl<E: std::error::Error> From<E> for Cancellable<E> {
    fn from(err: E) -> Self {
        Cancellable::Error(err)
    }
}

#[derive(Default, Debug)]
struct InnerSource {
    request_id: AtomicU64,
}

/// Issues [`CancellationToken`]s and can cancel all tokens issued so far.
///
/// Dropping the source cancels every token it ever issued.
#[derive(Clone, Default, Debug)]
pub struct CancellationTokenSource {
    inner: Arc<InnerSource>,
}

impl CancellationTokenSource {
    pub fn new() -> Self {
        CancellationTokenSource {
            inner: Arc::new(InnerSource::default()),
        }
    }

    /// Issues a fresh token tied to the current cancellation generation.
    pub fn token(&self) -> CancellationToken {
        let request_id = self.inner.request_id.load(Ordering::Acquire);
        CancellationToken {
            source: Arc::downgrade(&self.inner),
            request_id,
        }
    }

    /// Cancels every token issued from this source so far.
    #[inline]
    pub fn cancel(&self) {
        self.inner.request_id.fetch_add(1, Ordering::AcqRel);
    }
}

/// A cheap, cloneable handle used to check whether the work it was issued
/// for should stop.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    source: Weak<InnerSource>,
    request_id: u64,
}

impl CancellationToken {
    /// A token that never reports cancelled. Used as an escape hatch in
    /// tests and call sites that have not yet threaded a real token through.
    pub fn never_cancels() -> Self {
        NEVER_CANCELS_CST.token()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        match self.source.upgrade() {
            Some(source) => source.request_id.load(Ordering::Acquire) > self.request_id,
            None => true,
        }
    }

    /// Convenience check for use with `?` in functions returning
    /// `Result<T, E>` where `E: From<CancelledError>`.
    #[inline]
    pub fn check_cancellation(&self) -> Result<(), CancelledError> {
        if self.is_cancelled() {
            Err(CancelledError)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn token_reflects_source_cancel() {
        let cts = CancellationTokenSource::new();
        let token = cts.token();
        assert!(!token.is_cancelled());

        cts.cancel();
        assert!(token.is_cancelled());

        let fresh = cts.token();
        assert!(!fresh.is_cancelled());
    }

    #[test]
    fn dropping_source_cancels_outstanding_tokens() {
        let cts = CancellationTokenSource::new();
        let token = cts.token();
        drop(cts);
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancellation_crosses_threads() {
        let cts = CancellationTokenSource::new();
        let token = cts.token();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            cts.cancel();
        });

        while !token.is_cancelled() {
            thread::sleep(Duration::from_millis(5));
        }
        handle.join().unwrap();
    }

    #[test]
    fn never_cancels_stays_live() {
        let token = CancellationToken::never_cancels();
        assert!(!token.is_cancelled());
    }
}
