//! Awaitable play completion.
//!
//! Every play operation returns a [`PlayCompletion`]. It resolves when the
//! timer computed at call time fires, not when the progress trajectory
//! settles: a later play that supersedes the trajectory does not move or
//! cancel an earlier completion.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

#[derive(Default)]
struct CompletionState {
    done: bool,
    waker: Option<Waker>,
}

/// A future that resolves when a play operation's wait has elapsed.
///
/// Polling is cheap and the future can also be checked without an executor
/// through [`is_complete`](Self::is_complete).
#[must_use = "a play completion does nothing unless awaited or inspected"]
pub struct PlayCompletion {
    inner: Arc<Mutex<CompletionState>>,
}

impl PlayCompletion {
    /// A completion that has already resolved.
    pub fn ready() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CompletionState {
                done: true,
                waker: None,
            })),
        }
    }

    /// Whether the wait has elapsed.
    pub fn is_complete(&self) -> bool {
        self.inner.lock().done
    }
}

impl Future for PlayCompletion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.inner.lock();
        if state.done {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

impl std::fmt::Debug for PlayCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayCompletion")
            .field("complete", &self.is_complete())
            .finish()
    }
}

/// The resolving side of a [`PlayCompletion`].
///
/// Dropping the handle resolves the completion too.
pub(crate) struct CompletionHandle {
    inner: Arc<Mutex<CompletionState>>,
}

impl CompletionHandle {
    /// Resolve the paired completion.
    pub(crate) fn complete(self) {
        // Resolution happens in `Drop`.
    }

    fn resolve(&self) {
        let waker = {
            let mut state = self.inner.lock();
            state.done = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Drop for CompletionHandle {
    fn drop(&mut self) {
        self.resolve();
    }
}

/// Create a linked handle/completion pair.
pub(crate) fn completion_pair() -> (CompletionHandle, PlayCompletion) {
    let inner = Arc::new(Mutex::new(CompletionState::default()));
    (
        CompletionHandle {
            inner: inner.clone(),
        },
        PlayCompletion { inner },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[test]
    fn test_ready_is_complete() {
        let completion = PlayCompletion::ready();
        assert!(completion.is_complete());
        assert_eq!(completion.now_or_never(), Some(()));
    }

    #[test]
    fn test_pending_until_completed() {
        let (handle, mut completion) = completion_pair();
        assert!(!completion.is_complete());
        assert_eq!((&mut completion).now_or_never(), None);

        handle.complete();
        assert!(completion.is_complete());
        assert_eq!(completion.now_or_never(), Some(()));
    }

    #[test]
    fn test_dropped_handle_resolves() {
        let (handle, completion) = completion_pair();
        drop(handle);
        assert!(completion.is_complete());
    }

    #[test]
    fn test_wakes_blocked_executor() {
        let (handle, completion) = completion_pair();
        let worker = std::thread::spawn(move || handle.complete());
        pollster::block_on(completion);
        worker.join().unwrap();
    }
}
