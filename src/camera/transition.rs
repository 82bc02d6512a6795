//! Completion signalling for smooth pose transitions.
//!
//! A controller holds at most one [`PendingTransition`]. Starting another
//! transition replaces it; the replaced sender is dropped without being
//! completed and its [`TransitionHandle`] stays pending forever.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// Spherical damping factor while a transition is pending.
pub const TRANSITION_DAMPING: f32 = 0.04;

/// Per-axis distance under which a transition counts as converged.
pub const CONVERGENCE_THRESHOLD: f32 = 0.01;

/// Controller-side slot of an in-flight transition.
#[derive(Debug)]
pub struct PendingTransition {
    done: oneshot::Sender<()>,
}

impl PendingTransition {
    /// Create the sender half together with the caller's handle.
    #[must_use]
    pub fn channel() -> (Self, TransitionHandle) {
        let (done, rx) = oneshot::channel();
        (Self { done }, TransitionHandle { rx, abandoned: false })
    }

    /// Signal convergence to the waiting handle.
    pub fn complete(self) {
        // The caller may have dropped its handle; nothing to do then.
        let _ = self.done.send(());
    }
}

/// Future returned by a smooth `set_pose`.
///
/// Resolves once the controller's eased pose has converged. If the
/// transition is superseded by another smooth `set_pose` before that
/// happens, the handle never resolves.
#[derive(Debug)]
#[must_use = "a transition handle does nothing unless awaited or polled"]
pub struct TransitionHandle {
    rx: oneshot::Receiver<()>,
    abandoned: bool,
}

impl TransitionHandle {
    /// Whether the controller has dropped this transition without
    /// completing it. Only known after the handle has been polled.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}

impl Future for TransitionHandle {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.abandoned {
            return Poll::Pending;
        }
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(()),
            Poll::Ready(Err(oneshot::Canceled)) => {
                self.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
