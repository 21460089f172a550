//! Drive an animation on the tokio timer.
//!
//! [`AnimationTask::spawn`] moves an animation into a task that sleeps
//! until each pending tick, fires it and publishes a snapshot. Dropping
//! the [`AnimationTask`] aborts the task, which drops the animation with
//! it, so a cancelled display can never be touched by a late tick.

use crate::timer::Animation;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, warn};

/// Handle to a running animation task. Aborts the task on drop.
#[derive(Debug)]
pub struct AnimationTask {
    handle: JoinHandle<()>,
}

impl AnimationTask {
    /// Spawn `animation` on the current tokio runtime.
    ///
    /// The animation must already be started with `now = 0`; its tick
    /// times are read as milliseconds after the moment of spawning.
    /// `snapshot` runs after every visible change and its result is sent
    /// on the returned channel. The channel closes when the animation
    /// has nothing left to schedule or the task is disposed.
    pub fn spawn<A, S, F>(mut animation: A, mut snapshot: F) -> (Self, mpsc::UnboundedReceiver<S>)
    where
        A: Animation + Send + 'static,
        S: Send + 'static,
        F: FnMut(&A) -> S + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let epoch = Instant::now();
        let handle = tokio::spawn(async move {
            while let Some(tick) = animation.next_tick() {
                let Some(deadline) = epoch.checked_add(Duration::from_millis(tick.due())) else {
                    debug!(due = tick.due(), "tick beyond the timer range, stopping animation");
                    break;
                };
                sleep_until(deadline).await;
                if animation.fire(tick) && tx.send(snapshot(&animation)).is_err() {
                    debug!("snapshot receiver dropped, stopping animation");
                    break;
                }
            }
            animation.dispose();
        });
        (Self { handle }, rx)
    }

    /// Whether the animation has run out of ticks or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the animation to run out of ticks.
    ///
    /// A panic inside the animation is logged, not propagated.
    pub async fn join(mut self) {
        if let Err(e) = (&mut self.handle).await {
            if !e.is_cancelled() {
                warn!(error = %e, "animation task failed");
            }
        }
    }

    /// Abort the task now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for AnimationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
