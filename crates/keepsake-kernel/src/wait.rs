//! Logical clock and cooperative wait primitives
//!
//! Tasks never block. Every wait is a loop around [`next_tick`], which yields once
//! and lets the scheduler move on to the next task. The scheduler advances the
//! [`Clock`] before each pass, so timed waits resolve against logical time.

use crate::error::HarvestError;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

/// Shared logical time, advanced by the scheduler once per pass
#[derive(Debug, Clone, Default)]
pub struct Clock {
    micros: Arc<AtomicU64>,
}

impl Clock {
    /// Clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }

    /// Move time forward
    pub fn advance(&self, delta: Duration) {
        let micros = u64::try_from(delta.as_micros()).unwrap_or(u64::MAX);
        self.micros.fetch_add(micros, Ordering::Relaxed);
    }
}

/// Future that is pending exactly once
#[derive(Debug, Default)]
#[must_use = "futures do nothing unless awaited"]
pub struct NextTick {
    yielded: bool,
}

impl Future for NextTick {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Yield until the next scheduler pass
pub fn next_tick() -> NextTick {
    NextTick::default()
}

/// Suspend for at least `duration` of logical time
pub async fn wait(clock: &Clock, duration: Duration) {
    let deadline = clock.now() + duration;
    loop {
        next_tick().await;
        if clock.now() >= deadline {
            break;
        }
    }
}

/// Re-evaluate `predicate` once per pass until it holds
///
/// There is no timeout. An error from the predicate ends the wait immediately.
///
/// # Errors
/// Whatever the predicate returns
pub async fn wait_until<F>(mut predicate: F) -> Result<(), HarvestError>
where
    F: FnMut() -> Result<bool, HarvestError>,
{
    while !predicate()? {
        next_tick().await;
    }
    Ok(())
}

/// Re-evaluate `predicate` every `interval` of logical time until it holds
///
/// # Errors
/// Whatever the predicate returns
pub async fn poll_until<F>(
    clock: &Clock,
    interval: Duration,
    mut predicate: F,
) -> Result<(), HarvestError>
where
    F: FnMut() -> Result<bool, HarvestError>,
{
    while !predicate()? {
        wait(clock, interval).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::noop_waker_ref;
    use std::cell::Cell;

    fn poll_once<F: Future + Unpin>(future: &mut F) -> Poll<F::Output> {
        let mut cx = Context::from_waker(noop_waker_ref());
        Pin::new(future).poll(&mut cx)
    }

    #[test]
    fn next_tick_yields_once() {
        let mut tick = next_tick();
        assert!(poll_once(&mut tick).is_pending());
        assert!(poll_once(&mut tick).is_ready());
    }

    #[test]
    fn timed_wait_follows_logical_clock() {
        let clock = Clock::new();
        let mut sleeping = Box::pin(wait(&clock, Duration::from_millis(100)));
        assert!(poll_once(&mut sleeping).is_pending());

        for _ in 0..6 {
            clock.advance(Duration::from_millis(16));
            assert!(poll_once(&mut sleeping).is_pending());
        }
        clock.advance(Duration::from_millis(16));
        assert!(poll_once(&mut sleeping).is_ready());
    }

    #[test]
    fn predicate_wait_checks_every_pass() {
        let calls = Cell::new(0);
        let mut waiting = Box::pin(wait_until(|| {
            calls.set(calls.get() + 1);
            Ok(calls.get() >= 3)
        }));

        assert!(poll_once(&mut waiting).is_pending());
        assert!(poll_once(&mut waiting).is_pending());
        assert!(matches!(poll_once(&mut waiting), Poll::Ready(Ok(()))));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn predicate_error_ends_wait() {
        let mut waiting = Box::pin(wait_until(|| Err(HarvestError::Abandoned("gone".into()))));
        assert!(matches!(poll_once(&mut waiting), Poll::Ready(Err(_))));
    }
}
