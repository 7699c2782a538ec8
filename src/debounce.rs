//! Cancellable delayed delivery of the latest value.
//!
//! A [`Debouncer`] owns a single timer. Arming it resets the deadline and
//! replaces whatever value was pending, so a burst of events collapses to
//! one delivery carrying the last value, `delay` after the burst settles.
//! There is never more than one outstanding timer.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep, Instant, Sleep};

pub struct Debouncer<T> {
    delay: Duration,
    timer: Pin<Box<Sleep>>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: Box::pin(sleep(delay)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` for delivery after the delay, superseding any
    /// pending value. Returns `true` if a pending value was replaced.
    pub fn arm(&mut self, value: T) -> bool {
        self.timer.as_mut().reset(Instant::now() + self.delay);
        self.pending.replace(value).is_some()
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the pending value once the timer elapses.
    ///
    /// Never resolves while disarmed. Cancel-safe: dropping the future
    /// keeps both the timer and the pending value intact.
    pub async fn settled(&mut self) -> T {
        loop {
            if self.pending.is_none() {
                pending::<()>().await;
            }
            self.timer.as_mut().await;
            if let Some(value) = self.pending.take() {
                return value;
            }
        }
    }
}
