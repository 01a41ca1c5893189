//! Consecutive duplicate request detection.
//!
//! Holds exactly one "last request" snapshot for the whole server instance.
//! The compare-and-replace runs under a mutex; the delay itself happens
//! outside the lock so other requests are never blocked by it.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::throttle::snapshot::RequestSnapshot;

/// Outcome of observing one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Differs from the previous request; forward immediately.
    Fresh,
    /// Identical to the immediately preceding request; delay before forwarding.
    Duplicate(Duration),
}

impl Verdict {
    pub fn delay(&self) -> Option<Duration> {
        match self {
            Verdict::Duplicate(d) => Some(*d),
            Verdict::Fresh => None,
        }
    }
}

#[derive(Debug)]
pub struct DuplicateDetector {
    delay: Duration,
    last: Mutex<Option<RequestSnapshot>>,
}

impl DuplicateDetector {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    /// Compare against the stored snapshot and replace it unconditionally.
    pub fn observe(&self, snapshot: RequestSnapshot) -> Verdict {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let duplicate = last.as_ref() == Some(&snapshot);
        *last = Some(snapshot);

        if duplicate {
            Verdict::Duplicate(self.delay)
        } else {
            Verdict::Fresh
        }
    }

    /// Observe the snapshot and sleep for the delay if it is a duplicate.
    pub async fn throttle(&self, snapshot: RequestSnapshot) -> Verdict {
        let verdict = self.observe(snapshot);
        if let Some(delay) = verdict.delay() {
            tracing::info!(seconds = delay.as_secs(), "consecutive requests detected, delaying response");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        verdict
    }
}
