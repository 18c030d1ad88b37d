use std::time::Duration;

#[derive(Debug)]
struct Pending<T> {
    due: Duration,
    payload: T,
}

/// Holds at most one deferred tick for a single animation instance.
///
/// Scheduling replaces whatever was pending and a replaced or cancelled
/// payload is never handed out. Owners put their session id in the payload
/// so they can tell a tick apart from one scheduled by an older session.
/// Time is whatever epoch the host measures `now` from.
#[derive(Debug)]
pub struct TimerScheduler<T> {
    pending: Option<Pending<T>>,
}

impl<T> TimerScheduler<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) {
        if self.pending.is_some() {
            tracing::trace!("replacing pending tick");
        }
        self.pending = Some(Pending {
            due: now + delay,
            payload,
        });
    }

    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            tracing::trace!(due = ?p.due, "cancelled pending tick");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Takes the pending payload, with the time it was due, once `now` has
    /// reached it. Each scheduled tick fires at most once.
    pub fn poll(&mut self, now: Duration) -> Option<(Duration, T)> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| (p.due, p.payload)),
            _ => None,
        }
    }
}

impl<T> Default for TimerScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
