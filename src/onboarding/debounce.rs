//! Cancellable per-key debounce timers.
//!
//! Each key holds at most one deadline. Re-arming a key replaces its deadline,
//! so only the last change in a burst fires. Timers are plain data: dropping
//! the owner drops every pending deadline, nothing keeps running in the
//! background.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

/// Default validation debounce delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct FieldTimers<K> {
    delay: Duration,
    deadlines: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Copy> FieldTimers<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start (or restart) the timer for `key`.
    pub fn arm(&mut self, key: K) {
        self.deadlines.insert(key, Instant::now() + self.delay);
    }

    /// Returns whether a timer was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        self.deadlines.remove(&key).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.deadlines.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_expired(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Instant)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*key, *deadline))
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);

        for (key, _) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    /// Wait for the next deadline and return the keys that expired.
    ///
    /// Returns immediately with nothing when no timer is pending. Cancel-safe:
    /// if the future is dropped before completion no timer is consumed.
    pub async fn expired(&mut self) -> Vec<K> {
        let Some(deadline) = self.next_deadline() else {
            return Vec::new();
        };
        tokio::time::sleep_until(deadline).await;
        self.take_expired(Instant::now())
    }
}

impl<K: Eq + Hash + Copy> Default for FieldTimers<K> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
