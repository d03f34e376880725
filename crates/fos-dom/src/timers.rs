//! Timer APIs
//!
//! setTimeout/clearTimeout over a virtual millisecond clock. The host
//! advances the clock; nothing here reads wall time.

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Timer entry
#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due_at: u64,
    payload: T,
}

/// Timer manager
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u32,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            timers: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            due_at: self.now_ms.saturating_add(delay_ms),
            payload,
        });
        id
    }

    /// Clear a timer, returns whether it was pending
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Remove and return every due timer, earliest first
    pub fn take_ready(&mut self) -> Vec<(TimerId, T)> {
        let now = self.now_ms;
        let (mut ready, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due_at <= now);
        self.timers = pending;
        ready.sort_by_key(|t| (t.due_at, t.id.0));
        ready.into_iter().map(|t| (t.id, t.payload)).collect()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Get time until next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .iter()
            .map(|t| t.due_at.saturating_sub(self.now_ms))
            .min()
    }
}
