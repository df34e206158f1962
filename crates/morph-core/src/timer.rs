//! One-shot deferred work, fired from the frame tick.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    due_sec: f64,
    payload: T,
}

/// Pending one-shot timers. Timers due at the same instant fire in schedule order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule(&mut self, due_sec: f64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_sec,
            payload,
        });
        id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Remove and return the earliest timer due at or before `now_sec`.
    pub fn pop_due(&mut self, now_sec: f64) -> Option<(TimerId, T)> {
        let (pos, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_sec <= now_sec)
            .min_by(|(_, a), (_, b)| a.due_sec.total_cmp(&b.due_sec).then(a.id.0.cmp(&b.id.0)))?;
        let entry = self.entries.remove(pos);
        Some((entry.id, entry.payload))
    }
}
