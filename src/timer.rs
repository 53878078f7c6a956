//! Cancellable one-shot and periodic timers on a virtual millisecond clock.
//!
//! Every delayed or repeating effect of the card (rain frames, meter decay,
//! typewriter reveal, error clear, scheduled scroll, boot delay) is an entry in
//! one `Timers` queue. The browser frame loop drives the clock forward with
//! `performance.now()`; tests drive it by hand.

/// Periodic timers lagging further than this behind the clock are re-anchored
/// instead of replaying every missed tick (e.g. after the tab was hidden).
pub const MAX_LAG_MS: f64 = 5_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug)]
enum Repeat {
    Once,
    Every(f64),
}

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    due: f64,
    repeat: Repeat,
    event: E,
}

#[derive(Debug)]
pub struct Timers<E> {
    now: f64,
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E: Clone> Timers<E> {
    pub fn new(now: f64) -> Self {
        Self {
            now,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: f64, event: E) -> TimerId {
        self.push(self.now + delay_ms.max(0.0), Repeat::Once, event)
    }

    /// Fire `event` every `interval_ms`, first time one interval from now.
    pub fn every(&mut self, interval_ms: f64, event: E) -> TimerId {
        // A zero interval would spin pop_due forever.
        let interval = interval_ms.max(1.0);
        self.push(self.now + interval, Repeat::Every(interval), event)
    }

    fn push(&mut self, due: f64, repeat: Repeat, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due,
            repeat,
            event,
        });
        id
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel the timer in `slot` (if any) and leave the slot empty.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest event due at or before `until`. Ties go to the timer
    /// scheduled first. The clock moves to the fired event's due time so
    /// timers scheduled while handling it start from the exact firing instant;
    /// when nothing is due it settles at `until`. The clock never runs backwards.
    pub fn pop_due(&mut self, until: f64) -> Option<(TimerId, E)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now = self.now.max(until);
            return None;
        };

        let (id, due, repeat) = {
            let entry = &self.entries[idx];
            (entry.id, entry.due, entry.repeat)
        };
        self.now = self.now.max(due);
        match repeat {
            Repeat::Once => {
                let entry = self.entries.swap_remove(idx);
                Some((id, entry.event))
            }
            Repeat::Every(interval) => {
                let entry = &mut self.entries[idx];
                let event = entry.event.clone();
                let mut next = entry.due + interval;
                if until - next > MAX_LAG_MS {
                    next = until;
                }
                entry.due = next;
                Some((id, event))
            }
        }
    }
}
