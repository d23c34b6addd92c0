//! Virtual clock for deterministic frame timing.
//!
//! The host advances the clock by its per-frame delta; timers scheduled on
//! the clock fire in due order during that advance. Nothing here reads the
//! wall clock, so tests drive time explicitly.

use crate::error::{check_delta, AnimationError};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TimerId;
}

#[derive(Debug)]
struct Timer<T> {
    due_ms: f64,
    /// Period for repeating timers.
    every_ms: Option<f64>,
    /// Insertion sequence, breaks ties between equal due times.
    seq: u64,
    payload: T,
}

/// A virtual clock with one-shot and repeating timers.
#[derive(Debug)]
pub struct VirtualClock<T> {
    /// Current virtual time in milliseconds.
    position_ms: f64,
    /// Number of completed advances.
    frames: u64,
    timers: SlotMap<TimerId, Timer<T>>,
    next_seq: u64,
}

impl<T: Clone> VirtualClock<T> {
    pub fn new() -> Self {
        Self {
            position_ms: 0.0,
            frames: 0,
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Current virtual time position.
    pub fn now_ms(&self) -> f64 {
        self.position_ms
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fire `payload` once, `delay_ms` from now.
    pub fn schedule_after(&mut self, delay_ms: f64, payload: T) -> TimerId {
        self.insert(self.position_ms + delay_ms.max(0.0), None, payload)
    }

    /// Fire `payload` every `period_ms`, first firing one period from now.
    pub fn schedule_every(&mut self, period_ms: f64, payload: T) -> TimerId {
        let period_ms = period_ms.max(f64::EPSILON);
        self.insert(self.position_ms + period_ms, Some(period_ms), payload)
    }

    fn insert(&mut self, due_ms: f64, every_ms: Option<f64>, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            due_ms,
            every_ms,
            seq,
            payload,
        })
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock and return the payloads of every timer that came due,
    /// in due order.
    ///
    /// A repeating timer fires at most once per advance; periods missed by a
    /// long frame are skipped rather than replayed in a burst.
    pub fn advance(&mut self, dt_ms: f32) -> Result<SmallVec<[T; 4]>, AnimationError> {
        let dt_ms = check_delta(dt_ms)?;
        self.position_ms += dt_ms as f64;
        self.frames += 1;

        let now = self.position_ms;
        let mut due: SmallVec<[(f64, u64, TimerId); 4]> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= now)
            .map(|(id, timer)| (timer.due_ms, timer.seq, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut fired = SmallVec::new();
        for (_, _, id) in due {
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            fired.push(timer.payload.clone());
            match timer.every_ms {
                Some(every) => {
                    while timer.due_ms <= now {
                        timer.due_ms += every;
                    }
                }
                None => {
                    self.timers.remove(id);
                }
            }
        }

        Ok(fired)
    }
}

impl<T: Clone> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Tick {
        Dispatch,
        Blink,
        Look,
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut clock = VirtualClock::new();
        let id = clock.schedule_after(100.0, Tick::Blink);

        assert!(clock.advance(60.0).unwrap().is_empty());
        assert_eq!(clock.advance(40.0).unwrap().as_slice(), &[Tick::Blink]);
        assert!(!clock.is_pending(id));
        assert!(clock.advance(500.0).unwrap().is_empty());
    }

    #[test]
    fn test_repeating_timer_skips_missed_periods() {
        let mut clock = VirtualClock::new();
        clock.schedule_every(1000.0, Tick::Dispatch);

        assert!(clock.advance(999.0).unwrap().is_empty());
        assert_eq!(clock.advance(1.0).unwrap().as_slice(), &[Tick::Dispatch]);

        // A 3.5 s stall yields one firing, not three
        assert_eq!(clock.advance(3500.0).unwrap().len(), 1);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut clock = VirtualClock::new();
        clock.schedule_after(30.0, Tick::Look);
        clock.schedule_after(10.0, Tick::Blink);
        clock.schedule_after(10.0, Tick::Dispatch);

        let fired = clock.advance(50.0).unwrap();
        assert_eq!(fired.as_slice(), &[Tick::Blink, Tick::Dispatch, Tick::Look]);
    }

    #[test]
    fn test_cancel_and_invalid_delta() {
        let mut clock = VirtualClock::new();
        let id = clock.schedule_after(10.0, Tick::Blink);
        assert!(clock.cancel(id));
        assert!(!clock.cancel(id));

        assert!(clock.advance(f32::NAN).is_err());
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.frames(), 0);
    }
}
