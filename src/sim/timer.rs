//! Virtual-clock task scheduler
//!
//! Stations never block: anything that happens "later" (pour ticks, mixing
//! progress, the microwave popup) is a task with a handle. Tasks are plain
//! data; the owner pulls due tasks out with [`Scheduler::next_due`] and
//! dispatches them itself, so handlers get full `&mut` access to the station.

use serde::{Deserialize, Serialize};

/// Cancellation token for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Task<K> {
    handle: TaskHandle,
    due_ms: u64,
    /// Repeat interval (None = one-shot)
    every_ms: Option<u64>,
    /// Remaining firings for bounded repeats (None = until cancelled)
    remaining: Option<u32>,
    kind: K,
}

/// Single-threaded scheduler driven by [`Scheduler::next_due`]
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task<K>>,
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current virtual time (ms since the scheduler was created)
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, delay_ms: u64, every_ms: Option<u64>, remaining: Option<u32>, kind: K) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            handle,
            due_ms: self.now_ms + delay_ms,
            every_ms,
            remaining,
            kind,
        });
        handle
    }

    /// Fire once after `delay_ms`
    pub fn after(&mut self, delay_ms: u64, kind: K) -> TaskHandle {
        self.push(delay_ms, None, None, kind)
    }

    /// Fire every `interval_ms` until cancelled
    pub fn every(&mut self, interval_ms: u64, kind: K) -> TaskHandle {
        let interval = interval_ms.max(1);
        self.push(interval, Some(interval), None, kind)
    }

    /// Fire every `interval_ms`, `times` times in total
    pub fn repeat(&mut self, interval_ms: u64, times: u32, kind: K) -> TaskHandle {
        let interval = interval_ms.max(1);
        self.push(interval, Some(interval), Some(times.max(1)), kind)
    }

    /// Cancel a task. Returns false if it already finished or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel everything, returning how many tasks were still pending
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.tasks.len();
        self.tasks.clear();
        pending
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Milliseconds until `handle` next fires
    pub fn remaining_ms(&self, handle: TaskHandle) -> Option<u64> {
        self.tasks
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time. Ties fire in scheduling order. Repeating tasks are
    /// re-armed before being returned, so a handler may cancel them.
    pub fn next_due(&mut self, until_ms: u64) -> Option<(TaskHandle, K)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle.0))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[idx];
        self.now_ms = self.now_ms.max(task.due_ms);
        let fired = (task.handle, task.kind);

        match (task.every_ms, task.remaining) {
            (Some(interval), None) => task.due_ms += interval,
            (Some(interval), Some(n)) if n > 1 => {
                task.remaining = Some(n - 1);
                task.due_ms += interval;
            }
            _ => {
                self.tasks.swap_remove(idx);
            }
        }

        Some(fired)
    }

    /// Move the clock forward once every due task has been handled
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tick {
        A,
        B,
    }

    fn run(scheduler: &mut Scheduler<Tick>, dt: u64) -> Vec<(u64, Tick)> {
        let target = scheduler.now() + dt;
        let mut fired = Vec::new();
        while let Some((_, kind)) = scheduler.next_due(target) {
            fired.push((scheduler.now(), kind));
        }
        scheduler.settle(target);
        fired
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.after(250, Tick::A);
        assert!(run(&mut scheduler, 249).is_empty());
        assert_eq!(run(&mut scheduler, 1), vec![(250, Tick::A)]);
        assert!(run(&mut scheduler, 1000).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_bounded_repeat_and_tie_order() {
        let mut scheduler = Scheduler::new();
        scheduler.repeat(50, 4, Tick::A);
        scheduler.after(200, Tick::B);

        let fired = run(&mut scheduler, 1000);
        assert_eq!(
            fired,
            vec![(50, Tick::A), (100, Tick::A), (150, Tick::A), (200, Tick::A), (200, Tick::B)]
        );
        assert_eq!(scheduler.now(), 1000);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_stops_repeating_task() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.every(100, Tick::A);
        assert_eq!(run(&mut scheduler, 350).len(), 3);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(run(&mut scheduler, 1000).is_empty());
    }

    #[test]
    fn test_remaining_ms_and_cancel_all() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.after(2800, Tick::B);
        scheduler.every(100, Tick::A);
        run(&mut scheduler, 800);
        assert_eq!(scheduler.remaining_ms(handle), Some(2000));
        assert_eq!(scheduler.cancel_all(), 2);
        assert!(!scheduler.is_pending(handle));
    }
}
