// src/scheduler.rs
//
// Fixed-delay deferred callbacks.
//
// Visual transitions are sequenced with timers rather than transitionend
// events. A timer is only an id plus a delay as far as the platform is
// concerned; what the timer does lives in `DeferredQueue`, which is owned
// by the controller. Cancelling drops the task from the queue, and the
// platform timer later fires into nothing.

use std::collections::BTreeMap;

use crate::page::ImageId;

/// Identifies one scheduled deferred callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Work run when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Second half of opening: fade the modal in.
    ShowModal,
    /// Second half of closing: drop the active flag and unlock scrolling.
    HideModal,
    FadeInImage(ImageId),
}

/// Platform timer source.
///
/// Implementations call back into `GalleryController::fire` with the same id
/// once at least `delay_ms` has elapsed. They need not support cancellation.
pub trait Scheduler {
    fn schedule(&mut self, id: TimerId, delay_ms: u32);
}

/// Tasks waiting on a timer, keyed by timer id.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    next_id: u64,
    pending: BTreeMap<TimerId, Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` and start a platform timer for it.
    pub fn defer<S: Scheduler>(&mut self, scheduler: &mut S, task: Deferred, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, task);
        scheduler.schedule(id, delay_ms);
        id
    }

    /// Cancel every pending timer whose task equals `task`.
    /// Returns how many were cancelled.
    pub fn cancel_matching(&mut self, task: Deferred) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, pending| *pending != task);
        before - self.pending.len()
    }

    /// Remove and return the task for a fired timer.
    ///
    /// Returns None if the timer was cancelled or already fired.
    pub fn take(&mut self, id: TimerId) -> Option<Deferred> {
        self.pending.remove(&id)
    }

    #[cfg(test)]
    pub fn is_pending(&self, task: Deferred) -> bool {
        self.pending.values().any(|pending| *pending == task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// ===============================
/// Manually advanced clock
/// ===============================

/// Virtual-time scheduler for tests and the headless demo.
///
/// Time only moves when `GalleryController::advance` is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    /// (due time, insertion order, id)
    queue: Vec<(u64, u64, TimerId)>,
    seq: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, (due, _, _))| *due <= until_ms)
            .min_by_key(|(_, (due, seq, _))| (*due, *seq))
            .map(|(index, _)| index)?;

        let (due, _, id) = self.queue.remove(index);
        self.now_ms = self.now_ms.max(due);
        Some(id)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn scheduled(&self) -> usize {
        self.queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: TimerId, delay_ms: u32) {
        let due = self.now_ms + delay_ms as u64;
        self.queue.push((due, self.seq, id));
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let mut queue = DeferredQueue::new();

        let slow = queue.defer(&mut scheduler, Deferred::HideModal, 300);
        let fast = queue.defer(&mut scheduler, Deferred::ShowModal, 10);

        assert_eq!(scheduler.pop_due(5), None);
        assert_eq!(scheduler.pop_due(1000), Some(fast));
        assert_eq!(scheduler.now_ms(), 10);
        assert_eq!(scheduler.pop_due(1000), Some(slow));
        assert_eq!(scheduler.now_ms(), 300);
        assert_eq!(scheduler.pop_due(1000), None);
    }

    #[test]
    fn test_equal_deadlines_keep_scheduling_order() {
        let mut scheduler = ManualScheduler::new();
        let mut queue = DeferredQueue::new();

        let a = queue.defer(&mut scheduler, Deferred::FadeInImage(ImageId(0)), 100);
        let b = queue.defer(&mut scheduler, Deferred::FadeInImage(ImageId(1)), 100);

        assert_eq!(scheduler.pop_due(100), Some(a));
        assert_eq!(scheduler.pop_due(100), Some(b));
    }

    #[test]
    fn test_cancelled_task_is_not_taken() {
        let mut scheduler = ManualScheduler::new();
        let mut queue = DeferredQueue::new();

        let id = queue.defer(&mut scheduler, Deferred::HideModal, 300);
        assert!(queue.is_pending(Deferred::HideModal));
        assert_eq!(queue.cancel_matching(Deferred::HideModal), 1);

        // The platform timer still fires, but finds nothing to run.
        assert_eq!(scheduler.pop_due(300), Some(id));
        assert_eq!(queue.take(id), None);
        assert!(queue.is_empty());
    }
}
