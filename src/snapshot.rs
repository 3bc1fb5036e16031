//! Read-only frame state and a bounded handoff queue.
//!
//! The tick loop publishes copies of drawable state; consumers (an
//! exporter, a renderer) drain them without touching live particles. The
//! queue is bounded and evicts the oldest frame on overflow, so a stalled
//! consumer costs stale frames rather than stalling the simulation.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::palette::Rgb;

/// Drawable state of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

/// Drawable state of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Tick counter at capture time.
    pub tick: u64,
    /// Simulated seconds at capture time.
    pub time: f64,
    pub particles: Vec<ParticleState>,
}

/// Bounded frame queue with a drop-oldest overflow policy.
///
/// Shared between threads behind an `Arc`; publishing never blocks.
pub struct SnapshotQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
    capacity: usize,
}

struct QueueState {
    frames: VecDeque<FrameSnapshot>,
    closed: bool,
    dropped: u64,
}

impl SnapshotQueue {
    /// Create a queue holding at most `capacity` frames (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                frames: VecDeque::with_capacity(capacity),
                closed: false,
                dropped: 0,
            }),
            ready: Condvar::new(),
            capacity,
        }
    }

    /// A panicked holder cannot corrupt the deque, so poisoning is
    /// recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Enqueue a frame, evicting the oldest if full. Returns false once
    /// the queue has been closed.
    pub fn publish(&self, frame: FrameSnapshot) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        if state.frames.len() == self.capacity {
            state.frames.pop_front();
            state.dropped += 1;
        }
        state.frames.push_back(frame);
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Dequeue the next frame, blocking until one arrives or the queue is
    /// closed and drained.
    pub fn next_frame(&self) -> Option<FrameSnapshot> {
        let mut state = self.lock();
        loop {
            if let Some(frame) = state.frames.pop_front() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = match self.ready.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
    }

    /// Dequeue the next frame without blocking.
    pub fn try_next_frame(&self) -> Option<FrameSnapshot> {
        self.lock().frames.pop_front()
    }

    /// Refuse further publishes and wake blocked consumers; already-queued
    /// frames remain drainable.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    /// Frames evicted by the overflow policy so far.
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    /// Frames currently buffered.
    pub fn len(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn frame(tick: u64) -> FrameSnapshot {
        FrameSnapshot {
            tick,
            time: tick as f64 * 0.01,
            particles: Vec::new(),
        }
    }

    #[test]
    fn test_frames_come_out_in_publish_order() {
        let queue = SnapshotQueue::new(8);
        for tick in 0..3 {
            assert!(queue.publish(frame(tick)));
        }
        assert_eq!(queue.len(), 3);
        for tick in 0..3 {
            assert_eq!(queue.try_next_frame().unwrap().tick, tick);
        }
        assert!(queue.try_next_frame().is_none());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let queue = SnapshotQueue::new(2);
        for tick in 0..5 {
            assert!(queue.publish(frame(tick)));
        }
        assert_eq!(queue.dropped(), 3);
        assert_eq!(queue.try_next_frame().unwrap().tick, 3);
        assert_eq!(queue.try_next_frame().unwrap().tick, 4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let queue = SnapshotQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        assert!(queue.publish(frame(1)));
        assert!(queue.publish(frame(2)));
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.try_next_frame().unwrap().tick, 2);
    }

    #[test]
    fn test_publish_after_close_is_refused() {
        let queue = SnapshotQueue::new(4);
        assert!(queue.publish(frame(1)));
        queue.close();
        assert!(!queue.publish(frame(2)));
        // The backlog survives the close.
        assert_eq!(queue.next_frame().unwrap().tick, 1);
        assert!(queue.next_frame().is_none());
    }

    #[test]
    fn test_blocking_consumer_receives_later_publish() {
        let queue = Arc::new(SnapshotQueue::new(4));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.next_frame())
        };
        thread::sleep(Duration::from_millis(20));
        assert!(queue.publish(frame(42)));
        let received = consumer.join().unwrap();
        assert_eq!(received.unwrap().tick, 42);
    }

    #[test]
    fn test_close_wakes_blocked_consumer() {
        let queue = Arc::new(SnapshotQueue::new(4));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.next_frame())
        };
        thread::sleep(Duration::from_millis(20));
        queue.close();
        assert!(consumer.join().unwrap().is_none());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snap = FrameSnapshot {
            tick: 7,
            time: 0.07,
            particles: vec![ParticleState {
                position: Vec2::new(1.0, -2.0),
                radius: 5.0,
                color: Rgb::new(10, 20, 30),
            }],
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
