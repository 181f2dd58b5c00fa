//! The per-window event queue.
//!
//! Entries flow through an unbounded `crossbeam-channel`, so programmatic
//! injection may come from any thread through an [`EventSender`]. The
//! receiving side keeps a small front buffer: a blocking [`EventQueue::wait`]
//! that receives an entry parks it there instead of handing it out, which
//! keeps `pop` strictly FIFO.

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::event::QueuedEvent;
use crate::logging::targets;
use crate::value::Values;

/// A FIFO of `(event, values)` pairs.
pub struct EventQueue {
    sender: Sender<QueuedEvent>,
    receiver: Receiver<QueuedEvent>,
    front: VecDeque<QueuedEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            front: VecDeque::new(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, name: impl Into<String>, values: Values) {
        let event = QueuedEvent::new(name, values);
        tracing::trace!(target: targets::QUEUE, name = %event.name, "event queued");
        // The receiver lives in `self`, so the channel cannot be disconnected.
        let _ = self.sender.send(event);
    }

    /// Remove and return the oldest event, if any.
    pub fn pop(&mut self) -> Option<QueuedEvent> {
        if let Some(event) = self.front.pop_front() {
            return Some(event);
        }
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block for at most `timeout` until an event is available.
    ///
    /// Returns `true` if an event is ready to be popped. Does not remove
    /// anything from the queue.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        if !self.front.is_empty() || !self.receiver.is_empty() {
            return true;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.front.push_back(event);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Whether no event is pending.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.receiver.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.front.len() + self.receiver.len()
    }

    /// A cloneable handle that can enqueue events from other threads.
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueues events into a window's queue from any thread.
///
/// A read blocked on the queue wakes as soon as an event is sent.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<QueuedEvent>,
}

impl EventSender {
    /// Enqueue an event. Returns `false` if the window's queue is gone.
    pub fn send(&self, name: impl Into<String>, values: Values) -> bool {
        self.sender.send(QueuedEvent::new(name, values)).is_ok()
    }
}

impl std::fmt::Debug for EventSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSender")
            .field("pending", &self.sender.len())
            .finish()
    }
}
