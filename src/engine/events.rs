// Deferred event plumbing
//
// Producers hand events to an `EventSink` and move on. Consumption happens
// somewhere else, usually once per frame through an `EventDispatcher`.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Default number of events an `EventQueue` holds before dropping the oldest
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Anything that accepts fire-and-forget events
pub trait EventSink<E> {
    /// Hand off an event. Never blocks and reports nothing back.
    fn schedule(&mut self, event: E);
}

/// Bounded FIFO of pending events.
///
/// Cloning the queue clones the handle, not the contents, so the producer and
/// the consumer can each hold one.
#[derive(Debug)]
pub struct EventQueue<E> {
    events: Arc<Mutex<VecDeque<E>>>,
    capacity: usize,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a queue holding at most `capacity` events (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Push an event, dropping the oldest one if the queue is full
    pub fn push(&self, event: E) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() >= self.capacity {
                events.pop_front();
                log::warn!(
                    "Event queue full ({} events), dropped the oldest event",
                    self.capacity
                );
            }
            events.push_back(event);
        }
    }

    /// Take every pending event, oldest first
    pub fn drain(&self) -> Vec<E> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<E> Clone for EventQueue<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            capacity: self.capacity,
        }
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventSink<E> for EventQueue<E> {
    fn schedule(&mut self, event: E) {
        self.push(event);
    }
}

impl<E> EventSink<E> for Sender<E> {
    fn schedule(&mut self, event: E) {
        // A closed receiver means nobody is listening any more
        if self.send(event).is_err() {
            log::trace!("Event receiver disconnected, event discarded");
        }
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Hands queued events to registered handlers in registration order
pub struct EventDispatcher<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler called for every dispatched event
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&E) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Drain the queue and deliver every event. Returns how many were delivered.
    pub fn dispatch(&mut self, queue: &EventQueue<E>) -> usize {
        let events = queue.drain();
        for event in &events {
            for handler in &mut self.handlers {
                handler(event);
            }
        }
        events.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}
