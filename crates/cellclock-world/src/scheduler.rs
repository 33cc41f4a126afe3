//! Pending-event set of the discrete-event world.
//!
//! Events are totally ordered by `(time, owner)`. The world's own event uses
//! [`Owner::World`], which sorts before every life, so at equal times the
//! frame is published before any life evolves.

use cellclock_core::{LifeId, SimTime};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Who an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    World,
    Life(LifeId),
}

/// One pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pending {
    pub at: SimTime,
    pub owner: Owner,
}

/// Min-queue of pending events
#[derive(Debug, Default)]
pub struct Agenda {
    queue: BinaryHeap<Reverse<Pending>>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, owner: Owner, at: SimTime) {
        self.queue.push(Reverse(Pending { at, owner }));
    }

    /// Remove and return the earliest event (lowest `(time, owner)`)
    pub fn pop(&mut self) -> Option<Pending> {
        self.queue.pop().map(|Reverse(pending)| pending)
    }

    pub fn peek(&self) -> Option<&Pending> {
        self.queue.peek().map(|Reverse(pending)| pending)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
