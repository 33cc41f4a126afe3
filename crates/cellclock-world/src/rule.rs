//! Survival/birth rules a life applies to its neighborhood.

use crate::sensibility::Neighborhood;
use cellclock_core::RuleKind;
use std::fmt;
use std::sync::Arc;

/// Decides a cell's next state from its own state and what it sees around it
pub trait Rule: fmt::Debug + Send + Sync {
    fn next_state(&self, alive: bool, around: &Neighborhood) -> bool;
}

/// Conway's B3/S23
#[derive(Debug, Clone, Copy, Default)]
pub struct Conway;

impl Rule for Conway {
    fn next_state(&self, alive: bool, around: &Neighborhood) -> bool {
        matches!((alive, around.alive_count()), (true, 2) | (_, 3))
    }
}

/// Keeps every cell in the state it was born with
#[derive(Debug, Clone, Copy, Default)]
pub struct Immortal;

impl Rule for Immortal {
    fn next_state(&self, alive: bool, _around: &Neighborhood) -> bool {
        alive
    }
}

pub fn rule_for(kind: RuleKind) -> Arc<dyn Rule> {
    match kind {
        RuleKind::Conway => Arc::new(Conway),
        RuleKind::Immortal => Arc::new(Immortal),
    }
}
