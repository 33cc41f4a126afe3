//! A single grid occupant of the event-scheduled world.

use crate::cadence::Cadence;
use crate::rule::Rule;
use crate::sensibility::Sensibility;
use cellclock_core::{LifeId, Position};
use serde::Serialize;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Frozen state of a life as published in a world snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LifeSnapshot {
    pub id: LifeId,
    pub alive: bool,
}

/// Identity and liveness, shared by every kind of occupant
pub trait Living {
    fn id(&self) -> LifeId;

    fn is_alive(&self) -> bool;

    fn snapshot(&self) -> LifeSnapshot {
        LifeSnapshot {
            id: self.id(),
            alive: self.is_alive(),
        }
    }
}

/// A cell seated at a fixed position for the lifetime of its world
#[derive(Debug)]
pub struct Life {
    id: LifeId,
    alive: bool,
    sensibility: Sensibility,
    rule: Arc<dyn Rule>,
    cadence: Box<dyn Cadence>,
}

impl Life {
    pub fn new(
        id: LifeId,
        sensibility: Sensibility,
        alive: bool,
        rule: Arc<dyn Rule>,
        cadence: Box<dyn Cadence>,
    ) -> Self {
        Self {
            id,
            alive,
            sensibility,
            rule,
            cadence,
        }
    }

    pub fn position(&self) -> Position {
        self.sensibility.position()
    }

    /// Apply the rule to what the sensibility shows. Only `alive` changes.
    pub fn evolve(&mut self) {
        let around = self.sensibility.see_around();
        self.alive = self.rule.next_state(self.alive, &around);
    }

    /// Time units until this life wants to evolve again; may differ call to call.
    pub fn report_interval(&mut self) -> NonZeroU32 {
        self.cadence.next_interval()
    }

    pub fn take_snapshot(&self) -> LifeSnapshot {
        self.snapshot()
    }
}

impl Living for Life {
    fn id(&self) -> LifeId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::Steady;
    use crate::rule::{Conway, Immortal};
    use cellclock_core::Dimensions;

    fn lonely(alive: bool, rule: Arc<dyn Rule>) -> Life {
        let sense = Sensibility::blind(Position::new(0, 0), Dimensions::new(1, 1).unwrap()).unwrap();
        Life::new(
            LifeId(0),
            sense,
            alive,
            rule,
            Box::new(Steady(NonZeroU32::new(3).unwrap())),
        )
    }

    #[test]
    fn test_life_creation() {
        let life = lonely(true, Arc::new(Conway));
        assert_eq!(life.id(), LifeId(0));
        assert_eq!(life.position(), Position::new(0, 0));
        assert!(life.is_alive());
        assert_eq!(
            life.take_snapshot(),
            LifeSnapshot {
                id: LifeId(0),
                alive: true
            }
        );
    }

    #[test]
    fn test_lonely_life_dies_under_conway() {
        let mut life = lonely(true, Arc::new(Conway));
        let before = life.take_snapshot();
        life.evolve();
        assert!(!life.is_alive());
        // Snapshots are copies, not views.
        assert!(before.alive);
    }

    #[test]
    fn test_immortal_life_survives() {
        let mut life = lonely(true, Arc::new(Immortal));
        for _ in 0..5 {
            life.evolve();
        }
        assert!(life.is_alive());
    }

    #[test]
    fn test_report_interval() {
        let mut life = lonely(false, Arc::new(Conway));
        assert_eq!(life.report_interval().get(), 3);
    }
}
