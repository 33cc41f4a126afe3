//! Cellular world simulation.
//!
//! Two engines share the same occupant and visibility abstractions:
//! - [`World`]: a discrete-event scheduler where every life evolves at its own
//!   pace against a frozen snapshot, publishing a frame per world event.
//! - [`Planet`]: a synchronous grid that evolves every inhabitant once per call.

pub mod grid;
pub mod life;
pub mod rule;
pub mod cadence;
pub mod sensibility;
pub mod scheduler;
pub mod world;
pub mod planet;

pub use grid::Grid;
pub use life::{Life, LifeSnapshot, Living};
pub use rule::{rule_for, Conway, Immortal, Rule};
pub use cadence::{Cadence, Jittered, Steady};
pub use sensibility::{Neighborhood, Sensibility};
pub use world::{Frame, Frames, World, WorldBuilder};
pub use planet::{Inhabitant, Planet, Settler};
