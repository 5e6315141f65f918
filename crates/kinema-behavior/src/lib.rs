//! Kinema Behavior - procedural per-object animation
//!
//! Objects list behavior identifiers from a closed vocabulary. While the
//! engine runs, each tick advances every object's runtime clock and applies
//! its behaviors in list order. Rules live in a lookup table keyed by
//! [`Behavior`] and write through the scene store.

pub mod behavior;
pub mod engine;
pub mod jitter;
pub mod rules;
pub mod state;

pub use behavior::{lookup, Behavior, BehaviorEntry, BEHAVIORS};
pub use engine::BehaviorEngine;
pub use jitter::JitterRng;
pub use rules::{BehaviorContext, TransformPatch};
pub use state::{Mood, ObjectRuntimeState, MAX_ENERGY};
