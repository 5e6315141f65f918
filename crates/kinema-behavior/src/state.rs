//! Ephemeral per-object simulation state

use kinema_core::{PropertyPath, Transform, Vec3};
use kinema_scene::SceneObject;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Peaceful,
}

/// Simulation variables for one object. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRuntimeState {
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Seconds of simulation this object has seen
    pub animation_time: f64,
    pub is_grounded: bool,
    pub health: f64,
    /// Bounded to [0, 100]
    pub energy: f64,
    pub mood: Mood,
    /// Authored pose that absolute behaviors offset from
    pub base: Transform,
}

pub const MAX_ENERGY: f64 = 100.0;

impl ObjectRuntimeState {
    /// Fresh state for an object, seeded from its physics block and current pose
    pub fn for_object(object: &SceneObject) -> Self {
        let physics = object.physics.unwrap_or_default();
        Self {
            velocity: physics.velocity,
            acceleration: physics.acceleration,
            animation_time: 0.0,
            is_grounded: false,
            health: 100.0,
            energy: MAX_ENERGY,
            mood: Mood::Neutral,
            base: object.transform,
        }
    }

    /// Move the base pose on one axis
    pub fn rebase(&mut self, path: PropertyPath, value: f64) {
        self.base.set(path, value);
    }

    pub fn add_energy(&mut self, amount: f64) {
        self.energy = (self.energy + amount).clamp(0.0, MAX_ENERGY);
    }
}
