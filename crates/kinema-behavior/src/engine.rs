//! BehaviorEngine - evaluates each object's behavior list every tick

use crate::behavior::lookup;
use crate::jitter::JitterRng;
use crate::rules::BehaviorContext;
use crate::state::ObjectRuntimeState;
use kinema_core::{Axis, ObjectId, PropertyPath};
use kinema_scene::{PropertyName, SceneStore, StoreEvent, Writer};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Owns per-object runtime state and applies behavior rules while running.
///
/// State is created the first time an object is ticked and dropped only
/// when the object is deleted, so stopping and restarting resumes it.
#[derive(Debug, Default)]
pub struct BehaviorEngine {
    running: bool,
    states: HashMap<ObjectId, ObjectRuntimeState>,
    rng: JitterRng,
}

impl BehaviorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose jitter behaviors draw from a fixed seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: JitterRng::new(seed),
            ..Self::default()
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self, id: &str) -> Option<&ObjectRuntimeState> {
        self.states.get(id)
    }

    pub fn states(&self) -> &HashMap<ObjectId, ObjectRuntimeState> {
        &self.states
    }

    /// React to store mutations: drop state of deleted objects and move base
    /// poses for non-behavior transform writes
    pub fn observe(&mut self, store: &SceneStore, events: &[StoreEvent]) {
        for event in events {
            match event {
                StoreEvent::Deleted { id } => {
                    if self.states.remove(id).is_some() {
                        debug!(object = %id, "dropped runtime state");
                    }
                }
                StoreEvent::Updated { id, property, writer } if *writer != Writer::Behavior => {
                    let (Some(state), Some(object)) =
                        (self.states.get_mut(id), store.get(id.as_str()))
                    else {
                        continue;
                    };
                    let paths: Vec<PropertyPath> = match property {
                        PropertyName::Axis(path) => vec![*path],
                        PropertyName::Vector(category) => Axis::ALL
                            .iter()
                            .map(|&axis| PropertyPath::new(*category, axis))
                            .collect(),
                        _ => continue,
                    };
                    for path in paths {
                        state.rebase(path, object.transform.get(path));
                    }
                }
                _ => {}
            }
        }
    }

    /// Every (object, axis) pair written by an active behavior. Empty while
    /// stopped.
    pub fn claimed_paths(&self, store: &SceneStore) -> HashSet<(ObjectId, PropertyPath)> {
        let mut claimed = HashSet::new();
        if !self.running {
            return claimed;
        }
        for object in store.objects() {
            for name in &object.behaviors {
                if let Some(entry) = lookup(name) {
                    for &path in entry.claims(object.kind) {
                        claimed.insert((object.id.clone(), path));
                    }
                }
            }
        }
        claimed
    }

    /// Advance every object by `delta` seconds and write behavior output
    /// through the store. Returns the number of axis writes applied.
    pub fn tick(&mut self, store: &mut SceneStore, delta: f64) -> usize {
        if !self.running {
            return 0;
        }

        let mut writes = 0;
        for index in 0..store.len() {
            let patch = {
                let objects = store.objects();
                let object = &objects[index];
                let state = self
                    .states
                    .entry(object.id.clone())
                    .or_insert_with(|| ObjectRuntimeState::for_object(object));
                state.animation_time += delta;

                let mut ctx =
                    BehaviorContext::new(object, index, delta, objects, state, &mut self.rng);
                for name in &object.behaviors {
                    let Some(entry) = lookup(name) else {
                        debug!(object = %object.id, behavior = %name, "ignoring unknown behavior");
                        continue;
                    };
                    if !entry.applies_to(object.kind) {
                        trace!(object = %object.id, behavior = entry.name, "behavior not applicable to kind");
                        continue;
                    }
                    (entry.rule)(&mut ctx);
                }
                (object.id.clone(), ctx.into_patch())
            };

            let (id, patch) = patch;
            for &(path, value) in patch.writes() {
                if store.set_axis(Writer::Behavior, id.as_str(), path, value) {
                    writes += 1;
                }
            }
        }
        writes
    }
}
