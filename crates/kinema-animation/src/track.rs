//! Keyframe track data types

use crate::easing::Easing;
use kinema_core::{ObjectId, PropertyPath};
use serde::{Deserialize, Serialize};

/// Display colors assigned to tracks by object index
pub const TRACK_PALETTE: [&str; 5] = ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"];

/// An anchor value for one property axis at a point on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: String,
    /// Time in seconds from timeline start
    pub time: f64,
    pub value: f64,
    /// Curve used when approaching the next keyframe
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    /// Create a keyframe with a fresh `kf_<uuid>` id
    pub fn new(time: f64, value: f64, easing: Easing) -> Self {
        Self {
            id: format!("kf_{}", uuid::Uuid::new_v4()),
            time,
            value,
            easing,
        }
    }
}

/// The keyframe sequence for one (object, property axis) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTrack {
    pub id: String,
    /// Lookup key into the store; the track does not own the object
    pub object_id: ObjectId,
    pub property: PropertyPath,
    /// Sorted ascending by time; ties keep insertion order
    pub keyframes: Vec<Keyframe>,
    pub color: String,
    pub visible: bool,
    pub locked: bool,
}

impl AnimationTrack {
    pub fn new(object_id: ObjectId, property: PropertyPath, color: impl Into<String>) -> Self {
        Self {
            id: Self::track_id(&object_id, property),
            object_id,
            property,
            keyframes: Vec::new(),
            color: color.into(),
            visible: true,
            locked: false,
        }
    }

    /// Track id for an object and property, e.g. `cube_1_position.x`
    pub fn track_id(object_id: &ObjectId, property: PropertyPath) -> String {
        format!("{object_id}_{property}")
    }

    /// Insert after any keyframes with an equal or earlier time
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) {
        let idx = self
            .keyframes
            .partition_point(|kf| kf.time <= keyframe.time);
        self.keyframes.insert(idx, keyframe);
    }

    /// Remove a keyframe by id, returning it if it existed
    pub fn remove_keyframe(&mut self, keyframe_id: &str) -> Option<Keyframe> {
        let idx = self.keyframes.iter().position(|kf| kf.id == keyframe_id)?;
        Some(self.keyframes.remove(idx))
    }

    pub fn keyframe(&self, keyframe_id: &str) -> Option<&Keyframe> {
        self.keyframes.iter().find(|kf| kf.id == keyframe_id)
    }

    pub fn keyframe_mut(&mut self, keyframe_id: &str) -> Option<&mut Keyframe> {
        self.keyframes.iter_mut().find(|kf| kf.id == keyframe_id)
    }

    pub fn is_sorted(&self) -> bool {
        self.keyframes.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(id: &str, time: f64, value: f64) -> Keyframe {
        Keyframe {
            id: id.to_string(),
            time,
            value,
            easing: Easing::Linear,
        }
    }

    #[test]
    fn test_track_id_format() {
        let track = AnimationTrack::new("cube_1".into(), PropertyPath::ROTATION_Y, TRACK_PALETTE[0]);
        assert_eq!(track.id, "cube_1_rotation.y");
        assert!(track.visible);
        assert!(!track.locked);
    }

    #[test]
    fn test_insert_keeps_order_and_ties_stable() {
        let mut track = AnimationTrack::new("a".into(), PropertyPath::POSITION_X, TRACK_PALETTE[0]);
        track.insert_keyframe(kf("k3", 3.0, 0.0));
        track.insert_keyframe(kf("k1", 1.0, 0.0));
        track.insert_keyframe(kf("k2a", 2.0, 0.0));
        track.insert_keyframe(kf("k2b", 2.0, 0.0));
        track.insert_keyframe(kf("k0", 0.0, 0.0));

        let ids: Vec<&str> = track.keyframes.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["k0", "k1", "k2a", "k2b", "k3"]);
        assert!(track.is_sorted());
    }

    #[test]
    fn test_remove_keyframe() {
        let mut track = AnimationTrack::new("a".into(), PropertyPath::SCALE_Z, TRACK_PALETTE[1]);
        track.insert_keyframe(kf("k1", 1.0, 2.0));
        assert!(track.remove_keyframe("missing").is_none());
        assert_eq!(track.remove_keyframe("k1").unwrap().value, 2.0);
        assert!(track.keyframes.is_empty());
    }

    #[test]
    fn test_generated_keyframe_ids() {
        let a = Keyframe::new(0.0, 1.0, Easing::default());
        let b = Keyframe::new(0.0, 1.0, Easing::default());
        assert!(a.id.starts_with("kf_"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.easing, Easing::EaseInOut);
    }
}
