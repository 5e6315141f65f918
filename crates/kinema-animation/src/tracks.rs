//! TrackSystem - owns every animation track and writes resolved values

use crate::easing::Easing;
use crate::sampler::resolve;
use crate::track::{AnimationTrack, Keyframe, TRACK_PALETTE};
use kinema_core::{ObjectId, PropertyPath};
use kinema_scene::{SceneObject, SceneStore, Writer};
use std::collections::HashMap;
use tracing::debug;

/// Changes to apply to an existing keyframe
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyframeEdit {
    pub easing: Option<Easing>,
    pub value: Option<f64>,
}

/// The track list: nine tracks per object, in object order then canonical
/// property order
#[derive(Debug, Default, Clone)]
pub struct TrackSystem {
    tracks: Vec<AnimationTrack>,
}

impl TrackSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate the track list for the given objects.
    ///
    /// Tracks of surviving objects keep their keyframes and flags; colors are
    /// recomputed from each object's index. Tracks of objects not in the list
    /// are dropped.
    pub fn ensure_tracks_for_objects(&mut self, objects: &[SceneObject]) {
        let mut previous: HashMap<String, AnimationTrack> = self
            .tracks
            .drain(..)
            .map(|track| (track.id.clone(), track))
            .collect();

        for (index, object) in objects.iter().enumerate() {
            let color = TRACK_PALETTE[index % TRACK_PALETTE.len()];
            for property in PropertyPath::ALL {
                let id = AnimationTrack::track_id(&object.id, property);
                let track = match previous.remove(&id) {
                    Some(mut existing) => {
                        existing.color = color.to_string();
                        existing
                    }
                    None => AnimationTrack::new(object.id.clone(), property, color),
                };
                self.tracks.push(track);
            }
        }

        debug!(
            tracks = self.tracks.len(),
            dropped = previous.len(),
            "regenerated animation tracks"
        );
    }

    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }

    pub fn track(&self, track_id: &str) -> Option<&AnimationTrack> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    fn track_mut(&mut self, track_id: &str) -> Option<&mut AnimationTrack> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub fn tracks_for<'a>(&'a self, object_id: &'a str) -> impl Iterator<Item = &'a AnimationTrack> {
        self.tracks
            .iter()
            .filter(move |t| t.object_id.as_str() == object_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Capture the current store value of the track's property as a new
    /// keyframe at `time`. Returns the keyframe id.
    ///
    /// No-op when the track or its object is missing or the track is locked.
    pub fn add_keyframe(&mut self, store: &SceneStore, track_id: &str, time: f64) -> Option<String> {
        let Some(track) = self.track_mut(track_id) else {
            debug!(track = track_id, "add keyframe: no such track");
            return None;
        };
        if track.locked {
            debug!(track = track_id, "add keyframe: track is locked");
            return None;
        }
        let Some(object) = store.get(track.object_id.as_str()) else {
            debug!(track = track_id, "add keyframe: object no longer exists");
            return None;
        };

        let value = object.transform.get(track.property);
        let keyframe = Keyframe::new(time.max(0.0), value, Easing::default());
        let id = keyframe.id.clone();
        track.insert_keyframe(keyframe);
        Some(id)
    }

    /// Remove a keyframe. No-op for missing ids or locked tracks.
    pub fn delete_keyframe(&mut self, track_id: &str, keyframe_id: &str) -> bool {
        match self.track_mut(track_id) {
            Some(track) if !track.locked => track.remove_keyframe(keyframe_id).is_some(),
            _ => {
                debug!(track = track_id, keyframe = keyframe_id, "delete keyframe ignored");
                false
            }
        }
    }

    /// Change a keyframe's easing and/or value. No-op for missing ids or
    /// locked tracks.
    pub fn update_keyframe(&mut self, track_id: &str, keyframe_id: &str, edit: KeyframeEdit) -> bool {
        let Some(track) = self.track_mut(track_id).filter(|t| !t.locked) else {
            debug!(track = track_id, keyframe = keyframe_id, "update keyframe ignored");
            return false;
        };
        let Some(keyframe) = track.keyframe_mut(keyframe_id) else {
            return false;
        };
        if let Some(easing) = edit.easing {
            keyframe.easing = easing;
        }
        if let Some(value) = edit.value {
            keyframe.value = value;
        }
        true
    }

    pub fn toggle_visible(&mut self, track_id: &str) -> bool {
        match self.track_mut(track_id) {
            Some(track) => {
                track.visible = !track.visible;
                true
            }
            None => false,
        }
    }

    pub fn toggle_locked(&mut self, track_id: &str) -> bool {
        match self.track_mut(track_id) {
            Some(track) => {
                track.locked = !track.locked;
                true
            }
            None => false,
        }
    }

    /// Drop every track that references `object_id`
    pub fn remove_tracks_for(&mut self, object_id: &str) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.object_id.as_str() != object_id);
        before - self.tracks.len()
    }

    /// Resolve every track at `time` and write the values into the store.
    ///
    /// Paths for which `is_claimed(object, property)` returns true are
    /// skipped. Returns the number of writes applied.
    pub fn apply<F>(&self, store: &mut SceneStore, time: f64, is_claimed: F) -> usize
    where
        F: Fn(&ObjectId, PropertyPath) -> bool,
    {
        let mut writes = 0;
        for track in &self.tracks {
            let Some(value) = resolve(track, time) else {
                continue;
            };
            if is_claimed(&track.object_id, track.property) {
                continue;
            }
            if store.set_axis(Writer::Track, track.object_id.as_str(), track.property, value) {
                writes += 1;
            }
        }
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::Vec3;
    use kinema_scene::{ObjectKind, StoreEvent};

    fn store_with(ids: &[&str]) -> SceneStore {
        let mut store = SceneStore::new();
        for (i, id) in ids.iter().enumerate() {
            store
                .add(SceneObject::new(*id, ObjectKind::Cube, Vec3::new(i as f64, 0.0, 0.0)))
                .unwrap();
        }
        store
    }

    fn system_for(store: &SceneStore) -> TrackSystem {
        let mut tracks = TrackSystem::new();
        tracks.ensure_tracks_for_objects(store.objects());
        tracks
    }

    #[test]
    fn test_nine_tracks_per_object() {
        let store = store_with(&["a", "b"]);
        let tracks = system_for(&store);

        assert_eq!(tracks.len(), 18);
        let props: Vec<PropertyPath> = tracks.tracks_for("b").map(|t| t.property).collect();
        assert_eq!(props, PropertyPath::ALL.to_vec());
        assert_eq!(tracks.tracks()[0].color, TRACK_PALETTE[0]);
        assert_eq!(tracks.tracks()[9].color, TRACK_PALETTE[1]);
    }

    #[test]
    fn test_palette_wraps_by_index() {
        let store = store_with(&["o0", "o1", "o2", "o3", "o4", "o5"]);
        let tracks = system_for(&store);
        let color = &tracks.track("o5_scale.x").unwrap().color;
        assert_eq!(color, TRACK_PALETTE[0]);
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let store = store_with(&["a", "b", "c"]);
        let mut tracks = system_for(&store);
        let first: Vec<String> = tracks.tracks().iter().map(|t| t.id.clone()).collect();

        tracks.ensure_tracks_for_objects(store.objects());
        let second: Vec<String> = tracks.tracks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(second.len(), 27);
    }

    #[test]
    fn test_regeneration_keeps_surviving_keyframes() {
        let mut store = store_with(&["a", "b"]);
        let mut tracks = system_for(&store);
        tracks.add_keyframe(&store, "b_position.x", 1.0).unwrap();
        tracks.toggle_locked("b_position.x");

        store.delete("a");
        tracks.ensure_tracks_for_objects(store.objects());

        let track = tracks.track("b_position.x").unwrap();
        assert_eq!(track.keyframes.len(), 1);
        assert!(track.locked);
        assert_eq!(track.color, TRACK_PALETTE[0]);
        assert!(tracks.track("a_position.x").is_none());
    }

    #[test]
    fn test_add_keyframe_captures_current_value() {
        let mut store = store_with(&["a"]);
        store.update_property("a", "rotation.y", kinema_scene::PropertyValue::Scalar(1.25));
        let mut tracks = system_for(&store);

        let id = tracks.add_keyframe(&store, "a_rotation.y", 2.0).unwrap();
        let kf = tracks.track("a_rotation.y").unwrap().keyframe(&id).unwrap();
        assert_eq!(kf.value, 1.25);
        assert_eq!(kf.time, 2.0);
        assert_eq!(kf.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_add_keyframe_noops() {
        let mut store = store_with(&["a"]);
        let mut tracks = system_for(&store);

        assert!(tracks.add_keyframe(&store, "nope_position.x", 0.0).is_none());

        tracks.toggle_locked("a_position.x");
        assert!(tracks.add_keyframe(&store, "a_position.x", 0.0).is_none());

        store.delete("a");
        assert!(tracks.add_keyframe(&store, "a_position.y", 0.0).is_none());
        assert!(tracks.tracks().iter().all(|t| t.keyframes.is_empty()));
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let store = store_with(&["a"]);
        let mut tracks = system_for(&store);
        let mut ids = Vec::new();
        for time in [5.0, 1.0, 3.0, 1.0, 0.0, 4.5, 2.0] {
            ids.push(tracks.add_keyframe(&store, "a_scale.y", time).unwrap());
        }
        assert!(tracks.track("a_scale.y").unwrap().is_sorted());

        for id in ids.iter().step_by(2) {
            assert!(tracks.delete_keyframe("a_scale.y", id));
            assert!(tracks.track("a_scale.y").unwrap().is_sorted());
        }
        assert!(!tracks.delete_keyframe("a_scale.y", &ids[0]));
        assert_eq!(tracks.track("a_scale.y").unwrap().keyframes.len(), 3);
    }

    #[test]
    fn test_update_keyframe() {
        let store = store_with(&["a"]);
        let mut tracks = system_for(&store);
        let id = tracks.add_keyframe(&store, "a_position.z", 1.0).unwrap();

        let edit = KeyframeEdit {
            easing: Some(Easing::Bounce),
            value: Some(7.0),
        };
        assert!(tracks.update_keyframe("a_position.z", &id, edit));
        let kf = tracks.track("a_position.z").unwrap().keyframe(&id).unwrap();
        assert_eq!((kf.easing, kf.value), (Easing::Bounce, 7.0));

        tracks.toggle_locked("a_position.z");
        assert!(!tracks.update_keyframe("a_position.z", &id, KeyframeEdit::default()));
        assert!(!tracks.delete_keyframe("a_position.z", &id));
    }

    #[test]
    fn test_remove_tracks_for_deleted_object() {
        let mut store = store_with(&["a", "b"]);
        let mut tracks = system_for(&store);
        tracks.add_keyframe(&store, "a_position.x", 0.0).unwrap();

        store.delete("a");
        assert_eq!(tracks.remove_tracks_for("a"), 9);
        assert!(tracks.tracks().iter().all(|t| t.object_id.as_str() != "a"));
        assert_eq!(tracks.len(), 9);
    }

    #[test]
    fn test_apply_writes_resolved_values() {
        let mut store = store_with(&["a"]);
        let mut tracks = system_for(&store);
        tracks.add_keyframe(&store, "a_position.y", 0.0).unwrap();
        store.update_property("a", "position.y", kinema_scene::PropertyValue::Scalar(10.0));
        let id = tracks.add_keyframe(&store, "a_position.y", 2.0).unwrap();
        let first = tracks.track("a_position.y").unwrap().keyframes[0].id.clone();
        tracks.update_keyframe(
            "a_position.y",
            &first,
            KeyframeEdit {
                easing: Some(Easing::Linear),
                value: None,
            },
        );
        let _ = store.drain_events();

        let writes = tracks.apply(&mut store, 1.0, |_, _| false);
        assert_eq!(writes, 1);
        assert_eq!(store.get("a").unwrap().transform.position.y, 5.0);
        assert_eq!(
            store.drain_events(),
            vec![StoreEvent::Updated {
                id: "a".into(),
                property: kinema_scene::PropertyName::Axis(PropertyPath::POSITION_Y),
                writer: Writer::Track,
            }]
        );
        assert!(tracks.track("a_position.y").unwrap().keyframe(&id).is_some());
    }

    #[test]
    fn test_apply_skips_claimed_paths() {
        let mut store = store_with(&["a"]);
        let mut tracks = system_for(&store);
        tracks.add_keyframe(&store, "a_position.y", 0.0).unwrap();
        tracks.add_keyframe(&store, "a_position.x", 0.0).unwrap();

        let writes = tracks.apply(&mut store, 0.5, |_, p| p == PropertyPath::POSITION_Y);
        assert_eq!(writes, 1);
    }
}
