//! EditorSession - owns the scene and runs the per-tick pipeline
//!
//! One tick:
//! 1. the playback clock advances
//! 2. tracks resolve at the new time and write unclaimed axes
//! 3. store events are drained: base poses rebase, deleted objects lose
//!    runtime state, tracks regenerate when objects came or went
//! 4. the behavior engine runs, if the simulation is started
//! 5. events are drained again

use crate::command::{CommandOutcome, EditorCommand};
use crate::config::EditorConfig;
use kinema_animation::{KeyframeEdit, PlaybackClock, TimelineScale, TrackSystem};
use kinema_behavior::BehaviorEngine;
use kinema_core::{ObjectId, Result, Vec3};
use kinema_scene::{
    apply_template, export_document, populate_store, store_to_document, ExportDocument,
    GameSettings, SceneDocument, SceneObject, SceneStore, DEFAULT_CAMERA,
};
use serde::Serialize;
use tracing::{debug, info};

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Timeline time the tracks were resolved at, if playing
    pub time: Option<f64>,
    pub track_writes: usize,
    pub behavior_writes: usize,
}

pub struct EditorSession {
    name: String,
    store: SceneStore,
    tracks: TrackSystem,
    engine: BehaviorEngine,
    clock: PlaybackClock,
    timeline: TimelineScale,
    settings: GameSettings,
    camera: Vec3,
    frame_delta: f64,
}

impl EditorSession {
    /// An empty scene configured from `config`
    pub fn new(name: impl Into<String>, config: &EditorConfig) -> Self {
        let mut clock = PlaybackClock::with_step_hz(config.simulation.step_hz);
        clock.set_duration(config.timeline.duration);
        clock.set_speed(config.timeline.speed);

        Self {
            name: name.into(),
            store: SceneStore::new(),
            tracks: TrackSystem::new(),
            engine: BehaviorEngine::with_seed(config.simulation.jitter_seed),
            clock,
            timeline: TimelineScale::new(config.timeline.base_pixel_width, config.timeline.zoom),
            settings: GameSettings::default(),
            camera: DEFAULT_CAMERA,
            frame_delta: config.simulation.frame_delta,
        }
    }

    /// A session holding the document's objects, settings and camera
    pub fn from_document(document: &SceneDocument, config: &EditorConfig) -> Result<Self> {
        let mut session = Self::new(document.name.clone(), config);
        populate_store(&mut session.store, document)?;
        session.settings = document.settings;
        session.camera = document.camera;
        session.sync();
        Ok(session)
    }

    pub fn to_document(&self) -> SceneDocument {
        store_to_document(&self.store, self.name.clone(), self.settings, self.camera)
    }

    /// Export snapshot; `isPlaying` is the simulation flag, not timeline playback
    pub fn export(&self) -> ExportDocument {
        export_document(
            &self.store,
            self.name.clone(),
            self.engine.is_running(),
            self.settings,
            self.camera,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn tracks(&self) -> &TrackSystem {
        &self.tracks
    }

    pub fn engine(&self) -> &BehaviorEngine {
        &self.engine
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn timeline(&self) -> &TimelineScale {
        &self.timeline
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    pub fn frame_delta(&self) -> f64 {
        self.frame_delta
    }

    /// Apply one editor command. Never fails; unresolvable commands are
    /// reported as ignored.
    pub fn execute(&mut self, command: EditorCommand) -> CommandOutcome {
        let outcome = self.dispatch(command);
        self.sync();
        outcome
    }

    fn dispatch(&mut self, command: EditorCommand) -> CommandOutcome {
        match command {
            EditorCommand::AddObject { kind, position, id } => {
                let id = id.unwrap_or_else(|| ObjectId::generate(kind.as_str()));
                self.add_object(SceneObject::new(id, kind, position))
            }
            EditorCommand::UpdateObject { id, property, value } => {
                CommandOutcome::from_applied(self.store.update_property(id.as_str(), &property, value))
            }
            EditorCommand::DeleteObject { id } => match self.store.delete(id.as_str()) {
                Some(_) => {
                    let removed = self.tracks.remove_tracks_for(id.as_str());
                    debug!(object = %id, tracks = removed, "deleted object");
                    CommandOutcome::Applied
                }
                None => CommandOutcome::Ignored,
            },
            EditorCommand::SelectObject { id } => {
                let before = self.store.selected_id().cloned();
                self.store.select(id.as_ref().map(ObjectId::as_str));
                CommandOutcome::from_applied(self.store.selected_id() != before.as_ref())
            }
            EditorCommand::DuplicateObject { id } => {
                let Some(original) = self.store.get(id.as_str()) else {
                    return CommandOutcome::Ignored;
                };
                let mut copy = original.clone();
                copy.id = ObjectId::generate(copy.kind.as_str());
                copy.transform.position.x += 1.0;
                self.add_object(copy)
            }
            EditorCommand::AddKeyframe { track, time } => {
                let time = time.unwrap_or(self.clock.current_time);
                match self.tracks.add_keyframe(&self.store, &track, time) {
                    Some(id) => CommandOutcome::KeyframeAdded { id },
                    None => CommandOutcome::Ignored,
                }
            }
            EditorCommand::DeleteKeyframe { track, keyframe } => {
                CommandOutcome::from_applied(self.tracks.delete_keyframe(&track, &keyframe))
            }
            EditorCommand::UpdateKeyframe {
                track,
                keyframe,
                easing,
                value,
            } => CommandOutcome::from_applied(self.tracks.update_keyframe(
                &track,
                &keyframe,
                KeyframeEdit { easing, value },
            )),
            EditorCommand::ToggleTrackVisible { track } => {
                CommandOutcome::from_applied(self.tracks.toggle_visible(&track))
            }
            EditorCommand::ToggleTrackLocked { track } => {
                CommandOutcome::from_applied(self.tracks.toggle_locked(&track))
            }
            EditorCommand::Play => {
                self.clock.play();
                info!(time = self.clock.current_time, "playback started");
                CommandOutcome::Applied
            }
            EditorCommand::Pause => {
                self.clock.pause();
                info!(time = self.clock.current_time, "playback paused");
                CommandOutcome::Applied
            }
            EditorCommand::TogglePlay => {
                self.clock.toggle();
                info!(playing = self.clock.is_playing(), "playback toggled");
                CommandOutcome::Applied
            }
            EditorCommand::Stop => {
                self.clock.stop();
                info!("playback stopped");
                CommandOutcome::Applied
            }
            EditorCommand::SeekStart => {
                self.clock.seek_start();
                CommandOutcome::Applied
            }
            EditorCommand::SeekEnd => {
                self.clock.seek_end();
                CommandOutcome::Applied
            }
            EditorCommand::SetSpeed { speed } => {
                CommandOutcome::from_applied(self.clock.set_speed(speed))
            }
            EditorCommand::SetDuration { duration } => {
                CommandOutcome::from_applied(self.clock.set_duration(duration))
            }
            EditorCommand::SetZoom { zoom } => {
                self.timeline.set_zoom(zoom);
                CommandOutcome::Applied
            }
            EditorCommand::ZoomIn => {
                self.timeline.zoom_in();
                CommandOutcome::Applied
            }
            EditorCommand::ZoomOut => {
                self.timeline.zoom_out();
                CommandOutcome::Applied
            }
            EditorCommand::StartSimulation => {
                self.engine.start();
                info!("simulation started");
                CommandOutcome::Applied
            }
            EditorCommand::StopSimulation => {
                self.engine.stop();
                info!("simulation stopped");
                CommandOutcome::Applied
            }
            EditorCommand::SetCamera { position } => {
                self.camera = position;
                CommandOutcome::Applied
            }
            EditorCommand::LoadTemplate { seed } => match apply_template(&mut self.store, &seed) {
                Ok(settings) => {
                    self.settings = settings;
                    CommandOutcome::Applied
                }
                Err(e) => {
                    debug!(error = %e, "template rejected");
                    CommandOutcome::Ignored
                }
            },
        }
    }

    fn add_object(&mut self, object: SceneObject) -> CommandOutcome {
        let id = object.id.clone();
        match self.store.add(object) {
            Ok(()) => CommandOutcome::Created { id },
            Err(e) => {
                debug!(error = %e, "add object rejected");
                CommandOutcome::Ignored
            }
        }
    }

    /// Run one tick with the configured frame delta
    pub fn step(&mut self) -> TickReport {
        self.tick(self.frame_delta)
    }

    /// Run one tick; `frame_delta` is the behavior time step in seconds
    pub fn tick(&mut self, frame_delta: f64) -> TickReport {
        let mut report = TickReport::default();

        let was_playing = self.clock.is_playing();
        report.time = self.clock.advance();
        if was_playing && !self.clock.is_playing() {
            info!(duration = self.clock.duration, "reached end of timeline, rewound");
        }

        if let Some(time) = report.time {
            let claimed = self.engine.claimed_paths(&self.store);
            report.track_writes = self.tracks.apply(&mut self.store, time, |id, path| {
                claimed.contains(&(id.clone(), path))
            });
        }
        self.sync();

        report.behavior_writes = self.engine.tick(&mut self.store, frame_delta);
        self.sync();

        report
    }

    /// Route pending store events to the engine and the track list
    fn sync(&mut self) {
        let events = self.store.drain_events();
        if events.is_empty() {
            return;
        }
        self.engine.observe(&self.store, &events);
        if events.iter().any(|e| e.changes_population()) {
            self.tracks.ensure_tracks_for_objects(self.store.objects());
        }
    }
}
