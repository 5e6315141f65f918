//! The editor's external command surface

use kinema_animation::Easing;
use kinema_core::{ObjectId, Vec3};
use kinema_scene::{ObjectKind, PropertyValue, TemplateSeed};
use serde::{Deserialize, Serialize};

/// A request from an editing surface. Commands addressing missing objects,
/// tracks or keyframes are no-ops.
///
/// Serialized with a `command` tag so scripts can be written as JSON, e.g.
/// `{"command": "add_object", "kind": "cube", "position": [0, 1, 0]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    AddObject {
        kind: ObjectKind,
        #[serde(default)]
        position: Vec3,
        /// Explicit id; generated as `<kind>_<n>` when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<ObjectId>,
    },
    UpdateObject {
        id: ObjectId,
        property: String,
        value: PropertyValue,
    },
    DeleteObject {
        id: ObjectId,
    },
    SelectObject {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    DuplicateObject {
        id: ObjectId,
    },
    AddKeyframe {
        track: String,
        /// Timeline time; the current playback time when absent
        #[serde(default)]
        time: Option<f64>,
    },
    DeleteKeyframe {
        track: String,
        keyframe: String,
    },
    UpdateKeyframe {
        track: String,
        keyframe: String,
        #[serde(default)]
        easing: Option<Easing>,
        #[serde(default)]
        value: Option<f64>,
    },
    ToggleTrackVisible {
        track: String,
    },
    ToggleTrackLocked {
        track: String,
    },
    Play,
    Pause,
    TogglePlay,
    Stop,
    SeekStart,
    SeekEnd,
    SetSpeed {
        speed: f64,
    },
    SetDuration {
        duration: f64,
    },
    SetZoom {
        zoom: f64,
    },
    ZoomIn,
    ZoomOut,
    StartSimulation,
    StopSimulation,
    SetCamera {
        position: Vec3,
    },
    LoadTemplate {
        seed: TemplateSeed,
    },
}

/// What a command changed, for callers that surface results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command changed state
    Applied,
    /// An object was created
    Created { id: ObjectId },
    /// A keyframe was created
    KeyframeAdded { id: String },
    /// The command was absorbed without effect
    Ignored,
}

impl CommandOutcome {
    pub fn from_applied(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
