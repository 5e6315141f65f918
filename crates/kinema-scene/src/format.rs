//! Document format definitions

use crate::object::SceneObject;
use chrono::{DateTime, Utc};
use kinema_core::{Color, ObjectId, Vec3};
use serde::{Deserialize, Serialize};

/// Default camera position for new scenes
pub const DEFAULT_CAMERA: Vec3 = Vec3::new(10.0, 10.0, 10.0);

/// Scene-wide simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_true")]
    pub physics: bool,
}

fn default_gravity() -> f64 {
    -9.81
}

fn default_true() -> bool {
    true
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            physics: true,
        }
    }
}

/// Root structure of a saved scene document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDocument {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub settings: GameSettings,
    #[serde(default = "default_camera")]
    pub camera: Vec3,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_camera() -> Vec3 {
    DEFAULT_CAMERA
}

impl SceneDocument {
    /// Create an empty document stamped with the current time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            created: Utc::now(),
            objects: Vec::new(),
            settings: GameSettings::default(),
            camera: DEFAULT_CAMERA,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }
}

/// Metadata block of an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub name: String,
    pub version: String,
    pub platform: String,
    pub exported: DateTime<Utc>,
}

/// The object graph plus editor state, as embedded in an exported page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub objects: Vec<SceneObject>,
    pub is_playing: bool,
    pub selected_object: Option<ObjectId>,
    pub camera_position: Vec3,
    pub game_settings: GameSettings,
    pub metadata: ExportMetadata,
}

/// One object in a template seed. Seeds carry no rotation or scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: crate::object::ObjectKind,
    pub position: Vec3,
    #[serde(default)]
    pub behaviors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Settings block of a template seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_true")]
    pub physics: bool,
    /// Camera mode, e.g. `side-view` or `third-person`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    /// Control scheme, e.g. `keyboard` or `one-button`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<String>,
}

impl TemplateSettings {
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            gravity: self.gravity,
            physics: self.physics,
        }
    }
}

/// A starting scene produced by a template provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub objects: Vec<SeedObject>,
    pub settings: TemplateSettings,
}
