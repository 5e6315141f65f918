//! Scene object definitions

use kinema_core::{Color, KinemaError, ObjectId, Transform, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an object is. Closed set; renderers pick geometry from this.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Terrain,
    Tree,
    Vehicle,
    Character,
    Powerup,
    Interactive,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 10] = [
        Self::Cube,
        Self::Sphere,
        Self::Cylinder,
        Self::Cone,
        Self::Terrain,
        Self::Tree,
        Self::Vehicle,
        Self::Character,
        Self::Powerup,
        Self::Interactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Terrain => "terrain",
            Self::Tree => "tree",
            Self::Vehicle => "vehicle",
            Self::Character => "character",
            Self::Powerup => "powerup",
            Self::Interactive => "interactive",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| KinemaError::ParseError(format!("unknown object kind '{s}'")))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional authored physics parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBlock {
    #[serde(default)]
    pub velocity: Vec3,
    #[serde(default)]
    pub acceleration: Vec3,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_friction")]
    pub friction: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_friction() -> f64 {
    0.5
}

impl Default for PhysicsBlock {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: default_mass(),
            friction: default_friction(),
        }
    }
}

/// An object in the scene.
///
/// `behaviors` is an ordered set: insertion order is evaluation order and
/// duplicates are dropped. Identifiers the behavior engine does not know
/// are kept (documents round-trip them) but never evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    #[serde(flatten)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default)]
    pub behaviors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsBlock>,
}

impl SceneObject {
    /// A new object with identity rotation/scale, white color and no behaviors
    pub fn new(id: impl Into<ObjectId>, kind: ObjectKind, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            transform: Transform::from_position(position),
            color: Some(Color::WHITE),
            behaviors: Vec::new(),
            physics: None,
        }
    }

    pub fn with_behaviors<I, S>(mut self, behaviors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_behaviors(behaviors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsBlock) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn has_behavior(&self, behavior: &str) -> bool {
        self.behaviors.iter().any(|b| b == behavior)
    }

    /// Replace the behavior list, dropping repeats but keeping first-seen order
    pub fn set_behaviors(&mut self, behaviors: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(behaviors.len());
        for b in behaviors {
            if !unique.contains(&b) {
                unique.push(b);
            }
        }
        self.behaviors = unique;
    }

    /// Add the behavior if absent, remove it if present
    pub fn toggle_behavior(&mut self, behavior: &str) {
        if self.has_behavior(behavior) {
            self.behaviors.retain(|b| b != behavior);
        } else {
            self.behaviors.push(behavior.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_defaults() {
        let obj = SceneObject::new("cube_1", ObjectKind::Cube, Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(obj.transform.position, Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(obj.transform.rotation, Vec3::ZERO);
        assert_eq!(obj.transform.scale, Vec3::ONE);
        assert!(obj.behaviors.is_empty());
        assert_eq!(obj.color, Some(Color::WHITE));
    }

    #[test]
    fn test_behaviors_are_an_ordered_set() {
        let mut obj = SceneObject::new("a", ObjectKind::Sphere, Vec3::ZERO)
            .with_behaviors(["rotate", "bounce", "rotate"]);
        assert_eq!(obj.behaviors, vec!["rotate", "bounce"]);

        obj.toggle_behavior("rotate");
        assert_eq!(obj.behaviors, vec!["bounce"]);
        obj.toggle_behavior("pulse");
        assert_eq!(obj.behaviors, vec!["bounce", "pulse"]);
    }

    #[test]
    fn test_object_json_shape() {
        let obj = SceneObject::new("enemy1", ObjectKind::Sphere, Vec3::new(5.0, 0.0, 0.0))
            .with_behaviors(["patrol", "attack"]);
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "sphere");
        assert_eq!(value["position"], serde_json::json!([5.0, 0.0, 0.0]));
        assert_eq!(value["scale"], serde_json::json!([1.0, 1.0, 1.0]));
        assert_eq!(value["color"], "#ffffff");
        assert!(value.get("physics").is_none());
    }

    #[test]
    fn test_object_parses_sparse_json() {
        let obj: SceneObject = serde_json::from_str(
            r##"{"id": "coin", "type": "sphere", "position": [8, 1, 0], "behaviors": ["rotate", "float"], "color": "#ffd700"}"##,
        )
        .unwrap();
        assert_eq!(obj.kind, ObjectKind::Sphere);
        assert_eq!(obj.transform.scale, Vec3::ONE);
        assert_eq!(obj.behaviors, vec!["rotate", "float"]);
        assert_eq!(obj.color.unwrap().to_string(), "#ffd700");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("vehicle".parse::<ObjectKind>().unwrap(), ObjectKind::Vehicle);
        assert!("dragon".parse::<ObjectKind>().is_err());
    }
}
