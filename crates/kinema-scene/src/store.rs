//! SceneStore - the single writer for scene objects
//!
//! Every mutation (editor edits, keyframe playback, behaviors) funnels through
//! the narrow command surface here. Each applied mutation is visible to the
//! next read immediately and is recorded as a [`StoreEvent`].

use crate::event::{EventBus, StoreEvent};
use crate::object::{ObjectKind, PhysicsBlock, SceneObject};
use kinema_core::{
    Color, KinemaError, ObjectId, PropertyPath, Result, TransformCategory, Vec3,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Who issued a write. Consumers use this to tell authored edits from
/// animation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Writer {
    Editor,
    Track,
    Behavior,
}

/// An addressable property of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PropertyName {
    /// One axis, e.g. `position.x`
    Axis(PropertyPath),
    /// A whole vector, e.g. `rotation`
    Vector(TransformCategory),
    Color,
    Behaviors,
    Kind,
    Physics,
}

impl FromStr for PropertyName {
    type Err = KinemaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "color" => Ok(Self::Color),
            "behaviors" => Ok(Self::Behaviors),
            "type" | "kind" => Ok(Self::Kind),
            "physics" => Ok(Self::Physics),
            _ if s.contains('.') => s.parse().map(Self::Axis),
            _ => s.parse().map(Self::Vector),
        }
    }
}

impl TryFrom<String> for PropertyName {
    type Error = KinemaError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PropertyName> for String {
    fn from(p: PropertyName) -> Self {
        p.to_string()
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Axis(path) => write!(f, "{path}"),
            Self::Vector(category) => f.write_str(category.as_str()),
            Self::Color => f.write_str("color"),
            Self::Behaviors => f.write_str("behaviors"),
            Self::Kind => f.write_str("type"),
            Self::Physics => f.write_str("physics"),
        }
    }
}

/// A value written to a property. Must match the property's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(f64),
    Vector(Vec3),
    Behaviors(Vec<String>),
    Color(Option<Color>),
    Kind(ObjectKind),
    Physics(PhysicsBlock),
}

/// Canonical registry of scene objects.
///
/// Objects keep insertion order (renderers and behaviors rely on an object's
/// index), with an id index for lookups.
#[derive(Debug, Default)]
pub struct SceneStore {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    selected: Option<ObjectId>,
    events: EventBus,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object. Fails if the id is already taken.
    pub fn add(&mut self, object: SceneObject) -> Result<()> {
        if self.index.contains_key(&object.id) {
            return Err(KinemaError::DuplicateObjectId(object.id.to_string()));
        }
        if let Some(n) = object.id.numeric_suffix() {
            ObjectId::ensure_counter_above(n);
        }

        let id = object.id.clone();
        self.index.insert(id.clone(), self.objects.len());
        self.objects.push(object);
        self.events.push(StoreEvent::Added { id });
        Ok(())
    }

    /// Apply an editor write. Unknown ids, malformed names and shape
    /// mismatches are ignored.
    pub fn update_property(&mut self, id: &str, property: &str, value: PropertyValue) -> bool {
        self.update_property_as(Writer::Editor, id, property, value)
    }

    /// Apply a write on behalf of `writer`, parsing the property name
    pub fn update_property_as(
        &mut self,
        writer: Writer,
        id: &str,
        property: &str,
        value: PropertyValue,
    ) -> bool {
        match property.parse::<PropertyName>() {
            Ok(name) => self.write(writer, id, name, value),
            Err(_) => {
                debug!(object = id, property, "ignoring update to malformed property");
                false
            }
        }
    }

    /// Write one transform axis
    pub fn set_axis(&mut self, writer: Writer, id: &str, path: PropertyPath, value: f64) -> bool {
        self.write(writer, id, PropertyName::Axis(path), PropertyValue::Scalar(value))
    }

    /// The single mutation path for existing objects
    pub fn write(
        &mut self,
        writer: Writer,
        id: &str,
        property: PropertyName,
        value: PropertyValue,
    ) -> bool {
        let Some(&idx) = self.index.get(id) else {
            debug!(object = id, %property, "ignoring update to missing object");
            return false;
        };
        let object = &mut self.objects[idx];

        match (property, value) {
            (PropertyName::Axis(path), PropertyValue::Scalar(v)) => object.transform.set(path, v),
            (PropertyName::Vector(category), PropertyValue::Vector(v)) => {
                *object.transform.vector_mut(category) = v
            }
            (PropertyName::Color, PropertyValue::Color(c)) => object.color = c,
            (PropertyName::Behaviors, PropertyValue::Behaviors(b)) => object.set_behaviors(b),
            (PropertyName::Kind, PropertyValue::Kind(k)) => object.kind = k,
            (PropertyName::Physics, PropertyValue::Physics(p)) => object.physics = Some(p),
            (property, value) => {
                debug!(object = id, %property, ?value, "ignoring update with mismatched value");
                return false;
            }
        }

        self.events.push(StoreEvent::Updated {
            id: object.id.clone(),
            property,
            writer,
        });
        true
    }

    /// Remove an object, clearing the selection if it pointed at it
    pub fn delete(&mut self, id: &str) -> Option<SceneObject> {
        let idx = self.index.remove(id)?;
        let removed = self.objects.remove(idx);
        for (i, obj) in self.objects.iter().enumerate().skip(idx) {
            self.index.insert(obj.id.clone(), i);
        }

        self.events.push(StoreEvent::Deleted {
            id: removed.id.clone(),
        });
        if self.selected.as_ref().map(ObjectId::as_str) == Some(id) {
            self.selected = None;
            self.events.push(StoreEvent::SelectionChanged { id: None });
        }
        Some(removed)
    }

    /// Remove every object
    pub fn clear(&mut self) {
        let ids: Vec<ObjectId> = self.objects.iter().map(|o| o.id.clone()).collect();
        for id in ids {
            self.delete(id.as_str());
        }
    }

    /// Select an object, or clear the selection with `None`.
    /// Selecting an id that does not exist leaves the selection unchanged.
    pub fn select(&mut self, id: Option<&str>) {
        let next = match id {
            Some(id) => match self.index.get_key_value(id) {
                Some((key, _)) => Some(key.clone()),
                None => {
                    debug!(object = id, "ignoring selection of missing object");
                    return;
                }
            },
            None => None,
        };
        if next != self.selected {
            self.selected = next.clone();
            self.events.push(StoreEvent::SelectionChanged { id: next });
        }
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected.as_ref().and_then(|id| self.get(id.as_str()))
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of the object in insertion order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All objects in insertion order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
