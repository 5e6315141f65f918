//! Canonical transform property paths (`position.x` ... `scale.z`)

use crate::error::KinemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which transform vector a property belongs to
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformCategory {
    Position,
    Rotation,
    Scale,
}

impl TransformCategory {
    pub const ALL: [TransformCategory; 3] = [Self::Position, Self::Rotation, Self::Scale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        }
    }
}

impl FromStr for TransformCategory {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "position" => Ok(Self::Position),
            "rotation" => Ok(Self::Rotation),
            "scale" => Ok(Self::Scale),
            _ => Err(KinemaError::InvalidPropertyPath(s.to_string())),
        }
    }
}

/// One vector component
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Self::X, Self::Y, Self::Z];

    pub fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(KinemaError::InvalidPropertyPath(s.to_string())),
        }
    }
}

/// A single animatable scalar: one axis of position, rotation or scale.
///
/// Serialized and parsed in dotted form, e.g. `"rotation.y"`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath {
    pub category: TransformCategory,
    pub axis: Axis,
}

impl PropertyPath {
    /// All nine paths in canonical order: position xyz, rotation xyz, scale xyz
    pub const ALL: [PropertyPath; 9] = [
        Self::new(TransformCategory::Position, Axis::X),
        Self::new(TransformCategory::Position, Axis::Y),
        Self::new(TransformCategory::Position, Axis::Z),
        Self::new(TransformCategory::Rotation, Axis::X),
        Self::new(TransformCategory::Rotation, Axis::Y),
        Self::new(TransformCategory::Rotation, Axis::Z),
        Self::new(TransformCategory::Scale, Axis::X),
        Self::new(TransformCategory::Scale, Axis::Y),
        Self::new(TransformCategory::Scale, Axis::Z),
    ];

    pub const POSITION_X: Self = Self::new(TransformCategory::Position, Axis::X);
    pub const POSITION_Y: Self = Self::new(TransformCategory::Position, Axis::Y);
    pub const POSITION_Z: Self = Self::new(TransformCategory::Position, Axis::Z);
    pub const ROTATION_X: Self = Self::new(TransformCategory::Rotation, Axis::X);
    pub const ROTATION_Y: Self = Self::new(TransformCategory::Rotation, Axis::Y);
    pub const ROTATION_Z: Self = Self::new(TransformCategory::Rotation, Axis::Z);
    pub const SCALE_X: Self = Self::new(TransformCategory::Scale, Axis::X);
    pub const SCALE_Y: Self = Self::new(TransformCategory::Scale, Axis::Y);
    pub const SCALE_Z: Self = Self::new(TransformCategory::Scale, Axis::Z);

    pub const fn new(category: TransformCategory, axis: Axis) -> Self {
        Self { category, axis }
    }
}

impl FromStr for PropertyPath {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, axis) = s
            .split_once('.')
            .ok_or_else(|| KinemaError::InvalidPropertyPath(s.to_string()))?;
        let category = category
            .parse()
            .map_err(|_| KinemaError::InvalidPropertyPath(s.to_string()))?;
        let axis = axis
            .parse()
            .map_err(|_| KinemaError::InvalidPropertyPath(s.to_string()))?;
        Ok(Self { category, axis })
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = KinemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PropertyPath> for String {
    fn from(p: PropertyPath) -> Self {
        p.to_string()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category.as_str(), self.axis.as_str())
    }
}
