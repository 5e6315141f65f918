//! Kinema Core - Foundational types for the Kinema scene editor
//!
//! This crate provides the core types that all other Kinema crates depend on:
//! - `ObjectId` - Stable scene object identifiers
//! - `Transform`, `Vec3`, `Color` - Spatial and display types
//! - `PropertyPath` - The nine animatable transform axes
//! - Error types and Result alias

mod error;
mod id;
mod property;
mod types;

pub use error::{KinemaError, Result};
pub use id::ObjectId;
pub use property::{Axis, PropertyPath, TransformCategory};
pub use types::{Color, Transform, Vec3};
