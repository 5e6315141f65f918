//! Object management commands

use super::{open_session, save_session};
use anyhow::{Context, Result};
use clap::Subcommand;
use kinema_core::{Color, Vec3};
use kinema_runtime::{CommandOutcome, EditorCommand, EditorConfig};
use kinema_scene::{ObjectKind, PropertyValue};

#[derive(Subcommand)]
pub enum ObjectCommands {
    /// Add an object to a scene
    Add {
        /// Path to scene document
        scene: String,

        /// Object kind (cube, sphere, tree, vehicle, character, ...)
        #[arg(long)]
        kind: ObjectKind,

        /// Position (comma-separated x,y,z)
        #[arg(long, value_parser = crate::parse_vec3, default_value = "0,0,0")]
        position: Vec3,

        /// Explicit object id
        #[arg(long)]
        id: Option<String>,

        /// Comma-separated behavior identifiers
        #[arg(long, value_delimiter = ',')]
        behaviors: Vec<String>,

        /// Display color (#rrggbb)
        #[arg(long)]
        color: Option<Color>,
    },

    /// List the objects in a scene
    List {
        /// Path to scene document
        scene: String,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete an object
    Delete {
        /// Path to scene document
        scene: String,

        /// Object id
        id: String,
    },

    /// Set one property of an object
    Set {
        /// Path to scene document
        scene: String,

        /// Object id
        id: String,

        /// Property name (e.g. position.x, rotation, behaviors, color)
        property: String,

        /// Value as JSON (e.g. 1.5, [0, 1, 0], ["rotate"], "#ff0000")
        value: String,
    },
}

pub fn run(cmd: ObjectCommands, config: &EditorConfig) -> Result<()> {
    match cmd {
        ObjectCommands::Add {
            scene,
            kind,
            position,
            id,
            behaviors,
            color,
        } => add(&scene, kind, position, id, behaviors, color, config),
        ObjectCommands::List { scene, format } => list(&scene, &format, config),
        ObjectCommands::Delete { scene, id } => delete(&scene, &id, config),
        ObjectCommands::Set {
            scene,
            id,
            property,
            value,
        } => set(&scene, &id, &property, &value, config),
    }
}

fn add(
    scene_path: &str,
    kind: ObjectKind,
    position: Vec3,
    id: Option<String>,
    behaviors: Vec<String>,
    color: Option<Color>,
    config: &EditorConfig,
) -> Result<()> {
    let (mut session, original) = open_session(scene_path, config)?;

    let outcome = session.execute(EditorCommand::AddObject {
        kind,
        position,
        id: id.map(Into::into),
    });
    let CommandOutcome::Created { id } = outcome else {
        anyhow::bail!("Object could not be added (duplicate id?)");
    };

    if !behaviors.is_empty() {
        session.execute(EditorCommand::UpdateObject {
            id: id.clone(),
            property: "behaviors".to_string(),
            value: PropertyValue::Behaviors(behaviors),
        });
    }
    if color.is_some() {
        session.execute(EditorCommand::UpdateObject {
            id: id.clone(),
            property: "color".to_string(),
            value: PropertyValue::Color(color),
        });
    }

    save_session(scene_path, &session, &original)?;
    println!("Added {} '{}'", kind, id);
    Ok(())
}

fn list(scene_path: &str, format: &str, config: &EditorConfig) -> Result<()> {
    let (session, _) = open_session(scene_path, config)?;
    let objects = session.store().objects();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(objects)?),
        "text" => {
            for object in objects {
                let p = object.transform.position;
                println!(
                    "{:<16} {:<12} [{:.2}, {:.2}, {:.2}]  {}",
                    object.id,
                    object.kind,
                    p.x,
                    p.y,
                    p.z,
                    object.behaviors.join(", ")
                );
            }
            println!("{} objects", objects.len());
        }
        other => anyhow::bail!("Unknown format: {}", other),
    }
    Ok(())
}

fn delete(scene_path: &str, id: &str, config: &EditorConfig) -> Result<()> {
    let (mut session, original) = open_session(scene_path, config)?;
    let outcome = session.execute(EditorCommand::DeleteObject { id: id.into() });
    if outcome.is_ignored() {
        anyhow::bail!("Object '{}' not found", id);
    }
    save_session(scene_path, &session, &original)?;
    println!("Deleted '{}'", id);
    Ok(())
}

fn set(scene_path: &str, id: &str, property: &str, value: &str, config: &EditorConfig) -> Result<()> {
    let (mut session, original) = open_session(scene_path, config)?;
    if !session.store().contains(id) {
        anyhow::bail!("Object '{}' not found", id);
    }

    let value: PropertyValue =
        serde_json::from_str(value).with_context(|| format!("Invalid value: {}", value))?;
    let outcome = session.execute(EditorCommand::UpdateObject {
        id: id.into(),
        property: property.to_string(),
        value,
    });
    if outcome.is_ignored() {
        anyhow::bail!("Property '{}' does not accept that value", property);
    }

    save_session(scene_path, &session, &original)?;
    println!("Set {}.{}", id, property);
    Ok(())
}
