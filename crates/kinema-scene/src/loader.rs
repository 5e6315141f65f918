//! Loading documents and template seeds into a store

use crate::format::{GameSettings, SceneDocument, TemplateSeed};
use crate::object::SceneObject;
use crate::store::SceneStore;
use kinema_core::{KinemaError, ObjectId, Result, Transform};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a scene document from a JSON file
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<SceneDocument> {
    let content = fs::read_to_string(path)?;
    load_document_string(&content)
}

/// Parse a scene document from a JSON string
pub fn load_document_string(content: &str) -> Result<SceneDocument> {
    let document: SceneDocument = serde_json::from_str(content)?;
    Ok(document)
}

/// Reject a listing that names the same id twice, before anything is replaced
fn ensure_unique_ids<'a>(ids: impl IntoIterator<Item = &'a ObjectId>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(KinemaError::DocumentError(format!(
                "object id '{id}' appears more than once"
            )));
        }
    }
    Ok(())
}

/// Replace the store's contents with the document's objects. On error the
/// store is left untouched.
pub fn populate_store(store: &mut SceneStore, document: &SceneDocument) -> Result<()> {
    ensure_unique_ids(document.objects.iter().map(|o| &o.id))?;
    store.clear();
    for object in &document.objects {
        store.add(object.clone())?;
    }
    info!(
        name = %document.name,
        objects = store.len(),
        "loaded scene document"
    );
    Ok(())
}

/// Parse a template seed from a JSON string
pub fn load_template_string(content: &str) -> Result<TemplateSeed> {
    let seed: TemplateSeed = serde_json::from_str(content)?;
    Ok(seed)
}

/// Load a template seed from a JSON file
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<TemplateSeed> {
    let content = fs::read_to_string(path)?;
    load_template_string(&content)
}

/// Replace the store's contents with a template's objects.
///
/// Seed objects get identity rotation and unit scale. Returns the seed's
/// simulation settings for the caller to adopt. A seed with repeated ids
/// is rejected without touching the store.
pub fn apply_template(store: &mut SceneStore, seed: &TemplateSeed) -> Result<GameSettings> {
    ensure_unique_ids(seed.objects.iter().map(|o| &o.id))?;
    store.clear();
    for seed_object in &seed.objects {
        let object = SceneObject {
            id: seed_object.id.clone(),
            kind: seed_object.kind,
            transform: Transform::from_position(seed_object.position),
            color: seed_object.color,
            behaviors: Vec::new(),
            physics: None,
        }
        .with_behaviors(seed_object.behaviors.iter().cloned());
        store.add(object)?;
    }
    info!(
        template = seed.name.as_deref().unwrap_or("unnamed"),
        objects = store.len(),
        "applied template"
    );
    Ok(seed.settings.game_settings())
}
