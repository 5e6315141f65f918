//! CLI command implementations

pub mod export;
pub mod new;
pub mod object;
pub mod simulate;
pub mod template;

use anyhow::{Context, Result};
use kinema_runtime::{EditorConfig, EditorSession};
use kinema_scene::{load_document, save_document, SceneDocument};
use std::path::Path;

/// Load a document into a fresh session
pub(crate) fn open_session(path: &str, config: &EditorConfig) -> Result<(EditorSession, SceneDocument)> {
    if !Path::new(path).exists() {
        anyhow::bail!("Scene file not found: {}", path);
    }
    let document = load_document(path).with_context(|| format!("Failed to load scene {}", path))?;
    let session =
        EditorSession::from_document(&document, config).context("Failed to populate scene")?;
    Ok((session, document))
}

/// Write the session's scene back out, keeping the original creation time
pub(crate) fn save_session(path: &str, session: &EditorSession, original: &SceneDocument) -> Result<()> {
    let mut document = session.to_document();
    document.created = original.created;
    document.version = original.version.clone();
    save_document(path, &document).with_context(|| format!("Failed to save scene {}", path))
}
