//! Create an empty scene document

use anyhow::{Context, Result};
use kinema_scene::{save_document, SceneDocument};
use std::path::Path;

pub fn run(path: &str, name: &str) -> Result<()> {
    if Path::new(path).exists() {
        anyhow::bail!("File already exists: {}", path);
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let document = SceneDocument::new(name);
    save_document(path, &document).context("Failed to write scene")?;

    println!("Created scene '{}' at {}", name, path);
    Ok(())
}
