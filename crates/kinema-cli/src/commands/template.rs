//! Build a scene document from a template seed

use anyhow::{Context, Result};
use kinema_scene::{apply_template, load_template, save_document, SceneDocument, SceneStore};

pub fn run(seed_path: &str, output: &str, name: Option<&str>) -> Result<()> {
    let seed = load_template(seed_path)
        .with_context(|| format!("Failed to load template {}", seed_path))?;

    let mut store = SceneStore::new();
    let settings = apply_template(&mut store, &seed).context("Invalid template")?;

    let name = name
        .map(str::to_string)
        .or_else(|| seed.name.clone())
        .unwrap_or_else(|| "My Game".to_string());
    let mut document = SceneDocument::new(name);
    document.objects = store.objects().to_vec();
    document.settings = settings;

    save_document(output, &document).context("Failed to write scene")?;
    println!(
        "Created scene '{}' with {} objects at {}",
        document.name,
        document.objects.len(),
        output
    );
    Ok(())
}
