//! Export a scene to HTML

use super::open_session;
use anyhow::{Context, Result};
use kinema_runtime::EditorConfig;
use kinema_scene::export_to_file;

pub fn run(scene_path: &str, output: &str, config: &EditorConfig) -> Result<()> {
    let (session, _) = open_session(scene_path, config)?;
    let export = session.export();
    export_to_file(output, &export).context("Failed to write export")?;

    println!(
        "Exported '{}' ({} objects) to {}",
        export.metadata.name,
        export.objects.len(),
        output
    );
    Ok(())
}
