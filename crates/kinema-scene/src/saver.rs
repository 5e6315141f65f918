//! Saving documents and building exports

use crate::format::{ExportDocument, ExportMetadata, GameSettings, SceneDocument};
use crate::store::SceneStore;
use chrono::Utc;
use kinema_core::{Result, Vec3};
use std::fs;
use std::path::Path;

/// Convert the store's objects into a document
pub fn store_to_document(
    store: &SceneStore,
    name: impl Into<String>,
    settings: GameSettings,
    camera: Vec3,
) -> SceneDocument {
    let mut document = SceneDocument::new(name);
    document.objects = store.objects().to_vec();
    document.settings = settings;
    document.camera = camera;
    document
}

/// Serialize a document to pretty-printed JSON
pub fn save_document_string(document: &SceneDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Save a document to a JSON file
pub fn save_document<P: AsRef<Path>>(path: P, document: &SceneDocument) -> Result<()> {
    let content = save_document_string(document)?;
    fs::write(path, content)?;
    Ok(())
}

/// Snapshot the store and editor state into an export
pub fn export_document(
    store: &SceneStore,
    name: impl Into<String>,
    is_playing: bool,
    settings: GameSettings,
    camera: Vec3,
) -> ExportDocument {
    ExportDocument {
        objects: store.objects().to_vec(),
        is_playing,
        selected_object: store.selected_id().cloned(),
        camera_position: camera,
        game_settings: settings,
        metadata: ExportMetadata {
            name: name.into(),
            version: "1.0.0".to_string(),
            platform: "web".to_string(),
            exported: Utc::now(),
        },
    }
}

/// Render an export as a self-contained HTML page.
///
/// The document JSON sits in a `<script type="application/json">` block;
/// `<`, `>` and `&` are escaped so object data cannot close the tag.
pub fn export_html(export: &ExportDocument) -> Result<String> {
    let json = serde_json::to_string(export)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");
    let title = html_escape(&export.metadata.name);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ margin: 0; padding: 0; background: #000; overflow: hidden; }}
        canvas {{ display: block; }}
    </style>
</head>
<body>
    <script id="gameData" type="application/json">{json}</script>
    <script>
        const game = JSON.parse(document.getElementById('gameData').textContent);
        console.log('Game loaded:', game);
    </script>
</body>
</html>
"#
    ))
}

/// Write an export page to disk
pub fn export_to_file<P: AsRef<Path>>(path: P, export: &ExportDocument) -> Result<()> {
    fs::write(path, export_html(export)?)?;
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
