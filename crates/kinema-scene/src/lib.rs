//! Kinema Scene - scene object store and document formats
//!
//! - `SceneStore` — the canonical object registry and its only write path
//! - `StoreEvent` — change records drained by the animation and behavior layers
//! - JSON documents, exports and template seeds

mod event;
mod format;
mod loader;
mod object;
mod saver;
mod store;

pub use event::{EventBus, StoreEvent};
pub use format::{
    ExportDocument, ExportMetadata, GameSettings, SceneDocument, SeedObject, TemplateSeed,
    TemplateSettings, DEFAULT_CAMERA,
};
pub use loader::{
    apply_template, load_document, load_document_string, load_template, load_template_string,
    populate_store,
};
pub use object::{ObjectKind, PhysicsBlock, SceneObject};
pub use saver::{
    export_document, export_html, export_to_file, save_document, save_document_string,
    store_to_document,
};
pub use store::{PropertyName, PropertyValue, SceneStore, Writer};
