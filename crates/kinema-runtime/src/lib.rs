//! Kinema Runtime - the editor session
//!
//! Ties the scene store, animation tracks, behavior engine and playback
//! clock together behind a command surface, with layered TOML configuration.

pub mod command;
pub mod config;
pub mod session;

pub use command::{CommandOutcome, EditorCommand};
pub use config::{EditorConfig, LoggingConfig, SimulationConfig, TimelineConfig};
pub use session::{EditorSession, TickReport};
