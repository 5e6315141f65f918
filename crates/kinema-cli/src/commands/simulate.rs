//! Headless simulation

use super::{open_session, save_session};
use anyhow::{Context, Result};
use kinema_behavior::ObjectRuntimeState;
use kinema_runtime::{CommandOutcome, EditorCommand, EditorConfig};
use kinema_scene::SceneObject;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

pub struct SimulateArgs {
    pub scene: String,
    pub ticks: u32,
    pub speed: Option<f64>,
    pub script: Option<String>,
    pub playback: bool,
    pub behaviors: bool,
    pub save: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationSummary<'a> {
    ticks: u32,
    current_time: f64,
    is_playing: bool,
    track_writes: usize,
    behavior_writes: usize,
    commands_ignored: usize,
    objects: &'a [SceneObject],
    runtime: BTreeMap<&'a str, &'a ObjectRuntimeState>,
}

pub fn run(args: SimulateArgs, config: &EditorConfig) -> Result<()> {
    let (mut session, original) = open_session(&args.scene, config)?;

    let mut ignored = 0;
    if let Some(script_path) = &args.script {
        let content = std::fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read script {}", script_path))?;
        let commands: Vec<EditorCommand> =
            serde_json::from_str(&content).context("Failed to parse command script")?;
        let count = commands.len();
        for command in commands {
            if let CommandOutcome::Ignored = session.execute(command) {
                ignored += 1;
            }
        }
        info!(script = %script_path, commands = count, ignored, "applied command script");
    }

    if let Some(speed) = args.speed {
        if session.execute(EditorCommand::SetSpeed { speed }).is_ignored() {
            anyhow::bail!("Invalid speed: {}", speed);
        }
    }
    if args.playback {
        session.execute(EditorCommand::Play);
    }
    if args.behaviors {
        session.execute(EditorCommand::StartSimulation);
    }

    let mut track_writes = 0;
    let mut behavior_writes = 0;
    for _ in 0..args.ticks {
        let report = session.step();
        track_writes += report.track_writes;
        behavior_writes += report.behavior_writes;
    }

    info!(ticks = args.ticks, track_writes, behavior_writes, "simulation finished");

    let summary = SimulationSummary {
        ticks: args.ticks,
        current_time: session.clock().current_time,
        is_playing: session.clock().is_playing(),
        track_writes,
        behavior_writes,
        commands_ignored: ignored,
        objects: session.store().objects(),
        runtime: session
            .engine()
            .states()
            .iter()
            .map(|(id, state)| (id.as_str(), state))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(save_path) = &args.save {
        save_session(save_path, &session, &original)?;
    }
    Ok(())
}
