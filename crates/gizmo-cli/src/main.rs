// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gizmo headless runner (`gizmo`).
//!
//! Loads a board from a JSON scene, runs a number of fixed ticks and writes
//! one JSON snapshot line per reported tick to stdout. Logs go to stderr and
//! honour `RUST_LOG`.
//!
//! # Usage
//! ```text
//! gizmo board.json --ticks 600 --every 60 --raise left --realtime
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gizmo_physics::{BodyId, BodyRecord, FlipperSide, SimulationConfig, TickReport, World};
use serde::{Deserialize, Serialize};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a Gizmo board headless and print body snapshots")]
struct Args {
    /// Scene file: `{ "config": {..}?, "bodies": [BodyRecord, ..] }`
    scene: PathBuf,
    /// Simulation config (JSON); overrides the scene's own config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 60)]
    ticks: u64,
    /// Print a snapshot every N ticks
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
    /// Hold a flipper key for the whole run (repeatable)
    #[arg(long, value_enum)]
    raise: Vec<Side>,
    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Write the final board back out as a scene file
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Left,
    Right,
}

impl From<Side> for FlipperSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Scene {
    #[serde(default)]
    config: Option<SimulationConfig>,
    bodies: Vec<BodyRecord>,
}

#[derive(Debug, Serialize)]
struct BodySnapshot {
    id: BodyId,
    kind: String,
    x: f64,
    y: f64,
    angle: f64,
    vx: f64,
    vy: f64,
    omega: f64,
}

#[derive(Debug, Serialize)]
struct TickSnapshot {
    tick: u64,
    contacts: usize,
    removed: Vec<BodyId>,
    bodies: Vec<BodySnapshot>,
}

impl TickSnapshot {
    fn capture(world: &World, report: TickReport) -> Self {
        let bodies = world
            .bodies()
            .iter()
            .map(|(id, body)| {
                let center = body.world_center();
                let v = body.linear_velocity();
                BodySnapshot {
                    id,
                    kind: format!("{:?}", body.category()),
                    x: center.x,
                    y: center.y,
                    angle: body.transform().rotation(),
                    vx: v.x,
                    vy: v.y,
                    omega: body.angular_velocity(),
                }
            })
            .collect();
        Self { tick: report.tick, contacts: report.contacts, removed: report.removed, bodies }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn step(world: &mut World, every: u64) -> Result<()> {
    let report = world.tick().context("tick")?;
    if !report.removed.is_empty() {
        debug!(tick = report.tick, removed = ?report.removed, "bodies removed");
    }
    if report.tick.is_multiple_of(every) {
        let snapshot = TickSnapshot::capture(world, report);
        let mut out = io::stdout().lock();
        serde_json::to_writer(&mut out, &snapshot).context("write snapshot")?;
        writeln!(out).context("write snapshot")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let scene: Scene = read_json(&args.scene)?;
    let config = match &args.config {
        Some(path) => read_json(path)?,
        None => scene.config.unwrap_or_default(),
    };
    let mut world = World::from_records(config, &scene.bodies)
        .with_context(|| format!("build board from {}", args.scene.display()))?;
    for &side in &args.raise {
        world.flipper_up(side.into());
    }
    info!(bodies = world.bodies().len(), ticks = args.ticks, "board loaded");

    if args.realtime {
        let mut interval = time::interval(Duration::from_secs_f64(world.config().dt()));
        // An overrunning tick makes the run late; no catch-up burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        for _ in 0..args.ticks {
            interval.tick().await;
            step(&mut world, args.every)?;
        }
    } else {
        for _ in 0..args.ticks {
            step(&mut world, args.every)?;
        }
    }

    if let Some(path) = &args.out {
        let scene = Scene { config: Some(world.config().clone()), bodies: world.to_records() };
        let text = serde_json::to_string_pretty(&scene).context("encode scene")?;
        fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    }
    info!(ticks = world.tick_count(), bodies = world.bodies().len(), "run finished");
    Ok(())
}
