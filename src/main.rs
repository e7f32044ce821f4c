//! padwatch - watch a gamepad and print its edge-triggered events
//!
//! Polls the first matching gilrs gamepad once per frame and logs (or prints
//! as JSON lines) every button and axis event the tracker emits.

use anyhow::Result;
use clap::Parser;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padwatch::config::{load_config, AppConfig};
use padwatch::input::gamepad::buttons::{axis_name, button_name};
use padwatch::input::gamepad::{FrameQueue, GilrsProvider};
use padwatch::{Event, GamepadEvent, GamepadEventKind, GamepadPlugin, ListenOptions};

/// Watch a gamepad and report button/axis events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Print events as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// List connected gamepads and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if !config.gamepad.enabled {
        info!("Gamepad input disabled in configuration");
        return Ok(());
    }

    let frames = Rc::new(FrameQueue::new());
    let mut provider = GilrsProvider::new(&config.gamepad, frames.clone())?;

    if args.list {
        list_gamepads(&provider);
        return Ok(());
    }

    let mut plugin = GamepadPlugin::create(frames, config.gamepad.tracker_config());
    for kind in GamepadEventKind::ALL {
        let json = args.json;
        plugin.on(kind, move |event| report(event, json), ListenOptions::default());
    }
    plugin.init(&provider)?;

    info!("Watching gamepad events (dead zone {})", config.gamepad.dead_zone);
    provider.run(&plugin, args.frames);

    plugin.destroy();
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

fn list_gamepads(provider: &GilrsProvider) {
    let gamepads = provider.gamepads();
    if gamepads.is_empty() {
        println!("No gamepads detected");
        return;
    }
    println!("Found {} gamepad(s):", gamepads.len());
    for (id, name) in gamepads {
        println!("  {}: \"{}\"", id, name);
    }
}

fn report(event: &GamepadEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to serialize event {:?}: {}", event, e),
        }
        return;
    }

    let kind = event.kind();
    let label = if kind.is_button() {
        button_name(event.idx())
    } else {
        axis_name(event.idx())
    }
    .unwrap_or("?");

    match event.value() {
        Some(value) => info!("{} {} [{}] = {:.3}", kind, event.idx(), label, value),
        None => info!("{} {} [{}]", kind, event.idx(), label),
    }
}
