use anyhow::Context;
use clap::Parser;
use gesture_volume::core::replay;
use gesture_volume::{create_actuator, GestureConfig, SessionContext};
use std::path::PathBuf;

/// Replay a recorded landmark stream through the gesture volume engine
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON-lines recording of detector output
    recording: PathBuf,

    /// Settings file (defaults to ~/.gesture_volume/config/settings.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log actions instead of touching the system volume
    #[arg(long)]
    dry_run: bool,

    /// Print every frame outcome as a JSON line
    #[arg(long)]
    frames: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GestureConfig::load_from(path)
            .with_context(|| format!("Failed to load settings from {:?}", path))?,
        None => GestureConfig::load().context("Failed to load settings")?,
    };
    config.dry_run |= args.dry_run;

    let records = replay::load_records(&args.recording)
        .with_context(|| format!("Failed to read recording {:?}", args.recording))?;

    let actuator = create_actuator(config.dry_run);
    log::info!(
        "Replaying {} frames with the {} backend",
        records.len(),
        actuator.backend_name()
    );

    let mut session = SessionContext::new(config);
    let outcomes = replay::replay_records(&records, &mut session, actuator.as_ref());

    if args.frames {
        for outcome in &outcomes {
            println!("{}", serde_json::to_string(outcome)?);
        }
    }

    let fired: usize = outcomes.iter().map(|o| o.actions.len()).sum();
    log::info!("Replay finished: {} actions fired", fired);
    println!("{}", serde_json::to_string_pretty(&session.status())?);

    Ok(())
}
