/// Fire each volume action once through the platform backend
/// Run with: cargo run --example actuator_check -- [--live]
///
/// Without --live the actions are only logged.

use gesture_volume::models::gesture::VolumeAction;
use gesture_volume::platform::volume::create_actuator;
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let live = std::env::args().any(|arg| arg == "--live");

    println!("=== Volume Actuator Check ===\n");

    let actuator = create_actuator(!live);
    println!("Backend: {}", actuator.backend_name());
    println!();

    for action in [
        VolumeAction::VolumeUp,
        VolumeAction::VolumeDown,
        VolumeAction::Mute,
        VolumeAction::Mute,
    ] {
        println!("  -> {}", action.to_string());
        actuator.trigger(action);
        thread::sleep(Duration::from_millis(500));
    }

    println!("\n=== Check Complete ===");
}
