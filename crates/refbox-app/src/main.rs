//! Referee box listener binary.
//!
//! Loads configuration, binds the referee socket, and drives a match state
//! from the referee broadcast until the process is terminated.

mod platform;

use std::net::UdpSocket;

use clap::Parser;
use refbox_config::{CliArgs, Config};
use refbox_match::MatchState;
use refbox_net::{RefboxListener, SocketConfig, create_socket};
use refbox_protocol::Side;
use tracing::{error, info, warn};

use platform::PlatformDirs;

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_all() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    let (mut config, load_error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    refbox_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = load_error {
        warn!(error = %e, "using default configuration");
    }

    let network = &config.network;
    info!(
        address = %network.address,
        port = network.port,
        interface = %network.interface,
        config_dir = %dirs.config_dir.display(),
        "starting referee listener"
    );

    let socket_config = SocketConfig {
        address: network.address,
        port: network.port,
        interface: network.interface,
        ..SocketConfig::default()
    };
    let mut listener = match create_socket(&socket_config) {
        Ok(socket) => RefboxListener::new(socket),
        Err(e) => {
            error!(error = %e, "could not open referee socket");
            RefboxListener::<UdpSocket>::detached()
        }
    };

    let mut state = MatchState::new();
    listener.run(&mut state, network.poll_interval(), |packet, state| {
        let snapshot = state.snapshot();
        info!(
            command = ?snapshot.refbox_command,
            play_state = ?snapshot.play_state,
            game_time = ?snapshot.game_time,
            score_a = snapshot.score_a,
            score_b = snapshot.score_b,
            match_elapsed_ms = snapshot.match_elapsed_ms,
            refbox_goals_a = packet.goals(Side::A),
            refbox_goals_b = packet.goals(Side::B),
            time_remaining = packet.time_remaining,
            "match state"
        );
    });
}
