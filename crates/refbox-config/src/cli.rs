//! Command-line argument parsing.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Referee listener command-line arguments.
///
/// CLI values override settings loaded from `refbox.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "refbox", about = "Referee box listener")]
pub struct CliArgs {
    /// Multicast group or unicast address to listen on.
    #[arg(long)]
    pub address: Option<Ipv4Addr>,

    /// UDP port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Local interface for the multicast membership.
    #[arg(long)]
    pub interface: Option<Ipv4Addr>,

    /// Delay between listener cycles in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(address) = args.address {
            self.network.address = address;
        }
        if let Some(port) = args.port {
            self.network.port = port;
        }
        if let Some(interface) = args.interface {
            self.network.interface = interface;
        }
        if let Some(ms) = args.poll_interval_ms {
            self.network.poll_interval_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
