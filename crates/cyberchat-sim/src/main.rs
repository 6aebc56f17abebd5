//! CyberChat entry gate simulator.
//!
//! Runs the entry screen against a simulated radio and permission host so the
//! gating flow can be exercised from a terminal. The screen takes over the
//! terminal, so logs go to a file.
//!
//! # Usage
//!
//! ```bash
//! # Modern platform, adapter off, nothing granted
//! cyberchat-sim
//!
//! # Legacy platform with the adapter already on
//! cyberchat-sim --api-level 28 --powered --grant-all
//!
//! # Device without radio hardware
//! cyberchat-sim --no-hardware
//! ```

mod screen;
mod terminal;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use cyberchat_gate::{GateConfig, Permission, Runtime, SimHost};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::terminal::Console;

/// CyberChat entry gate simulator
#[derive(Parser, Debug)]
#[command(name = "cyberchat-sim")]
#[command(about = "Simulated CyberChat entry screen")]
#[command(version)]
struct Args {
    /// Platform API level
    #[arg(long, default_value_t = 34)]
    api_level: u32,

    /// Simulate a device without radio hardware
    #[arg(long)]
    no_hardware: bool,

    /// Start with the adapter powered on
    #[arg(long)]
    powered: bool,

    /// Start with every permission granted
    #[arg(long)]
    grant_all: bool,

    /// Permission the user refuses when asked (e.g. BLUETOOTH_SCAN); repeatable
    #[arg(long, value_parser = parse_permission)]
    refuse: Vec<Permission>,

    /// Adapter stays off even after the enable dialog is accepted
    #[arg(long)]
    stuck_adapter: bool,

    /// Lowest API level with runtime permissions
    #[arg(long, default_value_t = GateConfig::default().runtime_permissions_level)]
    runtime_permissions_level: u32,

    /// Lowest API level requiring connect/scan permissions
    #[arg(long, default_value_t = GateConfig::default().modern_permissions_level)]
    modern_permissions_level: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// File the logs are written to
    #[arg(long, default_value = "cyberchat-sim.log")]
    log_file: PathBuf,
}

fn parse_permission(s: &str) -> Result<Permission, String> {
    let name = s.trim().to_ascii_uppercase();
    let name = name.trim_start_matches("ANDROID.PERMISSION.");
    Ok(match name {
        "BLUETOOTH" => Permission::Bluetooth,
        "BLUETOOTH_ADMIN" => Permission::BluetoothAdmin,
        "BLUETOOTH_CONNECT" => Permission::BluetoothConnect,
        "BLUETOOTH_SCAN" => Permission::BluetoothScan,
        "ACCESS_COARSE_LOCATION" => Permission::AccessCoarseLocation,
        "ACCESS_FINE_LOCATION" => Permission::AccessFineLocation,
        _ => return Err(format!("unknown permission {s:?}")),
    })
}

impl Args {
    fn config(&self) -> GateConfig {
        GateConfig {
            runtime_permissions_level: self.runtime_permissions_level,
            modern_permissions_level: self.modern_permissions_level,
            ..Default::default()
        }
    }

    fn host(&self) -> SimHost {
        let mut host =
            SimHost::new().with_api_level(self.api_level).refusing(&self.refuse).manual();
        if self.no_hardware {
            host = host.without_hardware();
        }
        if self.powered {
            host = host.with_adapter_on();
        }
        if self.grant_all {
            host = host.with_all_granted();
        }
        host.power_on_accept = !self.stuck_adapter;
        host
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let log_file = File::create(&args.log_file)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!(api_level = args.api_level, "starting entry gate simulator");

    let mut runtime = Runtime::new(Console::new(args.host())?, args.config());
    runtime.run().await?;

    tracing::info!("entry screen closed");
    Ok(())
}
