// SPDX-License-Identifier: GPL-3.0-only
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use eizo_hid_control::attributes;
use eizo_hid_control::config::Config;
use eizo_hid_control::monitor::DisplayManager;
use eizo_hid_control::protocols::hidraw::HidapiTransport;

#[macro_use]
extern crate tracing;

#[derive(Parser, Debug)]
#[command(version, about = "Get and set EIZO FlexScan monitor settings over USB HID")]
struct Cli {
    /// USB vendor ID (defaults to EIZO's)
    #[arg(long, value_parser = parse_usb_id)]
    vendor_id: Option<u16>,

    /// USB product ID of the monitor
    #[arg(long, value_parser = parse_usb_id)]
    product_id: Option<u16>,

    /// Serial number, to pick one of several identical monitors
    #[arg(long)]
    serial: Option<String>,

    /// Config file (defaults to $XDG_CONFIG_HOME/eizo-hid-control/config.kdl)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current value of a setting
    Get { attribute: String },
    /// Change a setting
    Set {
        attribute: String,
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
}

/// Accepts decimal or 0x-prefixed hexadecimal
fn parse_usb_id(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid USB ID {s:?}: {e}"))
}

fn setup_logs(config_filter: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let fallback = config_filter
        .map(str::to_string)
        .unwrap_or_else(|| format!("warn,{}=warn", env!("CARGO_CRATE_NAME")));
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging isn't up yet, so config errors are reported through the return value
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    setup_logs(config.log_filter.as_deref());

    let vendor_id = cli.vendor_id.unwrap_or(config.vendor_id);
    let product_id = cli
        .product_id
        .or(config.product_id)
        .ok_or_else(|| anyhow!("No product ID given; pass --product-id or set product-id in the config"))?;
    let serial = cli.serial.or(config.serial);

    let api = hidapi::HidApi::new().context("Failed to initialize HID API")?;
    let transport = HidapiTransport::open(&api, vendor_id, product_id, serial.as_deref())
        .with_context(|| {
            format!(
                "Failed to open monitor {vendor_id:#06x}:{product_id:#06x}. \
                 This may be a permissions issue. On Linux, ensure udev rules are configured."
            )
        })?;

    let serial = transport.serial_number().unwrap_or_else(|| "unknown".to_string());
    let product = transport.product_string().unwrap_or_else(|| "FlexScan".to_string());
    info!("Opened {} (serial: {})", product, serial);

    let manager = DisplayManager::new();
    let id = manager.attach(transport, serial, product)?;
    let display = manager.get(&id)?;

    let outcome = match cli.command {
        Command::Get { attribute } => attributes::show(&*display, &attribute).map(|text| print!("{text}")),
        Command::Set { attribute, value } => attributes::store(&*display, &attribute, &value).map(|_| ()),
    };

    drop(display);
    manager.detach(&id);

    outcome.map_err(|e| {
        let errno = e.errno();
        anyhow::Error::new(e).context(format!("errno {errno}"))
    })
}
