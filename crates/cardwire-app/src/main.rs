use std::io;

use anyhow::Context;
use cardwire_app::cli::{Cli, Command};
use cardwire_app::commands::{ConvertOptions, convert, validate};
use cardwire_core::config::load_config;
use cardwire_rfc::rfc::vcard::{CompatibilityMode, VCardVersion};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let default_version: VCardVersion = config
        .output
        .version
        .parse()
        .context("invalid output.version in configuration")?;

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Convert {
            from,
            to,
            version,
            compat,
        } => {
            let compat = match compat {
                Some(compat) => compat,
                None => config
                    .output
                    .compatibility
                    .parse::<CompatibilityMode>()
                    .context("invalid output.compatibility in configuration")?,
            };
            let options = ConvertOptions {
                from,
                to,
                version: version.unwrap_or(default_version),
                compat,
                fold_width: config.output.fold_width(),
            };
            let summary = convert(stdin, &mut stdout, &options)?;
            tracing::info!(
                written = summary.written,
                dropped = summary.dropped,
                "Conversion finished"
            );
        }
        Command::Validate { version } => {
            let count = validate(stdin, &mut stdout, version.unwrap_or(default_version))?;
            tracing::info!(warnings = count, "Validation finished");
        }
    }

    Ok(())
}
