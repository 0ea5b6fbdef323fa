//! Track tool.
//!
//! Reads tropical-cyclone tracker output in any supported format, prints it,
//! compares two tracks and emits TC vitals records.

mod config;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use atcf_parser::{detect_format, parse_track, DetectOptions};
use clap::{Parser, Subcommand};
use tc_common::Track;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use track_diff::compute_diff;

use config::{validate_forecast_hour, DiffArgs, ParseArgs};

#[derive(Parser, Debug)]
#[command(name = "track-tool")]
#[command(about = "Parse, compare and export tropical-cyclone tracks")]
struct Args {
    /// Log level
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "TRACK_TOOL_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the observations of a track
    Show {
        /// Track file, or b-deck directory
        path: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        /// Print the track as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a forecast track against a reference track
    Diff {
        forecast: PathBuf,
        reference: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        diff: DiffArgs,

        /// Print the diff as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the TC vitals record of one forecast hour
    Vitals {
        path: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        /// Forecast hour
        #[arg(long)]
        fhr: i64,
    },

    /// Report the detected format of a file
    Detect { path: PathBuf },
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}

fn read_track(path: &Path, options: &DetectOptions) -> Result<Track> {
    let track = parse_track(path, options)
        .with_context(|| format!("Failed to read track from {}", path.display()))?;
    info!(
        path = %path.display(),
        storm = %track.storm().storm_id(),
        observations = track.len(),
        "Read track"
    );
    Ok(track)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    match args.command {
        Command::Show { path, parse, json } => {
            let track = read_track(&path, &parse.detect_options())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&track)?);
            } else {
                print!("{}", output::track_table(&track));
            }
        }

        Command::Diff {
            forecast,
            reference,
            parse,
            diff,
            json,
        } => {
            let forecast_track = read_track(&forecast, &parse.detect_options())?;
            let reference_options =
                diff.reference_options(&parse, forecast_track.reference_time());
            let reference_track = read_track(&reference, &reference_options)?;

            let result = compute_diff(&forecast_track, &reference_track, &diff.diff_options());
            if json {
                println!("{}", output::diff_json(&result)?);
            } else {
                print!("{}", output::diff_table(&result));
            }
        }

        Command::Vitals { path, parse, fhr } => {
            let fhr = validate_forecast_hour(fhr)?;
            let track = read_track(&path, &parse.detect_options())?;
            let record = track
                .tcvitals_record(fhr)
                .ok_or_else(|| anyhow!("No observation at forecast hour {} in {}", fhr, path.display()))?;
            println!("{}", record);
        }

        Command::Detect { path } => {
            let format = detect_format(&path)
                .with_context(|| format!("Failed to detect format of {}", path.display()))?;
            println!("{}", format);
        }
    }

    Ok(())
}
