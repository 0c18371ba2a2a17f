//! idc-footprint: interdigitated capacitor footprint generator for KiCad
//!
//! Validates the capacitor parameters, computes the comb geometry and writes
//! one `.kicad_mod` file per invocation.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use idc_footprint::config::{self, Config};
use idc_footprint::error::Error;
use idc_footprint::idc::{
    CapacitorSpec, LayoutGenerator, PrimitiveKind, RawSpec, DEFAULT_LAYER,
};
use idc_footprint::kicad::{self, DEFAULT_OUTPUT_DIR};

/// Interdigitated capacitor footprint generator for KiCad.
///
/// Give either the total width or the finger length; the other is derived.
/// If both are given, the finger length wins.
#[derive(Parser, Debug)]
#[command(name = "idc-footprint")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Module name for the generated capacitor
    #[arg(short, long = "modulename", value_name = "NAME")]
    module_name: String,

    /// Width of each track/finger in mm
    #[arg(short, long, alias = "trackWidth", value_name = "MM")]
    track_width: f64,

    /// Gap between tracks/fingers in mm
    #[arg(short, long, value_name = "MM")]
    gap: f64,

    /// Total width of the capacitor in mm
    #[arg(short = 'w', long, alias = "totalWidth", value_name = "MM")]
    total_width: Option<f64>,

    /// Length of each finger in mm (takes precedence over --total-width)
    #[arg(short, long, alias = "fingerLength", value_name = "MM")]
    finger_length: Option<f64>,

    /// Number of fingers/tracks
    #[arg(short, long, alias = "numFingers", value_name = "COUNT")]
    num_fingers: i64,

    /// Width of the connecting tracks in mm (default: same as track width)
    #[arg(short, long, alias = "connectingTrackWidth", value_name = "MM")]
    connecting_track_width: Option<f64>,

    /// Copper layer (default: F.Cu)
    #[arg(short, long, value_name = "LAYER")]
    layer: Option<String>,

    /// Primitive kind: `pad` (SMD pads) or `rect` (filled rectangles)
    #[arg(short, long, value_name = "KIND")]
    kind: Option<PrimitiveKind>,

    /// Output directory (default: ./idc.pretty)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the footprint to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Path to configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Collects the capacitor parameters, filling gaps from the configuration.
    fn raw_spec(&self, cfg: &Config) -> RawSpec {
        RawSpec {
            module_name: self.module_name.clone(),
            track_width: self.track_width,
            gap: self.gap,
            num_fingers: self.num_fingers,
            total_width: self.total_width,
            finger_length: self.finger_length,
            connecting_track_width: self.connecting_track_width,
            layer: self
                .layer
                .clone()
                .or_else(|| cfg.layer.clone())
                .unwrap_or_else(|| DEFAULT_LAYER.to_string()),
        }
    }

    fn kind(&self, cfg: &Config) -> PrimitiveKind {
        self.kind.or(cfg.kind).unwrap_or_default()
    }

    fn output_dir(&self, cfg: &Config) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| cfg.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Validates, generates and writes one footprint.
fn run(args: &Args, cfg: &Config) -> Result<(), Error> {
    let spec = CapacitorSpec::try_from(args.raw_spec(cfg))?;
    let kind = args.kind(cfg);
    let layout = LayoutGenerator::new(kind).generate(&spec);
    let now = Local::now();

    if args.stdout {
        info!(module = %spec.module_name, dimensions = %layout.dimensions(), "Generated footprint");
        print!("{}", kicad::render_file(&spec, &layout, &now)?);
        return Ok(());
    }

    println!(
        "Generated {} with dimensions: {}",
        spec.module_name,
        layout.dimensions()
    );

    let path = kicad::write_footprint(&args.output_dir(cfg), &spec, &layout, &now)?;
    println!("Layout saved to {}", path.display());

    Ok(())
}

/// Formats an error followed by its chain of causes.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Entry point for the idc-footprint generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_invalid_parameter() {
                error!(error = %e, "Footprint generation failed");
            }
            eprintln!("Error: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}
