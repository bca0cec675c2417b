//! simdext command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use simdext_kernels::{FIXED_WIDTHS, LanePlan, MAX_FIXED_WIDTH, SimdCapability};
use simdext_verify::{VerifyConfig, verify};

#[derive(Parser)]
#[command(name = "simdext")]
#[command(about = "SIMD elementwise kernels: capability report and self-verification", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the detected SIMD capability and the fixed-width lane plans
    Info,

    /// Check every kernel against the scalar reference
    Verify {
        /// Capability to exercise: auto, scalar, sse2, avx2, avx512 or neon
        /// (repeatable; default is every level available on this CPU)
        #[arg(short, long = "capability", value_name = "NAME")]
        capabilities: Vec<String>,

        /// Check every variable-length count up to this value
        #[arg(long, value_name = "N")]
        max_count: Option<usize>,

        /// Seed for the input generator
        #[arg(long)]
        seed: Option<u64>,

        /// Leave signed zeros, infinities and subnormals out of the inputs
        #[arg(long)]
        no_specials: bool,

        /// Load settings from a JSON file; flags override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print how a fixed width decomposes into register groups
    Plan {
        /// Number of elements (1-16)
        #[arg(short, long)]
        width: usize,

        /// Native lanes per register (1, 2, 4, 8 or 16); defaults to the
        /// detected f32 lane count
        #[arg(short, long)]
        lanes: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Info => {
            print_info();
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            capabilities,
            max_count,
            seed,
            no_specials,
            config,
            json,
        } => {
            let mut config = match config {
                Some(path) => VerifyConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => VerifyConfig::default(),
            };
            if !capabilities.is_empty() {
                config.capabilities = capabilities;
            }
            if let Some(max_count) = max_count {
                config.max_count = max_count;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if no_specials {
                config.special_values = false;
            }
            if run_verify(&config, json)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Plan { width, lanes } => {
            let lanes = lanes.unwrap_or_else(|| SimdCapability::cached().f32_lanes());
            println!("{}", checked_plan(width, lanes)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_info() {
    let detected = SimdCapability::cached();
    println!("Detected: {} ({})", detected.name(), detected.description());
    println!(
        "Available: {}",
        SimdCapability::available()
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Native lanes: f32 = {}, f64 = {}", detected.f32_lanes(), detected.f64_lanes());
    println!();

    println!("Lane plans:");
    for width in FIXED_WIDTHS {
        println!("  f32 {}", LanePlan::for_capability::<f32>(width, detected));
    }
    for width in FIXED_WIDTHS {
        println!("  f64 {}", LanePlan::for_capability::<f64>(width, detected));
    }
}

/// Returns whether every case passed.
fn run_verify(config: &VerifyConfig, json: bool) -> Result<bool> {
    let report = verify(config).context("Verification could not run")?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    if let Err(err) = report.ensure_passed() {
        log::error!("{err}");
        return Ok(false);
    }
    Ok(true)
}

/// Validate arguments before building a plan, which panics on bad input.
fn checked_plan(width: usize, lanes: usize) -> Result<LanePlan> {
    if width == 0 || width > MAX_FIXED_WIDTH {
        bail!("width must be between 1 and {MAX_FIXED_WIDTH}, got {width}");
    }
    if !lanes.is_power_of_two() || lanes > MAX_FIXED_WIDTH {
        bail!("lanes must be a power of two up to {MAX_FIXED_WIDTH}, got {lanes}");
    }
    Ok(LanePlan::lookup(width, lanes))
}
