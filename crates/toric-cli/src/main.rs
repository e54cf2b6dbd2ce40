//! toric CLI - lattice boxes and line bundle cohomology on toric varieties
//!
//! Computes the box of candidate lattice points for a divisor, writes the
//! request the Čech engine reads, and runs the engine.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use toric_box::{vanishing_points, SolveMethod};
use toric_cech::{
    cohomology_dimensions, compute_kth_cohomology, CohomologyRequest, Divisor, EngineConfig, Fan,
    ProcessEngine,
};

mod fans;

#[derive(Parser)]
#[command(name = "toric")]
#[command(about = "Line bundle cohomology on toric varieties", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in example fans and their divisors
    Fans,
    /// Print the box of candidate lattice points for a divisor
    #[command(name = "box")]
    Bounds {
        #[command(flatten)]
        input: FanArgs,
        /// Solve ray subsystems in floating point instead of exactly
        #[arg(long)]
        float: bool,
        /// Print the box as JSON
        #[arg(long)]
        json: bool,
        /// Also list the vanishing point of every invertible subsystem
        #[arg(long)]
        points: bool,
    },
    /// Write the request artifact the Čech engine reads
    Request {
        #[command(flatten)]
        input: FanArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the Čech engine for one degree, or for all of them
    Cohomology {
        #[command(flatten)]
        input: FanArgs,
        /// Cohomology degree; every degree 0..=dim if omitted
        #[arg(short = 'k', long)]
        degree: Option<usize>,
        /// TOML configuration file with an [engine] table
        #[arg(long)]
        config: Option<PathBuf>,
        /// Engine executable, overriding the config file and environment
        #[arg(long)]
        engine: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FanArgs {
    /// Built-in fan name or a .json/.toml fan file
    #[arg(short, long)]
    fan: String,
    /// Named divisor of a built-in fan, `canonical`, or coefficients like 5,0,0,-2
    #[arg(short, long, allow_hyphen_values = true, default_value = "canonical")]
    divisor: String,
}

impl FanArgs {
    fn resolve(&self) -> Result<(Fan, Divisor)> {
        if let Some(example) = fans::find(&self.fan) {
            let divisor = match example.divisor(&self.divisor) {
                Some(d) => d,
                None => parse_divisor(&self.divisor)?,
            };
            return Ok((example.fan, divisor));
        }

        let fan = Fan::load(&self.fan).with_context(|| format!("Failed to load fan {}", self.fan))?;
        let divisor = if self.divisor == "canonical" {
            Divisor::canonical(fan.num_rays())
        } else {
            parse_divisor(&self.divisor)?
        };
        Ok((fan, divisor))
    }
}

fn parse_divisor(text: &str) -> Result<Divisor> {
    text.parse::<Divisor>()
        .with_context(|| format!("Not a divisor name or coefficient list: {text}"))
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fans => list_fans(),
        Commands::Bounds {
            input,
            float,
            json,
            points,
        } => {
            let method = if float {
                SolveMethod::Float
            } else {
                SolveMethod::Exact
            };
            show_box(&input, method, json, points)?;
        }
        Commands::Request { input, output } => write_request(&input, output)?,
        Commands::Cohomology {
            input,
            degree,
            config,
            engine,
        } => run_cohomology(&input, degree, config, engine)?,
    }

    Ok(())
}

fn list_fans() {
    for example in fans::builtin() {
        println!(
            "{:<16} dim {}  {} rays  {} cones  {}",
            example.name,
            example.fan.dim(),
            example.fan.num_rays(),
            example.fan.cones.len(),
            example.description
        );
        let names: Vec<&str> = example
            .divisors
            .iter()
            .map(|(n, _)| *n)
            .chain(std::iter::once("canonical"))
            .collect();
        println!("{:<16} divisors: {}", "", names.join(", "));
    }
}

fn show_box(input: &FanArgs, method: SolveMethod, json: bool, points: bool) -> Result<()> {
    let (fan, divisor) = input.resolve()?;
    let request = CohomologyRequest::with_method(&fan, &divisor, method)?;
    let bounds = request.bounds();

    if json {
        let vanishing = if points {
            Some(vanishing_points(&fan.rays, &divisor, method)?)
        } else {
            None
        };
        let out = serde_json::json!({
            "divisor": divisor,
            "method": method,
            "box": bounds,
            "lattice_points": bounds.lattice_points().to_string(),
            "vanishing_points": vanishing,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Divisor: {divisor}");
    for (axis, interval) in bounds.intervals().iter().enumerate() {
        println!("  m{axis}: [{}, {}]", interval.min, interval.max);
    }
    println!("Lattice points: {}", bounds.lattice_points());

    if points {
        println!("Vanishing points:");
        for vp in vanishing_points(&fan.rays, &divisor, method)? {
            println!("  rays {:?} -> {:?}", vp.rays, vp.point);
        }
    }
    Ok(())
}

fn write_request(input: &FanArgs, output: Option<PathBuf>) -> Result<()> {
    let (fan, divisor) = input.resolve()?;
    let request = CohomologyRequest::new(&fan, &divisor)?;
    let artifact = request.to_artifact();
    match output {
        Some(path) => {
            std::fs::write(&path, artifact)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote request to {}", path.display());
        }
        None => print!("{artifact}"),
    }
    Ok(())
}

fn run_cohomology(
    input: &FanArgs,
    degree: Option<usize>,
    config: Option<PathBuf>,
    engine: Option<PathBuf>,
) -> Result<()> {
    let (fan, divisor) = input.resolve()?;

    let config = match config {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => EngineConfig::default(),
    }
    .with_env_overrides()
    .with_engine_override(engine.map(PathBuf::into_os_string));
    debug!(program = %config.program.display(), "engine configured");
    let oracle = ProcessEngine::new(config);

    match degree {
        Some(k) => {
            let h = compute_kth_cohomology(&oracle, &fan, &divisor, k)?;
            println!("h^{k} = {h}");
        }
        None => {
            let dims = cohomology_dimensions(&oracle, &fan, &divisor)?;
            for (k, h) in dims.iter().enumerate() {
                println!("h^{k} = {h}");
            }
        }
    }
    Ok(())
}
