use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::info;

use overlap_mc::{
    analytic_overlap_1s1s, integrate_parallel, integrate_seeded, read_run_config, sweep,
    sweep_parallel, sweep_seeded, IntegrationConfig, IntegrationTask, Overlap, OverlapError,
    RunConfig, SweepRange, BOHR_RADIUS,
};

/// Monte Carlo overlap integrals of hydrogen 1s and 2px orbitals
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML run configuration; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate both overlaps at a single spacing
    Integrate {
        /// Interatomic spacing R in units of a0
        #[arg(short = 'r', long)]
        spacing: Option<f64>,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Tabulate one overlap over a range of spacings
    Sweep {
        /// Which overlap to record [default: 1s1s]
        #[arg(short, long, value_enum)]
        overlap: Option<OverlapArg>,

        /// First spacing
        #[arg(long)]
        start: Option<f64>,

        /// Last spacing (inclusive)
        #[arg(long)]
        stop: Option<f64>,

        /// Spacing increment
        #[arg(long)]
        step: Option<f64>,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct SamplingArgs {
    /// Number of Monte Carlo samples N
    #[arg(short = 'n', long = "samples")]
    n: Option<usize>,

    /// Box length along x
    #[arg(long)]
    box_x: Option<f64>,

    /// Box length along y
    #[arg(long)]
    box_y: Option<f64>,

    /// Box length along z
    #[arg(long)]
    box_z: Option<f64>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Spread the work over all cores
    #[arg(short, long)]
    parallel: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OverlapArg {
    #[value(name = "1s1s")]
    S1s1s,
    #[value(name = "1s2px")]
    S1s2px,
}

impl From<OverlapArg> for Overlap {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::S1s1s => Overlap::S1s1s,
            OverlapArg::S1s2px => Overlap::S1s2px,
        }
    }
}

impl SamplingArgs {
    fn apply(&self, run: &mut RunConfig) {
        let integration = &mut run.integration;
        if let Some(n) = self.n {
            integration.n = n;
        }
        if let Some(x) = self.box_x {
            integration.bounding_box.x = x;
        }
        if let Some(y) = self.box_y {
            integration.bounding_box.y = y;
        }
        if let Some(z) = self.box_z {
            integration.bounding_box.z = z;
        }
        if self.seed.is_some() {
            run.seed = self.seed;
        }
        run.parallel |= self.parallel;
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_integrate(run: RunConfig) -> Result<(), OverlapError> {
    let config = run.integration;
    config.validate()?;
    info!(n = config.n, spacing = config.spacing, "integrating overlaps");

    let task = IntegrationTask::spawn_job(
        move || match (run.parallel, run.seed) {
            (true, seed) => integrate_parallel(&config, seed.unwrap_or_else(rand::random)),
            (false, Some(seed)) => integrate_seeded(&config, seed),
            (false, None) => overlap_mc::integrate(&config),
        },
        |result| {
            if result.is_ok() {
                info!("integration complete");
            }
        },
    );
    let result = task.wait()?;
    print_integral(&config, &result);
    Ok(())
}

fn print_integral(config: &IntegrationConfig, result: &overlap_mc::IntegralResult) {
    let bbox = &config.bounding_box;
    println!("Monte Carlo Overlap Integrals");
    println!("-----------------------------");
    println!("Samples N:               {}", config.n);
    println!(
        "Spacing R:               {:.6} a0 ({:.6e} m)",
        config.spacing,
        config.spacing * BOHR_RADIUS
    );
    println!(
        "Bounding box:            {:.3} x {:.3} x {:.3} (volume {:.3})",
        bbox.x,
        bbox.y,
        bbox.z,
        bbox.volume()
    );
    println!("Overlap 1s-1s:           {:.8}", result.overlap_1s1s);
    println!("Analytic 1s-1s:          {:.8}", analytic_overlap_1s1s(config.spacing));
    println!("log10 relative error:    {:.4}", result.log_error_1s1s);
    println!("Overlap 1s-2px:          {:.8}", result.overlap_1s2px);
}

fn run_sweep(run: RunConfig) -> Result<(), OverlapError> {
    let selector = run.overlap;
    let spacings = run.sweep.spacings()?;
    let template = run.integration;
    let curve = match (run.parallel, run.seed) {
        (true, seed) => sweep_parallel(spacings, &template, selector, seed.unwrap_or_else(rand::random))?,
        (false, Some(seed)) => sweep_seeded(spacings, &template, selector, seed)?,
        (false, None) => sweep(spacings, &template, selector)?,
    };

    println!("# Overlap integral {} vs. R (R in units of a0, N = {})", selector.label(), template.n);
    println!("# {:>10} {:>16}", "R", "overlap");
    for point in &curve {
        println!("{:>12.4} {:>16.8}", point.spacing, point.value);
    }
    Ok(())
}

fn run(args: Args) -> Result<(), OverlapError> {
    let mut run_config = match &args.config {
        Some(path) => read_run_config(path)?,
        None => RunConfig::default(),
    };

    match args.command {
        Command::Integrate { spacing, sampling } => {
            sampling.apply(&mut run_config);
            if let Some(r) = spacing {
                run_config.integration.spacing = r;
            }
            run_integrate(run_config)
        }
        Command::Sweep { overlap, start, stop, step, sampling } => {
            sampling.apply(&mut run_config);
            let defaults = run_config.sweep;
            run_config.sweep = SweepRange::new(
                start.unwrap_or(defaults.start),
                stop.unwrap_or(defaults.stop),
                step.unwrap_or(defaults.step),
            );
            if let Some(overlap) = overlap {
                run_config.overlap = overlap.into();
            }
            run_sweep(run_config)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);

        let mut source = e.source();
        while let Some(s) = source {
            eprintln!("Caused by: {}", s);
            source = s.source();
        }

        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
