//! Hedra CLI - polyhedral mesh operators from the command line.
//!
//! Usage: hedra [-v...] <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `hedra --help` for available commands.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use hedra::algo::conway::{apply_sequence_with_progress, parse_operators, Strictness};
use hedra::algo::subdivide::{subdivide_with_progress, Scheme, SubdivideOptions};
use hedra::algo::validate::MeshReport;
use hedra::algo::Progress;
use hedra::io;
use hedra::mesh::PolyMesh;

#[derive(Parser)]
#[command(name = "hedra")]
#[command(author, version, about = "Polyhedral mesh operators", long_about = None)]
struct Cli {
    /// Log more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Apply a string of Conway operators, rightmost first
    Conway {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Operator string, e.g. "tk" or "dajk"
        ops: String,

        /// Fail on unknown operator characters instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Subdivide a mesh
    Subdivide {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Subdivision scheme: quad, catmull-clark, midpoint or tessellate
        #[arg(short, long, default_value = "quad")]
        scheme: Scheme,

        /// Number of subdivision iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr at a level picked by the number of `-v` flags.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,

        Commands::Conway {
            input,
            output,
            ops,
            strict,
        } => cmd_conway(&input, &output, &ops, strict)?,

        Commands::Subdivide {
            input,
            output,
            scheme,
            iterations,
            sequential,
        } => cmd_subdivide(&input, &output, scheme, iterations, sequential)?,
    }

    Ok(())
}

/// Create a progress reporter that draws a bar on stderr.
fn create_progress() -> Progress {
    // Highest percentage drawn so far; the bar never moves backwards.
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        let percent = previous.max(raw_percent);
        if percent == previous && current < total && current > 0 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {:<16}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: PolyMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("{}", MeshReport::new(&mesh));

    println!("Surface area: {:.6}", mesh.surface_area());
    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    println!("Face sides:");
    for (sides, count) in mesh.arity_histogram() {
        println!("  {:>3}: {}", sides, count);
    }

    Ok(())
}

fn cmd_conway(
    input: &PathBuf,
    output: &PathBuf,
    ops: &str,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh: PolyMesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let operators = parse_operators(ops, strictness)?;
    let names: Vec<String> = operators.iter().map(ToString::to_string).collect();
    println!("Applying {}...", names.join(", then "));

    let progress = create_progress();
    let start = Instant::now();
    apply_sequence_with_progress(&mut mesh, &operators, &progress)?;
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_subdivide(
    input: &PathBuf,
    output: &PathBuf,
    scheme: Scheme,
    iterations: usize,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh: PolyMesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let options = SubdivideOptions::new(iterations)
        .with_scheme(scheme)
        .with_parallel(!sequential);
    let mode = if sequential { "sequential" } else { "parallel" };
    println!("Applying {} subdivision ({} iterations, {})...", scheme, iterations, mode);

    let progress = create_progress();
    let start = Instant::now();
    subdivide_with_progress(&mut mesh, &options, &progress)?;
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
