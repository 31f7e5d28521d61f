use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use shapelab::benchmark::{
    heatmap, parse_primitive_counts, BenchmarkLog, BenchmarkReport, SequencerConfig,
    TransitionTable, DEFAULT_LOG_PATH, DEFAULT_PRIMITIVE_COUNTS,
};
use shapelab::demos::benchmark::{BENCHMARK_HEIGHT, BENCHMARK_WIDTH};
use shapelab::demos::{self, BenchmarkDemo, BlendDemo, ColorsDemo, Demo, ShapesDemo, TransformDemo};
use shapelab::texture::Texture;
use shapelab::window::{WINDOW_HEIGHT, WINDOW_WIDTH};
use shapelab::{ConfigError, Error};

#[derive(Parser)]
#[command(name = "shapelab")]
#[command(about = "Software-rendered transform and color demos with an FPS benchmark", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Window width in pixels (defaults depend on the demo)
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Window height in pixels (defaults depend on the demo)
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Suppress log output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure FPS for every triangle count and feature combination
    Benchmark {
        /// Ascending triangle counts, comma separated [default: 1,10,50,100,500,1000,5000]
        #[arg(long)]
        counts: Option<String>,

        /// Seconds spent measuring each combination
        #[arg(long, default_value = "3", value_parser = parse_seconds)]
        window_secs: Duration,

        /// Seconds between live FPS reports
        #[arg(long, default_value = "1", value_parser = parse_seconds)]
        display_secs: Duration,

        /// CSV file receiving the results
        #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
        output: PathBuf,

        /// Image used instead of the procedural checkerboard
        #[arg(long)]
        texture: Option<PathBuf>,
    },
    /// Move, scale, rotate and reflect a square, triangle or circle
    Transform,
    /// Color handling scenes (Left/Right to switch, B toggles blending)
    Colors,
    /// Static scene of transformed shapes
    Shapes,
    /// Transparent circle blended over a square
    Blend,
    /// Summarize a benchmark CSV
    Report {
        /// CSV file written by the benchmark
        #[arg(default_value = DEFAULT_LOG_PATH)]
        input: PathBuf,

        /// Also write the summary to a text file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write an FPS heatmap PNG
        #[arg(long)]
        heatmap: Option<PathBuf>,
    },
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("{e}"))
}

fn run_demo(demo: &mut dyn Demo, size: (u32, u32)) -> Result<(), Error> {
    demos::run(demo, size.0, size.1)
}

struct BenchmarkArgs {
    counts: Option<String>,
    window_secs: Duration,
    display_secs: Duration,
    output: PathBuf,
    texture: Option<PathBuf>,
}

fn benchmark(args: BenchmarkArgs, size: (u32, u32)) -> Result<(), Error> {
    let counts = match args.counts.as_deref() {
        Some(list) => parse_primitive_counts(list)?,
        None => DEFAULT_PRIMITIVE_COUNTS.to_vec(),
    };
    let config = SequencerConfig::new(
        counts,
        TransitionTable::default(),
        args.window_secs,
        args.display_secs,
    )?;

    // Nothing to measure: record the empty result without opening a window.
    if config.primitive_counts().is_empty() {
        BenchmarkLog::new().save(&args.output)?;
        log::info!("No triangle counts given, wrote {}", args.output.display());
        return Ok(());
    }

    let texture = args.texture.map(Texture::from_file).transpose()?;
    let mut demo = BenchmarkDemo::new(config, args.output, texture);
    run_demo(&mut demo, size)
}

fn report(
    input: PathBuf,
    output: Option<PathBuf>,
    heatmap_path: Option<PathBuf>,
) -> Result<(), Error> {
    let log = BenchmarkLog::load(&input)?;
    let summary = BenchmarkReport::from_log(&log);
    print!("{summary}");

    if let Some(path) = output {
        summary.save(&path)?;
        log::info!("Summary written to {}", path.display());
    }

    if let Some(path) = heatmap_path {
        match heatmap(&log) {
            Some(image) => {
                image.save(&path)?;
                log::info!("Heatmap written to {}", path.display());
            }
            None => log::warn!("No samples in {}, heatmap skipped", input.display()),
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }

    let size = |default_width, default_height| {
        (
            cli.width.unwrap_or(default_width).max(1),
            cli.height.unwrap_or(default_height).max(1),
        )
    };
    let window_size = size(WINDOW_WIDTH, WINDOW_HEIGHT);

    let result = match cli.command {
        Commands::Benchmark {
            counts,
            window_secs,
            display_secs,
            output,
            texture,
        } => benchmark(
            BenchmarkArgs {
                counts,
                window_secs,
                display_secs,
                output,
                texture,
            },
            size(BENCHMARK_WIDTH, BENCHMARK_HEIGHT),
        ),
        Commands::Transform => run_demo(&mut TransformDemo::new(), window_size),
        Commands::Colors => run_demo(&mut ColorsDemo::new(), window_size),
        Commands::Shapes => run_demo(&mut ShapesDemo::new(), window_size),
        Commands::Blend => run_demo(&mut BlendDemo::new(), window_size),
        Commands::Report {
            input,
            output,
            heatmap,
        } => report(input, output, heatmap),
    };

    match result {
        Ok(()) => {}
        Err(Error::Config(e)) => {
            log::warn!("Invalid benchmark configuration, nothing recorded: {e}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
