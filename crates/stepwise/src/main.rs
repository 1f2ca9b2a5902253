//! stepwise: step-by-step algorithm traces
//!
//! Runs any catalog algorithm over small inputs and prints every step it
//! records, replays the steps on a timer, or compares the grid pathfinding
//! variants side by side.

mod config;
mod input;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stepwise_engines::{
    AlgorithmId, EngineInput, EngineRegistry, PlaybackStatus, PlaybackStore, compare_pathfinding,
};
use stepwise_trace::{AlgorithmDescriptor, AlgorithmMetrics, AlgorithmStep};
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::{CONFIG_FILE, Config, OutputFormat, STEPWISE_DIR};
use input::{InputArgs, build_input, grid_from_config};

/// Step-by-step algorithm traces
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to .stepwise directory (default: search for .stepwise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an algorithm and print its steps
    Run {
        /// Algorithm id, e.g. bubble-sort or pathfinding-astar (see `stepwise list`)
        algorithm: AlgorithmId,

        #[command(flatten)]
        input: InputArgs,

        /// Output format (default: from config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Run the three grid pathfinding variants on the same grid
    Compare {
        /// Grid walls file: rows of `#` (wall) and `.` (open)
        #[arg(long)]
        walls_file: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay an algorithm's steps in the terminal
    Play {
        /// Algorithm id (see `stepwise list`)
        algorithm: AlgorithmId,

        #[command(flatten)]
        input: InputArgs,

        /// Playback speed multiplier, 0.25 to 4.0 (default: from config)
        #[arg(long)]
        speed: Option<f64>,
    },

    /// List available algorithms and their complexities
    List,

    /// Initialize a new .stepwise directory with config file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize logging for one-shot commands. Logs go to stderr so stdout
/// stays clean for step output.
fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(verbose))
        .init();
}

/// Initialize logging for `play`.
/// Logs to rotating files in .stepwise/logs/ so the terminal only shows steps.
fn init_file_logging(stepwise_dir: &Path, verbose: bool) {
    let logs_dir = stepwise_dir.join("logs");

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        init_logging(verbose);
        return;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "stepwise.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the writer thread.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(env_filter(verbose))
        .init();
}

/// Load config from file or auto-discover from `.stepwise/config.toml`.
///
/// Never fails: a missing, malformed or invalid config falls back to the
/// defaults with a log line saying why.
fn load_config(override_path: Option<&PathBuf>) -> (Config, Option<PathBuf>) {
    let loaded = match override_path {
        Some(path) => {
            let config_file = if path.is_dir() {
                path.join(CONFIG_FILE)
            } else {
                path.clone()
            };
            let stepwise_dir = config_file.parent().unwrap_or(path).to_path_buf();
            Config::from_file(&config_file).map(|config| Some((config, stepwise_dir)))
        }
        None => Config::find_and_load(),
    };

    let (config, dir) = match loaded {
        Ok(Some((config, dir))) => {
            info!("Loaded config from {}", dir.display());
            (config, Some(dir))
        }
        Ok(None) => {
            debug!("No .stepwise/config.toml found, using defaults");
            (Config::default(), None)
        }
        Err(e) => {
            warn!("Failed to load config: {:#}, using defaults", e);
            (Config::default(), None)
        }
    };

    let errors = config.validate();
    if errors.is_empty() {
        return (config, dir);
    }
    for error in &errors {
        warn!("Invalid config value {}", error);
    }
    warn!("Using default configuration");
    (Config::default(), dir)
}

/// Build and run one engine through the registry.
fn run_algorithm(
    registry: &EngineRegistry,
    id: AlgorithmId,
    input: EngineInput,
) -> Result<(AlgorithmDescriptor, Vec<AlgorithmStep>, AlgorithmMetrics)> {
    let descriptor = registry
        .descriptor(id.as_str())
        .cloned()
        .unwrap_or_else(|| id.descriptor());
    let mut engine = registry.create(id.as_str())?;

    engine
        .initialize(descriptor.clone(), input)
        .with_context(|| format!("Cannot run {}", descriptor.name))?;
    let steps = engine.generate_steps()?.to_vec();
    let metrics = engine.metrics()?;

    info!(
        algorithm = id.as_str(),
        steps = steps.len(),
        operations = metrics.total_operations,
        comparisons = metrics.total_comparisons,
        "Run complete"
    );
    Ok((descriptor, steps, metrics))
}

/// Replay steps at the store's speed until done or Ctrl-C.
async fn play_steps(steps: Vec<AlgorithmStep>, speed: f64) -> Result<()> {
    let mut store = PlaybackStore::new();
    store.set_steps(steps);
    store.set_speed(speed);
    info!(
        total = store.steps().len(),
        speed = store.speed(),
        "Starting playback"
    );

    let mut stdout = std::io::stdout();
    let total = store.steps().len();
    if let Some(step) = store.current_step() {
        write!(stdout, "{}", render::step_frame(step, 0, total))?;
        stdout.flush()?;
    }

    store.play();
    while store.status() == PlaybackStatus::Playing {
        tokio::select! {
            _ = tokio::time::sleep(store.tick_interval()) => {
                if store.tick() {
                    let index = store.current_step_index();
                    if let Some(step) = store.current_step() {
                        write!(stdout, "\n{}", render::step_frame(step, index, total))?;
                        stdout.flush()?;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                store.pause();
                info!(index = store.current_step_index(), "Playback interrupted");
            }
        }
    }

    let state = store.state();
    debug!(status = ?state.status, index = state.current_step_index, "Playback finished");
    if state.status == PlaybackStatus::Paused {
        println!(
            "\nPaused at step {} of {}",
            state.current_step_index + 1,
            state.total_steps
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Play { .. }) => {
            let stepwise_dir = config::stepwise_dir(cli.config.as_deref())
                .unwrap_or_else(|| PathBuf::from(STEPWISE_DIR));
            init_file_logging(&stepwise_dir, cli.verbose);
        }
        _ => init_logging(cli.verbose),
    }

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let (config, _config_dir) = load_config(cli.config.as_ref());
    let registry = EngineRegistry::builtin();
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Run {
            algorithm,
            input,
            format,
        } => {
            let engine_input = build_input(algorithm, &input, &config)?;
            let (descriptor, steps, metrics) = run_algorithm(&registry, algorithm, engine_input)?;
            let format = format.unwrap_or(config.output.format);
            render::write_run(&mut stdout, format, &descriptor, &steps, &metrics)?;
        }

        Commands::Compare { walls_file, json } => {
            let grid = grid_from_config(&config, walls_file.as_deref())?;
            let results = compare_pathfinding(&grid).context("Cannot compare pathfinding")?;
            render::write_comparison(&mut stdout, json, (grid.rows, grid.cols), &results)?;
        }

        Commands::Play {
            algorithm,
            input,
            speed,
        } => {
            let engine_input = build_input(algorithm, &input, &config)?;
            let (_, steps, _) = run_algorithm(&registry, algorithm, engine_input)?;
            drop(stdout);
            play_steps(steps, speed.unwrap_or(config.playback.speed)).await?;
        }

        Commands::List => {
            render::write_catalog(&mut stdout, &registry)?;
        }

        Commands::Init { force } => {
            let stepwise_dir = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(STEPWISE_DIR));
            let config_path = stepwise_dir.join(CONFIG_FILE);

            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Use --force to overwrite.",
                    config_path.display()
                );
            }

            if !stepwise_dir.exists() {
                std::fs::create_dir_all(&stepwise_dir).with_context(|| {
                    format!("Failed to create {}", stepwise_dir.display())
                })?;
                info!("Created {}/", stepwise_dir.display());
            }

            std::fs::write(&config_path, Config::default_toml())
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            info!("Created {}", config_path.display());
            info!("Next steps:");
            info!("  1. Run 'stepwise list' to see the available algorithms");
            info!("  2. Run 'stepwise run bubble-sort --values 5,2,8,1' to print a trace");
            info!("  3. Run 'stepwise play quick-sort' to watch one step at a time");
        }
    }

    Ok(())
}
