//! Command line front end for the Gray-Scott simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gray_scott::{
    config::{CliOverrides, OutputFormat, Settings},
    model::Preset,
    render::{self, Frame, Renderer},
    utils::{ColorOutput, FieldFormatter, ProgressIndicator},
    RunOptions, Simulation, StopSignal,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gray_scott")]
#[command(about = "Gray-Scott reaction-diffusion simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and render the activator field
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Feed/kill preset (overrides config)
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Feed rate (overrides config and preset)
        #[arg(long)]
        feed: Option<f64>,

        /// Kill rate (overrides config and preset)
        #[arg(long)]
        kill: Option<f64>,

        /// Time step (overrides config)
        #[arg(long)]
        dt: Option<f64>,

        /// Number of frames (overrides config)
        #[arg(short, long)]
        frames: Option<usize>,

        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory for image frames (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create default and example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration and report numerical stability
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// List the built-in feed/kill presets
    Presets,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gray_scott=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            preset,
            feed,
            kill,
            dt,
            frames,
            format,
            output,
            verbose,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                preset,
                feed,
                kill,
                dt,
                frames,
                format,
                output_dir: output,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Check { config } => check_command(config),
        Commands::Presets => {
            println!("{}", FieldFormatter::format_presets());
            Ok(())
        }
    }
}

/// Load the config file, falling back to defaults when it does not exist
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

/// Shows a progress line while forwarding frames to a headless renderer
struct ProgressRenderer {
    inner: Box<dyn Renderer>,
    progress: ProgressIndicator,
}

impl Renderer for ProgressRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.inner.render(frame)?;
        self.progress.update(frame.index);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()?;
        self.progress.finish();
        Ok(())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Grid: {}x{}", settings.grid.width, settings.grid.height);
        println!("  Seed: {:?} r={}", settings.seed_center(), settings.seed.radius);
        println!("  Frames: {}", settings.animation.frames);
        println!("  Output: {:?}", settings.output.format);
        println!("{}", FieldFormatter::format_parameters(&settings.parameters()));
    }

    let mut simulation = Simulation::from_settings(&settings)?;
    if verbose {
        println!("{}", FieldFormatter::format_field_summary(simulation.field()));
    }

    let renderer = render::create_renderer(&settings)?;
    let mut renderer: Box<dyn Renderer> = match settings.output.format {
        OutputFormat::Terminal => renderer,
        OutputFormat::Png | OutputFormat::None => Box::new(ProgressRenderer {
            inner: renderer,
            progress: ProgressIndicator::new(settings.animation.frames),
        }),
    };

    let summary = simulation
        .run(
            &RunOptions::from_settings(&settings),
            renderer.as_mut(),
            &StopSignal::new(),
        )
        .context("Simulation failed")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Simulated {} steps (t = {:.2}) in {:.3}s",
            summary.steps,
            summary.simulated_time,
            summary.elapsed_ms as f64 / 1000.0
        ))
    );

    if settings.output.format == OutputFormat::Png {
        println!(
            "Frames saved to {}",
            settings.output.output_directory.display()
        );
    }

    if settings.output.write_summary {
        let path = settings.output.output_directory.join("run_summary.json");
        summary.save_to_file(&path)?;
        println!("Summary saved to {}", path.display());
    }

    if verbose {
        println!("\n{}", summary);
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up configuration files..."));

    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)
        .with_context(|| format!("Failed to create directory {}", examples_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    for preset in [Preset::Mitosis, Preset::Coral, Preset::Maze, Preset::Worms] {
        let path = examples_dir.join(format!("{}.yaml", preset.name()));
        if path.exists() && !force {
            println!("Skipped: {} (already exists)", path.display());
            continue;
        }
        let mut settings = Settings::default();
        settings.apply_preset(preset);
        settings.grid.width = 200;
        settings.grid.height = 200;
        settings.animation.frames = 400;
        settings.animation.steps_per_frame = 10;
        settings.output.format = OutputFormat::Png;
        settings.output.output_directory = PathBuf::from(format!("output/{}", preset.name()));
        settings.to_file(&path)?;
        println!("Created: {}", path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn check_command(config_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Checking configuration..."));

    let settings = load_settings(&config_path)?;
    settings.validate().context("Configuration validation failed")?;

    let field = settings.initial_field()?;
    println!("{}", FieldFormatter::format_field_summary(&field));
    println!("{}", FieldFormatter::format_parameters(&settings.parameters()));

    if settings.parameters().is_stable() {
        println!("{}", ColorOutput::success("✅ Configuration is valid"));
    } else {
        println!(
            "{}",
            ColorOutput::warning("⚠️  Configuration is valid but the time step is unstable")
        );
    }

    Ok(())
}
