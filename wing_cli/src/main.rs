//! # Ribwright CLI
//!
//! Command line front end for `wing_core`:
//!
//! ```text
//! ribwright generate wing.json --out ribs.json --pretty
//! ribwright inspect wing.json
//! ribwright project trainer.rwp --out trainer-ribs.json
//! ```
//!
//! Logs go to stderr (`RUST_LOG` or `-v`/`-vv`); JSON goes to stdout unless
//! `--out` is given.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wing_core::builder::{interpolate, RibGeometry};
use wing_core::config::WingConfig;
use wing_core::file_io::{load_project, project_dir};
use wing_core::resample::ResampleSettings;
use wing_core::wing::Wing;

#[derive(Parser, Debug)]
#[command(name = "ribwright", version, about = "Generate wing rib geometry from parametric wing configs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build every rib of a wing config and emit them as JSON
    Generate {
        /// Wing config (.json)
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Override the resampled upper surface point count
        #[arg(long)]
        upper_points: Option<usize>,

        /// Override the resampled lower surface point count
        #[arg(long)]
        lower_points: Option<usize>,
    },

    /// Print a summary of a wing config
    Inspect {
        /// Wing config (.json)
        config: PathBuf,
    },

    /// Build every wing in a project file
    Project {
        /// Project file (.rwp)
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write JSON here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

/// One wing's ribs in `project` output
#[derive(Serialize)]
struct WingRibs {
    id: String,
    name: String,
    ribs: Vec<RibGeometry>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            config,
            output,
            upper_points,
            lower_points,
        } => generate(&config, &output, upper_points, lower_points),
        Command::Inspect { config } => inspect(&config),
        Command::Project { file, output } => project(&file, &output),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_wing(path: &Path) -> Result<(WingConfig, Wing)> {
    let config = WingConfig::load(path)?;
    let wing = config
        .build(config_dir(path))
        .with_context(|| format!("invalid wing config {}", path.display()))?;
    Ok((config, wing))
}

fn config_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn resolve_settings(base: ResampleSettings, upper: Option<usize>, lower: Option<usize>) -> ResampleSettings {
    ResampleSettings::new(
        upper.unwrap_or(base.upper_points),
        lower.unwrap_or(base.lower_points),
    )
}

fn generate(path: &Path, output: &OutputArgs, upper: Option<usize>, lower: Option<usize>) -> Result<()> {
    let (config, wing) = load_wing(path)?;
    let settings = resolve_settings(config.resampling, upper, lower);
    let ribs = interpolate(&wing, &settings)
        .with_context(|| format!("failed to build ribs for '{}'", wing.name()))?;
    write_json(&ribs, output)
}

fn project(path: &Path, output: &OutputArgs) -> Result<()> {
    let project = load_project(path)?;
    if project.wing_count() == 0 {
        warn!(path = %path.display(), "project has no wings");
    }
    info!(title = %project.meta.title, designer = %project.meta.designer, "building project");

    let base_dir = project_dir(path);
    let mut wings = Vec::with_capacity(project.wing_count());
    for (id, config) in project.wings_sorted() {
        let wing = config
            .build(base_dir)
            .with_context(|| format!("invalid wing '{}' ({})", config.name, id))?;
        let ribs = interpolate(&wing, &config.resampling)
            .with_context(|| format!("failed to build ribs for '{}' ({})", config.name, id))?;
        wings.push(WingRibs {
            id: id.to_string(),
            name: config.name.clone(),
            ribs,
        });
    }
    write_json(&wings, output)
}

fn inspect(path: &Path) -> Result<()> {
    let (_, wing) = load_wing(path)?;
    let mut out = io::stdout().lock();

    writeln!(out, "Wing:      {}", wing.name())?;
    writeln!(out, "Span:      {}", wing.span())?;
    writeln!(out, "Incidence: {}", wing.incidence_angle())?;
    writeln!(out, "Planform:  {}", wing.planform().kind())?;
    writeln!(out, "Area:      {:.0} mm²", wing.area())?;
    writeln!(out, "Aspect:    {:.2}", wing.aspect_ratio())?;
    if wing.shares_airfoil() {
        writeln!(out, "Airfoil:   {}", wing.root_airfoil().name())?;
    } else {
        writeln!(out, "Airfoils:  {} -> {}", wing.root_airfoil().name(), wing.tip_airfoil().name())?;
    }

    writeln!(out)?;
    writeln!(out, "Ribs ({}):", wing.rib_count())?;
    for (index, position) in wing.ribs().iter().enumerate() {
        let chord = wing.chord_at_rib(index).map(|c| c.0).unwrap_or_default();
        writeln!(out, "  {:>3}  at {:>8.2} mm  chord {:>7.2} mm", index, position, chord)?;
    }

    if !wing.spars().is_empty() {
        writeln!(out)?;
        writeln!(out, "Spars ({}):", wing.spars().len())?;
        for (index, spar) in wing.spars().iter().enumerate() {
            writeln!(
                out,
                "  {:>3}  {:<6} ribs {}..={}  offset {:.2} -> {:.2}  {:?}",
                index,
                spar.profile().kind(),
                spar.start_rib(),
                spar.end_rib(),
                spar.start_chord_offset(),
                spar.end_chord_offset(),
                spar.alignment()
            )?;
        }
    }
    Ok(())
}

fn write_json<T: Serialize>(value: &T, output: &OutputArgs) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match &output.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "geometry written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
