//! CLI for Doyle spiral generation.
//!
//! Provides:
//! - SVG rendering (full circles, or arc-group cells with line fills)
//! - Geometry JSON export for downstream meshing

mod render;

use std::fs;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doyle_core::{ArcMode, MeshPayload, Spiral, SpiralParams};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::render::{GroupRenderOptions, RenderConfig};

#[derive(Parser)]
#[command(name = "doyle")]
#[command(about = "Doyle spiral circle packing generator", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderMode {
    /// Every visible circle, unmodified.
    Doyle,
    /// Arc-group cells with optional line fills.
    #[value(name = "arram_boyle")]
    ArramBoyle,
}

#[derive(Args, Debug)]
struct SpiralArgs {
    /// First spiral family parameter
    #[arg(short, long, default_value = "16")]
    p: i64,

    /// Number of spiral families (must be >= 2)
    #[arg(short, long, default_value = "16")]
    q: i64,

    /// Rotation parameter
    #[arg(short, long, default_value = "0")]
    t: f64,

    /// Outer generation bound
    #[arg(long, default_value = "2000")]
    max_d: f64,

    /// Arc selection mode (closest, farthest, alternating, all, random, symmetric, angular)
    #[arg(long, default_value = "closest", value_parser = ArcMode::from_str)]
    arc_mode: ArcMode,

    /// Number of arcs to drop per circle
    #[arg(long, default_value = "2")]
    num_gaps: usize,

    /// Seed for the random arc mode
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a spiral to SVG
    Render {
        #[command(flatten)]
        spiral: SpiralArgs,

        /// Rendering mode
        #[arg(short, long, value_enum, default_value = "doyle")]
        mode: RenderMode,

        /// Canvas size in pixels
        #[arg(long, default_value = "800")]
        size: f64,

        /// Clip parallel hatch lines into each cell
        #[arg(long)]
        fill: bool,

        /// Hatch line spacing in pixels
        #[arg(long, default_value = "5.0")]
        fill_spacing: f64,

        /// Per-ring hatch rotation increment, degrees
        #[arg(long, default_value = "0")]
        fill_angle: f64,

        /// Inward inset before clipping hatch lines, pixels
        #[arg(long, default_value = "0")]
        fill_offset: f64,

        /// Skip drawing cell outlines
        #[arg(long)]
        no_outline: bool,

        /// Fill each cell with a deterministic debug color
        #[arg(long)]
        debug_groups: bool,

        /// Draw closure arcs in red
        #[arg(long)]
        red_outline: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export arc-group geometry as JSON
    Mesh {
        #[command(flatten)]
        spiral: SpiralArgs,

        /// Per-ring angle increment baked into the payload, degrees
        #[arg(long, default_value = "0")]
        fill_angle: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn build_spiral(args: &SpiralArgs) -> Result<Spiral> {
    let mut spiral = Spiral::new(SpiralParams {
        p: args.p,
        q: args.q,
        t: args.t,
        max_d: args.max_d,
        arc_mode: args.arc_mode,
        num_gaps: args.num_gaps,
    })
    .context("failed to solve spiral system")?;
    spiral.generate();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    spiral.assemble_groups(&mut rng);
    log::info!(
        "spiral p={} q={}: {} visible circles, {} groups",
        args.p,
        args.q,
        spiral.visible_circles().len(),
        spiral.groups.len(),
    );
    Ok(spiral)
}

fn emit(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content).with_context(|| format!("writing {}", path))?,
        None => print!("{}", content),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(doyle_core::parse_log_level(cli.log_level.as_deref()))
        .init();

    match cli.command {
        Commands::Render {
            spiral,
            mode,
            size,
            fill,
            fill_spacing,
            fill_angle,
            fill_offset,
            no_outline,
            debug_groups,
            red_outline,
            output,
        } => {
            let spiral = build_spiral(&spiral)?;
            let config = RenderConfig {
                size,
                ..Default::default()
            };
            let svg = match mode {
                RenderMode::Doyle => render::render_circles(&spiral, &config),
                RenderMode::ArramBoyle => {
                    let opts = GroupRenderOptions {
                        add_fill_pattern: fill,
                        fill_spacing,
                        fill_angle,
                        fill_offset,
                        draw_group_outline: !no_outline,
                        debug_groups,
                        red_outline,
                    };
                    render::render_groups(&spiral, &config, &opts)?
                }
            };
            emit(&svg, output.as_deref())?;
        }
        Commands::Mesh {
            spiral,
            fill_angle,
            output,
        } => {
            let spiral = build_spiral(&spiral)?;
            let payload = MeshPayload::from_spiral(&spiral, fill_angle);
            let json = serde_json::to_string_pretty(&payload)?;
            emit(&json, output.as_deref())?;
        }
    }
    Ok(())
}
