//! Command-line driver: builds a row of shelves and writes them as STL.
//!
//! ```text
//! rackshelf --width 2 --height 4 --depth 1 --output shelf.stl
//! rackshelf --count 3 --binary --verify
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rackshelf::io::stl::{self, StlFormat, StlOptions};
use rackshelf::operations::assembly::{ShelfLayout, ShelfPanels};
use rackshelf::operations::query::{BoundingBox, IsWatertight};
use rackshelf::ShelfConfig;
use tracing::{info, warn};

/// Generate finger-jointed rack shelf panels as an STL mesh.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Shelf width in width units (half a 19" rack each).
    #[arg(long, default_value_t = 1)]
    width: u32,

    /// Shelf height in rack units.
    #[arg(long, default_value_t = 6)]
    height: u32,

    /// Shelf depth in depth units.
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Number of shelves to lay out side by side.
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// x position of the first shelf.
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Output file.
    #[arg(long, default_value = "out.stl")]
    output: PathBuf,

    /// Write binary instead of ASCII STL.
    #[arg(long)]
    binary: bool,

    /// Gap between consecutive shelves in millimeters [default: thickness].
    #[arg(long)]
    spacing: Option<f64>,

    /// Factor applied to every vertex on output.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Material thickness in millimeters.
    #[arg(long)]
    thickness: Option<f64>,

    /// Depth of one depth unit in millimeters.
    #[arg(long)]
    unit_depth: Option<f64>,

    /// Width of one width unit in millimeters.
    #[arg(long)]
    unit_width: Option<f64>,

    /// Height of one height unit in millimeters.
    #[arg(long)]
    unit_height: Option<f64>,

    /// Foot depth in millimeters.
    #[arg(long)]
    foot_depth: Option<f64>,

    /// Number of teeth along each edge of the top panel.
    #[arg(long)]
    teeth: Option<u32>,

    /// Check every panel for holes and overlaps before writing.
    #[arg(long)]
    verify: bool,
}

impl Args {
    fn config(&self) -> ShelfConfig {
        let mut config = ShelfConfig::default();
        if let Some(thickness) = self.thickness {
            config = config.with_material_thickness(thickness);
        }
        if let Some(unit_depth) = self.unit_depth {
            config = config.with_unit_depth(unit_depth);
        }
        if let Some(unit_width) = self.unit_width {
            config = config.with_unit_width(unit_width);
        }
        if let Some(unit_height) = self.unit_height {
            config = config.with_unit_height(unit_height);
        }
        if let Some(foot_depth) = self.foot_depth {
            config = config.with_foot_depth(foot_depth);
        }
        if let Some(teeth) = self.teeth {
            config = config.with_top_tooth_count(teeth);
        }
        config
    }
}

/// Counts panels that leak or overlap another panel along x.
fn verify(shelves: &[ShelfPanels]) -> usize {
    let mut problems = 0;
    let mut extents = Vec::new();
    for (shelf, panels) in shelves.iter().enumerate() {
        for (name, mesh) in panels.named() {
            let report = IsWatertight::new(mesh).execute();
            if !report.is_watertight() {
                warn!(shelf, panel = name, ?report, "panel is not watertight");
                problems += 1;
            }
            if let Some(aabb) = BoundingBox::new(mesh).execute() {
                extents.push((shelf, name, aabb));
            }
        }
    }
    for (i, (shelf, name, aabb)) in extents.iter().enumerate() {
        for (other_shelf, other, other_aabb) in &extents[i + 1..] {
            if aabb.overlaps_x(other_aabb) {
                warn!(shelf, panel = name, other_shelf, other, "panels overlap");
                problems += 1;
            }
        }
    }
    problems
}

fn main() -> anyhow::Result<()> {
    // Default: WARN for everything, INFO for rackshelf.
    // Override with RUST_LOG (e.g. RUST_LOG=rackshelf=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("rackshelf=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let options = StlOptions {
        scale: args.scale,
        ..StlOptions::default()
    };
    if options.validate().is_err() {
        bail!("--scale must be finite and greater than zero, got {}", args.scale);
    }

    let config = args.config();
    let mut layout = ShelfLayout::new(
        &config,
        args.offset,
        args.count,
        args.width,
        args.height,
        args.depth,
    );
    if let Some(spacing) = args.spacing {
        layout = layout.with_spacing(spacing);
    }

    let shelves = layout.build_panels()?;
    if args.verify {
        let problems = verify(&shelves);
        if problems > 0 {
            bail!("{problems} panel check(s) failed");
        }
        info!("all panels watertight and disjoint");
    }

    let mesh = ShelfLayout::concatenate(shelves);
    let format = if args.binary {
        StlFormat::Binary
    } else {
        StlFormat::Ascii
    };
    stl::save(&mesh, &args.output, &options, format)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
