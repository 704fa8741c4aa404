//! hullcad - hull design, meshing and toolpath command line

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hull_brd::LegacyDimensions;
use hull_cam::{plan_outline_mm, CamSettings, DeckRaster, OutlineCut};
use hull_design::{cross_section_at, estimate_volume, write_rib_svg, HullDesign, HullDimensions, SvgOptions};
use hull_mesh::{loft_hull, write_stl, LoftOptions, StlOptions};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_RIB_COUNT: usize = 10_000;

#[derive(Parser)]
#[command(name = "hullcad")]
#[command(about = "Surfboard hull geometry: ribs, meshes, and CNC toolpaths", long_about = None)]
struct Cli {
    /// Log debug detail (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export rib templates as SVG files
    Ribs {
        /// Design parameters (.json) or legacy design (.brd)
        design: PathBuf,
        /// Directory for rib_station_<x>.svg files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Spacing between stations (inches)
        #[arg(long, default_value_t = 12.0)]
        every: f64,
        /// Size each view box to its rib instead of the fixed default
        #[arg(long)]
        fit: bool,
    },
    /// Loft the hull and write a binary STL
    Stl {
        design: PathBuf,
        output: PathBuf,
        /// Number of rib stations from tail to nose
        #[arg(long, default_value_t = 60)]
        stations: usize,
        /// Close the tail and nose
        #[arg(long)]
        caps: bool,
        /// Write facet normals instead of zero normals
        #[arg(long)]
        normals: bool,
    },
    /// Generate a G-code program
    Gcode {
        design: PathBuf,
        output: PathBuf,
        /// Surface the deck instead of cutting the outline
        #[arg(long)]
        deck: bool,
        /// CAM settings (.json); defaults apply to missing keys
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Read a legacy .brd file and print it as JSON
    Import {
        input: PathBuf,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Estimate hull volume
    Volume { design: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ribs {
            design,
            out_dir,
            every,
            fit,
        } => export_ribs(&design, &out_dir, every, fit),
        Commands::Stl {
            design,
            output,
            stations,
            caps,
            normals,
        } => export_stl(&design, &output, stations, caps, normals),
        Commands::Gcode {
            design,
            output,
            deck,
            settings,
        } => export_gcode(&design, &output, deck, settings.as_deref()),
        Commands::Import { input, output } => import_brd(&input, output.as_deref()),
        Commands::Volume { design } => show_volume(&design),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load a design from JSON parameters, or from a legacy file by extension.
fn load_design(path: &Path) -> Result<HullDesign> {
    let is_brd = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("brd"));
    tracing::debug!(path = %path.display(), legacy = is_brd, "loading design");
    let design = if is_brd {
        hull_brd::read_brd(path)?.into_design(HullDimensions::default())?
    } else {
        HullDesign::load(path)?
    };
    Ok(design)
}

fn export_ribs(design: &Path, out_dir: &Path, every: f64, fit: bool) -> Result<()> {
    anyhow::ensure!(every > 0.0, "--every must be positive, got {every}");
    let design = load_design(design).with_context(|| format!("loading {}", design.display()))?;
    std::fs::create_dir_all(out_dir)?;

    anyhow::ensure!(
        design.length() / every <= MAX_RIB_COUNT as f64,
        "--every {every} would export more than {MAX_RIB_COUNT} ribs"
    );
    let stations = rib_stations(design.length(), every);
    for &station in &stations {
        let rib = cross_section_at(&design, station)?;
        let options = if fit {
            SvgOptions::fitted(&rib, 1.0)
        } else {
            SvgOptions::default()
        };
        write_rib_svg(&rib, &options, out_dir.join(rib_file_name(station)))?;
    }
    let count = stations.len();

    println!("Exported {count} ribs of {} to {}", design.name(), out_dir.display());
    Ok(())
}

/// Interior stations `every`, `2 * every`, ... strictly inside `length`.
fn rib_stations(length: f64, every: f64) -> Vec<f64> {
    (1..=MAX_RIB_COUNT)
        .map(|k| every * k as f64)
        .take_while(|&station| station < length)
        .collect()
}

fn rib_file_name(station: f64) -> String {
    format!("rib_station_{station:.2}.svg")
}

fn export_stl(design: &Path, output: &Path, stations: usize, caps: bool, normals: bool) -> Result<()> {
    let design = load_design(design).with_context(|| format!("loading {}", design.display()))?;
    let mesh = loft_hull(&design, stations, &LoftOptions { cap_ends: caps })?;
    let options = StlOptions {
        compute_normals: normals,
        ..StlOptions::default()
    };
    write_stl(&mesh, &options, output).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Exported {} triangles to {}",
        mesh.triangle_count(),
        output.display()
    );
    Ok(())
}

fn export_gcode(design: &Path, output: &Path, deck: bool, settings: Option<&Path>) -> Result<()> {
    let design = load_design(design).with_context(|| format!("loading {}", design.display()))?;
    let settings = match settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CamSettings::from_json_str(&json)?
        }
        None => CamSettings::default(),
    };

    let program = if deck {
        DeckRaster::new(settings)?.generate(&design)?
    } else {
        let outline = plan_outline_mm(&design.outline_polyline());
        OutlineCut::new(settings)?.generate(&outline)?
    };
    program
        .write_to(output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Exported {} motions to {}", program.len(), output.display());
    Ok(())
}

#[derive(Serialize)]
struct ImportSummary<'a> {
    design: &'a hull_brd::LegacyDesign,
    dimensions: LegacyDimensions,
}

fn import_brd(input: &Path, output: Option<&Path>) -> Result<()> {
    let legacy = hull_brd::read_brd(input).with_context(|| format!("reading {}", input.display()))?;
    let summary = ImportSummary {
        design: &legacy,
        dimensions: legacy.dimensions(),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    match output {
        Some(path) => {
            hull_core::write_atomic(path, json.as_bytes())?;
            println!("Imported {} to {}", legacy.name, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn show_volume(design: &Path) -> Result<()> {
    let design = load_design(design).with_context(|| format!("loading {}", design.display()))?;
    let volume = estimate_volume(&design);
    println!(
        "{}: {:.1} cu in ({:.2} L)",
        design.name(),
        volume.cubic_inches,
        volume.litres
    );
    Ok(())
}
