mod app_dir;
mod config;
mod error;
mod naming;
mod progress;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use fractales_core::{Complex, IterationMap, Julia, JuliaMap, MandelbrotMap, Region};
use fractales_render::{builtin_palettes, FieldRequest};

use config::Config;
use error::CliError;
use render::{render_to_file, Outcome};

type Result<T> = std::result::Result<T, CliError>;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "fractales", version)]
#[command(about = "Escape-time renders of Mandelbrot and Julia sets under a catalog of maps")]
struct Cli {
    /// Configuration file (default: fractales.json next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rendered images
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Color palette name
    #[arg(long, global = true)]
    palette: Option<String>,

    /// Worker threads, 0 for all cores
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Recompute even if the image already exists
    #[arg(long, global = true)]
    force: bool,

    /// Write the effective configuration back to the config file
    #[arg(long, global = true)]
    save_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a Mandelbrot-mode field (c varies per pixel)
    Mandelbrot {
        /// Map id or name, see `fractales maps`
        #[arg(long, default_value = "0")]
        map: MandelbrotMap,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a Julia-mode field for a fixed c
    Julia {
        /// Map id or name, see `fractales maps`
        #[arg(long, default_value = "0")]
        map: JuliaMap,

        /// Real part of c
        #[arg(long, allow_negative_numbers = true)]
        re: Option<f64>,

        /// Imaginary part of c
        #[arg(long, allow_negative_numbers = true)]
        im: Option<f64>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// List the iteration map catalogs and palettes
    Maps,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Grid resolution n
    #[arg(short = 'n', long)]
    resolution: Option<u32>,

    /// Iteration budget k
    #[arg(short = 'k', long)]
    iterations: Option<u32>,

    /// Exponent m
    #[arg(short = 'm', long)]
    exponent: Option<u32>,

    /// Real range as MIN,MAX
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    x: Option<(f64, f64)>,

    /// Imaginary range as MIN,MAX
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    y: Option<(f64, f64)>,
}

fn parse_range(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{s}'"))?;
    let lo: f64 = lo.trim().parse().map_err(|e| format!("bad minimum '{lo}': {e}"))?;
    let hi: f64 = hi.trim().parse().map_err(|e| format!("bad maximum '{hi}': {e}"))?;
    Ok((lo, hi))
}

impl RenderArgs {
    fn region(&self, default: Region) -> Result<Region> {
        let x = self.x.unwrap_or((default.x_min, default.x_max));
        let y = self.y.unwrap_or((default.y_min, default.y_max));
        Ok(Region::new(x, y)?)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(app_dir::config_path);
    let mut config = Config::load(&config_path);
    if let Some(palette) = cli.palette {
        config.palette = palette;
    }
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(dir) = cli.out_dir {
        config.output_dir = Some(dir);
    }
    if cli.save_config {
        config.save(&config_path)?;
    }

    let request = match cli.command {
        Command::Maps => {
            print_catalogs();
            return Ok(());
        }
        Command::Mandelbrot { map, render } => FieldRequest::Mandelbrot {
            region: render.region(Region::default_mandelbrot())?,
            resolution: render.resolution.unwrap_or(config.default_resolution),
            iterations: render.iterations.unwrap_or(config.default_iterations),
            map,
            exponent: render.exponent.unwrap_or(config.default_exponent),
        },
        Command::Julia {
            map,
            re,
            im,
            render,
        } => {
            let default_c = Julia::default_c();
            FieldRequest::Julia {
                region: render.region(Region::default_julia())?,
                resolution: render.resolution.unwrap_or(config.default_resolution),
                iterations: render.iterations.unwrap_or(config.default_iterations),
                map,
                exponent: render.exponent.unwrap_or(config.default_exponent),
                c: Complex::new(re.unwrap_or(default_c.re), im.unwrap_or(default_c.im)),
            }
        }
    };

    let outcome = render_to_file(&request, &config, cli.force)?;
    if let Outcome::Cached(_) = outcome {
        info!("Pass --force to recompute");
    }
    println!("{}", outcome.path().display());
    Ok(())
}

fn print_catalogs() {
    println!("Mandelbrot maps:");
    for map in MandelbrotMap::ALL {
        println!("  {:>2}  {:<16} {}", map.id(), map.slug(), map.formula());
    }
    println!("Julia maps:");
    for map in JuliaMap::ALL {
        println!("  {:>2}  {:<16} {}", map.id(), map.slug(), map.formula());
    }
    let names: Vec<_> = builtin_palettes().iter().map(|p| p.name).collect();
    println!("Palettes: {}", names.join(", "));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
