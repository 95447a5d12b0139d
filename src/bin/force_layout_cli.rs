//! Thin CLI front-end: pick a generator or a graph file, run the engine
//! to stability or for a fixed iteration count, and write positions out.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use force_layout3d::config::LayoutConfig;
use force_layout3d::engine::Layout;
use force_layout3d::formats::{binary, json};
use force_layout3d::generation;
use force_layout3d::graph::Graph;
use log::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Generator {
    Line,
    Circle,
    Grid2d,
    Grid3d,
    King,
    WattsStrogatz,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Binary,
}

/// Force-directed 3D graph layout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read the graph from a D3-style JSON file instead of generating one.
    #[arg(long, conflicts_with = "generator")]
    graph_file: Option<PathBuf>,

    /// Built-in generator to use when `--graph-file` isn't given.
    #[arg(long, value_enum, default_value_t = Generator::Grid2d)]
    generator: Generator,

    /// Node count passed to the chosen generator.
    #[arg(long, default_value_t = 100)]
    nodes: usize,

    /// Derive repelling/spring/drag coefficients from graph size instead
    /// of using the defaults.
    #[arg(long)]
    auto_config: bool,

    /// Run exactly this many iterations instead of running to stability.
    #[arg(long)]
    iterations: Option<usize>,

    /// Output format for the resulting positions.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write positions here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn build_graph(args: &Args) -> Result<Graph, Box<dyn std::error::Error>> {
    if let Some(path) = &args.graph_file {
        let text = fs::read_to_string(path)?;
        return Ok(json::graph_from_json(&text)?);
    }

    let n = args.nodes;
    let graph = match args.generator {
        Generator::Line => generation::line(n)?,
        Generator::Circle => generation::circle(n)?,
        Generator::Grid2d => {
            let side = (n as f64).sqrt().round().max(1.0) as usize;
            generation::grid_2d(side, side)?
        }
        Generator::Grid3d => {
            let side = (n as f64).cbrt().round().max(1.0) as usize;
            generation::grid_3d(side, side, side)?
        }
        Generator::King => {
            let side = (n as f64).sqrt().round().max(1.0) as usize;
            generation::king(side, side)?
        }
        Generator::WattsStrogatz => {
            let mut rng = rand::rng();
            generation::watts_strogatz(n, 4, 0.1, &mut rng)?
        }
    };
    Ok(graph)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let graph = build_graph(&args)?;
    info!("built graph: {} nodes, {} links", graph.nodes().len(), graph.links().len());

    let config = if args.auto_config {
        LayoutConfig::estimate(graph.nodes().len(), graph.links().len())?
    } else {
        LayoutConfig::default()
    };

    let mut layout = Layout::new(graph, config)?;

    let energy = match args.iterations {
        Some(n) => layout.calculate_n(n)?,
        None => layout.calculate()?,
    };
    info!("final energy: {energy}");

    let positions = layout.positions();
    let output = match args.format {
        OutputFormat::Json => json::positions_to_json(&positions)?.into_bytes(),
        OutputFormat::Binary => binary::positions_to_bytes(&positions)?,
    };

    match &args.out {
        Some(path) => fs::write(path, output)?,
        None => {
            use std::io::Write as _;
            std::io::stdout().write_all(&output)?;
        }
    }

    Ok(())
}
