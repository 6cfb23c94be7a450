//! Intersect CLI
//!
//! Reads shapes from a file or stdin and prints every intersecting pair.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use octree_intersect::io::{read_shapes, write_indices};
use octree_intersect::octree::LevelHistogram;
use octree_intersect::{Intersector, IntersectorConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shape file: a count n followed by n groups of nine coordinates. Reads stdin if omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upper bound for the octree height, overrides the configuration
    #[arg(long)]
    max_height: Option<usize>,

    /// Print the sorted indices of intersecting shapes instead of pairs
    #[arg(long)]
    indices: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => IntersectorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IntersectorConfig::default(),
    };
    if let Some(max_height) = args.max_height {
        config.max_height = max_height;
    }
    debug!("configuration: {config:?}");

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let shapes = read_shapes(reader, config.epsilon).context("failed to read shapes")?;
    info!("read {} shapes", shapes.len());

    let mut intersector = Intersector::with_config(shapes, &config).context("failed to build octree")?;

    let mut histogram = LevelHistogram::new();
    intersector.octree().traverse_depth_first(&mut histogram);
    debug!("shapes per level: {:?}", histogram.counts());

    let found = intersector.intersect_all().len();
    info!(
        "{found} intersecting pairs from {} candidates",
        intersector.candidate_count()
    );

    let out = BufWriter::new(io::stdout().lock());
    if args.indices {
        write_indices(intersector.intersecting_indices(), out)
    } else {
        intersector.write_pairs(out)
    }
    .context("failed to write results")?;

    Ok(())
}
