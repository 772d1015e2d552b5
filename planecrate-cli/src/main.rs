//! planecrate CLI: detect dominant planes in a LIDAR point export.

mod report;

use anyhow::{anyhow, Context};
use clap::Parser;
use planecrate_algorithms::{MultiPlaneSegmenter, SegmentationConfig};
use planecrate_io::{Delimiter, MalformedRowPolicy, RecordLayout, RecordReader, XyzFileWriter};
use report::{log_summary, PlaneReport};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "planecrate")]
#[command(about = "Iterative multi-plane RANSAC segmentation of labeled 3D point clouds")]
#[command(version)]
struct Cli {
    /// Path to the input point export (delimited text).
    input: PathBuf,

    /// Directory for the out<N>.xyz result files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Points drawn per RANSAC trial (at least 3).
    #[arg(long, default_value = "4")]
    sample_size: usize,

    /// Inlier distance threshold.
    #[arg(long, default_value = "0.05")]
    threshold: f32,

    /// RANSAC trials per plane.
    #[arg(long, default_value = "500")]
    iterations: usize,

    /// Number of planes to detect.
    #[arg(long, default_value = "3")]
    planes: usize,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// The input has no header line.
    #[arg(long)]
    no_header: bool,

    /// Field delimiter of the input.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Fail on malformed rows instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Evaluate RANSAC trials on a single thread.
    #[arg(long)]
    sequential: bool,

    /// File id offset of the per-plane reference inlier sets.
    #[arg(long, default_value = "5")]
    reference_offset: usize,
}

impl Cli {
    fn to_layout(&self) -> anyhow::Result<RecordLayout> {
        let delimiter = Delimiter::from_char(self.delimiter)
            .ok_or_else(|| anyhow!("unsupported delimiter {:?}", self.delimiter))?;

        Ok(RecordLayout {
            has_header: !self.no_header,
            delimiter,
            malformed_rows: if self.strict {
                MalformedRowPolicy::Fail
            } else {
                MalformedRowPolicy::Skip
            },
            ..RecordLayout::default()
        })
    }

    fn to_config(&self) -> SegmentationConfig {
        SegmentationConfig {
            sample_size: self.sample_size,
            distance_threshold: self.threshold,
            iterations: self.iterations,
            plane_count: self.planes,
            seed: self.seed,
            parallel: !self.sequential,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let segmenter = MultiPlaneSegmenter::new(cli.to_config())?;

    let reader = RecordReader::new(cli.to_layout()?);
    let points = reader
        .read_point_set(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    tracing::info!("Starting robust estimation on {} points", points.len());

    let segmentation = segmenter.segment(&points);

    // Reference ids must not collide with the outlier ids 0..planes
    let offset = cli.reference_offset.max(cli.planes);
    if offset != cli.reference_offset {
        tracing::warn!("Reference offset raised to {} to avoid overwriting outlier files", offset);
    }
    let writer = XyzFileWriter::new(&cli.output_dir).with_reference_offset(offset);

    for result in &segmentation.planes {
        let (outliers, reference) = writer
            .write_result(result)
            .with_context(|| format!("failed to write output for plane {}", result.index))?;
        tracing::info!(
            "Wrote {} and {}",
            outliers.display(),
            reference.display()
        );
        PlaneReport::from(result).log();
    }

    log_summary(&segmentation);
    Ok(())
}
