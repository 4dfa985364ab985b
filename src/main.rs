pub mod convert;
pub mod parsing;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Convert the MNIST IDX files in the working directory into train.csv and test.csv
/// Each line holds the 784 pixels of an image followed by its label
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

/// One dataset split and the files it is converted between
struct Split {
    name: &'static str,
    image_path: &'static str,
    label_path: &'static str,
    output_path: &'static str,
    count: usize,
}

const SPLITS: [Split; 2] = [
    Split {
        name: "train",
        image_path: "train-images-idx3-ubyte",
        label_path: "train-labels-idx1-ubyte",
        output_path: "train.csv",
        count: 60000,
    },
    Split {
        name: "test",
        image_path: "t10k-images-idx3-ubyte",
        label_path: "t10k-labels-idx1-ubyte",
        output_path: "test.csv",
        count: 10000,
    },
];

fn init_logging() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<()> {
    let _args = Args::parse();
    init_logging();

    for split in SPLITS.iter() {
        info!(split = split.name, count = split.count, "converting");

        convert::convert(
            Path::new(split.image_path),
            Path::new(split.label_path),
            Path::new(split.output_path),
            split.count,
        )?;
    }

    Ok(())
}
