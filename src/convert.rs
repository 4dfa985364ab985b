use crate::parsing::{mnist, Dataset};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Write every record of the dataset as one CSV line, pixels first and the label last
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for idx in 0..dataset.len() {
        writer.write_record(dataset.record(idx).iter().map(|x| x.to_string()))?;
    }

    writer.flush()?;

    Ok(())
}

/// Convert `count` records of an MNIST image/label file pair into a CSV file.
/// The output is created (or truncated) up front and only written once every record was read
pub fn convert(image_path: &Path, label_path: &Path, output_path: &Path, count: usize) -> Result<()> {
    let mut images = BufReader::new(
        File::open(image_path).with_context(|| format!("failed to open {}", image_path.display()))?,
    );
    let mut labels = BufReader::new(
        File::open(label_path).with_context(|| format!("failed to open {}", label_path.display()))?,
    );
    let output = File::create(output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;

    let dataset = Dataset {
        data: mnist::read_images(&mut images, count)
            .with_context(|| format!("failed to read images from {}", image_path.display()))?,
        target: mnist::read_labels(&mut labels, count)
            .with_context(|| format!("failed to read labels from {}", label_path.display()))?,
    };
    debug!(records = dataset.len(), "dataset loaded");

    write_dataset(&dataset, output)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let distribution: Vec<String> = dataset
        .label_counts()
        .iter()
        .enumerate()
        .filter(|(_, n)| **n > 0)
        .map(|(label, n)| format!("{}:{}", label, n))
        .collect();

    info!(
        output = %output_path.display(),
        records = dataset.len(),
        labels = %distribution.join(" "),
        "wrote csv"
    );

    Ok(())
}
