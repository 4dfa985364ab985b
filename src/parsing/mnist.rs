use super::Dataset;
use anyhow::{anyhow, bail, Context, Result};
use ndarray::{Array, Array1, Array2, ArrayView};
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub const NUM_FEATURES: usize = 784;
pub const LINE_SIZE: usize = 785;
pub const IMAGE_HEADER_SIZE: usize = 16;
pub const LABEL_HEADER_SIZE: usize = 8;

/// Discard the header of an IDX stream. Its fields (magic number, item count, dimensions)
/// are not interpreted
fn skip_header<R: Read>(reader: &mut R, size: usize) -> Result<()> {
    let mut header = vec![0u8; size];

    reader
        .read_exact(&mut header)
        .with_context(|| format!("stream ended inside the {}-byte header", size))?;
    debug!(size, "skipped header");

    Ok(())
}

fn truncated(e: std::io::Error, what: &str, idx: usize, count: usize) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow!(
            "stream ended before {} {} of {} (only {} available)",
            what,
            idx,
            count,
            idx
        ),
        _ => anyhow!(e).context(format!("failed to read {} {} of {}", what, idx, count)),
    }
}

/// Read `count` images of NUM_FEATURES pixels from an IDX3 stream.
/// Row i of the result holds the bytes at offset 16 + i*784
pub fn read_images<R: Read>(reader: &mut R, count: usize) -> Result<Array2<u8>> {
    skip_header(reader, IMAGE_HEADER_SIZE)?;

    let mut pixels = vec![0u8; count * NUM_FEATURES];

    for (idx, image) in pixels.chunks_exact_mut(NUM_FEATURES).enumerate() {
        reader
            .read_exact(image)
            .map_err(|e| truncated(e, "image", idx, count))?;
    }
    debug!(count, "read images");

    Ok(Array2::from_shape_vec((count, NUM_FEATURES), pixels)?)
}

/// Read `count` single-byte labels from an IDX1 stream
pub fn read_labels<R: Read>(reader: &mut R, count: usize) -> Result<Array1<u8>> {
    skip_header(reader, LABEL_HEADER_SIZE)?;

    let mut labels = Vec::with_capacity(count);

    reader
        .take(count as u64)
        .read_to_end(&mut labels)
        .map_err(|e| truncated(e, "label", labels.len(), count))?;
    if labels.len() < count {
        bail!(
            "stream ended before label {} of {} (only {} available)",
            labels.len(),
            count,
            labels.len()
        );
    }
    debug!(count, "read labels");

    Ok(Array1::from_vec(labels))
}

/// Parse a record (e.g. CSV record) of the form <x1><sep><x2><sep>...
/// Returns a vector of the xi's if the function was succesful
/// and None otherwise
fn parse_line<'a, T: FromStr, I: Iterator<Item = &'a str>>(fields: I) -> Option<Vec<T>> {
    let mut record = Vec::<T>::new();

    for x in fields {
        match T::from_str(x) {
            Ok(val) => {
                record.push(val);
            }
            _ => return None,
        }
    }

    Some(record)
}

/// Parse a line of a converted file. Return the pixels and the label
/// Line is stored in the format: <pixel0x0>,<pixel0x1>,...,<label>
fn parse_dataset_line(record: &csv::StringRecord) -> Option<(Vec<u8>, u8)> {
    match parse_line::<u8, _>(record.iter()) {
        Some(v) => match v.len() {
            LINE_SIZE => Some((v[..NUM_FEATURES].to_vec(), v[NUM_FEATURES])),
            _ => None,
        },
        _ => None,
    }
}

/// Read a converted CSV file back into a dataset
pub fn parse_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut data = Array::zeros((0, NUM_FEATURES));
    let mut target = Vec::new();

    for (line_no, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read {}", path.display()))?;
        let Some((pixels, label)) = parse_dataset_line(&record) else {
            bail!(
                "{}: line {} is not {} integers in 0..=255",
                path.display(),
                line_no + 1,
                LINE_SIZE
            );
        };

        data.push_row(ArrayView::from(&pixels))?;
        target.push(label);
    }

    Ok(Dataset {
        data,
        target: Array1::from_vec(target),
    })
}
