use ndarray::{Array1, Array2};

pub mod mnist;

/// The records of one split, in file order
#[derive(Debug)]
pub struct Dataset {
    pub data: Array2<u8>,   // One row of pixel intensities per record
    pub target: Array1<u8>, // The label of each record
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// The i-th record as written to the CSV: the pixels followed by the label
    pub fn record(&self, i: usize) -> Vec<u8> {
        let mut record: Vec<u8> = self.data.row(i).to_vec();
        record.push(self.target[i]);

        record
    }

    /// Number of records carrying each label value
    pub fn label_counts(&self) -> [usize; 256] {
        let mut counts = [0usize; 256];

        for label in self.target.iter() {
            counts[*label as usize] += 1;
        }

        counts
    }
}
