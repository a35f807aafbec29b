use crate::gc_err::{GcError, Result};

/// Neighbour rows addressed by sequence index. Only the collector thread
/// writes into it; it is read back once that thread has finished.
pub struct ResultMatrix {
    rows: Vec<Option<Vec<u8>>>,
}

impl ResultMatrix {
    pub fn new(n_seqs: usize) -> ResultMatrix {
        ResultMatrix {
            rows: (0..n_seqs).map(|_| None).collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn set(&mut self, index: usize, row: Vec<u8>) {
        self.rows[index] = Some(row);
    }
    pub fn is_set(&self, index: usize) -> bool {
        self.rows[index].is_some()
    }
    pub fn into_rows(self) -> Result<Vec<Vec<u8>>> {
        self.rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| row.ok_or(GcError::MissingRow(idx)))
            .collect()
    }
}
