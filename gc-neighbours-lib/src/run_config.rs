use crate::gc_err::{GcError, Result};
use std::thread;

pub const DEFAULT_GC_DIST_PER: u32 = 95;

pub struct RunConfig {
    pub threads: usize,
    pub gc_dist_per: u32,
    // 0 means the unbinned sequence length is used as window length
    pub fixed_seq_len: usize,
}

pub fn available_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

impl RunConfig {
    /// A thread count of 0 selects every available core.
    pub fn new(threads: usize, gc_dist_per: u32, fixed_seq_len: usize) -> Result<RunConfig> {
        if gc_dist_per > 100 {
            return Err(GcError::Config("percentile must be between 0 and 100"));
        }
        let threads = if threads == 0 {
            available_threads()
        } else {
            threads
        };
        Ok(RunConfig {
            threads,
            gc_dist_per,
            fixed_seq_len,
        })
    }
    pub fn get_device_str(&self) -> String {
        format!("Rust CPU implementation using {} threads", self.threads)
    }
}
