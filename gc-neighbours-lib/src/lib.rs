mod base_counts;
mod distributions;
mod gc_err;
mod neighbours;
mod progress;
mod read_fasta;
mod read_gc_dist;
mod result_matrix;
mod run_config;
mod sequence;

pub use crate::base_counts::*;
pub use crate::distributions::*;
pub use crate::gc_err::*;
pub use crate::neighbours::*;
pub use crate::progress::*;
pub use crate::read_fasta::*;
pub use crate::read_gc_dist::*;
pub use crate::result_matrix::*;
pub use crate::run_config::*;
pub use crate::sequence::*;
