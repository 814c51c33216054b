//! inkline-filter - Noise suppression
//!
//! - Majority (vote) filtering of binarized pages ([`rank`])

mod error;
pub mod rank;

pub use error::{FilterError, FilterResult};

pub use rank::{black_vote_accum, majority_filter};
