mod base;
mod enrichment;
mod extraction;

pub use base::*;
pub use enrichment::*;
pub use extraction::*;
