mod correlation;
mod dataset;
mod metric;
mod parser;
mod record;
mod stats;

pub use correlation::*;
pub use dataset::*;
pub use metric::*;
pub use parser::*;
pub use record::*;
pub use stats::*;

// Types for more general type-safety
pub type Float = f64;

/// The competitive game modes that make up the "ranked" selection
pub const RANKED_MODES: [&str; 3] = ["Hardpoint", "Control", "Search and Destroy"];
