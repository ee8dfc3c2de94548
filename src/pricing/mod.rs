//! Line-item valuation, waste adjustment, and document-level aggregation

pub mod totals;
pub mod valuator;

pub use totals::*;
pub use valuator::*;
