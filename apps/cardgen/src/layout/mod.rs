// Card layout engine.
// Implements: content blocks per record, height estimation, size classification, sheet padding.
// Everything here is pure and synchronous; file I/O lives in `pipeline`.

pub mod classifier;
pub mod content;
pub mod estimator;
pub mod markup;
pub mod paginator;

// Re-export the public API consumed by the pipeline.
pub use classifier::{classify, classify_estimate};
pub use content::{CardLabels, ContentBuilder};
pub use estimator::{estimate, HeightEstimate};
pub use paginator::{paginate, CardCollection, PaginationSummary};
