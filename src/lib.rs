// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod batch;
pub mod cli;
pub mod config;
pub mod export;
pub mod fields;
pub mod filter;
pub mod ingest;
pub mod normalize;
pub mod record;

// ---- Re-exports for stable public API ----
pub use crate::batch::{process, process_detailed, BatchOutcome};
pub use crate::export::OutputFormat;
pub use crate::filter::{matches, FilterConfig};
pub use crate::normalize::normalize;
pub use crate::record::{CanonicalRecord, RawRecord, RelatedSymbol, Urgency};
