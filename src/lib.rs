//! # Transit Matrix Library Root
//!
//! ## Role
//! Storage and persistence layer for pairwise travel-time/distance
//! matrices between two labeled location sets, plus the sample
//! aggregation container that deduplicates observations onto unique
//! reference keys before the (external) shortest-path engine runs.
//!
//! ## Module Structure
//! ```text
//! transit_matrix
//! ├── data        # In-memory representations
//! │   ├── matrix  # Labeled matrix store (dense + packed triangle)
//! │   ├── label   # Generic row/col label trait
//! │   └── samples # Sample aggregator (per-reference-key groups)
//! ├── io          # Framed binary codec (Serializer/Deserializer)
//! └── error       # Unified error enum + Result alias
//! ```
//!
//! The path engine, its orchestration, and any host-language bindings
//! live outside this crate; they consume `unique_reference_keys()` from
//! the aggregator and populate the matrix through `set_value_by_id` or
//! `set_row`.

pub mod data;
pub mod error;
pub mod io;

pub use data::{Label, LabeledMatrix, SampleAggregator, SampleGroup, SamplePoint, UNREACHABLE};
pub use error::{MatrixError, Result};
