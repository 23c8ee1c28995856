//! # Data Module
//!
//! In-memory representations: the labeled metric matrix and the sample
//! aggregation layer that feeds it.
//!
//! ## Design Philosophy
//! - **One contiguous buffer:** both matrix layouts (dense and packed
//!   triangle) share a single owned `Vec<u16>`; layout is index
//!   arithmetic, not structure.
//! - **Generic labels:** row/column label types are a trait bound
//!   (equality + hashing + codec), not a fixed alias.
//! - **Append-only growth:** labels and sample groups are only ever
//!   added; dimensions are fixed at construction.

pub mod label;
pub mod matrix;
pub mod samples;

pub use label::Label;
pub use matrix::{LabeledMatrix, UNREACHABLE};
pub use samples::{SampleAggregator, SampleGroup, SamplePoint};
