//! # I/O Module
//!
//! Stream-level persistence boundaries. Converts between on-disk byte
//! streams and the in-memory `LabeledMatrix` representation.

pub mod binary;

pub use binary::{Deserializer, Scalar, Serializer};
