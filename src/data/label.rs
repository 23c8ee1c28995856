//! # Matrix Label Types
//!
//! Row and column labels are generic: a census tract number, a block-group
//! string id, anything that can be hashed, compared, printed into a CSV
//! cell, and moved through the binary codec. This trait pins down exactly
//! that capability set instead of duck typing.

use std::fmt::Display;
use std::hash::Hash;

use crate::error::Result;
use crate::io::{Deserializer, Serializer};

/// A matrix row or column label.
///
/// `Eq + Hash` backs the label→location maps, `Display` backs CSV export,
/// and the two codec hooks back binary persistence.
pub trait Label: Clone + Eq + Hash + Display {
    /// Write this label to the binary stream.
    fn encode(&self, ser: &mut Serializer) -> Result<()>;

    /// Read one label back from the binary stream.
    fn decode(de: &mut Deserializer) -> Result<Self>;
}

macro_rules! scalar_label {
    ($($t:ty),*) => {
        $(
            impl Label for $t {
                fn encode(&self, ser: &mut Serializer) -> Result<()> {
                    ser.write_scalar(*self)
                }

                fn decode(de: &mut Deserializer) -> Result<Self> {
                    de.read_scalar()
                }
            }
        )*
    };
}

scalar_label!(u16, u32, u64, i32, i64);

impl Label for String {
    fn encode(&self, ser: &mut Serializer) -> Result<()> {
        ser.write_str(self)
    }

    fn decode(de: &mut Deserializer) -> Result<Self> {
        de.read_string()
    }
}

/// Write a label sequence: u64 count, then each label in its own framing.
pub(crate) fn encode_labels<L: Label>(labels: &[L], ser: &mut Serializer) -> Result<()> {
    ser.write_scalar(labels.len() as u64)?;
    for label in labels {
        label.encode(ser)?;
    }
    Ok(())
}

/// Read a label sequence written by `encode_labels`.
pub(crate) fn decode_labels<L: Label>(de: &mut Deserializer) -> Result<Vec<L>> {
    let len = de.read_scalar::<u64>()? as usize;
    let mut labels = Vec::with_capacity(len);
    for _ in 0..len {
        labels.push(L::decode(de)?);
    }
    Ok(labels)
}
