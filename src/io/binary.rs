//! # Framed Binary Codec
//!
//! Raw read/write of scalars, vectors, and nested vectors over a byte stream.
//!
//! Framing:
//! - Scalar: its fixed-width host-native byte representation, nothing else.
//! - Vector: u64 element count, then the raw element bytes back to back.
//! - 2-D vector: u64 outer count, then each inner vector framed as above.
//! - Bool: one byte, 0 or 1.
//! - String: u64 byte length, then the raw UTF-8 bytes.
//!
//! The format is host-native in size and byte order and is not portable
//! across architectures. Any stream failure (open, truncated read, write
//! error) surfaces as `MatrixError::Io` and aborts the operation; there is
//! no partial-record recovery.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use bytemuck::Pod;
use tracing::debug;

use crate::error::Result;

/// Fixed-width value the codec can move through a stream as raw bytes.
///
/// The wire size is `size_of::<T>()` on the host.
pub trait Scalar: Pod {}

impl Scalar for u8 {}
impl Scalar for u16 {}
impl Scalar for u32 {}
impl Scalar for u64 {}
impl Scalar for i32 {}
impl Scalar for i64 {}

/// Write half of the codec. Exclusively owns one output stream, opened at
/// construction and closed on drop.
pub struct Serializer {
    output: BufWriter<File>,
}

impl Serializer {
    /// Create the output file and wrap it in a buffered writer.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            output: BufWriter::new(file),
        })
    }

    /// Write one scalar as its raw host-native bytes.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        self.output.write_all(bytemuck::bytes_of(&value))?;
        Ok(())
    }

    /// Write a u64 count followed by the raw element bytes in one pass.
    pub fn write_vec<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        self.write_scalar(values.len() as u64)?;
        self.output.write_all(bytemuck::cast_slice(values))?;
        Ok(())
    }

    /// Write a u64 outer count followed by each inner vector, framed.
    pub fn write_vec2d<T: Scalar>(&mut self, values: &[Vec<T>]) -> Result<()> {
        self.write_scalar(values.len() as u64)?;
        for inner in values {
            self.write_vec(inner)?;
        }
        Ok(())
    }

    /// Write a bool as a single byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_scalar(value as u8)
    }

    /// Write a string as a u64 byte length plus raw UTF-8 bytes.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_scalar(value.len() as u64)?;
        self.output.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Flush the stream so buffered-write errors become observable.
    pub fn finish(mut self) -> Result<()> {
        self.output.flush()?;
        debug!("serializer flushed");
        Ok(())
    }
}

/// Read half of the codec. Exclusively owns one input stream.
pub struct Deserializer {
    input: BufReader<File>,
}

impl Deserializer {
    /// Open the input file and wrap it in a buffered reader.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            input: BufReader::new(file),
        })
    }

    /// Read one scalar; a truncated stream fails with an I/O error.
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        let mut value = T::zeroed();
        self.input.read_exact(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    /// Read a u64 count, then exactly that many raw elements.
    pub fn read_vec<T: Scalar>(&mut self) -> Result<Vec<T>> {
        let len = self.read_scalar::<u64>()? as usize;
        let mut values = vec![T::zeroed(); len];
        self.input.read_exact(bytemuck::cast_slice_mut(&mut values))?;
        Ok(values)
    }

    /// Read a u64 outer count, then that many framed inner vectors.
    pub fn read_vec2d<T: Scalar>(&mut self) -> Result<Vec<Vec<T>>> {
        let len = self.read_scalar::<u64>()? as usize;
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.read_vec()?);
        }
        Ok(values)
    }

    /// Read a bool byte; anything other than 0 or 1 is a corrupt stream.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_scalar::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid bool byte: {byte}"),
            )
            .into()),
        }
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_vec::<u8>()?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
