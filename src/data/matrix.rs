//! # Labeled Matrix Store
//!
//! A pandas-like labeled matrix of 16-bit metric values (travel times,
//! distances) between a row location set and a column location set.
//!
//! ## Storage Layouts
//! Two layouts share one contiguous `Vec<u16>` buffer:
//!
//! - **Dense:** row-major `rows * cols` cells.
//! - **Packed triangle:** for a square symmetric matrix, one slot per
//!   unordered pair — `n(n+1)/2` cells holding only the upper triangle.
//!   Reads and writes below the diagonal swap to the mirrored cell, so
//!   `value(r, c) == value(c, r)` holds by construction.
//!
//! The packed index is recomputed from the packing formula on every
//! access, never cached per cell.
//!
//! ## Labels
//! Labels are assigned insertion order = location index, with a
//! label→location map per axis. Id-based accessors resolve through the
//! maps and delegate to the location-based accessors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::data::label::{decode_labels, encode_labels, Label};
use crate::error::{MatrixError, Result};
use crate::io::{Deserializer, Serializer};

/// Sentinel cell value: not yet computed, or unreachable.
pub const UNREACHABLE: u16 = u16::MAX;

/// Labeled (row, col) → u16 metric store with dense and packed-symmetric
/// layouts.
#[derive(Clone, Debug)]
pub struct LabeledMatrix<R: Label, C: Label> {
    compressible: bool,
    symmetric: bool,
    rows: usize,
    cols: usize,
    row_labels: Vec<R>,
    col_labels: Vec<C>,
    row_index: HashMap<R, usize>,
    col_index: HashMap<C, usize>,
    /// Contiguous cell storage: `rows * cols` dense, `n(n+1)/2` packed.
    values: Vec<u16>,
}

impl<R: Label, C: Label> LabeledMatrix<R, C> {
    /// Construct with final dimensions; every cell starts at the sentinel.
    ///
    /// For compressible stores `cols` is forced to `rows` and storage
    /// holds only the upper triangle. Dimensions are fixed for the
    /// lifetime of the value; there is no resizing API.
    pub fn new(compressible: bool, symmetric: bool, rows: usize, cols: usize) -> Self {
        let (cols, storage_len) = if compressible {
            (rows, rows * (rows + 1) / 2)
        } else {
            (cols, rows * cols)
        };
        Self {
            compressible,
            symmetric,
            rows,
            cols,
            row_labels: Vec::with_capacity(rows),
            col_labels: Vec::with_capacity(cols),
            row_index: HashMap::with_capacity(rows),
            col_index: HashMap::with_capacity(cols),
            values: vec![UNREACHABLE; storage_len],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether this store uses the packed-triangle layout.
    pub fn is_compressible(&self) -> bool {
        self.compressible
    }

    /// Whether the metric itself is symmetric (metadata; an uncompressed
    /// store may still hold a symmetric metric).
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Total number of storage slots (not rows * cols when packed).
    pub fn storage_len(&self) -> usize {
        self.values.len()
    }

    // ------------------------------------------------------------------
    // Label registration
    // ------------------------------------------------------------------

    /// Append a row label, returning its assigned location.
    /// A duplicate label re-points the map at the new location.
    pub fn add_row_label(&mut self, label: R) -> usize {
        let loc = self.row_labels.len();
        self.row_index.insert(label.clone(), loc);
        self.row_labels.push(label);
        loc
    }

    /// Append a column label, returning its assigned location.
    pub fn add_col_label(&mut self, label: C) -> usize {
        let loc = self.col_labels.len();
        self.col_index.insert(label.clone(), loc);
        self.col_labels.push(label);
        loc
    }

    /// Bulk-assign the full row label sequence to locations `0..rows`,
    /// rebuilding the map. The sequence must hold exactly `rows` labels;
    /// anything shorter or longer is a dimension mismatch.
    pub fn set_row_labels(&mut self, labels: &[R]) -> Result<()> {
        if labels.len() != self.rows {
            return Err(MatrixError::dimension_mismatch(format!(
                "{} row labels supplied for {} rows",
                labels.len(),
                self.rows
            )));
        }
        self.row_labels = labels.to_vec();
        self.row_index = labels
            .iter()
            .enumerate()
            .map(|(loc, label)| (label.clone(), loc))
            .collect();
        Ok(())
    }

    /// Bulk-assign the full column label sequence to locations `0..cols`.
    pub fn set_col_labels(&mut self, labels: &[C]) -> Result<()> {
        if labels.len() != self.cols {
            return Err(MatrixError::dimension_mismatch(format!(
                "{} col labels supplied for {} cols",
                labels.len(),
                self.cols
            )));
        }
        self.col_labels = labels.to_vec();
        self.col_index = labels
            .iter()
            .enumerate()
            .map(|(loc, label)| (label.clone(), loc))
            .collect();
        Ok(())
    }

    /// Registered row labels, in location order.
    pub fn row_labels(&self) -> &[R] {
        &self.row_labels
    }

    /// Registered column labels, in location order.
    pub fn col_labels(&self) -> &[C] {
        &self.col_labels
    }

    /// Label at a row location.
    pub fn row_label_at(&self, loc: usize) -> Result<&R> {
        self.row_labels
            .get(loc)
            .ok_or_else(|| MatrixError::index(format!("row loc {loc} out of range")))
    }

    /// Label at a column location.
    pub fn col_label_at(&self, loc: usize) -> Result<&C> {
        self.col_labels
            .get(loc)
            .ok_or_else(|| MatrixError::index(format!("col loc {loc} out of range")))
    }

    /// Location of a registered row label.
    pub fn loc_of_row(&self, label: &R) -> Result<usize> {
        self.row_index
            .get(label)
            .copied()
            .ok_or_else(|| MatrixError::key_not_found(format!("row label {label}")))
    }

    /// Location of a registered column label.
    pub fn loc_of_col(&self, label: &C) -> Result<usize> {
        self.col_index
            .get(label)
            .copied()
            .ok_or_else(|| MatrixError::key_not_found(format!("col label {label}")))
    }

    /// Whether both labels are registered (non-error membership probe).
    pub fn contains_labels(&self, row: &R, col: &C) -> bool {
        self.row_index.contains_key(row) && self.col_index.contains_key(col)
    }

    // ------------------------------------------------------------------
    // Cell access
    // ------------------------------------------------------------------

    /// Packed-triangle slot for an on-or-above-diagonal (row, col) pair.
    ///
    /// With `row_delta = rows - row`, the slots for rows `row..` form the
    /// tail of the buffer, so the pair lands at
    /// `len - row_delta(row_delta+1)/2 + (col - row)`.
    fn packed_index(&self, row: usize, col: usize) -> usize {
        let row_delta = self.rows - row;
        self.values.len() - row_delta * (row_delta + 1) / 2 + (col - row)
    }

    fn storage_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::index(format!(
                "({row}, {col}) out of range for {}x{} matrix",
                self.rows, self.cols
            )));
        }
        if self.compressible {
            // Below the diagonal, read the mirrored slot.
            let (row, col) = if row > col { (col, row) } else { (row, col) };
            Ok(self.packed_index(row, col))
        } else {
            Ok(row * self.cols + col)
        }
    }

    /// Read the cell at a (row, col) location.
    pub fn value_at(&self, row: usize, col: usize) -> Result<u16> {
        Ok(self.values[self.storage_index(row, col)?])
    }

    /// Write the cell at a (row, col) location. For the packed layout this
    /// is the single slot shared with (col, row).
    pub fn set_value_at(&mut self, row: usize, col: usize, value: u16) -> Result<()> {
        let index = self.storage_index(row, col)?;
        self.values[index] = value;
        Ok(())
    }

    /// Read a cell through its row and column labels.
    pub fn value_by_id(&self, row: &R, col: &C) -> Result<u16> {
        let row_loc = self.loc_of_row(row)?;
        let col_loc = self.loc_of_col(col)?;
        self.value_at(row_loc, col_loc)
    }

    /// Write a cell through its row and column labels.
    pub fn set_value_by_id(&mut self, row: &R, col: &C, value: u16) -> Result<()> {
        let row_loc = self.loc_of_row(row)?;
        let col_loc = self.loc_of_col(col)?;
        self.set_value_at(row_loc, col_loc, value)
    }

    /// All (column label, value) pairs for one row, optionally sorted
    /// ascending by value. The sort is stable: ties keep location order.
    pub fn row_values(&self, row: &R, sort: bool) -> Result<Vec<(C, u16)>> {
        let row_loc = self.loc_of_row(row)?;
        let mut pairs = Vec::with_capacity(self.cols);
        for col_loc in 0..self.cols {
            pairs.push((
                self.col_label_at(col_loc)?.clone(),
                self.value_at(row_loc, col_loc)?,
            ));
        }
        if sort {
            pairs.sort_by_key(|&(_, value)| value);
        }
        Ok(pairs)
    }

    /// All (row label, value) pairs for one column, optionally sorted
    /// ascending by value.
    pub fn col_values(&self, col: &C, sort: bool) -> Result<Vec<(R, u16)>> {
        let col_loc = self.loc_of_col(col)?;
        let mut pairs = Vec::with_capacity(self.rows);
        for row_loc in 0..self.rows {
            pairs.push((
                self.row_label_at(row_loc)?.clone(),
                self.value_at(row_loc, col_loc)?,
            ));
        }
        if sort {
            pairs.sort_by_key(|&(_, value)| value);
        }
        Ok(pairs)
    }

    /// Bulk-replace one row's worth of values.
    ///
    /// Dense layout: `row_data` must hold `cols` values and replaces the
    /// row in place. Packed layout: `row_data` must hold the `rows - row`
    /// remaining triangle entries for this row, written starting at the
    /// slot for `(row, row)`.
    pub fn set_row(&mut self, row_data: &[u16], row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MatrixError::index(format!(
                "row {row} exceeds {} rows",
                self.rows
            )));
        }
        if self.compressible {
            let expected = self.rows - row;
            if row_data.len() != expected {
                return Err(MatrixError::index(format!(
                    "row {row} of packed matrix takes {expected} values, got {}",
                    row_data.len()
                )));
            }
            let start = self.packed_index(row, row);
            self.values[start..start + expected].copy_from_slice(row_data);
        } else {
            if row_data.len() != self.cols {
                return Err(MatrixError::index(format!(
                    "row takes {} values, got {}",
                    self.cols,
                    row_data.len()
                )));
            }
            let start = row * self.cols;
            self.values[start..start + self.cols].copy_from_slice(row_data);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // CSV export
    // ------------------------------------------------------------------

    /// Write the matrix as delimited text: a header line of column labels
    /// (leading blank cell), then one line per row. Every line ends with a
    /// trailing comma; labels are not escaped, so keep them comma-free.
    ///
    /// Cells are read through `value_at`, the same accessor random access
    /// uses, so the export always matches in-memory state. Every row must
    /// have a registered label; a partially labeled matrix fails with an
    /// index error rather than exporting misaligned lines.
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        write!(out, ",")?;
        for col_label in &self.col_labels {
            write!(out, "{col_label},")?;
        }
        writeln!(out)?;
        for row_loc in 0..self.rows {
            write!(out, "{},", self.row_label_at(row_loc)?)?;
            for col_loc in 0..self.cols {
                write!(out, "{},", self.value_at(row_loc, col_loc)?)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write the CSV form to a file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Binary persistence
    // ------------------------------------------------------------------

    /// Serialize dimensions, flags, labels, and raw cell storage through
    /// the binary codec.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut ser = Serializer::create(path)?;
        ser.write_bool(self.compressible)?;
        ser.write_bool(self.symmetric)?;
        ser.write_scalar(self.rows as u64)?;
        ser.write_scalar(self.cols as u64)?;
        encode_labels(&self.row_labels, &mut ser)?;
        encode_labels(&self.col_labels, &mut ser)?;
        ser.write_vec(&self.values)?;
        ser.finish()?;
        debug!(
            rows = self.rows,
            cols = self.cols,
            compressible = self.compressible,
            "matrix serialized"
        );
        Ok(())
    }

    /// Deserialize a matrix written by [`save`](Self::save), rebuilding
    /// the label→location maps from the restored label sequences.
    pub fn load(path: &Path) -> Result<Self> {
        let mut de = Deserializer::open(path)?;
        let compressible = de.read_bool()?;
        let symmetric = de.read_bool()?;
        let rows = de.read_scalar::<u64>()? as usize;
        let cols = de.read_scalar::<u64>()? as usize;
        let row_labels: Vec<R> = decode_labels(&mut de)?;
        let col_labels: Vec<C> = decode_labels(&mut de)?;
        let values = de.read_vec::<u16>()?;

        let mut matrix = Self::new(compressible, symmetric, rows, cols);
        matrix.set_row_labels(&row_labels)?;
        matrix.set_col_labels(&col_labels)?;
        if values.len() != matrix.values.len() {
            return Err(MatrixError::dimension_mismatch(format!(
                "{} cells on disk for a {}-slot matrix",
                values.len(),
                matrix.values.len()
            )));
        }
        matrix.values = values;
        debug!(rows, cols, compressible, "matrix deserialized");
        Ok(matrix)
    }
}

impl LabeledMatrix<String, String> {
    /// Load a dense string-labeled matrix from its CSV form.
    ///
    /// Two passes over the line structure: labels fix the dimensions,
    /// then values are parsed into place. Trailing commas (as written by
    /// [`write_to`](Self::write_to)) produce a final empty field, which
    /// is skipped.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                lines.push(line);
            }
        }
        let header = lines
            .first()
            .ok_or_else(|| MatrixError::dimension_mismatch("empty CSV file"))?;
        let col_labels: Vec<String> = header
            .split(',')
            .skip(1)
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();

        let mut row_labels = Vec::with_capacity(lines.len() - 1);
        let mut rows_data = Vec::with_capacity(lines.len() - 1);
        for line in &lines[1..] {
            let mut fields = line.split(',');
            let row_label = fields
                .next()
                .ok_or_else(|| MatrixError::dimension_mismatch("CSV row missing label"))?;
            row_labels.push(row_label.to_owned());
            let mut row = Vec::with_capacity(col_labels.len());
            for field in fields.filter(|field| !field.is_empty()) {
                let value: u16 = field.parse().map_err(|_| {
                    MatrixError::dimension_mismatch(format!("bad CSV cell: {field:?}"))
                })?;
                row.push(value);
            }
            if row.len() != col_labels.len() {
                return Err(MatrixError::dimension_mismatch(format!(
                    "CSV row {row_label} has {} cells, header has {}",
                    row.len(),
                    col_labels.len()
                )));
            }
            rows_data.push(row);
        }

        let mut matrix = Self::new(false, false, row_labels.len(), col_labels.len());
        matrix.set_row_labels(&row_labels)?;
        matrix.set_col_labels(&col_labels)?;
        for (row_loc, row) in rows_data.iter().enumerate() {
            matrix.set_row(row, row_loc)?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_default_both_layouts() {
        let dense = LabeledMatrix::<u64, u64>::new(false, false, 2, 3);
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(dense.value_at(row, col).unwrap(), UNREACHABLE);
            }
        }
        let packed = LabeledMatrix::<u64, u64>::new(true, true, 3, 3);
        assert_eq!(packed.storage_len(), 6);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(packed.value_at(row, col).unwrap(), UNREACHABLE);
            }
        }
    }

    #[test]
    fn test_packed_symmetry_under_either_ordering() {
        let n = 5;
        let mut matrix = LabeledMatrix::<u64, u64>::new(true, true, n, n);
        // Write above the diagonal, then overwrite below it.
        matrix.set_value_at(1, 4, 100).unwrap();
        assert_eq!(matrix.value_at(4, 1).unwrap(), 100);
        matrix.set_value_at(4, 1, 200).unwrap();
        assert_eq!(matrix.value_at(1, 4).unwrap(), 200);

        for row in 0..n {
            for col in 0..n {
                assert_eq!(
                    matrix.value_at(row, col).unwrap(),
                    matrix.value_at(col, row).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_packed_slots_do_not_alias() {
        // Every on-or-above-diagonal pair gets a distinct slot.
        let n = 4;
        let mut matrix = LabeledMatrix::<u64, u64>::new(true, true, n, n);
        let mut value = 0u16;
        for row in 0..n {
            for col in row..n {
                matrix.set_value_at(row, col, value).unwrap();
                value += 1;
            }
        }
        let mut expected = 0u16;
        for row in 0..n {
            for col in row..n {
                assert_eq!(matrix.value_at(row, col).unwrap(), expected);
                expected += 1;
            }
        }
    }

    #[test]
    fn test_compressed_three_by_three_scenario() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(true, true, 3, 3);
        matrix.set_value_at(0, 2, 500).unwrap();
        assert_eq!(matrix.value_at(2, 0).unwrap(), 500);
        assert_eq!(matrix.value_at(0, 0).unwrap(), UNREACHABLE);
    }

    #[test]
    fn test_compressible_forces_square() {
        let matrix = LabeledMatrix::<u64, u64>::new(true, true, 4, 9);
        assert_eq!(matrix.cols(), 4);
        assert_eq!(matrix.storage_len(), 10);
    }

    #[test]
    fn test_id_and_loc_access_agree() {
        let mut matrix = LabeledMatrix::<String, u64>::new(false, false, 2, 2);
        matrix
            .set_row_labels(&["a".to_owned(), "b".to_owned()])
            .unwrap();
        matrix.set_col_labels(&[10, 20]).unwrap();
        matrix.set_value_by_id(&"b".to_owned(), &10, 77).unwrap();
        assert_eq!(matrix.value_at(1, 0).unwrap(), 77);

        for (row_loc, row) in matrix.row_labels().to_vec().iter().enumerate() {
            for (col_loc, col) in matrix.col_labels().to_vec().iter().enumerate() {
                assert_eq!(
                    matrix.value_by_id(row, col).unwrap(),
                    matrix.value_at(row_loc, col_loc).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_unregistered_label_is_key_not_found() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 2, 2);
        matrix.set_row_labels(&[1, 2]).unwrap();
        matrix.set_col_labels(&[3, 4]).unwrap();
        assert!(matches!(
            matrix.value_by_id(&99, &3),
            Err(MatrixError::KeyNotFound { .. })
        ));
        assert!(matrix.contains_labels(&1, &4));
        assert!(!matrix.contains_labels(&1, &99));
    }

    #[test]
    fn test_short_label_slice_is_dimension_mismatch() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 3, 3);
        assert!(matches!(
            matrix.set_row_labels(&[1, 2]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_over_length_label_slice_is_dimension_mismatch() {
        // Extra labels would register map entries pointing past the last
        // row, turning later id lookups into out-of-range access.
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 2, 2);
        assert!(matches!(
            matrix.set_row_labels(&[1, 2, 3]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            matrix.set_col_labels(&[1, 2, 3]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
        assert!(matrix.row_labels().is_empty());
    }

    #[test]
    fn test_export_without_labels_is_index_error() {
        let matrix = LabeledMatrix::<String, String>::new(false, false, 2, 2);
        let mut out = Vec::new();
        assert!(matches!(
            matrix.write_to(&mut out),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn test_row_values_with_partial_col_labels_is_index_error() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 1, 3);
        matrix.add_row_label(10);
        // Only one of three column labels registered.
        matrix.add_col_label(20);
        assert!(matches!(
            matrix.row_values(&10, false),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn test_col_values_with_partial_row_labels_is_index_error() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 3, 1);
        matrix.add_col_label(20);
        matrix.add_row_label(10);
        assert!(matches!(
            matrix.col_values(&20, false),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn test_out_of_range_access_is_index_error() {
        let matrix = LabeledMatrix::<u64, u64>::new(false, false, 2, 3);
        assert!(matches!(
            matrix.value_at(2, 0),
            Err(MatrixError::Index { .. })
        ));
        assert!(matches!(
            matrix.value_at(0, 3),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn test_set_row_dense() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 2, 3);
        matrix.set_row(&[1, 2, 3], 1).unwrap();
        assert_eq!(matrix.value_at(1, 0).unwrap(), 1);
        assert_eq!(matrix.value_at(1, 2).unwrap(), 3);
        assert_eq!(matrix.value_at(0, 0).unwrap(), UNREACHABLE);
    }

    #[test]
    fn test_set_row_packed_writes_triangle_tail() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(true, true, 3, 3);
        // Row 1 of a packed 3x3 holds slots (1,1) and (1,2).
        matrix.set_row(&[11, 12], 1).unwrap();
        assert_eq!(matrix.value_at(1, 1).unwrap(), 11);
        assert_eq!(matrix.value_at(1, 2).unwrap(), 12);
        assert_eq!(matrix.value_at(2, 1).unwrap(), 12);
        assert_eq!(matrix.value_at(0, 2).unwrap(), UNREACHABLE);
    }

    #[test]
    fn test_set_row_boundary_and_length_errors() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 2, 3);
        // row == rows must fail, not just row > rows.
        assert!(matches!(
            matrix.set_row(&[1, 2, 3], 2),
            Err(MatrixError::Index { .. })
        ));
        assert!(matches!(
            matrix.set_row(&[1, 2], 0),
            Err(MatrixError::Index { .. })
        ));

        let mut packed = LabeledMatrix::<u64, u64>::new(true, true, 3, 3);
        assert!(matches!(
            packed.set_row(&[1, 2, 3], 1),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn test_row_values_sorted_and_stable() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(false, false, 1, 4);
        matrix.set_row_labels(&[0]).unwrap();
        matrix.set_col_labels(&[10, 20, 30, 40]).unwrap();
        matrix.set_row(&[5, 3, 5, 1], 0).unwrap();

        let unsorted = matrix.row_values(&0, false).unwrap();
        assert_eq!(unsorted, vec![(10, 5), (20, 3), (30, 5), (40, 1)]);

        let sorted = matrix.row_values(&0, true).unwrap();
        // Ties (the two 5s) keep insertion order.
        assert_eq!(sorted, vec![(40, 1), (20, 3), (10, 5), (30, 5)]);
    }

    #[test]
    fn test_col_values() {
        let mut matrix = LabeledMatrix::<u64, String>::new(false, false, 2, 2);
        matrix.set_row_labels(&[1, 2]).unwrap();
        matrix
            .set_col_labels(&["x".to_owned(), "y".to_owned()])
            .unwrap();
        matrix.set_value_by_id(&1, &"y".to_owned(), 9).unwrap();
        matrix.set_value_by_id(&2, &"y".to_owned(), 4).unwrap();

        let sorted = matrix.col_values(&"y".to_owned(), true).unwrap();
        assert_eq!(sorted, vec![(2, 4), (1, 9)]);
    }

    #[test]
    fn test_add_labels_assign_sequential_locs() {
        let mut matrix = LabeledMatrix::<String, String>::new(false, false, 2, 2);
        assert_eq!(matrix.add_row_label("a".to_owned()), 0);
        assert_eq!(matrix.add_row_label("b".to_owned()), 1);
        assert_eq!(matrix.add_col_label("x".to_owned()), 0);
        assert_eq!(matrix.loc_of_row(&"b".to_owned()).unwrap(), 1);
        assert_eq!(matrix.row_label_at(0).unwrap(), "a");
    }

    #[test]
    fn test_csv_export_layout() {
        let mut matrix = LabeledMatrix::<String, String>::new(false, false, 2, 3);
        matrix
            .set_row_labels(&["a".to_owned(), "b".to_owned()])
            .unwrap();
        matrix
            .set_col_labels(&["x".to_owned(), "y".to_owned(), "z".to_owned()])
            .unwrap();
        matrix
            .set_value_by_id(&"a".to_owned(), &"y".to_owned(), 42)
            .unwrap();

        let mut out = Vec::new();
        matrix.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ",x,y,z,");
        assert_eq!(lines[1], "a,65535,42,65535,");
        assert_eq!(lines[2], "b,65535,65535,65535,");
    }

    #[test]
    fn test_csv_export_reads_through_packed_accessor() {
        let mut matrix = LabeledMatrix::<u64, u64>::new(true, true, 2, 2);
        matrix.set_row_labels(&[7, 8]).unwrap();
        matrix.set_col_labels(&[7, 8]).unwrap();
        matrix.set_value_at(0, 1, 30).unwrap();

        let mut out = Vec::new();
        matrix.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Mirrored cell shows up in both rows.
        assert_eq!(lines[1], "7,65535,30,");
        assert_eq!(lines[2], "8,30,65535,");
    }
}
