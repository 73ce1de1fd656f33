use thiserror::Error;

/// Errors raised while assembling a dense matrix from rows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// There are no rows, or the rows have no columns.
    #[error("matrix has no entries")]
    Empty,

    /// A row differs in length from the first row.
    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Violations of the compressed sparse row invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CsrError {
    #[error("row pointer array is empty; it must hold at least the terminating offset")]
    EmptyRowPtr,

    #[error("row pointer array starts at {0}, expected 0")]
    RowPtrStart(usize),

    #[error("row pointer array ends at {found}, expected the entry count {expected}")]
    RowPtrEnd { expected: usize, found: usize },

    #[error("row pointer decreases at row {row}")]
    RowPtrDecreasing { row: usize },

    #[error("{values} values but {col_indices} column indices")]
    LengthMismatch { values: usize, col_indices: usize },

    #[error("row {row} stores column {col}, but the matrix has width {width}")]
    ColumnOutOfBounds { row: usize, col: usize, width: usize },

    #[error("columns of row {row} are not strictly increasing")]
    UnsortedColumns { row: usize },
}
