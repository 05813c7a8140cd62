//! Chunked travel-matrix construction.
//!
//! # Algorithm
//!
//! The full N×N query is partitioned into origin×destination sub-blocks of
//! at most `max_elements` oracle elements each: row chunks are capped at 25
//! and the column chunk is whatever keeps `rows * cols <= max_elements`.
//! One oracle call is issued per block (with a small retry bound on
//! transport failures) and the results are stitched into the full matrix by
//! index offset. Elements the oracle reports unreachable stay `None` — the
//! cost model downstream assigns them an explicit penalty instead of a
//! silent numeric sentinel.

use crate::maps::{Coordinates, MapsService, MatrixBlock, MatrixError};

use super::matrix::TravelMatrix;

/// Oracle limit on `origins × destinations` elements per call.
pub const MAX_ELEMENTS_PER_REQUEST: usize = 100;

/// Largest origin chunk per call; keeps blocks square-ish.
const MAX_ROWS_PER_REQUEST: usize = 25;

/// Builds full pairwise travel matrices from a [`MapsService`].
///
/// `points[0]` is the depot, `points[1..]` are stop coordinates. The
/// builder performs no caching of its own: point sets differ per
/// optimization call, and address-level caching lives in the resolver.
pub struct TravelMatrixBuilder<'a, S: MapsService> {
    service: &'a S,
    max_elements: usize,
    max_attempts: u32,
}

impl<'a, S: MapsService> TravelMatrixBuilder<'a, S> {
    /// Creates a builder with the default element limit and retry bound.
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            max_elements: MAX_ELEMENTS_PER_REQUEST,
            max_attempts: 3,
        }
    }

    /// Overrides the per-call element limit (minimum 1).
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements.max(1);
        self
    }

    /// Overrides the maximum attempts per block (minimum 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Builds the full N×N travel matrix for the given points.
    ///
    /// # Errors
    ///
    /// Fails with [`MatrixError`] when any block still fails after the
    /// retry bound, or when the oracle returns a block whose shape does not
    /// match the request. A failed build leaves no partial matrix behind.
    pub fn build(&self, points: &[Coordinates]) -> Result<TravelMatrix, MatrixError> {
        let n = points.len();
        let mut matrix = TravelMatrix::new(n);
        if n == 0 {
            return Ok(matrix);
        }

        let rows_chunk = n.min(MAX_ROWS_PER_REQUEST).min(self.max_elements);
        let cols_chunk = (self.max_elements / rows_chunk).clamp(1, n);

        let mut row_start = 0;
        while row_start < n {
            let row_end = (row_start + rows_chunk).min(n);
            let origins = &points[row_start..row_end];

            let mut col_start = 0;
            while col_start < n {
                let col_end = (col_start + cols_chunk).min(n);
                let destinations = &points[col_start..col_end];

                let block = self.fetch_block(origins, destinations)?;
                Self::check_shape(&block, origins.len(), destinations.len())?;

                for (i, row) in block.iter().enumerate() {
                    for (j, &leg) in row.iter().enumerate() {
                        matrix.set(row_start + i, col_start + j, leg);
                    }
                }

                col_start = col_end;
            }
            row_start = row_end;
        }

        Ok(matrix)
    }

    /// Fetches one block, retrying transport failures up to the bound.
    fn fetch_block(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> Result<MatrixBlock, MatrixError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.service.travel_matrix(origins, destinations) {
                Ok(block) => return Ok(block),
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    log::warn!(
                        "travel-matrix block failed on attempt {attempt}: {error}; retrying"
                    );
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn check_shape(
        block: &MatrixBlock,
        expected_rows: usize,
        expected_cols: usize,
    ) -> Result<(), MatrixError> {
        let bad_row = block.iter().find(|row| row.len() != expected_cols);
        if block.len() != expected_rows || bad_row.is_some() {
            return Err(MatrixError::BlockShape {
                rows: block.len(),
                cols: bad_row.map_or(expected_cols, Vec::len),
                expected_rows,
                expected_cols,
            });
        }
        Ok(())
    }
}
