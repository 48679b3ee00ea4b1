//
// Copyright (c) 2013, Intel Corporation
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
//
// * Redistributions of source code must retain the above copyright
//       notice, this list of conditions and the following disclaimer.
// * Redistributions in binary form must reproduce the above
//       copyright notice, this list of conditions and the following
//       disclaimer in the documentation and/or other materials provided
//       with the distribution.
// * Neither the name of Intel Corporation nor the names of its
//       contributors may be used to endorse or promote products
//       derived from this software without specific prior written
//       permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS
// FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE
// COPYRIGHT OWNER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT,
// INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING,
// BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
// LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT
// LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN
// ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.

//! Row-major 2D grid with a constant-width halo.

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use crate::element::Element;
use crate::error::{Result, StencilError};

/// A bordered 2D buffer.
///
/// `rows()`/`cols()` include the halo on both sides; the interior is the
/// block `[h, rows - h) x [h, cols - h)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    halo: usize,
    data: Vec<T>,
}

impl<T: Element> Grid<T> {
    /// Zero-filled grid with the given interior size.
    pub fn new(interior_rows: usize, interior_cols: usize, halo: usize) -> Result<Self> {
        if interior_rows == 0 || interior_cols == 0 {
            return Err(StencilError::config(format!(
                "grid interior must be non-empty, got {}x{}",
                interior_rows, interior_cols
            )));
        }
        let rows = interior_rows + 2 * halo;
        let cols = interior_cols + 2 * halo;
        Ok(Grid {
            rows,
            cols,
            halo,
            data: vec![T::zero(); rows * cols],
        })
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn halo_width(&self) -> usize {
        self.halo
    }

    pub fn interior_rows(&self) -> usize {
        self.rows - 2 * self.halo
    }

    pub fn interior_cols(&self) -> usize {
        self.cols - 2 * self.halo
    }

    /// Number of cells the stencil updates per iteration.
    pub fn interior_len(&self) -> usize {
        self.interior_rows() * self.interior_cols()
    }

    /// Row indices of the interior.
    pub fn interior_row_range(&self) -> Range<usize> {
        self.halo..self.rows - self.halo
    }

    /// Column indices of the interior.
    pub fn interior_col_range(&self) -> Range<usize> {
        self.halo..self.cols - self.halo
    }

    pub fn is_halo(&self, i: usize, j: usize) -> bool {
        !self.interior_row_range().contains(&i) || !self.interior_col_range().contains(&j)
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Flat row-major view, halo included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}

impl<T: Element> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for value in self.row(i) {
                write!(f, "{:10.4} ", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_include_halo() {
        let grid: Grid<f64> = Grid::new(4, 6, 2).unwrap();
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.interior_rows(), 4);
        assert_eq!(grid.interior_cols(), 6);
        assert_eq!(grid.interior_len(), 24);
        assert_eq!(grid.as_slice().len(), 80);
    }

    #[test]
    fn empty_interior_is_rejected() {
        assert!(matches!(
            Grid::<f32>::new(0, 4, 1),
            Err(StencilError::InvalidConfiguration(_))
        ));
        assert!(Grid::<f32>::new(4, 0, 1).is_err());
    }

    #[test]
    fn halo_classification() {
        let grid: Grid<f32> = Grid::new(3, 3, 1).unwrap();
        assert!(grid.is_halo(0, 2));
        assert!(grid.is_halo(2, 4));
        assert!(grid.is_halo(4, 4));
        assert!(!grid.is_halo(1, 1));
        assert!(!grid.is_halo(3, 3));
    }

    #[test]
    fn index_matches_flat_layout() {
        let mut grid: Grid<f64> = Grid::new(2, 3, 1).unwrap();
        grid[(2, 3)] = 7.0;
        assert_eq!(grid.as_slice()[2 * 5 + 3], 7.0);
        assert_eq!(grid.row(2)[3], 7.0);
    }
}
