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

//! Halo-aware grid initialization with an optional periodic pattern.

use std::num::NonZeroUsize;

use clap::ValueEnum;
use prk_common::RandomDraw;

use crate::element::Element;
use crate::grid::Grid;

/// How the base tile of the seed pattern is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FillMode {
    /// Cell (i, j) of the base tile holds `i * j`. Platform independent.
    #[default]
    IndexProduct,
    /// Uniform `[0, 1)` values drawn from a generator seeded per call.
    Random,
}

/// Seeds a grid with a reproducible, tileable pattern and a constant halo.
#[derive(Clone, Debug)]
pub struct Initializer {
    seed: u64,
    halo_width: usize,
    halo_value: f64,
    row_period: Option<NonZeroUsize>,
    col_period: Option<NonZeroUsize>,
    fill: FillMode,
}

impl Initializer {
    pub fn new(seed: u64, halo_width: usize, halo_value: f64) -> Self {
        Initializer {
            seed,
            halo_width,
            halo_value,
            row_period: None,
            col_period: None,
            fill: FillMode::default(),
        }
    }

    /// Replicate the base tile every `row_period` rows and/or `col_period`
    /// columns. `None` disables periodicity in that dimension.
    pub fn with_periods(
        mut self,
        row_period: Option<NonZeroUsize>,
        col_period: Option<NonZeroUsize>,
    ) -> Self {
        self.row_period = row_period;
        self.col_period = col_period;
        self
    }

    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Overwrite `grid` with the seed pattern, then the halo.
    pub fn initialize<T: Element>(&self, grid: &mut Grid<T>) {
        let mut draw = RandomDraw::new(self.seed);

        let h = self.halo_width;
        let cols = grid.cols();
        let interior_rows = grid.rows().saturating_sub(2 * h);
        let interior_cols = cols.saturating_sub(2 * h);

        if interior_rows > 0 && interior_cols > 0 {
            self.fill_interior(grid, &mut draw, interior_rows, interior_cols);
        }

        // The halo goes last so the pattern copies cannot leave stale
        // values in the border.
        let halo_value = T::from_f64(self.halo_value);
        let rows = grid.rows();
        for i in 0..rows {
            let row = grid.row_mut(i);
            if i < h || i + h >= rows || interior_cols == 0 {
                row.fill(halo_value);
            } else {
                row[..h].fill(halo_value);
                row[cols - h..].fill(halo_value);
            }
        }
    }

    fn fill_interior<T: Element>(
        &self,
        grid: &mut Grid<T>,
        draw: &mut RandomDraw,
        interior_rows: usize,
        interior_cols: usize,
    ) {
        let h = self.halo_width;
        let cols = grid.cols();
        let tile_rows = clamp_to_period(interior_rows, self.row_period);
        let tile_cols = clamp_to_period(interior_cols, self.col_period);

        // base tile
        for i in 0..tile_rows {
            let row = grid.row_mut(h + i);
            for j in 0..tile_cols {
                row[h + j] = match self.fill {
                    FillMode::IndexProduct => T::from_f64((i * j) as f64),
                    FillMode::Random => T::from_f64(draw.uniform()),
                };
            }
        }

        // columns first, one base-tile row slice at a time
        if self.col_period.is_some() {
            let n_tiles = interior_cols.div_ceil(tile_cols);
            for t in 1..n_tiles {
                let start = t * tile_cols;
                let len = tile_cols.min(interior_cols - start);
                for i in 0..tile_rows {
                    grid.row_mut(h + i).copy_within(h..h + len, h + start);
                }
            }
        }

        // then rows, copying the column-filled first band
        if self.row_period.is_some() {
            let n_tiles = interior_rows.div_ceil(tile_rows);
            let data = grid.as_mut_slice();
            for t in 1..n_tiles {
                let start = t * tile_rows;
                let len = tile_rows.min(interior_rows - start);
                for i in 0..len {
                    let src = (h + i) * cols + h;
                    let dst = (h + start + i) * cols + h;
                    data.copy_within(src..src + interior_cols, dst);
                }
            }
        }
    }
}

fn clamp_to_period(extent: usize, period: Option<NonZeroUsize>) -> usize {
    match period {
        Some(p) if p.get() < extent => p.get(),
        _ => extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(p: usize) -> Option<NonZeroUsize> {
        NonZeroUsize::new(p)
    }

    #[test]
    fn index_product_with_constant_halo() {
        let h = 2;
        let init = Initializer::new(71594, h, -3.5);
        for (r, c) in [(1, 1), (1, 7), (5, 3), (8, 8)] {
            let mut grid: Grid<f64> = Grid::new(r, c, h).unwrap();
            init.initialize(&mut grid);
            for i in 0..grid.rows() {
                for j in 0..grid.cols() {
                    if grid.is_halo(i, j) {
                        assert_eq!(grid[(i, j)], -3.5, "halo at ({i}, {j})");
                    } else {
                        assert_eq!(grid[(i, j)], ((i - h) * (j - h)) as f64);
                    }
                }
            }
        }
    }

    #[test]
    fn column_period_tiles_columns() {
        let h = 1;
        let p = 3;
        let init = Initializer::new(1, h, 0.0).with_periods(None, period(p));
        let mut grid: Grid<f32> = Grid::new(5, 11, h).unwrap();
        init.initialize(&mut grid);
        for i in 0..5 {
            for j in 0..11 {
                assert_eq!(grid[(i + h, j + h)], (i * (j % p)) as f32);
            }
        }
        assert_eq!(grid[(0, 0)], 0.0);
    }

    #[test]
    fn row_period_tiles_rows() {
        let h = 1;
        let p = 4;
        let init = Initializer::new(1, h, 9.0).with_periods(period(p), None);
        let mut grid: Grid<f64> = Grid::new(10, 6, h).unwrap();
        init.initialize(&mut grid);
        for i in 0..10 {
            for j in 0..6 {
                assert_eq!(grid[(i + h, j + h)], ((i % p) * j) as f64);
            }
        }
        assert!(grid.row(11).iter().all(|&v| v == 9.0));
    }

    #[test]
    fn both_periods_tile_in_two_dimensions() {
        let h = 2;
        let (pr, pc) = (3, 2);
        let init = Initializer::new(1, h, 1.0).with_periods(period(pr), period(pc));
        let mut grid: Grid<f64> = Grid::new(7, 9, h).unwrap();
        init.initialize(&mut grid);
        for i in 0..7 {
            for j in 0..9 {
                assert_eq!(grid[(i + h, j + h)], ((i % pr) * (j % pc)) as f64);
            }
        }
    }

    #[test]
    fn period_larger_than_interior_is_plain_fill() {
        let h = 1;
        let init = Initializer::new(1, h, 0.0).with_periods(period(100), period(100));
        let mut grid: Grid<f64> = Grid::new(4, 5, h).unwrap();
        init.initialize(&mut grid);
        assert_eq!(grid[(4, 5)], 12.0);
    }

    #[test]
    fn random_fill_is_reproducible_per_seed() {
        let init = Initializer::new(71594, 1, 0.0).with_fill(FillMode::Random);
        let mut a: Grid<f64> = Grid::new(6, 6, 1).unwrap();
        let mut b: Grid<f64> = Grid::new(6, 6, 1).unwrap();
        init.initialize(&mut a);
        init.initialize(&mut b);
        assert_eq!(a, b);

        for i in a.interior_row_range() {
            for j in a.interior_col_range() {
                assert!((0.0..1.0).contains(&a[(i, j)]));
            }
        }

        let other = Initializer::new(12345, 1, 0.0).with_fill(FillMode::Random);
        let mut c: Grid<f64> = Grid::new(6, 6, 1).unwrap();
        other.initialize(&mut c);
        assert_ne!(a, c);
    }

    #[test]
    fn random_fill_respects_column_period() {
        let init = Initializer::new(5, 1, 0.0)
            .with_fill(FillMode::Random)
            .with_periods(None, period(2));
        let mut grid: Grid<f32> = Grid::new(3, 6, 1).unwrap();
        init.initialize(&mut grid);
        for i in grid.interior_row_range() {
            for j in 3..=6 {
                assert_eq!(grid[(i, j)], grid[(i, j - 2)]);
            }
        }
    }
}
