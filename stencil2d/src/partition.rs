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

//! Decomposition of the grid interior into worker-owned tiles.

use std::ops::Range;

use crate::error::{Result, StencilError};

/// Workers colocated on one compute unit (hardware threads per core on a
/// many-core accelerator).
pub const WORKERS_PER_UNIT: usize = 4;

/// A rectangular block of the interior, in absolute grid coordinates.
///
/// May be empty when there are more partitions than interior rows or
/// columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Tile {
    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    pub fn len(&self) -> usize {
        self.rows().len() * self.cols().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.rows().contains(&i) && self.cols().contains(&j)
    }
}

/// Row-partition x column-partition layout of the worker team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    row_parts: usize,
    col_parts: usize,
}

impl Partition {
    pub fn new(row_parts: usize, col_parts: usize) -> Result<Self> {
        if row_parts == 0 || col_parts == 0 {
            return Err(StencilError::config(format!(
                "partition counts must be positive, got {}x{}",
                row_parts, col_parts
            )));
        }
        Ok(Partition {
            row_parts,
            col_parts,
        })
    }

    /// Layout derived from the number of available compute units: one
    /// column partition per colocated worker, one row partition per unit
    /// with one unit left to the host side.
    pub fn from_platform() -> Self {
        let units = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::for_units(units)
    }

    pub fn for_units(units: usize) -> Self {
        Partition {
            row_parts: (units / WORKERS_PER_UNIT).saturating_sub(1).max(1),
            col_parts: WORKERS_PER_UNIT,
        }
    }

    pub fn row_parts(&self) -> usize {
        self.row_parts
    }

    pub fn col_parts(&self) -> usize {
        self.col_parts
    }

    pub fn workers(&self) -> usize {
        self.row_parts * self.col_parts
    }

    /// Tile owned by `worker`. Tile extents are ceiling-divided and the last
    /// tile in each dimension is clipped to the interior.
    pub fn tile(&self, worker: usize, interior_rows: usize, interior_cols: usize, halo: usize) -> Tile {
        let row_id = worker / self.col_parts;
        let col_id = worker % self.col_parts;

        let row_size = interior_rows.div_ceil(self.row_parts);
        let col_size = interior_cols.div_ceil(self.col_parts);

        let (row_start, row_end) = clip(row_id * row_size, row_size, interior_rows);
        let (col_start, col_end) = clip(col_id * col_size, col_size, interior_cols);

        Tile {
            row_start: halo + row_start,
            row_end: halo + row_end,
            col_start: halo + col_start,
            col_end: halo + col_end,
        }
    }

    /// All tiles, indexed by worker id.
    pub fn tiles(&self, interior_rows: usize, interior_cols: usize, halo: usize) -> Vec<Tile> {
        (0..self.workers())
            .map(|w| self.tile(w, interior_rows, interior_cols, halo))
            .collect()
    }
}

fn clip(start: usize, size: usize, extent: usize) -> (usize, usize) {
    let start = start.min(extent);
    let end = (start + size).min(extent);
    (start, end)
}
