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

//! Sequential reference stencil.

use crate::element::Element;
use crate::error::Result;
use crate::grid::Grid;
use crate::stencil::{require_halo, sweep_row, Stencil, Weights};

/// Single-threaded double-buffered stencil, used to produce the expected
/// result.
#[derive(Clone, Debug)]
pub struct ReferenceStencil<T> {
    weights: Weights<T>,
}

impl<T: Element> ReferenceStencil<T> {
    pub fn new(weights: Weights<T>) -> Self {
        ReferenceStencil { weights }
    }
}

impl<T: Element> Stencil<T> for ReferenceStencil<T> {
    fn apply(&self, grid: &mut Grid<T>, n_iters: usize) -> Result<()> {
        require_halo(grid)?;
        if n_iters == 0 {
            return Ok(());
        }

        // the copy carries the halo, which is never written
        let mut next = grid.clone();
        let cols = grid.cols();
        let columns = grid.interior_col_range();

        for _ in 0..n_iters {
            let src = grid.as_slice();
            let dst = next.as_mut_slice();
            for i in grid.interior_row_range() {
                let out = &mut dst[i * cols + columns.start..i * cols + columns.end];
                sweep_row(src, cols, i, columns.clone(), out, &self.weights);
            }
            std::mem::swap(grid, &mut next);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "reference"
    }
}
