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

//! The 9-point weighted stencil and the strategy interface.

use std::ops::Range;

use crate::element::Element;
use crate::error::{Result, StencilError};
use crate::grid::Grid;

/// Weights of the center, the four cardinal and the four diagonal neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights<T> {
    pub center: T,
    pub cardinal: T,
    pub diagonal: T,
}

impl<T: Element> Weights<T> {
    pub fn new(center: f64, cardinal: f64, diagonal: f64) -> Self {
        Weights {
            center: T::from_f64(center),
            cardinal: T::from_f64(cardinal),
            diagonal: T::from_f64(diagonal),
        }
    }

    /// Weighted sum of one 3x3 neighbourhood.
    ///
    /// Shared by every strategy, so their results are bit-identical.
    #[inline(always)]
    pub fn apply(&self, center: T, cardinal: T, diagonal: T) -> T {
        self.cardinal * cardinal + self.diagonal * diagonal + self.center * center
    }
}

/// A way of running `n_iters` stencil steps over a grid in place.
pub trait Stencil<T: Element>: Send + Sync {
    fn apply(&self, grid: &mut Grid<T>, n_iters: usize) -> Result<()>;

    /// Short name for reports.
    fn name(&self) -> &'static str;
}

/// The stencil reads one cell beyond the interior, so it needs a halo.
pub(crate) fn require_halo<T>(grid: &Grid<T>) -> Result<()> {
    if grid.halo_width() == 0 {
        return Err(StencilError::config(
            "the 9-point stencil needs a halo width of at least 1",
        ));
    }
    Ok(())
}

/// Update row `i` over `columns` from the flat grid `src` with `cols`
/// columns. `out[k]` receives column `columns.start + k`.
#[inline]
pub(crate) fn sweep_row<T: Element>(
    src: &[T],
    cols: usize,
    i: usize,
    columns: Range<usize>,
    out: &mut [T],
    weights: &Weights<T>,
) {
    let top = &src[(i - 1) * cols..i * cols];
    let mid = &src[i * cols..(i + 1) * cols];
    let bot = &src[(i + 1) * cols..(i + 2) * cols];
    for (o, j) in out.iter_mut().zip(columns) {
        let cardinal = mid[j - 1] + mid[j + 1] + top[j] + bot[j];
        let diagonal = top[j - 1] + top[j + 1] + bot[j - 1] + bot[j + 1];
        *o = weights.apply(mid[j], cardinal, diagonal);
    }
}
