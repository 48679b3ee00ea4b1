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

//! Tiled, parallel, double-buffered stencil.
//!
//! The grid is uploaded once into kernel-resident memory, updated in place
//! for all iterations by a team of workers (one per tile), and downloaded
//! once at the end. The team shares one pair of buffers; a barrier between
//! iterations makes every write of step `t` visible before any read of step
//! `t + 1`.

use std::marker::PhantomData;
use std::sync::Barrier;
use std::time::Instant;

use tracing::{debug, trace};

use crate::element::Element;
use crate::error::{Result, StencilError};
use crate::grid::Grid;
use crate::partition::{Partition, Tile};
use crate::stencil::{require_halo, sweep_row, Stencil, Weights};

/// The parallel stencil strategy.
#[derive(Clone, Debug)]
pub struct TiledStencil<T> {
    weights: Weights<T>,
    partition: Partition,
}

impl<T: Element> TiledStencil<T> {
    pub fn new(weights: Weights<T>, partition: Partition) -> Self {
        TiledStencil { weights, partition }
    }
}

impl<T: Element> Stencil<T> for TiledStencil<T> {
    fn apply(&self, grid: &mut Grid<T>, n_iters: usize) -> Result<()> {
        require_halo(grid)?;
        let mut buffers = DeviceBuffers::upload(grid)?;
        buffers.compute(&self.weights, self.partition, n_iters)?;
        buffers.download(grid);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tiled"
    }
}

/// Kernel-resident copy of a grid plus its zero-filled scratch twin.
///
/// Both buffers are released when this goes out of scope, whichever way the
/// kernel exits.
pub struct DeviceBuffers<T> {
    rows: usize,
    cols: usize,
    halo: usize,
    resident: Vec<T>,
    scratch: Vec<T>,
    newest_in_scratch: bool,
}

impl<T: Element> DeviceBuffers<T> {
    /// Copy `grid` in and allocate the scratch buffer.
    pub fn upload(grid: &Grid<T>) -> Result<Self> {
        let len = grid.as_slice().len();

        let mut resident = Vec::new();
        resident
            .try_reserve_exact(len)
            .map_err(|_| StencilError::Allocation { elements: len })?;
        resident.extend_from_slice(grid.as_slice());

        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(len)
            .map_err(|_| StencilError::Allocation { elements: len })?;
        scratch.resize(len, T::zero());

        let mut buffers = DeviceBuffers {
            rows: grid.rows(),
            cols: grid.cols(),
            halo: grid.halo_width(),
            resident,
            scratch,
            newest_in_scratch: false,
        };
        buffers.copy_halo_to_scratch();
        trace!(elements = len, "uploaded grid");
        Ok(buffers)
    }

    /// The scratch buffer becomes the read side every other iteration, so it
    /// needs the same fixed border as the grid.
    fn copy_halo_to_scratch(&mut self) {
        let (rows, cols, h) = (self.rows, self.cols, self.halo);
        for i in 0..rows {
            let row = i * cols..(i + 1) * cols;
            let (src, dst) = (&self.resident[row.clone()], &mut self.scratch[row]);
            if i < h || i + h >= rows {
                dst.copy_from_slice(src);
            } else {
                dst[..h].copy_from_slice(&src[..h]);
                dst[cols - h..].copy_from_slice(&src[cols - h..]);
            }
        }
    }

    /// Run `n_iters` steps with one worker per tile of `partition`.
    pub fn compute(&mut self, weights: &Weights<T>, partition: Partition, n_iters: usize) -> Result<()> {
        if n_iters == 0 {
            return Ok(());
        }

        let workers = partition.workers();
        let tiles: Vec<Tile> = partition.tiles(
            self.rows - 2 * self.halo,
            self.cols - 2 * self.halo,
            self.halo,
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("stencil-worker-{i}"))
            .build()?;
        debug!(
            row_parts = partition.row_parts(),
            col_parts = partition.col_parts(),
            n_iters,
            "starting worker team"
        );

        let cols = self.cols;
        let barrier = Barrier::new(workers);
        let resident = SharedBuffer::new(&mut self.resident);
        let scratch = SharedBuffer::new(&mut self.scratch);
        let t0 = Instant::now();

        pool.broadcast(|ctx| {
            let tile = tiles[ctx.index()];
            let (mut current, mut next) = (&resident, &scratch);
            for _ in 0..n_iters {
                // SAFETY: during this phase nobody writes `current`, and each
                // worker writes only the row segments of its own tile in
                // `next`; tiles are disjoint. The barrier orders this phase's
                // writes before the next phase's reads.
                unsafe {
                    let src = current.as_slice();
                    for i in tile.rows() {
                        let out = next.segment_mut(i * cols + tile.col_start, tile.cols().len());
                        sweep_row(src, cols, i, tile.cols(), out, weights);
                    }
                }
                barrier.wait();
                std::mem::swap(&mut current, &mut next);
            }
        });

        self.newest_in_scratch = n_iters % 2 == 1;
        trace!(
            seconds = prk_common::wtime_since(t0),
            "worker team finished"
        );
        Ok(())
    }

    /// The buffer that holds the values of the last completed iteration.
    pub fn newest(&self) -> &[T] {
        if self.newest_in_scratch {
            &self.scratch
        } else {
            &self.resident
        }
    }

    /// Copy the newest values back into `grid`.
    pub fn download(&self, grid: &mut Grid<T>) {
        grid.as_mut_slice().copy_from_slice(self.newest());
    }
}

impl<T> Drop for DeviceBuffers<T> {
    fn drop(&mut self) {
        trace!(elements = self.resident.len(), "releasing kernel buffers");
    }
}

/// A flat buffer that the whole worker team reads and writes through raw
/// pointers.
struct SharedBuffer<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: access goes through the unsafe methods below, whose callers keep
// reads and writes of the same element in different barrier phases.
unsafe impl<T: Send> Send for SharedBuffer<'_, T> {}
unsafe impl<T: Send + Sync> Sync for SharedBuffer<'_, T> {}

impl<'a, T> SharedBuffer<'a, T> {
    fn new(data: &'a mut [T]) -> Self {
        SharedBuffer {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// No thread may write to the buffer while the returned slice is alive.
    unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(self.ptr, self.len)
    }

    /// # Safety
    /// The segment must not overlap any other live slice of this buffer.
    #[allow(clippy::mut_from_ref)]
    unsafe fn segment_mut(&self, start: usize, len: usize) -> &mut [T] {
        debug_assert!(start + len <= self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(start), len)
    }
}
