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

//! Error kinds surfaced by the benchmark.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StencilError>;

/// Things that stop a run.
///
/// A validation mismatch is not in here: it is a benchmark outcome and is
/// reported per pass through [`crate::validate::Validation`].
#[derive(Debug, Error)]
pub enum StencilError {
    /// Options rejected before any computation starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Kernel-resident buffers could not be reserved.
    #[error("failed to allocate {elements} grid elements")]
    Allocation { elements: usize },

    /// The worker team could not be started.
    #[error("failed to build the stencil worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl StencilError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        StencilError::InvalidConfiguration(msg.into())
    }
}
