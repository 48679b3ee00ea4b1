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

//! 2D nine-point stencil benchmark.
//!
//! A grid with a constant halo is seeded with a reproducible, tileable
//! pattern, smoothed for a number of iterations by a sequential reference
//! stencil and by a tiled parallel kernel, and the two results are compared
//! cell by cell within a relative tolerance.

pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod factory;
pub mod grid;
pub mod init;
pub mod kernel;
pub mod partition;
pub mod reference;
pub mod stencil;
pub mod validate;

pub use config::Config;
pub use element::Element;
pub use error::{Result, StencilError};
pub use grid::Grid;
pub use init::{FillMode, Initializer};
pub use kernel::TiledStencil;
pub use partition::{Partition, Tile};
pub use reference::ReferenceStencil;
pub use stencil::{Stencil, Weights};
pub use validate::{validate, Validation};
