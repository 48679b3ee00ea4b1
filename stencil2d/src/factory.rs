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

//! Builders for the two stencil strategies.

use crate::config::Config;
use crate::element::Element;
use crate::error::{Result, StencilError};
use crate::kernel::TiledStencil;
use crate::reference::ReferenceStencil;
use crate::stencil::Stencil;

/// Builds a stencil strategy from the configuration.
pub trait StencilFactory<T: Element> {
    /// Strategy-specific option checks.
    fn check_options(&self, config: &Config) -> Result<()>;

    fn build(&self, config: &Config) -> Result<Box<dyn Stencil<T>>>;
}

fn check_weights(config: &Config) -> Result<()> {
    let weights = [
        config.weight_center,
        config.weight_cardinal,
        config.weight_diagonal,
    ];
    if weights.iter().all(|w| w.is_finite()) {
        Ok(())
    } else {
        Err(StencilError::config("stencil weights must be finite"))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceStencilFactory;

impl<T: Element> StencilFactory<T> for ReferenceStencilFactory {
    fn check_options(&self, config: &Config) -> Result<()> {
        check_weights(config)
    }

    fn build(&self, config: &Config) -> Result<Box<dyn Stencil<T>>> {
        Ok(Box::new(ReferenceStencil::new(config.weights::<T>())))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TiledStencilFactory;

impl<T: Element> StencilFactory<T> for TiledStencilFactory {
    fn check_options(&self, config: &Config) -> Result<()> {
        check_weights(config)?;
        config.partition().map(|_| ())
    }

    fn build(&self, config: &Config) -> Result<Box<dyn Stencil<T>>> {
        Ok(Box::new(TiledStencil::new(
            config.weights::<T>(),
            config.partition()?,
        )))
    }
}
