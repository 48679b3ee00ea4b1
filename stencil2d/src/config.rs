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

//! Command-line configuration and the stencil-independent option checks.

use std::num::NonZeroUsize;

use clap::{Parser, ValueEnum};

use crate::element::Element;
use crate::error::{Result, StencilError};
use crate::init::{FillMode, Initializer};
use crate::partition::Partition;
use crate::stencil::Weights;

/// Square interior sizes selected by `--size`.
pub const PROBLEM_SIZES: [usize; 4] = [768, 1408, 2048, 4096];

/// Floating-point operations per interior cell per iteration.
pub const FLOPS_PER_CELL: usize = 11;

/// Which element types to benchmark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    Single,
    Double,
    #[default]
    Both,
}

impl Precision {
    pub fn single(&self) -> bool {
        matches!(self, Precision::Single | Precision::Both)
    }

    pub fn double(&self) -> bool {
        matches!(self, Precision::Double | Precision::Both)
    }
}

/// 9-point stencil benchmark: tiled parallel kernel checked against a
/// sequential reference.
#[derive(Parser, Clone, Debug)]
#[command(name = "stencil2d", version, about, long_about = None)]
pub struct Config {
    /// Custom interior size as ROWS,COLS (0,0 selects --size)
    #[arg(long, value_delimiter = ',', num_args = 1.., default_value = "0,0", allow_negative_numbers = true)]
    pub custom_size: Vec<i64>,

    /// Problem size class, 1-4
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub size: i64,

    /// Number of stencil iterations
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub num_iters: usize,

    /// Center value weight
    #[arg(long, default_value_t = 0.25, allow_negative_numbers = true)]
    pub weight_center: f64,

    /// Cardinal values weight
    #[arg(long, default_value_t = 0.15, allow_negative_numbers = true)]
    pub weight_cardinal: f64,

    /// Diagonal values weight
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub weight_diagonal: f64,

    /// Random number generator seed
    #[arg(long, default_value_t = 71594)]
    pub seed: u64,

    /// Validation error threshold
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub val_threshold: f64,

    /// Number of validation errors to print
    #[arg(long, default_value_t = 15, allow_negative_numbers = true)]
    pub val_print_limit: i64,

    /// Value to use for halo data
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub halo_val: f64,

    /// Halo width in elements (default: one cache line)
    #[arg(long)]
    pub halo_width: Option<usize>,

    /// Number of timed passes
    #[arg(short, long, default_value_t = 10)]
    pub passes: usize,

    /// Repeat the seed pattern every N rows
    #[arg(long)]
    pub row_period: Option<NonZeroUsize>,

    /// Repeat the seed pattern every N columns
    #[arg(long)]
    pub col_period: Option<NonZeroUsize>,

    /// Seed pattern fill
    #[arg(long, value_enum, default_value_t = FillMode::IndexProduct)]
    pub fill: FillMode,

    /// Row partitions of the worker team (default: from available cores)
    #[arg(long)]
    pub row_partitions: Option<usize>,

    /// Column partitions of the worker team (default: workers per core)
    #[arg(long)]
    pub col_partitions: Option<usize>,

    /// Element types to run
    #[arg(long, value_enum, default_value_t = Precision::Both)]
    pub precision: Precision,

    /// Dump initial, expected and observed grids
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["stencil2d"])
    }
}

impl Config {
    /// Stencil-independent sanity checks, run before any computation.
    pub fn check(&self) -> Result<()> {
        self.flop_count()?;
        if !(self.val_threshold > 0.0) {
            return Err(StencilError::config("validation threshold must be positive"));
        }
        if self.val_print_limit < 0 {
            return Err(StencilError::config(
                "number of validation errors to print must be non-negative",
            ));
        }
        if self.passes == 0 {
            return Err(StencilError::config("number of passes must be positive"));
        }
        if self.halo_width == Some(0) {
            return Err(StencilError::config("halo width must be positive"));
        }
        Ok(())
    }

    /// Interior rows and columns, from `--custom-size` or `--size`.
    pub fn dims(&self) -> Result<(usize, usize)> {
        if self.custom_size.len() != 2 {
            return Err(StencilError::config("overall size must have two dimensions"));
        }
        let (rows, cols) = (self.custom_size[0], self.custom_size[1]);
        if rows == 0 && cols == 0 {
            return match self.size {
                1..=4 => {
                    let n = PROBLEM_SIZES[(self.size - 1) as usize];
                    Ok((n, n))
                }
                _ => Err(StencilError::config(format!(
                    "size class must be between 1 and 4, got {}",
                    self.size
                ))),
            };
        }
        if rows <= 0 || cols <= 0 {
            return Err(StencilError::config("each size dimension must be positive"));
        }
        Ok((rows as usize, cols as usize))
    }

    /// Floating-point operations of one kernel run.
    pub fn flop_count(&self) -> Result<usize> {
        let (rows, cols) = self.dims()?;
        rows.checked_mul(cols)
            .and_then(|n| n.checked_mul(FLOPS_PER_CELL))
            .and_then(|n| n.checked_mul(self.num_iters))
            .ok_or_else(|| {
                StencilError::config(format!(
                    "{} iterations on a {}x{} grid overflow the FLOP count",
                    self.num_iters, rows, cols
                ))
            })
    }

    pub fn weights<T: Element>(&self) -> Weights<T> {
        Weights::new(self.weight_center, self.weight_cardinal, self.weight_diagonal)
    }

    pub fn halo_width_for<T: Element>(&self) -> usize {
        self.halo_width.unwrap_or_else(T::line_elements)
    }

    pub fn print_limit(&self) -> usize {
        self.val_print_limit.max(0) as usize
    }

    pub fn initializer<T: Element>(&self) -> Initializer {
        Initializer::new(self.seed, self.halo_width_for::<T>(), self.halo_val)
            .with_periods(self.row_period, self.col_period)
            .with_fill(self.fill)
    }

    /// Worker layout: platform default, with either count overridable.
    pub fn partition(&self) -> Result<Partition> {
        let platform = Partition::from_platform();
        Partition::new(
            self.row_partitions.unwrap_or(platform.row_parts()),
            self.col_partitions.unwrap_or(platform.col_parts()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::parse_from(std::iter::once("stencil2d").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.check().unwrap();
        assert_eq!(config.dims().unwrap(), (768, 768));
        assert_eq!(config.num_iters, 1000);
        assert_eq!(config.seed, 71594);
        assert_eq!(config.halo_width_for::<f32>(), 16);
        assert_eq!(config.halo_width_for::<f64>(), 8);
    }

    #[test]
    fn custom_size_overrides_size_class() {
        let config = parse(&["--custom-size", "12,20", "--size", "4"]);
        assert_eq!(config.dims().unwrap(), (12, 20));
    }

    #[test]
    fn size_classes() {
        assert_eq!(parse(&["--size", "3"]).dims().unwrap(), (2048, 2048));
        assert!(parse(&["--size", "0"]).dims().is_err());
        assert!(parse(&["--size", "5"]).dims().is_err());
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(parse(&["--custom-size", "4,0"]).check().is_err());
        assert!(parse(&["--custom-size=-4,4"]).check().is_err());
        assert!(parse(&["--custom-size", "4,4,4"]).check().is_err());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        assert!(parse(&["--val-threshold", "0"]).check().is_err());
        assert!(parse(&["--val-threshold", "-0.5"]).check().is_err());
        assert!(parse(&["--val-threshold", "1e-9"]).check().is_ok());
    }

    #[test]
    fn rejects_negative_print_limit() {
        let err = parse(&["--val-print-limit", "-1"]).check().unwrap_err();
        assert!(matches!(err, StencilError::InvalidConfiguration(_)));
        assert!(parse(&["--val-print-limit", "0"]).check().is_ok());
    }

    #[test]
    fn rejects_zero_passes_and_halo() {
        assert!(parse(&["--passes", "0"]).check().is_err());
        assert!(parse(&["--halo-width", "0"]).check().is_err());
    }

    #[test]
    fn flop_count_overflow_is_rejected() {
        let iters = usize::MAX.to_string();
        let config = parse(&["--custom-size", "4096,4096", "--num-iters", iters.as_str()]);
        assert!(matches!(
            config.check(),
            Err(StencilError::InvalidConfiguration(_))
        ));
        assert_eq!(parse(&["--custom-size", "4,5", "--num-iters", "3"]).flop_count().unwrap(), 660);
    }

    #[test]
    fn partition_overrides() {
        let config = parse(&["--row-partitions", "3", "--col-partitions", "5"]);
        let p = config.partition().unwrap();
        assert_eq!((p.row_parts(), p.col_parts()), (3, 5));
        assert!(parse(&["--row-partitions", "0"]).partition().is_err());
    }

    #[test]
    fn zero_period_is_rejected_by_parser() {
        assert!(Config::try_parse_from(["stencil2d", "--row-period", "0"]).is_err());
    }
}
