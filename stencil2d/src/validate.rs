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

//! Interior comparison of an observed grid against the expected one.

use std::fmt;

use tracing::warn;

use crate::element::Element;
use crate::error::{Result, StencilError};
use crate::grid::Grid;

/// Outcome of one validation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Passed,
    Failed,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Passed => write!(f, "Passed"),
            Validation::Failed => write!(f, "Failed"),
        }
    }
}

/// First interior cell whose relative error exceeds the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub expected: f64,
    pub observed: f64,
    pub rel_error: f64,
}

/// Relative error of `observed` against `expected`; zero when the expected
/// value is exactly zero.
pub fn relative_error<T: Element>(expected: T, observed: T) -> f64 {
    if expected == T::zero() {
        return 0.0;
    }
    ((observed - expected).abs() / expected.abs()).as_f64()
}

/// Scan the interior in row-major order and stop at the first cell whose
/// relative error is above `threshold`. The halo is not compared.
pub fn first_mismatch<T: Element>(
    expected: &Grid<T>,
    observed: &Grid<T>,
    threshold: f64,
) -> Result<Option<Mismatch>> {
    if expected.rows() != observed.rows()
        || expected.cols() != observed.cols()
        || expected.halo_width() != observed.halo_width()
    {
        return Err(StencilError::config(format!(
            "cannot compare a {}x{} grid with a {}x{} grid",
            expected.rows(),
            expected.cols(),
            observed.rows(),
            observed.cols()
        )));
    }

    for i in expected.interior_row_range() {
        let (exp_row, obs_row) = (expected.row(i), observed.row(i));
        for j in expected.interior_col_range() {
            let rel_error = relative_error(exp_row[j], obs_row[j]);
            // NaN counts as a mismatch
            if !(rel_error <= threshold) {
                return Ok(Some(Mismatch {
                    row: i,
                    col: j,
                    expected: exp_row[j].as_f64(),
                    observed: obs_row[j].as_f64(),
                    rel_error,
                }));
            }
        }
    }
    Ok(None)
}

/// Compare, print "Passed" or "Failed", and report the offending cell when
/// `print_limit` allows it.
pub fn validate<T: Element>(
    expected: &Grid<T>,
    observed: &Grid<T>,
    threshold: f64,
    print_limit: usize,
) -> Result<Validation> {
    let outcome = match first_mismatch(expected, observed, threshold)? {
        None => Validation::Passed,
        Some(m) => {
            if print_limit > 0 {
                warn!(
                    row = m.row,
                    col = m.col,
                    expected = m.expected,
                    observed = m.observed,
                    rel_error = m.rel_error,
                    threshold,
                    "validation error"
                );
            }
            Validation::Failed
        }
    };
    println!("{}", outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::Initializer;

    fn seeded() -> Grid<f64> {
        let mut grid = Grid::new(5, 5, 1).unwrap();
        Initializer::new(1, 1, 0.0).initialize(&mut grid);
        grid
    }

    #[test]
    fn identical_grids_pass() {
        let a = seeded();
        assert_eq!(validate(&a, &a.clone(), 1e-12, 15).unwrap(), Validation::Passed);
    }

    #[test]
    fn threshold_boundary() {
        let threshold = 0.1;
        let expected = seeded();
        // interior cell (3, 3) holds 2 * 2 = 4
        let base = expected[(3, 3)];

        let mut above = expected.clone();
        above[(3, 3)] = base * (1.0 + threshold * (1.0 + 1e-9));
        let m = first_mismatch(&expected, &above, threshold).unwrap().unwrap();
        assert_eq!((m.row, m.col), (3, 3));
        assert_eq!(validate(&expected, &above, threshold, 0).unwrap(), Validation::Failed);

        let mut below = expected.clone();
        below[(3, 3)] = base * (1.0 + threshold * (1.0 - 1e-9));
        assert_eq!(validate(&expected, &below, threshold, 0).unwrap(), Validation::Passed);
    }

    #[test]
    fn stops_at_first_violation() {
        let expected = seeded();
        let mut observed = expected.clone();
        observed[(2, 4)] = 100.0;
        observed[(4, 2)] = 100.0;
        let m = first_mismatch(&expected, &observed, 0.1).unwrap().unwrap();
        assert_eq!((m.row, m.col), (2, 4));
    }

    #[test]
    fn halo_is_ignored() {
        let expected = seeded();
        let mut observed = expected.clone();
        observed[(0, 0)] = 1e6;
        observed[(6, 3)] = -1e6;
        assert!(first_mismatch(&expected, &observed, 1e-12).unwrap().is_none());
    }

    #[test]
    fn zero_expected_counts_as_exact() {
        assert_eq!(relative_error(0.0f32, 123.0), 0.0);
        assert_eq!(relative_error(-2.0f64, -2.5), 0.25);
    }

    #[test]
    fn nan_fails() {
        let expected = seeded();
        let mut observed = expected.clone();
        observed[(3, 3)] = f64::NAN;
        assert!(first_mismatch(&expected, &observed, 0.1).unwrap().is_some());
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a: Grid<f64> = Grid::new(4, 4, 1).unwrap();
        let b: Grid<f64> = Grid::new(4, 5, 1).unwrap();
        assert!(first_mismatch(&a, &b, 0.1).is_err());
    }
}
