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

//! Benchmark orchestration: reference run, timed passes, validation.

use std::time::Instant;

use prk_common::wtime_since;
use tracing::info;

use crate::config::Config;
use crate::element::Element;
use crate::error::Result;
use crate::factory::{ReferenceStencilFactory, StencilFactory, TiledStencilFactory};
use crate::grid::Grid;
use crate::validate::{validate, Validation};

/// One timed measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRecord {
    pub test: String,
    pub attributes: String,
    pub unit: &'static str,
    pub value: f64,
}

/// Aggregate over all passes of one test.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub test: String,
    pub attributes: String,
    pub unit: &'static str,
    pub passes: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Collected measurements, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ResultDatabase {
    records: Vec<ResultRecord>,
}

impl ResultDatabase {
    pub fn add_result(&mut self, test: &str, attributes: &str, unit: &'static str, value: f64) {
        self.records.push(ResultRecord {
            test: test.to_string(),
            attributes: attributes.to_string(),
            unit,
            value,
        });
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// One summary per distinct (test, attributes, unit), first-seen order.
    pub fn summaries(&self) -> Vec<ResultSummary> {
        let mut out: Vec<ResultSummary> = Vec::new();
        for r in &self.records {
            let found = out
                .iter_mut()
                .find(|s| s.test == r.test && s.attributes == r.attributes && s.unit == r.unit);
            match found {
                Some(s) => {
                    s.min = s.min.min(r.value);
                    s.max = s.max.max(r.value);
                    s.mean += (r.value - s.mean) / (s.passes + 1) as f64;
                    s.passes += 1;
                }
                None => out.push(ResultSummary {
                    test: r.test.clone(),
                    attributes: r.attributes.clone(),
                    unit: r.unit,
                    passes: 1,
                    min: r.value,
                    max: r.value,
                    mean: r.value,
                }),
            }
        }
        out
    }

    pub fn print_summary(&self) {
        println!(
            "{:<12} {:<20} {:<8} {:>6} {:>12} {:>12} {:>12}",
            "test", "atts", "units", "passes", "min", "max", "mean"
        );
        for s in self.summaries() {
            println!(
                "{:<12} {:<20} {:<8} {:>6} {:>12.4} {:>12.4} {:>12.4}",
                s.test, s.attributes, s.unit, s.passes, s.min, s.max, s.mean
            );
        }
    }
}

/// Everything a benchmark run produced.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub results: ResultDatabase,
    /// (test name, outcome) per pass.
    pub outcomes: Vec<(String, Validation)>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|(_, v)| *v == Validation::Passed)
    }
}

/// Option checks for one element type: common checks, then each factory's.
pub fn check_options<T: Element>(config: &Config) -> Result<()> {
    config.check()?;
    StencilFactory::<T>::check_options(&ReferenceStencilFactory, config)?;
    StencilFactory::<T>::check_options(&TiledStencilFactory, config)?;
    Ok(())
}

/// Run the selected precisions. All options are checked before anything is
/// computed.
pub fn run_benchmark(config: &Config) -> Result<Report> {
    check_options::<f32>(config)?;
    check_options::<f64>(config)?;

    let mut report = Report::default();
    if config.precision.single() {
        println!("Running Single Precision test :");
        do_test::<f32>(&mut report, config)?;
    }
    if config.precision.double() {
        println!("Running Double Precision test :");
        do_test::<f64>(&mut report, config)?;
    }
    Ok(report)
}

/// Reference run once, then `passes` timed and validated kernel runs.
pub fn do_test<T: Element>(report: &mut Report, config: &Config) -> Result<()> {
    let test = format!("{}_Sten2D", T::PRECISION);
    let (rows, cols) = config.dims()?;
    let halo = config.halo_width_for::<T>();
    let n_iters = config.num_iters;
    let description = format!("{}:{}x{}", n_iters, rows, cols);

    let init = config.initializer::<T>();
    let reference = StencilFactory::<T>::build(&ReferenceStencilFactory, config)?;
    let tiled = StencilFactory::<T>::build(&TiledStencilFactory, config)?;

    let nflops = config.flop_count()?;

    println!("Grid size            = {}x{}", rows, cols);
    println!("Halo width           = {}", halo);
    println!("Number of iterations = {}", n_iters);
    println!("FLOP are = {}", nflops);

    let mut expected: Grid<T> = Grid::new(rows, cols, halo)?;
    init.initialize(&mut expected);
    if config.verbose {
        println!("initial state:\n{}", expected);
    }

    let t0 = Instant::now();
    reference.apply(&mut expected, n_iters)?;
    info!(test = %test, seconds = wtime_since(t0), "reference stencil done");
    if config.verbose {
        println!("expected result:\n{}", expected);
    }

    println!("Passes:{}", config.passes);
    for pass in 0..config.passes {
        let mut observed: Grid<T> = Grid::new(rows, cols, halo)?;
        init.initialize(&mut observed);

        let t0 = Instant::now();
        tiled.apply(&mut observed, n_iters)?;
        let elapsed = wtime_since(t0);

        let gflops = if elapsed > 0.0 {
            (nflops as f64 / elapsed) / 1.0e9
        } else {
            0.0
        };
        report.results.add_result(&test, &description, "GFLOPS", gflops);
        report.results.add_result(&test, &description, "s", elapsed);
        info!(test = %test, pass, seconds = elapsed, gflops, "pass timed");

        if config.verbose {
            println!("observed result, pass {}:\n{}", pass, observed);
        }

        let outcome = validate(&expected, &observed, config.val_threshold, config.print_limit())?;
        report.outcomes.push((test.clone(), outcome));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_group_by_test() {
        let mut db = ResultDatabase::default();
        db.add_result("SP_Sten2D", "1:4x4", "GFLOPS", 1.0);
        db.add_result("SP_Sten2D", "1:4x4", "GFLOPS", 3.0);
        db.add_result("DP_Sten2D", "1:4x4", "GFLOPS", 2.0);
        let s = db.summaries();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].passes, 2);
        assert_eq!((s[0].min, s[0].max, s[0].mean), (1.0, 3.0, 2.0));
        assert_eq!(s[1].test, "DP_Sten2D");
        assert_eq!(db.records().len(), 3);
    }

    #[test]
    fn oversized_flop_count_stops_before_computing() {
        let mut config = Config::default();
        config.num_iters = usize::MAX;
        assert!(matches!(
            run_benchmark(&config),
            Err(crate::StencilError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn invalid_options_stop_before_computing() {
        let mut config = Config::default();
        config.val_threshold = 0.0;
        assert!(run_benchmark(&config).is_err());
    }
}
