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

use clap::Parser;
use stencil2d::driver::run_benchmark;
use stencil2d::{
    validate, Config, Element, Grid, Initializer, Partition, ReferenceStencil, Stencil,
    TiledStencil, Validation, Weights,
};

fn small_grid_both_paths<T: Element>(tolerance: f64) {
    let weights: Weights<T> = Weights::new(0.25, 0.15, 0.05);
    let init = Initializer::new(71594, 1, 0.0);

    let mut expected: Grid<T> = Grid::new(4, 4, 1).unwrap();
    init.initialize(&mut expected);
    ReferenceStencil::new(weights).apply(&mut expected, 1).unwrap();

    let mut observed: Grid<T> = Grid::new(4, 4, 1).unwrap();
    init.initialize(&mut observed);
    TiledStencil::new(weights, Partition::new(2, 2).unwrap())
        .apply(&mut observed, 1)
        .unwrap();

    for i in 1..5 {
        for j in 1..5 {
            let (e, o) = (expected[(i, j)].as_f64(), observed[(i, j)].as_f64());
            assert!((e - o).abs() <= tolerance, "({i}, {j}): {e} vs {o}");
        }
    }

    // hand-computed cells of the index-product pattern
    assert!((observed[(1, 1)].as_f64() - 0.05).abs() <= tolerance);
    assert!((observed[(2, 2)].as_f64() - 1.05).abs() <= tolerance);

    assert_eq!(validate(&expected, &observed, 1e-6, 15).unwrap(), Validation::Passed);
}

#[test]
fn four_by_four_single_precision() {
    small_grid_both_paths::<f32>(1e-6);
}

#[test]
fn four_by_four_double_precision() {
    small_grid_both_paths::<f64>(1e-12);
}

#[test]
fn benchmark_run_validates_every_pass() {
    let config = Config::parse_from([
        "stencil2d",
        "--custom-size",
        "13,9",
        "--num-iters",
        "5",
        "--passes",
        "3",
        "--halo-width",
        "1",
        "--halo-val",
        "0.5",
        "--row-partitions",
        "3",
        "--col-partitions",
        "2",
    ]);
    let report = run_benchmark(&config).unwrap();
    assert_eq!(report.outcomes.len(), 6);
    assert!(report.all_passed());
    assert_eq!(report.outcomes[0].0, "SP_Sten2D");
    assert_eq!(report.outcomes[5].0, "DP_Sten2D");
    // GFLOPS and seconds per pass
    assert_eq!(report.results.records().len(), 12);
}

#[test]
fn random_periodic_seed_validates() {
    let config = Config::parse_from([
        "stencil2d",
        "--custom-size",
        "20,17",
        "--num-iters",
        "4",
        "--passes",
        "1",
        "--fill",
        "random",
        "--row-period",
        "6",
        "--col-period",
        "5",
        "--precision",
        "double",
        "--row-partitions",
        "4",
        "--col-partitions",
        "3",
    ]);
    let report = run_benchmark(&config).unwrap();
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.all_passed());
}

#[test]
fn configuration_errors_are_distinct_from_failures() {
    let config = Config::parse_from(["stencil2d", "--custom-size", "4,4", "--val-print-limit=-3"]);
    let err = run_benchmark(&config).unwrap_err();
    assert!(matches!(err, stencil2d::StencilError::InvalidConfiguration(_)));
}
