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

///////////////////////////////////////////////
//
// NAME:    stencil2d
//
// PURPOSE: This program measures the rate at which a nine-point weighted
//          smoothing filter can be applied to a bordered 2D grid by a team
//          of workers that each own one tile of the grid, and checks the
//          result against a sequential implementation.
//
// USAGE:   stencil2d [--custom-size <rows>,<cols> | --size <1-4>]
//                    [--num-iters <n>] [--passes <n>] [options]
//
//          Run with --help for the full list of options.
//
//          The output consists of a pass/fail line per timed pass and
//          timing statistics.
//
// HISTORY: Based on the Stencil2D benchmark of the Scalable HeterOgeneous
//          Computing (SHOC) suite, written for Intel MIC.
//
///////////////////////////////////////////////

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use stencil2d::{driver, Config};

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let config = Config::parse();
    setup_logging(config.verbose, config.quiet);

    println!("Parallel Research Kernels");
    println!("Rust 9-point stencil execution on 2D grid");

    let report = match driver::run_benchmark(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            println!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    report.results.print_summary();
    let summaries = report.results.summaries();
    for s in summaries.iter().filter(|s| s.unit == "GFLOPS") {
        let avgtime = summaries
            .iter()
            .find(|t| t.test == s.test && t.unit == "s")
            .map_or(0.0, |t| t.mean);
        println!(
            "{}: Rate (GFlops/s): {:10.3} Avg time (s): {:10.3}",
            s.test, s.mean, avgtime
        );
    }

    if report.all_passed() {
        println!("Solution validates");
        ExitCode::SUCCESS
    } else {
        println!("ERROR: at least one pass failed validation");
        ExitCode::FAILURE
    }
}
