// ============================================================================
// This code is part of Rusty-PBBS.
// ----------------------------------------------------------------------------
// MIT License
// 
// Copyright (c) 2023-present Javad Abdi, Mark C. Jeffrey
// 
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
// 
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
// 
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
// ============================================================================

use std::fmt;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[path = "../time_loop.rs"] mod time_loop;

use mds::common::gen::random_runs;
use mds::{BalanceConfig, MdsBuilder, MoveStructure, Result};
use time_loop::time_loop;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Algs { Seq, Par, Length }

impl fmt::Display for Algs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Algs::Seq => write!(f, "seq"),
            Algs::Par => write!(f, "par"),
            Algs::Length => write!(f, "length"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// the algorithm to use
    #[clap(short, long, value_parser, default_value_t = Algs::Par)]
    algorithm: Algs,

    /// the domain size
    #[clap(short, long, value_parser, default_value_t = 1 << 24)]
    n: u64,

    /// the number of runs of the generated permutation
    #[clap(short, long, value_parser, default_value_t = 1 << 16)]
    k: usize,

    /// the balancing parameter
    #[clap(short = 'b', long, value_parser, default_value_t = 8)]
    balancing: usize,

    /// the number of workers, 0 for all cores
    #[clap(short, long, value_parser, default_value_t = 0)]
    workers: usize,

    /// the length bound of the length algorithm
    #[clap(short, long, value_parser, default_value_t = 1 << 10)]
    l_max: u64,

    /// the seed of the generated permutation
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// the number of rounds to execute the benchmark
    #[clap(short, long, value_parser, required = false, default_value_t = 1)]
    rounds: usize,
}

fn run(args: &Args) -> Result<(MoveStructure<u64>, Duration)> {
    let pairs = random_runs(args.n, args.k, args.seed);
    let workers = match (args.algorithm, args.workers) {
        (Algs::Seq, _) => 1,
        (_, 0) => BalanceConfig::max_workers(args.n),
        (_, w) => w,
    };
    let build = || {
        let b = MdsBuilder::new(pairs.clone(), args.n).with_balancing(args.balancing).with_workers(workers);
        match args.algorithm {
            Algs::Length => b.build_length_bounded(args.l_max),
            _ => b.build(),
        }
    };

    let mut r = build();
    let mean = time_loop(
        "mds",
        args.rounds,
        Duration::new(1, 0),
        || {},
        || { r = build(); },
        || {}
    );
    Ok((r?, mean))
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    match run(&args) {
        Ok((r, d)) => {
            println!("result:  k = {}, k' = {}, max in-degree = {}, max length = {}",
                args.k, r.num_intervals(), r.max_in_degree(), r.max_length());
            println!("mean:  {:?}", d);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
