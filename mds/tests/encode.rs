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

mod common;

use mds::algorithm::balance::seq;
use mds::algorithm::encode::{encode_pairs, encode_store};
use mds::common::gen::random_runs;
use mds::common::store::IntervalStore;
use mds::{MdsBuilder, Pair};

use common::*;

#[test]
fn can_encode_both_ways() {
    let n = 30_000u64;
    for seed in 0..6 {
        let pairs = random_runs(n, 1000 + 500 * seed as usize, seed);
        let mut store = IntervalStore::from_pairs(&pairs, n).unwrap();
        seq::balance(&mut store, 2);

        let a = encode_store(&store).unwrap();
        let b = encode_pairs(store.pairs(), n).unwrap();
        assert_eq!(a, b);
        assert_consistent(&a);
    }
}

#[test]
fn can_encode_unbalanced() {
    let pairs = vec![Pair::new(0u64, 13), Pair::new(7, 0), Pair::new(14, 7)];
    let mds = MdsBuilder::new(pairs.clone(), 20).build_unbalanced().unwrap();
    assert_eq!(mds.d_p(), &[0, 7, 14, 20]);
    assert_eq!(mds.d_q(), &[13, 0, 7]);
    assert_eq!(mds.d_idx(), &[1, 0, 1]);
    assert_eq!(mds.d_offs(), &[6, 0, 0]);
    assert_eq!(mds.in_degree(0), 1);
    assert_eq!(mds.max_length(), 7);
    assert_same_permutation(&mds, &pairs, 20);
}

#[test]
fn can_encode_small_positions() {
    let pairs: Vec<Pair<u16>> = vec![Pair::new(0, 60_000), Pair::new(5_535, 0)];
    let mds = MdsBuilder::new(pairs, 65_535).with_balancing(2).build().unwrap();
    assert_eq!(mds.num_intervals(), 2);
    assert_eq!(mds.map(0), 60_000);
    assert_eq!(mds.map(65_534), 59_999);
}

#[test]
fn can_count_in_degrees() {
    let (pairs, n) = comb(20, 30);
    let mds = MdsBuilder::new(pairs, n).build_unbalanced().unwrap();
    // the long run's output interval [0, 30) holds all 21 starts
    assert_eq!(mds.in_degree(20), 21);
    assert_eq!(mds.max_in_degree(), 21);
    assert_eq!(mds.in_degree(0), 0);
}
