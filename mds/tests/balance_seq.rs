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

use mds::algorithm::balance::{is_a_heavy, seq};
use mds::algorithm::encode::encode_store;
use mds::common::gen::random_runs;
use mds::common::store::IntervalStore;
use mds::{MdsBuilder, MdsError, Pair};

use common::*;

fn pairs_of(v: &[(u64, u64)]) -> Vec<Pair<u64>> {
    v.iter().map(|&x| Pair::from(x)).collect()
}

#[test]
fn can_find_split_point() {
    let pairs = pairs_of(&[(0, 12), (2, 14), (4, 16), (6, 18), (8, 0)]);
    let store = IntervalStore::from_pairs(&pairs, 20).unwrap();
    let j = store.tree().min(store.nodes()).unwrap();
    assert_eq!(store.pair(j), Pair::new(8, 0));

    let (mut ln, mut c) = (store.list().head().unwrap(), 1);
    let s = is_a_heavy(&store, 2, &mut ln, &mut c, store.output_end(j));
    assert_eq!(s.map(|s| store.p(s)), Some(4));
    assert_eq!((store.p(ln), c), (6, 4));

    let (mut ln, mut c) = (store.list().head().unwrap(), 1);
    assert_eq!(is_a_heavy(&store, 3, &mut ln, &mut c, store.output_end(j)), None);
    assert_eq!((store.p(ln), c), (8, 5));
}

#[test]
fn can_take_huge_balancing_parameter() {
    let pairs = pairs_of(&[(0, 12), (2, 14), (4, 16), (6, 18), (8, 0)]);
    let mut store = IntervalStore::from_pairs(&pairs, 20).unwrap();
    let j = store.tree().min(store.nodes()).unwrap();
    let (mut ln, mut c) = (store.list().head().unwrap(), 1);
    assert_eq!(is_a_heavy(&store, usize::MAX, &mut ln, &mut c, store.output_end(j)), None);
    assert_eq!((store.p(ln), c), (8, 5));

    assert_eq!(seq::balance(&mut store, usize::MAX).splits, 0);
    assert_eq!(store.pairs(), pairs);
}

#[test]
fn can_stop_at_interval_end() {
    let pairs = pairs_of(&[(0, 13), (7, 0), (14, 7)]);
    let store = IntervalStore::from_pairs(&pairs, 20).unwrap();
    let j = store.tree().min(store.nodes()).unwrap();
    let (mut ln, mut c) = (store.list().head().unwrap(), 1);
    assert_eq!(is_a_heavy(&store, 2, &mut ln, &mut c, store.output_end(j)), None);
    assert_eq!((store.p(ln), c), (0, 1));
}

#[test]
fn can_keep_balanced_input() {
    let pairs = pairs_of(&[(0, 13), (7, 0), (14, 7)]);
    let (mds, stats) = MdsBuilder::new(pairs.clone(), 20).with_balancing(2).build_with_stats().unwrap();
    assert_eq!(stats.splits, 0);
    assert_eq!(mds.num_intervals(), 3);
    assert_eq!(mds.pairs(), pairs);
    assert_same_permutation(&mds, &pairs, 20);
}

#[test]
fn can_split_heavy_interval() {
    let pairs = pairs_of(&[(0, 12), (2, 14), (4, 16), (6, 18), (8, 0)]);
    let (mds, stats) = MdsBuilder::new(pairs.clone(), 20).with_balancing(2).build_with_stats().unwrap();
    assert_eq!(stats.splits, 1);
    assert_eq!(mds.d_p(), &[0, 2, 4, 6, 8, 12, 20]);
    assert_eq!(mds.d_q(), &[12, 14, 16, 18, 0, 4]);
    assert_eq!(mds.d_idx(), &[5, 5, 5, 5, 0, 2]);
    assert_eq!(mds.d_offs(), &[0, 2, 4, 6, 0, 0]);
    assert_eq!(mds.max_in_degree(), 3);
    assert_same_permutation(&mds, &pairs, 20);
}

#[test]
fn can_reject_malformed_scenario() {
    let pairs = pairs_of(&[(0, 10), (7, 0), (14, 17)]);
    let err = MdsBuilder::new(pairs, 20).with_balancing(2).build().unwrap_err();
    assert_eq!(err, MdsError::NotAPermutation { at: 7 });

    let pairs = pairs_of(&[(0, 13), (7, 0), (14, 7)]);
    let err = MdsBuilder::new(pairs, 20).with_balancing(1).build().unwrap_err();
    assert_eq!(err, MdsError::BalancingParameter { a: 1 });
}

#[test]
fn can_keep_identity() {
    for a in [2, 3, 8, 100] {
        let (mds, stats) = MdsBuilder::new(vec![Pair::new(0u64, 0)], 5).with_balancing(a).build_with_stats().unwrap();
        assert_eq!(stats.splits, 0);
        assert_eq!(mds.num_intervals(), 1);
        assert_eq!(mds.d_p(), &[0, 5]);
        assert_eq!((mds.idx(0), mds.offs(0)), (0, 0));
    }
}

#[test]
fn can_balance_comb() {
    for (m, tail) in [(10, 100), (64, 65), (300, 1000)] {
        let (pairs, n) = comb(m, tail);
        for a in [2, 3, 5] {
            let mut store = IntervalStore::from_pairs(&pairs, n).unwrap();
            let stats = seq::balance(&mut store, a);
            assert!(store.check());
            assert!(stats.splits > 0);
            assert_eq!(store.list().len(), pairs.len() + stats.splits);

            let mds = encode_store(&store).unwrap();
            assert!(mds.max_in_degree() < 2 * a, "m = {m}, a = {a}");
            assert!(mds.num_intervals() <= 2 * pairs.len());
            assert_same_permutation(&mds, &pairs, n);
            assert_consistent(&mds);
        }
    }
}

#[test]
fn can_balance_random_runs() {
    for seed in 0..20 {
        let n = 5000;
        let pairs = random_runs(n, 1 + (seed as usize * 97) % 800, seed);
        for a in [2, 4] {
            let mds = MdsBuilder::new(pairs.clone(), n).with_balancing(a).build().unwrap();
            assert!(mds.max_in_degree() < 2 * a);
            assert!(mds.num_intervals() <= 2 * pairs.len());
            assert_same_permutation(&mds, &pairs, n);
            assert_consistent(&mds);
        }
    }
}

#[test]
fn can_balance_lf_runs() {
    let text = b"mississippi_banana_bandana_abracadabra_mississippi_banana".repeat(3);
    let l = bwt(&text);
    let pairs = lf_runs(&l);
    let n = l.len() as u64;
    for a in [2, 3, 4] {
        let mds = MdsBuilder::new(pairs.clone(), n).with_balancing(a).build().unwrap();
        assert!(mds.max_in_degree() < 2 * a);
        assert_same_permutation(&mds, &pairs, n);
        assert_consistent(&mds);
    }
}

#[test]
fn can_balance_deterministically() {
    let pairs = random_runs(20_000u64, 3000, 11);
    let a = MdsBuilder::new(pairs.clone(), 20_000).with_balancing(2).build().unwrap();
    let b = MdsBuilder::new(pairs, 20_000).with_balancing(2).build().unwrap();
    assert_eq!(a, b);
}
