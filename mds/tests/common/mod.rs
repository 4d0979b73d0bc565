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

#![allow(dead_code)]

use mds::common::input::interval_len;
use mds::{MoveStructure, Pair};

/// The permutation described by p-sorted `pairs`, as an array.
pub fn expand(pairs: &[Pair<u64>], n: u64) -> Vec<u64> {
    let mut pi = vec![0; n as usize];
    for (i, v) in pairs.iter().enumerate() {
        for o in 0..interval_len(pairs, i, n) {
            pi[(v.p + o) as usize] = v.q + o;
        }
    }
    pi
}

pub fn assert_same_permutation(mds: &MoveStructure<u64>, pairs: &[Pair<u64>], n: u64) {
    let pi = expand(pairs, n);
    for x in 0..n {
        assert_eq!(mds.map(x), pi[x as usize], "pi({x})");
    }
}

/// Every encoded output start lies where `D_idx` and `D_offs` say.
pub fn assert_consistent(mds: &MoveStructure<u64>) {
    let k = mds.num_intervals();
    assert_eq!(mds.d_p().len(), k + 1);
    assert_eq!(mds.p(0), 0);
    assert_eq!(mds.p(k), mds.n());
    for i in 0..k {
        let j = mds.idx(i) as usize;
        assert_eq!(mds.p(j) + mds.offs(i), mds.q(i));
        assert!(mds.offs(i) < mds.len(j));
    }
}

/// Burrows-Wheeler transform of `text` followed by a unique smallest
/// terminator, by sorting all rotations.
pub fn bwt(text: &[u8]) -> Vec<u16> {
    let s: Vec<u16> = text.iter().map(|&c| c as u16 + 1).chain(std::iter::once(0)).collect();
    let n = s.len();
    let mut rot: Vec<usize> = (0..n).collect();
    rot.sort_by(|&a, &b| (0..n).map(|i| s[(a + i) % n]).cmp((0..n).map(|i| s[(b + i) % n])));
    rot.iter().map(|&r| s[(r + n - 1) % n]).collect()
}

/// Run pairs of the LF mapping of a BWT: one pair per run of equal
/// characters, mapping the run start to its LF image.
pub fn lf_runs(l: &[u16]) -> Vec<Pair<u64>> {
    let mut count = vec![0u64; 1 << 16];
    for &c in l { count[c as usize] += 1; }
    let mut c_arr = vec![0u64; 1 << 16];
    let mut acc = 0;
    for (c, &cnt) in count.iter().enumerate() {
        c_arr[c] = acc;
        acc += cnt;
    }
    let mut seen = vec![0u64; 1 << 16];
    let mut pairs = vec![];
    for (i, &c) in l.iter().enumerate() {
        if i == 0 || l[i - 1] != c {
            pairs.push(Pair::new(i as u64, c_arr[c as usize] + seen[c as usize]));
        }
        seen[c as usize] += 1;
    }
    pairs
}

/// Pairs whose single long output interval swallows many short input
/// intervals: `m` runs of length 1 at the front mapped to the back, then
/// one long run mapped to the front.
pub fn comb(m: u64, tail: u64) -> (Vec<Pair<u64>>, u64) {
    let n = m + tail;
    let mut pairs: Vec<Pair<u64>> = (0..m).map(|i| Pair::new(i, tail + i)).collect();
    pairs.push(Pair::new(m, 0));
    (pairs, n)
}
