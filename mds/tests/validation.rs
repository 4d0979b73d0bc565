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

use mds::algorithm::balance::par;
use mds::algorithm::length_bounded::construct;
use mds::common::input::validate;
use mds::common::store::IntervalStore;
use mds::{BalanceConfig, MdsBuilder, MdsError, Pair};

fn pairs_of(v: &[(u32, u32)]) -> Vec<Pair<u32>> {
    v.iter().map(|&x| Pair::from(x)).collect()
}

#[test]
fn can_accept_permutations() {
    assert_eq!(validate(&pairs_of(&[(0, 0)]), 1), Ok(()));
    assert_eq!(validate(&pairs_of(&[(0, 2), (2, 0)]), 4), Ok(()));
    assert_eq!(validate(&pairs_of(&[(0, 13), (7, 0), (14, 7)]), 20), Ok(()));
}

#[test]
fn can_reject_empty() {
    assert_eq!(validate::<u32>(&[], 10), Err(MdsError::EmptyInput));
    assert_eq!(validate(&pairs_of(&[(0, 0)]), 0), Err(MdsError::EmptyDomain));
}

#[test]
fn can_reject_bad_positions() {
    assert_eq!(validate(&pairs_of(&[(1, 0)]), 4), Err(MdsError::FirstPairNotAtZero { p: 1 }));
    assert_eq!(
        validate(&pairs_of(&[(0, 1), (4, 0)]), 4),
        Err(MdsError::PositionOutOfRange { index: 1, value: 4, n: 4 })
    );
    assert_eq!(
        validate(&pairs_of(&[(0, 2), (3, 9)]), 4),
        Err(MdsError::PositionOutOfRange { index: 1, value: 9, n: 4 })
    );
}

#[test]
fn can_reject_unsorted() {
    assert_eq!(validate(&pairs_of(&[(0, 0), (2, 2), (2, 3)]), 4), Err(MdsError::UnsortedPairs { index: 2 }));
    assert_eq!(validate(&pairs_of(&[(0, 0), (3, 2), (1, 1)]), 4), Err(MdsError::UnsortedPairs { index: 2 }));
}

#[test]
fn can_reject_non_permutations() {
    // outputs [1, 3) and [0, 2) overlap
    assert_eq!(validate(&pairs_of(&[(0, 1), (2, 0)]), 4), Err(MdsError::NotAPermutation { at: 1 }));
    // outputs [0, 2) and [3, 5) leave a gap and run past n
    assert_eq!(validate(&pairs_of(&[(0, 0), (2, 3)]), 4), Err(MdsError::NotAPermutation { at: 2 }));
}

#[test]
fn can_reject_before_construction() {
    // every output lands in [0, 3)
    let folded: Vec<Pair<u32>> = (0..40).map(|i| Pair::new(i, (7 * i) % 3)).collect();
    let unsorted = pairs_of(&[(0, 10), (15, 0), (12, 5), (18, 18)]);
    let cfg = BalanceConfig::new(2, 2);

    assert!(matches!(par::balance(&folded, 40, &cfg), Err(MdsError::NotAPermutation { .. })));
    assert_eq!(par::balance(&unsorted, 20, &cfg).unwrap_err(), MdsError::UnsortedPairs { index: 2 });

    assert!(matches!(construct(folded.clone(), 40, 4), Err(MdsError::NotAPermutation { .. })));
    assert_eq!(construct(unsorted.clone(), 20, 4).unwrap_err(), MdsError::UnsortedPairs { index: 2 });

    assert!(matches!(IntervalStore::from_pairs(&folded, 40), Err(MdsError::NotAPermutation { .. })));
    assert_eq!(IntervalStore::from_pairs(&unsorted, 20).unwrap_err(), MdsError::UnsortedPairs { index: 2 });
}

#[test]
fn can_check_config() {
    assert_eq!(BalanceConfig::default(), BalanceConfig::new(8, 1));
    assert_eq!(BalanceConfig::new(1, 1).validate(100u32), Err(MdsError::BalancingParameter { a: 1 }));
    assert_eq!(
        BalanceConfig::new(2, 2).validate(1u32),
        Err(MdsError::WorkerCount { workers: 2, max: 1 })
    );
    assert!(BalanceConfig::new(2, 1).validate(1u32).is_ok());

    let b = MdsBuilder::new(pairs_of(&[(0, 0)]), 3).with_balancing(4).with_workers(1);
    assert_eq!(*b.config(), BalanceConfig::new(4, 1));
}

#[test]
fn can_format_errors() {
    assert_eq!(
        MdsError::UnsortedPairs { index: 3 }.to_string(),
        "pairs are not strictly increasing by p at index 3"
    );
    assert_eq!(MdsError::WorkerPanicked { worker: 2 }.to_string(), "worker thread 2 panicked");
}
