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

use std::time::Duration;

use parlay::random::Random;
use parlay::{max_leq, max_leq_by, Timer};

#[test]
fn can_find_max_leq() {
    let v: Vec<u32> = (0..1000).map(|i| 2 * i).collect();
    assert_eq!(max_leq(&v, 0), Some(0));
    assert_eq!(max_leq(&v, 1), Some(0));
    assert_eq!(max_leq(&v, 777), Some(388));
    assert_eq!(max_leq(&v, 5000), Some(999));
    assert_eq!(max_leq(&v[1..], 1), None);
    assert_eq!(max_leq::<u32>(&[], 3), None);
}

#[test]
fn can_find_max_leq_with_duplicates() {
    let v = [1, 1, 2, 2, 2, 5, 5, 9];
    assert_eq!(max_leq(&v, 2), Some(4));
    assert_eq!(max_leq(&v, 4), Some(4));
    assert_eq!(max_leq_by(v.len(), 5, |i| v[i]), Some(6));
}

#[test]
fn can_draw_reproducibly() {
    let r = Random::new(42);
    let a: Vec<u64> = (0..100).map(|i| r.ith_below(i, 10)).collect();
    let b: Vec<u64> = (0..100).map(|i| Random::new(42).ith_below(i, 10)).collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|&x| x < 10));
    assert_ne!(r.fork(1).ith_rand(0), r.fork(2).ith_rand(0));
}

#[test]
fn can_shuffle() {
    let mut v: Vec<usize> = (0..500).collect();
    Random::new(3).shuffle(&mut v);
    assert_ne!(v, (0..500).collect::<Vec<_>>());
    v.sort_unstable();
    assert_eq!(v, (0..500).collect::<Vec<_>>());
}

#[test]
fn can_time_phases() {
    let mut t = Timer::new("test");
    assert_eq!(t.next("idle"), Duration::ZERO);
    t.start();
    std::thread::sleep(Duration::from_millis(5));
    let d = t.next("sleep");
    assert!(d >= Duration::from_millis(5));
    t.stop();
    assert_eq!(t.phases().len(), 1);
    assert_eq!(t.phases()[0].0, "sleep");
    assert!(t.total_time() >= d);
    t.total();
    t.reset();
    assert!(t.phases().is_empty());
    assert_eq!(t.total_time(), Duration::ZERO);
}
