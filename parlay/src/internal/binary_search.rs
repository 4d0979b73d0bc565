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

const BIN_SEARCH_BASE: usize = 16;


fn linear_search_leq<K, F>(start: usize, end: usize, key: K, get: &F) -> usize
where
    K: Copy + Ord,
    F: Fn(usize) -> K,
{
    (start..end)
        .find(|&i| get(i) > key)
        .unwrap_or(end)
}

/// Returns the largest `i < len` with `get(i) <= key`, or `None` if every
/// element is greater than `key`. `get` must be non-decreasing in `i`.
pub fn max_leq_by<K, F>(len: usize, key: K, get: F) -> Option<usize>
where
    K: Copy + Ord,
    F: Fn(usize) -> K,
{
    let (mut start, mut end) = (0, len);

    // first index with get(i) > key lies in [start, end]
    while end - start > BIN_SEARCH_BASE {
        let mid = start + (end - start) / 2;
        if get(mid) > key { end = mid; }
        else { start = mid + 1; }
    }

    linear_search_leq(start, end, key, &get).checked_sub(1)
}

/// [`max_leq_by`] over a sorted slice.
pub fn max_leq<T: Copy + Ord>(inp: &[T], key: T) -> Option<usize> {
    max_leq_by(inp.len(), key, |i| inp[i])
}
