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

use std::time::{ Instant, Duration };

/// Phase timer. Every `next` closes the current phase and reports its
/// duration as a `tracing` event under the timer's name.
pub struct Timer<'a> {
    total_so_far: Duration,
    last: Instant,
    on: bool,
    name: &'a str,
    phases: Vec<(&'a str, Duration)>,
}

impl<'a> Timer<'a> {
    fn report(&self, d: Duration, phase: &str) {
        tracing::debug!(
            target: "parlay::timer",
            timer = self.name,
            phase,
            secs = d.as_secs_f64(),
            "phase finished"
        );
    }

    /// Creates a new timer with the given name. The timer is off.
    pub fn new(name: &'a str) -> Self {
        Timer {
            total_so_far: Duration::ZERO,
            last: Instant::now(),
            on: false,
            name,
            phases: vec![],
        }
    }

    /// Creates a timer that is already running.
    pub fn started(name: &'a str) -> Self {
        let mut t = Self::new(name);
        t.start();
        t
    }

    pub fn start(&mut self) {
        self.on = true;
        self.last = Instant::now();
    }

    /// Stops the timer and returns the time since the last `start` or `next`.
    pub fn stop(&mut self) -> Duration {
        if !self.on { return Duration::ZERO; }
        self.on = false;
        let d = Instant::now() - self.last;
        self.total_so_far += d;
        d
    }

    pub fn reset(&mut self) {
        self.total_so_far = Duration::ZERO;
        self.phases.clear();
        self.on = false;
    }

    /// Returns the time since the last `start` or `next`.
    pub fn next_time(&mut self) -> Duration {
        if !self.on {
            return Duration::ZERO;
        }
        let t = Instant::now();
        let td = t - self.last;
        self.total_so_far += td;
        self.last = t;
        td
    }

    /// Closes the running phase under `phase` and reports it.
    pub fn next(&mut self, phase: &'a str) -> Duration {
        let nt = self.next_time();
        if self.on {
            self.phases.push((phase, nt));
            self.report(nt, phase);
        }
        nt
    }

    /// Total time the timer was on since `new` or `reset`.
    pub fn total_time(&self) -> Duration {
        if self.on {
            self.total_so_far + (Instant::now() - self.last)
        } else {
            self.total_so_far
        }
    }

    /// Durations of all phases closed so far, in order.
    pub fn phases(&self) -> &[(&'a str, Duration)] {
        &self.phases
    }

    pub fn total(&self) {
        let tt = self.total_time();
        self.report(tt, "total");
    }
}
