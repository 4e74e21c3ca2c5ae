// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tukey window (α = 0.5), cached by block length.

const ALPHA: f64 = 0.5;

pub(crate) struct TukeyWindow {
    cached_len: usize,
    coefficients: Vec<f64>,
}

impl TukeyWindow {
    pub(crate) fn new() -> Self {
        Self { cached_len: 0, coefficients: Vec::new() }
    }

    /// Recompute the window if `n` differs from the cached length; otherwise reuse it.
    pub(crate) fn ensure(&mut self, n: usize) {
        if self.cached_len == n && !self.coefficients.is_empty() {
            return;
        }
        self.coefficients.clear();
        self.coefficients.reserve(n);

        let n_minus_1 = (n - 1) as f64;
        // Intermediate truncation to an unsigned integer before the final division matches the
        // reference's literal operator order.
        let window1 = ((ALPHA * n_minus_1) as u32) / 2;
        let window2 = (n_minus_1 * (1.0 - ALPHA / 2.0)) as u32;

        for i in 0..n as u32 {
            let v = if i <= window1 {
                0.5 * (1.0 + (std::f64::consts::PI * ((2.0 * i as f64) / (ALPHA * n_minus_1) - 1.0)).cos())
            } else if i <= window2 {
                1.0
            } else {
                0.5 * (1.0
                    + (std::f64::consts::PI * ((2.0 * i as f64) / (ALPHA * n_minus_1) - 2.0 / ALPHA + 1.0))
                        .cos())
            };
            self.coefficients.push(v);
        }
        self.cached_len = n;
    }

    pub(crate) fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}
