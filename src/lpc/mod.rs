// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LPC analysis: Tukey window → autocorrelation → Levinson–Durbin → quantization.

mod analysis;
mod residual;
mod window;

pub(crate) use residual::lpc_residuals;

use window::TukeyWindow;

pub(crate) const MAX_LPC_ORDER: usize = 8;

/// Per-encoder-session scratch state for LPC analysis: the cached Tukey window, the windowed
/// signal buffer, and the Levinson–Durbin working arrays. Reused block to block.
pub(crate) struct LpcAnalyzer {
    window: TukeyWindow,
    windowed: Vec<f64>,
    autocorrelation: [f64; MAX_LPC_ORDER + 1],
    coefficients: [[f64; MAX_LPC_ORDER]; MAX_LPC_ORDER],
    silent: bool,
}

impl LpcAnalyzer {
    pub(crate) fn new() -> Self {
        Self {
            window: TukeyWindow::new(),
            windowed: Vec::new(),
            autocorrelation: [0.0; MAX_LPC_ORDER + 1],
            coefficients: [[0.0; MAX_LPC_ORDER]; MAX_LPC_ORDER],
            silent: false,
        }
    }

    /// Run the window/autocorrelation/Levinson–Durbin pipeline over `samples`.
    ///
    /// Returns `true` for a silent (zero-variance) block, in which case only
    /// `quantize(4)` (all zeros) is meaningful; order 8 is never computed.
    pub(crate) fn analyze(&mut self, samples: &[i32]) -> bool {
        self.window.ensure(samples.len());
        let window = self.window.coefficients();

        self.windowed.clear();
        self.windowed.extend(samples.iter().zip(window).map(|(&s, &w)| s as f64 * w));

        analysis::autocorrelate(&self.windowed, &mut self.autocorrelation);

        self.silent = self.autocorrelation[0] == 0.0;
        if !self.silent {
            let mut error = [0.0; MAX_LPC_ORDER];
            analysis::levinson_durbin(&self.autocorrelation, &mut self.coefficients, &mut error);
        }
        self.silent
    }

    /// Quantize the coefficients found by the most recent [`Self::analyze`] call at `order`
    /// (4 or 8). Only valid to call with `order == 4` after a silent-block `analyze`.
    pub(crate) fn quantize(&self, order: usize) -> Vec<i32> {
        if self.silent {
            return vec![0; order];
        }
        analysis::quantize(&self.coefficients[order - 1][..order])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_block_is_detected_and_quantizes_to_zero() {
        let mut lpc = LpcAnalyzer::new();
        let silent = lpc.analyze(&vec![0i32; 32]);
        assert!(silent);
        assert_eq!(lpc.quantize(4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn non_silent_block_produces_order_4_and_8_coefficients() {
        let mut lpc = LpcAnalyzer::new();
        let samples: Vec<i32> = (0..64).map(|i| ((i * 37) % 53) - 26).collect();
        let silent = lpc.analyze(&samples);
        assert!(!silent);
        assert_eq!(lpc.quantize(4).len(), 4);
        assert_eq!(lpc.quantize(8).len(), 8);
    }
}
