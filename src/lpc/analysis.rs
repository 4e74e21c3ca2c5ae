// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Autocorrelation, Levinson–Durbin recursion, and coefficient quantization.

use super::MAX_LPC_ORDER;

pub(crate) fn autocorrelate(windowed: &[f64], out: &mut [f64; MAX_LPC_ORDER + 1]) {
    let n = windowed.len();
    for lag in 0..=MAX_LPC_ORDER {
        let mut acc = 0.0;
        for i in 0..(n - lag) {
            acc += windowed[i] * windowed[i + lag];
        }
        out[lag] = acc;
    }
}

/// Levinson–Durbin recursion. Reproduces the reference's idiosyncratic storage exactly:
/// `coefficients[ord - 1]` holds the `ord` coefficients of order `ord`, for `ord` in `1..=8`.
/// This indexing is load-bearing: real ALAC decoders observe the resulting bitstream, so any
/// textbook re-derivation that renumbers these slots would silently break bit-exactness.
pub(crate) fn levinson_durbin(
    r: &[f64; MAX_LPC_ORDER + 1],
    coefficients: &mut [[f64; MAX_LPC_ORDER]; MAX_LPC_ORDER],
    error: &mut [f64; MAX_LPC_ORDER],
) {
    let k1 = r[1] / r[0];
    coefficients[0][0] = k1;
    error[0] = r[0] * (1.0 - k1 * k1);

    for ord in 2..=MAX_LPC_ORDER {
        let prev = ord - 2;
        let cur = ord - 1;

        let mut q = r[ord];
        for j in 0..ord - 1 {
            q -= coefficients[prev][j] * r[ord - 1 - j];
        }
        let k = q / error[prev];

        for j in 0..ord - 1 {
            coefficients[cur][j] = coefficients[prev][j] - k * coefficients[prev][ord - 2 - j];
        }
        coefficients[cur][ord - 1] = k;
        error[cur] = error[prev] * (1.0 - k * k);
    }
}

/// Quantize an order-`M` coefficient set to signed 16-bit integers with error feedback.
///
/// The running error accumulator subtracts the *unclamped* rounded value each step, not the
/// clamped coefficient that gets appended, so a saturated coefficient doesn't poison the
/// feedback for the ones that follow it.
pub(crate) fn quantize(coefficients: &[f64]) -> Vec<i32> {
    const QLP_MAX: i64 = (1 << 15) - 1;
    const QLP_MIN: i64 = -(1 << 15);

    let mut error = 0.0f64;
    let mut out = Vec::with_capacity(coefficients.len());
    for &c in coefficients {
        error += c * 512.0;
        let rounded = error.round() as i64;
        out.push(rounded.clamp(QLP_MIN, QLP_MAX) as i32);
        error -= rounded as f64;
    }
    out
}
