// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LPC residualizer: applies quantized predictor coefficients to produce residuals, with
//! per-sample sign-adaptive coefficient refinement mirrored by the decoder.

/// Mask `value` to its low `width` bits and sign-extend from bit `width - 1`.
pub(crate) fn truncate_to_width(value: i64, width: u32) -> i32 {
    debug_assert!(width >= 1 && width <= 32);
    let mask = (1i64 << width) - 1;
    let truncated = value & mask;
    if truncated & (1 << (width - 1)) != 0 {
        (truncated - (1i64 << width)) as i32
    } else {
        truncated as i32
    }
}

/// Compute residuals for `samples` against quantized predictor `coefficients` (order M = 4 or
/// 8), truncating arithmetic to `sample_size` bits throughout.
pub(crate) fn lpc_residuals(samples: &[i32], sample_size: u32, coefficients: &[i32]) -> Vec<i32> {
    let order = coefficients.len();
    let n = samples.len();
    let mut coefficients = coefficients.to_vec();
    let mut residuals = Vec::with_capacity(n);

    residuals.push(samples[0]);

    let mut i = 1;
    while i <= order && i < n {
        residuals.push(truncate_to_width(samples[i] as i64 - samples[i - 1] as i64, sample_size));
        i += 1;
    }

    while i < n {
        let base = samples[i - order - 1] as i64;
        let mut lpc_sum: i64 = 1 << 8;
        for (j, &coeff) in coefficients.iter().enumerate() {
            lpc_sum += coeff as i64 * (samples[i - j - 1] as i64 - base);
        }
        lpc_sum >>= 9;

        let pre_truncate = samples[i] as i64 - base - lpc_sum;
        let truncated_err = truncate_to_width(pre_truncate, sample_size);
        residuals.push(truncated_err);

        let mut err = truncated_err as i64;
        if err > 0 {
            for j in 0..order {
                let d = base - samples[i - order + j] as i64;
                let sign = d.signum();
                coefficients[order - j - 1] -= sign as i32;
                err -= ((d * sign) >> 9) * (j as i64 + 1);
                if err <= 0 {
                    break;
                }
            }
        } else if err < 0 {
            for j in 0..order {
                let d = base - samples[i - order + j] as i64;
                let sign = d.signum();
                coefficients[order - j - 1] += sign as i32;
                err -= ((d * -sign) >> 9) * (j as i64 + 1);
                if err >= 0 {
                    break;
                }
            }
        }

        i += 1;
    }

    residuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn truncate_to_width_is_always_in_range(v in any::<i64>(), width in 1u32..=32) {
            let t = truncate_to_width(v, width);
            let lo = -(1i64 << (width - 1));
            let hi = (1i64 << (width - 1)) - 1;
            prop_assert!(t as i64 >= lo && t as i64 <= hi);
        }

        #[test]
        fn truncate_to_width_is_congruent_mod_two_pow_width(v in any::<i64>(), width in 1u32..=31) {
            let t = truncate_to_width(v, width);
            let modulus = 1i64 << width;
            prop_assert_eq!((t as i64 - v).rem_euclid(modulus), 0);
        }
    }

    #[test]
    fn truncate_to_width_is_modular_congruent() {
        for v in [-5i64, -1, 0, 1, 5, 127, 128, -128, -129, 1000] {
            let t = truncate_to_width(v, 8);
            assert!((-128..128).contains(&t));
            assert_eq!(((t as i64 - v).rem_euclid(256)), 0);
        }
    }

    #[test]
    fn truncate_to_width_round_trips_in_range_values() {
        for v in -128i64..128 {
            assert_eq!(truncate_to_width(v, 8), v as i32);
        }
    }

    #[test]
    fn first_sample_is_copied_verbatim() {
        let samples = [7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let residuals = lpc_residuals(&samples, 16, &[0, 0, 0, 0]);
        assert_eq!(residuals[0], 7);
    }

    #[test]
    fn dc_signal_with_zero_coefficients_warms_up_then_settles() {
        // A constant signal: the M delta-coded warm-up samples are all zero, and with
        // all-zero predictor coefficients the remaining residuals are also zero (lpc
        // contribution is zero, base == every later sample).
        let samples = vec![100i32; 32];
        let residuals = lpc_residuals(&samples, 16, &[0, 0, 0, 0]);
        assert_eq!(residuals[0], 100);
        assert!(residuals[1..5].iter().all(|&r| r == 0));
        assert!(residuals[5..].iter().all(|&r| r == 0));
    }

    #[test]
    fn refinement_mutates_coefficients_across_the_whole_block() {
        // A ramp signal exercises the non-trivial refinement branch; just assert it runs to
        // completion and produces a residual per sample without panicking.
        let samples: Vec<i32> = (0..64).map(|i| (i * 3) % 97).collect();
        let residuals = lpc_residuals(&samples, 16, &[10, -5, 3, 1]);
        assert_eq!(residuals.len(), samples.len());
    }
}
