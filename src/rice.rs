// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adaptive Rice-variant entropy coder.

use crate::error::ResidualEncodeError;
use crate::io::BitSink;
use crate::options::EncoderOptions;

/// `⌊log2(v)⌋`, with the convention `log2_floor(0) == -1` so that callers combining it as
/// `7 - log2_floor(history)` recover the reference's zero-run parameter at `history == 0`
/// without a special case.
fn log2_floor(v: u32) -> i32 {
    if v == 0 {
        -1
    } else {
        31 - v.leading_zeros() as i32
    }
}

fn write_residual(out: &mut impl BitSink, value: u32, k: u32, sample_size: u32) -> std::io::Result<()> {
    let modulus = (1u32 << k) - 1;
    let msb = value / modulus;
    if msb > 8 {
        out.write_bits(0x1FF, 9)?;
        out.write_bits(value, sample_size)?;
    } else {
        out.write_unary(1, msb)?;
        if k > 1 {
            let lsb = value % modulus;
            if lsb > 0 {
                out.write_bits(lsb + 1, k)?;
            } else {
                out.write_bits(0, k - 1)?;
            }
        }
    }
    Ok(())
}

/// Encode `residuals` (each fitting in `sample_size` bits once sign-folded) into `out`.
///
/// Returns [`ResidualEncodeError::Overflow`] the moment a folded residual does not fit in
/// `sample_size` bits; the caller is responsible for discarding whatever was already written
/// to `out` (a fresh [`crate::io::recorder::BitRecorder`] per attempt, per the frame writer).
pub(crate) fn encode_residuals(
    out: &mut impl BitSink,
    residuals: &[i32],
    sample_size: u32,
    options: &EncoderOptions,
) -> Result<(), ResidualEncodeError> {
    let max_unsigned: u64 = 1u64 << sample_size;
    let mut history: i64 = options.initial_history as i64;
    let mut sign_modifier: u32 = 0;

    let mut i = 0;
    while i < residuals.len() {
        let r = residuals[i] as i64;
        let u: i64 = if r >= 0 { r * 2 } else { -r * 2 - 1 };
        if (u as u64) >= max_unsigned {
            return Err(ResidualEncodeError::Overflow);
        }

        let k = (log2_floor(((history >> 9) as u32) + 3) as u32).min(options.maximum_k);
        write_residual(out, (u as u32) - sign_modifier, k, sample_size)?;
        sign_modifier = 0;

        if (u as u64) <= 0xFFFF {
            let mult = options.history_multiplier as i64;
            history += u * mult - ((history * mult) >> 9);
            i += 1;

            if history < 128 && i < residuals.len() {
                let k2 = (7 - log2_floor(history as u32) + (((history as u32) + 16) >> 6) as i32)
                    .max(0) as u32;
                let k2 = k2.min(options.maximum_k);

                let mut zeroes: u32 = 0;
                while i < residuals.len() && residuals[i] == 0 {
                    zeroes += 1;
                    i += 1;
                }
                write_residual(out, zeroes, k2, 16)?;
                if zeroes < 0xFFFF {
                    sign_modifier = 1;
                }
                history = 0;
            }
        } else {
            i += 1;
            history = 0xFFFF;
        }
    }
    Ok(())
}
