// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sub-frame writer: predictor order selection and the per-channel header.

use crate::error::ResidualEncodeError;
use crate::io::recorder::BitRecorder;
use crate::io::BitSink;
use crate::lpc::{lpc_residuals, LpcAnalyzer};
use crate::options::EncoderOptions;
use crate::rice::encode_residuals;

const PREDICTION_TYPE: u32 = 0;
const QLP_SHIFT: u32 = 9;
const RICE_MODIFIER: u32 = 4;

/// Run LPC analysis once, build order-4 and order-8 residual blocks, and return whichever is
/// smaller (order 4 wins ties and near-ties within a 64-bit margin).
///
/// For a silent block only order 4 (all-zero coefficients) is computed at all.
pub(crate) fn compute_subframe(
    lpc: &mut LpcAnalyzer,
    samples: &[i32],
    sample_size: u32,
    options: &EncoderOptions,
) -> Result<(Vec<i32>, BitRecorder), ResidualEncodeError> {
    let silent = lpc.analyze(samples);

    if silent {
        let coefficients = lpc.quantize(4);
        let residuals = lpc_residuals(samples, sample_size, &coefficients);
        let mut block = BitRecorder::new();
        encode_residuals(&mut block, &residuals, sample_size, options)?;
        return Ok((coefficients, block));
    }

    let coeffs4 = lpc.quantize(4);
    let coeffs8 = lpc.quantize(8);

    let residuals4 = lpc_residuals(samples, sample_size, &coeffs4);
    let mut block4 = BitRecorder::new();
    encode_residuals(&mut block4, &residuals4, sample_size, options)?;

    let residuals8 = lpc_residuals(samples, sample_size, &coeffs8);
    let mut block8 = BitRecorder::new();
    encode_residuals(&mut block8, &residuals8, sample_size, options)?;

    if block4.bits_written() < block8.bits_written() + 64 {
        Ok((coeffs4, block4))
    } else {
        Ok((coeffs8, block8))
    }
}

/// Write the per-channel sub-frame header: prediction type, QLP shift, Rice modifier, order,
/// and the order's quantized coefficients. Does not include the frame-level preamble (unused
/// bits, length flag, interlacing shift/leftweight): that is shared across channels and
/// written once by the frame writer.
pub(crate) fn write_subframe_header(out: &mut impl BitSink, coefficients: &[i32]) -> std::io::Result<()> {
    out.write_bits(PREDICTION_TYPE, 4)?;
    out.write_bits(QLP_SHIFT, 4)?;
    out.write_bits(RICE_MODIFIER, 3)?;
    out.write_bits(coefficients.len() as u32, 5)?;
    for &c in coefficients {
        out.write_bits_signed(c, 16)?;
    }
    Ok(())
}
