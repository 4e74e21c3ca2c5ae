// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame writer: mono/stereo framing, uncompressed fallback, and LSB extraction for
//! samples wider than 16 bits.

use crate::error::ResidualEncodeError;
use crate::io::recorder::BitRecorder;
use crate::io::BitSink;
use crate::lpc::LpcAnalyzer;
use crate::options::EncoderOptions;
use crate::stereo::{correlate_channels, INTERLACING_SHIFT};
use crate::subframe::{compute_subframe, write_subframe_header};

/// A frame is uncompressed unconditionally below this many samples (too short for the fixed
/// predictor warm-up and header overhead to pay for itself).
const MIN_COMPRESSIBLE_LENGTH: usize = 10;

pub(crate) fn write_frame<S: BitSink>(
    sink: &mut S,
    lpc: &mut LpcAnalyzer,
    channels: &[Vec<i32>],
    options: &EncoderOptions,
    bits_per_sample: u32,
) -> std::io::Result<()> {
    debug_assert!(channels.len() == 1 || channels.len() == 2);
    sink.write_bits(channels.len() as u32 - 1, 3)?;

    let length = channels[0].len();
    if length >= MIN_COMPRESSIBLE_LENGTH {
        let mut attempt = BitRecorder::new();
        match write_compressed_frame(&mut attempt, lpc, channels, options, bits_per_sample) {
            Ok(()) => {
                return attempt.splice_into(sink);
            }
            Err(ResidualEncodeError::Overflow) => {
                log::debug!("residual overflow, falling back to uncompressed frame");
            }
            Err(ResidualEncodeError::Io(e)) => return Err(e),
        }
    }
    write_uncompressed_frame(sink, channels, options.block_size, bits_per_sample)
}

fn write_uncompressed_frame<S: BitSink>(
    sink: &mut S,
    channels: &[Vec<i32>],
    block_size: u32,
    bits_per_sample: u32,
) -> std::io::Result<()> {
    let length = channels[0].len() as u32;
    sink.write_bits(0, 16)?;
    sink.write_bit(length != block_size)?;
    sink.write_bits(0, 2)?;
    sink.write_bit(true)?;
    if length != block_size {
        sink.write_bits(length, 32)?;
    }
    for i in 0..length as usize {
        for channel in channels {
            sink.write_bits_signed(channel[i], bits_per_sample)?;
        }
    }
    Ok(())
}

fn write_compressed_frame(
    out: &mut BitRecorder,
    lpc: &mut LpcAnalyzer,
    channels: &[Vec<i32>],
    options: &EncoderOptions,
    bits_per_sample: u32,
) -> Result<(), ResidualEncodeError> {
    let uncompressed_lsbs = if bits_per_sample > 16 { (bits_per_sample - 16) / 8 } else { 0 };
    let length = channels[0].len() as u32;
    let length_field = if length != options.block_size { Some(length) } else { None };

    let (msb, lsbs) = split_lsbs(channels, uncompressed_lsbs);

    if channels.len() == 1 {
        let pred_bits = if uncompressed_lsbs > 0 { 16 } else { bits_per_sample };
        write_compressed_preamble(out, length_field, uncompressed_lsbs, 0, 0)?;
        let (coefficients, residual) = compute_subframe(lpc, &msb[0], pred_bits, options)?;
        write_subframe_header(out, &coefficients)?;
        write_lsb_stream(out, &lsbs, uncompressed_lsbs)?;
        residual.splice_into(out)?;
    } else {
        let pred_bits = if uncompressed_lsbs > 0 { 17 } else { bits_per_sample + 1 };

        let mut best: Option<BitRecorder> = None;
        for leftweight in options.min_leftweight..=options.max_leftweight {
            let mut attempt = BitRecorder::new();
            write_interlaced_attempt(
                &mut attempt,
                lpc,
                &msb[0],
                &msb[1],
                leftweight,
                length_field,
                uncompressed_lsbs,
                &lsbs,
                pred_bits,
                options,
            )?;
            let better = match &best {
                Some(current) => attempt.bits_written() < current.bits_written(),
                None => true,
            };
            if better {
                best = Some(attempt);
            }
        }
        best.expect("leftweight range is non-empty").splice_into(out)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_interlaced_attempt(
    attempt: &mut BitRecorder,
    lpc: &mut LpcAnalyzer,
    left: &[i32],
    right: &[i32],
    leftweight: u32,
    length_field: Option<u32>,
    uncompressed_lsbs: u32,
    lsbs: &[u32],
    pred_bits: u32,
    options: &EncoderOptions,
) -> Result<(), ResidualEncodeError> {
    write_compressed_preamble(attempt, length_field, uncompressed_lsbs, INTERLACING_SHIFT, leftweight)?;

    let (c0, c1) = correlate_channels(left, right, leftweight);
    let (coeff0, residual0) = compute_subframe(lpc, &c0, pred_bits, options)?;
    let (coeff1, residual1) = compute_subframe(lpc, &c1, pred_bits, options)?;

    write_subframe_header(attempt, &coeff0)?;
    write_subframe_header(attempt, &coeff1)?;
    write_lsb_stream(attempt, lsbs, uncompressed_lsbs)?;
    residual0.splice_into(attempt)?;
    residual1.splice_into(attempt)?;
    Ok(())
}

fn write_compressed_preamble(
    out: &mut BitRecorder,
    length_field: Option<u32>,
    uncompressed_lsbs: u32,
    interlacing_shift: u32,
    interlacing_leftweight: u32,
) -> std::io::Result<()> {
    out.write_bits(0, 16)?;
    out.write_bit(length_field.is_some())?;
    out.write_bits(uncompressed_lsbs, 2)?;
    out.write_bit(false)?;
    if let Some(length) = length_field {
        out.write_bits(length, 32)?;
    }
    out.write_bits(interlacing_shift, 8)?;
    out.write_bits(interlacing_leftweight, 8)?;
    Ok(())
}

/// Split each channel's low `uncompressed_lsbs * 8` bits into an interleaved (frame-major,
/// channel-minor) LSB stream, and return the remaining MSB samples per channel.
fn split_lsbs(channels: &[Vec<i32>], uncompressed_lsbs: u32) -> (Vec<Vec<i32>>, Vec<u32>) {
    if uncompressed_lsbs == 0 {
        return (channels.to_vec(), Vec::new());
    }

    let shift = uncompressed_lsbs * 8;
    let mask = (1u32 << shift) - 1;
    let n = channels[0].len();
    let mut msb: Vec<Vec<i32>> = channels.iter().map(|_| Vec::with_capacity(n)).collect();
    let mut lsbs = Vec::with_capacity(n * channels.len());

    for i in 0..n {
        for (c, channel) in channels.iter().enumerate() {
            let s = channel[i];
            lsbs.push((s as u32) & mask);
            msb[c].push(s >> shift);
        }
    }
    (msb, lsbs)
}

fn write_lsb_stream(out: &mut impl BitSink, lsbs: &[u32], uncompressed_lsbs: u32) -> std::io::Result<()> {
    if uncompressed_lsbs == 0 {
        return Ok(());
    }
    let width = uncompressed_lsbs * 8;
    for &v in lsbs {
        out.write_bits(v, width)?;
    }
    Ok(())
}
