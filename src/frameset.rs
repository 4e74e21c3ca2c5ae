// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frameset dispatcher: maps a PCM block's channels onto ordered mono/stereo sub-frames
//! per the fixed ALAC channel layout, then appends the terminator and byte-aligns.

use crate::frame::write_frame;
use crate::io::BitSink;
use crate::lpc::LpcAnalyzer;
use crate::options::EncoderOptions;

const TERMINATOR: u32 = 0b111;

/// The fixed sub-frame grouping, as source channel indices, for each supported channel count.
/// Channel counts above 8 fall back to all-mono in source order.
fn subframe_groups(channel_count: usize) -> Vec<Vec<usize>> {
    match channel_count {
        1 => vec![vec![0]],
        2 => vec![vec![0, 1]],
        3 => vec![vec![2], vec![0, 1]],
        4 => vec![vec![2], vec![0, 1], vec![3]],
        5 => vec![vec![2], vec![0, 1], vec![3, 4]],
        6 => vec![vec![2], vec![0, 1], vec![4, 5], vec![3]],
        7 => vec![vec![2], vec![0, 1], vec![4, 5], vec![6], vec![3]],
        8 => vec![vec![2], vec![6, 7], vec![0, 1], vec![4, 5], vec![3]],
        n => (0..n).map(|i| vec![i]).collect(),
    }
}

pub(crate) fn write_frameset<S: BitSink>(
    sink: &mut S,
    lpc: &mut LpcAnalyzer,
    channels: &[Vec<i32>],
    options: &EncoderOptions,
    bits_per_sample: u32,
) -> std::io::Result<()> {
    for group in subframe_groups(channels.len()) {
        let subset: Vec<Vec<i32>> = group.iter().map(|&i| channels[i].clone()).collect();
        write_frame(sink, lpc, &subset, options, bits_per_sample)?;
    }
    sink.write_bits(TERMINATOR, 3)?;
    sink.byte_align()
}
