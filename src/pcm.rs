// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Wraps an upstream PCM source's failure for propagation as [`crate::EncodeError::PcmSource`].
#[derive(Debug, Error)]
#[error("PCM source failed to produce samples")]
pub struct PcmSourceError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

/// A source of interleaved integer PCM samples.
///
/// Samples are delivered frame-major, channel-minor: for a read of `n` frames across `c`
/// channels, `out[i * c + ch]` is the sample for channel `ch` of frame `i`.
pub trait PcmSource {
    /// Number of interleaved channels.
    fn channels(&self) -> u32;

    /// Bit depth of each sample.
    fn bits_per_sample(&self) -> u32;

    /// Fill `out` (sized `block_size * channels()`) with up to `block_size` frames.
    ///
    /// Returns the number of frames actually written; `0` signals exhaustion.
    fn read_block(&mut self, block_size: usize, out: &mut [i32]) -> Result<usize, PcmSourceError>;
}
