// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Tunable encoder parameters, fixed for the lifetime of one encode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// The default frameset length in PCM frames. The final block of a stream may be shorter.
    pub block_size: u32,
    /// Initial value of the adaptive Rice-coder history register.
    pub initial_history: u32,
    /// Step size for history updates.
    pub history_multiplier: u32,
    /// Upper bound on the adaptive Rice parameter `k`.
    pub maximum_k: u32,
    /// Inclusive lower bound of the stereo leftweight search.
    pub min_leftweight: u32,
    /// Inclusive upper bound of the stereo leftweight search.
    pub max_leftweight: u32,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            block_size: 4096,
            initial_history: 10,
            history_multiplier: 40,
            maximum_k: 14,
            min_leftweight: 0,
            max_leftweight: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference() {
        let opts = EncoderOptions::default();
        assert_eq!(opts.block_size, 4096);
        assert_eq!(opts.initial_history, 10);
        assert_eq!(opts.history_multiplier, 40);
        assert_eq!(opts.maximum_k, 14);
        assert_eq!(opts.min_leftweight, 0);
        assert_eq!(opts.max_leftweight, 4);
    }
}
