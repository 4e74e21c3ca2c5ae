// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors that can escape [`crate::Encoder::encode`].
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The PCM source reported a failure; the output built so far should be discarded.
    #[error("PCM source failed")]
    PcmSource(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The bit sink's underlying stream failed to write or seek.
    #[error("bit sink I/O error: {0}")]
    Sink(#[from] std::io::Error),

    /// `bits_per_sample` was not 16 or 24 (or 8, permitted as a test extension).
    #[error("unsupported bit depth {0}, expected 8, 16, or 24")]
    InvalidBitsPerSample(u32),
}

/// Internal signal threaded from the residual coder up through sub-frame and frame composition.
/// `Overflow` triggers the uncompressed-frame fallback; everything else propagates to the caller.
#[derive(Debug, Error)]
pub(crate) enum ResidualEncodeError {
    #[error("residual folded value did not fit in sample_size bits")]
    Overflow,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ResidualEncodeError> for EncodeError {
    fn from(err: ResidualEncodeError) -> Self {
        match err {
            ResidualEncodeError::Overflow => {
                unreachable!("residual overflow must be handled locally by the frame writer")
            }
            ResidualEncodeError::Io(e) => EncodeError::Sink(e),
        }
    }
}
