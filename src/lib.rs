// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame encoder core for the Apple Lossless (ALAC) bitstream.
//!
//! This crate covers channel-set decomposition, inter-channel decorrelation, windowed LPC
//! analysis, sign-adaptive residual refinement, and adaptive Rice-variant entropy coding, all
//! framed into `mdat`-payload framesets. It does not parse or write the surrounding container
//! (`moov`/`stsz`/`stco` and friends): callers drive [`Encoder::encode`] with their own
//! [`PcmSource`] and collect the returned [`FrameSize`] records for their own sample tables.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::collapsible_else_if)]

mod encoder;
mod error;
mod frame;
mod frameset;
mod io;
mod lpc;
mod options;
mod pcm;
mod rice;
mod stereo;
mod subframe;

pub use encoder::{Encoder, FrameSize};
pub use error::EncodeError;
pub use io::bit_writer::BitWriter;
pub use io::BitSink;
pub use options::EncoderOptions;
pub use pcm::{PcmSource, PcmSourceError};
