// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver: reads PCM blocks, dispatches each through the frameset writer, and records
//! per-frameset byte sizes while patching the `mdat` box's size prefix.

use std::io::{Seek, SeekFrom, Write};

use crate::error::EncodeError;
use crate::frameset::write_frameset;
use crate::io::bit_writer::BitWriter;
use crate::lpc::LpcAnalyzer;
use crate::options::EncoderOptions;
use crate::pcm::PcmSource;

/// One frameset's `(byte_size, pcm_frames_size)`, in input-block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub byte_size: u32,
    pub pcm_frames_size: u32,
}

/// Encodes a PCM source into a sequence of `mdat`-payload framesets.
pub struct Encoder {
    options: EncoderOptions,
    bits_per_sample: u32,
    lpc: LpcAnalyzer,
    scratch: Vec<i32>,
    channels: Vec<Vec<i32>>,
}

impl Encoder {
    pub fn new(options: EncoderOptions, bits_per_sample: u32) -> Result<Self, EncodeError> {
        if bits_per_sample != 8 && bits_per_sample != 16 && bits_per_sample != 24 {
            return Err(EncodeError::InvalidBitsPerSample(bits_per_sample));
        }
        Ok(Self {
            options,
            bits_per_sample,
            lpc: LpcAnalyzer::new(),
            scratch: Vec::new(),
            channels: Vec::new(),
        })
    }

    /// Encode every block `source` produces into `sink`'s `mdat` box, returning the ordered
    /// frame-size records for the container layer's sample tables.
    pub fn encode<W: Write + Seek>(
        &mut self,
        source: &mut dyn PcmSource,
        sink: &mut BitWriter<W>,
    ) -> Result<Vec<FrameSize>, EncodeError> {
        let channel_count = source.channels() as usize;
        self.scratch.resize(self.options.block_size as usize * channel_count, 0);
        if self.channels.len() != channel_count {
            self.channels = (0..channel_count).map(|_| Vec::new()).collect();
        }

        let mdat_pos = sink.stream_position()?;
        sink.write_bits(0, 32)?;
        sink.write_bytes(b"mdat")?;

        let mut frame_sizes = Vec::new();
        loop {
            let frames_read = source
                .read_block(self.options.block_size as usize, &mut self.scratch)
                .map_err(|e| EncodeError::PcmSource(Box::new(e)))?;
            if frames_read == 0 {
                break;
            }

            deinterleave(&self.scratch, frames_read, channel_count, &mut self.channels);

            let start = sink.stream_position()?;
            write_frameset(sink, &mut self.lpc, &self.channels, &self.options, self.bits_per_sample)?;
            let end = sink.stream_position()?;

            log::debug!(
                "wrote frameset: {} pcm frames, {} bytes",
                frames_read,
                end - start
            );
            frame_sizes.push(FrameSize {
                byte_size: (end - start) as u32,
                pcm_frames_size: frames_read as u32,
            });
        }

        let mdat_size: u64 = 8 + frame_sizes.iter().map(|f| f.byte_size as u64).sum::<u64>();
        sink.seek(SeekFrom::Start(mdat_pos))?;
        sink.write_bits(mdat_size as u32, 32)?;
        sink.seek(SeekFrom::End(0))?;

        Ok(frame_sizes)
    }
}

fn deinterleave(buf: &[i32], frames: usize, channel_count: usize, out: &mut [Vec<i32>]) {
    for channel in out.iter_mut() {
        channel.clear();
    }
    for i in 0..frames {
        for (c, channel) in out.iter_mut().enumerate().take(channel_count) {
            channel.push(buf[i * channel_count + c]);
        }
    }
}
