//! End-to-end scenarios driving [`alac_encoder_core::Encoder`] through its public API:
//! a short uncompressible block, a flat DC block, identical stereo channels, 24-bit stereo
//! with LSB extraction, 6-channel dispatch, and an overflow probe.

use std::io::Cursor;

use alac_encoder_core::{BitWriter, EncodeError, Encoder, EncoderOptions, PcmSource, PcmSourceError};

/// A fixed, pre-interleaved in-memory PCM source for tests.
struct FixedSource {
    channels: u32,
    bits_per_sample: u32,
    samples: Vec<i32>,
    offset: usize,
}

impl FixedSource {
    fn new(channels: u32, bits_per_sample: u32, samples: Vec<i32>) -> Self {
        Self { channels, bits_per_sample, samples, offset: 0 }
    }
}

impl PcmSource for FixedSource {
    fn channels(&self) -> u32 {
        self.channels
    }

    fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    fn read_block(&mut self, block_size: usize, out: &mut [i32]) -> Result<usize, PcmSourceError> {
        let frame_words = block_size * self.channels as usize;
        let remaining = self.samples.len() - self.offset;
        let take = remaining.min(frame_words);
        out[..take].copy_from_slice(&self.samples[self.offset..self.offset + take]);
        self.offset += take;
        Ok(take / self.channels as usize)
    }
}

fn encode(options: EncoderOptions, bits_per_sample: u32, mut source: FixedSource) -> Vec<u8> {
    let mut encoder = Encoder::new(options, bits_per_sample).unwrap();
    let mut sink = BitWriter::new(Cursor::new(Vec::new()));
    let sizes = encoder.encode(&mut source, &mut sink).unwrap();
    assert!(!sizes.is_empty());
    sink.into_inner().into_inner()
}

#[test]
fn mono_short_block_produces_a_well_formed_mdat() {
    let options = EncoderOptions { block_size: 4096, ..Default::default() };
    let samples: Vec<i32> = (0..8).map(|i| if i % 2 == 0 { 120 } else { -37 }).collect();
    let bytes = encode(options, 16, FixedSource::new(1, 16, samples));

    assert_eq!(&bytes[4..8], b"mdat");
    let mdat_size = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert_eq!(mdat_size as usize, bytes.len());
}

#[test]
fn mono_dc_block_compresses_smaller_than_uncompressed() {
    let options = EncoderOptions { block_size: 256, ..Default::default() };
    let samples = vec![100i32; 256];
    let bytes = encode(options, 16, FixedSource::new(1, 16, samples));

    // Uncompressed would need roughly 16 bits/sample plus headers; a constant DC block
    // should compress to a small fraction of that.
    assert!(bytes.len() < 256 * 2);
}

#[test]
fn stereo_identical_channels_encode_without_error() {
    let options = EncoderOptions { block_size: 64, ..Default::default() };
    let mono: Vec<i32> = (0..64).map(|i| ((i * 13) % 37) - 18).collect();
    let mut interleaved = Vec::with_capacity(mono.len() * 2);
    for &s in &mono {
        interleaved.push(s);
        interleaved.push(s);
    }
    let bytes = encode(options, 16, FixedSource::new(2, 16, interleaved));
    assert_eq!(&bytes[4..8], b"mdat");
}

#[test]
fn stereo_24_bit_with_lsb_extraction_round_trips_frame_count() {
    let options = EncoderOptions { block_size: 32, ..Default::default() };
    let n = 32usize;
    let mut interleaved = Vec::with_capacity(n * 2);
    for i in 0..n {
        interleaved.push(((i as i32) * 4099) - 1_000_000);
        interleaved.push(((i as i32) * -2053) + 500_000);
    }
    let mut encoder = Encoder::new(options, 24).unwrap();
    let mut source = FixedSource::new(2, 24, interleaved);
    let mut sink = BitWriter::new(Cursor::new(Vec::new()));
    let sizes = encoder.encode(&mut source, &mut sink).unwrap();
    assert_eq!(sizes.len(), 1);
    assert_eq!(sizes[0].pcm_frames_size, n as u32);
}

#[test]
fn six_channel_stream_dispatches_every_block_without_error() {
    let options = EncoderOptions { block_size: 16, ..Default::default() };
    let frames = 16usize;
    let channels = 6usize;
    let mut interleaved = Vec::with_capacity(frames * channels);
    for i in 0..frames {
        for c in 0..channels {
            interleaved.push(((i + c) as i32 * 7) % 23 - 11);
        }
    }
    let bytes = encode(options, 16, FixedSource::new(channels as u32, 16, interleaved));
    assert_eq!(&bytes[4..8], b"mdat");
}

#[test]
fn residual_overflow_falls_back_to_uncompressed_frame_instead_of_failing() {
    // Large alternating swings at a narrow bit depth are hard for the LPC predictor to
    // track; this exercises the overflow -> uncompressed fallback path end to end rather
    // than failing the whole encode.
    let options = EncoderOptions { block_size: 16, ..Default::default() };
    let samples: Vec<i32> = (0..16).map(|i| if i % 2 == 0 { 127 } else { -128 }).collect();
    let bytes = encode(options, 8, FixedSource::new(1, 8, samples));
    assert_eq!(&bytes[4..8], b"mdat");
}

#[test]
fn invalid_bit_depth_is_rejected_before_any_encoding_happens() {
    let err = Encoder::new(EncoderOptions::default(), 12).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidBitsPerSample(12)));
}
