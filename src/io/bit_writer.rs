// alac-encoder-core
// Copyright (c) 2024 The alac-encoder-core Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{self, Seek, SeekFrom, Write};

use super::{BitAccumulator, BitSink};

/// A [`BitSink`] that writes through to an underlying byte stream as soon as 8 bits accumulate.
pub struct BitWriter<W> {
    inner: W,
    acc: BitAccumulator,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, acc: BitAccumulator::new(), bits_written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Seek> BitWriter<W> {
    /// The underlying stream's byte position. Only meaningful when byte-aligned.
    pub fn stream_position(&mut self) -> io::Result<u64> {
        debug_assert_eq!(self.acc.pending_bits(), 0, "stream position requires byte alignment");
        self.inner.stream_position()
    }

    pub fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bits(&mut self, value: u32, width: u32) -> io::Result<()> {
        let inner = &mut self.inner;
        self.acc.push(value, width, |byte| inner.write_all(&[byte]))?;
        self.bits_written += width as u64;
        Ok(())
    }

    fn byte_align(&mut self) -> io::Result<()> {
        let pending = self.acc.pending_bits();
        if pending > 0 {
            self.write_bits(0, 8 - pending)?;
        }
        Ok(())
    }

    fn bits_written(&self) -> u64 {
        self.bits_written
    }
}
