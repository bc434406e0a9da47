//! 8-N-1 frame layout.
//!
//! On the wire a frame is one start bit (space), eight data bits least
//! significant first, and one stop bit (mark). The receiver collects samples
//! by shifting left, so the oldest sample ends up in the top bit of its
//! accumulator and the data bits arrive mirrored.
use bitflags::bitflags;
use thiserror::Error;
use uartsim_common::{MARK, SPACE};

/// Bit periods in one frame: start, 8 data, stop.
pub const FRAME_BITS: u8 = 10;

const START_SAMPLE: u16 = 1 << (FRAME_BITS - 1);
const STOP_SAMPLE: u16 = 1;

bitflags! {
    /// Framing checks that failed for a sampled frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameFaults: u8 {
        /// The start bit was sampled high.
        const START = 0b01;
        /// The stop bit was sampled low.
        const STOP = 0b10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("framing error {faults:?} in samples {samples:#012b}")]
pub struct FrameError {
    pub faults: FrameFaults,
    /// Raw sample accumulator, oldest sample in bit 9.
    pub samples: u16,
}

/// One serial frame as explicit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub start: bool,
    pub data: u8,
    pub stop: bool,
}

impl Frame {
    /// A well-formed frame carrying `data`.
    pub const fn new(data: u8) -> Self {
        Self {
            start: SPACE,
            data,
            stop: MARK,
        }
    }

    /// Line levels in transmission order.
    pub fn levels(&self) -> [bool; FRAME_BITS as usize] {
        let mut levels = [MARK; FRAME_BITS as usize];
        levels[0] = self.start;
        for (bit, level) in levels[1..=8].iter_mut().enumerate() {
            *level = (self.data >> bit) & 1 != 0;
        }
        levels[9] = self.stop;
        levels
    }

    /// Rebuild a frame from a full receive accumulator.
    ///
    /// Bit 9 holds the start sample, bits 8..1 the data samples in arrival
    /// order (bit 0 of the byte first) and bit 0 the stop sample.
    pub fn from_samples(samples: u16) -> Self {
        let mirrored = ((samples >> 1) & 0xFF) as u8;
        Self {
            start: samples & START_SAMPLE != 0,
            data: reverse_bits(mirrored),
            stop: samples & STOP_SAMPLE != 0,
        }
    }

    pub fn faults(&self) -> FrameFaults {
        let mut faults = FrameFaults::empty();
        if self.start != SPACE {
            faults |= FrameFaults::START;
        }
        if self.stop != MARK {
            faults |= FrameFaults::STOP;
        }
        faults
    }
}

/// Mirror the bit order of a byte, so bit 0 swaps with bit 7 and so on.
///
/// Undoes the least-significant-first wire order after samples have been
/// shifted in most-significant-first.
#[inline]
pub const fn reverse_bits(byte: u8) -> u8 {
    byte.reverse_bits()
}
