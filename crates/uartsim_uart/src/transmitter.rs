use std::collections::VecDeque;

use uartsim_common::{SignalLine, MARK};

use crate::config::Divisor;
use crate::frame::{Frame, FRAME_BITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxState {
    Idle,
    Sending {
        /// Ticks left in the current bit period.
        timer: u32,
        levels: [bool; FRAME_BITS as usize],
        /// Bit periods completed since the start bit was driven.
        sent: u8,
    },
}

/// Serialises queued bytes onto a line, one bit period per `divisor` ticks.
#[derive(Debug, Clone)]
pub struct Transmitter {
    divisor: Divisor,
    queue: VecDeque<u8>,
    state: TxState,
}

impl Transmitter {
    pub fn new(divisor: Divisor) -> Self {
        Self {
            divisor,
            queue: VecDeque::new(),
            state: TxState::Idle,
        }
    }

    pub fn enqueue(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
    }

    /// Bytes waiting behind the frame currently on the wire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.state == TxState::Idle
    }

    /// Advance by one tick, writing `line` at most once.
    pub fn tick<L: SignalLine + ?Sized>(&mut self, line: &L) {
        match &mut self.state {
            TxState::Idle => {
                let Some(byte) = self.queue.pop_front() else {
                    return;
                };
                let levels = Frame::new(byte).levels();
                line.set(levels[0]);
                self.state = TxState::Sending {
                    timer: self.divisor.ticks(),
                    levels,
                    sent: 0,
                };
            }
            TxState::Sending {
                timer,
                levels,
                sent,
            } => {
                *timer -= 1;
                if *timer != 0 {
                    return;
                }
                *timer = self.divisor.ticks();
                *sent += 1;
                if *sent == FRAME_BITS {
                    // Stop bit done; rest at mark until the next start bit.
                    line.set(MARK);
                    self.state = TxState::Idle;
                } else {
                    line.set(levels[*sent as usize]);
                }
            }
        }
    }
}
