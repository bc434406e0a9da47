use uartsim_common::{SignalLine, SPACE};

use crate::config::Divisor;
use crate::frame::{Frame, FrameError, FRAME_BITS};

/// Result of one receiver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxOutcome {
    NoEvent,
    Byte(u8),
    FrameError(FrameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Watching for a falling edge.
    Idle,
    Framing {
        /// Ticks until the next sample.
        timer: u32,
        /// Samples so far, newest in bit 0.
        samples: u16,
        count: u8,
    },
}

/// Samples a line and reassembles 8-N-1 frames.
///
/// After a start edge the first sample is taken half a bit period later, so
/// every following sample lands in the middle of its bit cell. The frame is
/// only validated once all ten samples are in; a glitch during the start bit
/// does not restart alignment.
#[derive(Debug, Clone)]
pub struct Receiver {
    divisor: Divisor,
    state: RxState,
}

impl Receiver {
    pub fn new(divisor: Divisor) -> Self {
        Self {
            divisor,
            state: RxState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == RxState::Idle
    }

    /// Advance by one tick, reading `line` at most once.
    pub fn tick<L: SignalLine + ?Sized>(&mut self, line: &L) -> RxOutcome {
        match &mut self.state {
            RxState::Idle => {
                if line.get() == SPACE {
                    self.state = RxState::Framing {
                        timer: self.divisor.half(),
                        samples: 0,
                        count: 0,
                    };
                }
                RxOutcome::NoEvent
            }
            RxState::Framing {
                timer,
                samples,
                count,
            } => {
                *timer -= 1;
                if *timer != 0 {
                    return RxOutcome::NoEvent;
                }
                *timer = self.divisor.ticks();
                *samples = (*samples << 1) | u16::from(line.get());
                *count += 1;
                if *count < FRAME_BITS {
                    return RxOutcome::NoEvent;
                }

                let samples = *samples;
                self.state = RxState::Idle;
                let frame = Frame::from_samples(samples);
                let faults = frame.faults();
                if faults.is_empty() {
                    RxOutcome::Byte(frame.data)
                } else {
                    RxOutcome::FrameError(FrameError { faults, samples })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use uartsim_common::MARK;

    use super::*;
    use crate::frame::FrameFaults;

    #[test]
    fn samples_mid_bit() {
        let divisor = Divisor::new(4).unwrap();
        let mut rx = Receiver::new(divisor);
        let line = Cell::new(SPACE);

        // Start edge seen on tick 0, first sample two ticks later.
        assert_eq!(rx.tick(&line), RxOutcome::NoEvent);
        assert!(!rx.is_idle());
        assert_eq!(rx.tick(&line), RxOutcome::NoEvent);
        assert_eq!(rx.tick(&line), RxOutcome::NoEvent);
        assert_eq!(
            rx.state,
            RxState::Framing {
                timer: 4,
                samples: 0,
                count: 1
            }
        );
    }

    #[test]
    fn stuck_low_line_is_a_frame_error() {
        let mut rx = Receiver::new(Divisor::new(2).unwrap());
        let line = Cell::new(SPACE);
        let outcomes: Vec<RxOutcome> = (0..20).map(|_| rx.tick(&line)).collect();

        // Edge at tick 0, samples at ticks 1, 3, .., 19.
        assert_eq!(
            outcomes[19],
            RxOutcome::FrameError(FrameError {
                faults: FrameFaults::STOP,
                samples: 0,
            })
        );
        assert!(outcomes[..19].iter().all(|o| *o == RxOutcome::NoEvent));
        assert!(rx.is_idle());
    }

    #[test]
    fn idle_line_stays_idle() {
        let mut rx = Receiver::new(Divisor::new(8).unwrap());
        let line = Cell::new(MARK);
        for _ in 0..200 {
            assert_eq!(rx.tick(&line), RxOutcome::NoEvent);
            assert!(rx.is_idle());
        }
    }
}
