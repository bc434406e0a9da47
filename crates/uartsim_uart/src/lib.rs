//! Software UART for cycle-accurate simulations.
//!
//! A [`Connector`] owns a transmitter and a receiver and advances both by one
//! simulation tick per [`Connector::tick`] call. Timing is counted in ticks
//! only; the caller decides what a tick means for its design.
pub mod config;
pub mod connector;
pub mod events;
pub mod frame;
pub mod receiver;
pub mod transmitter;

pub use config::{ConfigError, Divisor, UartConfig};
pub use connector::{Connector, TickResult};
pub use events::{DecodeEvent, DecodeKind, EventCursor, Events};
pub use frame::{reverse_bits, Frame, FrameError, FrameFaults, FRAME_BITS};
pub use receiver::{Receiver, RxOutcome};
pub use transmitter::Transmitter;
