use uartsim_common::{SignalLine, Wire, MARK};

use crate::config::Divisor;
use crate::events::{DecodeEvent, DecodeKind, DecodeLog, EventCursor, Events};
use crate::frame::FrameError;
use crate::receiver::{Receiver, RxOutcome};
use crate::transmitter::Transmitter;

/// What a connector tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    NoEvent,
    Received(u8),
    FrameError(FrameError),
}

/// Host side of a simulated UART link.
///
/// Drives `tx_line` from a byte queue and decodes `rx_line`. The lines belong
/// to the simulated design; the connector only holds handles to them and never
/// advances simulation time itself.
pub struct Connector<L: SignalLine = Wire> {
    tx_line: L,
    rx_line: L,
    transmitter: Transmitter,
    receiver: Receiver,
    last_byte: Option<u8>,
    log: DecodeLog,
    frame_errors: u64,
    ticks: u64,
}

impl<L: SignalLine> Connector<L> {
    /// Build a connector and park `tx_line` at the idle level.
    pub fn new(divisor: Divisor, tx_line: L, rx_line: L) -> Self {
        tx_line.set(MARK);
        Self {
            tx_line,
            rx_line,
            transmitter: Transmitter::new(divisor),
            receiver: Receiver::new(divisor),
            last_byte: None,
            log: DecodeLog::default(),
            frame_errors: 0,
            ticks: 0,
        }
    }

    /// Queue bytes for transmission after anything already queued.
    pub fn tx(&mut self, bytes: impl AsRef<[u8]>) {
        self.transmitter.enqueue(bytes.as_ref());
    }

    /// Advance transmitter then receiver by one tick.
    pub fn tick(&mut self) -> TickResult {
        let tick = self.ticks;
        self.ticks += 1;

        self.transmitter.tick(&self.tx_line);

        let kind = match self.receiver.tick(&self.rx_line) {
            RxOutcome::NoEvent => return TickResult::NoEvent,
            RxOutcome::Byte(byte) => DecodeKind::Byte(byte),
            RxOutcome::FrameError(err) => DecodeKind::FrameError(err),
        };
        self.log.push(DecodeEvent { tick, kind });

        match kind {
            DecodeKind::Byte(byte) => {
                log::debug!("UART rx 0x{byte:02X} on tick {tick}");
                self.last_byte = Some(byte);
                TickResult::Received(byte)
            }
            DecodeKind::FrameError(err) => {
                log::warn!("UART {err} on tick {tick}");
                self.frame_errors += 1;
                TickResult::FrameError(err)
            }
        }
    }

    /// Most recent successfully decoded byte.
    pub fn last_byte(&self) -> Option<u8> {
        self.last_byte
    }

    /// Every decode so far, oldest first.
    pub fn events(&self) -> Events<'_> {
        self.log.iter()
    }

    /// Decodes the cursor has not seen yet; advances the cursor.
    pub fn poll(&self, cursor: &mut EventCursor) -> Events<'_> {
        self.log.since(cursor)
    }

    /// Drop the decode history. Cursors keep their place.
    pub fn clear_events(&mut self) {
        self.log.clear();
    }

    pub fn frame_errors(&self) -> u64 {
        self.frame_errors
    }

    /// Ticks elapsed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending(&self) -> usize {
        self.transmitter.pending()
    }

    pub fn tx_idle(&self) -> bool {
        self.transmitter.is_idle()
    }

    pub fn rx_idle(&self) -> bool {
        self.receiver.is_idle()
    }

    pub fn tx_line(&self) -> &L {
        &self.tx_line
    }

    pub fn rx_line(&self) -> &L {
        &self.rx_line
    }
}
