use uartsim_common::{Device, SignalLine, Wire, MARK};
use uartsim_uart::{Divisor, Receiver, RxOutcome, Transmitter};

pub const PROMPT: &[u8] = b"i am ur princess\r\nagreed? [Yn] ";
pub const AGREED: &[u8] = b"y\r\nohhhhhh!\r\n";
pub const REFUSED: &[u8] = b"n\r\n:<\r\n";

pub const EXIT_AGREED: u32 = 420;
pub const EXIT_REFUSED: u32 = 696_969;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Firmware {
    /// Waiting for a key press.
    Asking,
    /// Answer printed; holds the program's return value.
    Exited(u32),
}

/// Behavioral model of a small SoC running the prompt program.
///
/// On reset the program prints `PROMPT` and polls its UART for a key.
/// `y`, `Y`, `\n` and `\r` agree, `n` and `N` refuse, anything else is
/// ignored. After answering the program returns and the core stops reading.
/// The UART advances on rising clock edges only.
pub struct PromptDevice {
    divisor: Divisor,
    uart_rx: Wire,
    uart_tx: Wire,
    receiver: Receiver,
    transmitter: Transmitter,
    firmware: Firmware,
    cycles: u64,
}

impl PromptDevice {
    pub fn new(divisor: Divisor) -> Self {
        Self {
            divisor,
            uart_rx: Wire::idle(),
            uart_tx: Wire::idle(),
            receiver: Receiver::new(divisor),
            transmitter: Transmitter::new(divisor),
            firmware: Firmware::Asking,
            cycles: 0,
        }
    }

    /// Return value of the program once it has answered.
    pub fn exit_code(&self) -> Option<u32> {
        match self.firmware {
            Firmware::Asking => None,
            Firmware::Exited(code) => Some(code),
        }
    }

    fn on_key(&mut self, key: u8) {
        let (reply, code) = match key {
            b'y' | b'Y' | b'\n' | b'\r' => (AGREED, EXIT_AGREED),
            b'n' | b'N' => (REFUSED, EXIT_REFUSED),
            _ => {
                log::trace!("prompt ignoring key 0x{key:02X}");
                return;
            }
        };
        log::debug!("prompt answered on cycle {}, exit {code}", self.cycles);
        self.transmitter.enqueue(reply);
        self.firmware = Firmware::Exited(code);
    }
}

impl Device for PromptDevice {
    fn name(&self) -> String {
        "prompt SoC".to_string()
    }

    fn reset(&mut self) {
        self.uart_rx.set(MARK);
        self.uart_tx.set(MARK);
        self.receiver = Receiver::new(self.divisor);
        self.transmitter = Transmitter::new(self.divisor);
        self.transmitter.enqueue(PROMPT);
        self.firmware = Firmware::Asking;
        self.cycles = 0;
    }

    fn step(&mut self, clk: bool) {
        if !clk {
            return;
        }
        self.cycles += 1;
        self.transmitter.tick(&self.uart_tx);
        match self.receiver.tick(&self.uart_rx) {
            RxOutcome::Byte(key) if self.firmware == Firmware::Asking => self.on_key(key),
            RxOutcome::FrameError(err) => log::warn!("prompt SoC UART {err}"),
            _ => {}
        }
    }

    fn uart_rx(&self) -> Wire {
        self.uart_rx.clone()
    }

    fn uart_tx(&self) -> Wire {
        self.uart_tx.clone()
    }
}
