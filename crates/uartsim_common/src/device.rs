use crate::line::Wire;

/// A simulated hardware design that exposes a UART.
///
/// The harness owns simulation time: it drives the clock input through
/// `step` and the design settles before `step` returns. The two lines are
/// named from the design's point of view, so a host-side transceiver
/// transmits on `uart_rx` and receives from `uart_tx`.
pub trait Device {
    fn name(&self) -> String;
    fn reset(&mut self);
    /// Apply `clk` to the clock input and settle.
    fn step(&mut self, clk: bool);

    fn uart_rx(&self) -> Wire;
    fn uart_tx(&self) -> Wire;
}
