//! Clock driver for a UART-attached simulated design.
//!
//! The harness owns simulation time. Every cycle it raises the clock, lets
//! the design settle, ticks the UART connector, feeds decoded bytes to the
//! script and lowers the clock again. A run completes once the script has
//! matched its last exchange and every reply has left the wire.
pub mod script;
pub mod trace;

use std::path::PathBuf;

use anyhow::Result;
use typed_builder::TypedBuilder;
use uartsim_common::{Device, SignalLine};
use uartsim_uart::{Connector, Divisor, EventCursor};

pub use script::{Exchange, Script, ScriptAction};
pub use trace::VcdTrace;

/// Default cycle budget for a run.
pub const DEFAULT_MAX_CYCLES: u64 = 60_000;

#[derive(TypedBuilder)]
pub struct HarnessInitInfo {
    pub divisor: Divisor,
    #[builder(default = DEFAULT_MAX_CYCLES)]
    pub max_cycles: u64,
    #[builder(default)]
    pub trace_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Full clock cycles simulated.
    pub cycles: u64,
    /// Whether the script ran to the end.
    pub completed: bool,
    pub frame_errors: u64,
    /// Every byte decoded from the design.
    pub transcript: Vec<u8>,
}

pub struct Harness;

impl Harness {
    pub fn run(
        info: HarnessInitInfo,
        device: &mut impl Device,
        mut script: Script,
    ) -> Result<RunReport> {
        let HarnessInitInfo {
            divisor,
            max_cycles,
            trace_path,
        } = info;

        log::info!(
            "Running {} for up to {max_cycles} cycles, divisor {}",
            device.name(),
            divisor.ticks()
        );

        device.reset();
        // We transmit on the design's RX line and receive from its TX.
        let mut uart = Connector::new(divisor, device.uart_rx(), device.uart_tx());
        let mut trace = trace_path
            .as_ref()
            .map(|_| VcdTrace::new(&["clk", "uart_rx", "uart_tx"]));
        let mut cursor = EventCursor::new();
        let mut time = 0u64;
        let mut cycles = 0u64;
        let mut script_done = script.is_done();
        let mut done = script_done;

        while cycles < max_cycles && !done {
            device.step(true);
            sample(&mut trace, &mut time, true, &uart);

            uart.tick();
            script_done = deliver(&mut uart, &mut cursor, &mut script);

            device.step(false);
            sample(&mut trace, &mut time, false, &uart);
            cycles += 1;

            done = script_done && uart.pending() == 0 && uart.tx_idle();
        }

        if !script_done {
            log::warn!(
                "Script incomplete after {cycles} cycles; still waiting on {:?}",
                String::from_utf8_lossy(script.pending())
            );
        } else if !done {
            log::warn!(
                "Script matched but the final reply was still sending after {cycles} cycles"
            );
        }
        log::info!("Finished on cycle {cycles}, completed={done}");

        if let (Some(trace), Some(path)) = (&trace, &trace_path) {
            trace.write_to(path)?;
            log::info!("Wrote trace to '{}'", path.display());
        }

        Ok(RunReport {
            cycles,
            completed: done,
            frame_errors: uart.frame_errors(),
            transcript: script.transcript().to_vec(),
        })
    }
}

/// Feed every decode the cursor has not seen to the script, queue replies,
/// then drop the consumed history. Returns whether the script has finished.
fn deliver(uart: &mut Connector, cursor: &mut EventCursor, script: &mut Script) -> bool {
    let bytes: Vec<u8> = uart.poll(cursor).bytes().collect();
    uart.clear_events();

    for byte in bytes {
        match script.feed(byte) {
            ScriptAction::Continue | ScriptAction::Done => {}
            ScriptAction::Send(reply) => {
                log::debug!("Sending {:?}", String::from_utf8_lossy(&reply));
                uart.tx(reply);
            }
        }
    }
    script.is_done()
}

fn sample(trace: &mut Option<VcdTrace>, time: &mut u64, clk: bool, uart: &Connector) {
    if let Some(trace) = trace {
        trace.sample(*time, &[clk, uart.tx_line().get(), uart.rx_line().get()]);
    }
    *time += 1;
}
