pub mod device;

use std::path::PathBuf;

use anyhow::Result;
use typed_builder::TypedBuilder;
use uartsim_harness::{
    Exchange, Harness, HarnessInitInfo, RunReport, Script, DEFAULT_MAX_CYCLES,
};
use uartsim_uart::UartConfig;

pub use device::PromptDevice;

/// Keys typed at the prompt. The digits are ignored by the program; only the
/// final `y` answers it.
pub const ANSWER_KEYS: &[u8] = b"1234567890y";

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunOptions {
    #[builder(default)]
    pub uart: UartConfig,
    #[builder(default = DEFAULT_MAX_CYCLES)]
    pub max_cycles: u64,
    #[builder(default)]
    pub vcd: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: RunReport,
    /// Return value of the simulated program, if it got that far.
    pub exit_code: Option<u32>,
}

impl Outcome {
    /// Process exit status: 0 when the conversation completed.
    pub fn rc(&self) -> i32 {
        if self.report.completed {
            0
        } else {
            1
        }
    }
}

/// The conversation expected from the prompt program.
pub fn prompt_script() -> Script {
    Script::new(vec![
        Exchange::new(device::PROMPT).reply(ANSWER_KEYS),
        Exchange::new(device::AGREED),
    ])
}

pub fn run(options: RunOptions) -> Result<Outcome> {
    run_script(options, prompt_script())
}

pub fn run_script(options: RunOptions, script: Script) -> Result<Outcome> {
    let RunOptions {
        uart,
        max_cycles,
        vcd,
    } = options;
    let divisor = uart.divisor()?;
    log::info!("UART at {} baud from a {} Hz clock", uart.baud, uart.clock_hz);

    let mut device = PromptDevice::new(divisor);
    let info = HarnessInitInfo::builder()
        .divisor(divisor)
        .max_cycles(max_cycles)
        .trace_path(vcd)
        .build();
    let report = Harness::run(info, &mut device, script)?;

    Ok(Outcome {
        report,
        exit_code: device.exit_code(),
    })
}

#[cfg(test)]
mod tests;
