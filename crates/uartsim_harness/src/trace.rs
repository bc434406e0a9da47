use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

struct Signal {
    name: String,
    id: char,
    last: Option<bool>,
}

/// Value-change-dump recorder for single-bit signals.
///
/// Only changes are stored; the first sample dumps every signal.
pub struct VcdTrace {
    signals: Vec<Signal>,
    body: String,
}

impl VcdTrace {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let signals = names
            .iter()
            .zip('!'..='~')
            .map(|(name, id)| Signal {
                name: name.as_ref().to_string(),
                id,
                last: None,
            })
            .collect();
        Self {
            signals,
            body: String::new(),
        }
    }

    /// Record `levels` (in signal order) at `time`.
    pub fn sample(&mut self, time: u64, levels: &[bool]) {
        let mut stamped = false;
        for (signal, &level) in self.signals.iter_mut().zip(levels) {
            if signal.last == Some(level) {
                continue;
            }
            if !stamped {
                self.body.push_str(&format!("#{time}\n"));
                stamped = true;
            }
            self.body
                .push_str(&format!("{}{}\n", u8::from(level), signal.id));
            signal.last = Some(level);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("$timescale 1ns $end\n$scope module top $end\n");
        for signal in &self.signals {
            out.push_str(&format!("$var wire 1 {} {} $end\n", signal.id, signal.name));
        }
        out.push_str("$upscope $end\n$enddefinitions $end\n");
        out.push_str(&self.body);
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("failed to write trace to '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_declares_each_signal() {
        let trace = VcdTrace::new(&["clk", "uart_rx"]);
        let text = trace.render();
        assert!(text.starts_with("$timescale 1ns $end\n"));
        assert!(text.contains("$var wire 1 ! clk $end\n"));
        assert!(text.contains("$var wire 1 \" uart_rx $end\n"));
        assert!(text.ends_with("$enddefinitions $end\n"));
    }

    #[test]
    fn only_changes_are_recorded() {
        let mut trace = VcdTrace::new(&["a", "b"]);
        trace.sample(0, &[true, false]);
        trace.sample(1, &[true, false]);
        trace.sample(2, &[false, false]);
        trace.sample(3, &[false, true]);

        let text = trace.render();
        let body = text.split("$enddefinitions $end\n").nth(1).unwrap();
        assert_eq!(body, "#0\n1!\n0\"\n#2\n0!\n#3\n1\"\n");
    }
}
