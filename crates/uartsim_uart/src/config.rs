use thiserror::Error;
use typed_builder::TypedBuilder;

/// Default simulated clock rate.
pub const DEFAULT_CLOCK_HZ: u32 = 12_000_000;
/// Default line rate.
pub const DEFAULT_BAUD: u32 = 115_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("baud rate must be non-zero")]
    ZeroBaud,
    #[error("clock of {clock_hz} Hz is too slow for {baud} baud")]
    ClockTooSlow { clock_hz: u32, baud: u32 },
    #[error("bit period must be at least one tick")]
    ZeroDivisor,
}

/// Line settings for a simulated UART.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct UartConfig {
    #[builder(default = DEFAULT_CLOCK_HZ)]
    pub clock_hz: u32,
    #[builder(default = DEFAULT_BAUD)]
    pub baud: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl UartConfig {
    /// Ticks per bit period for this clock and baud rate.
    pub fn divisor(&self) -> Result<Divisor, ConfigError> {
        if self.baud == 0 {
            return Err(ConfigError::ZeroBaud);
        }
        Divisor::new(self.clock_hz / self.baud).map_err(|_| ConfigError::ClockTooSlow {
            clock_hz: self.clock_hz,
            baud: self.baud,
        })
    }
}

/// Number of simulation ticks in one bit period.
///
/// Never zero. Even values keep the receiver's half-period alignment exact;
/// odd values round the half period down. A divisor of 1 is accepted but
/// leaves no room to sample mid-bit, so frames at that rate do not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Divisor(u32);

impl Divisor {
    pub fn new(ticks: u32) -> Result<Self, ConfigError> {
        if ticks == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if ticks == 1 {
            log::warn!("UART divisor 1 cannot sample mid-bit; received frames will not decode");
        } else if ticks % 2 != 0 {
            log::warn!("UART divisor {ticks} is odd; receive sampling will sit slightly early");
        }
        Ok(Self(ticks))
    }

    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Delay from a start edge to the middle of the start bit.
    #[inline]
    pub const fn half(self) -> u32 {
        if self.0 >= 2 {
            self.0 / 2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_divides_down_to_104() {
        let divisor = UartConfig::default().divisor().unwrap();
        assert_eq!(divisor.ticks(), 104);
        assert_eq!(divisor.half(), 52);
    }

    #[test]
    fn builder_overrides_clock_and_baud() {
        let config = UartConfig::builder().clock_hz(48_000).baud(12_000).build();
        assert_eq!(config.divisor().unwrap().ticks(), 4);
    }

    #[test]
    fn zero_baud_is_rejected() {
        let config = UartConfig::builder().baud(0).build();
        assert_eq!(config.divisor(), Err(ConfigError::ZeroBaud));
    }

    #[test]
    fn clock_slower_than_baud_is_rejected() {
        let config = UartConfig::builder().clock_hz(9_600).baud(115_200).build();
        assert_eq!(
            config.divisor(),
            Err(ConfigError::ClockTooSlow {
                clock_hz: 9_600,
                baud: 115_200
            })
        );
    }

    #[test]
    fn divisor_of_one_still_waits_a_tick() {
        let divisor = Divisor::new(1).unwrap();
        assert_eq!(divisor.half(), 1);
        assert_eq!(Divisor::new(0), Err(ConfigError::ZeroDivisor));
    }
}
