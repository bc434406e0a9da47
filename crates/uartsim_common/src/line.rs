use std::cell::Cell;
use std::rc::Rc;

/// Idle line level.
pub const MARK: bool = true;
/// Active (start bit) line level.
pub const SPACE: bool = false;

/// A single-bit logic signal shared with a simulated design.
///
/// The simulation model owns the signal; whoever implements this trait is
/// only a view onto it. Levels use `true` for logic-high.
pub trait SignalLine {
    fn get(&self) -> bool;
    fn set(&self, level: bool);
}

impl SignalLine for Cell<bool> {
    #[inline]
    fn get(&self) -> bool {
        Cell::get(self)
    }

    #[inline]
    fn set(&self, level: bool) {
        Cell::set(self, level)
    }
}

/// Cloneable handle to a shared signal.
///
/// Every clone observes and drives the same level, which is how a device
/// model and the UART connector end up looking at the same pin.
#[derive(Clone, Debug, Default)]
pub struct Wire(Rc<Cell<bool>>);

impl Wire {
    pub fn new(level: bool) -> Self {
        Self(Rc::new(Cell::new(level)))
    }

    /// A new wire resting at the idle (mark) level.
    pub fn idle() -> Self {
        Self::new(MARK)
    }

    /// Whether both handles refer to the same signal.
    pub fn same_signal(&self, other: &Wire) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SignalLine for Wire {
    #[inline]
    fn get(&self) -> bool {
        self.0.get()
    }

    #[inline]
    fn set(&self, level: bool) {
        self.0.set(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_signal() {
        let a = Wire::idle();
        let b = a.clone();
        assert!(b.get());
        a.set(SPACE);
        assert!(!b.get());
        assert!(a.same_signal(&b));
        assert!(!a.same_signal(&Wire::idle()));
    }

    #[test]
    fn plain_cell_is_a_line() {
        let cell = Cell::new(MARK);
        SignalLine::set(&cell, SPACE);
        assert!(!SignalLine::get(&cell));
    }
}
