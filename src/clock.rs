//! Month source for season resolution

use chrono::Datelike;

/// Provides the current month, zero-based (0 = January)
pub trait Clock {
    fn month0(&self) -> u32;
}

/// Local wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn month0(&self) -> u32 {
        chrono::Local::now().month0()
    }
}

/// Always reports the same month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn month0(&self) -> u32 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn month0(&self) -> u32 {
        (**self).month0()
    }
}
