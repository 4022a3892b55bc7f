use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

/// Wall-clock sources for record timestamps.
///
/// The logger never reads the system time directly; it asks a [`Clock`] for
/// the current broken-down local time. [`SystemClock`] is the default source,
/// [`FixedClock`] pins the time for reproducible output.

/// Length of a rendered timestamp prefix for years 1000 through 9999.
///
/// `"[YYYY-MM-DD | HH:MM:SS] "` including the trailing space.
pub const TIMESTAMP_LEN: usize = 24;

/// Broken-down local time with 1-based month and day and a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalTime {
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Breaks a zoned chrono timestamp into its calendar fields.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            // Leap seconds are folded into :59 by chrono; keep the field in range.
            second: dt.second().min(59),
        }
    }
}

/// Renders the record timestamp prefix, `"[YYYY-MM-DD | HH:MM:SS] "`.
impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:04}-{:02}-{:02} | {:02}:{:02}:{:02}] ",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Source of the current wall time.
pub trait Clock {
    fn now(&self) -> LocalTime;
}

/// Reads the host's local time zone through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> LocalTime {
        LocalTime::from_datetime(&Local::now())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalTime);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> LocalTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> LocalTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> LocalTime {
        (**self).now()
    }
}
