//! Time service trait and desktop implementation.

use webtop_types::error::Result;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A simple wall-clock timestamp (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Day of week, 0 = Sunday.
    pub weekday: u8,
}

impl SystemTime {
    /// Break a Unix timestamp down into calendar fields.
    pub fn from_unix(secs: u64) -> Self {
        let days = secs / 86400;
        let time_of_day = secs % 86400;
        let (year, month, day) = days_to_ymd(days);
        Self {
            year,
            month,
            day,
            hour: (time_of_day / 3600) as u8,
            minute: ((time_of_day % 3600) / 60) as u8,
            second: (time_of_day % 60) as u8,
            // 1970-01-01 was a Thursday.
            weekday: ((days + 4) % 7) as u8,
        }
    }
}

/// Formats like `date(1)`: `Sun Oct 18 09:05:00 UTC 2026`.
impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weekday = WEEKDAYS[usize::from(self.weekday % 7)];
        let month = MONTHS[usize::from(self.month.clamp(1, 12) - 1)];
        write!(
            f,
            "{weekday} {month} {:02} {:02}:{:02}:{:02} UTC {}",
            self.day, self.hour, self.minute, self.second, self.year,
        )
    }
}

/// Abstraction over platform time services.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<SystemTime>;

    /// Seconds since the session started.
    fn uptime_secs(&self) -> Result<u64>;
}

/// Desktop platform backed by the host clock.
#[derive(Debug)]
pub struct DesktopPlatform {
    start_time: std::time::Instant,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeService for DesktopPlatform {
    fn now(&self) -> Result<SystemTime> {
        use std::time::SystemTime as StdTime;
        let secs = StdTime::now()
            .duration_since(StdTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Ok(SystemTime::from_unix(secs))
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(self.start_time.elapsed().as_secs())
    }
}

/// A clock frozen at a fixed instant. Used by tests and scripted sessions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub unix_secs: u64,
    pub uptime: u64,
}

impl TimeService for FixedClock {
    fn now(&self) -> Result<SystemTime> {
        Ok(SystemTime::from_unix(self.unix_secs))
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(self.uptime)
    }
}

/// Convert days since Unix epoch to (year, month, day).
fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let feb = if is_leap(year) { 29 } else { 28 };
    let month_days: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 12u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    (year, month, (days + 1) as u8)
}

fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}
