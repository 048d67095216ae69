//! Platform services consumed by the terminal.
//!
//! The only service the desktop simulation needs is a clock: `date` and
//! `uptime` read it through [`TimeService`] so tests can pin the time.

mod services;

pub use services::{DesktopPlatform, FixedClock, SystemTime, TimeService};
