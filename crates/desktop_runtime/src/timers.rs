//! Taskbar clock ticks and the screensaver idle timer.
//!
//! Both timers are driven by the host with wall-clock milliseconds; neither touches window or
//! file-system state.

use serde::{Deserialize, Serialize};
use tracing::debug;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_DAY: u64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSaverKind {
    /// Never activates.
    None,
    Blank,
    #[default]
    WindowsLogo,
    Matrix,
}

/// Wall-clock time of day shown in the taskbar tray (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockReading {
    pub fn from_unix_ms(now_ms: u64) -> Self {
        let seconds_of_day = (now_ms % MS_PER_DAY) / 1000;
        Self {
            hour: (seconds_of_day / 3600) as u32,
            minute: ((seconds_of_day / 60) % 60) as u32,
            second: (seconds_of_day % 60) as u32,
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTicker {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl ClockTicker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns a reading when a tick is due. The first poll always ticks.
    ///
    /// A host that falls behind skips missed ticks instead of replaying them.
    pub fn poll(&mut self, now_ms: u64) -> Option<ClockReading> {
        match self.next_due_ms {
            Some(due) if now_ms < due => None,
            Some(due) => {
                let next = due + self.interval_ms;
                self.next_due_ms = Some(if next <= now_ms {
                    now_ms + self.interval_ms
                } else {
                    next
                });
                Some(ClockReading::from_unix_ms(now_ms))
            }
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                Some(ClockReading::from_unix_ms(now_ms))
            }
        }
    }
}

/// Arms after each input and activates the screensaver once the timeout elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleTimer {
    kind: ScreenSaverKind,
    timeout_ms: u64,
    deadline_ms: Option<u64>,
    active: bool,
}

impl IdleTimer {
    pub fn new(kind: ScreenSaverKind, timeout_minutes: u32, now_ms: u64) -> Self {
        let mut timer = Self {
            kind,
            timeout_ms: u64::from(timeout_minutes.max(1)) * MS_PER_MINUTE,
            deadline_ms: None,
            active: false,
        };
        timer.arm(now_ms);
        timer
    }

    pub fn kind(&self) -> ScreenSaverKind {
        self.kind
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Whether the screensaver is currently showing.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn arm(&mut self, now_ms: u64) {
        self.deadline_ms = match self.kind {
            ScreenSaverKind::None => None,
            _ => Some(now_ms + self.timeout_ms),
        };
    }

    /// Dismisses an active screensaver and restarts the countdown.
    ///
    /// Returns `true` when a showing screensaver was dismissed.
    pub fn record_activity(&mut self, now_ms: u64) -> bool {
        let dismissed = std::mem::take(&mut self.active);
        self.arm(now_ms);
        dismissed
    }

    /// Returns `true` exactly once per arm, when the deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                self.active = true;
                debug!(kind = ?self.kind, "screensaver activated");
                true
            }
            _ => false,
        }
    }

    pub fn configure(&mut self, kind: ScreenSaverKind, timeout_minutes: u32, now_ms: u64) {
        self.kind = kind;
        self.timeout_ms = u64::from(timeout_minutes.max(1)) * MS_PER_MINUTE;
        self.active = false;
        self.arm(now_ms);
    }
}
