//! Rolling-window regime parameters.
//!
//! # Responsibility
//! - Carry the window length and day cap consumed by window and compliance
//!   calculations.
//!
//! # Invariants
//! - `window_days >= 1`; a window always contains its reference day.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_WINDOW_DAYS: u32 = 180;
pub const DEFAULT_LIMIT_DAYS: u32 = 90;

/// Window length and cap of a "N days in any rolling M-day window" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regime {
    /// Length of the rolling window, reference day included.
    pub window_days: u32,
    /// Maximum days allowed inside the window; one more is a breach.
    pub limit_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegimeError {
    EmptyWindow,
}

impl Display for RegimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWindow => write!(f, "window length must be at least one day"),
        }
    }
}

impl Error for RegimeError {}

impl Regime {
    /// 90 days in any rolling 180-day window.
    pub const SCHENGEN: Self = Self {
        window_days: DEFAULT_WINDOW_DAYS,
        limit_days: DEFAULT_LIMIT_DAYS,
    };

    pub fn new(window_days: u32, limit_days: u32) -> Result<Self, RegimeError> {
        if window_days == 0 {
            return Err(RegimeError::EmptyWindow);
        }
        Ok(Self {
            window_days,
            limit_days,
        })
    }
}

impl Default for Regime {
    fn default() -> Self {
        Self::SCHENGEN
    }
}
