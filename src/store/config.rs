//! Store configuration

use crate::core::FeeSchedule;
use std::time::Duration;

/// Simulated latency of an outgoing send
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_millis(2000);

/// Events buffered per subscriber before lagging
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// How strictly mutations are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Unknown currencies are ignored and balances may be overdrawn
    #[default]
    Permissive,
    /// Unknown currencies, non-positive send amounts and overdrafts are errors
    Strict,
}

impl ValidationPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

/// Wallet store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub send_delay: Duration,
    pub fees: FeeSchedule,
    pub policy: ValidationPolicy,
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            send_delay: DEFAULT_SEND_DELAY,
            fees: FeeSchedule::default(),
            policy: ValidationPolicy::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}
