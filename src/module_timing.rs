use embassy_time::Duration;

/// Reply window used by most short AT transactions
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Polling tick of the transport reader
pub const POLL_TICK: Duration = Duration::from_millis(1);

/// High time of `PWRKEY` to toggle the module on or off
pub fn pwr_pulse_time() -> Duration {
    Duration::from_secs(2)
}

/// Settle time after releasing `PWRKEY`
pub fn pwr_settle_time() -> Duration {
    Duration::from_millis(100)
}

/// Time the `STATUS` line gets to reflect a toggle
pub fn pwr_confirm_time() -> Duration {
    Duration::from_secs(1)
}

/// Gap between the power down and power up halves of a reset
pub fn reset_gap_time() -> Duration {
    Duration::from_secs(2)
}

/// Total window for the autobaud handshake
pub const AUTOBAUD_WINDOW: Duration = Duration::from_secs(2);
pub const AUTOBAUD_RETRY: Duration = Duration::from_millis(500);
pub const ECHO_OFF_SETTLE: Duration = Duration::from_millis(100);

pub const PIN_TIMEOUT: Duration = Duration::from_secs(5);

pub const REGISTRATION_POLL: Duration = Duration::from_secs(15);
pub const REGISTRATION_WINDOW: Duration = Duration::from_secs(120);

pub const GPRS_ATTACH_TIMEOUT: Duration = Duration::from_secs(20);
pub const BEARER_TIMEOUT: Duration = Duration::from_secs(10);
pub const BEARER_SWITCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const HTTP_ACTION_TIMEOUT: Duration = Duration::from_secs(30);
/// Upload window announced to the module with `+HTTPDATA`, in milliseconds
pub const HTTP_UPLOAD_WINDOW_MS: u32 = 8000;
pub const HTTP_BODY_WRITE_TIMEOUT: Duration = Duration::from_secs(16);
pub const HTTP_BODY_READ_TIMEOUT: Duration = Duration::from_secs(5);
