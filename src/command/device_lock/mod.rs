//! ### 3.2 - Device lock

use super::NoResponse;
use atat::atat_derive::AtatCmd;

/// 3.2.29 Enter PIN +CPIN
///
/// Reports whether the SIM waits for a password. `+CPIN: READY` means no
/// password is pending.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN?", NoResponse, timeout_ms = 5000)]
pub struct GetPinStatus;
