//! ### 7 / 9 - Packet switched data and bearer configuration
//!
//! GPRS attach is handled through the 3GPP `+CGATT` command, while the data
//! connection used by the HTTP application runs on a SIMCom bearer profile
//! configured and switched with `+SAPBR`.
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::{BearerCommand, GPRSAttachedState};

/// 7.2.10 Attach or detach from GPRS service +CGATT
///
/// Read form, answered with `+CGATT: <state>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT?", NoResponse, timeout_ms = 20000)]
pub struct GetGPRSAttached;

/// 7.2.10 Attach or detach from GPRS service +CGATT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT", NoResponse, timeout_ms = 20000)]
pub struct SetGPRSAttached {
    #[at_arg(position = 0)]
    pub state: GPRSAttachedState,
}

/// 9.2.1 Bearer settings for applications based on IP +SAPBR
///
/// Opens (`1`), closes (`0`) or queries (`2`) a bearer profile. The query is
/// answered with `+SAPBR: <cid>,<status>,<ip_addr>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SAPBR", NoResponse, timeout_ms = 30000)]
pub struct BearerControl {
    #[at_arg(position = 0)]
    pub cmd_type: BearerCommand,
    #[at_arg(position = 1)]
    pub cid: u8,
}

/// 9.2.1 Bearer settings for applications based on IP +SAPBR
///
/// Sets one parameter (`CONTYPE`, `APN`, `USER`, `PWD`, ...) of a bearer
/// profile.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SAPBR", NoResponse, timeout_ms = 10000)]
pub struct SetBearerParameter<'a> {
    #[at_arg(position = 0)]
    pub cmd_type: BearerCommand,
    #[at_arg(position = 1)]
    pub cid: u8,
    #[at_arg(position = 2, len = 8)]
    pub tag: &'a str,
    #[at_arg(position = 3, len = 64)]
    pub value: &'a str,
}
