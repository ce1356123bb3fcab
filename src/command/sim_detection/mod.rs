//! ### 6.2 - SIMCom specific SIM commands

use super::NoResponse;
use atat::atat_derive::AtatCmd;

/// 6.2.23 Switch on or off detecting SIM card +CSDT
///
/// Read form, answered with `+CSDT: <mode>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSDT?", NoResponse)]
pub struct GetSimDetection;

/// 6.2.23 Switch on or off detecting SIM card +CSDT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSDT", NoResponse)]
pub struct SetSimDetection {
    /// 0: switch off detecting, 1: switch on detecting
    #[at_arg(position = 0)]
    pub mode: u8,
}

/// 6.2.24 SIM inserted status reporting +CSMINS
///
/// Answered with `+CSMINS: <n>,<SIM inserted>`, the second field being `1`
/// when a card is present.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSMINS?", NoResponse)]
pub struct GetSimInserted;
