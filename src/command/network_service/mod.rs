//! ### 3.2 - Network service
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::OperatorSelectionMode;

/// 3.2.11 Operator selection +COPS
///
/// Read form, answered with `+COPS: <mode>[,<format>,<oper>]`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS?", NoResponse)]
pub struct GetOperatorSelection;

/// 3.2.11 Operator selection +COPS
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS", NoResponse, timeout_ms = 500)]
pub struct SetOperatorSelection {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
}

/// 3.2.53 Signal quality report +CSQ
///
/// Answered with `+CSQ: <rssi>,<ber>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse)]
pub struct GetSignalQuality;

/// 3.2.28 Network registration +CREG
///
/// Read form, answered with `+CREG: <n>,<stat>[,<lac>,<ci>]`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NoResponse)]
pub struct GetNetworkRegistrationStatus;
