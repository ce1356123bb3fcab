//! ### 2.2 - V.25TER commands
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::Echo;

/// 2.2.9 Set command echo mode E
///
/// Controls whether the module echoes characters received from the host.
#[derive(Clone, AtatCmd)]
#[at_cmd("E", NoResponse, value_sep = false)]
pub struct SetEcho {
    #[at_arg(position = 0)]
    pub enabled: Echo,
}
