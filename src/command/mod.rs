//! AT Commands for the SIMCom SIM868
//! Following the SIM800 Series AT Command Manual and the SIM800 Series
//! IP/HTTP Application Notes, which the SIM868 shares.
//!
//! Only command rendering goes through `atat`: the module's replies are
//! matched and picked apart by [`crate::parse`], so every command answers with
//! [`NoResponse`].

pub mod control;
pub mod device_lock;
pub mod http;
pub mod network_service;
pub mod psn;
pub mod sim_detection;

use atat::atat_derive::{AtatCmd, AtatResp};

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, timeout_ms = 500)]
pub struct AT;
