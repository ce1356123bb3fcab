#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod gnss;
pub mod parse;
pub mod registration;
pub mod transport;

mod device;
mod http;
mod module_timing;
mod network;
mod power;
mod sim;

#[cfg(test)]
mod test_helpers;

pub use clock::{Clock, EmbassyClock};
pub use config::{BearerConfig, BearerProvider, ModemConfig, NoPin, ReverseInputPin, ReverseOutputPin};
pub use device::Sim868;
pub use error::{Error, GnssError, HttpError, NetworkError, SimError};
pub use gnss::{AsciiFixCounter, FixValidator, GnssFix, GnssTimestamp, StatusFieldValidator};
pub use http::{HttpHeader, HttpMethod};
pub use power::{PowerLevel, PowerState};
pub use registration::{ConnectionState, RegistrationStatus, SignalStrength};
