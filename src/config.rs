use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};
use heapless::String;

use crate::error::Error;

pub const MAX_APN_LEN: usize = 64;
pub const MAX_CREDENTIAL_LEN: usize = 32;

/// Scratch space for rendering one command line
pub(crate) const COMMAND_BUFFER_LEN: usize = 556;

pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Output pin behind an inverting transistor stage, as commonly found on
/// `PWRKEY` drivers.
pub struct ReverseOutputPin<P: OutputPin<Error = Infallible>>(pub P);

impl<P: OutputPin<Error = Infallible>> ErrorType for ReverseOutputPin<P> {
    type Error = Infallible;
}

impl<P: OutputPin<Error = Infallible>> OutputPin for ReverseOutputPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        match state {
            PinState::Low => self.0.set_state(PinState::High),
            PinState::High => self.0.set_state(PinState::Low),
        }
    }
}

pub struct ReverseInputPin<P: InputPin<Error = Infallible>>(pub P);

impl<P: InputPin<Error = Infallible>> ErrorType for ReverseInputPin<P> {
    type Error = Infallible;
}

impl<P: InputPin<Error = Infallible>> InputPin for ReverseInputPin<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }
}

/// Board specific wiring and tuning of a SIM868.
pub trait ModemConfig {
    /// `PWRKEY` driver, asserted high to toggle the module
    type PowerPin: OutputPin;
    /// `STATUS` line, high while the module is on
    type StatusPin: InputPin;
    /// Enable line of the GNSS engine
    type GnssEnablePin: OutputPin;

    /// Log every command and reply going over the AT channel
    const AT_DEBUG: bool = false;
    /// Longest command line accepted by the module
    const MAX_COMMAND_LEN: usize = COMMAND_BUFFER_LEN;
    /// Bearer profile used for `+SAPBR` and the HTTP `CID` parameter
    const BEARER_PROFILE: u8 = 1;
    /// How long to wait for an RMC sentence on the GNSS channel
    const GNSS_TIMEOUT: Duration = Duration::from_secs(2);

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin>;
    fn status_pin(&mut self) -> Option<&mut Self::StatusPin>;
    fn gnss_enable_pin(&mut self) -> Option<&mut Self::GnssEnablePin>;
}

/// Bearer (PDP context) credentials handed to `+SAPBR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerConfig {
    pub(crate) apn: String<MAX_APN_LEN>,
    pub(crate) username: String<MAX_CREDENTIAL_LEN>,
    pub(crate) password: String<MAX_CREDENTIAL_LEN>,
}

impl BearerConfig {
    pub fn new(apn: &str, username: &str, password: &str) -> Result<Self, Error> {
        Ok(Self {
            apn: bounded(apn)?,
            username: bounded(username)?,
            password: bounded(password)?,
        })
    }

    pub fn apn(&self) -> &str {
        &self.apn
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Carrier presets for the Mexican operators the board is commonly deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerProvider {
    M2m,
    Att,
    Iusacell,
    Movistar,
    Telcel,
}

impl BearerProvider {
    /// `(apn, username, password)`
    pub const fn credentials(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::M2m => ("m2m.amx", "jasper", "jasper"),
            Self::Att | Self::Iusacell => ("modem.nexteldata.com.mx", "", ""),
            Self::Movistar => ("internet.movistar.mx", "movistar", "movistar"),
            Self::Telcel => ("internet.itelcel.com", "webgprs", "webgprs2003"),
        }
    }
}

impl From<BearerProvider> for BearerConfig {
    fn from(provider: BearerProvider) -> Self {
        let (apn, username, password) = provider.credentials();
        // All presets fit the bounded fields
        Self {
            apn: String::try_from(apn).unwrap_or_default(),
            username: String::try_from(username).unwrap_or_default(),
            password: String::try_from(password).unwrap_or_default(),
        }
    }
}

pub(crate) fn bounded<const N: usize>(value: &str) -> Result<String<N>, Error> {
    String::try_from(value).map_err(|_| Error::Overflow)
}
