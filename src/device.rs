use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::{
    client::AtClient,
    clock::Clock,
    config::{BearerConfig, BearerProvider, ModemConfig},
    error::Error,
    gnss::{AsciiFixCounter, FixValidator, GnssReceiver},
    http::HttpSession,
    power::PowerState,
};

/// Driver session for one SIM868 module.
///
/// Owns both serial channels, the board wiring and every transaction buffer.
/// All operations take `&mut self`, so transactions are serialized by
/// construction.
pub struct Sim868<S, G, CLK, C, V = AsciiFixCounter> {
    pub(crate) at: AtClient<S, CLK>,
    pub(crate) gnss: GnssReceiver<G, CLK, V>,
    pub(crate) config: C,
    pub(crate) clock: CLK,
    pub(crate) bearer: BearerConfig,
    pub(crate) http: HttpSession,
}

impl<S, G, CLK, C> Sim868<S, G, CLK, C, AsciiFixCounter>
where
    S: Read + Write + ReadReady,
    G: Read + ReadReady,
    CLK: Clock,
    C: ModemConfig,
{
    pub fn new(serial: S, gnss: G, config: C, clock: CLK) -> Self {
        Self::with_validator(serial, gnss, config, clock, AsciiFixCounter::default())
    }
}

impl<S, G, CLK, C, V> Sim868<S, G, CLK, C, V>
where
    S: Read + Write + ReadReady,
    G: Read + ReadReady,
    CLK: Clock,
    C: ModemConfig,
    V: FixValidator,
{
    pub fn with_validator(serial: S, gnss: G, config: C, clock: CLK, validator: V) -> Self {
        Self {
            at: AtClient::new(serial, clock.clone(), C::MAX_COMMAND_LEN, C::AT_DEBUG),
            gnss: GnssReceiver::new(gnss, clock.clone(), validator, C::GNSS_TIMEOUT),
            config,
            clock,
            bearer: BearerConfig::default(),
            http: HttpSession::new(),
        }
    }

    pub fn release(self) -> (S, G, C) {
        (self.at.release(), self.gnss.release(), self.config)
    }

    pub fn set_bearer(&mut self, bearer: BearerConfig) {
        self.bearer = bearer;
    }

    /// Validated replacement for [`set_bearer`](Self::set_bearer).
    pub fn set_bearer_credentials(&mut self, apn: &str, username: &str, password: &str) -> Result<(), Error> {
        self.bearer = BearerConfig::new(apn, username, password)?;
        Ok(())
    }

    pub fn set_bearer_provider(&mut self, provider: BearerProvider) {
        self.bearer = provider.into();
    }

    pub fn bearer(&self) -> &BearerConfig {
        &self.bearer
    }

    /// Fail with [`Error::PoweredDown`] unless the status line reports the
    /// module as on.
    pub(crate) fn ensure_powered(&mut self) -> Result<(), Error> {
        match self.power_state()? {
            PowerState::On => Ok(()),
            PowerState::Off => Err(Error::PoweredDown),
        }
    }
}
