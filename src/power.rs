use embedded_hal::digital::{InputPin as _, OutputPin as _};
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::{
    clock::Clock,
    command::{
        control::{types::Echo, SetEcho},
        AT,
    },
    config::ModemConfig,
    device::Sim868,
    error::Error,
    gnss::FixValidator,
    module_timing::{
        pwr_confirm_time, pwr_pulse_time, pwr_settle_time, reset_gap_time, AUTOBAUD_RETRY,
        AUTOBAUD_WINDOW, DEFAULT_TIMEOUT, ECHO_OFF_SETTLE, POLL_TICK,
    },
};

/// State reported by the `STATUS` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    Off,
    On,
}

/// Requested power transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerLevel {
    On,
    Off,
    Reset,
}

impl<S, G, CLK, C, V> Sim868<S, G, CLK, C, V>
where
    S: Read + Write + ReadReady,
    G: Read + ReadReady,
    CLK: Clock,
    C: ModemConfig,
    V: FixValidator,
{
    /// Without a status pin the module is assumed to be on.
    pub fn power_state(&mut self) -> Result<PowerState, Error> {
        match self.config.status_pin() {
            Some(pin) => {
                if pin.is_high().map_err(|_| Error::IoPin)? {
                    Ok(PowerState::On)
                } else {
                    Ok(PowerState::Off)
                }
            }
            None => Ok(PowerState::On),
        }
    }

    /// Drive the module to `level`. Requesting the state the module is
    /// already in does nothing.
    pub async fn set_power_level(&mut self, level: PowerLevel) -> Result<(), Error> {
        match (level, self.power_state()?) {
            (PowerLevel::On, PowerState::Off) | (PowerLevel::Reset, PowerState::Off) => {
                self.toggle_power(PowerState::On).await
            }
            (PowerLevel::Off, PowerState::On) => self.toggle_power(PowerState::Off).await,
            (PowerLevel::Reset, PowerState::On) => {
                warn!("Resetting SIM868");
                self.toggle_power(PowerState::Off).await?;
                self.clock.delay(reset_gap_time()).await;
                self.toggle_power(PowerState::On).await
            }
            (_, state) => {
                debug!("Module already in power state {:?}", state);
                Ok(())
            }
        }
    }

    async fn toggle_power(&mut self, target: PowerState) -> Result<(), Error> {
        let Some(pin) = self.config.power_pin() else {
            warn!("No power pin configured");
            return Ok(());
        };

        debug!("Pulsing PWRKEY towards {:?}", target);
        pin.set_high().map_err(|_| Error::IoPin)?;
        self.clock.delay(pwr_pulse_time()).await;
        pin.set_low().map_err(|_| Error::IoPin)?;
        self.clock.delay(pwr_settle_time()).await;

        let deadline = self.clock.deadline(pwr_confirm_time());
        loop {
            if self.power_state()? == target {
                info!("Power state {:?}", target);
                return Ok(());
            }
            if self.clock.expired(deadline) {
                error!("STATUS line never reached {:?}", target);
                return Err(Error::PowerState);
            }
            self.clock.delay(POLL_TICK).await;
        }
    }

    /// Autobaud handshake, leaving the module with echo disabled.
    pub async fn init(&mut self) -> Result<(), Error> {
        self.ensure_powered()?;

        let deadline = self.clock.deadline(AUTOBAUD_WINDOW);
        while !self.clock.expired(deadline) {
            if self.at.send_check_reply(&AT, "OK", DEFAULT_TIMEOUT).await? {
                break;
            }
            if self.at.send_check_reply(&AT, "AT", DEFAULT_TIMEOUT).await? {
                break;
            }
            self.clock.delay(AUTOBAUD_RETRY).await;
        }

        let echo_off = SetEcho {
            enabled: Echo::Disable,
        };
        // The first reply may still be the echo of the command itself
        self.at
            .send_check_reply(&echo_off, "OK", DEFAULT_TIMEOUT)
            .await?;
        self.clock.delay(ECHO_OFF_SETTLE).await;

        if self
            .at
            .send_check_reply(&echo_off, "OK", DEFAULT_TIMEOUT)
            .await?
        {
            info!("Autobaud ok");
            Ok(())
        } else {
            error!("Autobaud failed, last reply {}", self.at.reply());
            Err(Error::BaudDetection)
        }
    }
}
