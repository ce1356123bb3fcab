use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::{
    clock::Clock,
    command::{
        network_service::{
            types::OperatorSelectionMode, GetNetworkRegistrationStatus, GetOperatorSelection,
            GetSignalQuality, SetOperatorSelection,
        },
        psn::{
            types::{tag, BearerCommand, GPRSAttachedState, CONNECTION_TYPE_GPRS},
            BearerControl, GetGPRSAttached, SetBearerParameter, SetGPRSAttached,
        },
    },
    config::ModemConfig,
    device::Sim868,
    error::{Error, NetworkError},
    gnss::FixValidator,
    module_timing::{
        BEARER_SWITCH_TIMEOUT, BEARER_TIMEOUT, DEFAULT_TIMEOUT, GPRS_ATTACH_TIMEOUT,
        REGISTRATION_POLL, REGISTRATION_WINDOW,
    },
    registration::{ConnectionState, RegistrationStatus},
};

const MIN_RSSI: u8 = 9;
const MAX_RSSI: u8 = 31;

impl<S, G, CLK, C, V> Sim868<S, G, CLK, C, V>
where
    S: Read + Write + ReadReady,
    G: Read + ReadReady,
    CLK: Clock,
    C: ModemConfig,
    V: FixValidator,
{
    /// Switch operator selection to automatic unless it already is.
    pub async fn network_mode(&mut self) -> Result<(), Error> {
        self.ensure_powered()?;

        let mode = self
            .at
            .send_parse_reply(&GetOperatorSelection, "+COPS: ", ',', 0, DEFAULT_TIMEOUT)
            .await?;
        if mode != OperatorSelectionMode::Automatic as i32 {
            debug!("Operator selection mode {}, forcing automatic", mode);
            self.at
                .expect_reply(
                    &SetOperatorSelection {
                        mode: OperatorSelectionMode::Automatic,
                    },
                    "OK",
                    DEFAULT_TIMEOUT,
                    Error::ReplyMismatch,
                )
                .await?;
        }
        Ok(())
    }

    /// Current RSSI, rejected unless usable (`9..=31`).
    pub async fn network_rssi(&mut self) -> Result<u8, Error> {
        self.ensure_powered()?;

        let rssi = self
            .at
            .send_parse_reply(&GetSignalQuality, "+CSQ: ", ',', 0, DEFAULT_TIMEOUT)
            .await?;
        let rssi = u8::try_from(rssi).unwrap_or(0);

        if (MIN_RSSI..=MAX_RSSI).contains(&rssi) {
            debug!("RSSI {}", rssi);
            Ok(rssi)
        } else {
            warn!("Unusable RSSI {}", rssi);
            Err(NetworkError::Rssi(rssi).into())
        }
    }

    /// Poll `+CREG` until the module is registered, home or roaming.
    ///
    /// Returns as soon as a registration is observed. When the window runs out
    /// the outcome of the last poll is returned.
    pub async fn gsm_registration(&mut self) -> Result<RegistrationStatus, Error> {
        self.ensure_powered()?;

        let deadline = self.clock.deadline(REGISTRATION_WINDOW);
        loop {
            let poll_started = self.clock.now();

            let outcome = match self
                .at
                .send_parse_reply(&GetNetworkRegistrationStatus, "+CREG: ", ',', 1, DEFAULT_TIMEOUT)
                .await
                .map(RegistrationStatus::from)
            {
                Ok(status) if status.registered() => {
                    info!("Registered to network: {:?}", status);
                    return Ok(status);
                }
                Ok(RegistrationStatus::NotRegistered) => {
                    debug!("Not registered");
                    Error::Network(NetworkError::Registration)
                }
                Ok(RegistrationStatus::Searching) => {
                    info!("Searching network...");
                    Error::Network(NetworkError::Registration)
                }
                Ok(RegistrationStatus::Denied) => {
                    warn!("Registration denied");
                    Error::Network(NetworkError::Registration)
                }
                Ok(_) | Err(Error::ReplyMismatch) => Error::ReplyMismatch,
                Err(e) => return Err(e),
            };

            let next_poll = poll_started + REGISTRATION_POLL;
            if next_poll >= deadline {
                return Err(outcome);
            }
            self.clock
                .delay(next_poll.saturating_duration_since(self.clock.now()))
                .await;
        }
    }

    /// Attach to (or detach from) GPRS and open (or close) the bearer profile.
    pub async fn gprs_attach(&mut self, enable: bool) -> Result<(), Error> {
        self.ensure_powered()?;

        let attached = self
            .at
            .send_parse_reply(&GetGPRSAttached, "+CGATT: ", ',', 0, GPRS_ATTACH_TIMEOUT)
            .await?
            == 1;

        if enable && !attached {
            self.set_gprs_attached(GPRSAttachedState::Attached).await?;
        }

        let state = self.bearer_state().await?;

        if enable && state == ConnectionState::Closed {
            self.configure_bearer().await?;
            self.at
                .expect_reply(
                    &Self::bearer_control(BearerCommand::Open),
                    "OK",
                    BEARER_SWITCH_TIMEOUT,
                    NetworkError::GprsContext.into(),
                )
                .await?;
            self.verify_bearer(ConnectionState::Connected).await?;
            info!("Bearer connected");
        }

        if !enable && state == ConnectionState::Connected {
            self.at
                .expect_reply(
                    &Self::bearer_control(BearerCommand::Close),
                    "OK",
                    BEARER_SWITCH_TIMEOUT,
                    NetworkError::GprsContext.into(),
                )
                .await?;
            self.verify_bearer(ConnectionState::Closed).await?;
            info!("Bearer closed");
        }

        if !enable && attached {
            self.set_gprs_attached(GPRSAttachedState::Detached).await?;
        }
        Ok(())
    }

    /// Mode, signal, registration and GPRS attach in sequence.
    pub async fn gprs_gsm_init(&mut self) -> Result<(), Error> {
        self.network_mode().await?;
        self.network_rssi().await?;
        self.gsm_registration().await?;
        self.gprs_attach(true).await
    }

    /// State of the configured bearer profile.
    pub async fn bearer_state(&mut self) -> Result<ConnectionState, Error> {
        let state = self
            .at
            .send_parse_reply(
                &Self::bearer_control(BearerCommand::Query),
                "+SAPBR: ",
                ',',
                1,
                BEARER_TIMEOUT,
            )
            .await?;
        ConnectionState::try_from(state)
    }

    fn bearer_control(cmd_type: BearerCommand) -> BearerControl {
        BearerControl {
            cmd_type,
            cid: C::BEARER_PROFILE,
        }
    }

    async fn set_gprs_attached(&mut self, state: GPRSAttachedState) -> Result<(), Error> {
        self.at
            .expect_reply(
                &SetGPRSAttached { state },
                "OK",
                GPRS_ATTACH_TIMEOUT,
                NetworkError::GprsService.into(),
            )
            .await
    }

    async fn configure_bearer(&mut self) -> Result<(), Error> {
        let params = [
            (tag::CONNECTION_TYPE, CONNECTION_TYPE_GPRS),
            (tag::APN, self.bearer.apn()),
            (tag::USER, self.bearer.username()),
            (tag::PASSWORD, self.bearer.password()),
        ];

        for (tag, value) in params {
            let cmd = SetBearerParameter {
                cmd_type: BearerCommand::SetParameter,
                cid: C::BEARER_PROFILE,
                tag,
                value,
            };
            self.at
                .expect_reply(&cmd, "OK", BEARER_TIMEOUT, NetworkError::GprsContext.into())
                .await?;
        }
        Ok(())
    }

    async fn verify_bearer(&mut self, expected: ConnectionState) -> Result<(), Error> {
        match self.bearer_state().await {
            Ok(state) if state == expected => Ok(()),
            Ok(_) | Err(Error::ReplyMismatch) => Err(NetworkError::GprsContext.into()),
            Err(e) => Err(e),
        }
    }
}
