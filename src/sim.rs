use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::{
    clock::Clock,
    command::{
        device_lock::GetPinStatus,
        sim_detection::{GetSimDetection, GetSimInserted, SetSimDetection},
    },
    config::ModemConfig,
    device::Sim868,
    error::{Error, SimError},
    gnss::FixValidator,
    module_timing::{DEFAULT_TIMEOUT, PIN_TIMEOUT},
    parse::after_prefix,
};

impl<S, G, CLK, C, V> Sim868<S, G, CLK, C, V>
where
    S: Read + Write + ReadReady,
    G: Read + ReadReady,
    CLK: Clock,
    C: ModemConfig,
    V: FixValidator,
{
    /// Enable SIM detection, then check the card is inserted and unlocked.
    pub async fn sim_init(&mut self) -> Result<(), Error> {
        self.ensure_powered()?;

        let detection = self
            .at
            .send_parse_reply(&GetSimDetection, "+CSDT: ", ',', 0, DEFAULT_TIMEOUT)
            .await?;
        if detection != 1 {
            debug!("Enabling SIM detection");
            self.at
                .expect_reply(
                    &SetSimDetection { mode: 1 },
                    "OK",
                    DEFAULT_TIMEOUT,
                    Error::ReplyMismatch,
                )
                .await?;
        }

        let inserted = self
            .at
            .send_parse_reply(&GetSimInserted, "+CSMINS: ", ',', 1, DEFAULT_TIMEOUT)
            .await?;
        if inserted != 1 {
            error!("SIM card not inserted");
            return Err(SimError::CardStatus.into());
        }

        self.at.get_reply(&GetPinStatus, PIN_TIMEOUT).await?;
        let status = after_prefix(self.at.reply(), "+CPIN: ").ok_or(Error::ReplyMismatch)?;
        if status != "READY" {
            error!("SIM card locked: {}", status);
            return Err(SimError::Pin.into());
        }

        info!("SIM ready");
        Ok(())
    }
}
