//! GNSS engine of the SIM868, read from its dedicated NMEA output.
mod decoder;
mod fix;

pub use decoder::{decode, GnssFix, GnssTimestamp};
pub use fix::{AsciiFixCounter, FixValidator, StatusFieldValidator, Verdict};

use embassy_time::Duration;
use embedded_hal::digital::OutputPin as _;
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use heapless::Vec;

use crate::{
    clock::Clock,
    config::ModemConfig,
    device::Sim868,
    error::{Error, GnssError},
    module_timing::POLL_TICK,
    transport::{as_text, Transport},
};

pub const GNSS_BUFFER_LEN: usize = 128;

const SENTENCE_MARKER: &[u8] = b"RMC";

/// Captures RMC sentences off the GNSS channel and keeps the last decoded
/// timestamp.
pub struct GnssReceiver<G, CLK, V> {
    transport: Transport<G, CLK>,
    validator: V,
    timeout: Duration,
    sentence: Vec<u8, GNSS_BUFFER_LEN>,
    fixed: bool,
    timestamp: GnssTimestamp,
}

impl<G, CLK, V> GnssReceiver<G, CLK, V>
where
    G: Read + ReadReady,
    CLK: Clock,
    V: FixValidator,
{
    pub fn new(serial: G, clock: CLK, validator: V, timeout: Duration) -> Self {
        Self {
            transport: Transport::new(serial, clock),
            validator,
            timeout,
            sentence: Vec::new(),
            fixed: false,
            timestamp: GnssTimestamp::default(),
        }
    }

    pub fn release(self) -> G {
        self.transport.release()
    }

    pub fn fixed(&self) -> bool {
        self.fixed
    }

    pub fn timestamp(&self) -> GnssTimestamp {
        self.timestamp
    }

    /// Last captured sentence, starting at the final marker byte
    pub fn sentence(&self) -> &str {
        as_text(&self.sentence)
    }

    /// Capture the next RMC sentence, updating the fix flag on the way.
    ///
    /// A sentence the validator declares void is abandoned where it stands
    /// and clears the fix flag.
    pub async fn read_sentence(&mut self) -> Result<(), Error> {
        self.transport.flush_input().await?;
        self.sentence.clear();
        self.validator.reset();

        let deadline = self.transport.clock().deadline(self.timeout);
        let mut matched = 0;

        loop {
            while let Some(byte) = self.transport.read_byte().await? {
                if matched < SENTENCE_MARKER.len() {
                    matched = match byte {
                        b if b == SENTENCE_MARKER[matched] => matched + 1,
                        b if b == SENTENCE_MARKER[0] => 1,
                        _ => 0,
                    };
                    if matched < SENTENCE_MARKER.len() {
                        continue;
                    }
                }

                if byte == b'\r' {
                    trace!("RMC: {}", as_text(&self.sentence));
                    return Ok(());
                }

                match self.validator.feed(byte) {
                    Verdict::Invalid => {
                        debug!("No GNSS fix");
                        self.fixed = false;
                        return Ok(());
                    }
                    Verdict::Fixed => self.fixed = true,
                    Verdict::Pending => {}
                }

                if self.sentence.push(byte).is_err() {
                    return Err(GnssError::MalformedSentence.into());
                }
            }

            if self.transport.clock().expired(deadline) {
                warn!("No RMC sentence within {} ms", self.timeout.as_millis());
                return Err(Error::TransportTimeout);
            }
            self.transport.clock().delay(POLL_TICK).await;
        }
    }

    /// Decode the last captured sentence. The stored timestamp only changes
    /// when the whole sentence decodes.
    pub fn decode_latest(&mut self) -> Result<GnssFix, Error> {
        let fix = decode(as_text(&self.sentence))?;
        self.timestamp = fix.timestamp;
        Ok(fix)
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
    /// Drive the GNSS enable line.
    pub fn gnss_set_power_level(&mut self, enabled: bool) -> Result<(), Error> {
        match self.config.gnss_enable_pin() {
            Some(pin) => {
                if enabled {
                    pin.set_high().map_err(|_| Error::IoPin)
                } else {
                    pin.set_low().map_err(|_| Error::IoPin)
                }
            }
            None => {
                warn!("No GNSS enable pin configured");
                Ok(())
            }
        }
    }

    /// Read one RMC sentence and report whether the receiver has a fix.
    pub async fn gnss_fix_status(&mut self) -> Result<bool, Error> {
        self.gnss.read_sentence().await?;
        Ok(self.gnss.fixed())
    }

    /// Position, speed and local time from the last sentence read by
    /// [`gnss_fix_status`](Self::gnss_fix_status).
    pub fn gnss_data(&mut self) -> Result<GnssFix, Error> {
        self.gnss.decode_latest()
    }

    pub fn gnss_timestamp(&self) -> GnssTimestamp {
        self.gnss.timestamp()
    }

    pub fn gnss_sentence(&self) -> &str {
        self.gnss.sentence()
    }
}
