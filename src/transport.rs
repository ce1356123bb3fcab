use embassy_time::Duration;
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use heapless::Vec;

use crate::{
    clock::Clock,
    error::{from_serial, Error},
    module_timing::POLL_TICK,
};

/// How a [`Transport::read_line`] window was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// A line terminator was seen (single line mode only)
    Line,
    /// The buffer ran full. Single line mode drained the rest of the line.
    Full,
    /// The window closed, the buffer holds whatever was captured so far
    Timeout,
}

/// Line framing on top of a polled serial channel.
pub struct Transport<S, CLK> {
    serial: S,
    clock: CLK,
}

impl<S, CLK> Transport<S, CLK>
where
    S: Read + ReadReady,
    CLK: Clock,
{
    pub fn new(serial: S, clock: CLK) -> Self {
        Self { serial, clock }
    }

    pub fn release(self) -> S {
        self.serial
    }

    pub fn clock(&self) -> &CLK {
        &self.clock
    }

    /// Next byte if one is waiting, never suspends.
    pub async fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.serial.read_ready().map_err(from_serial)? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.serial.read(&mut byte).await.map_err(from_serial)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Capture one reply into `buf`, polling the channel every [`POLL_TICK`]
    /// until `timeout` has elapsed.
    ///
    /// Carriage returns are dropped and newlines received before the first
    /// data byte are swallowed. Without `multiline` the next newline ends the
    /// read, otherwise newlines are stored like any other byte and only a full
    /// buffer or the timeout end it. `buf` is never written past its capacity,
    /// excess bytes of a single line are read and dropped.
    pub async fn read_line<const N: usize>(
        &mut self,
        buf: &mut Vec<u8, N>,
        timeout: Duration,
        multiline: bool,
    ) -> Result<ReadOutcome, Error> {
        let deadline = self.clock.deadline(timeout);
        let mut truncated = false;

        loop {
            while let Some(byte) = self.read_byte().await? {
                match byte {
                    b'\r' => {}
                    b'\n' if buf.is_empty() => {}
                    b'\n' if !multiline => {
                        return Ok(if truncated {
                            ReadOutcome::Full
                        } else {
                            ReadOutcome::Line
                        });
                    }
                    _ => {
                        if buf.push(byte).is_err() {
                            if multiline {
                                return Ok(ReadOutcome::Full);
                            }
                            truncated = true;
                        }
                    }
                }
            }

            if self.clock.expired(deadline) {
                return Ok(if truncated {
                    ReadOutcome::Full
                } else {
                    ReadOutcome::Timeout
                });
            }
            self.clock.delay(POLL_TICK).await;
        }
    }

    /// Drop everything pending on the input side.
    pub async fn flush_input(&mut self) -> Result<(), Error> {
        let mut scratch = [0u8; 32];
        while self.serial.read_ready().map_err(from_serial)? {
            if self.serial.read(&mut scratch).await.map_err(from_serial)? == 0 {
                break;
            }
        }
        Ok(())
    }
}

impl<S, CLK> Transport<S, CLK>
where
    S: Write,
{
    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.serial.write_all(bytes).await.map_err(from_serial)?;
        self.serial.flush().await.map_err(from_serial)
    }
}

/// Longest valid UTF-8 prefix of a captured line.
pub(crate) fn as_text(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}
