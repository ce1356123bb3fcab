use atat::AtatCmd;
use embassy_time::Duration;
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use heapless::Vec;

use crate::{
    clock::Clock,
    config::COMMAND_BUFFER_LEN,
    error::Error,
    parse::parse_reply,
    transport::{as_text, ReadOutcome, Transport},
};

pub const REPLY_BUFFER_LEN: usize = 256;

/// Command/reply engine of the AT channel.
///
/// Every transaction overwrites the single reply buffer, so a reply has to be
/// consumed before the next command is issued.
pub struct AtClient<S, CLK> {
    transport: Transport<S, CLK>,
    reply: Vec<u8, REPLY_BUFFER_LEN>,
    max_command_len: usize,
    debug: bool,
}

impl<S, CLK> AtClient<S, CLK>
where
    S: Read + Write + ReadReady,
    CLK: Clock,
{
    pub fn new(serial: S, clock: CLK, max_command_len: usize, debug: bool) -> Self {
        Self {
            transport: Transport::new(serial, clock),
            reply: Vec::new(),
            max_command_len: max_command_len.min(COMMAND_BUFFER_LEN),
            debug,
        }
    }

    pub fn release(self) -> S {
        self.transport.release()
    }

    /// Most recent reply line
    pub fn reply(&self) -> &str {
        as_text(&self.reply)
    }

    /// Send `cmd` and capture the first reply line.
    pub async fn get_reply<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        timeout: Duration,
    ) -> Result<ReadOutcome, Error> {
        // The scratch line must hold the longest rendering of `Cmd`
        if Cmd::MAX_LEN > COMMAND_BUFFER_LEN {
            return Err(Error::CommandTooLong);
        }

        let mut line = [0u8; COMMAND_BUFFER_LEN];
        let len = cmd.write(&mut line);
        if len > self.max_command_len {
            return Err(Error::CommandTooLong);
        }
        self.transaction(&line[..len], timeout).await
    }

    /// Send raw bytes as they are, without a line terminator, and capture the
    /// first reply line. Used for payloads of a declared length the module
    /// expects after a prompt.
    pub async fn get_reply_raw(&mut self, data: &[u8], timeout: Duration) -> Result<ReadOutcome, Error> {
        if data.len() > self.max_command_len {
            return Err(Error::CommandTooLong);
        }
        self.transaction(data, timeout).await
    }

    async fn transaction(&mut self, line: &[u8], timeout: Duration) -> Result<ReadOutcome, Error> {
        self.transport.flush_input().await?;
        self.reply.clear();

        if self.debug {
            debug!("---> {}", as_text(line).trim_end());
        }

        self.transport.write_all(line).await?;

        let outcome = self.transport.read_line(&mut self.reply, timeout, false).await?;

        if self.debug {
            debug!("<--- {}", as_text(&self.reply));
        }
        Ok(outcome)
    }

    /// Capture the next line without sending anything, for replies that
    /// follow the final result code of a command.
    pub async fn read_reply(&mut self, timeout: Duration) -> Result<ReadOutcome, Error> {
        self.reply.clear();
        let outcome = self.transport.read_line(&mut self.reply, timeout, false).await?;
        if self.debug {
            debug!("<--- {}", as_text(&self.reply));
        }
        Ok(outcome)
    }

    /// Send `cmd` and report whether the reply is exactly `expected`.
    pub async fn send_check_reply<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        expected: &str,
        timeout: Duration,
    ) -> Result<bool, Error> {
        self.get_reply(cmd, timeout).await?;
        Ok(self.reply() == expected)
    }

    /// Like [`send_check_reply`](Self::send_check_reply), failing with
    /// `error` on a mismatch.
    pub async fn expect_reply<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        expected: &str,
        timeout: Duration,
        error: Error,
    ) -> Result<(), Error> {
        if self.send_check_reply(cmd, expected, timeout).await? {
            Ok(())
        } else {
            Err(error)
        }
    }

    /// Send `cmd` and read field `field_index` of the reply, see
    /// [`parse_reply`].
    pub async fn send_parse_reply<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        prefix: &str,
        divider: char,
        field_index: usize,
        timeout: Duration,
    ) -> Result<i32, Error> {
        self.get_reply(cmd, timeout).await?;
        parse_reply(self.reply(), prefix, divider, field_index)
    }
}
