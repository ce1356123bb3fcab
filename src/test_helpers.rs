//! Scripted stand-ins for the serial channels, pins and clock of a board.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_io::{ErrorType, ReadReady};
use embedded_io_async::{Read, Write};

use crate::{clock::Clock, config::ModemConfig};

struct Scripted {
    command: String,
    reply: Vec<u8>,
    /// Matched on the exact bytes written, no CRLF terminator expected
    payload: bool,
}

#[derive(Default)]
struct SerialState {
    rx: VecDeque<u8>,
    tx_line: Vec<u8>,
    written: Vec<String>,
    script: VecDeque<Scripted>,
    fallback: Option<Vec<u8>>,
}

impl SerialState {
    fn complete_line(&mut self, line: String) {
        let reply = match self.script.pop_front() {
            Some(Scripted { command, reply, .. }) => {
                assert_eq!(line, command, "unexpected command sent to the modem");
                reply
            }
            None => match &self.fallback {
                Some(reply) => reply.clone(),
                None => panic!("unscripted command sent to the modem: {line}"),
            },
        };
        self.written.push(line);
        self.rx.extend(reply);
    }
}

/// AT channel answering every written line with the next scripted reply.
///
/// Clones share the same state, so a test keeps one handle while the driver
/// owns another.
#[derive(Clone, Default)]
pub struct MockSerial {
    state: Rc<RefCell<SerialState>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` to be received once `command` (without CRLF) is written.
    pub fn expect(&self, command: &str, reply: &str) -> &Self {
        self.state.borrow_mut().script.push_back(Scripted {
            command: command.into(),
            reply: reply.as_bytes().to_vec(),
            payload: false,
        });
        self
    }

    /// Queue `reply` to be received once exactly `payload` is written, as
    /// after a `DOWNLOAD` prompt.
    pub fn expect_payload(&self, payload: &str, reply: &str) -> &Self {
        self.state.borrow_mut().script.push_back(Scripted {
            command: payload.into(),
            reply: reply.as_bytes().to_vec(),
            payload: true,
        });
        self
    }

    /// Reply used for any command once the script is exhausted.
    pub fn otherwise(&self, reply: &str) -> &Self {
        self.state.borrow_mut().fallback = Some(reply.as_bytes().to_vec());
        self
    }

    /// Bytes arriving unsolicited.
    pub fn push_rx(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn pending_rx(&self) -> usize {
        self.state.borrow().rx.len()
    }

    pub fn written(&self) -> Vec<String> {
        self.state.borrow().written.clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.state.borrow().written.iter().filter(|c| *c == command).count()
    }

    pub fn assert_done(&self) {
        let state = self.state.borrow();
        assert!(
            state.script.is_empty(),
            "commands never sent: {:?}",
            state.script.iter().map(|s| &s.command).collect::<Vec<_>>()
        );
    }
}

impl ErrorType for MockSerial {
    type Error = Infallible;
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state.borrow().rx.is_empty())
    }
}

impl Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut state = self.state.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match state.rx.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut state = self.state.borrow_mut();
        for &byte in buf {
            state.tx_line.push(byte);
            let payload_done = state
                .script
                .front()
                .is_some_and(|s| s.payload && s.command.as_bytes() == state.tx_line.as_slice());
            if payload_done {
                let line = String::from_utf8_lossy(&state.tx_line).into_owned();
                state.tx_line.clear();
                state.complete_line(line);
            } else if state.tx_line.ends_with(b"\r\n") {
                let len = state.tx_line.len() - 2;
                let line = String::from_utf8_lossy(&state.tx_line[..len]).into_owned();
                state.tx_line.clear();
                state.complete_line(line);
            }
        }
        Ok(buf.len())
    }
}

/// GNSS output channel. Bytes become readable once the shared clock reaches
/// the instant they were emitted at.
#[derive(Clone, Default)]
pub struct MockGnss {
    clock: MockClock,
    rx: Rc<RefCell<VecDeque<(Instant, u8)>>>,
}

impl MockGnss {
    /// Channel on a clock of its own, for tests that never read it.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: &MockClock) -> Self {
        Self {
            clock: clock.clone(),
            rx: Rc::default(),
        }
    }

    /// Bytes already waiting in the receive buffer.
    pub fn push(&self, bytes: &[u8]) {
        self.emit(Duration::from_ticks(0), bytes);
    }

    /// Bytes sent by the receiver `after` from now.
    pub fn emit(&self, after: Duration, bytes: &[u8]) {
        let at = self.clock.now() + after;
        self.rx.borrow_mut().extend(bytes.iter().map(|&b| (at, b)));
    }

    fn ready(&self) -> bool {
        let now = self.clock.now();
        self.rx.borrow().front().is_some_and(|(at, _)| *at <= now)
    }
}

impl ErrorType for MockGnss {
    type Error = Infallible;
}

impl ReadReady for MockGnss {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.ready())
    }
}

impl Read for MockGnss {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() && self.ready() {
            if let Some((_, byte)) = self.rx.borrow_mut().pop_front() {
                buf[n] = byte;
                n += 1;
            }
        }
        Ok(n)
    }
}

/// Clock that only moves when the driver delays.
#[derive(Clone, Default)]
pub struct MockClock {
    micros: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.micros.get())
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.micros.get())
    }

    async fn delay(&self, duration: Duration) {
        self.micros.set(self.micros.get() + duration.as_micros());
    }
}

/// Module power state as seen through `PWRKEY` and `STATUS`.
///
/// A falling edge on the power key after it was held high toggles the module,
/// unless it is `stuck`.
#[derive(Default)]
pub struct SimulatedModule {
    pub on: Cell<bool>,
    pub stuck: Cell<bool>,
    pub pulses: Cell<usize>,
    key_high: Cell<bool>,
    gnss_enabled: Cell<Option<bool>>,
}

impl SimulatedModule {
    pub fn new(on: bool) -> Rc<Self> {
        let module = Self::default();
        module.on.set(on);
        Rc::new(module)
    }

    pub fn gnss_enabled(&self) -> Option<bool> {
        self.gnss_enabled.get()
    }
}

pub struct MockPowerPin(pub Rc<SimulatedModule>);

impl PinErrorType for MockPowerPin {
    type Error = Infallible;
}

impl OutputPin for MockPowerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.0.key_high.replace(false) {
            self.0.pulses.set(self.0.pulses.get() + 1);
            if !self.0.stuck.get() {
                self.0.on.set(!self.0.on.get());
            }
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.key_high.set(true);
        Ok(())
    }
}

pub struct MockStatusPin(pub Rc<SimulatedModule>);

impl PinErrorType for MockStatusPin {
    type Error = Infallible;
}

impl InputPin for MockStatusPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.on.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.on.get())
    }
}

pub struct MockGnssEnablePin(pub Rc<SimulatedModule>);

impl PinErrorType for MockGnssEnablePin {
    type Error = Infallible;
}

impl OutputPin for MockGnssEnablePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.gnss_enabled.set(Some(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.gnss_enabled.set(Some(true));
        Ok(())
    }
}

pub struct TestConfig {
    power: MockPowerPin,
    status: MockStatusPin,
    gnss: MockGnssEnablePin,
}

impl TestConfig {
    pub fn new(module: &Rc<SimulatedModule>) -> Self {
        Self {
            power: MockPowerPin(module.clone()),
            status: MockStatusPin(module.clone()),
            gnss: MockGnssEnablePin(module.clone()),
        }
    }
}

impl ModemConfig for TestConfig {
    type PowerPin = MockPowerPin;
    type StatusPin = MockStatusPin;
    type GnssEnablePin = MockGnssEnablePin;

    const AT_DEBUG: bool = true;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        Some(&mut self.power)
    }

    fn status_pin(&mut self) -> Option<&mut Self::StatusPin> {
        Some(&mut self.status)
    }

    fn gnss_enable_pin(&mut self) -> Option<&mut Self::GnssEnablePin> {
        Some(&mut self.gnss)
    }
}
