/// SIM card bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// The module does not report a SIM card as inserted
    CardStatus,
    /// The SIM card asks for a PIN/PUK (anything but `READY`)
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// Signal quality outside the usable `9..=31` window
    Rssi(u8),
    /// Registration did not succeed within the polling window
    Registration,
    /// GPRS attach/detach was refused
    GprsService,
    /// Bearer (PDP context) could not be configured, opened or closed
    GprsContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// The HTTP service could not be initialized
    Service,
    /// The request could not be issued or completed
    Request,
    /// The server answered with a status code other than 200/201
    StatusCode(u16),
    /// The POST body was not accepted by the module
    JsonBody,
    /// User agent, content type or root URL missing
    IncompleteHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GnssError {
    MalformedSentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    // General device errors
    BaudDetection,
    PowerState,
    PoweredDown,
    IoPin,
    Serial(embedded_io::ErrorKind),

    // AT transaction errors
    TransportTimeout,
    ReplyMismatch,
    CommandTooLong,
    Overflow,

    Sim(SimError),
    Network(NetworkError),
    Http(HttpError),
    Gnss(GnssError),
}

impl From<SimError> for Error {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

impl From<GnssError> for Error {
    fn from(e: GnssError) -> Self {
        Self::Gnss(e)
    }
}

pub(crate) fn from_serial<E: embedded_io::Error>(e: E) -> Error {
    Error::Serial(e.kind())
}
