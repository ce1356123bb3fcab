/// `<stat>` field of `+CREG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationStatus {
    NotRegistered,
    RegisteredHome,
    Searching,
    Denied,
    RegisteredRoaming,
    Unknown,
}

impl From<i32> for RegistrationStatus {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::NotRegistered,
            1 => Self::RegisteredHome,
            2 => Self::Searching,
            3 => Self::Denied,
            5 => Self::RegisteredRoaming,
            _ => Self::Unknown,
        }
    }
}

impl RegistrationStatus {
    pub fn registered(self) -> bool {
        matches!(self, Self::RegisteredHome | Self::RegisteredRoaming)
    }
}

/// `<status>` field of `+SAPBR=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Connecting,
    Connected,
    Closing,
    Closed,
}

impl TryFrom<i32> for ConnectionState {
    type Error = crate::error::Error;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Connecting),
            1 => Ok(Self::Connected),
            2 => Ok(Self::Closing),
            3 => Ok(Self::Closed),
            _ => Err(crate::error::Error::ReplyMismatch),
        }
    }
}

/// Coarse signal quality derived from the `+CSQ` RSSI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalStrength {
    Unusable,
    Low,
    Medium,
    High,
}

impl SignalStrength {
    pub fn from_rssi(rssi: u8) -> Self {
        match rssi {
            0..=8 => Self::Unusable,
            9..=14 => Self::Low,
            15..=19 => Self::Medium,
            20..=31 => Self::High,
            _ => Self::Unusable,
        }
    }
}
