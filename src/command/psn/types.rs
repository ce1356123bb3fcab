use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum GPRSAttachedState {
    Detached = 0,
    Attached = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum BearerCommand {
    Close = 0,
    Open = 1,
    Query = 2,
    SetParameter = 3,
    GetParameter = 4,
}

/// Bearer parameter tags accepted by `+SAPBR=3`
pub mod tag {
    pub const CONNECTION_TYPE: &str = "CONTYPE";
    pub const APN: &str = "APN";
    pub const USER: &str = "USER";
    pub const PASSWORD: &str = "PWD";
}

/// Connection type used for every bearer the driver opens
pub const CONNECTION_TYPE_GPRS: &str = "GPRS";
