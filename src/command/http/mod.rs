//! ### HTTP application commands
//!
//! The SIM868 runs a single HTTP session at a time on top of an open bearer
//! profile. A session is started with `+HTTPINIT`, configured parameter by
//! parameter with `+HTTPPARA`, executed with `+HTTPACTION` and torn down with
//! `+HTTPTERM`. POST bodies are uploaded beforehand with `+HTTPDATA`.
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::HttpMethod;

/// Initialize HTTP service +HTTPINIT
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPINIT", NoResponse)]
pub struct HttpInit;

/// Terminate HTTP service +HTTPTERM
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPTERM", NoResponse)]
pub struct HttpTerminate;

/// Set HTTP parameters value +HTTPPARA, text valued parameters (`UA`,
/// `CONTENT`, `USERDATA`, `URL`)
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPPARA", NoResponse)]
pub struct SetHttpParameter<'a> {
    #[at_arg(position = 0, len = 10)]
    pub tag: &'a str,
    #[at_arg(position = 1, len = 256)]
    pub value: &'a str,
}

/// Set HTTP parameters value +HTTPPARA, bearer profile identifier (`CID`)
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPPARA", NoResponse)]
pub struct SetHttpBearerProfile<'a> {
    #[at_arg(position = 0, len = 3)]
    pub tag: &'a str,
    #[at_arg(position = 1)]
    pub cid: u8,
}

/// Input HTTP data +HTTPDATA
///
/// The module answers with a `DOWNLOAD` prompt and then accepts exactly `size`
/// bytes within `time` milliseconds.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPDATA", NoResponse)]
pub struct SetHttpData {
    #[at_arg(position = 0)]
    pub size: u32,
    #[at_arg(position = 1)]
    pub time: u32,
}

/// HTTP method action +HTTPACTION
///
/// Answered with `OK`, followed once the server responded by
/// `+HTTPACTION: <method>,<status>,<datalen>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPACTION", NoResponse, timeout_ms = 30000)]
pub struct HttpAction {
    #[at_arg(position = 0)]
    pub method: HttpMethod,
}

/// Read the HTTP server response +HTTPREAD
///
/// Answered with `+HTTPREAD: <datalen>` followed by the body.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPREAD", NoResponse)]
pub struct HttpRead;
