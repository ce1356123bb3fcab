use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use heapless::String;

pub use crate::command::http::types::HttpMethod;
use crate::{
    client::REPLY_BUFFER_LEN,
    clock::Clock,
    command::http::{
        types::{tag, DOWNLOAD_PROMPT},
        HttpAction, HttpInit, HttpRead, HttpTerminate, SetHttpBearerProfile, SetHttpData,
        SetHttpParameter,
    },
    config::{bounded, ModemConfig},
    device::Sim868,
    error::{Error, HttpError},
    gnss::FixValidator,
    module_timing::{
        DEFAULT_TIMEOUT, HTTP_ACTION_TIMEOUT, HTTP_BODY_READ_TIMEOUT, HTTP_BODY_WRITE_TIMEOUT,
        HTTP_UPLOAD_WINDOW_MS,
    },
    parse::{after_prefix, parse_reply},
    transport::ReadOutcome,
};

pub const MAX_USER_AGENT_LEN: usize = 64;
pub const MAX_CONTENT_TYPE_LEN: usize = 64;
pub const MAX_USER_DATA_LEN: usize = 128;
pub const MAX_ROOT_LEN: usize = 128;
pub const MAX_PATH_LEN: usize = 128;
pub const MAX_URL_LEN: usize = MAX_ROOT_LEN + MAX_PATH_LEN;
pub const MAX_JSON_LEN: usize = 512;
pub const HTTP_BUFFER_LEN: usize = REPLY_BUFFER_LEN;

/// Parameters of the next HTTP request.
///
/// `user_data` is sent verbatim as an extra header line, typically an
/// `Authorization` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeader {
    user_agent: String<MAX_USER_AGENT_LEN>,
    content_type: String<MAX_CONTENT_TYPE_LEN>,
    user_data: String<MAX_USER_DATA_LEN>,
    root: String<MAX_ROOT_LEN>,
    path: String<MAX_PATH_LEN>,
    json: String<MAX_JSON_LEN>,
}

impl HttpHeader {
    pub fn set_user_agent(&mut self, user_agent: &str) -> Result<(), Error> {
        self.user_agent = bounded(user_agent)?;
        Ok(())
    }

    pub fn set_content_type(&mut self, content_type: &str) -> Result<(), Error> {
        self.content_type = bounded(content_type)?;
        Ok(())
    }

    pub fn set_user_data(&mut self, user_data: &str) -> Result<(), Error> {
        self.user_data = bounded(user_data)?;
        Ok(())
    }

    /// Scheme and host, e.g. `http://api.example.com`
    pub fn set_root(&mut self, root: &str) -> Result<(), Error> {
        self.root = bounded(root)?;
        Ok(())
    }

    pub fn set_path(&mut self, path: &str) -> Result<(), Error> {
        self.path = bounded(path)?;
        Ok(())
    }

    /// Body of the next POST request
    pub fn set_json(&mut self, json: &str) -> Result<(), Error> {
        self.json = bounded(json)?;
        Ok(())
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn user_data(&self) -> &str {
        &self.user_data
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn url(&self) -> Result<String<MAX_URL_LEN>, Error> {
        let mut url = String::new();
        url.push_str(&self.root).map_err(|_| Error::Overflow)?;
        url.push_str(&self.path).map_err(|_| Error::Overflow)?;
        Ok(url)
    }

    fn validate(&self, method: HttpMethod) -> Result<(), Error> {
        if self.user_agent.is_empty() || self.content_type.is_empty() || self.root.is_empty() {
            return Err(HttpError::IncompleteHeader.into());
        }
        if method == HttpMethod::Post && self.json.is_empty() {
            return Err(HttpError::IncompleteHeader.into());
        }
        Ok(())
    }
}

/// Header of the next request plus the outcome of the last one.
#[derive(Debug, Default)]
pub(crate) struct HttpSession {
    pub(crate) header: HttpHeader,
    response: String<HTTP_BUFFER_LEN>,
    status_code: Option<u16>,
    content_length: u32,
}

impl HttpSession {
    pub(crate) fn new() -> Self {
        Self::default()
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
    pub fn http_header(&self) -> &HttpHeader {
        &self.http.header
    }

    pub fn http_header_mut(&mut self) -> &mut HttpHeader {
        &mut self.http.header
    }

    pub fn set_http_header(&mut self, header: HttpHeader) {
        self.http.header = header;
    }

    /// Body of the last response
    pub fn http_response(&self) -> &str {
        &self.http.response
    }

    /// Status code of the last `+HTTPACTION`, kept when the request failed
    pub fn last_status_code(&self) -> Option<u16> {
        self.http.status_code
    }

    /// Body length announced by the last `+HTTPACTION`
    pub fn last_content_length(&self) -> u32 {
        self.http.content_length
    }

    /// Start a fresh HTTP session and load the header into it.
    pub async fn http_init(&mut self, method: HttpMethod) -> Result<(), Error> {
        self.http.header.validate(method)?;

        // A session left open by an earlier failure makes +HTTPINIT fail
        self.at.get_reply(&HttpTerminate, DEFAULT_TIMEOUT).await?;

        self.at
            .expect_reply(&HttpInit, "OK", DEFAULT_TIMEOUT, HttpError::Service.into())
            .await?;

        self.at
            .expect_reply(
                &SetHttpBearerProfile {
                    tag: tag::BEARER_PROFILE,
                    cid: C::BEARER_PROFILE,
                },
                "OK",
                DEFAULT_TIMEOUT,
                Error::ReplyMismatch,
            )
            .await?;

        let header = &self.http.header;
        let url = header.url()?;
        let params = [
            (tag::USER_AGENT, header.user_agent()),
            (tag::CONTENT_TYPE, header.content_type()),
            (tag::USER_DATA, header.user_data()),
            (tag::URL, url.as_str()),
        ];
        for (tag, value) in params {
            self.at
                .expect_reply(
                    &SetHttpParameter { tag, value },
                    "OK",
                    DEFAULT_TIMEOUT,
                    Error::ReplyMismatch,
                )
                .await?;
        }
        Ok(())
    }

    /// Run the request, uploading the JSON body first for POST.
    ///
    /// Any status other than 200/201 fails with
    /// [`HttpError::StatusCode`] and stays available through
    /// [`last_status_code`](Self::last_status_code).
    pub async fn http_action(&mut self, method: HttpMethod) -> Result<u16, Error> {
        if method == HttpMethod::Post {
            let json = self.http.header.json();
            self.at
                .expect_reply(
                    &SetHttpData {
                        size: json.len() as u32,
                        time: HTTP_UPLOAD_WINDOW_MS,
                    },
                    DOWNLOAD_PROMPT,
                    DEFAULT_TIMEOUT,
                    Error::ReplyMismatch,
                )
                .await?;

            self.at
                .get_reply_raw(json.as_bytes(), HTTP_BODY_WRITE_TIMEOUT)
                .await?;
            if self.at.reply() != "OK" {
                return Err(HttpError::JsonBody.into());
            }
        }

        self.at
            .expect_reply(
                &HttpAction { method },
                "OK",
                HTTP_ACTION_TIMEOUT,
                HttpError::Request.into(),
            )
            .await?;

        let outcome = self.at.read_reply(HTTP_ACTION_TIMEOUT).await?;
        if outcome == ReadOutcome::Timeout && self.at.reply().is_empty() {
            return Err(Error::TransportTimeout);
        }

        let status = parse_reply(self.at.reply(), "+HTTPACTION: ", ',', 1)?;
        let status = u16::try_from(status).unwrap_or(0);
        self.http.status_code = Some(status);
        self.http.content_length = parse_reply(self.at.reply(), "+HTTPACTION: ", ',', 2)
            .map(|len| u32::try_from(len).unwrap_or(0))
            .unwrap_or(0);

        info!("HTTP status code {}", status);
        match status {
            200 | 201 => Ok(status),
            code => Err(HttpError::StatusCode(code).into()),
        }
    }

    /// Fetch the response body into the HTTP buffer.
    pub async fn http_read_all(&mut self) -> Result<(), Error> {
        self.at.get_reply(&HttpRead, DEFAULT_TIMEOUT).await?;
        if after_prefix(self.at.reply(), "+HTTPREAD: ").is_none() {
            return Err(Error::ReplyMismatch);
        }

        self.at.read_reply(HTTP_BODY_READ_TIMEOUT).await?;
        self.http.response.clear();
        self.http
            .response
            .push_str(self.at.reply())
            .map_err(|_| Error::Overflow)
    }

    /// Action, body download and session teardown.
    pub async fn http_start(&mut self, method: HttpMethod) -> Result<u16, Error> {
        let status = self.http_action(method).await?;
        self.http_read_all().await?;
        self.at
            .expect_reply(&HttpTerminate, "OK", DEFAULT_TIMEOUT, Error::ReplyMismatch)
            .await?;

        info!("HTTP request done");
        Ok(status)
    }

    /// Initialize a session, then run the request, each step retried up to
    /// `max_attempts` times.
    pub async fn send_request(&mut self, method: HttpMethod, max_attempts: u8) -> Result<u16, Error> {
        self.ensure_powered()?;
        self.http.header.validate(method)?;

        let attempts = max_attempts.max(1);

        let mut initialized = false;
        for attempt in 1..=attempts {
            match self.http_init(method).await {
                Ok(()) => {
                    initialized = true;
                    break;
                }
                Err(e) => warn!("HTTP init attempt {} failed: {:?}", attempt, e),
            }
        }
        if !initialized {
            return Err(HttpError::Service.into());
        }

        for attempt in 1..=attempts {
            match self.http_start(method).await {
                Ok(status) => return Ok(status),
                Err(e) => warn!("HTTP request attempt {} failed: {:?}", attempt, e),
            }
        }
        Err(HttpError::Request.into())
    }
}
