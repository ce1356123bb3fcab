use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpMethod {
    Get = 0,
    Post = 1,
}

/// `+HTTPPARA` tags
pub mod tag {
    pub const BEARER_PROFILE: &str = "CID";
    pub const USER_AGENT: &str = "UA";
    pub const CONTENT_TYPE: &str = "CONTENT";
    pub const USER_DATA: &str = "USERDATA";
    pub const URL: &str = "URL";
}

/// Prompt the module sends once it is ready to receive `+HTTPDATA` bytes
pub const DOWNLOAD_PROMPT: &str = "DOWNLOAD";
